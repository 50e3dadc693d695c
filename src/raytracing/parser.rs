use std::fmt;

use super::{
    camera::Camera,
    core::{Light, Scene, SceneObject},
    Vec3,
};

/// Recursive descent parser for the scene description format:
///
/// ```text
/// size 320 240
/// camera from (0, 1, 8)
/// background (0.1, 0.1, 0.2)
/// sphere (0, 0, 0) 2 (0.8, 0.2, 0.2)
/// plane (0, -2, 0) (0, 1, 0) green
/// light (2, 5, 2) 1.5
/// ```
pub struct SceneParser<'a> {
    content: &'a str,
    buffer: String,
    position: FilePosition,
}

#[derive(Debug, Clone, Copy)]
struct FilePosition {
    line: u32,
    column: u32,
    index: u32,
}

impl FilePosition {
    fn new() -> Self {
        FilePosition {
            line: 0,
            column: 0,
            index: 0,
        }
    }

    fn on_new_line(self: &mut Self) {
        self.line += 1;
        self.column = 0;
        self.index += 1;
    }

    fn advance(self: &mut Self) {
        self.column += 1;
        self.index += 1;
    }
}

#[derive(Debug)]
pub struct ParserError {
    position: FilePosition,
    pub message: String,
}

impl ParserError {
    fn new(message: &str, position: FilePosition) -> ParserError {
        ParserError {
            position,
            message: message.to_string(),
        }
    }

    pub fn print_error_location(self: &Self, content: &str) {
        println!("{}", self);
        if let Some(line) = content.lines().nth(self.position.line as usize) {
            println!("{}", line);
            let spacing = " ".repeat(self.position.column as usize);
            println!("{}^", spacing);
        }
    }
}

impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} at {}:{}",
            self.message, self.position.line, self.position.column
        )
    }
}

type ParserResult<T> = Result<T, ParserError>;

/// Everything a scene file describes: the output size, the viewpoint and
/// the scene content itself.
#[derive(Debug)]
pub struct SceneDescription {
    pub width: u32,
    pub height: u32,
    pub camera: Camera,
    pub scene: Scene,
}

impl SceneParser<'_> {
    pub fn new<'a>(content: &'a str) -> SceneParser<'a> {
        SceneParser {
            content,
            position: FilePosition::new(),
            buffer: "".to_string(),
        }
    }

    fn get_current_char(self: &Self) -> Option<char> {
        self.content.chars().nth(self.position.index as usize)
    }

    fn is_empty(self: &mut Self) -> bool {
        if !self.buffer.is_empty() {
            return false;
        }
        // the stream can still hold trailing spaces or comments
        self.eat_spaces();
        self.get_current_char().is_none()
    }

    fn advance(self: &mut Self) {
        if let Some(current_char) = self.get_current_char() {
            if current_char == '\n' {
                self.position.on_new_line();
            } else {
                self.position.advance();
            }
        }
    }

    fn advance_until(self: &mut Self, f: impl Fn(char) -> bool) {
        while let Some(current_char) = self.get_current_char() {
            if f(current_char) {
                break;
            }
            self.advance();
        }
    }

    fn eat_spaces(self: &mut Self) {
        // consume all the empty lines, spaces and comments before the next token
        while let Some(current_char) = self.get_current_char() {
            if current_char == '#' {
                // consume the characters until the end of the line
                // note: the end-of-line itself is consumed at the end of the loop
                self.advance_until(|c| c == '\n');
            } else if !current_char.is_whitespace() {
                break;
            }
            self.advance();
        }
    }

    fn pop(self: &mut Self) -> String {
        // check if we already peeked without eating the next token
        if !self.buffer.is_empty() {
            let result = self.buffer.clone();
            self.buffer.clear();
            return result;
        }

        self.eat_spaces();
        let mut result = String::new();
        let Some(mut current_char) = self.get_current_char() else {
            return result;
        };
        // add the current char to the result string and advance
        let enqueue = move |parser: &mut SceneParser, result: &mut String| {
            if let Some(current_char) = parser.get_current_char() {
                result.push(current_char);
                parser.advance();
            }
            if let Some(next_char) = parser.get_current_char() {
                return next_char;
            }
            return ' ';
        };

        match current_char {
            // if char is a symbol return it
            ',' | '(' | ')' => {
                self.advance();
                result.push(current_char);
            }
            // float parsing
            '.' | '+' | '-' | '0'..='9' => {
                if current_char == '+' || current_char == '-' {
                    current_char = enqueue(self, &mut result);
                }

                while current_char.is_ascii_digit() {
                    current_char = enqueue(self, &mut result);
                }

                if current_char == '.' {
                    current_char = enqueue(self, &mut result);
                    while current_char.is_ascii_digit() {
                        current_char = enqueue(self, &mut result);
                    }
                }
            }

            _ => {
                while current_char.is_alphabetic() {
                    current_char = enqueue(self, &mut result);
                }
            }
        }
        return result;
    }

    fn peek(self: &mut Self) -> &String {
        // peek always looks ahead and saves the result to the buffer
        if self.buffer.is_empty() {
            self.buffer = self.pop();
        }
        return &self.buffer;
    }

    fn error<T>(self: &mut Self, message: &str) -> ParserResult<T> {
        Err(ParserError::new(message, self.position))
    }

    fn parse_float(self: &mut Self) -> ParserResult<f64> {
        let next_token = self.pop();
        if let Ok(num) = next_token.parse::<f64>() {
            Ok(num)
        } else {
            let message = format!(
                "error parsing file: cannot interp '{}' as a float",
                next_token
            );
            self.error(&message)
        }
    }

    fn match_token(self: &mut Self, expected_lexem: &str) -> ParserResult<()> {
        // match primitive: consume a lexem from the stream and if is different
        // from the expected one raise an error
        let next_lexem = self.pop();
        if next_lexem != expected_lexem {
            let message = format!(
                "error parsing the scene file: expected '{}', getting '{}' instead",
                expected_lexem, next_lexem
            );
            self.error(&message)
        } else {
            Ok(())
        }
    }

    fn maybe_match(self: &mut Self, expected_lexem: &str) -> bool {
        // variant of match that can fail
        // if the expected lexem is the next in the stream, we consume it and return true.
        // return false otherwise leaving the stream untouched
        let next_lexem = self.peek();
        if *next_lexem == expected_lexem {
            self.pop();
            return true;
        }
        return false;
    }

    fn parse_header(self: &mut Self) -> ParserResult<(f64, f64)> {
        self.match_token("size")?;
        let width = self.parse_float()?;
        let height = self.parse_float()?;
        Ok((width, height))
    }

    fn parse_vec3(self: &mut Self) -> ParserResult<Vec3> {
        self.match_token("(")?;
        let x = self.parse_float()?;
        self.match_token(",")?;
        let y = self.parse_float()?;
        self.match_token(",")?;
        let z = self.parse_float()?;
        self.match_token(")")?;
        return Ok(Vec3::new(x, y, z));
    }

    fn parse_color(self: &mut Self) -> ParserResult<Vec3> {
        // predefined color
        if self.maybe_match("red") {
            Ok(Vec3::new(1.0, 0.0, 0.0))
        } else if self.maybe_match("green") {
            Ok(Vec3::new(0.0, 1.0, 0.0))
        } else if self.maybe_match("blue") {
            Ok(Vec3::new(0.0, 0.0, 1.0))
        } else if self.maybe_match("white") {
            Ok(Vec3::new(1.0, 1.0, 1.0))
        } else if self.maybe_match("black") {
            Ok(Vec3::new(0.0, 0.0, 0.0))
        } else if self.maybe_match("cyan") {
            Ok(Vec3::new(0.0, 1.0, 1.0))
        } else if self.maybe_match("violet") {
            Ok(Vec3::new(1.0, 0.0, 1.0))
        } else if self.maybe_match("yellow") {
            Ok(Vec3::new(1.0, 1.0, 0.0))
        } else if self.maybe_match("orange") {
            Ok(Vec3::new(0.98, 0.45, 0.02))
        } else {
            self.parse_vec3()
        }
    }

    fn parse_sphere(&mut self) -> ParserResult<SceneObject> {
        self.match_token("sphere")?;
        let center = self.parse_vec3()?;
        let radius = self.parse_float()?;
        let color = self.parse_color()?;
        Ok(SceneObject::sphere(center, radius, color))
    }

    fn parse_plane(&mut self) -> ParserResult<SceneObject> {
        self.match_token("plane")?;
        let point = self.parse_vec3()?;
        let normal = self.parse_vec3()?;
        let color = self.parse_color()?;
        Ok(SceneObject::plane(point, normal, color))
    }

    fn parse_light(&mut self) -> ParserResult<Light> {
        self.match_token("light")?;
        let position = self.parse_vec3()?;
        let intensity = self.parse_float()?;
        return Ok(Light {
            position,
            intensity,
        });
    }

    fn parse_camera(&mut self) -> ParserResult<Camera> {
        if self.maybe_match("camera") {
            self.match_token("from")?;
            let position = self.parse_vec3()?;
            Ok(Camera::new(position))
        } else {
            Ok(Camera::default())
        }
    }

    pub fn parse_scene(&mut self) -> ParserResult<SceneDescription> {
        // main routine that parses the whole file
        let (width, height) = self.parse_header()?;
        let camera = self.parse_camera()?;

        let mut scene = Scene::new();
        while !self.is_empty() {
            let next_token = self.peek();
            match next_token.as_str() {
                "background" => {
                    self.pop();
                    scene.background = self.parse_color()?;
                }
                "light" => {
                    let light = self.parse_light()?;
                    scene.add_light(light);
                }
                "sphere" => {
                    let object = self.parse_sphere()?;
                    scene.add_object(object);
                }
                "plane" => {
                    let object = self.parse_plane()?;
                    scene.add_object(object);
                }
                _ => {
                    let message = format!("unexpected token '{}'", next_token);
                    return self.error(&message);
                }
            }
        }
        Ok(SceneDescription {
            width: width as u32,
            height: height as u32,
            camera,
            scene,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raytracing::core::Solid;

    #[test]
    fn parses_a_complete_scene() {
        let content = "\
size 320 240
camera from (0, 1, 8)
background (0.05, 0.05, 0.1)
# a sphere resting on a plane
sphere (0, 0, 0) 2 (0.8, 0.2, 0.2)
plane (0, -2, 0) (0, 1, 0) green
light (2, 5, 2) 1.5
light (-3, 4, 1) 0.5
";
        let mut parser = SceneParser::new(content);
        let description = parser.parse_scene().unwrap();

        assert_eq!(description.width, 320);
        assert_eq!(description.height, 240);
        assert_eq!(description.camera.position, Vec3::new(0.0, 1.0, 8.0));
        assert_eq!(description.scene.background, Vec3::new(0.05, 0.05, 0.1));
        assert_eq!(description.scene.objects.len(), 2);
        assert_eq!(description.scene.lights.len(), 2);
        assert_eq!(description.scene.lights[0].intensity, 1.5);

        match description.scene.objects[1].solid {
            Solid::Plane { normal, .. } => assert_eq!(normal, Vec3::new(0.0, 1.0, 0.0)),
            _ => panic!("expected a plane"),
        }
    }

    #[test]
    fn camera_and_background_are_optional() {
        let content = "size 4 4\nsphere (0, 0, -5) 1 white";
        let mut parser = SceneParser::new(content);
        let description = parser.parse_scene().unwrap();

        assert_eq!(description.camera.position, Vec3::zero());
        assert_eq!(description.scene.background, Vec3::new(0.1, 0.1, 0.2));
        assert_eq!(description.scene.objects.len(), 1);
    }

    #[test]
    fn named_colors_resolve_to_rgb_triples() {
        let content = "size 4 4\nsphere (0, 0, 0) 1 orange";
        let mut parser = SceneParser::new(content);
        let description = parser.parse_scene().unwrap();
        assert_eq!(
            description.scene.objects[0].color,
            Vec3::new(0.98, 0.45, 0.02)
        );
    }

    #[test]
    fn negative_coordinates_are_parsed() {
        let content = "size 4 4\nlight (-2.5, 3, -0.5) 2";
        let mut parser = SceneParser::new(content);
        let description = parser.parse_scene().unwrap();
        assert_eq!(
            description.scene.lights[0].position,
            Vec3::new(-2.5, 3.0, -0.5)
        );
    }

    #[test]
    fn unexpected_tokens_report_their_location() {
        let content = "size 4 4\ntriangle (0, 0, 0)";
        let mut parser = SceneParser::new(content);
        let error = parser.parse_scene().unwrap_err();
        assert!(error.message.contains("unexpected token 'triangle'"));
    }

    #[test]
    fn missing_header_is_an_error() {
        let content = "sphere (0, 0, 0) 1 red";
        let mut parser = SceneParser::new(content);
        assert!(parser.parse_scene().is_err());
    }
}
