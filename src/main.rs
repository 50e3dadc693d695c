use std::error::Error;
use std::fs;
use std::time::Instant;

use clap::Parser;
use image::RgbaImage;

use shadecast::raytracing::parser::{SceneDescription, SceneParser};
use shadecast::raytracing::renderer::Renderer;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Args {
    /// the input path to the scene file
    scene: String,
    /// the path where the rendered image is saved
    #[arg(short, long, default_value = "output.png")]
    output: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let content = fs::read_to_string(args.scene)?;
    let mut parser = SceneParser::new(&content);
    let parser_result = parser.parse_scene();
    if let Err(parser_error) = parser_result {
        parser_error.print_error_location(&content);
        return Err(Box::from(format!("parser error {}", parser_error.message)));
    }

    let SceneDescription {
        width,
        height,
        camera,
        scene,
    } = parser_result.unwrap();

    let renderer = Renderer::new(camera);
    // measure time
    let start = Instant::now();
    let buffer = renderer.render(&scene, width, height);
    let total_time = start.elapsed();

    let image = RgbaImage::from_raw(width, height, buffer)
        .ok_or("rendered buffer does not match the image size")?;
    image.save(&args.output)?;

    println!("Rendered {} in {:?}", args.output, total_time);
    Ok(())
}
