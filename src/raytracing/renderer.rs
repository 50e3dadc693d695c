use rayon::prelude::*;

use super::camera::Camera;
use super::core::Scene;

/// Walks every pixel of the output surface, shoots one primary ray per
/// pixel and packs the traced colors into an RGBA byte buffer.
pub struct Renderer {
    pub camera: Camera,
}

impl Renderer {
    pub fn new(camera: Camera) -> Self {
        Self { camera }
    }

    /// Render the scene into a row-major RGBA buffer, 4 bytes per pixel,
    /// alpha always 255. Every pixel is a pure function of the scene, so
    /// rows are rendered in parallel without changing a single byte of the
    /// result.
    pub fn render(&self, scene: &Scene, width: u32, height: u32) -> Vec<u8> {
        let mut buffer = vec![0u8; (width * height * 4) as usize];
        let row_size = (width * 4) as usize;
        let rows: Vec<(usize, &mut [u8])> = buffer.chunks_mut(row_size).enumerate().collect();
        rows.into_par_iter().for_each(|(y, row)| {
            for x in 0..width as usize {
                // screen coordinates in [-1, 1], with image row 0 at the top
                let screen_x = (x as f64 / width as f64) * 2.0 - 1.0;
                let screen_y = -(y as f64 / height as f64) * 2.0 + 1.0;

                let ray = self.camera.shoot_to(screen_x, screen_y);
                let color = scene.trace(&ray);

                row[x * 4] = (color.x * 255.0).floor() as u8;
                row[x * 4 + 1] = (color.y * 255.0).floor() as u8;
                row[x * 4 + 2] = (color.z * 255.0).floor() as u8;
                row[x * 4 + 3] = 255;
            }
        });
        buffer
    }
}
