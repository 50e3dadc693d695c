use super::math::{Ray, Vec3};

/// Fixed viewpoint the primary rays start from. The view direction is not
/// configurable: the screen spans [-1, 1] on a plane one unit toward -z.
#[derive(Debug)]
pub struct Camera {
    pub position: Vec3,
}

impl Camera {
    pub fn new(position: Vec3) -> Self {
        Self { position }
    }

    /// Creates a new camera sitting at the origin.
    pub fn default() -> Self {
        Self::new(Vec3::zero())
    }

    /// Create a ray from the camera position through the given screen
    /// coordinate, with x and y in [-1, 1].
    pub fn shoot_to(&self, x: f64, y: f64) -> Ray {
        Ray::new(self.position, Vec3::new(x, y, -1.0))
    }
}
