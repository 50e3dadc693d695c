use std::vec::Vec;

use super::math::{Ray, Vec3};

/// Tolerance under which an intersection counts as the ray's own origin
/// (shadow acne); also the bias applied to shadow ray origins.
pub const EPSILON: f64 = 1e-3;

/// Flat minimum brightness added for every light, shadowed or not.
const AMBIENT_STRENGTH: f64 = 0.2;

/// Bounce limit of `Scene::trace`. The single-bounce shading below never
/// re-enters trace, the guard is kept as the seam for reflective rays.
pub const MAX_TRACE_DEPTH: u32 = 3;

pub trait RayIntersectable {
    /// Distance along the ray of the closest valid hit, beyond EPSILON.
    fn intersect(&self, ray: &Ray) -> Option<f64>;
    /// Unit surface normal at a point on the solid's surface.
    fn normal_at(&self, point: Vec3) -> Vec3;
}

#[derive(Debug, Clone, Copy)]
pub enum Solid {
    Sphere { center: Vec3, radius: f64 },
    Plane { point: Vec3, normal: Vec3 },
}

impl RayIntersectable for Solid {
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        match self {
            Solid::Sphere { center, radius } => {
                let oc = ray.origin - *center;
                let a = ray.direction.dot(ray.direction);
                let b = 2.0 * oc.dot(ray.direction);
                let c = oc.dot(oc) - radius * radius;
                let discriminant = b * b - 4.0 * a * c;

                if discriminant < 0.0 {
                    return None;
                }

                // prefer the near root, fall back to the far one when the
                // near root is behind the origin (ray starting inside)
                let root = discriminant.sqrt();
                let near = (-b - root) / (2.0 * a);
                if near > EPSILON {
                    return Some(near);
                }
                let far = (-b + root) / (2.0 * a);
                if far > EPSILON {
                    return Some(far);
                }
                None
            }
            Solid::Plane { point, normal } => {
                let denom = normal.dot(ray.direction);
                // a ray grazing the plane never meets it
                if denom.abs() <= EPSILON {
                    return None;
                }
                let t = (*point - ray.origin).dot(*normal) / denom;
                if t >= EPSILON {
                    Some(t)
                } else {
                    None
                }
            }
        }
    }

    fn normal_at(&self, point: Vec3) -> Vec3 {
        match self {
            Solid::Sphere { center, .. } => (point - *center).normalize(),
            // planes are infinite and keep one fixed normal everywhere
            Solid::Plane { normal, .. } => *normal,
        }
    }
}

#[derive(Debug)]
pub struct SceneObject {
    pub solid: Solid,
    pub color: Vec3,
}

impl SceneObject {
    pub fn sphere(center: Vec3, radius: f64, color: Vec3) -> SceneObject {
        SceneObject {
            solid: Solid::Sphere { center, radius },
            color,
        }
    }

    pub fn plane(point: Vec3, normal: Vec3, color: Vec3) -> SceneObject {
        SceneObject {
            solid: Solid::Plane {
                point,
                normal: normal.normalize(),
            },
            color,
        }
    }
}

/// Point light. Position and intensity are plain fields so the owner can
/// move or dim a specific light between render passes.
#[derive(Debug)]
pub struct Light {
    pub position: Vec3,
    pub intensity: f64,
}

pub struct RaycastResult<'a> {
    pub object: &'a SceneObject,
    pub hit_point: Vec3,
    pub normal: Vec3,
}

#[derive(Debug)]
pub struct Scene {
    pub objects: Vec<SceneObject>,
    pub lights: Vec<Light>,
    pub background: Vec3,
}

impl Scene {
    pub fn new() -> Scene {
        Scene {
            objects: Vec::new(),
            lights: Vec::new(),
            background: Vec3::new(0.1, 0.1, 0.2),
        }
    }

    pub fn add_object(&mut self, object: SceneObject) {
        self.objects.push(object);
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Closest object the ray meets, in list order: when two objects sit at
    /// exactly the same distance the one added first wins.
    pub fn hit(&self, ray: &Ray) -> Option<RaycastResult<'_>> {
        let mut closest_t = f64::INFINITY;
        let mut closest_object = None;
        for object in &self.objects {
            if let Some(t) = object.solid.intersect(ray) {
                if t < closest_t {
                    closest_t = t;
                    closest_object = Some(object);
                }
            }
        }

        closest_object.map(|object| {
            let hit_point = ray.at(closest_t);
            RaycastResult {
                object,
                hit_point,
                normal: object.solid.normal_at(hit_point),
            }
        })
    }

    /// Resolve the color seen along the ray: diffuse plus ambient for every
    /// light, with hard shadows.
    pub fn trace(&self, ray: &Ray) -> Vec3 {
        self.trace_at_depth(ray, 0, MAX_TRACE_DEPTH)
    }

    pub fn trace_at_depth(&self, ray: &Ray, depth: u32, max_depth: u32) -> Vec3 {
        if depth >= max_depth {
            return self.background;
        }

        let result = match self.hit(ray) {
            Some(result) => result,
            None => return self.background,
        };

        let mut color = Vec3::zero();
        for light in &self.lights {
            let light_direction = (light.position - result.hit_point).normalize();
            let light_distance = result.hit_point.distance(light.position);
            // offset the origin along the normal to avoid shadow acne
            let shadow_ray = Ray::new(
                result.hit_point + result.normal * EPSILON,
                light_direction,
            );

            // check if some object occludes the light
            let mut occluded = false;
            for object in &self.objects {
                if let Some(t) = object.solid.intersect(&shadow_ray) {
                    if t < light_distance {
                        occluded = true;
                        break;
                    }
                    // an object behind the light does not occlude it
                }
            }

            if !occluded {
                let diffuse = result.normal.dot(light_direction).max(0.0);
                color += result.object.color * diffuse * light.intensity;
            }
            color += result.object.color * AMBIENT_STRENGTH;
        }

        color.x = color.x.clamp(0.0, 1.0);
        color.y = color.y.clamp(0.0, 1.0);
        color.z = color.z.clamp(0.0, 1.0);
        color
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
