use shadecast::raytracing::camera::Camera;
use shadecast::raytracing::core::{Light, Scene, SceneObject};
use shadecast::raytracing::math::{Ray, Vec3};
use shadecast::raytracing::renderer::Renderer;

fn single_sphere_scene() -> Scene {
    let mut scene = Scene::new();
    scene.add_object(SceneObject::sphere(
        Vec3::zero(),
        2.0,
        Vec3::new(0.8, 0.2, 0.2),
    ));
    scene.add_light(Light {
        position: Vec3::new(2.0, 5.0, 2.0),
        intensity: 1.5,
    });
    scene
}

#[test]
fn lit_sphere_is_brighter_than_the_background() {
    let scene = single_sphere_scene();

    let toward_sphere = Ray::new(Vec3::new(0.0, 2.0, 10.0), Vec3::new(0.0, 0.0, -1.0));
    let color = scene.trace(&toward_sphere);
    assert!(color.x >= 0.0 && color.x <= 1.0);
    assert!(color.y >= 0.0 && color.y <= 1.0);
    assert!(color.z >= 0.0 && color.z <= 1.0);
    assert!(color.x > 0.1);

    let into_the_void = Ray::new(Vec3::new(0.0, 2.0, 10.0), Vec3::new(0.0, 1.0, 0.0));
    assert_eq!(scene.trace(&into_the_void), Vec3::new(0.1, 0.1, 0.2));
}

#[test]
fn light_updates_between_passes_are_picked_up() {
    let mut scene = single_sphere_scene();
    let renderer = Renderer::new(Camera::new(Vec3::new(0.0, 0.0, 8.0)));

    let baseline = renderer.render(&scene, 24, 16);

    // dim the light in place and render again
    scene.lights[0].intensity = 0.1;
    let dimmed = renderer.render(&scene, 24, 16);
    assert_ne!(baseline, dimmed);

    // restoring the light restores the exact frame
    scene.lights[0].intensity = 1.5;
    let restored = renderer.render(&scene, 24, 16);
    assert_eq!(baseline, restored);
}

#[test]
fn untouched_scene_renders_byte_identical_frames() {
    let mut scene = single_sphere_scene();
    scene.add_object(SceneObject::plane(
        Vec3::new(0.0, -2.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(0.4, 0.4, 0.4),
    ));
    let renderer = Renderer::new(Camera::new(Vec3::new(0.0, 1.0, 8.0)));

    let first = renderer.render(&scene, 32, 24);
    let second = renderer.render(&scene, 32, 24);
    assert_eq!(first, second);
}
