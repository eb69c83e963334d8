//! Spinning - Rotating primitives across several pipelines in a window
//!
//! Run with: cargo run --example spinning
//!
//! Space toggles the sphere, 1/2 switch between orthographic and perspective,
//! Escape quits.

use easel::glam::Vec3;
use easel::window::{self, FrameAction, Key, NamedKey, WindowSettings};
use easel::{
    primitives, shaders, BlendState, Camera, DepthState, Event, ObjectDesc, ObjectHandle,
    ObjectUpdate, PipelineHandle, PipelineOptions, RendererSettings,
};

struct Scene {
    pipelines: Vec<PipelineHandle>,
    tint: PipelineHandle,
    spinning: Vec<(ObjectHandle, Vec3)>,
    sphere: ObjectHandle,
    sphere_visible: bool,
    overlay: ObjectHandle,
    camera: Camera,
}

/// RGBA8 checkerboard.
fn checkerboard(size: u32, cell: u32) -> Vec<u8> {
    (0..size * size)
        .flat_map(|i| {
            let (x, y) = (i % size / cell, i / size / cell);
            if (x + y) % 2 == 0 {
                [240, 240, 240, 255]
            } else {
                [40, 90, 200, 255]
            }
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let settings = WindowSettings::new()
        .title("easel - spinning")
        .size(900, 600)
        .renderer(RendererSettings::new().clear_color([0.05, 0.05, 0.08, 1.0]));

    window::run(
        settings,
        |renderer| {
            let lit = renderer.add_pipeline(shaders::BASIC, 8, PipelineOptions::default().label("lit"))?;

            let texture = renderer.add_texture_rgba(64, 64, &checkerboard(64, 8))?;
            let textured = renderer.add_pipeline(
                shaders::TEXTURED,
                2,
                PipelineOptions::default().label("textured").texture(texture),
            )?;

            let tint = renderer.add_pipeline(
                shaders::TINTED,
                1,
                PipelineOptions::default()
                    .label("tinted")
                    .blend(BlendState::Alpha)
                    .depth(DepthState::ReadOnly)
                    .uniform_size(16),
            )?;

            let mut spinning = Vec::new();
            for (shape, x, axis) in [
                (primitives::cube(100.0)?, -250.0, Vec3::new(1.0, 1.0, 0.0)),
                (primitives::torus(60.0, 20.0, 48, 24)?, 0.0, Vec3::X),
                (primitives::cone(60.0, 120.0, 48)?, 250.0, Vec3::new(0.0, 1.0, 1.0)),
            ] {
                let object = renderer.add_object(lit, shape)?;
                renderer.update_object(object, ObjectUpdate::new().translate([x, 120.0, 0.0]), None)?;
                spinning.push((object, axis));
            }

            let sphere = renderer.add_object(lit, primitives::sphere(70.0, 48, 24)?)?;
            renderer.update_object(sphere, ObjectUpdate::new().translate([0.0, -130.0, 0.0]), None)?;

            for x in [-250.0, 250.0] {
                let panel = renderer.add_object(
                    textured,
                    ObjectDesc::new(primitives::rect(140.0, 140.0)?),
                )?;
                renderer.update_object(panel, ObjectUpdate::new().translate([x, -130.0, 0.0]), None)?;
                spinning.push((panel, Vec3::Y));
            }

            let overlay = renderer.add_object(tint, primitives::rect(800.0, 40.0)?)?;
            renderer.update_object(overlay, ObjectUpdate::new().translate([0.0, -260.0, 100.0]), None)?;
            renderer.write_pipeline_uniform(tint, bytemuck::cast_slice(&[1.0f32, 0.6, 0.1, 0.5]))?;

            Ok(Scene {
                pipelines: vec![lit, textured, tint],
                tint,
                spinning,
                sphere,
                sphere_visible: true,
                overlay,
                camera: Camera::default(),
            })
        },
        |scene, input| {
            for event in &input.events {
                match event {
                    Event::KeyPressed(Key::Named(NamedKey::Escape)) => return Ok(FrameAction::Exit),
                    Event::KeyPressed(Key::Named(NamedKey::Space)) => {
                        scene.sphere_visible = !scene.sphere_visible;
                    }
                    Event::KeyPressed(Key::Character(c)) if c.as_str() == "1" => {
                        scene.camera = Camera::default();
                    }
                    Event::KeyPressed(Key::Character(c)) if c.as_str() == "2" => {
                        scene.camera =
                            Camera::perspective(Vec3::new(0.0, 0.0, 700.0), Vec3::ZERO, Vec3::Y, 60.0, 1.0, 2000.0);
                    }
                    _ => {}
                }
            }

            let angle = input.elapsed_time as f32 * 60.0;
            for &(object, axis) in &scene.spinning {
                input
                    .renderer
                    .update_object(object, ObjectUpdate::new().rotate(axis, angle), Some(&scene.camera))?;
            }
            input.renderer.update_object(
                scene.sphere,
                ObjectUpdate::new().visible(scene.sphere_visible).rotate(Vec3::Y, angle),
                Some(&scene.camera),
            )?;

            input
                .renderer
                .update_object(scene.overlay, ObjectUpdate::new(), Some(&scene.camera))?;

            let pulse = 0.35 + 0.25 * (input.elapsed_time as f32 * 2.0).sin();
            input
                .renderer
                .write_pipeline_uniform(scene.tint, bytemuck::cast_slice(&[1.0f32, 0.6, 0.1, pulse]))?;

            input.renderer.render(&scene.pipelines, None)?;
            Ok(FrameAction::Continue)
        },
    )
}
