//! Shapes - Render every primitive off-screen and save a PNG
//!
//! Run with: cargo run --example shapes [output.png]

use easel::glam::Vec3;
use easel::{
    primitives, shaders, Camera, CullState, ObjectUpdate, PipelineOptions, Renderer,
    RendererSettings, WgpuContext,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let output = std::env::args().nth(1).unwrap_or_else(|| "shapes.png".to_string());
    let (width, height) = (768, 768);

    let ctx = WgpuContext::new_blocking()?;
    let mut renderer = Renderer::new(
        ctx,
        RendererSettings::new()
            .size(width, height)
            .clear_color([0.08, 0.08, 0.1, 1.0]),
    )?;

    let shapes = [
        primitives::rect(120.0, 80.0)?,
        primitives::reg_polygon(60.0, 6)?,
        primitives::cube(90.0)?,
        primitives::cylinder(50.0, 100.0, 32)?,
        primitives::tube(55.0, 35.0, 100.0, 32)?,
        primitives::cone(55.0, 110.0, 32)?,
        primitives::sphere(60.0, 32, 16)?,
        primitives::hemisphere(60.0, 32, 8)?,
        primitives::torus(50.0, 18.0, 32, 16)?,
    ];

    let pipeline = renderer.add_pipeline(
        shaders::BASIC,
        shapes.len() as u32,
        PipelineOptions::default().label("shapes").cull(CullState::Back),
    )?;

    let camera = Camera::perspective(
        Vec3::new(0.0, 0.0, 900.0),
        Vec3::ZERO,
        Vec3::Y,
        45.0,
        1.0,
        2000.0,
    );

    for (i, shape) in shapes.into_iter().enumerate() {
        let (col, row) = ((i % 3) as f32 - 1.0, 1.0 - (i / 3) as f32);
        let object = renderer.add_object(pipeline, shape)?;
        renderer.update_object(
            object,
            ObjectUpdate::new()
                .translate([col * 230.0, row * 230.0, 0.0])
                .rotate([1.0, 0.6, 0.2], 35.0),
            Some(&camera),
        )?;
    }

    renderer.render(&[pipeline], None)?;
    let pixels = renderer.read_pixels(None)?;
    image::save_buffer(&output, &pixels, width, height, image::ColorType::Rgba8)?;
    println!("Wrote {output}");

    renderer.destroy()?;
    Ok(())
}
