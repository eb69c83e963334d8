//! Registry scenarios against a real device.
//!
//! Every test skips when no adapter is available.

use easel::glam::{Mat4, Vec3, Vec4};
use easel::{
    primitives, shaders, DepthState, Error, ObjectDesc, ObjectUpdate, PipelineHandle,
    PipelineOptions, Renderer, RendererSettings, RendererState, Shape, WgpuContext,
};

fn context() -> Option<WgpuContext> {
    match WgpuContext::new_blocking() {
        Ok(ctx) => Some(ctx),
        Err(e) => {
            eprintln!("skipping GPU test: {e}");
            None
        }
    }
}

fn renderer(width: u32, height: u32) -> Option<Renderer> {
    let ctx = context()?;
    let settings = RendererSettings::new().size(width, height);
    Some(Renderer::new(ctx, settings).expect("renderer"))
}

fn pixel(pixels: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * width + x) * 4) as usize;
    [pixels[i], pixels[i + 1], pixels[i + 2], pixels[i + 3]]
}

#[test]
fn test_capacity_is_enforced() {
    let Some(mut renderer) = renderer(64, 64) else {
        return;
    };
    let pipeline = renderer
        .add_pipeline(shaders::BASIC, 2, PipelineOptions::default())
        .unwrap();
    assert_eq!(renderer.state(), RendererState::Ready);

    for _ in 0..2 {
        renderer
            .add_object(pipeline, primitives::rect(10.0, 10.0).unwrap())
            .unwrap();
    }
    let err = renderer
        .add_object(pipeline, primitives::rect(10.0, 10.0).unwrap())
        .unwrap_err();
    assert!(matches!(
        err,
        Error::CapacityExceeded {
            pipeline: 0,
            capacity: 2
        }
    ));
    assert_eq!(renderer.object_count(pipeline).unwrap(), 2);
}

#[test]
fn test_two_objects_keep_distinct_model_matrices() {
    let Some(mut renderer) = renderer(512, 512) else {
        return;
    };
    let pipeline = renderer
        .add_pipeline(shaders::BASIC, 2, PipelineOptions::default())
        .unwrap();
    let left = renderer
        .add_object(pipeline, primitives::sphere(20.0, 16, 8).unwrap())
        .unwrap();
    let right = renderer
        .add_object(pipeline, primitives::sphere(20.0, 16, 8).unwrap())
        .unwrap();

    renderer
        .update_object(left, ObjectUpdate::new().translate([10.0, 0.0, 0.0]), None)
        .unwrap();
    renderer
        .update_object(right, ObjectUpdate::new().translate([-10.0, 0.0, 0.0]), None)
        .unwrap();
    renderer.render(&[pipeline], None).unwrap();

    let a = renderer.object_uniform(left).unwrap().model();
    let b = renderer.object_uniform(right).unwrap().model();
    assert_ne!(left.slot(), right.slot());
    assert_eq!(a.w_axis, Vec4::new(10.0, 0.0, 0.0, 1.0));
    assert_eq!(b.w_axis, Vec4::new(-10.0, 0.0, 0.0, 1.0));
}

#[test]
fn test_uniform_stride_respects_device_alignment() {
    let Some(mut renderer) = renderer(64, 64) else {
        return;
    };
    let pipeline = renderer
        .add_pipeline(shaders::BASIC, 4, PipelineOptions::default())
        .unwrap();
    let stride = renderer.uniform_stride(pipeline).unwrap();
    let alignment = renderer.context().unwrap().uniform_alignment();
    assert!(stride >= 192);
    assert_eq!(stride % alignment, 0);
}

#[test]
fn test_resize_uses_new_canvas_in_next_projection() {
    let Some(mut renderer) = renderer(512, 512) else {
        return;
    };
    let pipeline = renderer
        .add_pipeline(shaders::BASIC, 1, PipelineOptions::default())
        .unwrap();
    let object = renderer
        .add_object(pipeline, primitives::cube(50.0).unwrap())
        .unwrap();

    renderer.resize_canvas(680, 680).unwrap();
    assert_eq!(renderer.canvas_size(), (680, 680));
    assert_eq!(renderer.state(), RendererState::Ready);

    renderer
        .update_object(object, ObjectUpdate::new().translate([340.0, 0.0, 0.0]), None)
        .unwrap();
    renderer.render(&[pipeline], None).unwrap();

    let clip = renderer
        .object_uniform(object)
        .unwrap()
        .mvp()
        .project_point3(Vec3::ZERO);
    assert!((clip.x - 1.0).abs() < 1e-5);
    assert_eq!(renderer.read_pixels(None).unwrap().len(), 680 * 680 * 4);
}

#[test]
fn test_zero_canvas_is_rejected() {
    let Some(mut renderer) = renderer(64, 64) else {
        return;
    };
    assert!(matches!(
        renderer.resize_canvas(0, 64),
        Err(Error::InvalidArgument(_))
    ));
    assert_eq!(renderer.canvas_size(), (64, 64));
}

#[test]
fn test_destroy_disposes_everything() {
    let Some(mut renderer) = renderer(64, 64) else {
        return;
    };
    let pipeline = renderer
        .add_pipeline(shaders::BASIC, 1, PipelineOptions::default())
        .unwrap();
    renderer
        .add_object(pipeline, primitives::cube(10.0).unwrap())
        .unwrap();

    renderer.destroy().unwrap();
    assert_eq!(renderer.state(), RendererState::Destroyed);
    assert!(matches!(renderer.destroy(), Err(Error::Disposed)));
    assert!(matches!(
        renderer.render(&[pipeline], None),
        Err(Error::Disposed)
    ));
    assert!(matches!(
        renderer.add_pipeline(shaders::BASIC, 1, PipelineOptions::default()),
        Err(Error::Disposed)
    ));
    assert!(matches!(renderer.context(), Err(Error::Disposed)));
    assert!(matches!(renderer.read_pixels(None), Err(Error::Disposed)));
    assert_eq!(renderer.canvas_size(), (64, 64));
}

#[test]
fn test_invalid_shader_registers_nothing() {
    let Some(mut renderer) = renderer(64, 64) else {
        return;
    };
    let err = renderer
        .add_pipeline("fn broken( {", 1, PipelineOptions::default().label("broken"))
        .unwrap_err();
    match err {
        Error::Compile { label, .. } => assert_eq!(label, "broken"),
        other => panic!("expected compile error, got {other:?}"),
    }
    assert_eq!(renderer.state(), RendererState::Initialized);

    assert!(matches!(
        renderer.add_pipeline(shaders::BASIC, 0, PipelineOptions::default()),
        Err(Error::InvalidArgument(_))
    ));
}

#[test]
fn test_degenerate_geometry_is_rejected_before_upload() {
    let Some(mut renderer) = renderer(64, 64) else {
        return;
    };
    let pipeline = renderer
        .add_pipeline(shaders::BASIC, 1, PipelineOptions::default())
        .unwrap();

    let two_points = ObjectDesc::from_streams(vec![[0.0; 3], [1.0, 0.0, 0.0]], None, None, None);
    assert!(matches!(
        renderer.add_object(pipeline, two_points),
        Err(Error::InvalidArgument(_))
    ));

    let bad_index = Shape::from_vertices(vec![[0.0; 3]; 3]).with_indices(vec![0, 1, 3]);
    assert!(matches!(
        renderer.add_object(pipeline, bad_index),
        Err(Error::InvalidArgument(_))
    ));
    assert_eq!(renderer.object_count(pipeline).unwrap(), 0);
}

#[test]
fn test_hidden_objects_skip_uniform_writes() {
    let Some(mut renderer) = renderer(64, 64) else {
        return;
    };
    let pipeline = renderer
        .add_pipeline(shaders::BASIC, 1, PipelineOptions::default())
        .unwrap();
    let object = renderer
        .add_object(
            pipeline,
            ObjectDesc::new(primitives::cube(10.0).unwrap()).hidden(),
        )
        .unwrap();
    let initial = renderer.object_uniform(object).unwrap();

    renderer
        .update_object(object, ObjectUpdate::new().translate([5.0, 0.0, 0.0]), None)
        .unwrap();
    assert_eq!(renderer.object_uniform(object).unwrap(), initial);

    renderer
        .update_object(object, ObjectUpdate::new().visible(true), None)
        .unwrap();
    let model = renderer.object_uniform(object).unwrap().model();
    assert_eq!(model, Mat4::from_translation(Vec3::new(5.0, 0.0, 0.0)));
}

#[test]
fn test_zero_rotation_axis_leaves_transform_untouched() {
    let Some(mut renderer) = renderer(64, 64) else {
        return;
    };
    let pipeline = renderer
        .add_pipeline(shaders::BASIC, 1, PipelineOptions::default())
        .unwrap();
    let object = renderer
        .add_object(pipeline, primitives::cube(10.0).unwrap())
        .unwrap();
    let before = renderer.object_uniform(object).unwrap();

    assert!(matches!(
        renderer.update_object(object, ObjectUpdate::new().rotate([0.0, 0.0, 0.0], 45.0), None),
        Err(Error::InvalidArgument(_))
    ));
    assert_eq!(renderer.object_uniform(object).unwrap(), before);
}

#[test]
fn test_removed_slot_is_reused() {
    let Some(mut renderer) = renderer(64, 64) else {
        return;
    };
    let pipeline = renderer
        .add_pipeline(shaders::BASIC, 1, PipelineOptions::default())
        .unwrap();
    let first = renderer
        .add_object(pipeline, primitives::cube(10.0).unwrap())
        .unwrap();
    renderer.remove_object(first).unwrap();

    let second = renderer
        .add_object(pipeline, primitives::cube(10.0).unwrap())
        .unwrap();
    assert_eq!(first.slot(), second.slot());
    assert!(matches!(
        renderer.object_uniform(first),
        Err(Error::NotFound(_))
    ));
    assert!(renderer.object_uniform(second).is_ok());
}

#[test]
fn test_clear_and_tinted_draw_reach_the_canvas() {
    let Some(mut renderer) = renderer(64, 64) else {
        return;
    };
    renderer.set_clear_color([1.0, 0.0, 0.0, 1.0]).unwrap();

    let pipeline = renderer
        .add_pipeline(
            shaders::TINTED,
            1,
            PipelineOptions::default().uniform_size(16),
        )
        .unwrap();
    renderer
        .write_pipeline_uniform(pipeline, bytemuck::cast_slice(&[0.0f32, 1.0, 0.0, 1.0]))
        .unwrap();
    renderer
        .add_object(pipeline, primitives::rect(32.0, 32.0).unwrap())
        .unwrap();
    renderer.render(&[pipeline], None).unwrap();

    let pixels = renderer.read_pixels(None).unwrap();
    assert_eq!(pixel(&pixels, 64, 2, 2), [255, 0, 0, 255]);
    assert_eq!(pixel(&pixels, 64, 32, 32), [0, 255, 0, 255]);
}

#[test]
fn test_pipeline_uniform_size_is_checked() {
    let Some(mut renderer) = renderer(64, 64) else {
        return;
    };
    let tinted = renderer
        .add_pipeline(shaders::TINTED, 1, PipelineOptions::default().uniform_size(16))
        .unwrap();
    let basic = renderer
        .add_pipeline(shaders::BASIC, 1, PipelineOptions::default())
        .unwrap();

    assert!(matches!(
        renderer.write_pipeline_uniform(tinted, &[0u8; 8]),
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        renderer.write_pipeline_uniform(basic, &[0u8; 16]),
        Err(Error::InvalidArgument(_))
    ));
}

#[test]
fn test_resized_texture_handle_goes_stale() {
    let Some(mut renderer) = renderer(64, 64) else {
        return;
    };
    let texture = renderer.add_texture_rgba(2, 2, &[255; 16]).unwrap();
    let pipeline = renderer
        .add_pipeline(
            shaders::TEXTURED,
            1,
            PipelineOptions::default().texture(texture),
        )
        .unwrap();
    renderer
        .add_object(pipeline, primitives::rect(32.0, 32.0).unwrap())
        .unwrap();

    let resized = renderer.resize_texture(texture, 4, 4).unwrap();
    assert_ne!(resized, texture);
    assert!(matches!(
        renderer.write_texture(texture, &[0; 64]),
        Err(Error::NotFound(_))
    ));
    renderer.write_texture(resized, &[255; 64]).unwrap();
    renderer.render(&[pipeline], None).unwrap();

    let pixels = renderer.read_pixels(None).unwrap();
    assert_eq!(pixel(&pixels, 64, 32, 32), [255, 255, 255, 255]);
}

#[test]
fn test_render_target_must_match_canvas() {
    let Some(mut renderer) = renderer(64, 64) else {
        return;
    };
    let pipeline = renderer
        .add_pipeline(shaders::BASIC, 1, PipelineOptions::default())
        .unwrap();
    let small = renderer.add_texture(32, 32).unwrap();
    assert!(matches!(
        renderer.render(&[pipeline], Some(small)),
        Err(Error::InvalidArgument(_))
    ));

    let target = renderer.add_texture(64, 64).unwrap();
    renderer.set_clear_color([0.0, 0.0, 1.0, 1.0]).unwrap();
    renderer.render(&[pipeline], Some(target)).unwrap();
    let pixels = renderer.read_pixels(Some(target)).unwrap();
    assert_eq!(pixel(&pixels, 64, 0, 0), [0, 0, 255, 255]);
}

#[test]
fn test_texture_uploads_read_back_unchanged() {
    let Some(mut renderer) = renderer(64, 64) else {
        return;
    };
    let pixels: Vec<u8> = (0..3 * 2 * 4).map(|i| (i * 10) as u8).collect();
    let image = image::RgbaImage::from_raw(3, 2, pixels.clone()).unwrap();

    let mut png = Vec::new();
    image
        .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
        .unwrap();
    let decoded = renderer.load_texture_bytes(&png).unwrap();
    assert_eq!(renderer.read_pixels(Some(decoded)).unwrap(), pixels);

    let from_image = renderer
        .add_texture_image(&image::DynamicImage::ImageRgba8(image))
        .unwrap();
    assert_eq!(renderer.read_pixels(Some(from_image)).unwrap(), pixels);

    assert!(matches!(
        renderer.write_texture(from_image, &pixels[..8]),
        Err(Error::InvalidArgument(_))
    ));
    renderer.write_texture(from_image, &[7; 24]).unwrap();
    assert_eq!(renderer.read_pixels(Some(from_image)).unwrap(), vec![7; 24]);
}

#[test]
fn test_wide_color_formats_are_rejected() {
    let Some(ctx) = context() else {
        return;
    };
    let settings = RendererSettings::new()
        .size(64, 64)
        .sample_count(1)
        .color_format(wgpu::TextureFormat::Rgba16Float);
    assert!(matches!(
        Renderer::new(ctx, settings),
        Err(Error::InvalidArgument(_))
    ));

    let Some(ctx) = context() else {
        return;
    };
    let settings = RendererSettings::new()
        .size(64, 64)
        .sample_count(1)
        .color_format(wgpu::TextureFormat::Bgra8Unorm);
    let mut renderer = Renderer::new(ctx, settings).unwrap();
    let texture = renderer.add_texture_rgba(2, 2, &[255; 16]).unwrap();
    assert_eq!(renderer.read_pixels(Some(texture)).unwrap(), vec![255; 16]);
}

fn tinted_pipeline(renderer: &mut Renderer, color: [f32; 4]) -> PipelineHandle {
    let pipeline = renderer
        .add_pipeline(
            shaders::TINTED,
            2,
            PipelineOptions::default()
                .uniform_size(16)
                .depth(DepthState::Disabled),
        )
        .unwrap();
    renderer
        .write_pipeline_uniform(pipeline, bytemuck::cast_slice(&color))
        .unwrap();
    pipeline
}

#[test]
fn test_objects_draw_in_insertion_order_and_hidden_ones_are_skipped() {
    let Some(mut renderer) = renderer(64, 64) else {
        return;
    };
    let pipeline = renderer
        .add_pipeline(
            shaders::BASIC,
            2,
            PipelineOptions::default().depth(DepthState::Disabled),
        )
        .unwrap();

    // Zero normals shade with the flat base color, +Z normals are lit.
    let lit_rect = primitives::rect(32.0, 32.0).unwrap();
    let flat_rect = Shape::from_vertices(lit_rect.vertices.clone());
    let flat = renderer.add_object(pipeline, flat_rect).unwrap();
    let lit = renderer.add_object(pipeline, lit_rect).unwrap();

    renderer.render(&[pipeline], None).unwrap();
    let both = pixel(&renderer.read_pixels(None).unwrap(), 64, 32, 32);

    renderer
        .update_object(lit, ObjectUpdate::new().visible(false), None)
        .unwrap();
    renderer.render(&[pipeline], None).unwrap();
    let flat_only = pixel(&renderer.read_pixels(None).unwrap(), 64, 32, 32);
    assert_ne!(both, flat_only);

    renderer
        .update_object(lit, ObjectUpdate::new().visible(true), None)
        .unwrap();
    renderer
        .update_object(flat, ObjectUpdate::new().visible(false), None)
        .unwrap();
    renderer.render(&[pipeline], None).unwrap();
    let lit_only = pixel(&renderer.read_pixels(None).unwrap(), 64, 32, 32);
    assert_eq!(both, lit_only);

    renderer
        .update_object(lit, ObjectUpdate::new().visible(false), None)
        .unwrap();
    renderer.render(&[pipeline], None).unwrap();
    let pixels = renderer.read_pixels(None).unwrap();
    assert_eq!(pixel(&pixels, 64, 32, 32), [0, 0, 0, 255]);
}

#[test]
fn test_pipelines_draw_in_the_order_given() {
    let Some(mut renderer) = renderer(64, 64) else {
        return;
    };
    let red = tinted_pipeline(&mut renderer, [1.0, 0.0, 0.0, 1.0]);
    let green = tinted_pipeline(&mut renderer, [0.0, 1.0, 0.0, 1.0]);
    for pipeline in [red, green] {
        renderer
            .add_object(pipeline, primitives::rect(32.0, 32.0).unwrap())
            .unwrap();
    }

    renderer.render(&[red, green], None).unwrap();
    let pixels = renderer.read_pixels(None).unwrap();
    assert_eq!(pixel(&pixels, 64, 32, 32), [0, 255, 0, 255]);

    renderer.render(&[green, red], None).unwrap();
    let pixels = renderer.read_pixels(None).unwrap();
    assert_eq!(pixel(&pixels, 64, 32, 32), [255, 0, 0, 255]);

    renderer.render(&[red], None).unwrap();
    let pixels = renderer.read_pixels(None).unwrap();
    assert_eq!(pixel(&pixels, 64, 32, 32), [255, 0, 0, 255]);
}

#[test]
fn test_instance_count_controls_indexed_draws() {
    let Some(mut renderer) = renderer(64, 64) else {
        return;
    };
    let pipeline = tinted_pipeline(&mut renderer, [0.0, 0.0, 1.0, 1.0]);
    let quad = Shape::from_vertices(vec![
        [-16.0, -16.0, 0.0],
        [16.0, -16.0, 0.0],
        [16.0, 16.0, 0.0],
        [-16.0, 16.0, 0.0],
    ])
    .with_indices(vec![0, 1, 2, 0, 2, 3]);
    let object = renderer
        .add_object(pipeline, ObjectDesc::new(quad).instances(0))
        .unwrap();

    renderer.render(&[pipeline], None).unwrap();
    let pixels = renderer.read_pixels(None).unwrap();
    assert_eq!(pixel(&pixels, 64, 32, 32), [0, 0, 0, 255]);

    renderer
        .update_object(object, ObjectUpdate::new().instances(2), None)
        .unwrap();
    renderer.render(&[pipeline], None).unwrap();
    let pixels = renderer.read_pixels(None).unwrap();
    assert_eq!(pixel(&pixels, 64, 32, 32), [0, 0, 255, 255]);
    assert_eq!(pixel(&pixels, 64, 2, 2), [0, 0, 0, 255]);
}

#[test]
fn test_triangle_pipelines_need_whole_triangles() {
    let Some(mut renderer) = renderer(64, 64) else {
        return;
    };
    let triangles = renderer
        .add_pipeline(shaders::BASIC, 2, PipelineOptions::default())
        .unwrap();
    let four = Shape::from_vertices(vec![[0.0; 3]; 4]);
    assert!(matches!(
        renderer.add_object(triangles, four.clone()),
        Err(Error::InvalidArgument(_))
    ));
    let two_indices = Shape::from_vertices(vec![[0.0; 3]; 3]).with_indices(vec![0, 1]);
    assert!(matches!(
        renderer.add_object(triangles, two_indices),
        Err(Error::InvalidArgument(_))
    ));
    assert_eq!(renderer.object_count(triangles).unwrap(), 0);

    let lines = renderer
        .add_pipeline(
            shaders::BASIC,
            1,
            PipelineOptions::default().topology(wgpu::PrimitiveTopology::LineList),
        )
        .unwrap();
    renderer.add_object(lines, four).unwrap();
}
