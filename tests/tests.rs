use std::collections::HashMap;

use orrery_rs::prelude::*;
use orrery_rs::gfx::MeshId;
use orrery_rs::gfx::null;
use orrery_rs::camera;

use maths_rs::prelude::*;

fn rows(m: &Mat4f) -> [[f32; 4]; 4] {
    let mut out = [[0.0; 4]; 4];
    for (r, row) in out.iter_mut().enumerate() {
        let v = m.get_row(r as u32);
        *row = [v.x, v.y, v.z, v.w];
    }
    out
}

fn assert_mat_approx(a: &Mat4f, b: &Mat4f, eps: f32) {
    let (ra, rb) = (rows(a), rows(b));
    for r in 0..4 {
        for c in 0..4 {
            assert!(
                (ra[r][c] - rb[r][c]).abs() <= eps,
                "mismatch at [{}][{}]: {} != {}\n{:?}\n{:?}", r, c, ra[r][c], rb[r][c], ra, rb
            );
        }
    }
}

fn assert_mat_bits(a: &Mat4f, b: &Mat4f) {
    let (ra, rb) = (rows(a), rows(b));
    for r in 0..4 {
        for c in 0..4 {
            assert_eq!(ra[r][c].to_bits(), rb[r][c].to_bits());
        }
    }
}

fn mat_from_rows(r: [[f32; 4]; 4]) -> Mat4f {
    Mat4f::from((
        Vec4f::new(r[0][0], r[0][1], r[0][2], r[0][3]),
        Vec4f::new(r[1][0], r[1][1], r[1][2], r[1][3]),
        Vec4f::new(r[2][0], r[2][1], r[2][2], r[2][3]),
        Vec4f::new(r[3][0], r[3][1], r[3][2], r[3][3])
    ))
}

fn test_meshes() -> HashMap<String, (MeshId, u32)> {
    let mut meshes = HashMap::new();
    meshes.insert("cube".to_string(), (MeshId(0), 36));
    meshes.insert("pyramid".to_string(), (MeshId(1), 18));
    meshes
}

fn test_camera() -> CameraConstants {
    CameraInfo::default().constants(640.0 / 480.0)
}

fn default_animator() -> SceneAnimator {
    let scene = Scene::create(&SceneInfo::default(), &test_meshes()).unwrap();
    SceneAnimator::create(scene, test_camera())
}

/// Sun spinning in place with a planet parented to it
fn sun_and_planet() -> SceneAnimator {
    let mut scene = Scene::new();
    let sun = scene.add_node(Node {
        name: "Sun".to_string(),
        parent: None,
        mesh: MeshId(0),
        index_count: 36,
        local_transform: LocalTransform(vec![
            TransformOp::rotate_y(1.0),
            TransformOp::uniform_scale(1.4)
        ])
    }).unwrap();
    scene.add_node(Node {
        name: "Planet1".to_string(),
        parent: Some(sun),
        mesh: MeshId(0),
        index_count: 36,
        local_transform: LocalTransform(vec![
            TransformOp::translate(5.0, 0.0, 0.0),
            TransformOp::rotate_y(1.0),
            TransformOp::uniform_scale(1.1)
        ])
    }).unwrap();
    SceneAnimator::create(scene, test_camera())
}

#[test]
fn roots_use_local_transform() {
    let mut animator = default_animator();
    for t in [0.0, 0.5, 3.25, 100.0] {
        let draw_list = animator.tick(t, false);
        for (i, node) in animator.scene().nodes().iter().enumerate() {
            if node.parent.is_none() {
                assert_mat_bits(&draw_list[i].world_matrix, &node.local_transform.evaluate(t));
            }
        }
    }
}

#[test]
fn children_compose_with_parent_world() {
    let mut animator = default_animator();
    for t in [0.0, 1.0, 7.5] {
        let draw_list = animator.tick(t, false);
        for (i, node) in animator.scene().nodes().iter().enumerate() {
            if let Some(parent) = node.parent {
                assert!(parent < i);
                let expected = draw_list[parent].world_matrix * node.local_transform.evaluate(t);
                assert_mat_approx(&draw_list[i].world_matrix, &expected, 1e-5);
            }
        }
    }
}

#[test]
fn draw_list_matches_scene_order() {
    let mut animator = default_animator();
    let nodes = animator.scene().nodes().to_vec();
    for frame in 0..4 {
        let draw_list = animator.tick(frame as f32 * 0.25, false);
        assert_eq!(draw_list.len(), nodes.len());
        for (draw, node) in draw_list.iter().zip(&nodes) {
            assert_eq!(draw.mesh, node.mesh);
            assert_eq!(draw.index_count, node.index_count);
        }
    }
}

#[test]
fn tick_is_idempotent_for_equal_time() {
    let mut animator = default_animator();
    let a = animator.tick(2.5, false);
    let b = animator.tick(2.5, false);
    assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(&b) {
        assert_mat_bits(&x.world_matrix, &y.world_matrix);
    }
}

#[test]
fn toggle_flips_raster_mode() {
    let mut animator = default_animator();
    assert_eq!(animator.frame_state().raster_mode, RasterMode::Solid);

    for n in 1..=5 {
        animator.tick(n as f32, true);
        let expected = if n % 2 == 1 { RasterMode::Wireframe } else { RasterMode::Solid };
        assert_eq!(animator.frame_state().raster_mode, expected);
    }

    // no toggle, no change
    animator.tick(6.0, false);
    assert_eq!(animator.frame_state().raster_mode, RasterMode::Wireframe);
}

#[test]
fn sun_and_planet_at_zero() {
    let mut animator = sun_and_planet();
    let draw_list = animator.tick(0.0, false);

    let sun = mat_from_rows([
        [1.4, 0.0, 0.0, 0.0],
        [0.0, 1.4, 0.0, 0.0],
        [0.0, 0.0, 1.4, 0.0],
        [0.0, 0.0, 0.0, 1.0]
    ]);
    assert_mat_approx(&draw_list[0].world_matrix, &sun, 1e-5);

    // sun scale carries into the planet, translate 5 * 1.4
    let planet = mat_from_rows([
        [1.54, 0.0, 0.0, 7.0],
        [0.0, 1.54, 0.0, 0.0],
        [0.0, 0.0, 1.54, 0.0],
        [0.0, 0.0, 0.0, 1.0]
    ]);
    assert_mat_approx(&draw_list[1].world_matrix, &planet, 1e-5);

    let composed = Mat4f::from_scale(splat3f(1.4))
        * Mat4f::from_translation(vec3f(5.0, 0.0, 0.0))
        * Mat4f::from_scale(splat3f(1.1));
    assert_mat_approx(&draw_list[1].world_matrix, &composed, 1e-5);
}

#[test]
fn sun_and_planet_at_pi() {
    let mut animator = sun_and_planet();
    let draw_list = animator.tick(std::f32::consts::PI, false);

    // half a turn about y negates x and z
    let sun = mat_from_rows([
        [-1.4, 0.0, 0.0, 0.0],
        [0.0, 1.4, 0.0, 0.0],
        [0.0, 0.0, -1.4, 0.0],
        [0.0, 0.0, 0.0, 1.0]
    ]);
    assert_mat_approx(&draw_list[0].world_matrix, &sun, 1e-5);

    // planet sits on the opposite side, its own half turn cancels the sun's
    let planet = mat_from_rows([
        [1.54, 0.0, 0.0, -7.0],
        [0.0, 1.54, 0.0, 0.0],
        [0.0, 0.0, 1.54, 0.0],
        [0.0, 0.0, 0.0, 1.0]
    ]);
    assert_mat_approx(&draw_list[1].world_matrix, &planet, 1e-5);
}

#[test]
fn camera_view_matrix() {
    let view = camera::create_look_at_lh(vec3f(2.0, 8.0, 2.0), vec3f(0.0, 1.0, 0.0), vec3f(0.0, 1.0, 0.0));
    let s57 = f32::sqrt(57.0);
    let s2 = f32::sqrt(2.0);
    let s114 = f32::sqrt(114.0);
    let expected = mat_from_rows([
        [-1.0 / s2, 0.0, 1.0 / s2, 0.0],
        [-7.0 / s114, 4.0 / s114, -7.0 / s114, -4.0 / s114],
        [-2.0 / s57, -7.0 / s57, -2.0 / s57, 64.0 / s57],
        [0.0, 0.0, 0.0, 1.0]
    ]);
    assert_mat_approx(&view, &expected, 1e-5);

    // target lands on +z at the eye distance
    let at = view * vec4f(0.0, 1.0, 0.0, 1.0);
    assert!(at.x.abs() < 1e-5 && at.y.abs() < 1e-5);
    assert!((at.z - s57).abs() < 1e-4);
}

#[test]
fn camera_projection_matrix() {
    let proj = camera::create_perspective_fov_lh(f32::deg_to_rad(90.0), 640.0 / 480.0, 0.01, 100.0);
    let range = 100.0 / (100.0 - 0.01);
    let expected = mat_from_rows([
        [0.75, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, range, -range * 0.01],
        [0.0, 0.0, 1.0, 0.0]
    ]);
    assert_mat_approx(&proj, &expected, 1e-5);

    // near maps to depth 0, far to depth 1
    let near = proj * vec4f(0.0, 0.0, 0.01, 1.0);
    let far = proj * vec4f(0.0, 0.0, 100.0, 1.0);
    assert!((near.z / near.w).abs() < 1e-4);
    assert!((far.z / far.w - 1.0).abs() < 1e-4);
}

#[test]
fn camera_constants_from_info() {
    let constants = test_camera();
    let expected = constants.projection_matrix * constants.view_matrix;
    assert_mat_approx(&constants.view_projection_matrix, &expected, 1e-6);
    assert_eq!(constants.view_position.x, 2.0);
    assert_eq!(constants.view_position.y, 8.0);
}

#[test]
fn submit_drives_device_in_order() -> Result<(), orrery_rs::Error> {
    let mut device = null::Device::create();
    let cube = device.create_mesh("cube", &primitives::create_cube_mesh())?;
    let pyramid = device.create_mesh("pyramid", &primitives::create_pyramid_mesh())?;
    let mut meshes = HashMap::new();
    meshes.insert("cube".to_string(), (cube, 36));
    meshes.insert("pyramid".to_string(), (pyramid, 18));

    let scene = Scene::create(&SceneInfo::default(), &meshes)?;
    let mut animator = SceneAnimator::create(scene, test_camera());
    let draw_list = animator.tick(1.0, true);
    animator.submit(&draw_list, &mut device, gfx::ClearColour::from((0.15, 0.0, 0.3, 1.0)), &gfx::LightInfo::default())?;

    let frame = device.last_frame();
    assert_eq!(frame.len(), 3 + draw_list.len() * 3 + 1);

    match &frame[0] {
        null::Command::BeginFrame { clear_flags, raster, time, .. } => {
            assert!(clear_flags.contains(gfx::ClearFlags::COLOUR | gfx::ClearFlags::DEPTH | gfx::ClearFlags::STENCIL));
            assert_eq!(raster.fill_mode, gfx::FillMode::Wireframe);
            assert_eq!(*time, 1.0);
        }
        other => panic!("expected BeginFrame, got {:?}", other)
    }
    assert!(matches!(frame[1], null::Command::SetCamera(_)));
    match &frame[2] {
        null::Command::SetLights(lights) => assert_eq!(lights.specular_power, gfx::LightInfo::default().specular_power),
        other => panic!("expected SetLights, got {:?}", other)
    }

    for (i, draw) in draw_list.iter().enumerate() {
        let base = 3 + i * 3;
        assert!(matches!(frame[base], null::Command::BindMesh(id) if id == draw.mesh));
        match &frame[base + 1] {
            null::Command::SetWorldTransform(m) => assert_mat_bits(m, &draw.world_matrix),
            other => panic!("expected SetWorldTransform, got {:?}", other)
        }
        match &frame[base + 2] {
            null::Command::DrawIndexed { mesh, index_count, constant_buffer_size } => {
                assert_eq!(*mesh, draw.mesh);
                assert_eq!(*index_count, draw.index_count);
                assert_eq!(*constant_buffer_size, std::mem::size_of::<gfx::DrawConstants>());
            }
            other => panic!("expected DrawIndexed, got {:?}", other)
        }
    }
    assert!(matches!(frame.last(), Some(null::Command::EndFrame)));
    assert_eq!(device.frames_presented(), 1);
    assert_eq!(device.mesh_name(pyramid), Some("pyramid"));
    Ok(())
}
