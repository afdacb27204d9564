use barrow_geom::Vec3;
use barrow_map::{CubeCoord, Map};
use barrow_materials::{MaterialCatalog, MaterialId};
use barrow_render::{
    GridAtlas, IsoCamera, Orientation, RecordingBackend, RenderError, RenderPipeline,
};

fn catalog() -> MaterialCatalog {
    MaterialCatalog::from_toml_str(
        r#"
        [materials]
        stone = [0, 0]
        water = { tile = [1, 0], translucent = true }
        "#,
    )
    .unwrap()
}

fn world_map() -> Map {
    // 2x2x1 cells, edge 2: a 4x4x2 cube volume.
    Map::new(2, 2, 1, 2)
}

fn wide_camera(map: &Map) -> IsoCamera {
    let center = Vec3::new(
        map.cubes_x() as f32 * 0.5,
        map.cubes_y() as f32 * 0.5,
        map.cubes_z() as f32 * 0.5,
    );
    IsoCamera::new(center, Orientation::Northeast, 200.0, 1000.0, 1000.0, 32, 4)
}

#[test]
fn empty_world_is_not_rendered() {
    let mut pipeline = RenderPipeline::new();
    let mut backend = RecordingBackend::new(64);
    let mut map = Map::new(0, 0, 0, 1);
    let cam = wide_camera(&map);
    let atlas = GridAtlas::new(1, 64, 64, 16);
    let cat = catalog();
    let drawn = pipeline
        .render(&mut backend, &mut map, &cam, &atlas, &cat)
        .unwrap();
    assert!(!drawn);
    assert_eq!(backend.executed_triangles(), 0);
}

#[test]
fn lone_cube_draws_twelve_triangles() {
    let mut pipeline = RenderPipeline::new();
    let mut backend = RecordingBackend::new(64);
    let mut map = world_map();
    let cat = catalog();
    barrow_edit::fill(&mut map, CubeCoord::new(1, 1, 0), MaterialId(0), &cat).unwrap();
    let cam = wide_camera(&map);
    let atlas = GridAtlas::new(1, 64, 64, 16);
    assert!(pipeline
        .render(&mut backend, &mut map, &cam, &atlas, &cat)
        .unwrap());
    assert_eq!(pipeline.frame_triangles(), 12);
}

#[test]
fn replay_draws_the_same_triangles_as_rebuild() {
    let mut pipeline = RenderPipeline::new();
    let mut backend = RecordingBackend::new(64);
    let mut map = world_map();
    let cat = catalog();
    for x in 0..4 {
        for y in 0..4 {
            barrow_edit::fill(&mut map, CubeCoord::new(x, y, 0), MaterialId(0), &cat).unwrap();
        }
    }
    let cam = wide_camera(&map);
    let atlas = GridAtlas::new(1, 64, 64, 16);
    pipeline
        .render(&mut backend, &mut map, &cam, &atlas, &cat)
        .unwrap();
    let first_frame = pipeline.frame_triangles();
    let after_rebuild = backend.executed_triangles();
    pipeline
        .render(&mut backend, &mut map, &cam, &atlas, &cat)
        .unwrap();
    assert_eq!(pipeline.frame_triangles(), first_frame);
    assert_eq!(backend.executed_triangles(), after_rebuild * 2);
}

#[test]
fn rotation_replays_without_rebuilding() {
    let mut pipeline = RenderPipeline::new();
    let mut backend = RecordingBackend::new(64);
    let mut map = world_map();
    let cat = catalog();
    barrow_edit::fill(&mut map, CubeCoord::new(0, 0, 0), MaterialId(0), &cat).unwrap();
    let mut cam = wide_camera(&map);
    let atlas = GridAtlas::new(1, 64, 64, 16);
    pipeline
        .render(&mut backend, &mut map, &cam, &atlas, &cat)
        .unwrap();
    let baseline = pipeline.frame_triangles();
    let handles = backend.live_handles();
    cam.rotate_cw();
    pipeline
        .render(&mut backend, &mut map, &cam, &atlas, &cat)
        .unwrap();
    assert_eq!(pipeline.frame_triangles(), baseline);
    assert_eq!(backend.live_handles(), handles);
}

#[test]
fn edits_rebuild_without_leaking_handles() {
    let mut pipeline = RenderPipeline::new();
    // Exactly four handles per cell: any leak exhausts the pool.
    let mut map = world_map();
    let mut backend = RecordingBackend::new(4 * 4);
    let cat = catalog();
    let cam = wide_camera(&map);
    let atlas = GridAtlas::new(1, 64, 64, 16);
    for round in 0..8 {
        let pos = CubeCoord::new(round % 4, (round * 3) % 4, 0);
        barrow_edit::fill(&mut map, pos, MaterialId(0), &cat).unwrap();
        pipeline
            .render(&mut backend, &mut map, &cam, &atlas, &cat)
            .unwrap();
        barrow_edit::dig(&mut map, pos).unwrap();
        pipeline
            .render(&mut backend, &mut map, &cam, &atlas, &cat)
            .unwrap();
    }
    assert_eq!(backend.live_handles(), 4 * 4);
}

#[test]
fn exhausted_handle_pool_is_an_error() {
    let mut pipeline = RenderPipeline::new();
    let mut backend = RecordingBackend::new(3);
    let mut map = world_map();
    let cat = catalog();
    let cam = wide_camera(&map);
    let atlas = GridAtlas::new(1, 64, 64, 16);
    assert_eq!(
        pipeline.render(&mut backend, &mut map, &cam, &atlas, &cat),
        Err(RenderError::ResourceExhausted {
            requested: 4,
            capacity: 3
        })
    );
}

#[test]
fn slice_below_world_draws_nothing() {
    let mut pipeline = RenderPipeline::new();
    let mut backend = RecordingBackend::new(64);
    let mut map = world_map();
    let cat = catalog();
    barrow_edit::fill(&mut map, CubeCoord::new(0, 0, 0), MaterialId(0), &cat).unwrap();
    let mut cam = wide_camera(&map);
    cam.set_look_level(-1);
    let atlas = GridAtlas::new(1, 64, 64, 16);
    let drawn = pipeline
        .render(&mut backend, &mut map, &cam, &atlas, &cat)
        .unwrap();
    assert!(drawn);
    assert_eq!(pipeline.frame_triangles(), 0);
    assert_eq!(backend.executed_triangles(), 0);
}

#[test]
fn cells_outside_the_frustum_are_skipped() {
    let mut pipeline = RenderPipeline::new();
    let mut backend = RecordingBackend::new(64);
    let mut map = world_map();
    let cat = catalog();
    barrow_edit::fill(&mut map, CubeCoord::new(0, 0, 0), MaterialId(0), &cat).unwrap();
    // Narrow frustum aimed far away from the world.
    let cam = IsoCamera::new(
        Vec3::new(10_000.0, 10_000.0, 0.0),
        Orientation::Northeast,
        50.0,
        4.0,
        4.0,
        32,
        4,
    );
    let atlas = GridAtlas::new(1, 64, 64, 16);
    pipeline
        .render(&mut backend, &mut map, &cam, &atlas, &cat)
        .unwrap();
    assert_eq!(pipeline.frame_triangles(), 0);
}

#[test]
fn shading_fades_with_depth_below_the_look_level() {
    let pipeline = RenderPipeline::new();
    let map = world_map();
    let mut cam = wide_camera(&map);
    cam.set_look_level(8);
    cam.set_view_levels(4);
    assert_eq!(pipeline.shading(8, &cam), 1.0);
    assert_eq!(pipeline.shading(7, &cam), 0.75);
    assert_eq!(pipeline.shading(6, &cam), 0.5);
    assert_eq!(pipeline.shading(4, &cam), 0.0);
    assert_eq!(pipeline.shading(0, &cam), 0.0);
    // Above the slice plane nothing is lit.
    assert_eq!(pipeline.shading(9, &cam), 0.0);
}

#[test]
fn slice_window_tracks_the_camera() {
    let pipeline = RenderPipeline::new();
    let map = world_map();
    let mut cam = wide_camera(&map);
    cam.set_look_level(8);
    cam.set_view_levels(4);
    assert!(pipeline.in_slice(8, &cam));
    assert!(pipeline.in_slice(5, &cam));
    // Deeper than the view depth, or above the slice plane.
    assert!(!pipeline.in_slice(4, &cam));
    assert!(!pipeline.in_slice(9, &cam));
}

#[test]
fn disabling_shading_lights_everything_and_dirties_cells() {
    let mut pipeline = RenderPipeline::new();
    let mut backend = RecordingBackend::new(64);
    let mut map = world_map();
    let cat = catalog();
    barrow_edit::fill(&mut map, CubeCoord::new(0, 0, 0), MaterialId(0), &cat).unwrap();
    let cam = wide_camera(&map);
    let atlas = GridAtlas::new(1, 64, 64, 16);
    pipeline
        .render(&mut backend, &mut map, &cam, &atlas, &cat)
        .unwrap();
    assert!(map.cells().all(|c| !c.is_dirty()));
    pipeline.set_shaded_draw(&mut map, false);
    assert!(map.cells().all(|c| c.is_dirty()));
    assert_eq!(pipeline.shading(0, &cam), 1.0);
    // Toggling to the current value changes nothing.
    pipeline
        .render(&mut backend, &mut map, &cam, &atlas, &cat)
        .unwrap();
    pipeline.set_shaded_draw(&mut map, false);
    assert!(map.cells().all(|c| !c.is_dirty()));
}

#[test]
fn window_state_reaches_the_backend() {
    let mut pipeline = RenderPipeline::new();
    let mut backend = RecordingBackend::new(4);
    pipeline.resize(&mut backend, 1280, 720);
    assert_eq!(backend.size(), (1280, 720));
    assert!(pipeline.toggle_fullscreen(&mut backend));
    assert!(backend.is_fullscreen());
    assert!(!pipeline.toggle_fullscreen(&mut backend));
    assert!(!backend.is_fullscreen());
}
