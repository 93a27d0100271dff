//! Integration tests for the session pipeline
//!
//! These tests drive a [`GasketSession`] the way the application does:
//! 1. Control events regenerate and upload geometry
//! 2. Starting a run schedules frames through a `FrameQueue`
//! 3. Each fired frame writes a transform until the run finishes
//! 4. Cancellation stops the frame chain

use gasket_core::geometry::{BASE_COLORS, SLOT_TEX_COORDS};
use gasket_core::sequencer::static_model_view;
use gasket_core::{
    default_projection, Configuration, ControlEvent, FrameEvent, FrameQueue, GasketSession,
    Limits, Mat4, Phase, TextureId, Tetrahedron, UniformWriter, Uploader, Vec4,
};
use gasket_math::mat4;

/// Records everything the session pushes to the graphics layer
#[derive(Default)]
struct MockGpu {
    points: Vec<Vec4>,
    colors: Vec<[f32; 4]>,
    tex_coords: Vec<[f32; 2]>,
    uploads: usize,
    texture: Option<TextureId>,
    transform: Option<Mat4>,
    transform_writes: usize,
    projection: Option<Mat4>,
}

impl Uploader for MockGpu {
    fn set_vertex_stream(&mut self, points: &[Vec4], colors: &[[f32; 4]], tex_coords: &[[f32; 2]]) {
        self.points = points.to_vec();
        self.colors = colors.to_vec();
        self.tex_coords = tex_coords.to_vec();
        self.uploads += 1;
    }

    fn set_texture(&mut self, texture: TextureId) {
        self.texture = Some(texture);
    }
}

impl UniformWriter for MockGpu {
    fn set_transform(&mut self, matrix: Mat4) {
        self.transform = Some(matrix);
        self.transform_writes += 1;
    }

    fn set_projection(&mut self, matrix: Mat4) {
        self.projection = Some(matrix);
    }
}

fn new_session(depth: i64, cycles: i64, texture: i64) -> (GasketSession, MockGpu, FrameQueue) {
    let limits = Limits::default();
    let config = Configuration::new(depth, cycles, texture, &limits).unwrap();
    let mut session = GasketSession::new(config, limits, default_projection());
    let mut gpu = MockGpu::default();
    session.initialize(&mut gpu);
    (session, gpu, FrameQueue::new())
}

/// Fire frames until the queue runs dry; returns the number of drawn frames
fn drain(session: &mut GasketSession, gpu: &mut MockGpu, frames: &mut FrameQueue) -> usize {
    let mut draws = 0;
    while let Some(handle) = frames.take_due() {
        match session.on_frame(handle, gpu, frames) {
            FrameEvent::Draw(_) => draws += 1,
            FrameEvent::Finished => {}
            FrameEvent::Stale => panic!("queue handed out a stale frame"),
        }
    }
    draws
}

fn approx_eq(a: Mat4, b: Mat4) -> bool {
    a.iter()
        .flatten()
        .zip(b.iter().flatten())
        .all(|(x, y)| (x - y).abs() < 1e-4)
}

// ==================== Geometry Upload Tests ====================

/// Depth 0 uploads the four faces of the base tetrahedron in draw order
#[test]
fn test_initial_upload_depth_zero() {
    let (_, gpu, _) = new_session(0, 1, 1);
    let t = Tetrahedron::GASKET;

    assert_eq!(gpu.uploads, 1);
    assert_eq!(gpu.points.len(), 12);
    assert_eq!(&gpu.points[0..3], &[t.a, t.c, t.b]);
    assert_eq!(&gpu.points[9..12], &[t.b, t.c, t.d]);

    for face in 0..4 {
        for slot in 0..3 {
            let i = face * 3 + slot;
            assert_eq!(gpu.colors[i], BASE_COLORS[face]);
            assert_eq!(gpu.tex_coords[i], SLOT_TEX_COORDS[slot]);
        }
    }
    assert_eq!(gpu.texture, Some(TextureId::First));
}

/// Every depth uploads 3 * 4^(d+1) vertices
#[test]
fn test_vertex_counts_by_depth() {
    let (mut session, mut gpu, mut frames) = new_session(0, 1, 1);
    for depth in 1..=5i64 {
        session
            .apply(ControlEvent::SetDepth(depth), &mut gpu, &mut frames)
            .unwrap();
        assert_eq!(gpu.points.len(), 3 * 4usize.pow(depth as u32 + 1));
    }
}

/// Regeneration at the same depth is bit-identical
#[test]
fn test_regeneration_is_deterministic() {
    let (mut session, mut gpu, mut frames) = new_session(3, 1, 1);
    let first: Vec<[u32; 4]> = gpu
        .points
        .iter()
        .map(|p| [p.x.to_bits(), p.y.to_bits(), p.z.to_bits(), p.w.to_bits()])
        .collect();

    session.apply(ControlEvent::SetDepth(1), &mut gpu, &mut frames).unwrap();
    session.apply(ControlEvent::SetDepth(3), &mut gpu, &mut frames).unwrap();

    let second: Vec<[u32; 4]> = gpu
        .points
        .iter()
        .map(|p| [p.x.to_bits(), p.y.to_bits(), p.z.to_bits(), p.w.to_bits()])
        .collect();
    assert_eq!(first, second);
}

// ==================== Animation Run Tests ====================

/// A full single-cycle run returns the gasket to its resting transform
#[test]
fn test_single_cycle_run_returns_home() {
    let (mut session, mut gpu, mut frames) = new_session(1, 1, 2);
    session.apply(ControlEvent::Start, &mut gpu, &mut frames).unwrap();
    let draws = drain(&mut session, &mut gpu, &mut frames);

    // 180 + 180 + 150 + 150 + 240 + 480 + 240 phase frames plus the advance frame,
    // allowing one frame of slack per phase for float accumulation
    assert!((1616..=1626).contains(&draws), "unexpected frame count {}", draws);

    let last = gpu.transform.unwrap();
    assert!(approx_eq(last, static_model_view()));
    assert!(session.controls_enabled());

    let progress = session.progress().unwrap();
    assert_eq!(progress.state.phase, Phase::RotateRight);
    assert_eq!(progress.state.completed_cycles, 1);
}

/// Each cycle performs the same number of frames
#[test]
fn test_cycles_are_identical() {
    let (mut one, mut gpu_one, mut frames_one) = new_session(0, 1, 1);
    one.apply(ControlEvent::Start, &mut gpu_one, &mut frames_one).unwrap();
    let single = drain(&mut one, &mut gpu_one, &mut frames_one);

    let (mut three, mut gpu_three, mut frames_three) = new_session(0, 3, 1);
    three
        .apply(ControlEvent::Start, &mut gpu_three, &mut frames_three)
        .unwrap();
    let triple = drain(&mut three, &mut gpu_three, &mut frames_three);

    assert_eq!(triple, single * 3);
}

/// The first frame of a run rotates by one degree
#[test]
fn test_first_frame_transform() {
    let (mut session, mut gpu, mut frames) = new_session(0, 1, 1);
    session.apply(ControlEvent::Start, &mut gpu, &mut frames).unwrap();

    let handle = frames.take_due().unwrap();
    let FrameEvent::Draw(matrix) = session.on_frame(handle, &mut gpu, &mut frames) else {
        panic!("first frame should draw");
    };

    let expected = mat4::mul(static_model_view(), mat4::rotation_z(-1.0));
    assert!(approx_eq(matrix, expected));
    assert_eq!(gpu.transform, Some(matrix));
}

/// Controls reject input during a run and accept it afterwards
#[test]
fn test_controls_locked_during_run() {
    let (mut session, mut gpu, mut frames) = new_session(2, 1, 1);
    session.apply(ControlEvent::Start, &mut gpu, &mut frames).unwrap();

    for event in [
        ControlEvent::SetDepth(4),
        ControlEvent::SetCycles(3),
        ControlEvent::SelectTexture(TextureId::Second),
        ControlEvent::Start,
    ] {
        assert!(session.apply(event, &mut gpu, &mut frames).is_err());
    }
    assert_eq!(gpu.uploads, 1);

    drain(&mut session, &mut gpu, &mut frames);
    session.apply(ControlEvent::SetDepth(4), &mut gpu, &mut frames).unwrap();
    assert_eq!(session.config().depth(), 4);
    assert_eq!(gpu.uploads, 2);
}

/// Changing the cycle count between runs affects only the next run
#[test]
fn test_cycles_take_effect_on_next_run() {
    let (mut session, mut gpu, mut frames) = new_session(0, 0, 1);
    session.apply(ControlEvent::SetCycles(2), &mut gpu, &mut frames).unwrap();
    session.apply(ControlEvent::Start, &mut gpu, &mut frames).unwrap();
    drain(&mut session, &mut gpu, &mut frames);

    assert_eq!(session.progress().unwrap().state.completed_cycles, 2);
}

// ==================== Cancellation Tests ====================

/// After cancellation no frame ever writes a transform
#[test]
fn test_cancel_stops_transform_writes() {
    let (mut session, mut gpu, mut frames) = new_session(0, 5, 1);
    session.apply(ControlEvent::Start, &mut gpu, &mut frames).unwrap();

    for _ in 0..10 {
        let handle = frames.take_due().unwrap();
        session.on_frame(handle, &mut gpu, &mut frames);
    }

    let writes = gpu.transform_writes;
    let pending = frames.take_due().unwrap();
    session.cancel_run(&mut frames);

    assert_eq!(session.on_frame(pending, &mut gpu, &mut frames), FrameEvent::Stale);
    assert_eq!(gpu.transform_writes, writes);
    assert!(!session.is_running());
    assert!(session.controls_enabled());
}

/// Projection is pushed once and uses the fixed view volume
#[test]
fn test_projection_pushed_once() {
    let (session, gpu, _) = new_session(0, 1, 3);
    assert_eq!(gpu.projection, Some(default_projection()));
    assert_eq!(session.projection(), default_projection());
    assert_eq!(gpu.texture, Some(TextureId::Third));
}
