#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use serde_json::json;

use super::*;
use crate::geom::Radii;
use crate::paint::{Color, FillRule};
use crate::path::Segment;
use crate::surface::{RecordingSurface, SurfaceOp};
use crate::viewport::{ArcFlagPolicy, ViewBox, resolve_transform, resolve_transform_or_unit_scale};

// =============================================================
// Helpers
// =============================================================

const FILL: Color = Color::rgb(0xd9, 0x4b, 0x4b);
const STROKE: Color = Color::rgb(0x1f, 0x1a, 0x17);

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn open_triangle() -> Path {
    serde_json::from_value(json!([
        { "type": "move_to", "to": { "x": 0.0, "y": 0.0 } },
        { "type": "line_to", "to": { "x": 10.0, "y": 0.0 } },
        { "type": "line_to", "to": { "x": 10.0, "y": 10.0 } }
    ]))
    .unwrap()
}

fn target() -> PaintTarget {
    PaintTarget { offset: pt(40.0, 60.0), clip: Rect::new(40.0, 60.0, 100.0, 100.0) }
}

fn both_channels() -> ResolvedPaint {
    ResolvedPaint::new(Some(FILL), Some(STROKE), Some(2.0))
}

fn run(path: &Path, transform: &ViewportTransform, paint: &ResolvedPaint, config: &RenderConfig) -> RecordingSurface {
    let mut surface = RecordingSurface::new();
    render(&mut surface, path, transform, &target(), paint, config);
    surface
}

// =============================================================
// Pass structure
// =============================================================

#[test]
fn passes_run_in_order_inside_saved_state() {
    let surface = run(&open_triangle(), &ViewportTransform::IDENTITY, &both_channels(), &RenderConfig::default());
    let kinds: Vec<&str> = surface
        .ops()
        .iter()
        .map(|op| match op {
            SurfaceOp::Save => "save",
            SurfaceOp::Restore => "restore",
            SurfaceOp::Translate { .. } => "translate",
            SurfaceOp::SetClip { .. } => "clip",
            SurfaceOp::ClearClip => "clear_clip",
            SurfaceOp::Fill { .. } => "fill",
            SurfaceOp::Stroke { .. } => "stroke",
        })
        .collect();
    assert_eq!(kinds, vec!["save", "clip", "translate", "fill", "stroke", "restore"]);
    assert_eq!(surface.depth(), 0);
}

#[test]
fn clip_and_offset_come_from_target() {
    let surface = run(&open_triangle(), &ViewportTransform::IDENTITY, &both_channels(), &RenderConfig::default());
    assert_eq!(surface.ops()[1], SurfaceOp::SetClip { rect: Rect::new(40.0, 60.0, 100.0, 100.0) });
    assert_eq!(surface.ops()[2], SurfaceOp::Translate { offset: pt(40.0, 60.0) });
}

// Open triangle, identity transform: the fill gets the closed copy with the
// even-odd rule, the stroke gets the three authored segments.
#[test]
fn fill_closes_and_stroke_keeps_authored_path() {
    let path = open_triangle();
    let surface = run(&path, &ViewportTransform::IDENTITY, &both_channels(), &RenderConfig::default());

    let fills: Vec<_> = surface.fills().collect();
    assert_eq!(fills.len(), 1);
    let (filled, color, rule) = fills[0];
    assert_eq!(
        filled.segments(),
        &[
            Segment::MoveTo { to: pt(0.0, 0.0) },
            Segment::LineTo { to: pt(10.0, 0.0) },
            Segment::LineTo { to: pt(10.0, 10.0) },
            Segment::LineTo { to: pt(0.0, 0.0) },
        ]
    );
    assert_eq!(color, FILL);
    assert_eq!(rule, FillRule::EvenOdd);

    let strokes: Vec<_> = surface.strokes().collect();
    assert_eq!(strokes.len(), 1);
    assert_eq!(strokes[0].0, &path);
    assert_eq!(strokes[0].1, STROKE);
    assert_eq!(strokes[0].2, 2.0);
}

#[test]
fn configured_fill_rule_is_used() {
    let config = RenderConfig { fill_rule: FillRule::NonZero, ..RenderConfig::default() };
    let surface = run(&open_triangle(), &ViewportTransform::IDENTITY, &both_channels(), &config);
    assert_eq!(surface.fills().next().map(|f| f.2), Some(FillRule::NonZero));
}

// =============================================================
// Viewport transform
// =============================================================

#[test]
fn view_box_scale_reaches_both_passes() {
    let vb = ViewBox::new(0.0, 0.0, 100.0, 100.0);
    let transform = resolve_transform(Some(&vb), Some(50.0), Some(50.0)).unwrap();
    let path = Path::from_segments(vec![Segment::MoveTo { to: pt(100.0, 100.0) }, Segment::LineTo { to: pt(0.0, 100.0) }]);

    let surface = run(&path, &transform, &both_channels(), &RenderConfig::default());

    let (stroked, _, _) = surface.strokes().next().unwrap();
    assert_eq!(stroked.segments()[0], Segment::MoveTo { to: pt(50.0, 50.0) });
    assert_eq!(stroked.segments()[1], Segment::LineTo { to: pt(0.0, 50.0) });

    let (filled, _, _) = surface.fills().next().unwrap();
    assert_eq!(filled.segments()[0], Segment::MoveTo { to: pt(50.0, 50.0) });
    assert_eq!(filled.segments().last(), Some(&Segment::LineTo { to: pt(50.0, 50.0) }));
}

#[test]
fn degenerate_viewport_renders_at_unit_scale() {
    let vb = ViewBox::new(0.0, 0.0, 0.0, 100.0);
    assert!(resolve_transform(Some(&vb), Some(100.0), None).is_err());

    let transform = resolve_transform_or_unit_scale(Some(&vb), Some(100.0), None);
    let path = open_triangle();
    let surface = run(&path, &transform, &both_channels(), &RenderConfig::default());
    assert_eq!(surface.strokes().next().map(|s| s.0.clone()), Some(path));
}

fn large_arc_path() -> Path {
    let mut path = Path::new();
    path.move_to(pt(10.0, 0.0));
    path.elliptical_arc_to(pt(0.0, 10.0), Radii::new(10.0, 10.0), 0.0, true, true);
    path
}

fn stroked_arc_flags(surface: &RecordingSurface) -> (bool, bool) {
    let (stroked, _, _) = surface.strokes().next().unwrap();
    match &stroked.segments()[1] {
        Segment::EllipticalArcTo { large_arc, sweep, .. } => (*large_arc, *sweep),
        other => panic!("expected arc, got {other:?}"),
    }
}

#[test]
fn scaled_large_arc_keeps_flags_by_default() {
    let transform = ViewportTransform::new(0.5, Point::ORIGIN);
    let surface = run(&large_arc_path(), &transform, &both_channels(), &RenderConfig::default());
    assert_eq!(stroked_arc_flags(&surface), (true, true));
}

// Legacy policy: flags are forced clear, so this arc is drawn as the small
// counter-sweep arc instead of the 270 degree one. Visual regression risk.
#[test]
fn scaled_large_arc_loses_flags_under_legacy_policy() {
    let transform = ViewportTransform::new(0.5, Point::ORIGIN);
    let config = RenderConfig { arc_flags: ArcFlagPolicy::ForceCleared, ..RenderConfig::default() };
    let surface = run(&large_arc_path(), &transform, &both_channels(), &config);
    assert_eq!(stroked_arc_flags(&surface), (false, false));
}

#[test]
fn identity_transform_leaves_arc_flags_alone_even_under_legacy_policy() {
    let config = RenderConfig { arc_flags: ArcFlagPolicy::ForceCleared, ..RenderConfig::default() };
    let surface = run(&large_arc_path(), &ViewportTransform::IDENTITY, &both_channels(), &config);
    assert_eq!(stroked_arc_flags(&surface), (true, true));
}

// =============================================================
// Degenerate input
// =============================================================

#[test]
fn empty_path_touches_nothing() {
    let surface = run(&Path::new(), &ViewportTransform::IDENTITY, &both_channels(), &RenderConfig::default());
    assert!(surface.ops().is_empty());
}

#[test]
fn empty_clip_touches_nothing() {
    let mut surface = RecordingSurface::new();
    let target = PaintTarget { offset: Point::ORIGIN, clip: Rect::new(0.0, 0.0, 0.0, 50.0) };
    render(
        &mut surface,
        &open_triangle(),
        &ViewportTransform::IDENTITY,
        &target,
        &both_channels(),
        &RenderConfig::default(),
    );
    assert!(surface.ops().is_empty());
}

#[test]
fn absent_fill_skips_fill_pass() {
    let paint = ResolvedPaint::new(None, Some(STROKE), Some(1.0));
    let surface = run(&open_triangle(), &ViewportTransform::IDENTITY, &paint, &RenderConfig::default());
    assert_eq!(surface.fills().count(), 0);
    assert_eq!(surface.strokes().count(), 1);
}

#[test]
fn absent_stroke_skips_stroke_pass() {
    let paint = ResolvedPaint::new(Some(FILL), None, Some(1.0));
    let surface = run(&open_triangle(), &ViewportTransform::IDENTITY, &paint, &RenderConfig::default());
    assert_eq!(surface.fills().count(), 1);
    assert_eq!(surface.strokes().count(), 0);
}

#[test]
fn stroke_without_width_is_skipped() {
    let paint = ResolvedPaint::new(Some(FILL), Some(STROKE), None);
    let surface = run(&open_triangle(), &ViewportTransform::IDENTITY, &paint, &RenderConfig::default());
    assert_eq!(surface.strokes().count(), 0);
}

#[test]
fn no_channels_still_balances_state() {
    let surface = run(&open_triangle(), &ViewportTransform::IDENTITY, &ResolvedPaint::default(), &RenderConfig::default());
    assert_eq!(surface.fills().count(), 0);
    assert_eq!(surface.strokes().count(), 0);
    assert_eq!(surface.depth(), 0);
}

#[test]
fn failing_surface_is_swallowed_and_restored() {
    let mut surface = RecordingSurface::failing();
    render(
        &mut surface,
        &open_triangle(),
        &ViewportTransform::IDENTITY,
        &target(),
        &both_channels(),
        &RenderConfig::default(),
    );
    // Clip failed: no drawing, but the saved state was restored.
    assert_eq!(surface.depth(), 0);
    assert_eq!(surface.fills().count(), 0);
    assert_eq!(surface.ops().last(), Some(&SurfaceOp::Restore));
}
