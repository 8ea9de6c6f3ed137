use sky_barrage::geometry::*;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

// ── direction_to ──────────────────────────────────────────────────────────────

#[test]
fn direction_to_is_unit_length() {
    let from = Rect::new(0.0, 0.0, 1.0, 1.0);
    let to = Rect::new(3.0, 4.0, 1.0, 1.0);
    let dir = direction_to(&from, &to);
    assert!(approx(dir.len(), 1.0));
}

#[test]
fn direction_to_points_toward_target() {
    let from = Rect::new(0.0, 0.0, 1.0, 1.0);
    let to = Rect::new(3.0, 4.0, 1.0, 1.0);
    let dir = direction_to(&from, &to);
    // 3-4-5 triangle
    assert!(approx(dir.x, 0.6));
    assert!(approx(dir.y, 0.8));
}

#[test]
fn direction_to_straight_down() {
    let from = Rect::new(10.0, 2.0, 3.0, 1.0);
    let to = Rect::new(10.0, 20.0, 1.0, 1.0);
    let dir = direction_to(&from, &to);
    assert!(approx(dir.x, 0.0));
    assert!(approx(dir.y, 1.0));
}

#[test]
fn direction_to_unit_length_any_quadrant() {
    let from = Rect::new(50.0, 30.0, 1.0, 1.0);
    for &(x, y) in &[(0.0, 0.0), (99.0, 0.0), (0.0, 60.0), (77.0, 3.0)] {
        let dir = direction_to(&from, &Rect::new(x, y, 1.0, 1.0));
        assert!(approx(dir.len(), 1.0));
    }
}

// ── in_bounds ─────────────────────────────────────────────────────────────────

#[test]
fn in_bounds_fully_inside() {
    let r = Rect::new(50.0, 15.0, 2.0, 2.0);
    assert_eq!(in_bounds(&r, 100.0, 30.0), (true, true));
}

#[test]
fn in_bounds_crossing_left_edge() {
    let r = Rect::new(0.5, 15.0, 2.0, 2.0); // left() = -0.5
    assert_eq!(in_bounds(&r, 100.0, 30.0), (false, true));
}

#[test]
fn in_bounds_crossing_right_edge() {
    let r = Rect::new(99.5, 15.0, 2.0, 2.0); // right() = 100.5
    assert_eq!(in_bounds(&r, 100.0, 30.0), (false, true));
}

#[test]
fn in_bounds_crossing_bottom_edge() {
    let r = Rect::new(50.0, 29.5, 2.0, 2.0); // bottom() = 30.5
    assert_eq!(in_bounds(&r, 100.0, 30.0), (true, false));
}

#[test]
fn in_bounds_flush_with_edges_still_inside() {
    // Touching an edge from the inside is not out of bounds
    let r = Rect::new(1.0, 1.0, 2.0, 2.0); // left() = 0, top() = 0
    assert_eq!(in_bounds(&r, 100.0, 30.0), (true, true));
}

#[test]
fn in_bounds_out_on_both_axes() {
    let r = Rect::new(-5.0, -5.0, 2.0, 2.0);
    assert_eq!(in_bounds(&r, 100.0, 30.0), (false, false));
}

// ── Rect ──────────────────────────────────────────────────────────────────────

#[test]
fn rect_edges_from_center() {
    let r = Rect::new(10.0, 20.0, 4.0, 6.0);
    assert!(approx(r.left(), 8.0));
    assert!(approx(r.right(), 12.0));
    assert!(approx(r.top(), 17.0));
    assert!(approx(r.bottom(), 23.0));
}

#[test]
fn rect_shifted_moves_center_only() {
    let r = Rect::new(10.0, 20.0, 4.0, 6.0).shifted(1.5, -2.0);
    assert!(approx(r.cx, 11.5));
    assert!(approx(r.cy, 18.0));
    assert!(approx(r.w, 4.0));
    assert!(approx(r.h, 6.0));
}

#[test]
fn rect_overlaps_intersecting() {
    let a = Rect::new(10.0, 10.0, 4.0, 4.0);
    let b = Rect::new(12.0, 12.0, 4.0, 4.0);
    assert!(a.overlaps(&b));
    assert!(b.overlaps(&a));
}

#[test]
fn rect_overlaps_disjoint() {
    let a = Rect::new(10.0, 10.0, 4.0, 4.0);
    let b = Rect::new(20.0, 10.0, 4.0, 4.0);
    assert!(!a.overlaps(&b));
}

#[test]
fn rect_overlaps_touching_edges_do_not_count() {
    // a's right edge exactly at b's left edge
    let a = Rect::new(10.0, 10.0, 4.0, 4.0);
    let b = Rect::new(14.0, 10.0, 4.0, 4.0);
    assert!(!a.overlaps(&b));
}

#[test]
fn rect_overlaps_containment() {
    let outer = Rect::new(10.0, 10.0, 10.0, 10.0);
    let inner = Rect::new(11.0, 9.0, 1.0, 1.0);
    assert!(outer.overlaps(&inner));
}
