// Unit tests for the crop-region editor

use super::*;
use crate::domain::mapper::fit_to_viewport;

fn p(x: i32, y: i32) -> DisplayPoint {
    DisplayPoint::new(x, y)
}

/// Scale 1: display and source coordinates coincide
fn unit_editor(rect: CropRect) -> CropRegionEditor {
    let frame = FrameSize::new(640, 360).unwrap();
    CropRegionEditor::new(ViewportMapping::identity(frame)).with_rect(rect)
}

/// 1920x1080 shown at 640x360, scale 3
fn scaled_editor(rect: CropRect) -> CropRegionEditor {
    let mapping = fit_to_viewport(1920, 1080, 640, 360).unwrap();
    CropRegionEditor::new(mapping).with_rect(rect)
}

fn sample_rect() -> CropRect {
    CropRect::new(100, 100, 200, 100)
}

#[test]
fn test_hit_priority_corner_edge_interior() {
    let editor = unit_editor(sample_rect());
    assert_eq!(editor.classify_hit(p(100, 100)), HitKind::TopLeft);
    assert_eq!(editor.classify_hit(p(100, 150)), HitKind::Left);
    assert_eq!(editor.classify_hit(p(200, 150)), HitKind::Move);
}

#[test]
fn test_hit_all_corners_and_edges() {
    let editor = unit_editor(sample_rect());
    assert_eq!(editor.classify_hit(p(300, 100)), HitKind::TopRight);
    assert_eq!(editor.classify_hit(p(100, 200)), HitKind::BottomLeft);
    assert_eq!(editor.classify_hit(p(305, 204)), HitKind::BottomRight);
    assert_eq!(editor.classify_hit(p(296, 150)), HitKind::Right);
    assert_eq!(editor.classify_hit(p(200, 93)), HitKind::Top);
    assert_eq!(editor.classify_hit(p(200, 207)), HitKind::Bottom);
}

#[test]
fn test_hit_margin_is_exclusive() {
    let editor = unit_editor(sample_rect());
    assert_eq!(editor.classify_hit(p(92, 150)), HitKind::None);
    assert_eq!(editor.classify_hit(p(93, 150)), HitKind::Left);
}

#[test]
fn test_hit_edges_clipped_to_span() {
    let editor = unit_editor(sample_rect());
    // In line with the left edge but far above the rectangle
    assert_eq!(editor.classify_hit(p(100, 50)), HitKind::None);
    // Just outside the corner diagonally, within the margin of both edges
    assert_eq!(editor.classify_hit(p(95, 95)), HitKind::TopLeft);
    assert_eq!(editor.classify_hit(p(500, 300)), HitKind::None);
}

#[test]
fn test_hit_degenerate_rect_is_none() {
    let editor = unit_editor(CropRect::new(100, 100, 0, 100));
    assert_eq!(editor.classify_hit(p(100, 100)), HitKind::None);
    assert_eq!(editor.classify_hit(p(100, 150)), HitKind::None);
}

#[test]
fn test_hit_uses_display_space() {
    // Source rect 300,300 600x300 is 100,100 200x100 on screen
    let editor = scaled_editor(CropRect::new(300, 300, 600, 300));
    assert_eq!(editor.classify_hit(p(100, 100)), HitKind::TopLeft);
    assert_eq!(editor.classify_hit(p(200, 150)), HitKind::Move);
    assert_eq!(editor.classify_hit(p(300, 300)), HitKind::None);
}

#[test]
fn test_hover_reports_cursor_without_mutation() {
    let mut editor = unit_editor(sample_rect());
    assert_eq!(editor.hover(p(200, 150)), CursorHint::Move);
    assert_eq!(editor.hover(p(300, 150)), CursorHint::ResizeHorizontal);
    let feedback = editor.handle_event(PointerEvent::Hover(p(100, 100)));
    assert_eq!(
        feedback,
        EditorFeedback::Cursor(HitKind::TopLeft, CursorHint::ResizeNwSe)
    );
    assert_eq!(editor.rect(), sample_rect());
    assert!(editor.gesture().is_idle());
}

#[test]
fn test_begin_outside_starts_new_rect_at_press_point() {
    let mut editor = scaled_editor(CropRect::new(300, 300, 600, 300));
    let state = editor.begin_gesture(p(400, 50));
    assert_eq!(state, GestureState::DrawingNew { anchor: p(400, 50) });
    assert_eq!(editor.rect(), CropRect::new(1200, 150, 0, 0));
}

#[test]
fn test_begin_on_handle_captures_anchor() {
    let mut editor = unit_editor(sample_rect());
    let state = editor.begin_gesture(p(300, 200));
    assert_eq!(
        state,
        GestureState::Resizing {
            handle: ResizeHandle::BottomRight,
            anchor: p(300, 200),
            anchor_rect: sample_rect(),
        }
    );
    let state = editor.begin_gesture(p(200, 150));
    assert!(matches!(state, GestureState::Moving { .. }));
}

#[test]
fn test_drawing_new_grows_from_anchor() {
    let mut editor = scaled_editor(CropRect::default());
    editor.begin_gesture(p(10, 20));
    let rect = editor.update_gesture(p(110, 70));
    assert_eq!(rect, CropRect::new(30, 60, 300, 150));
}

#[test]
fn test_drawing_new_up_left_gives_minimum_box() {
    let mut editor = scaled_editor(CropRect::default());
    editor.begin_gesture(p(100, 100));
    let rect = editor.update_gesture(p(40, 30));
    assert_eq!(rect, CropRect::new(300, 300, 30, 30));
}

#[test]
fn test_click_without_drag_commits_minimum_box() {
    let mut editor = unit_editor(CropRect::default());
    editor.begin_gesture(p(50, 60));
    let rect = editor.end_gesture(p(50, 60));
    assert_eq!(rect, CropRect::new(50, 60, 10, 10));
    assert!(editor.gesture().is_idle());
}

#[test]
fn test_moving_translates_by_scaled_delta() {
    let mut editor = scaled_editor(CropRect::new(300, 300, 600, 300));
    editor.begin_gesture(p(200, 150));
    let rect = editor.update_gesture(p(190, 175));
    assert_eq!(rect, CropRect::new(270, 375, 600, 300));
}

#[test]
fn test_moving_is_not_clamped_to_frame() {
    let mut editor = unit_editor(sample_rect());
    editor.begin_gesture(p(200, 150));
    let rect = editor.end_gesture(p(50, 150));
    assert_eq!(rect.x, -50);
}

#[test]
fn test_update_is_idempotent() {
    let mut editor = scaled_editor(CropRect::new(300, 300, 600, 300));
    editor.begin_gesture(p(100, 150));
    let first = editor.update_gesture(p(137, 151));
    let second = editor.update_gesture(p(137, 151));
    assert_eq!(first, second);

    let mut editor = scaled_editor(CropRect::default());
    editor.begin_gesture(p(10, 10));
    let first = editor.update_gesture(p(91, 47));
    let second = editor.update_gesture(p(91, 47));
    assert_eq!(first, second);
}

#[test]
fn test_updates_do_not_drift() {
    let mut direct = scaled_editor(CropRect::new(300, 300, 600, 300));
    direct.begin_gesture(p(200, 150));
    let expected = direct.update_gesture(p(250, 170));

    let mut stepped = scaled_editor(CropRect::new(300, 300, 600, 300));
    stepped.begin_gesture(p(200, 150));
    for step in 1..=50 {
        stepped.update_gesture(p(200 + step, 150 + (step * 20) / 50));
    }
    assert_eq!(stepped.rect(), expected);
}

#[test]
fn test_resize_left_moves_origin() {
    let mut editor = unit_editor(sample_rect());
    editor.begin_gesture(p(100, 150));
    let rect = editor.update_gesture(p(150, 150));
    assert_eq!(rect, CropRect::new(150, 100, 150, 100));
}

#[test]
fn test_resize_left_freezes_at_minimum() {
    let mut editor = unit_editor(sample_rect());
    editor.begin_gesture(p(100, 150));
    let before = editor.update_gesture(p(250, 150));
    assert_eq!(before, CropRect::new(250, 100, 50, 100));

    // Width would become 5: x and width hold the previous frame's values
    let frozen = editor.update_gesture(p(295, 150));
    assert_eq!(frozen.x, before.x);
    assert_eq!(frozen.width, before.width);

    // Exactly the minimum is not accepted either
    let still = editor.update_gesture(p(290, 150));
    assert_eq!(still, before);
}

#[test]
fn test_resize_right_and_bottom() {
    let mut editor = unit_editor(sample_rect());
    editor.begin_gesture(p(300, 150));
    assert_eq!(
        editor.update_gesture(p(340, 150)),
        CropRect::new(100, 100, 240, 100)
    );

    let mut editor = unit_editor(sample_rect());
    editor.begin_gesture(p(200, 200));
    assert_eq!(
        editor.update_gesture(p(200, 150)),
        CropRect::new(100, 100, 200, 50)
    );
    // Past the minimum the bottom edge stays put
    assert_eq!(
        editor.update_gesture(p(200, 95)),
        CropRect::new(100, 100, 200, 50)
    );
}

#[test]
fn test_resize_top_moves_origin() {
    let mut editor = unit_editor(sample_rect());
    editor.begin_gesture(p(200, 100));
    assert_eq!(
        editor.update_gesture(p(200, 80)),
        CropRect::new(100, 80, 200, 120)
    );
}

#[test]
fn test_resize_corner_axes_are_independent() {
    let mut editor = unit_editor(sample_rect());
    editor.begin_gesture(p(100, 100));
    let rect = editor.update_gesture(p(120, 90));
    assert_eq!(rect, CropRect::new(120, 90, 180, 110));

    // Vertical axis frozen, horizontal still follows the pointer
    let rect = editor.update_gesture(p(130, 250));
    assert_eq!(rect, CropRect::new(130, 90, 170, 110));
}

#[test]
fn test_resize_keeps_minimum_display_size() {
    let mut editor = scaled_editor(CropRect::new(300, 300, 600, 300));
    editor.begin_gesture(p(100, 100));
    for x in (0..400).step_by(3) {
        for y in (60..260).step_by(17) {
            editor.update_gesture(p(x, y));
            let display = editor.display_rect();
            assert!(display.width >= MIN_CROP_SIZE, "{:?}", editor.rect());
            assert!(display.height >= MIN_CROP_SIZE, "{:?}", editor.rect());
        }
    }
    let committed = editor.end_gesture(p(399, 259));
    assert!(committed.width > 30);
    assert!(committed.height > 30);
}

#[test]
fn test_end_gesture_applies_final_update_and_resets() {
    let mut editor = unit_editor(sample_rect());
    editor.begin_gesture(p(200, 150));
    editor.update_gesture(p(210, 150));
    let rect = editor.end_gesture(p(220, 160));
    assert_eq!(rect, CropRect::new(120, 110, 200, 100));
    assert!(editor.gesture().is_idle());

    // Drags after release do nothing
    assert_eq!(editor.update_gesture(p(0, 0)), rect);
}

#[test]
fn test_handle_event_sequence() {
    let mut editor = unit_editor(CropRect::default());
    let events = [
        PointerEvent::Press(p(10, 10)),
        PointerEvent::Drag(p(60, 40)),
        PointerEvent::Release(p(110, 60)),
    ];
    let feedback: Vec<EditorFeedback> =
        events.iter().map(|e| editor.handle_event(*e)).collect();
    assert_eq!(
        feedback[0],
        EditorFeedback::Began(GestureState::DrawingNew { anchor: p(10, 10) })
    );
    assert_eq!(
        feedback[1],
        EditorFeedback::Updated(CropRect::new(10, 10, 50, 30))
    );
    assert_eq!(
        feedback[2],
        EditorFeedback::Committed(CropRect::new(10, 10, 100, 50))
    );
}

#[test]
fn test_reset_to_full_frame() {
    let mut editor = scaled_editor(CropRect::new(3, 4, 5, 6));
    editor.begin_gesture(p(1, 1));
    assert_eq!(
        editor.reset_to_full_frame(1920, 1080),
        CropRect::new(0, 0, 1920, 1080)
    );
    assert!(editor.gesture().is_idle());
}

#[test]
fn test_load_rect_drops_gesture() {
    let mut editor = unit_editor(sample_rect());
    editor.begin_gesture(p(200, 150));
    editor.load_rect(CropRect::new(0, 0, 50, 50));
    assert!(editor.gesture().is_idle());
    assert_eq!(editor.rect(), CropRect::new(0, 0, 50, 50));
}

#[test]
fn test_release_without_press_is_ignored() {
    let mut editor = unit_editor(CropRect::new(0, 0, 640, 360));
    assert_eq!(
        editor.handle_event(PointerEvent::Release(p(5, 5))),
        EditorFeedback::Ignored
    );
    assert_eq!(editor.rect(), CropRect::new(0, 0, 640, 360));

    // A second release after a finished gesture is ignored too
    editor.handle_event(PointerEvent::Press(p(320, 180)));
    editor.handle_event(PointerEvent::Release(p(330, 180)));
    assert_eq!(
        editor.handle_event(PointerEvent::Release(p(400, 180))),
        EditorFeedback::Ignored
    );
    assert_eq!(editor.rect(), CropRect::new(10, 0, 640, 360));
}

#[test]
fn test_extreme_points_do_not_overflow() {
    let mut editor = unit_editor(CropRect::default());
    editor.begin_gesture(p(i32::MIN, 0));
    let rect = editor.update_gesture(p(i32::MAX, 0));
    assert_eq!(rect.x, i32::MIN);
    assert_eq!(rect.width, i32::MAX);

    let mut editor = unit_editor(CropRect::new(100, 100, 200, 100));
    editor.begin_gesture(p(200, 150));
    let moved = editor.update_gesture(p(i32::MAX, i32::MIN));
    assert_eq!(moved.x, i32::MAX - 100);
    assert_eq!(moved.y, i32::MIN + 100);
}

#[test]
fn test_hit_test_near_i32_limits() {
    let editor = unit_editor(CropRect::new(2_147_483_000, 0, 1000, 100));
    assert_eq!(editor.classify_hit(p(0, 0)), HitKind::None);
    assert_eq!(editor.classify_hit(p(2_147_483_000, 50)), HitKind::Left);
}
