// Unit tests for domain models

use super::*;

#[test]
fn test_crop_rect_parse() {
    let rect = CropRect::parse("10, 20,300,200").unwrap();
    assert_eq!(rect, CropRect::new(10, 20, 300, 200));
}

#[test]
fn test_crop_rect_parse_allows_negative_origin() {
    let rect: CropRect = "-5,-7,100,50".parse().unwrap();
    assert_eq!(rect.x, -5);
    assert_eq!(rect.y, -7);
}

#[test]
fn test_crop_rect_parse_invalid() {
    assert!(CropRect::parse("1,2,3").is_err());
    assert!(CropRect::parse("a,2,3,4").is_err());
    assert!(CropRect::parse("0,0,-10,5").is_err());
}

#[test]
fn test_crop_rect_parse_rejects_out_of_range_components() {
    assert!(CropRect::parse("2147483000,0,1000,10").is_err());
    assert!(CropRect::parse("0,-2147483648,10,10").is_err());
    let edge = format!("{},0,10,10", MAX_SOURCE_COORD);
    assert!(CropRect::parse(&edge).is_ok());
}

#[test]
fn test_display_rect_edges_saturate() {
    let rect = DisplayRect {
        x: i32::MAX - 10,
        y: i32::MAX - 5,
        width: 1000,
        height: 10,
    };
    assert_eq!(rect.right(), i32::MAX);
    assert_eq!(rect.bottom(), i32::MAX);
}

#[test]
fn test_crop_rect_degenerate() {
    assert!(CropRect::new(0, 0, 0, 100).is_degenerate());
    assert!(CropRect::new(0, 0, 100, 0).is_degenerate());
    assert!(!CropRect::new(0, 0, 1, 1).is_degenerate());
    assert!(CropRect::default().is_degenerate());
    assert!(CropRect::new(0, 0, -1, 100).is_degenerate());
}

#[test]
fn test_crop_rect_full_frame() {
    let frame = FrameSize::new(1920, 1080).unwrap();
    assert_eq!(CropRect::full_frame(frame), CropRect::new(0, 0, 1920, 1080));
}

#[test]
fn test_frame_size_parse() {
    assert_eq!(
        FrameSize::parse("1920x1080").unwrap(),
        FrameSize {
            width: 1920,
            height: 1080
        }
    );
    assert_eq!(FrameSize::parse("640X360").unwrap().height, 360);
    assert!(FrameSize::parse("1920").is_err());
    assert!(FrameSize::parse("0x1080").is_err());
}

#[test]
fn test_display_rect_strict_containment() {
    let rect = DisplayRect {
        x: 100,
        y: 100,
        width: 200,
        height: 100,
    };
    assert!(rect.strictly_contains(DisplayPoint::new(200, 150)));
    assert!(!rect.strictly_contains(DisplayPoint::new(100, 150)));
    assert!(!rect.strictly_contains(DisplayPoint::new(200, 200)));
}

#[test]
fn test_hit_kind_handles_and_cursors() {
    assert_eq!(HitKind::None.handle(), None);
    assert_eq!(HitKind::Move.handle(), None);
    assert_eq!(HitKind::TopLeft.handle(), Some(ResizeHandle::TopLeft));
    assert_eq!(HitKind::Move.cursor(), CursorHint::Move);
    assert_eq!(HitKind::Left.cursor(), CursorHint::ResizeHorizontal);
    assert_eq!(HitKind::Bottom.cursor(), CursorHint::ResizeVertical);
    assert_eq!(HitKind::BottomRight.cursor(), CursorHint::ResizeNwSe);
    assert_eq!(HitKind::TopRight.cursor(), CursorHint::ResizeNeSw);
}

#[test]
fn test_resize_handle_axes() {
    assert!(ResizeHandle::TopLeft.moves_left());
    assert!(ResizeHandle::TopLeft.moves_top());
    assert!(!ResizeHandle::TopLeft.moves_right());
    assert!(ResizeHandle::BottomRight.moves_bottom());
    assert!(!ResizeHandle::Right.moves_top());
}

#[test]
fn test_batch_report_counts() {
    let mut report = BatchReport::default();
    report.record(ItemOutcome {
        item: "a.mp4".to_string(),
        output_path: PathBuf::from("out/a_cropped.mp4"),
        success: true,
        error: None,
    });
    report.record(ItemOutcome {
        item: "b.mov".to_string(),
        output_path: PathBuf::from("out/b_cropped.mov"),
        success: false,
        error: Some("exit 1".to_string()),
    });
    assert_eq!(report.succeeded, 1);
    assert_eq!(report.failed, 1);
    assert_eq!(report.total(), 2);
}
