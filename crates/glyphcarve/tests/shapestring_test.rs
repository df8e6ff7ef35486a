use glyphcarve::*;
use kurbo::BezPath;

const DEJAVU: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/DejaVuSans.ttf");

fn dejavu() -> TtfFont {
    TtfFont::from_path(DEJAVU).expect("load DejaVu Sans fixture")
}

fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> BezPath {
    polygon_contour(&[(x0, y0), (x1, y0), (x1, y1), (x0, y1)])
}

/// Unit-em font with square capitals and a solid L.
fn square_font() -> OutlineFont {
    OutlineFont::new(1.0)
        .with_glyph('M', 1.2, vec![rect(0.0, 0.0, 1.0, 1.0)])
        .with_glyph('O', 0.5, vec![rect(0.0, 0.0, 1.0, 1.0)])
        .with_glyph(
            'L',
            0.7,
            vec![polygon_contour(&[
                (0.0, 0.0),
                (0.6, 0.0),
                (0.6, 0.15),
                (0.15, 0.15),
                (0.15, 1.0),
                (0.0, 1.0),
            ])],
        )
}

fn unscaled(text: &str) -> ShapeStringParams {
    ShapeStringParams {
        scale_to_size: false,
        ..ShapeStringParams::new(text, 1.0)
    }
}

#[test]
fn test_real_font_builds_upright_faces() {
    let layout = build_shape_string(&dejavu(), &ShapeStringParams::new("Ag", 10.0)).unwrap();

    assert!(layout.is_filled());
    assert!(layout.report().is_clean(), "{:?}", layout.report());
    assert!(layout.shape().faces().count() >= 2);
    for face in layout.shape().faces() {
        assert!(face.normal_z() > 0.0);
        assert!(face.area() > 0.0);
        assert!(face.outer.is_closed());
    }
    // 'A' has a counter
    assert!(layout.shape().faces().any(|face| !face.holes.is_empty()));
}

#[test]
fn test_zero_length_contours_do_not_drop_letters() {
    let font = dejavu();

    let layout = build_shape_string(&font, &ShapeStringParams::new("u", 10.0)).unwrap();
    assert!(layout.report().is_clean(), "{:?}", layout.report());
    assert_eq!(layout.shape().faces().count(), 1);

    // body plus two dots, body plus caron, dotless body plus acute
    let layout = build_shape_string(&font, &ShapeStringParams::new("üší", 10.0)).unwrap();
    assert!(layout.report().is_clean(), "{:?}", layout.report());
    assert_eq!(layout.report().strategies.len(), 3);
    assert_eq!(layout.shape().faces().count(), 7);
    for face in layout.shape().faces() {
        assert!(face.area() > 0.1);
    }
}

#[test]
fn test_cap_height_ignores_text_content() {
    let font = dejavu();
    let a = build_shape_string(&font, &unscaled("A")).unwrap();
    let ay = build_shape_string(&font, &unscaled("Ay")).unwrap();

    assert!(a.cap_height() > 0.0);
    assert_eq!(a.cap_height(), ay.cap_height());
    // the descender changes the shape, not the cap height
    assert!(ay.height() > a.height());
}

#[test]
fn test_scale_to_size_matches_nominal_size() {
    let params = ShapeStringParams::new("M", 25.0);
    let layout = build_shape_string(&dejavu(), &params).unwrap();

    assert_eq!(layout.cap_height(), 25.0);
    let bbox = layout.shape().bounding_box().unwrap();
    assert!((bbox.max_y() - 25.0).abs() < 1e-6, "top at {}", bbox.max_y());
    assert!(bbox.min_y().abs() < 1e-6);
}

#[test]
fn test_builds_are_deterministic() {
    let font = dejavu();
    let params = ShapeStringParams {
        tracking: 0.5,
        oblique_angle: 12.0,
        justification: "Middle-Center".parse().unwrap(),
        ..ShapeStringParams::new("Rust 42", 6.0)
    };
    let first = build_shape_string(&font, &params).unwrap();
    let second = build_shape_string(&font, &params).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_wires_only_when_faces_disabled() {
    let params = ShapeStringParams {
        make_face: false,
        ..ShapeStringParams::new("Ab", 10.0)
    };
    let layout = build_shape_string(&dejavu(), &params).unwrap();

    assert!(!layout.is_filled());
    assert_eq!(layout.shape().faces().count(), 0);
    // A: outer + counter, b: outer + counter
    assert_eq!(layout.shape().wires().count(), 4);
    assert!(layout.report().is_clean());
}

#[test]
fn test_oblique_limit_is_inclusive() {
    let font = square_font();

    let at_limit = ShapeStringParams {
        oblique_angle: 80.0,
        ..unscaled("M")
    };
    let layout = build_shape_string(&font, &at_limit).unwrap();
    let expected = 1.0 + 80f64.to_radians().tan();
    assert!((layout.width() - expected).abs() < 1e-9);
    assert!(layout.report().is_clean());

    let past_limit = ShapeStringParams {
        oblique_angle: 80.0001,
        ..unscaled("M")
    };
    let layout = build_shape_string(&font, &past_limit).unwrap();
    assert!((layout.width() - 1.0).abs() < 1e-12);
    assert!(layout
        .report()
        .has(|d| matches!(d, Diagnostic::ObliqueAngleOutOfRange { angle } if *angle == 80.0001)));
}

#[test]
fn test_negative_oblique_leans_left() {
    let params = ShapeStringParams {
        oblique_angle: -45.0,
        keep_left_margin: true,
        ..unscaled("M")
    };
    let layout = build_shape_string(&square_font(), &params).unwrap();
    let bbox = layout.shape().bounding_box().unwrap();
    assert!((bbox.min_x() + 1.0).abs() < 1e-9);
    assert!((bbox.max_x() - 1.0).abs() < 1e-9);
}

#[test]
fn test_sticky_font_falls_back_to_wires() {
    // the L is a hairline: area 0.02 at unit size
    let font = OutlineFont::new(1.0)
        .with_glyph('M', 1.2, vec![rect(0.0, 0.0, 1.0, 1.0)])
        .with_glyph('L', 1.2, vec![rect(0.0, 0.0, 1.0, 0.02)]);

    let layout = build_shape_string(&font, &unscaled("ML")).unwrap();

    assert!(!layout.is_filled());
    assert_eq!(layout.shape().faces().count(), 0);
    assert_eq!(layout.shape().wires().count(), 2);
    assert!(layout
        .report()
        .has(|d| matches!(d, Diagnostic::StickyFontFallback)));
}

#[test]
fn test_sticky_threshold_comes_from_params() {
    let font = OutlineFont::new(1.0)
        .with_glyph('M', 1.2, vec![rect(0.0, 0.0, 1.0, 1.0)])
        .with_glyph('L', 1.2, vec![rect(0.0, 0.0, 1.0, 0.02)]);
    let params = ShapeStringParams {
        sticky_font: StickyFontHeuristic {
            min_area: 0.01,
            ..StickyFontHeuristic::default()
        },
        ..unscaled("ML")
    };

    let layout = build_shape_string(&font, &params).unwrap();
    assert!(layout.is_filled());
    assert_eq!(layout.shape().faces().count(), 2);
}

#[test]
fn test_unbuildable_character_is_skipped() {
    let bow_tie = polygon_contour(&[(0.0, 0.0), (1.0, 1.0), (1.0, 0.0), (0.0, 1.0)]);
    let font = square_font().with_glyph('X', 1.2, vec![bow_tie]);

    let layout = build_shape_string(&font, &unscaled("MXM")).unwrap();

    assert!(layout.is_filled());
    assert_eq!(layout.shape().faces().count(), 2);
    assert!(layout.report().has(
        |d| matches!(d, Diagnostic::FaceCreationFailed { character, .. } if *character == 'X')
    ));
    // the skipped glyph still takes up room
    assert!((layout.width() - 3.4).abs() < 1e-9);
}

#[test]
fn test_open_wires_do_not_make_faces() {
    let mut stroke = BezPath::new();
    stroke.move_to((0.0, 0.0));
    stroke.line_to((0.5, 1.0));
    let font = square_font().with_glyph('/', 0.6, vec![stroke]);

    let layout = build_shape_string(&font, &unscaled("M/")).unwrap();
    assert_eq!(layout.shape().faces().count(), 1);
    assert!(layout.report().has(
        |d| matches!(d, Diagnostic::FaceCreationFailed { character, .. } if *character == '/')
    ));
}

#[test]
fn test_fuse_merges_overlapping_letters() {
    let font = square_font();

    let separate = build_shape_string(&font, &unscaled("OO")).unwrap();
    assert_eq!(separate.shape().faces().count(), 2);

    let params = ShapeStringParams {
        fuse: true,
        ..unscaled("OO")
    };
    let fused = build_shape_string(&font, &params).unwrap();
    assert_eq!(fused.shape().faces().count(), 1);
    assert!((fused.shape().total_area() - 1.5).abs() < 1e-9);
    assert_eq!(fused.width(), separate.width());
}

#[test]
fn test_fuse_keeps_disjoint_letters() {
    let font = square_font();
    let plain = build_shape_string(&font, &unscaled("MM")).unwrap();
    let params = ShapeStringParams {
        fuse: true,
        ..unscaled("MM")
    };
    let fused = build_shape_string(&font, &params).unwrap();

    assert_eq!(plain.shape().faces().count(), fused.shape().faces().count());
    assert!((plain.shape().total_area() - fused.shape().total_area()).abs() < 1e-12);
    assert_eq!(plain.shape().bounding_box(), fused.shape().bounding_box());
}

#[test]
fn test_shape_height_reference_centres_descenders() {
    let params = ShapeStringParams {
        justification: "Middle-Center".parse().unwrap(),
        justification_reference: JustificationReference::ShapeHeight,
        ..ShapeStringParams::new("Ay", 10.0)
    };
    let layout = build_shape_string(&dejavu(), &params).unwrap();
    let bbox = layout.shape().bounding_box().unwrap();

    assert!((bbox.min_x() + bbox.max_x()).abs() < 1e-9);
    assert!((bbox.min_y() + bbox.max_y()).abs() < 1e-9);
}

#[test]
fn test_custom_strategy_list() {
    let assembler = GlyphOutlineAssembler::with_face_makers(vec![Box::new(SimpleFaceMaker)]);
    let layout = assembler.build(&square_font(), &unscaled("MO")).unwrap();

    assert!(layout
        .report()
        .strategies
        .iter()
        .all(|used| used.strategy == SimpleFaceMaker.name()));
    assert_eq!(layout.report().strategies.len(), 2);
}

#[test]
fn test_fatal_errors() {
    let font = square_font();

    let zero = ShapeStringParams::new("M", 0.0);
    assert!(matches!(
        build_shape_string(&font, &zero),
        Err(GlyphError::InvalidSize { .. })
    ));

    let nan = ShapeStringParams::new("M", f64::NAN);
    assert!(matches!(
        build_shape_string(&font, &nan),
        Err(GlyphError::InvalidSize { .. })
    ));

    assert!(matches!(
        build_shape_string(&font, &unscaled("")),
        Err(GlyphError::EmptyText)
    ));

    let no_em = OutlineFont::new(0.0)
        .with_glyph('M', 1.0, vec![rect(0.0, 0.0, 1.0, 1.0)])
        .with_glyph('L', 1.0, vec![rect(0.0, 0.0, 1.0, 1.0)]);
    assert!(matches!(
        build_shape_string(&no_em, &unscaled("M")),
        Err(GlyphError::InvalidUnitsPerEm { .. })
    ));

    // no glyph for any character
    assert!(matches!(
        build_shape_string(&font, &unscaled("zz")),
        Err(GlyphError::NoWires { .. })
    ));
}
