use texture_bin_packer::prelude::*;

#[test]
fn empty_input_returns_a_valid_border_sized_empty_atlas() {
    let packer = TextureBinPacker::new(
        1024,
        1024,
        TextureSizeRestriction::Any,
        false,
        Thickness::default(),
    );
    let images: Vec<SourceImage<String>> = Vec::new();
    let result = packer.try_process(&images).unwrap();
    assert!(result.is_valid);
    assert!(result.placements.is_empty());
    assert_eq!(result.size, Size::new(1, 1));
}

#[test]
fn single_square_any_restriction_no_border_no_rotate() {
    let packer = TextureBinPacker::new(
        1024,
        1024,
        TextureSizeRestriction::Any,
        false,
        Thickness::default(),
    );
    let images = vec![SourceImage::new("only".to_string(), Rect::new(0, 0, 10, 10))];
    let result = packer.try_process(&images).unwrap();
    assert!(result.is_valid);
    assert_eq!(result.size, Size::new(10, 10));
    assert_eq!(result.placements[0].dest_rect, Rect::new(0, 0, 10, 10));
    assert!(!result.placements[0].rotated);
}

#[test]
fn four_uniform_squares_pow2_square_pack_into_tight_quad() {
    let packer = TextureBinPacker::new(
        1024,
        1024,
        TextureSizeRestriction::Pow2Square,
        false,
        Thickness::default(),
    );
    let images = vec![
        SourceImage::new("tl".to_string(), Rect::new(0, 0, 8, 8)),
        SourceImage::new("tr".to_string(), Rect::new(0, 0, 8, 8)),
        SourceImage::new("bl".to_string(), Rect::new(0, 0, 8, 8)),
        SourceImage::new("br".to_string(), Rect::new(0, 0, 8, 8)),
    ];
    let result = packer.try_process(&images).unwrap();
    assert!(result.is_valid);
    assert_eq!(result.size, Size::new(16, 16));
    let mut dests: Vec<Rect> = result.placements.iter().map(|p| p.dest_rect).collect();
    dests.sort_by_key(|r| (r.y, r.x));
    assert_eq!(
        dests,
        vec![
            Rect::new(0, 0, 8, 8),
            Rect::new(8, 0, 8, 8),
            Rect::new(0, 8, 8, 8),
            Rect::new(8, 8, 8, 8),
        ]
    );
}

#[test]
fn oversized_rect_under_small_pow2_cap_yields_invalid_not_error() {
    let packer = TextureBinPacker::new(
        10,
        10,
        TextureSizeRestriction::Pow2,
        false,
        Thickness::default(),
    );
    let images = vec![SourceImage::new("too_big".to_string(), Rect::new(0, 0, 11, 5))];
    let result = packer.try_process(&images).unwrap();
    assert!(!result.is_valid);
}

#[test]
fn maxrects_engine_splits_and_prunes_as_a_single_insertion() {
    let mut engine = MaxRectsEngine::new(100, 100, false);
    let placed = engine.insert(40, 40, MaxRectsHeuristic::BestAreaFit);
    assert_eq!(placed, Rect::new(0, 0, 40, 40));
    assert_eq!(engine.free_rects().len(), 2);
    assert!(engine.free_rects().contains(&Rect::new(40, 0, 60, 100)));
    assert!(engine.free_rects().contains(&Rect::new(0, 40, 100, 60)));
}

#[test]
fn maxrects_engine_no_fit_is_a_degenerate_rect_not_a_panic() {
    let mut engine = MaxRectsEngine::new(10, 10, false);
    let placed = engine.insert(11, 5, MaxRectsHeuristic::BestAreaFit);
    assert!(placed.is_degenerate());
}
