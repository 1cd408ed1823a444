use texture_bin_packer::prelude::*;

fn sample_images() -> Vec<SourceImage<String>> {
    vec![
        SourceImage::new("a".to_string(), Rect::new(0, 0, 64, 32)),
        SourceImage::new("b".to_string(), Rect::new(0, 0, 32, 32)),
        SourceImage::new("c".to_string(), Rect::new(0, 0, 16, 48)),
        SourceImage::new("d".to_string(), Rect::new(0, 0, 16, 16)),
        SourceImage::new("e".to_string(), Rect::new(0, 0, 48, 16)),
    ]
}

#[test]
fn try_process_is_deterministic_across_repeated_calls() {
    let packer = TextureBinPacker::new(
        512,
        512,
        TextureSizeRestriction::Any,
        true,
        Thickness::default(),
    );
    let images = sample_images();

    let first = packer.try_process(&images).unwrap();
    for _ in 0..5 {
        let next = packer.try_process(&images).unwrap();
        assert_eq!(first.size, next.size);
        let a: Vec<(Rect, bool)> = first
            .placements
            .iter()
            .map(|p| (p.dest_rect, p.rotated))
            .collect();
        let b: Vec<(Rect, bool)> = next
            .placements
            .iter()
            .map(|p| (p.dest_rect, p.rotated))
            .collect();
        assert_eq!(a, b);
    }
}

#[test]
fn output_order_follows_descending_area_with_composite_tie_break() {
    let packer = TextureBinPacker::new(
        512,
        512,
        TextureSizeRestriction::Any,
        false,
        Thickness::default(),
    );
    let images = sample_images();
    let result = packer.try_process(&images).unwrap();
    let tags: Vec<&str> = result
        .placements
        .iter()
        .map(|p| p.source.tag.as_str())
        .collect();
    // a=2048, b=1024, c=e=768 (c's h*16384+w beats e's), d=256
    assert_eq!(tags, vec!["a", "b", "c", "e", "d"]);
}
