use serde::{Deserialize, Serialize};

use crate::geom::{Rect, Size};

/// A source image to be packed: an opaque caller tag plus its pixel rectangle.
///
/// `tag` is echoed back unchanged in the corresponding `Placement`; it is never interpreted by
/// the packer (akin to the reference crate's generic `Frame<K>` key).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceImage<K = String> {
    pub tag: K,
    pub source_rect: Rect,
}

impl<K> SourceImage<K> {
    pub fn new(tag: K, source_rect: Rect) -> Self {
        Self { tag, source_rect }
    }
}

/// A single source image placed inside the atlas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Placement<K = String> {
    pub source: SourceImage<K>,
    pub dest_rect: Rect,
    pub rotated: bool,
}

/// Result of a `try_process` call.
///
/// `is_valid == false` means the search could not find an atlas layout within the configured
/// constraints; `size`/`placements` are meaningless in that case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackResult<K = String> {
    pub size: Size,
    pub placements: Vec<Placement<K>>,
    pub is_valid: bool,
}

impl<K> PackResult<K> {
    pub fn invalid() -> Self {
        Self {
            size: Size::default(),
            placements: Vec::new(),
            is_valid: false,
        }
    }
}

/// Internal summary of an input batch, computed once up front by the atlas planner.
#[derive(Debug, Clone, Copy, Default)]
pub struct PackSummary {
    pub count: usize,
    pub min_w: u32,
    pub min_h: u32,
    pub max_w: u32,
    pub max_h: u32,
    pub total_area: u64,
    pub is_uniform: bool,
}

impl PackSummary {
    pub fn summarize(rects: &[Rect]) -> Self {
        if rects.is_empty() {
            return Self::default();
        }
        let mut min_w = u32::MAX;
        let mut min_h = u32::MAX;
        let mut max_w = 0u32;
        let mut max_h = 0u32;
        let mut total_area = 0u64;
        for r in rects {
            min_w = min_w.min(r.w);
            min_h = min_h.min(r.h);
            max_w = max_w.max(r.w);
            max_h = max_h.max(r.h);
            total_area += r.area();
        }
        let first = rects[0];
        let is_uniform = rects.iter().all(|r| r.w == first.w && r.h == first.h);
        Self {
            count: rects.len(),
            min_w,
            min_h,
            max_w,
            max_h,
            total_area,
            is_uniform,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summarize_detects_uniform() {
        let rects = vec![Rect::new(0, 0, 8, 8), Rect::new(0, 0, 8, 8)];
        let s = PackSummary::summarize(&rects);
        assert!(s.is_uniform);
        assert_eq!(s.total_area, 128);
    }

    #[test]
    fn summarize_detects_non_uniform() {
        let rects = vec![Rect::new(0, 0, 8, 8), Rect::new(0, 0, 4, 4)];
        let s = PackSummary::summarize(&rects);
        assert!(!s.is_uniform);
        assert_eq!(s.min_w, 4);
        assert_eq!(s.max_w, 8);
    }
}
