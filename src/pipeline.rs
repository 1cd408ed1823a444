//! Atlas planner: the top-level search that turns a batch of `SourceImage`s into a single
//! enclosing `PackResult`. Sorts and summarizes the input once, then tries a uniform-
//! grid fast path or the general multi-heuristic MAXRECTS path across a sequence of candidate
//! atlas sizes produced by `size_planner`.

use tracing::{debug, instrument, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::{MaxRectsHeuristic, TextureBinPackerConfig, TextureSizeRestriction};
use crate::error::{Result, TexPackerError};
use crate::geom::{Rect, Thickness};
use crate::model::{PackResult, PackSummary, Placement, SourceImage};
use crate::packer::maxrects::MaxRectsEngine;
use crate::size_planner::{calc_minimum_texture_size, enqueue_potential_pow2_texture_sizes};

/// Top-level single-bin packer. Owns only configuration; engines are created fresh per trial.
#[derive(Debug, Clone)]
pub struct TextureBinPacker {
    config: TextureBinPackerConfig,
}

impl TextureBinPacker {
    /// Flattened convenience constructor. Panics are never used for misconfiguration;
    /// call `validate()` (or `with_config`) if you need to surface it as a `Result`.
    pub fn new(
        max_width: u32,
        max_height: u32,
        restriction: TextureSizeRestriction,
        allow_rotation: bool,
        border: Thickness,
    ) -> Self {
        Self {
            config: TextureBinPackerConfig {
                max_width,
                max_height,
                restriction,
                allow_rotation,
                border,
            },
        }
    }

    /// General constructor taking a full `TextureBinPackerConfig`.
    pub fn with_config(config: TextureBinPackerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TextureBinPackerConfig {
        &self.config
    }

    /// Searches for a single enclosing atlas layout containing every entry in `images`.
    ///
    /// An empty `images` is not an error: it returns a valid, empty `PackResult` sized to the
    /// configured border alone. `Err` is reserved for invalid configuration; search exhaustion
    /// ("no atlas size fits") is reported as `PackResult::is_valid == false`, not an error.
    #[instrument(skip_all, fields(count = images.len()))]
    pub fn try_process<K: Clone>(&self, images: &[SourceImage<K>]) -> Result<PackResult<K>> {
        self.config.validate()?;

        // Stable sort by descending area, tie-broken by a composite (h*16384 + w) priority so
        // equal-area rectangles still land in a deterministic order.
        let mut order: Vec<usize> = (0..images.len()).collect();
        order.sort_by(|&a, &b| {
            let ra = &images[a].source_rect;
            let rb = &images[b].source_rect;
            let key = |r: &Rect| (r.area(), r.h as u64 * 16384 + r.w as u64);
            key(rb).cmp(&key(ra))
        });
        let sorted: Vec<&SourceImage<K>> = order.iter().map(|&i| &images[i]).collect();

        let rects: Vec<Rect> = sorted.iter().map(|s| s.source_rect).collect();
        let summary = PackSummary::summarize(&rects);

        if summary.total_area == 0 {
            debug!("all inputs degenerate, returning zero-area atlas");
            let size = crate::geom::Size::new(
                self.config.border.sum_x().max(1),
                self.config.border.sum_y().max(1),
            );
            let placements = sorted
                .iter()
                .map(|s| Placement {
                    source: (*s).clone(),
                    dest_rect: Rect::new(0, 0, 0, 0),
                    rotated: false,
                })
                .collect();
            return Ok(PackResult {
                size,
                placements,
                is_valid: true,
            });
        }

        // Degenerate entries (w==0 || h==0) never reach the engine; they get a zero dest_rect
        // spliced back in at their post-sort position.
        let non_degenerate: Vec<usize> = (0..sorted.len())
            .filter(|&i| !rects[i].is_degenerate())
            .collect();
        let packable_rects: Vec<Rect> = non_degenerate.iter().map(|&i| rects[i]).collect();

        let outcome = if summary.is_uniform && !packable_rects.is_empty() {
            self.try_uniform_path(&packable_rects)
                .or_else(|| self.try_general_path(&packable_rects))
        } else {
            self.try_general_path(&packable_rects)
        };

        let Some((size, dest_for_packable)) = outcome else {
            debug!("no candidate atlas size produced a valid packing");
            return Ok(PackResult::invalid());
        };

        let mut dest: Vec<Option<(Rect, bool)>> = vec![None; sorted.len()];
        for (slot, &orig_idx) in non_degenerate.iter().enumerate() {
            dest[orig_idx] = Some(dest_for_packable[slot]);
        }

        let placements = sorted
            .iter()
            .zip(dest)
            .map(|(s, d)| {
                let (rect, rotated) = d.unwrap_or((Rect::new(0, 0, 0, 0), false));
                Placement {
                    source: (*s).clone(),
                    dest_rect: rect,
                    rotated,
                }
            })
            .collect();

        debug!(width = size.w, height = size.h, "packing succeeded");
        Ok(PackResult {
            size,
            placements,
            is_valid: true,
        })
    }

    /// Every input is the same size: try each candidate size's column/row grid capacity before
    /// falling back to the general path's engine-driven search.
    fn try_uniform_path(&self, rects: &[Rect]) -> Option<(crate::geom::Size, Vec<(Rect, bool)>)> {
        let (w, h) = (rects[0].w, rects[0].h);
        let n = rects.len() as u64;

        for (cw, ch) in self.candidate_sizes(rects) {
            let (usable_w, usable_h) = self.usable_interior(cw, ch);
            if usable_w < w || usable_h < h {
                continue;
            }
            let cols = usable_w / w;
            let rows = usable_h / h;
            if (cols as u64) * (rows as u64) >= n {
                trace!(cw, ch, cols, rows, "uniform grid fits");
                let placements = (0..rects.len())
                    .map(|i| {
                        let col = i as u32 % cols;
                        let row = i as u32 / cols;
                        (
                            Rect::new(
                                self.config.border.left + col * w,
                                self.config.border.top + row * h,
                                w,
                                h,
                            ),
                            false,
                        )
                    })
                    .collect();
                return Some((crate::geom::Size::new(cw, ch), placements));
            }
        }
        None
    }

    /// General path: try the five MAXRECTS heuristics, in the fixed order defined by MaxRectsHeuristic::SEARCH_ORDER, for each
    /// candidate size; return the first full-batch success.
    fn try_general_path(&self, rects: &[Rect]) -> Option<(crate::geom::Size, Vec<(Rect, bool)>)> {
        if rects.is_empty() {
            return Some((
                crate::geom::Size::new(
                    self.config.border.sum_x().max(1),
                    self.config.border.sum_y().max(1),
                ),
                Vec::new(),
            ));
        }

        let mut sizes = self.candidate_sizes(rects);

        if self.config.restriction == TextureSizeRestriction::Any {
            let total_area: u64 = rects.iter().map(|r| r.area()).sum();
            let mut min_area = total_area;
            loop {
                if let Some(result) = self.try_sizes(&sizes, rects) {
                    return Some(result);
                }

                let missing = self.estimate_missing_area(&sizes, rects);
                let step = (missing / 10).max(1);
                min_area += step;

                let min_w = rects.iter().map(|r| r.w).max().unwrap_or(1);
                let min_h = rects.iter().map(|r| r.h).max().unwrap_or(1);
                let (w, h) = calc_minimum_texture_size(
                    min_area,
                    min_w,
                    min_h,
                    self.config.restriction,
                );
                if w > self.config.max_width || h > self.config.max_height {
                    return None;
                }
                sizes = vec![(w.min(self.config.max_width), h.min(self.config.max_height))];
            }
        }

        self.try_sizes(&sizes, rects)
    }

    #[cfg(not(feature = "parallel"))]
    fn try_sizes(
        &self,
        sizes: &[(u32, u32)],
        rects: &[Rect],
    ) -> Option<(crate::geom::Size, Vec<(Rect, bool)>)> {
        sizes.iter().find_map(|&(w, h)| self.try_size(w, h, rects))
    }

    #[cfg(feature = "parallel")]
    fn try_sizes(
        &self,
        sizes: &[(u32, u32)],
        rects: &[Rect],
    ) -> Option<(crate::geom::Size, Vec<(Rect, bool)>)> {
        // Independent trials, no shared state: evaluate concurrently and take the first success
        // in candidate-size order, matching the sequential result.
        let results: Vec<Option<(crate::geom::Size, Vec<(Rect, bool)>)>> = sizes
            .par_iter()
            .map(|&(w, h)| self.try_size(w, h, rects))
            .collect();
        results.into_iter().flatten().next()
    }

    fn try_size(
        &self,
        cw: u32,
        ch: u32,
        rects: &[Rect],
    ) -> Option<(crate::geom::Size, Vec<(Rect, bool)>)> {
        let (usable_w, usable_h) = self.usable_interior(cw, ch);
        debug!(cw, ch, "trying candidate atlas size");

        for &heuristic in MaxRectsHeuristic::SEARCH_ORDER.iter() {
            trace!(?heuristic, "trying heuristic");
            let mut engine = MaxRectsEngine::new(usable_w, usable_h, self.config.allow_rotation);
            let batch: Vec<(u32, u32)> = rects.iter().map(|r| (r.w, r.h)).collect();
            let placed = engine.insert_batch(&batch, heuristic);
            if placed.len() == rects.len() {
                let mut dest = vec![(Rect::new(0, 0, 0, 0), false); rects.len()];
                for (idx, p) in placed {
                    dest[idx] = (
                        Rect::new(
                            p.rect.x + self.config.border.left,
                            p.rect.y + self.config.border.top,
                            p.rect.w,
                            p.rect.h,
                        ),
                        p.rotated,
                    );
                }
                return Some((crate::geom::Size::new(cw, ch), dest));
            }
        }
        None
    }

    fn usable_interior(&self, w: u32, h: u32) -> (u32, u32) {
        (
            w.saturating_sub(self.config.border.sum_x()),
            h.saturating_sub(self.config.border.sum_y()),
        )
    }

    fn candidate_sizes(&self, rects: &[Rect]) -> Vec<(u32, u32)> {
        let min_w = rects.iter().map(|r| r.w).max().unwrap_or(1);
        let min_h = rects.iter().map(|r| r.h).max().unwrap_or(1);
        let total_area: u64 = rects.iter().map(|r| r.area()).sum();

        if self.config.restriction == TextureSizeRestriction::Any {
            let (w, h) =
                calc_minimum_texture_size(total_area, min_w, min_h, self.config.restriction);
            return vec![(w.min(self.config.max_width), h.min(self.config.max_height))];
        }

        enqueue_potential_pow2_texture_sizes(
            min_w,
            min_h,
            self.config.max_width,
            self.config.max_height,
            self.config.restriction,
        )
    }

    fn estimate_missing_area(&self, sizes: &[(u32, u32)], rects: &[Rect]) -> u64 {
        // Best-effort estimate of the area still unplaced at the largest tried candidate: run
        // the cheapest heuristic once more and sum what failed to land.
        let &(cw, ch) = sizes.last().unwrap_or(&(1, 1));
        let (usable_w, usable_h) = self.usable_interior(cw, ch);
        let mut engine = MaxRectsEngine::new(usable_w, usable_h, self.config.allow_rotation);
        let batch: Vec<(u32, u32)> = rects.iter().map(|r| (r.w, r.h)).collect();
        let placed = engine.insert_batch(&batch, MaxRectsHeuristic::BestAreaFit);
        let placed_area: u64 = placed.iter().map(|(_, p)| p.rect.area()).sum();
        let total_area: u64 = rects.iter().map(|r| r.area()).sum();
        total_area.saturating_sub(placed_area).max(1)
    }
}
