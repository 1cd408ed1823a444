//! MAXRECTS free-space engine. Maintains a set of axis-aligned free rectangles that
//! may overlap each other but together cover every unused pixel; every placement intersects and
//! re-splits the free rectangles it overlaps, then prunes any free rectangle strictly contained
//! in another.

use crate::config::MaxRectsHeuristic;
use crate::geom::{overlap_1d, Rect};

/// A single rectangle's placement as returned by `insert`/`insert_batch`: the placed rect (in
/// its chosen orientation) and whether it was rotated relative to the input `(w, h)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placed {
    pub rect: Rect,
    pub rotated: bool,
}

pub struct MaxRectsEngine {
    bin_w: u32,
    bin_h: u32,
    allow_rotate: bool,
    used: Vec<Rect>,
    free: Vec<Rect>,
}

impl MaxRectsEngine {
    /// Creates a fresh bin with a single free rectangle covering the whole bin.
    pub fn new(bin_w: u32, bin_h: u32, allow_rotate: bool) -> Self {
        Self {
            bin_w,
            bin_h,
            allow_rotate,
            used: Vec::new(),
            free: vec![Rect::new(0, 0, bin_w, bin_h)],
        }
    }

    /// Re-initializes this engine in place, as if freshly constructed.
    pub fn init(&mut self, bin_w: u32, bin_h: u32, allow_rotate: bool) {
        self.bin_w = bin_w;
        self.bin_h = bin_h;
        self.allow_rotate = allow_rotate;
        self.used.clear();
        self.free.clear();
        self.free.push(Rect::new(0, 0, bin_w, bin_h));
    }

    pub fn free_rects(&self) -> &[Rect] {
        &self.free
    }

    pub fn used_rects(&self) -> &[Rect] {
        &self.used
    }

    /// Ratio of used pixel area to bin area.
    pub fn occupancy(&self) -> f64 {
        let bin_area = self.bin_w as u64 * self.bin_h as u64;
        if bin_area == 0 {
            return 0.0;
        }
        let used_area: u64 = self.used.iter().map(|r| r.area()).sum();
        used_area as f64 / bin_area as f64
    }

    /// Places one `(w, h)` rectangle online. Returns the placed rect, or a degenerate (`h == 0`)
    /// rect if nothing fits.
    pub fn insert(&mut self, w: u32, h: u32, heuristic: MaxRectsHeuristic) -> Rect {
        match self.find_position(w, h, heuristic) {
            Some(placed) => {
                self.place_rect(&placed.rect);
                placed.rect
            }
            None => Rect::new(0, 0, 0, 0),
        }
    }

    /// Offline batch placement: at each step, picks the input rectangle whose best placement
    /// (across every free rectangle and both orientations) has the lowest `(score1, score2)`
    /// pair, places it, and repeats. Returns `(original_index, Placed)` pairs in placement
    /// order; stops (possibly before exhausting `rects`) the first time nothing remaining fits.
    pub fn insert_batch(
        &mut self,
        rects: &[(u32, u32)],
        heuristic: MaxRectsHeuristic,
    ) -> Vec<(usize, Placed)> {
        let mut remaining: Vec<usize> = (0..rects.len()).collect();
        let mut out = Vec::with_capacity(rects.len());

        while !remaining.is_empty() {
            let mut best: Option<(usize, usize, Placed, (i64, i64))> = None;

            for (pos, &idx) in remaining.iter().enumerate() {
                let (w, h) = rects[idx];
                if let Some((placed, score)) = self.best_placement_with_score(w, h, heuristic) {
                    let better = match &best {
                        None => true,
                        Some((_, _, _, best_score)) => score < *best_score,
                    };
                    if better {
                        best = Some((pos, idx, placed, score));
                    }
                }
            }

            match best {
                Some((pos, idx, placed, _)) => {
                    self.place_rect(&placed.rect);
                    out.push((idx, placed));
                    remaining.remove(pos);
                }
                None => break,
            }
        }

        out
    }

    fn score(&self, fr: &Rect, w: u32, h: u32, heuristic: MaxRectsHeuristic) -> (i64, i64) {
        let leftover_h = (fr.w as i64 - w as i64).abs();
        let leftover_v = (fr.h as i64 - h as i64).abs();
        let short_fit = leftover_h.min(leftover_v);
        let long_fit = leftover_h.max(leftover_v);
        let area_fit = fr.w as i64 * fr.h as i64 - w as i64 * h as i64;
        match heuristic {
            MaxRectsHeuristic::BestShortSideFit => (short_fit, long_fit),
            MaxRectsHeuristic::BestLongSideFit => (long_fit, short_fit),
            MaxRectsHeuristic::BestAreaFit => (area_fit, short_fit),
            MaxRectsHeuristic::BottomLeft => (fr.y as i64 + h as i64, fr.x as i64),
            MaxRectsHeuristic::ContactPoint => {
                let contact = self.contact_point_score(fr.x, fr.y, w, h);
                (-(contact as i64), area_fit)
            }
        }
    }

    /// Finds the best free rectangle + orientation for `(w, h)` under `heuristic`, returning the
    /// placement and its `(score1, score2)` pair (for use by `insert_batch`'s cross-input pick).
    fn best_placement_with_score(
        &self,
        w: u32,
        h: u32,
        heuristic: MaxRectsHeuristic,
    ) -> Option<(Placed, (i64, i64))> {
        let mut best: Option<(Placed, (i64, i64))> = None;

        for fr in &self.free {
            if fr.w >= w && fr.h >= h {
                let s = self.score(fr, w, h, heuristic);
                let placed = Placed {
                    rect: Rect::new(fr.x, fr.y, w, h),
                    rotated: false,
                };
                if best.as_ref().map(|(_, bs)| s < *bs).unwrap_or(true) {
                    best = Some((placed, s));
                }
            }
            if self.allow_rotate && fr.w >= h && fr.h >= w {
                let s = self.score(fr, h, w, heuristic);
                let placed = Placed {
                    rect: Rect::new(fr.x, fr.y, h, w),
                    rotated: true,
                };
                if best.as_ref().map(|(_, bs)| s < *bs).unwrap_or(true) {
                    best = Some((placed, s));
                }
            }
        }

        best
    }

    /// Online variant of `best_placement_with_score`: same scoring, plus a bottom-left/leftmost
    /// tie-break and a perfect-fit early exit.
    fn find_position(&self, w: u32, h: u32, heuristic: MaxRectsHeuristic) -> Option<Placed> {
        let mut best_score1 = i64::MAX;
        let mut best_score2 = i64::MAX;
        let mut best_top = u32::MAX;
        let mut best_left = u32::MAX;
        let mut best: Option<Placed> = None;

        for fr in &self.free {
            if fr.w >= w && fr.h >= h {
                let (s1, s2) = self.score(fr, w, h, heuristic);
                let top = fr.y.saturating_add(h);
                if s1 < best_score1
                    || (s1 == best_score1
                        && (s2 < best_score2
                            || (s2 == best_score2
                                && (top < best_top || (top == best_top && fr.x < best_left)))))
                {
                    best_score1 = s1;
                    best_score2 = s2;
                    best_top = top;
                    best_left = fr.x;
                    best = Some(Placed {
                        rect: Rect::new(fr.x, fr.y, w, h),
                        rotated: false,
                    });
                }
                if fr.w == w && fr.h == h {
                    return Some(Placed {
                        rect: Rect::new(fr.x, fr.y, w, h),
                        rotated: false,
                    });
                }
            }
            if self.allow_rotate && fr.w >= h && fr.h >= w {
                let (s1, s2) = self.score(fr, h, w, heuristic);
                let top = fr.y.saturating_add(w);
                if s1 < best_score1
                    || (s1 == best_score1
                        && (s2 < best_score2
                            || (s2 == best_score2
                                && (top < best_top || (top == best_top && fr.x < best_left)))))
                {
                    best_score1 = s1;
                    best_score2 = s2;
                    best_top = top;
                    best_left = fr.x;
                    best = Some(Placed {
                        rect: Rect::new(fr.x, fr.y, h, w),
                        rotated: true,
                    });
                }
                if fr.w == h && fr.h == w {
                    return Some(Placed {
                        rect: Rect::new(fr.x, fr.y, h, w),
                        rotated: true,
                    });
                }
            }
        }

        best
    }

    fn contact_point_score(&self, x: u32, y: u32, w: u32, h: u32) -> u32 {
        let mut score = 0u32;
        if x == 0 {
            score += h;
        }
        if y == 0 {
            score += w;
        }
        if x + w == self.bin_w {
            score += h;
        }
        if y + h == self.bin_h {
            score += w;
        }

        for u in &self.used {
            if x == u.x + u.w || u.x == x + w {
                score += overlap_1d(y, y + h, u.y, u.y + u.h);
            }
            if y == u.y + u.h || u.y == y + h {
                score += overlap_1d(x, x + w, u.x, u.x + u.w);
            }
        }
        score
    }

    /// `SplitFreeNode` + `PruneFreeList`: split every free rectangle the placement
    /// intersects into up to four residual slabs, then drop any free rectangle strictly
    /// contained in another.
    fn place_rect(&mut self, node: &Rect) {
        let mut new_free: Vec<Rect> = Vec::new();
        let mut i = 0usize;
        while i < self.free.len() {
            let fr = self.free[i];
            if fr.intersects(node) {
                self.free.swap_remove(i);
                self.split_free_node(fr, node, &mut new_free);
            } else {
                i += 1;
            }
        }
        self.free.extend(new_free);
        self.prune_free_list();
        self.used.push(*node);
    }

    fn split_free_node(&self, fr: Rect, node: &Rect, out: &mut Vec<Rect>) {
        let fr_x2 = fr.right_ex();
        let fr_y2 = fr.bottom_ex();
        let n_x2 = node.right_ex();
        let n_y2 = node.bottom_ex();

        if node.x > fr.x && node.x < fr_x2 {
            out.push(Rect::new(fr.x, fr.y, node.x - fr.x, fr.h));
        }
        if n_x2 < fr_x2 {
            out.push(Rect::new(n_x2, fr.y, fr_x2 - n_x2, fr.h));
        }
        if node.y > fr.y && node.y < fr_y2 {
            out.push(Rect::new(fr.x, fr.y, fr.w, node.y - fr.y));
        }
        if n_y2 < fr_y2 {
            out.push(Rect::new(fr.x, n_y2, fr.w, fr_y2 - n_y2));
        }
    }

    fn prune_free_list(&mut self) {
        let mut i = 0;
        while i < self.free.len() {
            let mut j = i + 1;
            let a = self.free[i];
            let mut remove_i = false;
            while j < self.free.len() {
                let b = self.free[j];
                if a.contains(&b) {
                    self.free.remove(j);
                    continue;
                }
                if b.contains(&a) {
                    remove_i = true;
                    break;
                }
                j += 1;
            }
            if remove_i {
                self.free.remove(i);
            } else {
                i += 1;
            }
        }
    }
}
