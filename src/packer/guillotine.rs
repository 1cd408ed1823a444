//! Guillotine free-space engine. Unlike MAXRECTS, each placement performs exactly
//! one straight-line split of the free rectangle it lands in, producing a bottom and a right
//! residual; an O(n^2) pairwise merge pass then recombines adjacent free rectangles back into
//! larger ones where possible.

use crate::config::{GuillotineChoice, GuillotineSplit};
use crate::geom::Rect;

/// A single rectangle's placement as returned by `insert`/`insert_batch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placed {
    pub rect: Rect,
    pub rotated: bool,
}

pub struct GuillotineEngine {
    bin_w: u32,
    bin_h: u32,
    allow_rotate: bool,
    free: Vec<Rect>,
    used: Vec<Rect>,
}

impl GuillotineEngine {
    pub fn new(bin_w: u32, bin_h: u32, allow_rotate: bool) -> Self {
        Self {
            bin_w,
            bin_h,
            allow_rotate,
            free: vec![Rect::new(0, 0, bin_w, bin_h)],
            used: Vec::new(),
        }
    }

    pub fn init(&mut self, bin_w: u32, bin_h: u32, allow_rotate: bool) {
        self.bin_w = bin_w;
        self.bin_h = bin_h;
        self.allow_rotate = allow_rotate;
        self.free.clear();
        self.free.push(Rect::new(0, 0, bin_w, bin_h));
        self.used.clear();
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

    /// Places one `(w, h)` rectangle online under `choice`/`split`, optionally defragmenting the
    /// free list with `merge_free_list` afterward. Returns the placed rect, or a degenerate rect
    /// if nothing fits.
    pub fn insert(
        &mut self,
        w: u32,
        h: u32,
        choice: GuillotineChoice,
        split: GuillotineSplit,
        merge: bool,
    ) -> Rect {
        match self.choose(w, h, choice) {
            Some((idx, rect, _rotated, _score)) => {
                self.place(idx, &rect, split, merge);
                rect
            }
            None => Rect::new(0, 0, 0, 0),
        }
    }

    /// Offline batch placement: at each step, scores every `(free rectangle, remaining input,
    /// orientation)` combination and places the global minimum (a perfect fit short-circuits with
    /// `score = i64::MIN`), mirroring `MaxRectsEngine::insert_batch`. Returns `(original_index,
    /// Placed)` pairs in placement order; stops (possibly before exhausting `rects`) the first
    /// time nothing remaining fits.
    pub fn insert_batch(
        &mut self,
        rects: &[(u32, u32)],
        choice: GuillotineChoice,
        split: GuillotineSplit,
        merge: bool,
    ) -> Vec<(usize, Placed)> {
        let mut remaining: Vec<usize> = (0..rects.len()).collect();
        let mut out = Vec::with_capacity(rects.len());

        while !remaining.is_empty() {
            let mut best: Option<(usize, usize, usize, Rect, bool, i64)> = None;

            for (pos, &idx) in remaining.iter().enumerate() {
                let (w, h) = rects[idx];
                if let Some((free_idx, rect, rotated, score)) = self.choose(w, h, choice) {
                    let better = match &best {
                        None => true,
                        Some((.., best_score)) => score < *best_score,
                    };
                    if better {
                        best = Some((pos, idx, free_idx, rect, rotated, score));
                    }
                }
            }

            match best {
                Some((pos, idx, free_idx, rect, rotated, _)) => {
                    self.place(free_idx, &rect, split, merge);
                    out.push((idx, Placed { rect, rotated }));
                    remaining.remove(pos);
                }
                None => break,
            }
        }

        out
    }

    fn score(choice: GuillotineChoice, fr: &Rect, w: u32, h: u32) -> i64 {
        if fr.w == w && fr.h == h {
            return i64::MIN;
        }
        let area_fit = fr.w as i64 * fr.h as i64 - w as i64 * h as i64;
        let leftover_h = fr.w as i64 - w as i64;
        let leftover_v = fr.h as i64 - h as i64;
        let short_fit = leftover_h.abs().min(leftover_v.abs());
        let long_fit = leftover_h.abs().max(leftover_v.abs());
        match choice {
            GuillotineChoice::BestAreaFit => area_fit,
            GuillotineChoice::BestShortSideFit => short_fit,
            GuillotineChoice::BestLongSideFit => long_fit,
            GuillotineChoice::WorstAreaFit => -area_fit,
            GuillotineChoice::WorstShortSideFit => -short_fit,
            GuillotineChoice::WorstLongSideFit => -long_fit,
        }
    }

    /// Finds the best free rectangle + orientation for `(w, h)` under `choice`, returning its
    /// index, the placed rect, whether it was rotated, and its score (for `insert_batch`'s
    /// cross-input pick). A perfect fit in either orientation scores `i64::MIN` and wins outright.
    fn choose(&self, w: u32, h: u32, choice: GuillotineChoice) -> Option<(usize, Rect, bool, i64)> {
        let mut best_idx = None;
        let mut best_score = i64::MAX;
        let mut best_rect = Rect::new(0, 0, 0, 0);
        let mut best_rot = false;

        for (i, fr) in self.free.iter().enumerate() {
            if fr.w >= w && fr.h >= h {
                let s = Self::score(choice, fr, w, h);
                if s < best_score {
                    best_score = s;
                    best_idx = Some(i);
                    best_rect = Rect::new(fr.x, fr.y, w, h);
                    best_rot = false;
                }
            }
            if self.allow_rotate && fr.w >= h && fr.h >= w {
                let s = Self::score(choice, fr, h, w);
                if s < best_score {
                    best_score = s;
                    best_idx = Some(i);
                    best_rect = Rect::new(fr.x, fr.y, h, w);
                    best_rot = true;
                }
            }
        }

        best_idx.map(|idx| (idx, best_rect, best_rot, best_score))
    }

    /// Splits free rectangle `fr` around `placed` along the axis `split` picks, producing a
    /// bottom residual and a right residual (either may be empty and dropped).
    fn split(&self, split: GuillotineSplit, fr: &Rect, placed: &Rect) -> (Option<Rect>, Option<Rect>) {
        let w_right = (fr.x + fr.w).saturating_sub(placed.x + placed.w);
        let h_bottom = (fr.y + fr.h).saturating_sub(placed.y + placed.h);

        let split_horizontal = match split {
            GuillotineSplit::ShorterLeftoverAxis => h_bottom < w_right,
            GuillotineSplit::LongerLeftoverAxis => h_bottom > w_right,
            GuillotineSplit::MinimizeArea => (w_right * fr.h) <= (fr.w * h_bottom),
            GuillotineSplit::MaximizeArea => (w_right * fr.h) >= (fr.w * h_bottom),
            GuillotineSplit::ShorterAxis => fr.h < fr.w,
            GuillotineSplit::LongerAxis => fr.h > fr.w,
        };

        let mut bottom = Rect::new(fr.x, placed.y + placed.h, 0, fr.h.saturating_sub(placed.h));
        let mut right = Rect::new(placed.x + placed.w, fr.y, fr.w.saturating_sub(placed.w), 0);
        if split_horizontal {
            bottom.w = fr.w;
            right.h = placed.h;
        } else {
            bottom.w = placed.w;
            right.h = fr.h;
        }

        let r1 = if bottom.w > 0 && bottom.h > 0 {
            Some(bottom)
        } else {
            None
        };
        let r2 = if right.w > 0 && right.h > 0 {
            Some(right)
        } else {
            None
        };
        (r1, r2)
    }

    fn place(&mut self, idx: usize, placed: &Rect, split: GuillotineSplit, merge: bool) {
        let fr = self.free[idx];
        self.free.swap_remove(idx);
        let (a, b) = self.split(split, &fr, placed);
        if let Some(r) = a {
            self.free.push(r);
        }
        if let Some(r) = b {
            self.free.push(r);
        }
        self.prune_free_list();
        if merge {
            self.merge_free_list();
        }
        self.used.push(*placed);
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

    /// Repeated pairwise merge of free rectangles sharing an edge along one full side. Misses
    /// three-way merges that only become axis-aligned rectangles once combined.
    fn merge_free_list(&mut self) {
        let mut merged = true;
        while merged {
            merged = false;
            'outer: for i in 0..self.free.len() {
                for j in i + 1..self.free.len() {
                    let a = self.free[i];
                    let b = self.free[j];
                    if a.y == b.y && a.h == b.h {
                        if a.x + a.w == b.x {
                            self.free[i] = Rect::new(a.x, a.y, a.w + b.w, a.h);
                            self.free.remove(j);
                            merged = true;
                            break 'outer;
                        } else if b.x + b.w == a.x {
                            self.free[i] = Rect::new(b.x, a.y, a.w + b.w, a.h);
                            self.free.remove(j);
                            merged = true;
                            break 'outer;
                        }
                    }
                    if a.x == b.x && a.w == b.w {
                        if a.y + a.h == b.y {
                            self.free[i] = Rect::new(a.x, a.y, a.w, a.h + b.h);
                            self.free.remove(j);
                            merged = true;
                            break 'outer;
                        } else if b.y + b.h == a.y {
                            self.free[i] = Rect::new(a.x, b.y, a.w, a.h + b.h);
                            self.free.remove(j);
                            merged = true;
                            break 'outer;
                        }
                    }
                }
            }
        }
    }
}
