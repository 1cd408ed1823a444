//! Candidate atlas-size enumeration. The atlas planner asks this module for the
//! sequence of bin sizes worth trying before falling back to its own growth loop.

use crate::config::TextureSizeRestriction;

/// Smallest power of two that is `>= v`. `next_pow2(0) == 1`.
pub fn next_pow2(v: u32) -> u32 {
    if v <= 1 {
        return 1;
    }
    1u32 << (32 - (v - 1).leading_zeros())
}

/// Integer ceiling division; panics on division by zero like `/`.
pub fn ceil_div(a: u32, b: u32) -> u32 {
    (a + b - 1) / b
}

/// Smallest `(w, h)` with `w*h >= total_area` and `w >= min_w`, `h >= min_h`, honoring
/// `restriction`. Used as a lower-bound starting point before enumerating candidates.
pub fn calc_minimum_texture_size(
    total_area: u64,
    min_w: u32,
    min_h: u32,
    restriction: TextureSizeRestriction,
) -> (u32, u32) {
    match restriction {
        TextureSizeRestriction::Any => {
            let side = (total_area as f64).sqrt().ceil() as u32;
            (side.max(min_w), side.max(min_h))
        }
        TextureSizeRestriction::Pow2 => {
            let w = next_pow2(min_w.max(1));
            let mut h = next_pow2(min_h.max(1));
            while (w as u64) * (h as u64) < total_area {
                h = next_pow2(h + 1);
            }
            (w, h)
        }
        TextureSizeRestriction::Pow2Square => {
            let mut side = next_pow2(min_w.max(min_h).max(1));
            while (side as u64) * (side as u64) < total_area {
                side = next_pow2(side + 1);
            }
            (side, side)
        }
    }
}

/// Enumerates candidate power-of-two atlas sizes, in ascending area order, not exceeding
/// `(max_w, max_h)` and respecting `restriction`'s squareness constraint. The atlas planner
/// tries each in turn before falling back to its `Any`-restriction growth loop.
///
/// Walks a square-doubling sequence `s, 2s, 4s, ...` starting from the minimum side; at each
/// step also considers the two non-square variants `(2s, s)` and `(s, 2s)` when they fit within
/// bounds. This is not a full `w x h` cross product — it only ever tries sizes one doubling
/// apart on the two axes.
pub fn enqueue_potential_pow2_texture_sizes(
    min_w: u32,
    min_h: u32,
    max_w: u32,
    max_h: u32,
    restriction: TextureSizeRestriction,
) -> Vec<(u32, u32)> {
    let mut out = Vec::new();
    if restriction == TextureSizeRestriction::Any {
        return out;
    }

    let start_w = next_pow2(min_w.max(1));
    let start_h = next_pow2(min_h.max(1));

    if restriction == TextureSizeRestriction::Pow2Square {
        let mut side = start_w.max(start_h);
        while side <= max_w && side <= max_h {
            out.push((side, side));
            side *= 2;
        }
        return out;
    }

    let max_w = max_w as u64;
    let max_h = max_h as u64;
    let mut s = start_w.max(start_h) as u64;
    while s <= max_w.max(max_h) {
        if s <= max_w && s <= max_h {
            out.push((s as u32, s as u32));
        }
        let two_s = s * 2;
        if two_s <= max_w && s <= max_h {
            out.push((two_s as u32, s as u32));
        }
        if s <= max_w && two_s <= max_h {
            out.push((s as u32, two_s as u32));
        }
        s = two_s;
    }
    out.sort_by_key(|&(w, h)| w as u64 * h as u64);
    out
}
