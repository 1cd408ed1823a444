//! Free-space engines. Both maintain bin state (used + free rectangles) and are created fresh
//! per trial by the atlas planner; neither engine knows about candidate-size search or tags —
//! that lives one layer up in `pipeline`.

pub mod guillotine;
pub mod maxrects;
