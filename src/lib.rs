//! Single-bin rectangle packer for texture atlases.
//!
//! - Algorithms: `MaxRectsEngine` (BSSF/BLSF/BAF/BL/CP) and `GuillotineEngine` (choice + split
//!   heuristics, with free-rect merge).
//! - `TextureBinPacker::try_process` searches candidate atlas sizes and heuristics and returns a
//!   single enclosing layout for the whole input batch.
//! - Data model is serde-serializable; image decoding, blitting, file I/O and metadata export are
//!   the caller's concern, not this crate's.
//!
//! Quick example:
//! ```
//! use texture_bin_packer::prelude::*;
//!
//! let packer = TextureBinPacker::new(4096, 4096, TextureSizeRestriction::Any, true, Thickness::default());
//! let inputs = vec![
//!     SourceImage::new("sprite_a".to_string(), Rect::new(0, 0, 32, 32)),
//!     SourceImage::new("sprite_b".to_string(), Rect::new(0, 0, 16, 16)),
//! ];
//! let result = packer.try_process(&inputs).unwrap();
//! assert!(result.is_valid);
//! ```

pub mod config;
pub mod error;
pub mod geom;
pub mod model;
pub mod packer;
pub mod pipeline;
pub mod size_planner;
pub mod verify;

pub use config::*;
pub use error::*;
pub use geom::*;
pub use model::*;
pub use pipeline::*;

/// Convenience prelude for common types and functions.
/// Importing `texture_bin_packer::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::config::{
        GuillotineChoice, GuillotineSplit, MaxRectsHeuristic, TextureBinPackerConfig,
        TextureBinPackerConfigBuilder, TextureSizeRestriction,
    };
    pub use crate::error::{Result, TexPackerError};
    pub use crate::geom::{Point, Rect, Size, Thickness};
    pub use crate::model::{PackResult, Placement, SourceImage};
    pub use crate::packer::guillotine::GuillotineEngine;
    pub use crate::packer::maxrects::MaxRectsEngine;
    pub use crate::pipeline::TextureBinPacker;
}
