use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{Result, TexPackerError};
use crate::geom::Thickness;

/// Constrains admissible atlas dimensions chosen by the size planner.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TextureSizeRestriction {
    /// No constraint beyond the configured maximum.
    Any,
    /// Both sides must be a power of two.
    Pow2,
    /// Both sides must be a power of two and equal.
    Pow2Square,
}

impl FromStr for TextureSizeRestriction {
    type Err = TexPackerError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "any" => Ok(Self::Any),
            "pow2" => Ok(Self::Pow2),
            "pow2square" | "pow2_square" => Ok(Self::Pow2Square),
            other => Err(TexPackerError::UnsupportedOption(format!(
                "unknown texture size restriction: {other}"
            ))),
        }
    }
}

/// MAXRECTS placement heuristics.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MaxRectsHeuristic {
    BestShortSideFit,
    BestLongSideFit,
    BestAreaFit,
    BottomLeft,
    ContactPoint,
}

impl MaxRectsHeuristic {
    /// The fixed order the atlas planner's general path tries heuristics in.
    pub const SEARCH_ORDER: [MaxRectsHeuristic; 5] = [
        MaxRectsHeuristic::BestShortSideFit,
        MaxRectsHeuristic::BestLongSideFit,
        MaxRectsHeuristic::BottomLeft,
        MaxRectsHeuristic::ContactPoint,
        MaxRectsHeuristic::BestAreaFit,
    ];
}

impl FromStr for MaxRectsHeuristic {
    type Err = TexPackerError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "bssf" | "bestshortsidefit" => Ok(Self::BestShortSideFit),
            "blsf" | "bestlongsidefit" => Ok(Self::BestLongSideFit),
            "baf" | "bestareafit" => Ok(Self::BestAreaFit),
            "bl" | "bottomleft" => Ok(Self::BottomLeft),
            "cp" | "contactpoint" => Ok(Self::ContactPoint),
            other => Err(TexPackerError::UnsupportedOption(format!(
                "unknown MaxRects heuristic: {other}"
            ))),
        }
    }
}

/// Guillotine free-rect choice heuristics.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GuillotineChoice {
    BestAreaFit,
    BestShortSideFit,
    BestLongSideFit,
    WorstAreaFit,
    WorstShortSideFit,
    WorstLongSideFit,
}

impl FromStr for GuillotineChoice {
    type Err = TexPackerError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "baf" | "bestareafit" => Ok(Self::BestAreaFit),
            "bssf" | "bestshortsidefit" => Ok(Self::BestShortSideFit),
            "blsf" | "bestlongsidefit" => Ok(Self::BestLongSideFit),
            "waf" | "worstareafit" => Ok(Self::WorstAreaFit),
            "wssf" | "worstshortsidefit" => Ok(Self::WorstShortSideFit),
            "wlsf" | "worstlongsidefit" => Ok(Self::WorstLongSideFit),
            other => Err(TexPackerError::UnsupportedOption(format!(
                "unknown Guillotine choice heuristic: {other}"
            ))),
        }
    }
}

/// Guillotine split-axis heuristics.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GuillotineSplit {
    ShorterLeftoverAxis,
    LongerLeftoverAxis,
    MinimizeArea,
    MaximizeArea,
    ShorterAxis,
    LongerAxis,
}

impl FromStr for GuillotineSplit {
    type Err = TexPackerError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "slas" | "shorterleftoveraxis" => Ok(Self::ShorterLeftoverAxis),
            "llas" | "longerleftoveraxis" => Ok(Self::LongerLeftoverAxis),
            "minas" | "minimizearea" => Ok(Self::MinimizeArea),
            "maxas" | "maximizearea" => Ok(Self::MaximizeArea),
            "sas" | "shorteraxis" => Ok(Self::ShorterAxis),
            "las" | "longeraxis" => Ok(Self::LongerAxis),
            other => Err(TexPackerError::UnsupportedOption(format!(
                "unknown Guillotine split heuristic: {other}"
            ))),
        }
    }
}

/// Configuration for `TextureBinPacker`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextureBinPackerConfig {
    /// Largest atlas size the search is allowed to consider.
    pub max_width: u32,
    pub max_height: u32,
    /// Constraint on admissible atlas dimensions.
    pub restriction: TextureSizeRestriction,
    /// Allow individual rectangles to be rotated 90 degrees when beneficial.
    pub allow_rotation: bool,
    /// Reserved margin around the usable atlas area.
    pub border: Thickness,
}

impl Default for TextureBinPackerConfig {
    fn default() -> Self {
        Self {
            max_width: 4096,
            max_height: 4096,
            restriction: TextureSizeRestriction::Any,
            allow_rotation: true,
            border: Thickness::default(),
        }
    }
}

impl TextureBinPackerConfig {
    /// Create a fluent builder for `TextureBinPackerConfig`.
    pub fn builder() -> TextureBinPackerConfigBuilder {
        TextureBinPackerConfigBuilder::new()
    }

    /// Validates the configuration.
    ///
    /// Returns an error if dimensions are zero, or if the border leaves no usable interior.
    pub fn validate(&self) -> Result<()> {
        if self.max_width == 0 || self.max_height == 0 {
            return Err(TexPackerError::InvalidDimensions {
                width: self.max_width,
                height: self.max_height,
            });
        }

        let sum_x = self.border.sum_x();
        let sum_y = self.border.sum_y();
        if sum_x >= self.max_width || sum_y >= self.max_height {
            return Err(TexPackerError::InvalidConfig(format!(
                "border ({sum_x}x{sum_y}) leaves no usable interior in a {}x{} atlas",
                self.max_width, self.max_height
            )));
        }

        Ok(())
    }
}

/// Builder for `TextureBinPackerConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct TextureBinPackerConfigBuilder {
    cfg: TextureBinPackerConfig,
}

impl TextureBinPackerConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: TextureBinPackerConfig::default(),
        }
    }

    pub fn max_size(mut self, w: u32, h: u32) -> Self {
        self.cfg.max_width = w;
        self.cfg.max_height = h;
        self
    }

    pub fn restriction(mut self, v: TextureSizeRestriction) -> Self {
        self.cfg.restriction = v;
        self
    }

    pub fn allow_rotation(mut self, v: bool) -> Self {
        self.cfg.allow_rotation = v;
        self
    }

    pub fn border(mut self, v: Thickness) -> Self {
        self.cfg.border = v;
        self
    }

    pub fn build(self) -> TextureBinPackerConfig {
        self.cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_zero_dimensions() {
        let cfg = TextureBinPackerConfig::builder().max_size(0, 100).build();
        assert!(matches!(
            cfg.validate(),
            Err(TexPackerError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn validate_rejects_border_consuming_whole_bin() {
        let cfg = TextureBinPackerConfig::builder()
            .max_size(10, 10)
            .border(Thickness::uniform(5))
            .build();
        assert!(matches!(
            cfg.validate(),
            Err(TexPackerError::InvalidConfig(_))
        ));
    }

    #[test]
    fn heuristic_from_str_round_trips_aliases() {
        assert_eq!(
            "bssf".parse::<MaxRectsHeuristic>().unwrap(),
            MaxRectsHeuristic::BestShortSideFit
        );
        assert!("nope".parse::<MaxRectsHeuristic>().is_err());
    }

    #[test]
    fn search_order_is_bssf_blsf_bl_cp_baf() {
        use MaxRectsHeuristic::*;
        assert_eq!(
            MaxRectsHeuristic::SEARCH_ORDER,
            [
                BestShortSideFit,
                BestLongSideFit,
                BottomLeft,
                ContactPoint,
                BestAreaFit
            ]
        );
    }
}
