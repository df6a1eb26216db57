//! Versioned fold coefficient table
//!
//! Every gain the matrix builder can produce comes from this table, so a
//! resolved matrix can always be checked against named values instead of
//! re-derived expectations.

use std::f64::consts::FRAC_1_SQRT_2;

use serde::{Deserialize, Serialize};

use crate::error::{ChanmixError, Result};

/// Which table entry a fold uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FoldKind {
    /// Center input into a left/right output pair
    Center,
    /// Side/back input into the front role on the same lateral axis
    Surround,
    /// Side input into back output on the same lateral axis, or the reverse
    Adjacent,
    /// Left/right input into the center role at the same depth
    Lateral,
    /// Side/back left/right input into front-center
    SurroundLateral,
}

/// Named gains used by the matrix builder
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoefficientTable {
    /// Table revision; bumped whenever any value changes
    pub version: u32,
    /// Gain of an exact role match, split evenly across duplicate inputs
    pub exact: f64,
    pub center: f64,
    pub surround: f64,
    pub adjacent: f64,
    pub lateral: f64,
}

impl CoefficientTable {
    /// Version 1: -3 dB folds, unity for exact matches and surround relabels
    pub const V1: CoefficientTable = CoefficientTable {
        version: 1,
        exact: 1.0,
        center: FRAC_1_SQRT_2,
        surround: FRAC_1_SQRT_2,
        adjacent: 1.0,
        lateral: FRAC_1_SQRT_2,
    };

    /// Table used when no configuration overrides it
    pub const LATEST: CoefficientTable = CoefficientTable::V1;

    /// Look up a built-in table by version number
    pub fn by_version(version: u32) -> Option<CoefficientTable> {
        match version {
            1 => Some(CoefficientTable::V1),
            _ => None,
        }
    }

    /// Gain applied for a given kind of fold
    pub fn fold(&self, kind: FoldKind) -> f64 {
        match kind {
            FoldKind::Center => self.center,
            FoldKind::Surround => self.surround,
            FoldKind::Adjacent => self.adjacent,
            FoldKind::Lateral => self.lateral,
            FoldKind::SurroundLateral => self.surround * self.lateral,
        }
    }

    /// Check that every gain is finite and non-negative
    pub fn validate(&self) -> Result<()> {
        let entries = [
            ("exact", self.exact),
            ("center", self.center),
            ("surround", self.surround),
            ("adjacent", self.adjacent),
            ("lateral", self.lateral),
        ];
        for (name, value) in entries {
            if !value.is_finite() || value < 0.0 {
                return Err(ChanmixError::Config {
                    reason: format!(
                        "coefficient '{}' must be finite and non-negative, got {}",
                        name, value
                    ),
                });
            }
        }
        Ok(())
    }
}

impl Default for CoefficientTable {
    fn default() -> Self {
        CoefficientTable::LATEST
    }
}
