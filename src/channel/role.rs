//! Channel roles and their spatial classification
//!
//! The catalog is closed: every role a layout can hold is listed in
//! `ChannelRole`, and every role has exactly one `Classification`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ChanmixError, Result};

// ============================================================================
// Classification
// ============================================================================

/// Position of a role on the left/right axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Lateral {
    Left,
    Center,
    Right,
}

/// Position of a role on the front/back axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Depth {
    Front,
    Side,
    Back,
}

impl Depth {
    /// The other surround depth (side <-> back); front has none
    pub fn adjacent_surround(self) -> Option<Depth> {
        match self {
            Depth::Front => None,
            Depth::Side => Some(Depth::Back),
            Depth::Back => Some(Depth::Side),
        }
    }
}

/// How the catalog classifies a role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "kind")]
pub enum Classification {
    /// A speaker position
    Spatial { lateral: Lateral, depth: Depth },
    /// The non-directional low-frequency effects channel
    LowFrequency,
    /// No signal
    Silence,
}

// ============================================================================
// Channel Role
// ============================================================================

/// Semantic label of one channel in an interleaved buffer
///
/// The discriminant is the stable numeric code used by `TryFrom<u32>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[repr(u32)]
pub enum ChannelRole {
    FrontLeft = 0,
    FrontRight = 1,
    FrontCenter = 2,
    LowFrequency = 3,
    BackLeft = 4,
    BackRight = 5,
    BackCenter = 6,
    SideLeft = 7,
    SideRight = 8,
    Silence = 9,
}

impl ChannelRole {
    /// Every role, in code order
    pub const ALL: [ChannelRole; 10] = [
        ChannelRole::FrontLeft,
        ChannelRole::FrontRight,
        ChannelRole::FrontCenter,
        ChannelRole::LowFrequency,
        ChannelRole::BackLeft,
        ChannelRole::BackRight,
        ChannelRole::BackCenter,
        ChannelRole::SideLeft,
        ChannelRole::SideRight,
        ChannelRole::Silence,
    ];

    /// Stable numeric code of this role
    #[inline]
    pub const fn code(self) -> u32 {
        self as u32
    }

    /// Classify this role along the lateral and depth axes
    pub const fn classify(self) -> Classification {
        use Depth::*;
        use Lateral::*;
        let (lateral, depth) = match self {
            ChannelRole::FrontLeft => (Left, Front),
            ChannelRole::FrontRight => (Right, Front),
            ChannelRole::FrontCenter => (Center, Front),
            ChannelRole::BackLeft => (Left, Back),
            ChannelRole::BackRight => (Right, Back),
            ChannelRole::BackCenter => (Center, Back),
            ChannelRole::SideLeft => (Left, Side),
            ChannelRole::SideRight => (Right, Side),
            ChannelRole::LowFrequency => return Classification::LowFrequency,
            ChannelRole::Silence => return Classification::Silence,
        };
        Classification::Spatial { lateral, depth }
    }

    /// Find the spatial role at the given position, if the catalog has one
    ///
    /// There is no side-center role.
    pub const fn spatial(lateral: Lateral, depth: Depth) -> Option<ChannelRole> {
        match (lateral, depth) {
            (Lateral::Left, Depth::Front) => Some(ChannelRole::FrontLeft),
            (Lateral::Right, Depth::Front) => Some(ChannelRole::FrontRight),
            (Lateral::Center, Depth::Front) => Some(ChannelRole::FrontCenter),
            (Lateral::Left, Depth::Back) => Some(ChannelRole::BackLeft),
            (Lateral::Right, Depth::Back) => Some(ChannelRole::BackRight),
            (Lateral::Center, Depth::Back) => Some(ChannelRole::BackCenter),
            (Lateral::Left, Depth::Side) => Some(ChannelRole::SideLeft),
            (Lateral::Right, Depth::Side) => Some(ChannelRole::SideRight),
            (Lateral::Center, Depth::Side) => None,
        }
    }

    #[inline]
    pub fn is_silence(self) -> bool {
        self == ChannelRole::Silence
    }

    #[inline]
    pub fn is_low_frequency(self) -> bool {
        self == ChannelRole::LowFrequency
    }

    /// Short speaker label (`FL`, `LFE`, ...)
    pub const fn short_name(self) -> &'static str {
        match self {
            ChannelRole::FrontLeft => "FL",
            ChannelRole::FrontRight => "FR",
            ChannelRole::FrontCenter => "FC",
            ChannelRole::LowFrequency => "LFE",
            ChannelRole::BackLeft => "BL",
            ChannelRole::BackRight => "BR",
            ChannelRole::BackCenter => "BC",
            ChannelRole::SideLeft => "SL",
            ChannelRole::SideRight => "SR",
            ChannelRole::Silence => "SIL",
        }
    }

    /// Long kebab-case name, identical to the serde representation
    pub const fn name(self) -> &'static str {
        match self {
            ChannelRole::FrontLeft => "front-left",
            ChannelRole::FrontRight => "front-right",
            ChannelRole::FrontCenter => "front-center",
            ChannelRole::LowFrequency => "low-frequency",
            ChannelRole::BackLeft => "back-left",
            ChannelRole::BackRight => "back-right",
            ChannelRole::BackCenter => "back-center",
            ChannelRole::SideLeft => "side-left",
            ChannelRole::SideRight => "side-right",
            ChannelRole::Silence => "silence",
        }
    }
}

impl fmt::Display for ChannelRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u32> for ChannelRole {
    type Error = ChanmixError;

    fn try_from(code: u32) -> Result<Self> {
        ChannelRole::ALL
            .iter()
            .copied()
            .find(|role| role.code() == code)
            .ok_or_else(|| ChanmixError::invalid_layout(format!("unknown channel code {}", code)))
    }
}

impl FromStr for ChannelRole {
    type Err = ChanmixError;

    /// Parse either the short label or the long name, case-insensitively
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        ChannelRole::ALL
            .iter()
            .copied()
            .find(|role| {
                s.eq_ignore_ascii_case(role.short_name()) || s.eq_ignore_ascii_case(role.name())
            })
            .ok_or_else(|| ChanmixError::invalid_layout(format!("unknown channel role '{}'", s)))
    }
}

// ============================================================================
// Tests
// ============================================================================
