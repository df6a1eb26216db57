//! Channel layouts
//!
//! A layout is the ordered list of roles describing one interleaved buffer:
//! its length is the channel count and each position is an interleaving
//! index. Roles may repeat; repeated Silence slots are independent.

use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::role::ChannelRole;
use crate::error::{ChanmixError, Result};

/// Validated, non-empty, immutable sequence of channel roles
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<ChannelRole>", into = "Vec<ChannelRole>")]
pub struct Layout {
    roles: Box<[ChannelRole]>,
}

impl Layout {
    /// Create a layout from an ordered list of roles
    ///
    /// # Errors
    /// `InvalidLayout` if `roles` is empty.
    pub fn new(roles: impl Into<Vec<ChannelRole>>) -> Result<Self> {
        let roles = roles.into();
        if roles.is_empty() {
            return Err(ChanmixError::invalid_layout(
                "a layout needs at least one channel",
            ));
        }
        Ok(Self {
            roles: roles.into_boxed_slice(),
        })
    }

    /// Create a layout from raw numeric role codes
    pub fn from_codes(codes: &[u32]) -> Result<Self> {
        let roles = codes
            .iter()
            .map(|&code| ChannelRole::try_from(code))
            .collect::<Result<Vec<_>>>()?;
        Self::new(roles)
    }

    /// Single front-center channel
    pub fn mono() -> Self {
        Self::preset(&[ChannelRole::FrontCenter])
    }

    /// FL FR
    pub fn stereo() -> Self {
        Self::preset(&[ChannelRole::FrontLeft, ChannelRole::FrontRight])
    }

    /// FL FR BL BR
    pub fn quad() -> Self {
        Self::preset(&[
            ChannelRole::FrontLeft,
            ChannelRole::FrontRight,
            ChannelRole::BackLeft,
            ChannelRole::BackRight,
        ])
    }

    /// FL FR FC LFE BL BR
    pub fn surround_5_1() -> Self {
        Self::preset(&[
            ChannelRole::FrontLeft,
            ChannelRole::FrontRight,
            ChannelRole::FrontCenter,
            ChannelRole::LowFrequency,
            ChannelRole::BackLeft,
            ChannelRole::BackRight,
        ])
    }

    /// FL FR FC LFE BL BR SL SR
    pub fn surround_7_1() -> Self {
        Self::preset(&[
            ChannelRole::FrontLeft,
            ChannelRole::FrontRight,
            ChannelRole::FrontCenter,
            ChannelRole::LowFrequency,
            ChannelRole::BackLeft,
            ChannelRole::BackRight,
            ChannelRole::SideLeft,
            ChannelRole::SideRight,
        ])
    }

    /// Conventional layout for a bare channel count (as found in a WAV header)
    pub fn default_for_channels(count: usize) -> Option<Self> {
        match count {
            1 => Some(Self::mono()),
            2 => Some(Self::stereo()),
            4 => Some(Self::quad()),
            6 => Some(Self::surround_5_1()),
            8 => Some(Self::surround_7_1()),
            _ => None,
        }
    }

    fn preset(roles: &[ChannelRole]) -> Self {
        Self {
            roles: roles.into(),
        }
    }

    /// Number of channels (always at least one)
    #[inline]
    pub fn channels(&self) -> usize {
        self.roles.len()
    }

    #[inline]
    pub fn roles(&self) -> &[ChannelRole] {
        &self.roles
    }

    pub fn contains(&self, role: ChannelRole) -> bool {
        self.roles.contains(&role)
    }

    /// Number of positions holding `role`
    pub fn count(&self, role: ChannelRole) -> usize {
        self.roles.iter().filter(|r| **r == role).count()
    }

    /// Positions holding `role`, in layout order
    pub fn positions(&self, role: ChannelRole) -> impl Iterator<Item = usize> + '_ {
        self.roles
            .iter()
            .enumerate()
            .filter(move |(_, r)| **r == role)
            .map(|(index, _)| index)
    }
}

impl Index<usize> for Layout {
    type Output = ChannelRole;

    fn index(&self, index: usize) -> &ChannelRole {
        &self.roles[index]
    }
}

impl TryFrom<Vec<ChannelRole>> for Layout {
    type Error = ChanmixError;

    fn try_from(roles: Vec<ChannelRole>) -> Result<Self> {
        Self::new(roles)
    }
}

impl TryFrom<&[ChannelRole]> for Layout {
    type Error = ChanmixError;

    fn try_from(roles: &[ChannelRole]) -> Result<Self> {
        Self::new(roles.to_vec())
    }
}

impl From<Layout> for Vec<ChannelRole> {
    fn from(layout: Layout) -> Self {
        layout.roles.into_vec()
    }
}

impl FromStr for Layout {
    type Err = ChanmixError;

    /// Parse a comma-separated list of role names, e.g. `FL,FR,FC`
    fn from_str(s: &str) -> Result<Self> {
        let roles = s
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(str::parse)
            .collect::<Result<Vec<ChannelRole>>>()?;
        Self::new(roles)
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, role) in self.roles.iter().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            f.write_str(role.short_name())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_layout_rejected() {
        let err = Layout::new(Vec::<ChannelRole>::new()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_LAYOUT");
        assert!("".parse::<Layout>().is_err());
    }

    #[test]
    fn test_repeated_silence_allowed() {
        let layout = Layout::new(vec![
            ChannelRole::Silence,
            ChannelRole::FrontLeft,
            ChannelRole::Silence,
        ])
        .unwrap();
        assert_eq!(layout.channels(), 3);
        assert_eq!(layout.count(ChannelRole::Silence), 2);
        assert_eq!(
            layout.positions(ChannelRole::Silence).collect::<Vec<_>>(),
            vec![0, 2]
        );
    }

    #[test]
    fn test_from_codes() {
        let layout = Layout::from_codes(&[0, 9, 1]).unwrap();
        assert_eq!(
            layout.roles(),
            &[
                ChannelRole::FrontLeft,
                ChannelRole::Silence,
                ChannelRole::FrontRight
            ]
        );
        assert!(Layout::from_codes(&[0, 42]).is_err());
        assert!(Layout::from_codes(&[]).is_err());
    }

    #[test]
    fn test_parse_and_display() {
        let layout: Layout = "FL, FR, fc, lfe".parse().unwrap();
        assert_eq!(layout.channels(), 4);
        assert_eq!(layout[3], ChannelRole::LowFrequency);
        assert_eq!(layout.to_string(), "FL,FR,FC,LFE");
    }

    #[test]
    fn test_presets() {
        assert_eq!(Layout::mono().channels(), 1);
        assert_eq!(Layout::stereo().channels(), 2);
        assert_eq!(Layout::quad().channels(), 4);
        assert_eq!(Layout::surround_5_1().channels(), 6);
        assert_eq!(Layout::surround_7_1().channels(), 8);
        assert_eq!(Layout::default_for_channels(6), Some(Layout::surround_5_1()));
        assert_eq!(Layout::default_for_channels(3), None);
    }

    #[test]
    fn test_serde_rejects_empty() {
        let layout: Layout = serde_json::from_str(r#"["front-left","silence"]"#).unwrap();
        assert_eq!(layout.channels(), 2);
        assert!(serde_json::from_str::<Layout>("[]").is_err());
        assert_eq!(
            serde_json::to_string(&layout).unwrap(),
            r#"["front-left","silence"]"#
        );
    }
}
