//! Channel Catalog
//!
//! The closed set of channel roles, their spatial classification, and the
//! layouts built from them.

pub mod layout;
pub mod role;

pub use layout::Layout;
pub use role::{ChannelRole, Classification, Depth, Lateral};

/// Classify a role along the lateral and depth axes
#[inline]
pub fn classify(role: ChannelRole) -> Classification {
    role.classify()
}
