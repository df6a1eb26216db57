//! Gain matrix resolution
//!
//! Turns an (input layout, output layout) pair into a frozen `GainMatrix`
//! using a versioned `CoefficientTable`.

mod builder;
mod coefficients;
mod gain;

pub use builder::{fold_tiers, resolve, FoldTier, MappingPolicy, MatrixBuilder};
pub use coefficients::{CoefficientTable, FoldKind};
pub use gain::GainMatrix;
