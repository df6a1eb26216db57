//! Matrix Builder
//!
//! Resolves, for every output channel, which input channels feed it and
//! with which gain. Resolution runs once per session and is a pure function
//! of the two layouts, the coefficient table, and the mapping policy.
//!
//! Rules, per output position:
//! 1. Silence output: the row stays zero.
//! 2. Exact match: every input with the same role contributes
//!    `exact / count`, and nothing else is mixed into that row.
//! 3. Fold: inputs whose role is absent from the output layout are
//!    redistributed into spatially related outputs (see [`fold_tiers`]).
//!    Fold contributions are never added to an exact-match row, and a tier
//!    is only chosen if it reaches at least one row without an exact match.
//! 4. Anything left over is zero (or an error under `MappingPolicy::Strict`).

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::coefficients::{CoefficientTable, FoldKind};
use super::gain::GainMatrix;
use crate::channel::{ChannelRole, Classification, Depth, Lateral, Layout};
use crate::error::{ChanmixError, Result};

// ============================================================================
// Policy
// ============================================================================

/// What to do with a non-silence output channel nothing maps onto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MappingPolicy {
    /// Leave the output channel silent
    #[default]
    ZeroFill,
    /// Fail with `UnsupportedMapping`
    Strict,
}

// ============================================================================
// Fold rules
// ============================================================================

/// One group of fold targets sharing a gain
#[derive(Debug, Clone, PartialEq)]
pub struct FoldTier {
    pub kind: FoldKind,
    pub targets: Vec<ChannelRole>,
}

impl FoldTier {
    fn new(kind: FoldKind, targets: impl IntoIterator<Item = Option<ChannelRole>>) -> Self {
        Self {
            kind,
            targets: targets.into_iter().flatten().collect(),
        }
    }
}

/// Candidate fold targets for an input role, most preferred first
///
/// The builder uses the first tier with at least one target present in the
/// output layout on a row without an exact match. Low-frequency and silence
/// inputs never fold.
pub fn fold_tiers(role: ChannelRole) -> Vec<FoldTier> {
    let (lateral, depth) = match role.classify() {
        Classification::Spatial { lateral, depth } => (lateral, depth),
        Classification::LowFrequency | Classification::Silence => return Vec::new(),
    };

    let front_center = Some(ChannelRole::FrontCenter);
    let front_pair = [
        Some(ChannelRole::FrontLeft),
        Some(ChannelRole::FrontRight),
    ];

    match (lateral, depth) {
        (Lateral::Center, Depth::Front) => vec![FoldTier::new(FoldKind::Center, front_pair)],
        (Lateral::Center, depth) => vec![
            FoldTier::new(
                FoldKind::Center,
                [
                    ChannelRole::spatial(Lateral::Left, depth),
                    ChannelRole::spatial(Lateral::Right, depth),
                ],
            ),
            FoldTier::new(FoldKind::Center, front_pair),
            FoldTier::new(FoldKind::Surround, [front_center]),
        ],
        (side, Depth::Front) => {
            debug_assert_ne!(side, Lateral::Center);
            vec![FoldTier::new(FoldKind::Lateral, [front_center])]
        }
        (side, depth) => vec![
            FoldTier::new(
                FoldKind::Adjacent,
                [depth
                    .adjacent_surround()
                    .and_then(|other| ChannelRole::spatial(side, other))],
            ),
            FoldTier::new(
                FoldKind::Surround,
                [ChannelRole::spatial(side, Depth::Front)],
            ),
            FoldTier::new(
                FoldKind::Lateral,
                [ChannelRole::spatial(Lateral::Center, depth)],
            ),
            FoldTier::new(FoldKind::SurroundLateral, [front_center]),
        ],
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Resolves gain matrices with a fixed coefficient table and policy
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MatrixBuilder {
    policy: MappingPolicy,
    table: CoefficientTable,
}

impl MatrixBuilder {
    /// Builder with the latest coefficient table and `ZeroFill` policy
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(mut self, policy: MappingPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_coefficients(mut self, table: CoefficientTable) -> Self {
        self.table = table;
        self
    }

    pub fn policy(&self) -> MappingPolicy {
        self.policy
    }

    pub fn coefficients(&self) -> &CoefficientTable {
        &self.table
    }

    /// Resolve the gain matrix mixing `input` into `output`
    ///
    /// # Errors
    /// `Config` if the coefficient table is invalid, `UnsupportedMapping`
    /// under the strict policy when an output channel has no source.
    pub fn build(&self, input: &Layout, output: &Layout) -> Result<GainMatrix> {
        self.table.validate()?;

        let width = input.channels();
        let mut coefficients = vec![0.0_f64; output.channels() * width];
        let mut exact = vec![false; output.channels()];
        let mut resolved = vec![false; output.channels()];

        // Exact matches
        for (o, &role) in output.roles().iter().enumerate() {
            if role.is_silence() {
                resolved[o] = true;
                continue;
            }
            let count = input.count(role);
            if count == 0 {
                continue;
            }
            let gain = self.table.exact / count as f64;
            for i in input.positions(role) {
                coefficients[o * width + i] = gain;
            }
            exact[o] = true;
            resolved[o] = true;
        }

        // Folds of unaccounted inputs
        for (i, &role) in input.roles().iter().enumerate() {
            if output.contains(role) {
                continue;
            }
            let open = |target: ChannelRole| output.positions(target).any(|o| !exact[o]);
            let Some(tier) = fold_tiers(role)
                .into_iter()
                .find(|tier| tier.targets.iter().any(|&t| open(t)))
            else {
                trace!(input = i, role = %role, "input channel dropped");
                continue;
            };

            let gain = self.table.fold(tier.kind) / input.count(role) as f64;
            for &target in &tier.targets {
                for o in output.positions(target) {
                    if exact[o] {
                        continue;
                    }
                    coefficients[o * width + i] += gain;
                    resolved[o] = true;
                    trace!(
                        input = i,
                        output = o,
                        from = %role,
                        to = %target,
                        kind = ?tier.kind,
                        gain,
                        "fold"
                    );
                }
            }
        }

        for (o, &role) in output.roles().iter().enumerate() {
            if resolved[o] {
                continue;
            }
            match self.policy {
                MappingPolicy::Strict => {
                    return Err(ChanmixError::UnsupportedMapping { role, position: o });
                }
                MappingPolicy::ZeroFill => {
                    warn!(output = o, role = %role, "no source for output channel, writing silence");
                }
            }
        }

        let matrix = GainMatrix::from_parts(
            input.clone(),
            output.clone(),
            coefficients,
            self.table.version,
        );
        debug!(
            input = %input,
            output = %output,
            table_version = self.table.version,
            identity = matrix.is_identity(),
            "resolved gain matrix"
        );
        Ok(matrix)
    }
}

/// Resolve a matrix with the default builder
pub fn resolve(input: &Layout, output: &Layout) -> Result<GainMatrix> {
    MatrixBuilder::new().build(input, output)
}

// ============================================================================
// Tests
// ============================================================================
