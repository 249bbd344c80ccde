//! Run configuration

use crate::interpreter::constants::{ITERATION_CAP, MAX_NESTING_DEPTH};

/// Knobs for one simulated run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    /// Unrecognized statements, unresolvable expressions and conditions
    /// without a comparison silently become no-op / 0 / false. When `false`
    /// they raise [`SimError::UnsupportedConstruct`] instead.
    ///
    /// [`SimError::UnsupportedConstruct`]: crate::interpreter::errors::SimError::UnsupportedConstruct
    pub permissive: bool,

    /// Maximum iterations of a single loop before it is stopped
    pub iteration_cap: usize,

    /// Maximum nesting of loop/conditional/block bodies
    pub max_depth: usize,
}

impl SimConfig {
    pub fn strict() -> Self {
        SimConfig {
            permissive: false,
            ..Self::default()
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            permissive: true,
            iteration_cap: ITERATION_CAP,
            max_depth: MAX_NESTING_DEPTH,
        }
    }
}
