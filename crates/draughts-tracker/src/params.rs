use serde::{Deserialize, Serialize};

/// How confirmed square changes are turned into moves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveStrategy {
    /// Pair vacate/fill changes and keep only diagonal steps and jumps that
    /// are legal on the settled position.
    #[default]
    Geometric,
    /// Pair any vacate/fill changes close in time, without legality checks.
    Temporal,
}

/// Timing parameters of the tracker, persistence filter and correlator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerParams {
    /// Frames after the first sighting during which a pending change may be confirmed.
    pub window: u64,
    /// Sightings within `window` needed to confirm a change.
    pub confirm_threshold: u32,
    /// Maximum frame distance between paired changes and between duplicate moves.
    pub correlation_window: u64,
    pub strategy: MoveStrategy,
}

impl Default for TrackerParams {
    fn default() -> Self {
        Self {
            window: 10,
            confirm_threshold: 5,
            correlation_window: 10,
            strategy: MoveStrategy::default(),
        }
    }
}

impl TrackerParams {
    pub fn with_strategy(strategy: MoveStrategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }
}
