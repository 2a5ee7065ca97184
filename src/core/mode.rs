use serde::{Deserialize, Serialize};

/// Strategy for the automatic fleet-size recommendation, used when no manual
/// unit count is set.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationMode {
    /// Fastest payback that still covers at least 70 % of actual usage.
    #[default]
    BestPayback,

    /// Enough units to replace all used value.
    FullCoverage,
}
