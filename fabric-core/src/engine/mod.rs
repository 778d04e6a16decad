//! Estimation stages: aggregation, pricing, scoring and benchmarking.

mod aggregate;
mod benchmark;
mod pricing;
mod score;

pub use aggregate::{aggregate, required_length_m, Aggregation};
pub use benchmark::{
    compare_benchmarks, compare_catalog_benchmarks, compare_criterion, improvement_percentage,
};
pub use pricing::{price, GroupCost, PriceSummary};
pub use score::{
    score_groups, score_usage, usage_shares, ImpactTotal, ScoreDisplay, SustainabilityScore,
    UsageShare,
};
