use serde::Serialize;

use crate::quantity::{currency::Euros, time::Months};

/// Per-category monthly operating costs at the modeled fleet size.
#[derive(Clone, Debug, Serialize)]
pub struct CostBreakdown {
    pub care_plan: Euros,
    pub electricity: Euros,
    pub labour: Euros,
}

impl CostBreakdown {
    pub fn total(&self) -> Euros {
        self.care_plan + self.electricity + self.labour
    }
}

/// Full result set of one estimation.
#[derive(Clone, Debug, Serialize)]
#[must_use]
pub struct Estimate {
    pub paid_spend_per_month: Euros,

    /// Monthly spend that is not wasted.
    pub used_value_per_month: Euros,

    /// Unit count required to replace 100 % of used value.
    pub units_full: u32,

    pub units_best_payback: u32,

    pub units_recommended: u32,

    /// The manual override when set, the recommendation otherwise.
    pub units_modeled: u32,

    pub replaced_value: Euros,

    pub avoided_spend: Euros,

    pub operating_cost_per_month: Euros,

    pub breakdown: CostBreakdown,

    pub savings_per_month: Euros,

    pub savings_per_year: Euros,

    pub capex_total: Euros,

    /// [`None`] when the fleet never pays itself back.
    pub payback_months: Option<Months>,

    /// Share of used value covered, `0.0..=1.0`.
    pub coverage: f64,

    pub spare_capacity_value: Euros,
}

impl Estimate {
    pub fn is_positive_payback(&self) -> bool {
        self.savings_per_month > Euros::ZERO
    }
}
