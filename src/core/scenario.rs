use crate::quantity::{currency::Euros, time::Months};

/// Evaluation of a single candidate fleet size.
#[derive(Clone, Debug)]
#[must_use]
pub struct Scenario {
    pub units: u32,

    /// Used value the fleet's capacity can actually replace.
    pub replaced_value: Euros,

    /// Paid spend avoided, proportional to the replaced share of used value.
    pub avoided_spend: Euros,

    pub operating_cost: Euros,

    /// Avoided spend minus operating cost. May be negative.
    pub savings: Euros,

    pub capex: Euros,

    /// [`None`] when the fleet never pays itself back.
    pub payback: Option<Months>,

    /// Share of used value covered, `0.0..=1.0`.
    pub coverage: f64,
}
