use bon::Builder;
use itertools::Itertools;

use crate::{
    core::{
        estimate::{CostBreakdown, Estimate},
        inputs::CalculatorInputs,
        mode::RecommendationMode,
        scenario::Scenario,
    },
    prelude::*,
    quantity::{
        currency::{Euros, EurosPerHour},
        time::{Hours, Months},
    },
};

const WEEKS_PER_MONTH: f64 = 4.33;

/// Used value one unit can replace per month.
const UNIT_CAPACITY: Euros = Euros(400.0);

/// Fixed care-plan fee per unit per month.
const CARE_PLAN_COST: Euros = Euros(60.0);

/// Best-payback recommendations must still cover this share of actual usage.
pub const MIN_COVERAGE_BEST_PAYBACK: f64 = 0.70;

/// Fleet sizes beyond this are not worth tabulating.
pub const MAX_SWEEP_UNITS: u32 = 50;

#[derive(Builder)]
#[builder(finish_fn(vis = ""))]
pub struct Estimator<'a> {
    inputs: &'a CalculatorInputs,
    mode: RecommendationMode,
}

impl<S: estimator_builder::IsComplete> EstimatorBuilder<'_, S> {
    pub fn estimate(self) -> Estimate {
        self.build().estimate()
    }

    pub fn sweep(self, limit: Option<u32>) -> Sweep {
        self.build().sweep(limit)
    }
}

impl Estimator<'_> {
    /// Derive the full result set for the modeled fleet size.
    #[instrument(skip_all)]
    fn estimate(self) -> Estimate {
        let model = Model::of(self.inputs);
        let units_best_payback = model.best_payback_units();
        let units_recommended = match self.mode {
            RecommendationMode::BestPayback => units_best_payback,
            RecommendationMode::FullCoverage => model.units_full,
        };
        let units_modeled = self.inputs.units_override.unwrap_or(units_recommended);
        debug!(units_full = model.units_full, units_best_payback, units_modeled);

        let scenario = model.evaluate(units_modeled);
        Estimate {
            paid_spend_per_month: model.paid_spend_per_month,
            used_value_per_month: model.used_value_per_month,
            units_full: model.units_full,
            units_best_payback,
            units_recommended,
            units_modeled,
            replaced_value: scenario.replaced_value,
            avoided_spend: scenario.avoided_spend,
            operating_cost_per_month: scenario.operating_cost,
            breakdown: model.breakdown(units_modeled),
            savings_per_month: scenario.savings,
            savings_per_year: scenario.savings * 12.0,
            capex_total: scenario.capex,
            payback_months: scenario.payback,
            coverage: scenario.coverage,
            spare_capacity_value: (UNIT_CAPACITY * f64::from(units_modeled)
                - model.used_value_per_month)
                .max(Euros::ZERO),
        }
    }

    /// Evaluate candidate fleet sizes side by side,
    /// by default up to one past full coverage.
    fn sweep(self, limit: Option<u32>) -> Sweep {
        let model = Model::of(self.inputs);
        let units_recommended = match self.mode {
            RecommendationMode::BestPayback => model.best_payback_units(),
            RecommendationMode::FullCoverage => model.units_full,
        };
        let limit = limit.unwrap_or(model.units_full + 1).clamp(1, MAX_SWEEP_UNITS);
        let scenarios = (1..=limit).map(|units| model.evaluate(units)).collect_vec();
        Sweep { scenarios, units_recommended }
    }
}

/// Scan of candidate fleet sizes.
#[must_use]
pub struct Sweep {
    pub scenarios: Vec<Scenario>,
    pub units_recommended: u32,
}

/// Monthly figures shared by all candidate evaluations.
struct Model {
    paid_spend_per_month: Euros,
    used_value_per_month: Euros,
    units_full: u32,
    care_plan_per_unit: Euros,
    electricity_per_unit: Euros,
    labour_per_unit: Euros,
    purchase_price_per_unit: Euros,
}

impl Model {
    #[expect(clippy::cast_possible_truncation)]
    #[expect(clippy::cast_sign_loss)]
    fn of(inputs: &CalculatorInputs) -> Self {
        let paid_spend_per_month = inputs.weekly_spend.max(Euros::ZERO) * WEEKS_PER_MONTH;
        let used_value_per_month =
            paid_spend_per_month * (1.0 - inputs.effective_waste().to_ratio());
        let units_full = if used_value_per_month > Euros::ZERO {
            (used_value_per_month / UNIT_CAPACITY).ceil() as u32
        } else {
            0
        };

        let monthly_hours = Hours::from(inputs.effective_minutes()) * WEEKS_PER_MONTH;
        Self {
            paid_spend_per_month,
            used_value_per_month,
            units_full,
            care_plan_per_unit: if inputs.care_plan_on { CARE_PLAN_COST } else { Euros::ZERO },
            electricity_per_unit: inputs.electricity_per_month_per_unit.max(Euros::ZERO),
            labour_per_unit: inputs.labour_cost_per_hour.max(EurosPerHour::ZERO) * monthly_hours,
            purchase_price_per_unit: inputs.purchase_price_per_unit,
        }
    }

    fn per_unit_operating_cost(&self) -> Euros {
        self.care_plan_per_unit + self.electricity_per_unit + self.labour_per_unit
    }

    fn evaluate(&self, units: u32) -> Scenario {
        let replaced_value = self.used_value_per_month.min(UNIT_CAPACITY * f64::from(units));
        let (avoided_spend, coverage) = if self.used_value_per_month > Euros::ZERO {
            let replaced_share = replaced_value / self.used_value_per_month;
            (self.paid_spend_per_month * replaced_share, replaced_share)
        } else {
            (Euros::ZERO, 0.0)
        };
        let operating_cost = self.per_unit_operating_cost() * f64::from(units);
        let savings = avoided_spend - operating_cost;
        let capex = self.purchase_price_per_unit * f64::from(units);
        Scenario {
            units,
            replaced_value,
            avoided_spend,
            operating_cost,
            savings,
            capex,
            payback: (savings > Euros::ZERO).then(|| Months::from(capex / savings)),
            coverage,
        }
    }

    /// Scan fleet sizes up to one past full coverage for the smallest finite
    /// payback, discarding candidates under the coverage guardrail. Ties go
    /// to the smaller fleet. Falls back to full coverage when nothing in the
    /// scanned range pays itself back.
    fn best_payback_units(&self) -> u32 {
        if self.used_value_per_month <= Euros::ZERO {
            return 0;
        }
        (1..=self.units_full + 1)
            .map(|units| self.evaluate(units))
            .filter(|scenario| scenario.coverage >= MIN_COVERAGE_BEST_PAYBACK)
            .filter_map(|scenario| scenario.payback.map(|payback| (scenario.units, payback)))
            .min_by_key(|(_, payback)| *payback)
            .map_or_else(|| self.units_full.max(1), |(units, _)| units)
    }

    fn breakdown(&self, units: u32) -> CostBreakdown {
        let units = f64::from(units);
        CostBreakdown {
            care_plan: self.care_plan_per_unit * units,
            electricity: self.electricity_per_unit * units,
            labour: self.labour_per_unit * units,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::{
        core::inputs::Preset,
        quantity::{ratios::Percentage, time::Minutes},
    };

    #[test]
    fn test_full_coverage_with_defaults() {
        let inputs = CalculatorInputs::default();
        let estimate =
            Estimator::builder().inputs(&inputs).mode(RecommendationMode::FullCoverage).estimate();

        assert_abs_diff_eq!(estimate.paid_spend_per_month.0, 519.6, epsilon = 1e-9);
        assert_abs_diff_eq!(estimate.used_value_per_month.0, 441.66, epsilon = 1e-9);
        assert_eq!(estimate.units_full, 2);
        assert_eq!(estimate.units_recommended, 2);
        assert_eq!(estimate.units_modeled, 2);
        assert_abs_diff_eq!(estimate.operating_cost_per_month.0, 236.25, epsilon = 1e-9);
        assert_abs_diff_eq!(estimate.avoided_spend.0, 519.6, epsilon = 1e-9);
        assert_abs_diff_eq!(estimate.savings_per_month.0, 283.35, epsilon = 1e-9);
        assert_abs_diff_eq!(estimate.savings_per_year.0, 12.0 * 283.35, epsilon = 1e-9);
        assert_abs_diff_eq!(estimate.capex_total.0, 4580.0, epsilon = 1e-9);
        assert_abs_diff_eq!(
            estimate.payback_months.unwrap().0,
            4580.0 / 283.35,
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(estimate.coverage, 1.0, epsilon = 1e-9);
        assert!(estimate.is_positive_payback());
    }

    #[test]
    fn test_breakdown_with_defaults() {
        let inputs = CalculatorInputs::default();
        let estimate =
            Estimator::builder().inputs(&inputs).mode(RecommendationMode::FullCoverage).estimate();

        assert_abs_diff_eq!(estimate.breakdown.care_plan.0, 120.0, epsilon = 1e-9);
        assert_abs_diff_eq!(estimate.breakdown.electricity.0, 8.0, epsilon = 1e-9);
        assert_abs_diff_eq!(estimate.breakdown.labour.0, 108.25, epsilon = 1e-9);
        assert_abs_diff_eq!(
            estimate.breakdown.total().0,
            estimate.operating_cost_per_month.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_best_payback_prefers_smaller_fleet() {
        let inputs = CalculatorInputs::default();
        let estimate =
            Estimator::builder().inputs(&inputs).mode(RecommendationMode::BestPayback).estimate();

        assert_eq!(estimate.units_best_payback, 1);
        assert_eq!(estimate.units_modeled, 1);
        assert_abs_diff_eq!(estimate.replaced_value.0, 400.0, epsilon = 1e-9);
        assert_abs_diff_eq!(estimate.avoided_spend.0, 519.6 * (400.0 / 441.66), epsilon = 1e-9);
        assert!(estimate.coverage >= MIN_COVERAGE_BEST_PAYBACK);
    }

    #[test]
    fn test_best_payback_guardrail_excludes_low_coverage() {
        // Free-running units: the payback ratio is identical for every fleet
        // size below full coverage, so only the guardrail separates them.
        let inputs = CalculatorInputs {
            weekly_spend: Euros(400.0),
            preset: Preset::Custom,
            waste_percent: Percentage::ZERO,
            minutes_per_week_per_unit: Minutes::ZERO,
            labour_cost_per_hour: EurosPerHour::ZERO,
            electricity_per_month_per_unit: Euros::ZERO,
            care_plan_on: false,
            units_override: None,
            purchase_price_per_unit: Euros(2290.0),
        };
        let estimate =
            Estimator::builder().inputs(&inputs).mode(RecommendationMode::BestPayback).estimate();

        // 3 units cover 1200 € of the 1732 € used value: under the guardrail.
        assert_eq!(estimate.units_full, 5);
        assert_eq!(estimate.units_best_payback, 4);
        assert!(estimate.coverage >= MIN_COVERAGE_BEST_PAYBACK);
    }

    #[test]
    fn test_unpayable_fleet_falls_back_to_full_coverage() {
        let inputs = CalculatorInputs {
            labour_cost_per_hour: EurosPerHour(1000.0),
            ..CalculatorInputs::default()
        };
        let estimate =
            Estimator::builder().inputs(&inputs).mode(RecommendationMode::BestPayback).estimate();

        assert_eq!(estimate.units_best_payback, estimate.units_full);
        assert!(estimate.savings_per_month < Euros::ZERO);
        assert_eq!(estimate.payback_months, None);
        assert!(!estimate.is_positive_payback());
    }

    #[test]
    fn test_zero_spend_zeroes_everything() {
        let inputs = CalculatorInputs { weekly_spend: Euros::ZERO, ..CalculatorInputs::default() };
        for mode in [RecommendationMode::BestPayback, RecommendationMode::FullCoverage] {
            let estimate = Estimator::builder().inputs(&inputs).mode(mode).estimate();
            assert_eq!(estimate.units_full, 0);
            assert_eq!(estimate.units_best_payback, 0);
            assert_eq!(estimate.units_modeled, 0);
            assert_eq!(estimate.savings_per_month, Euros::ZERO);
            assert_eq!(estimate.payback_months, None);
            assert_abs_diff_eq!(estimate.coverage, 0.0);
        }
    }

    #[test]
    fn test_override_takes_precedence() {
        let inputs =
            CalculatorInputs { units_override: Some(1), ..CalculatorInputs::default() };
        let estimate =
            Estimator::builder().inputs(&inputs).mode(RecommendationMode::FullCoverage).estimate();

        assert_eq!(estimate.units_recommended, 2);
        assert_eq!(estimate.units_modeled, 1);
        assert_abs_diff_eq!(estimate.capex_total.0, 2290.0, epsilon = 1e-9);
        assert_abs_diff_eq!(estimate.operating_cost_per_month.0, 118.125, epsilon = 1e-9);
    }

    #[test]
    fn test_spare_capacity_of_oversized_fleet() {
        let inputs =
            CalculatorInputs { units_override: Some(5), ..CalculatorInputs::default() };
        let estimate =
            Estimator::builder().inputs(&inputs).mode(RecommendationMode::BestPayback).estimate();

        assert_abs_diff_eq!(estimate.spare_capacity_value.0, 2000.0 - 441.66, epsilon = 1e-9);
        assert_abs_diff_eq!(estimate.replaced_value.0, 441.66, epsilon = 1e-9);
        assert_abs_diff_eq!(estimate.coverage, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_estimation_is_deterministic() {
        let inputs = CalculatorInputs::default();
        let first =
            Estimator::builder().inputs(&inputs).mode(RecommendationMode::BestPayback).estimate();
        let second =
            Estimator::builder().inputs(&inputs).mode(RecommendationMode::BestPayback).estimate();

        assert_eq!(first.savings_per_month, second.savings_per_month);
        assert_eq!(first.payback_months, second.payback_months);
        assert_eq!(first.units_modeled, second.units_modeled);
    }

    #[test]
    fn test_sweep_scans_one_past_full_coverage() {
        let inputs = CalculatorInputs::default();
        let sweep =
            Estimator::builder().inputs(&inputs).mode(RecommendationMode::BestPayback).sweep(None);

        assert_eq!(sweep.scenarios.len(), 3);
        assert_eq!(sweep.scenarios[0].units, 1);
        assert_eq!(sweep.units_recommended, 1);
        for scenario in &sweep.scenarios {
            assert!((0.0..=1.0).contains(&scenario.coverage));
            assert!(scenario.capex >= Euros::ZERO);
        }
    }

    #[test]
    fn test_sweep_limit_is_clamped() {
        let inputs = CalculatorInputs::default();
        let sweep = Estimator::builder()
            .inputs(&inputs)
            .mode(RecommendationMode::FullCoverage)
            .sweep(Some(200));

        assert_eq!(sweep.scenarios.len(), MAX_SWEEP_UNITS as usize);
    }
}
