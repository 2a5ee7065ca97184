mod estimate;
mod sweep;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

pub use self::{
    estimate::{EstimateArgs, estimate},
    sweep::{SweepArgs, sweep},
};
use crate::{
    core::inputs::{CalculatorInputs, InputChange, Preset},
    prelude::*,
    quantity::{
        currency::{Euros, EurosPerHour},
        ratios::Percentage,
        time::Minutes,
    },
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Main command: estimate savings, payback, and the recommended fleet size.
    #[clap(name = "estimate")]
    Estimate(Box<EstimateArgs>),

    /// Compare candidate fleet sizes side by side.
    #[clap(name = "sweep")]
    Sweep(Box<SweepArgs>),

    /// Print the default inputs as TOML, ready for `--inputs-file`.
    #[clap(name = "defaults")]
    Defaults,
}

#[must_use]
#[derive(Parser)]
pub struct InputArgs {
    /// Read the inputs from a TOML file instead of the individual flags.
    #[clap(long = "inputs-file", env = "INPUTS_FILE")]
    pub inputs_file: Option<PathBuf>,

    /// Weekly spend on bought-in stock.
    #[clap(long = "weekly-spend", env = "WEEKLY_SPEND", default_value = "120")]
    pub weekly_spend: Euros,

    /// Waste and handling-time assumptions.
    #[clap(long, env = "PRESET", value_enum, default_value = "typical")]
    pub preset: Preset,

    /// Share of the spend that is wasted; only used with the custom preset.
    #[clap(long = "waste-percent", env = "WASTE_PERCENT", default_value = "15")]
    pub waste_percent: Percentage,

    /// Weekly handling time per unit; only used with the custom preset.
    #[clap(
        long = "minutes-per-week-per-unit",
        env = "MINUTES_PER_WEEK_PER_UNIT",
        default_value = "30"
    )]
    pub minutes_per_week_per_unit: Minutes,

    /// Staff cost per hour.
    #[clap(long = "labour-cost-per-hour", env = "LABOUR_COST_PER_HOUR", default_value = "25")]
    pub labour_cost_per_hour: EurosPerHour,

    /// Electricity cost per unit per month.
    #[clap(
        long = "electricity-per-month-per-unit",
        env = "ELECTRICITY_PER_MONTH_PER_UNIT",
        default_value = "4"
    )]
    pub electricity_per_month_per_unit: Euros,

    /// Include the per-unit monthly care plan.
    #[clap(
        long = "care-plan",
        env = "CARE_PLAN",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    pub care_plan_on: bool,

    /// Model this exact fleet size instead of the recommendation.
    #[clap(
        long = "units",
        env = "UNITS_OVERRIDE",
        value_parser = clap::value_parser!(u32).range(1..=50)
    )]
    pub units_override: Option<u32>,

    /// Purchase price per unit.
    #[clap(
        long = "purchase-price-per-unit",
        env = "PURCHASE_PRICE_PER_UNIT",
        default_value = "2290"
    )]
    pub purchase_price_per_unit: Euros,
}

impl InputArgs {
    /// Resolve the inputs: the TOML file when given, the flags otherwise.
    pub fn into_inputs(self) -> Result<CalculatorInputs> {
        let inputs = if let Some(path) = &self.inputs_file {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read the inputs from `{}`", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("failed to parse the inputs in `{}`", path.display()))?
        } else {
            CalculatorInputs {
                weekly_spend: self.weekly_spend,
                preset: self.preset,
                waste_percent: self.waste_percent,
                minutes_per_week_per_unit: self.minutes_per_week_per_unit,
                labour_cost_per_hour: self.labour_cost_per_hour,
                electricity_per_month_per_unit: self.electricity_per_month_per_unit,
                care_plan_on: self.care_plan_on,
                units_override: self.units_override,
                purchase_price_per_unit: self.purchase_price_per_unit,
            }
        };
        Ok(sanitise(inputs))
    }
}

/// Clamp file- and environment-sourced values to the editable ranges,
/// like the flag parsers do.
fn sanitise(mut inputs: CalculatorInputs) -> CalculatorInputs {
    inputs.weekly_spend = inputs.weekly_spend.max(Euros::ZERO);
    inputs.waste_percent = inputs.waste_percent.clamp(Percentage::ZERO, Percentage(80.0));
    inputs.minutes_per_week_per_unit = inputs.minutes_per_week_per_unit.min(Minutes(300));
    inputs.labour_cost_per_hour = inputs.labour_cost_per_hour.max(EurosPerHour::ZERO);
    inputs.electricity_per_month_per_unit =
        inputs.electricity_per_month_per_unit.max(Euros::ZERO);
    inputs.units_override = inputs.units_override.map(|units| units.clamp(1, 50));
    inputs.purchase_price_per_unit = inputs.purchase_price_per_unit.max(Euros::ZERO);
    inputs
}

/// Parse a `key=value` change the way the on-page number fields do:
/// unparsable numbers become zero and values are clamped to the editable
/// ranges. Unknown keys are an error.
pub fn parse_change(spec: &str) -> Result<InputChange, String> {
    let (key, value) =
        spec.split_once('=').ok_or_else(|| format!("expected `key=value`, got `{spec}`"))?;
    let change = match key {
        "weekly-spend" => InputChange::WeeklySpend(Euros(non_negative(value))),
        "preset" => InputChange::Preset(Preset::from_str(value, true)?),
        "waste-percent" => {
            InputChange::WastePercent(Percentage(parse_number(value).clamp(0.0, 80.0)))
        }
        "minutes-per-week-per-unit" => InputChange::MinutesPerWeekPerUnit(Minutes(
            value.parse::<u16>().unwrap_or_default().min(300),
        )),
        "labour-cost-per-hour" => {
            InputChange::LabourCostPerHour(EurosPerHour(non_negative(value)))
        }
        "electricity-per-month-per-unit" => {
            InputChange::ElectricityPerMonthPerUnit(Euros(non_negative(value)))
        }
        "care-plan" => InputChange::CarePlanOn(value.parse().unwrap_or_default()),
        "units-override" => InputChange::UnitsOverride(if value == "none" {
            None
        } else {
            Some(value.parse().unwrap_or(1).clamp(1, 50))
        }),
        "purchase-price-per-unit" => {
            InputChange::PurchasePricePerUnit(Euros(non_negative(value)))
        }
        _ => return Err(format!("unknown input `{key}`")),
    };
    Ok(change)
}

fn parse_number(value: &str) -> f64 {
    value.parse().unwrap_or_default()
}

fn non_negative(value: &str) -> f64 {
    parse_number(value).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_change_clamps_waste() {
        assert_eq!(
            parse_change("waste-percent=120"),
            Ok(InputChange::WastePercent(Percentage(80.0)))
        );
    }

    #[test]
    fn test_parse_change_defaults_garbage_to_zero() {
        assert_eq!(
            parse_change("weekly-spend=abc"),
            Ok(InputChange::WeeklySpend(Euros::ZERO))
        );
    }

    #[test]
    fn test_parse_change_override() {
        assert_eq!(
            parse_change("units-override=999"),
            Ok(InputChange::UnitsOverride(Some(50)))
        );
        assert_eq!(parse_change("units-override=none"), Ok(InputChange::UnitsOverride(None)));
    }

    #[test]
    fn test_parse_change_preset() {
        assert_eq!(parse_change("preset=low-waste"), Ok(InputChange::Preset(Preset::LowWaste)));
    }

    #[test]
    fn test_parse_change_rejects_unknown_keys() {
        assert!(parse_change("rocket-fuel=1").is_err());
        assert!(parse_change("weekly-spend").is_err());
    }

    #[test]
    fn test_sanitise_clamps_file_values() {
        let inputs = sanitise(CalculatorInputs {
            weekly_spend: Euros(-10.0),
            minutes_per_week_per_unit: Minutes(400),
            units_override: Some(70),
            ..CalculatorInputs::default()
        });

        assert_eq!(inputs.weekly_spend, Euros::ZERO);
        assert_eq!(inputs.minutes_per_week_per_unit, Minutes(300));
        assert_eq!(inputs.units_override, Some(50));
    }
}
