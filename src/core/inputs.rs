use serde::{Deserialize, Serialize};

use crate::quantity::{
    currency::{Euros, EurosPerHour},
    ratios::Percentage,
    time::Minutes,
};

/// User-editable calculator state. Each estimation reads a snapshot of it;
/// the engine never mutates it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorInputs {
    /// Weekly spend on bought-in stock.
    pub weekly_spend: Euros,

    pub preset: Preset,

    /// Only read when the preset is custom.
    pub waste_percent: Percentage,

    /// Weekly handling time per unit. Only read when the preset is custom.
    pub minutes_per_week_per_unit: Minutes,

    pub labour_cost_per_hour: EurosPerHour,

    pub electricity_per_month_per_unit: Euros,

    /// Fixed recurring per-unit monthly fee bundling consumables.
    pub care_plan_on: bool,

    /// Manual fleet size; takes precedence over the recommendation.
    pub units_override: Option<u32>,

    pub purchase_price_per_unit: Euros,
}

impl Default for CalculatorInputs {
    fn default() -> Self {
        Self {
            weekly_spend: Euros(120.0),
            preset: Preset::Typical,
            waste_percent: Percentage(15.0),
            minutes_per_week_per_unit: Minutes(30),
            labour_cost_per_hour: EurosPerHour(25.0),
            electricity_per_month_per_unit: Euros(4.0),
            care_plan_on: true,
            units_override: None,
            purchase_price_per_unit: Euros(2290.0),
        }
    }
}

impl CalculatorInputs {
    pub fn effective_waste(&self) -> Percentage {
        self.preset.assumptions().map_or(self.waste_percent, |(waste, _)| waste)
    }

    pub fn effective_minutes(&self) -> Minutes {
        self.preset.assumptions().map_or(self.minutes_per_week_per_unit, |(_, minutes)| minutes)
    }

    /// Apply a single field change.
    ///
    /// Switching to a non-custom preset also overwrites the stored waste and
    /// handling-time fields with that preset's fixed assumptions.
    pub const fn apply(&mut self, change: InputChange) {
        match change {
            InputChange::WeeklySpend(value) => self.weekly_spend = value,
            InputChange::Preset(preset) => {
                self.preset = preset;
                if let Some((waste, minutes)) = preset.assumptions() {
                    self.waste_percent = waste;
                    self.minutes_per_week_per_unit = minutes;
                }
            }
            InputChange::WastePercent(value) => self.waste_percent = value,
            InputChange::MinutesPerWeekPerUnit(value) => self.minutes_per_week_per_unit = value,
            InputChange::LabourCostPerHour(value) => self.labour_cost_per_hour = value,
            InputChange::ElectricityPerMonthPerUnit(value) => {
                self.electricity_per_month_per_unit = value;
            }
            InputChange::CarePlanOn(value) => self.care_plan_on = value,
            InputChange::UnitsOverride(value) => self.units_override = value,
            InputChange::PurchasePricePerUnit(value) => self.purchase_price_per_unit = value,
        }
    }
}

/// Waste and handling-time assumptions.
#[derive(Copy, Clone, Debug, Eq, PartialEq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    Typical,
    LowWaste,
    HighWaste,

    /// Read the waste and handling-time fields as entered.
    Custom,
}

impl Preset {
    /// Fixed (waste, weekly handling time per unit) assumptions,
    /// or [`None`] for the custom preset.
    pub const fn assumptions(self) -> Option<(Percentage, Minutes)> {
        match self {
            Self::Typical => Some((Percentage(15.0), Minutes(30))),
            Self::LowWaste => Some((Percentage(10.0), Minutes(20))),
            Self::HighWaste => Some((Percentage(25.0), Minutes(30))),
            Self::Custom => None,
        }
    }
}

/// Single field update, as produced by the front-end controls.
#[derive(Clone, Debug, PartialEq)]
pub enum InputChange {
    WeeklySpend(Euros),
    Preset(Preset),
    WastePercent(Percentage),
    MinutesPerWeekPerUnit(Minutes),
    LabourCostPerHour(EurosPerHour),
    ElectricityPerMonthPerUnit(Euros),
    CarePlanOn(bool),
    UnitsOverride(Option<u32>),
    PurchasePricePerUnit(Euros),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_switch_resets_custom_fields() {
        let mut inputs = CalculatorInputs {
            preset: Preset::Custom,
            waste_percent: Percentage(40.0),
            minutes_per_week_per_unit: Minutes(120),
            ..CalculatorInputs::default()
        };

        inputs.apply(InputChange::Preset(Preset::Typical));

        assert_eq!(inputs.waste_percent, Percentage(15.0));
        assert_eq!(inputs.minutes_per_week_per_unit, Minutes(30));
    }

    #[test]
    fn test_switch_to_custom_keeps_stored_fields() {
        let mut inputs = CalculatorInputs::default();
        inputs.apply(InputChange::Preset(Preset::Custom));

        assert_eq!(inputs.waste_percent, Percentage(15.0));
        assert_eq!(inputs.minutes_per_week_per_unit, Minutes(30));
    }

    #[test]
    fn test_effective_values_ignore_stored_fields_for_presets() {
        let inputs = CalculatorInputs {
            preset: Preset::HighWaste,
            waste_percent: Percentage(5.0),
            minutes_per_week_per_unit: Minutes(1),
            ..CalculatorInputs::default()
        };

        assert_eq!(inputs.effective_waste(), Percentage(25.0));
        assert_eq!(inputs.effective_minutes(), Minutes(30));
    }

    #[test]
    fn test_toml_round_trip() {
        let inputs = CalculatorInputs { units_override: Some(3), ..CalculatorInputs::default() };
        let serialized = toml::to_string(&inputs).unwrap();
        assert_eq!(toml::from_str::<CalculatorInputs>(&serialized).unwrap(), inputs);
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let inputs: CalculatorInputs = toml::from_str("weekly_spend = 200.0").unwrap();
        assert_eq!(inputs.weekly_spend, Euros(200.0));
        assert_eq!(inputs.preset, Preset::Typical);
        assert!(inputs.care_plan_on);
    }
}
