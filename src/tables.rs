use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    core::{
        estimate::Estimate,
        estimator::{MIN_COVERAGE_BEST_PAYBACK, Sweep},
    },
    fmt::{FormattedPayback, FormattedPercentage},
    quantity::currency::Euros,
};

fn styled() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

pub fn build_summary_table(estimate: &Estimate) -> Table {
    let savings_color = if estimate.is_positive_payback() { Color::Green } else { Color::Red };
    let mut table = styled();
    table
        .set_header(vec!["Units", "Savings / mo", "Savings / yr", "Payback", "Coverage", "Capex"])
        .add_row(vec![
            Cell::new(estimate.units_modeled).add_attribute(Attribute::Bold),
            Cell::new(estimate.savings_per_month)
                .set_alignment(CellAlignment::Right)
                .fg(savings_color),
            Cell::new(estimate.savings_per_year)
                .set_alignment(CellAlignment::Right)
                .fg(savings_color),
            Cell::new(FormattedPayback(estimate.payback_months))
                .set_alignment(CellAlignment::Right),
            Cell::new(FormattedPercentage(estimate.coverage)).set_alignment(CellAlignment::Right),
            Cell::new(estimate.capex_total)
                .set_alignment(CellAlignment::Right)
                .add_attribute(Attribute::Dim),
        ]);
    table
}

pub fn build_breakdown_table(estimate: &Estimate) -> Table {
    let mut table = styled();
    table.set_header(vec!["", "Per month"]);
    for (label, amount) in [
        ("Paid spend", estimate.paid_spend_per_month),
        ("Used value", estimate.used_value_per_month),
        ("Avoided spend", estimate.avoided_spend),
        ("Care plan", estimate.breakdown.care_plan),
        ("Electricity", estimate.breakdown.electricity),
        ("Labour", estimate.breakdown.labour),
        ("Operating total", estimate.breakdown.total()),
        ("Spare capacity", estimate.spare_capacity_value),
    ] {
        table.add_row(vec![
            Cell::new(label).add_attribute(Attribute::Dim),
            Cell::new(amount).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

pub fn build_sweep_table(sweep: &Sweep) -> Table {
    let mut table = styled();
    table.set_header(vec![
        "Units", "Coverage", "Avoided", "Operating", "Savings", "Capex", "Payback",
    ]);
    for scenario in &sweep.scenarios {
        let mut units_cell = Cell::new(scenario.units);
        if scenario.units == sweep.units_recommended {
            units_cell = units_cell.add_attribute(Attribute::Bold);
        }
        table.add_row(vec![
            units_cell,
            Cell::new(FormattedPercentage(scenario.coverage))
                .set_alignment(CellAlignment::Right)
                .fg(if scenario.coverage < MIN_COVERAGE_BEST_PAYBACK {
                    Color::Red
                } else {
                    Color::Reset
                }),
            Cell::new(scenario.avoided_spend).set_alignment(CellAlignment::Right),
            Cell::new(scenario.operating_cost).set_alignment(CellAlignment::Right),
            Cell::new(scenario.savings).set_alignment(CellAlignment::Right).fg(
                if scenario.savings > Euros::ZERO { Color::Green } else { Color::Red },
            ),
            Cell::new(scenario.capex).set_alignment(CellAlignment::Right).add_attribute(Attribute::Dim),
            Cell::new(FormattedPayback(scenario.payback)).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}
