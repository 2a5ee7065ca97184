use clap::Parser;

use crate::{
    cli::{InputArgs, parse_change},
    core::{
        estimator::{Estimator, MIN_COVERAGE_BEST_PAYBACK},
        inputs::InputChange,
        mode::RecommendationMode,
    },
    fmt::FormattedPercentage,
    prelude::*,
    tables::{build_breakdown_table, build_summary_table},
    tracking::{Event, Tracker},
};

#[must_use]
#[derive(Parser)]
pub struct EstimateArgs {
    #[clap(flatten)]
    pub inputs: InputArgs,

    /// Recommendation strategy used when no manual fleet size is set.
    #[clap(long, env = "RECOMMENDATION_MODE", value_enum, default_value = "best-payback")]
    pub mode: RecommendationMode,

    /// Apply a `key=value` change on top of the resolved inputs, in order.
    #[clap(long = "set", value_parser = parse_change)]
    pub set: Vec<InputChange>,

    /// Emit the estimate as JSON instead of tables.
    #[clap(long)]
    pub json: bool,
}

#[instrument(skip_all)]
pub fn estimate(args: EstimateArgs, tracker: &mut Tracker) -> Result {
    let mut inputs = args.inputs.into_inputs()?;
    tracker.track_once(Event::CalculatorStarted);

    for change in args.set {
        inputs.apply(change);
        tracker.track_once(Event::CalculatorChanged);
    }
    if args.mode != RecommendationMode::default() {
        tracker.track_once(Event::ModeChanged);
    }

    let estimate = Estimator::builder().inputs(&inputs).mode(args.mode).estimate();
    info!(units = estimate.units_modeled, savings = %estimate.savings_per_month, "estimated");
    if estimate.coverage > 0.0 && estimate.coverage < MIN_COVERAGE_BEST_PAYBACK {
        warn!(
            coverage = %FormattedPercentage(estimate.coverage),
            "the modeled fleet covers only part of actual usage"
        );
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&estimate)?);
    } else {
        println!("{}", build_summary_table(&estimate));
        println!("{}", build_breakdown_table(&estimate));
    }
    Ok(())
}
