use clap::Parser;

use crate::{
    cli::InputArgs,
    core::{estimator::Estimator, mode::RecommendationMode},
    prelude::*,
    tables::build_sweep_table,
};

#[must_use]
#[derive(Parser)]
pub struct SweepArgs {
    #[clap(flatten)]
    pub inputs: InputArgs,

    /// Recommendation strategy to highlight in the table.
    #[clap(long, env = "RECOMMENDATION_MODE", value_enum, default_value = "best-payback")]
    pub mode: RecommendationMode,

    /// Highest fleet size to tabulate; defaults to one past full coverage.
    #[clap(long, value_parser = clap::value_parser!(u32).range(1..=50))]
    pub limit: Option<u32>,
}

pub fn sweep(args: SweepArgs) -> Result {
    let inputs = args.inputs.into_inputs()?;
    let sweep = Estimator::builder().inputs(&inputs).mode(args.mode).sweep(args.limit);
    println!("{}", build_sweep_table(&sweep));
    Ok(())
}
