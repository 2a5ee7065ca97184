#![doc = include_str!("../README.md")]

mod cli;
mod core;
mod fmt;
mod prelude;
mod quantity;
mod tables;
mod tracking;

use clap::{Parser, crate_version};

use crate::{
    cli::{Args, Command},
    core::inputs::CalculatorInputs,
    prelude::*,
    tracking::Tracker,
};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().init();
    info!(version = crate_version!(), "starting…");

    let mut tracker = Tracker::default();
    match Args::parse().command {
        Command::Estimate(args) => cli::estimate(*args, &mut tracker)?,
        Command::Sweep(args) => cli::sweep(*args)?,
        Command::Defaults => print!("{}", toml::to_string_pretty(&CalculatorInputs::default())?),
    }

    info!("done!");
    Ok(())
}
