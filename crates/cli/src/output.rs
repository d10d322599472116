//! Text and JSON rendering of simulation results.

use amm_il_domain::value_objects::DepositParameters;
use amm_il_simulation::curve::ValuationCurve;
use amm_il_simulation::hedge::HedgedSample;
use amm_il_simulation::monte_carlo::IlDistribution;
use anyhow::Result;
use clap::ValueEnum;
use prettytable::{Table, format, row};
use rust_decimal::Decimal;
use serde::Serialize;

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// JSON envelope carrying the inputs next to the results.
#[derive(Serialize)]
struct Report<'a, T: Serialize> {
    deposit: &'a DepositParameters,
    results: &'a T,
}

pub fn to_json<T: Serialize>(deposit: &DepositParameters, results: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(&Report {
        deposit,
        results,
    })?)
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    table
}

pub fn curve_table(curve: &ValuationCurve) -> Table {
    let mut table = new_table();
    table.set_titles(row!["Price", "HODL Value", "LP Value", "Gap", "IL %"]);
    for s in curve {
        table.add_row(row![
            format!("{:.2}", s.price.value),
            format!("{:.2}", s.hodl_value),
            format!("{:.2}", s.lp_value),
            format!("{:.2}", s.value_gap()),
            format!("{:.4}", s.impermanent_loss_pct()),
        ]);
    }
    table
}

pub fn hedged_table(samples: &[HedgedSample]) -> Table {
    let mut table = new_table();
    table.set_titles(row!["Price", "LP Value", "Put P/L", "LP + Put"]);
    for s in samples {
        table.add_row(row![
            format!("{:.2}", s.price.value),
            format!("{:.2}", s.lp_value),
            format!("{:.2}", s.put_value),
            format!("{:.2}", s.combined_value),
        ]);
    }
    table
}

pub fn distribution_table(dist: &IlDistribution) -> Table {
    let pct = |d: Decimal| format!("{:.4}", d * Decimal::ONE_HUNDRED);

    let mut table = new_table();
    table.set_titles(row!["Statistic", "IL %"]);
    table.add_row(row!["Mean", pct(dist.mean)]);
    table.add_row(row!["Median", pct(dist.median)]);
    table.add_row(row!["95th percentile", pct(dist.percentile_95)]);
    table.add_row(row!["Worst", pct(dist.worst)]);
    table.add_row(row!["Paths", dist.iterations]);
    table
}
