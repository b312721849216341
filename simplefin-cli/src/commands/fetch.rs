//! Fetch command - export every account with transactions to JSON files

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use simplefin_core::FetchQuery;

use super::get_context;
use crate::output;

pub fn run(output_dir: &Path, lookback_days: Option<u32>) -> Result<ExitCode> {
    let ctx = get_context()?;
    let lookback_days = lookback_days.unwrap_or(ctx.config.fetch_lookback_days);

    let result = ctx
        .client()?
        .fetch_accounts(&FetchQuery::all().with_lookback_days(lookback_days))?;

    output::provider_errors(&result.errors);
    output::info(&format!("Found {} accounts", result.accounts.len()));

    let planner = ctx.export_planner(output_dir);
    let report = planner.export(&result);

    for file in &report.written {
        let rel_path = file.path.strip_prefix(planner.root()).unwrap_or(&file.path);
        println!(
            "  {}: {} transactions -> {}",
            file.account_name,
            file.transactions,
            rel_path.display()
        );
    }

    for failure in &report.failures {
        println!("  {} {} - {}", "Failed:".red(), failure.account_id, failure.error);
    }

    println!();
    if report.is_complete() {
        output::success(&format!(
            "Wrote {} account files to {}",
            report.files_written,
            output_dir.display()
        ));
        Ok(ExitCode::SUCCESS)
    } else {
        output::warning(&format!(
            "Wrote {} account files to {}; {} failed",
            report.files_written,
            output_dir.display(),
            report.failures.len()
        ));
        Ok(ExitCode::FAILURE)
    }
}
