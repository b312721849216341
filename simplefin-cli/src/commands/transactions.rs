//! Transactions command - recent transactions for one account

use std::process::ExitCode;

use anyhow::Result;
use comfy_table::{Cell, Color};
use simplefin_core::{FetchQuery, Transaction};

use super::get_context;
use crate::{output, Format};

fn format_posted(tx: &Transaction) -> String {
    tx.posted_at()
        .map(|dt| dt.format("%d %b %Y").to_string())
        .unwrap_or_else(|| tx.posted.to_string())
}

pub fn run(account_id: &str, lookback_days: Option<u32>, format: Format) -> Result<ExitCode> {
    let ctx = get_context()?;
    let lookback_days = lookback_days.unwrap_or(ctx.config.transactions_lookback_days);

    let query = FetchQuery::account(account_id).with_lookback_days(lookback_days);
    let result = ctx.client()?.fetch_accounts(&query)?;

    output::provider_errors(&result.errors);

    if format == Format::Json {
        output::json(&result)?;
        return Ok(ExitCode::SUCCESS);
    }

    let transactions = result
        .account(account_id)
        .map(|a| a.transactions.as_slice())
        .unwrap_or_default();

    if transactions.is_empty() {
        println!("No transactions found");
        return Ok(ExitCode::SUCCESS);
    }

    let mut table = output::create_table();
    table.set_header(vec!["Date", "Payee", "Amount"]);

    // Providers usually send chronological order; sort newest first for display only
    let mut rows: Vec<&Transaction> = transactions.iter().collect();
    rows.sort_by(|a, b| b.posted.cmp(&a.posted));

    for tx in rows {
        let amount = if tx.is_debit() {
            Cell::new(tx.amount).fg(Color::Red)
        } else {
            Cell::new(tx.amount).fg(Color::Green)
        };
        table.add_row(vec![
            Cell::new(format_posted(tx)),
            Cell::new(tx.display_payee()),
            amount,
        ]);
    }

    println!("Transactions for {}", account_id);
    println!("{}", table);

    Ok(ExitCode::SUCCESS)
}
