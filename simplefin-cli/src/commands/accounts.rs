//! Accounts command - list accounts and balances

use std::process::ExitCode;

use anyhow::Result;
use simplefin_core::FetchQuery;

use super::get_context;
use crate::{output, Format};

pub fn run(format: Format) -> Result<ExitCode> {
    let ctx = get_context()?;
    let result = ctx.client()?.fetch_accounts(&FetchQuery::all().balances_only())?;

    output::provider_errors(&result.errors);

    if format == Format::Json {
        output::json(&result.accounts)?;
        return Ok(ExitCode::SUCCESS);
    }

    let mut table = output::create_table();
    table.set_header(vec!["Institution", "Account", "Balance", "Account ID"]);

    for account in &result.accounts {
        table.add_row(vec![
            account.org.display_name().to_string(),
            account.name.clone(),
            account.balance.to_string(),
            account.id.clone(),
        ]);
    }

    println!("SimpleFIN Accounts");
    println!("{}", table);

    Ok(ExitCode::SUCCESS)
}
