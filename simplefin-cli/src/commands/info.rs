//! Info command - protocol versions supported by the server

use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;

use super::get_context;

pub fn run() -> Result<ExitCode> {
    let ctx = get_context()?;
    let client = ctx.client()?;
    let info = client.get_info()?;

    println!("{} {}", "Server:".bold(), client.credential());
    if info.versions.is_empty() {
        println!("No protocol versions advertised");
    } else {
        println!("{} {}", "Protocol versions:".bold(), info.versions.join(", "));
    }

    Ok(ExitCode::SUCCESS)
}
