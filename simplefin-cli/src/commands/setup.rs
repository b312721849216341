//! Setup command - exchange a setup token for an access URL

use std::io::BufRead;
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use dialoguer::Input;
use simplefin_core::config::ACCESS_URL_ENV;

use super::get_context;

pub fn run(token: Option<String>) -> Result<ExitCode> {
    let ctx = get_context()?;

    let setup_token = match token {
        Some(t) => t,
        None if atty::is(atty::Stream::Stdin) => Input::new()
            .with_prompt("Please provide your setup token")
            .interact_text()?,
        None => {
            let mut line = String::new();
            std::io::stdin()
                .lock()
                .read_line(&mut line)
                .context("Failed to read setup token from stdin")?;
            line
        }
    };

    let access_url = ctx.claim_access_url(&setup_token)?;

    println!();
    println!("{} {}", "Access URL:".bold(), access_url);
    println!();
    println!("For security reasons we do not store the access URL on disk for you.");
    println!(
        "Please store it securely (for example in {}); setup tokens are not reusable.",
        ACCESS_URL_ENV
    );

    Ok(ExitCode::SUCCESS)
}
