// src/cli.rs
use std::env;

use color_eyre::eyre::{Result, WrapErr, bail};

use crate::config::AppOptions;
use crate::progress::LogProgress;

/// Process entry: parse the (tiny) command line, load configuration, run.
pub fn run() -> Result<()> {
    color_eyre::install()?;
    parse_cli()?;

    // .env is optional; real environment wins.
    dotenvy::dotenv().ok();
    crate::log::init();

    let opts = AppOptions::from_env().wrap_err("configuration")?;
    tracing::info!(
        workbook = %opts.sheet.spreadsheet_key,
        api = %opts.endpoints.api_base,
        workers = opts.fetch.workers,
        "starting pipeline"
    );

    let mut progress = LogProgress::default();
    let summary = crate::runner::run(&opts, &mut progress).wrap_err("pipeline aborted")?;

    let r = &summary.report;
    for (table, cause) in &r.failed {
        tracing::warn!(table = %table, cause = %cause, "table not published");
    }
    tracing::info!(
        players = summary.players,
        history_rows = summary.history_rows,
        history_skipped = summary.history_failures,
        published = r.published.len(),
        skipped_empty = r.skipped_empty.len(),
        skipped_no_auth = r.skipped_no_auth.len(),
        failed = r.failed.len(),
        "pipeline completed"
    );
    Ok(())
}

fn parse_cli() -> Result<()> {
    let mut args = env::args().skip(1);
    if let Some(a) = args.next() {
        match a.as_str() {
            "-h" | "--help" => {
                eprintln!("{}", include_str!("cli_help.txt"));
                std::process::exit(0);
            }
            _ => bail!("Unknown arg: {a} (try --help)"),
        }
    }
    Ok(())
}
