use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use bulkfs::cli::{run, Cli};
use bulkfs::logging::init_logging;
use bulkfs::settings::load_settings;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match real_main(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("bulkfs: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn real_main(cli: &Cli) -> anyhow::Result<bool> {
    let settings = load_settings(cli.config.as_deref()).context("loading settings")?;
    let _guard = init_logging(&settings.log, cli.verbose).context("initialising logging")?;
    tracing::debug!(command = ?cli.command, "starting");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let answer = run(&cli.command, &settings, &mut out)?;
    out.flush()?;
    Ok(answer)
}
