use anyhow::{Context, Result};
use clap::Parser;

use ets_cli::args::CliArgs;
use ets_cli::driver;

fn main() -> Result<()> {
    // Enabled by ETS_LOG or RUST_LOG, format by ETS_LOG_FORMAT=text|tree|json.
    ets_cli::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let output = driver::run(&args)?;
    let text = if args.pretty {
        serde_json::to_string_pretty(&output)
    } else {
        serde_json::to_string(&output)
    }
    .context("failed to format output")?;
    println!("{text}");
    Ok(())
}
