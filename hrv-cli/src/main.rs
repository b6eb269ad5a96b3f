//! HRV CLI - Command line tool for comparing HRRR rainfall forecasts with
//! observed rainfall.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "hrv-cli",
    version,
    about = "HRRR max-forecast vs observed rainfall viewer"
)]
struct Cli {
    #[command(subcommand)]
    command: hrv_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("hrv-cli {} starting", env!("CARGO_PKG_VERSION"));
    match hrv_cmd::run(cli.command).await {
        Err(err) => match hrv_cmd::selection_notice(&err) {
            Some(notice) => {
                eprintln!("{notice}");
                std::process::exit(2);
            }
            None => Err(err),
        },
        ok => ok,
    }
}
