mod app_config;
mod bot;
mod camera;
mod cli;
mod common;
mod config_loader;
mod errors;
mod motion;
mod operations;
mod relay;

use anyhow::{bail, Result};
use common::logging_setup;
use log::{debug, error, info};
use std::path::Path;
use std::time::Instant;

#[tokio::main]
async fn main() -> Result<()> {
    let main_start_time = Instant::now();
    let matches = cli::build_cli().get_matches();

    let op_result = match matches.subcommand() {
        Some(("list-cameras", sub_matches)) => {
            logging_setup::initialize_logging(None, &matches);
            operations::list_cameras_op::handle_list_cameras_cli(sub_matches).await
        }
        Some(("run", _)) | None => run_bridge(&matches).await,
        Some((other, _)) => bail!("Subcommand '{}' not implemented.", other),
    };

    if let Err(e) = op_result {
        error!("❌ nxbot failed after {:?}: {:#}", main_start_time.elapsed(), e);
        return Err(e);
    }
    info!("🏁 nxbot finished in {:?}.", main_start_time.elapsed());
    Ok(())
}

async fn run_bridge(matches: &clap::ArgMatches) -> Result<()> {
    let config_path = matches
        .get_one::<String>("config")
        .map(|s| s.as_str())
        .unwrap_or(config_loader::DEFAULT_CONFIG_PATH);

    let config = match config_loader::load_config(Path::new(config_path)) {
        Ok(cfg) => {
            logging_setup::initialize_logging(cfg.log_level.as_deref(), matches);
            debug!("Resolved configuration: {:?}", cfg);
            cfg
        }
        Err(e) => {
            logging_setup::initialize_logging(None, matches);
            return Err(e);
        }
    };

    operations::run_bridge_op::handle_run_bridge(&config).await
}
