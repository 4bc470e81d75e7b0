use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use lens_logging::{lens_info, lens_warn};

mod platform;

/// Terminal client for the allegation analysis service.
#[derive(Parser, Debug)]
#[command(name = "lens_app")]
#[command(about = "Upload a complaint (PDF or DOCX) for analysis and browse the findings")]
#[command(version)]
struct Cli {
    /// Document to preselect, as if chosen in the file picker
    file: Option<PathBuf>,

    /// Base URL of the analysis server
    #[arg(short, long, env = "LENS_SERVER_URL")]
    server: Option<String>,

    /// Path to the RON config file
    #[arg(short, long, default_value = "lens.ron")]
    config: PathBuf,

    /// Submit FILE immediately, print the results and exit
    #[arg(long, requires = "file")]
    once: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Write the effective configuration to the config path and exit
    #[arg(long)]
    init_config: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let loaded = platform::config::load_config(&cli.config);
    let mut config = loaded.as_ref().cloned().unwrap_or_default();
    if let Some(server) = cli.server {
        config.server_url = server;
    }

    if cli.init_config {
        platform::config::write_config(&cli.config, &config)
            .with_context(|| format!("failed to write {}", cli.config.display()))?;
        println!("Wrote {}", cli.config.display());
        return Ok(ExitCode::SUCCESS);
    }

    platform::logging::initialize(config.log_destination, cli.verbose);
    if let Err(err) = &loaded {
        lens_warn!("{err}; falling back to defaults");
    }
    lens_info!("Starting lens_app against {}", config.server_url);

    let options = platform::app::RunOptions {
        preselect: cli.file,
        once: cli.once,
    };
    let succeeded = platform::app::run_app(config, options)?;
    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
