use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tactight_core::{CalibrationTable, estimate_parameter};
use tactight_fetch::{GenerateError, ReqwestClient};
use tracing::info;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::notify::ConsoleNotifier;
use crate::ui::BusyIndicator;
use crate::workflow::Workflow;

/// Generate TacTight haptic strap STL files.
#[derive(Parser, Debug)]
#[command(name = "tactight")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a configuration file (default: ./tactight.toml)
    #[arg(long, global = true, env = "TACTIGHT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Generation API base URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Directory downloads are saved to
    #[arg(long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the spring thickness estimated for a measured force
    Estimate {
        /// Force in newtons
        #[arg(long)]
        force: f64,
    },

    /// Request a strap and save the STL, or the whole kit with --kit
    Generate {
        /// Force in newtons
        #[arg(long)]
        force: Option<f64>,

        /// Strap width in millimetres
        #[arg(long)]
        strap_width: Option<f64>,

        /// Save TacTight_kit.zip with the companion files instead of the bare STL
        #[arg(long)]
        kit: bool,

        /// Wait out a rate limit once and retry
        #[arg(long)]
        wait_on_rate_limit: bool,
    },
}

impl Cli {
    /// Apply command-line overrides on top of the loaded configuration.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(api_url) = &self.api_url {
            config.api_url = api_url.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            config.output_dir = output_dir.clone();
        }
        if let Command::Generate {
            wait_on_rate_limit: true,
            ..
        } = self.command
        {
            config.wait_on_rate_limit = true;
        }
        config
    }
}

pub async fn run(command: Command, config: Config) -> Result<()> {
    match command {
        Command::Estimate { force } => {
            let thickness = estimate_parameter(force, &CalibrationTable::default())?;
            println!("{thickness} mm");
            Ok(())
        }
        Command::Generate {
            force,
            strap_width,
            kit,
            ..
        } => {
            let client = ReqwestClient::with_setting(config.client_setting()?)?;
            let mut workflow = Workflow::new(client, &config, ConsoleNotifier::new(), BusyIndicator::new())?;

            let mut result = workflow.generate(force, strap_width).await;
            if let Err(Error::Generate(GenerateError::RateLimited { retry_after })) = &result
                && config.wait_on_rate_limit
            {
                info!(retry_after_secs = retry_after.as_secs(), "waiting out rate limit");
                tokio::time::sleep(*retry_after).await;
                result = workflow.generate(force, strap_width).await;
            }
            result?;

            let saved = if kit {
                workflow.download_kit().await?
            } else {
                workflow.download_artifact()?
            };
            println!("{}", saved.display());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_generate_with_globals() {
        let cli = Cli::try_parse_from([
            "tactight",
            "--api-url",
            "http://gateway.local/api/",
            "generate",
            "--force",
            "7.61",
            "--strap-width",
            "30",
            "--kit",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Command::Generate {
                force:              Some(7.61),
                strap_width:        Some(30.0),
                kit:                true,
                wait_on_rate_limit: false,
            }
        );
        let config = cli.apply(Config::default());
        assert_eq!(config.api_url, "http://gateway.local/api/");
        assert!(!config.wait_on_rate_limit);
    }

    #[test]
    fn wait_flag_overrides_config() {
        let cli = Cli::try_parse_from(["tactight", "generate", "--wait-on-rate-limit", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(cli.apply(Config::default()).wait_on_rate_limit);
    }

    #[test]
    fn estimate_requires_force() {
        assert!(Cli::try_parse_from(["tactight", "estimate"]).is_err());
        let cli = Cli::try_parse_from(["tactight", "estimate", "--force", "9.42"]).unwrap();
        assert_eq!(cli.command, Command::Estimate { force: 9.42 });
    }
}
