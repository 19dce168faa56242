//! localdev - Deploy services, tools and CI/CD config to a local Minikube cluster.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use localdev::cli::output;
use localdev::cli::{execute, Cli};
use localdev::error::{ConfigError, Error, SecretError};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env("LOCALDEV_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("localdev=debug")
        } else {
            EnvFilter::new("localdev=warn")
        }
    });

    let json = std::env::var("LOCALDEV_LOG_FORMAT").is_ok_and(|v| v == "json");
    let ansi = std::env::var_os("NO_COLOR").is_none();
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .without_time()
                    .with_ansi(ansi)
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    if let Err(e) = execute(&cli) {
        let suggestion = match &e {
            Error::Config(ConfigError::MissingVar(var)) => {
                Some(format!("export {}=<path to service checkouts>", var))
            }
            Error::Secret(SecretError::Unavailable) => {
                Some("check gcloud auth and the secret ids (LOCALDEV_LOG=debug for details)".to_string())
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(&hint);
        }
        std::process::exit(1);
    }
}
