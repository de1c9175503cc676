//! `student-type-web` entry point.
//!
//! ## Modes
//!
//! - **Service mode** (default): load the classifier, bind the listener and
//!   serve until Ctrl+C. A missing or corrupt model does not stop startup;
//!   prediction routes report it instead.
//! - **`--check-model`**: load the artifacts, report the outcome and exit.
//!   Exits non-zero when the model cannot be loaded.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use student_type_core::ClassifierState;
use student_type_web::AppState;
use student_type_web::config::ConfigLoader;
use student_type_web::config::ServiceConfig;
use tokio::net::TcpListener;

#[derive(Debug, Parser)]
#[command(name = "student-type-web", version, about = "Student type prediction service")]
struct Cli {
    /// Configuration file (defaults to ./student-type.toml or the user config dir)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Address to listen on, e.g. 127.0.0.1:5000
    #[arg(long, value_name = "ADDR")]
    bind: Option<String>,

    /// Serialized classifier artifact
    #[arg(long, value_name = "FILE")]
    model: Option<PathBuf>,

    /// Serialized label encoder artifact
    #[arg(long, value_name = "FILE")]
    encoder: Option<PathBuf>,

    /// Load the model, report whether it is usable, and exit
    #[arg(long)]
    check_model: bool,
}

impl Cli {
    fn resolve_config(&self) -> anyhow::Result<ServiceConfig> {
        let mut config = match &self.config {
            Some(path) => ConfigLoader::new().with_file(path).load(),
            None => ConfigLoader::load_default(),
        }
        .context("loading configuration")?;

        if let Some(bind) = &self.bind {
            config.bind_addr = bind.clone();
        }
        if let Some(model) = &self.model {
            config.model.model_path = model.clone();
        }
        if let Some(encoder) = &self.encoder {
            config.model.encoder_path = encoder.clone();
        }
        config.validate().context("validating configuration")?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    tracing::info!("student-type-web v{} starting", env!("CARGO_PKG_VERSION"));

    let classifier = ClassifierState::load(&config.model.model_path, &config.model.encoder_path);

    if cli.check_model {
        return match &classifier {
            ClassifierState::Ready(loaded) => {
                tracing::info!(
                    "Model OK: {} classifier over {} classes",
                    loaded.capability(),
                    loaded.classes().len()
                );
                Ok(())
            }
            ClassifierState::Unavailable { reason } => {
                anyhow::bail!("model unavailable: {reason}")
            }
        };
    }

    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
        tracing::info!("Signal received, shutting down");
    };

    student_type_web::serve(listener, AppState::new(classifier), shutdown)
        .await
        .context("serving HTTP")?;

    tracing::info!("student-type-web exiting cleanly");
    Ok(())
}
