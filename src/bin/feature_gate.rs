// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command line tool for managing feature flags.

use clap::{Parser, Subcommand, ValueEnum};
use feature_gate::adapters::PosthogSettings;
use feature_gate::domain::{Feature, Result};
use feature_gate::service::{Client, ClientBuilder};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Backend {
    /// In-process store, lost on exit
    Memory,
    /// Posthog feature flag API
    Posthog,
    /// Redis server
    Redis,
}

/// Manage feature flags stored in Posthog, Redis or memory.
#[derive(Parser, Debug)]
#[command(name = "feature-gate", version)]
struct Cli {
    /// Storage backend
    #[arg(long, value_enum, default_value_t = Backend::Posthog)]
    backend: Backend,

    /// Posthog API base URL
    #[arg(long)]
    api_base: Option<String>,

    /// Posthog personal API key
    #[arg(long)]
    api_key: Option<String>,

    /// Posthog project id
    #[arg(long)]
    project_id: Option<String>,

    /// YAML file with Posthog settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Redis connection URL
    #[arg(long, default_value = "redis://127.0.0.1:6379")]
    redis_url: String,

    /// Redis key namespace
    #[arg(long, default_value = "feature_gate")]
    namespace: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List feature keys
    List,
    /// Register a feature
    Add {
        /// Feature key
        key: String,
        /// Display name, defaults to the key
        #[arg(long)]
        name: Option<String>,
        /// Description
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Remove a feature
    Remove {
        /// Feature key
        key: String,
    },
    /// Turn a feature on
    Enable {
        /// Feature key
        key: String,
    },
    /// Turn a feature off
    Disable {
        /// Feature key
        key: String,
    },
    /// Show whether a feature is on
    Status {
        /// Feature key
        key: String,
    },
}

fn posthog_settings(cli: &Cli) -> Result<PosthogSettings> {
    let mut builder = PosthogSettings::builder();
    if let Some(path) = &cli.config {
        builder = builder.with_yaml_file(path)?;
    }
    if let Some(api_base) = &cli.api_base {
        builder = builder.api_base(api_base);
    }
    if let Some(api_key) = &cli.api_key {
        builder = builder.api_key(api_key);
    }
    if let Some(project_id) = &cli.project_id {
        builder = builder.project_id(project_id);
    }
    builder.build()
}

fn build_client(cli: &Cli) -> Result<Client> {
    let builder = ClientBuilder::new();
    let builder = match cli.backend {
        Backend::Memory => builder.with_memory(),
        Backend::Posthog => builder.with_posthog(posthog_settings(cli)?)?,
        Backend::Redis => redis_backend(builder, cli)?,
    };
    builder.build()
}

#[cfg(feature = "redis")]
fn redis_backend(builder: ClientBuilder, cli: &Cli) -> Result<ClientBuilder> {
    let adapter = feature_gate::adapters::RedisAdapter::new(&cli.redis_url, &cli.namespace)?;
    Ok(builder.with_adapter(adapter))
}

#[cfg(not(feature = "redis"))]
fn redis_backend(_builder: ClientBuilder, _cli: &Cli) -> Result<ClientBuilder> {
    Err(feature_gate::domain::FeatureGateError::config(
        "Redis backend requires the `redis` feature",
    ))
}

fn run(cli: &Cli) -> Result<()> {
    let client = build_client(cli)?;
    tracing::info!(backend = client.adapter().name(), "client ready");

    match &cli.command {
        Command::List => {
            for key in client.features()? {
                println!("{}", key);
            }
        }
        Command::Add {
            key,
            name,
            description,
        } => {
            let name = name.as_deref().unwrap_or(key);
            client.add(&Feature::new(name, key.as_str(), description.as_str()))?;
            println!("added {}", key);
        }
        Command::Remove { key } => {
            client.remove(key)?;
            println!("removed {}", key);
        }
        Command::Enable { key } => {
            client.enable(key)?;
            println!("enabled {}", key);
        }
        Command::Disable { key } => {
            client.disable(key)?;
            println!("disabled {}", key);
        }
        Command::Status { key } => match client.is_enabled(key) {
            Ok(true) => println!("{} is enabled", key),
            Ok(false) => println!("{} is disabled", key),
            Err(e) if e.is_not_found() => println!("{}", e),
            Err(e) => return Err(e),
        },
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let project_root = std::env::var("PROJECT_ROOT").unwrap_or_else(|_| ".".to_string());
    if let Err(e) = feature_gate::logging::init_file_logging(&project_root) {
        eprintln!("warning: file logging disabled: {}", e);
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("error: {}", e);
            ExitCode::from(1)
        }
    }
}
