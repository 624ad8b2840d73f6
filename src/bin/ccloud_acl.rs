use clap::{Parser, Subcommand};
use confluentcloud_acl_provider::error::ProviderError;
use confluentcloud_acl_provider::provider::resource_schemas;
use confluentcloud_acl_provider::resource::diagnostics::{self, Diagnostic};
use confluentcloud_acl_provider::resource::{
    acl_schema, import_passthrough, plan_change, ReadOutcome, ResourceData,
};
use confluentcloud_acl_provider::{Provider, ProviderConfig, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "ccloud-acl")]
#[command(about = "Manage Confluent Cloud Kafka ACLs through the confluentcloud_acl resource lifecycle")]
#[command(version)]
struct Cli {
    /// Provider configuration file (TOML). Credentials may also come from
    /// CONFLUENT_CLOUD_API_KEY / CONFLUENT_CLOUD_API_SECRET.
    #[arg(long)]
    provider_config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resource schema
    Schema,
    /// Create the ACL described by a JSON attribute file
    Create {
        #[arg(long)]
        config: PathBuf,
    },
    /// Refresh a state file from the cluster
    Read {
        #[arg(long)]
        state: PathBuf,
    },
    /// Delete the ACL recorded in a state file
    Delete {
        #[arg(long)]
        state: PathBuf,
    },
    /// Adopt an existing ACL by name
    Import { id: String },
    /// Show what applying a configuration to a state would do
    Plan {
        #[arg(long)]
        state: Option<PathBuf>,
        #[arg(long)]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        report(&diagnostics::from_error(&e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Schema => print_json(&resource_schemas()),
        Commands::Create { config } => {
            let resource = load_provider(cli.provider_config.as_deref())?.acl_resource();
            let mut data = ResourceData::from_attributes(read_attributes(&config)?);
            resource.create(&mut data).await?;
            print_json(&data)
        }
        Commands::Read { state } => {
            let resource = load_provider(cli.provider_config.as_deref())?.acl_resource();
            let mut data = read_state(&state)?;
            if resource.read(&mut data).await? == ReadOutcome::Gone {
                report(&[Diagnostic::warning("ACL no longer exists and was removed from state")]);
            }
            print_json(&data)
        }
        Commands::Delete { state } => {
            let resource = load_provider(cli.provider_config.as_deref())?.acl_resource();
            let mut data = read_state(&state)?;
            resource.delete(&mut data).await?;
            print_json(&data)
        }
        Commands::Import { id } => {
            // Passthrough import needs no remote access, so no credentials either.
            print_json(&import_passthrough(&id)?)
        }
        Commands::Plan { state, config } => {
            // Planning is a local diff, so no credentials are needed.
            let prior = state.as_deref().map(read_state).transpose()?;
            let proposed = ResourceData::from_attributes(read_attributes(&config)?);
            let plan = plan_change(&acl_schema(), prior.as_ref(), &proposed)?;
            print_json(&plan)
        }
    }
}

fn load_provider(path: Option<&Path>) -> Result<Provider> {
    let mut config = match path {
        Some(path) => {
            debug!("Loading provider configuration from {}", path.display());
            ProviderConfig::from_file(&path.to_string_lossy())?
        }
        None => ProviderConfig::default(),
    };
    config.apply_env();
    info!("Using id format {:?}", config.id_format);
    Provider::new(config)
}

fn read_attributes(path: &Path) -> Result<Map<String, Value>> {
    let content = std::fs::read_to_string(path)?;
    match serde_json::from_str::<Value>(&content)? {
        Value::Object(map) => Ok(map),
        _ => Err(ProviderError::InvalidConfig(format!(
            "{} must contain a JSON object of attributes",
            path.display()
        ))),
    }
}

fn read_state(path: &Path) -> Result<ResourceData> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn report(diags: &[Diagnostic]) {
    for diag in diags {
        match serde_json::to_string(diag) {
            Ok(line) => eprintln!("{}", line),
            Err(_) => eprintln!("{}", diag.summary),
        }
    }
}
