use std::sync::Arc;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use vocab_importer::config::{ProviderArgs, ServeArgs};
use vocab_importer::llm::{self, OpenAiGenerator};
use vocab_importer::server::{self, AppState};

#[derive(Parser, Debug)]
#[command(
    name = "vocab-importer",
    version,
    about = "Generate themed Japanese vocabulary lists with an LLM.",
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true,
    disable_help_subcommand = true
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the importer page and the generation endpoint
    Serve(ServeArgs),
    /// Manage the API key
    Key {
        /// Save an API key for later runs
        #[arg(long, value_name = "KEY", conflicts_with = "clear")]
        set: Option<String>,
        /// Remove the saved API key
        #[arg(long, conflicts_with = "test")]
        clear: bool,
        /// Verify the configured API key by calling the provider
        #[arg(long, conflicts_with = "clear")]
        test: bool,
        #[command(flatten)]
        provider: ProviderArgs,
    },
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run_cli().await {
        eprintln!("{:?}", err);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve(args) => serve(args).await?,
        Command::Key {
            set,
            clear,
            test,
            provider,
        } => handle_key_command(set, clear, test, &provider).await?,
    }

    Ok(())
}

async fn serve(args: ServeArgs) -> Result<()> {
    let api_key = llm::require_api_key()?;
    info!(
        "Using API key from the {} against {}",
        api_key.source.description(),
        args.provider.api_base
    );

    let client = llm::initialize_client(&api_key.key, &args.provider.api_base);
    let generator = OpenAiGenerator::new(client, args.model.clone());
    let state = AppState::new(Arc::new(generator));

    info!("Model: {}", args.model);
    server::serve(args.bind_address(), state).await
}

async fn handle_key_command(
    set: Option<String>,
    clear: bool,
    test: bool,
    provider: &ProviderArgs,
) -> Result<()> {
    let mut action_taken = false;

    if let Some(key) = set {
        let path = llm::store_api_key(&key)?;
        println!("Stored API key in {}.", path.display());
        action_taken = true;
    }

    if clear {
        let removed = llm::clear_api_key()?;
        if removed {
            println!("Removed the stored API key.");
        } else {
            println!("No stored API key found.");
        }
        action_taken = true;
    }

    if test {
        let source = llm::test_configured_api_key(&provider.api_base).await?;
        println!("API key from the {} is valid.", source.description());
        action_taken = true;
    }

    if !action_taken {
        bail!("No action provided. Use --set, --clear, or --test.");
    }
    Ok(())
}
