use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use counterpoint::{
    AnalyzeOpinionUseCase, CannedClient, CompletionClient, Credential, ErrorKind, HttpInvoker,
    ProviderCatalog, ProviderId, DEFAULT_TIMEOUT,
};

#[derive(Parser)]
#[command(name = "counterpoint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze an opinion: dissect its premises and argue the other side
    Analyze {
        /// The opinion to challenge
        opinion: String,

        /// Provider to use (openai, anthropic, deepseek)
        #[arg(short, long, default_value = "openai")]
        provider: String,

        /// Model id; defaults to the provider's first catalog entry
        #[arg(short, long)]
        model: Option<String>,

        /// API key; read from the provider's env var when omitted
        #[arg(long)]
        api_key: Option<String>,

        /// Per-request timeout in seconds
        #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
        timeout: u64,

        /// Override the provider's endpoint, e.g. a local compatible server
        #[arg(long)]
        base_url: Option<String>,

        /// Skip the network entirely and print the specimen analysis
        #[arg(long)]
        demo: bool,
    },

    /// List supported providers, their models, and credential env vars
    Providers,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Analyze {
            opinion,
            provider,
            model,
            api_key,
            timeout,
            base_url,
            demo,
        } => {
            analyze(AnalyzeArgs {
                opinion,
                provider,
                model,
                api_key,
                timeout,
                base_url,
                demo,
            })
            .await
        }
        Commands::Providers => {
            list_providers(&ProviderCatalog::builtin());
            Ok(())
        }
    }
}

struct AnalyzeArgs {
    opinion: String,
    provider: String,
    model: Option<String>,
    api_key: Option<String>,
    timeout: u64,
    base_url: Option<String>,
    demo: bool,
}

async fn analyze(args: AnalyzeArgs) -> Result<()> {
    let catalog = ProviderCatalog::builtin();
    let provider: ProviderId = args.provider.parse()?;

    let model = match args.model {
        Some(model) => model,
        None => catalog.default_model(provider)?.to_string(),
    };
    let credential = resolve_credential(&catalog, provider, args.api_key);

    // Hybrid behavior: a missing credential downgrades to the canned
    // client instead of failing, so the tool stays usable offline.
    let offline = args.demo || credential.is_empty();
    let client: Arc<dyn CompletionClient> = if offline {
        if !args.demo {
            warn!(
                "No {} API key found; serving the offline specimen analysis instead",
                provider.label()
            );
        }
        Arc::new(CannedClient::new())
    } else {
        let mut invoker = HttpInvoker::from_catalog(&catalog, Duration::from_secs(args.timeout));
        if let Some(url) = args.base_url.as_deref() {
            info!("Using custom {} endpoint: {}", provider.label(), url);
            invoker = invoker.with_base_url(provider, url);
        }
        Arc::new(invoker)
    };

    let use_case = AnalyzeOpinionUseCase::new(client).with_catalog(catalog);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("Invalid spinner template"),
    );
    spinner.set_message("Analyzing opinion...");
    spinner.enable_steady_tick(Duration::from_millis(120));

    let result = use_case
        .submit(&args.opinion, provider, &model, credential)
        .await;
    spinner.finish_and_clear();

    match result {
        Ok(analysis) => {
            println!("{}", analysis.text());
            Ok(())
        }
        Err(diagnosis) => {
            if diagnosis.kind() == ErrorKind::EmptyInput {
                eprintln!("warning: {}", diagnosis.message());
            } else {
                eprintln!("error[{}]: {}", diagnosis.kind(), diagnosis.message());
            }
            if let Some(hint) = diagnosis.hint() {
                eprintln!("hint: {hint}");
            }
            std::process::exit(1);
        }
    }
}

fn resolve_credential(
    catalog: &ProviderCatalog,
    provider: ProviderId,
    api_key: Option<String>,
) -> Credential {
    let secret = api_key.unwrap_or_else(|| {
        catalog
            .lookup(provider)
            .ok()
            .and_then(|config| std::env::var(config.credential_env()).ok())
            .unwrap_or_default()
    });
    Credential::new(secret)
}

fn list_providers(catalog: &ProviderCatalog) {
    for config in catalog.providers() {
        println!("{} ({})", config.label(), config.provider());
        println!("  flavor:     {}", config.flavor());
        println!("  endpoint:   {}", config.base_url());
        println!("  credential: {} or --api-key", config.credential_env());
        println!("  models:");
        for (i, model) in config.models().iter().enumerate() {
            if i == 0 {
                println!("    {model} (default)");
            } else {
                println!("    {model}");
            }
        }
        println!();
    }
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    #[test]
    fn test_analyze_defaults() {
        let cli = Cli::parse_from(["counterpoint", "analyze", "Cash is obsolete"]);

        match cli.command {
            Commands::Analyze {
                opinion,
                provider,
                model,
                timeout,
                demo,
                ..
            } => {
                assert_eq!(opinion, "Cash is obsolete");
                assert_eq!(provider, "openai");
                assert_eq!(model, None);
                assert_eq!(timeout, 60);
                assert!(!demo);
            }
            _ => panic!("expected analyze subcommand"),
        }
    }

    #[test]
    fn test_analyze_flags_are_parsed() {
        let cli = Cli::parse_from([
            "counterpoint",
            "analyze",
            "Cash is obsolete",
            "--provider",
            "anthropic",
            "--model",
            "claude-3-haiku-20240307",
            "--api-key",
            "sk-test",
            "--timeout",
            "10",
            "--demo",
        ]);

        match cli.command {
            Commands::Analyze {
                provider,
                model,
                api_key,
                timeout,
                demo,
                ..
            } => {
                assert_eq!(provider, "anthropic");
                assert_eq!(model.as_deref(), Some("claude-3-haiku-20240307"));
                assert_eq!(api_key.as_deref(), Some("sk-test"));
                assert_eq!(timeout, 10);
                assert!(demo);
            }
            _ => panic!("expected analyze subcommand"),
        }
    }

    #[test]
    fn test_explicit_key_wins_over_environment() {
        let catalog = ProviderCatalog::builtin();
        let credential =
            resolve_credential(&catalog, ProviderId::OpenAi, Some("sk-flag".to_string()));

        assert_eq!(credential.expose(), "sk-flag");
    }
}
