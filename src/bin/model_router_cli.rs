//! model-router CLI: inspect how model identifiers resolve.
//!
//! Usage:
//!   model-router resolve <model-id> [--config <path>]   Show the resolution for an identifier
//!   model-router check [--config <path>]                Validate an override file
//!   model-router list [--config <path>]                 List configured overrides

use anyhow::{bail, Context, Result};
use model_router::{ConfigLoader, ProviderResolver, RouterConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let outcome = match args[1].as_str() {
        "resolve" => cmd_resolve(&args[2..]),
        "check" => cmd_check(&args[2..]),
        "list" => cmd_list(&args[2..]),
        "version" | "--version" | "-V" => {
            println!("model-router {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(e) = outcome {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn print_usage() {
    println!(
        r#"model-router - resolve model identifiers to backend clients

USAGE:
    model-router <COMMAND> [OPTIONS]

COMMANDS:
    resolve <model-id> [--config <path>]   Show provider, model and endpoint for an identifier
    check [--config <path>]                Validate an override file
    list [--config <path>]                 List configured overrides
    version                                Show version information
    help                                   Show this help message

ENVIRONMENT:
    MODEL_ROUTER_CONFIG     Override file (YAML or JSON)
    OPENROUTER_API_KEY      Default API key
    OPENROUTER_BASE_URL     Default base URL
    RUST_LOG                Log filter (default: warn)"#
    );
}

/// `--config <path>` wins over `MODEL_ROUTER_CONFIG`.
fn config_loader(args: &[String]) -> Result<Option<ConfigLoader>> {
    if let Some(i) = args.iter().position(|a| a == "--config") {
        let Some(path) = args.get(i + 1) else {
            bail!("--config requires a path");
        };
        return Ok(Some(ConfigLoader::new(PathBuf::from(path))));
    }
    Ok(ConfigLoader::from_env())
}

fn load_config(args: &[String]) -> Result<RouterConfig> {
    match config_loader(args)? {
        Some(loader) => loader
            .load()
            .with_context(|| format!("loading {}", loader.path().display())),
        None => Ok(RouterConfig::default()),
    }
}

fn positional(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut skip = false;
    for arg in args {
        if skip {
            skip = false;
            continue;
        }
        if arg == "--config" {
            skip = true;
            continue;
        }
        out.push(arg.as_str());
    }
    out
}

fn cmd_resolve(args: &[String]) -> Result<()> {
    let Some(model) = positional(args).first().copied() else {
        bail!("resolve requires a model identifier");
    };
    let config = load_config(args)?;
    let resolver = ProviderResolver::builder().config(Arc::new(config)).build();
    let resolution = resolver
        .resolve(model)
        .with_context(|| format!("resolving '{model}'"))?;

    let report = serde_json::json!({
        "model": model,
        "provider": resolution.provider,
        "actual_model": resolution.actual_model,
        "source": resolution.source,
        "base_url": resolution.client.base_url(),
        "api_key_present": resolution.client.has_api_key(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn cmd_check(args: &[String]) -> Result<()> {
    let Some(loader) = config_loader(args)? else {
        bail!("no override file: pass --config <path> or set MODEL_ROUTER_CONFIG");
    };
    let config = loader
        .load()
        .with_context(|| format!("loading {}", loader.path().display()))?;
    println!(
        "✓ {}: {} override(s) valid",
        loader.path().display(),
        config.len()
    );
    Ok(())
}

fn cmd_list(args: &[String]) -> Result<()> {
    let config = load_config(args)?;
    if config.is_empty() {
        println!("No overrides configured; every identifier uses fallback routing.");
        return Ok(());
    }
    for id in config.identifiers() {
        let entry = &config.models[id];
        println!(
            "{id} -> {}:{}{}",
            entry.provider,
            entry.model,
            entry
                .base_url
                .as_deref()
                .map(|u| format!(" @ {u}"))
                .unwrap_or_default()
        );
    }
    Ok(())
}
