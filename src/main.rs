//! Alias Forge - Gmail alias generation
//!
//! A small CLI for generating dot-insertion and plus-tag variations of
//! Gmail addresses, with history, favorites and export.

mod cli;

use alias_forge::{
    batch::{BatchDriver, CancelToken},
    export::write_export,
    stats::GenerationStats,
    store::{HistoryItem, VariantStore},
    types::{GenerationConfig, Mode, Separator, DEFAULT_TAGS},
    variant::{generate_dot_variations, split_list, AddressValidator, MAX_DOT_USERNAME_LENGTH},
    AliasForgeError, Result,
};
use cli::{Command, FavoriteAction, HistoryAction, RunOptions};
use indicatif::{ProgressBar, ProgressStyle};
use std::env;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the library
    if let Err(e) = alias_forge::init() {
        eprintln!("❌ Failed to initialize: {}", e);
        process::exit(1);
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "alias_forge=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = env::args().skip(1).collect();

    if let Err(e) = run(&args).await {
        eprintln!("{}", e.user_message());
        process::exit(1);
    }

    Ok(())
}

async fn run(args: &[String]) -> Result<()> {
    let command = cli::parse_args(args)?;

    match command {
        Command::Help => {
            print_help();
            Ok(())
        }
        Command::Version => {
            println!("alias-forge {}", alias_forge::VERSION);
            Ok(())
        }
        Command::Interactive => run_interactive(GenerationConfig::from_env()?).await,
        Command::Dots { inputs, options } => {
            let config = GenerationConfig {
                mode: Mode::Dot,
                ..GenerationConfig::from_env()?
            };
            run_generation(config, &inputs.join("\n"), &options).await
        }
        Command::Tags {
            inputs,
            tags,
            separator,
            options,
        } => {
            let config = GenerationConfig::from_env()?;
            let config = GenerationConfig {
                mode: Mode::Plus,
                tags: tags.unwrap_or(config.tags.clone()),
                separator: separator.unwrap_or(config.separator),
                ..config
            };
            run_generation(config, &inputs.join("\n"), &options).await
        }
        Command::Stats { address } => show_stats(&GenerationConfig::from_env()?, &address),
        Command::History(action) => manage_history(action).await,
        Command::Favorites(action) => manage_favorites(action),
    }
}

/// Prompt for everything when no arguments are given
async fn run_interactive(config: GenerationConfig) -> Result<()> {
    println!("📧 Alias Forge - Gmail alias generation");
    println!("═══════════════════════════════════════");
    println!();

    let input = inquire::Text::new("Gmail address(es):")
        .with_help_message("Separate multiple addresses with commas or newlines")
        .prompt()
        .map_err(prompt_error)?;

    let mode = inquire::Select::new("Variation mode:", vec![Mode::Dot, Mode::Plus])
        .prompt()
        .map_err(prompt_error)?;

    let config = match mode {
        Mode::Dot => GenerationConfig { mode, ..config },
        Mode::Plus => {
            let tags = inquire::Text::new("Tags (comma separated):")
                .with_default(&DEFAULT_TAGS.replace('\n', ","))
                .prompt()
                .map_err(prompt_error)?;
            let separator = inquire::Select::new("Separator:", Separator::ALL.to_vec())
                .with_formatter(&|option| option.value.label().to_string())
                .prompt()
                .map_err(prompt_error)?;
            GenerationConfig {
                mode,
                tags,
                separator,
                ..config
            }
        }
    };

    run_generation(config, &input, &RunOptions::default()).await
}

fn prompt_error(err: inquire::InquireError) -> AliasForgeError {
    AliasForgeError::cli(format!("Prompt failed: {}", err))
}

/// Validate, generate with progress, print, record and export
async fn run_generation(config: GenerationConfig, input: &str, options: &RunOptions) -> Result<()> {
    let config = GenerationConfig {
        chunk_size: options.chunk_size.unwrap_or(config.chunk_size),
        ..config
    };

    let validator = AddressValidator::new()?.with_warn_length(config.warn_length);
    let validated = validator.validate_input(input)?;

    if config.mode == Mode::Dot {
        for address in &validated {
            if let Some(warning) = &address.warning {
                eprintln!("⚠️  {}: {}", address.address, warning);
            }
        }
    }

    if config.mode == Mode::Dot {
        if let Some(address) = validated.iter().find(|v| v.exceeds_hard_limit()) {
            return Err(AliasForgeError::input_too_large(
                address.username_length,
                MAX_DOT_USERNAME_LENGTH,
            ));
        }
    }

    let addresses: Vec<String> = validated.iter().map(|v| v.address.clone()).collect();

    let cancel = CancelToken::new();
    let ctrl_c = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        })
    };

    let progress = ProgressBar::new(100);
    progress.set_style(
        ProgressStyle::with_template("{spinner} [{bar:40}] {pos:>3}% {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );

    let driver = BatchDriver::new(config.clone());
    let started = std::time::Instant::now();
    let outcome = driver
        .run(&addresses, &cancel, |p| {
            progress.set_position(p.percent as u64);
            if let Some(current) = &p.current_address {
                progress.set_message(current.clone());
            }
        })
        .await;
    ctrl_c.abort();
    progress.finish_and_clear();
    let mut outcome = outcome?;

    let mut store = VariantStore::open(VariantStore::default_path())?;
    store.apply_favorites(&mut outcome.results);

    let filter = options.filter.as_deref().unwrap_or("");
    let matching = outcome
        .results
        .iter()
        .filter(|r| r.matches_filter(filter))
        .count();
    let limit = options.limit.unwrap_or(usize::MAX);
    for result in outcome
        .results
        .iter()
        .filter(|r| r.matches_filter(filter))
        .take(limit)
    {
        if result.is_favorite {
            println!("{} *", result.email);
        } else {
            println!("{}", result.email);
        }
    }

    if outcome.cancelled {
        eprintln!("{}", AliasForgeError::cancelled(outcome.processed_addresses).user_message());
    }

    eprintln!();
    eprintln!("📈 Summary:");
    eprintln!("   📊 Generated: {}", outcome.results.len());
    if !filter.is_empty() {
        eprintln!("   🔍 Matching '{}': {}", filter, matching);
    }
    if matching > limit {
        eprintln!("   👀 Shown: {}", limit);
    }
    eprintln!("   📧 Addresses: {}/{}", outcome.processed_addresses, addresses.len());
    eprintln!("   ⏱️  Total time: {:.2}s", started.elapsed().as_secs_f32());

    store.record(HistoryItem::new(
        input.trim(),
        &config,
        outcome.results.len(),
        addresses.len() > 1,
    ))?;

    if let Some(format) = options.export {
        let emails: Vec<String> = outcome.results.iter().map(|r| r.email.clone()).collect();
        let path = write_export(&options.out_dir, &emails, format, false)?;
        eprintln!("   💾 Exported: {}", path.display());
    }

    Ok(())
}

/// Print the dot-count distribution for one address
fn show_stats(config: &GenerationConfig, address: &str) -> Result<()> {
    let validated = AddressValidator::new()?
        .with_warn_length(config.warn_length)
        .validate(address)?;
    let variations = generate_dot_variations(&validated.address)?;
    let stats = GenerationStats::from_variations(&variations, &validated.address);

    println!("📊 Distribution Analysis: {}", validated.address);
    println!("═══════════════════════");
    if let Some(base_length) = stats.base_length {
        println!("   Base length: {} chars", base_length);
    }
    println!("   Total generated: {}", stats.total);
    println!("   Average length: {:.1}", stats.avg_length);
    println!("   Max dots: {}", stats.max_dots);
    println!("   Domain: {}", stats.domain);
    println!();
    println!("{}", stats.render_histogram(40));

    Ok(())
}

async fn manage_history(action: HistoryAction) -> Result<()> {
    let mut store = VariantStore::open(VariantStore::default_path())?;

    match action {
        HistoryAction::List => show_history(&store),
        HistoryAction::Clear => {
            store.clear_history()?;
            println!("🗑️  History cleared");
            Ok(())
        }
        HistoryAction::Delete(id) => {
            if !store.delete_history(&id)? {
                return Err(alias_forge::validation_error!("No history entry with id '{}'", id));
            }
            println!("🗑️  History entry {} deleted", id);
            Ok(())
        }
        HistoryAction::Rerun { id, options } => {
            let item = store
                .history()
                .iter()
                .find(|h| h.id == id)
                .cloned()
                .ok_or_else(|| alias_forge::validation_error!("No history entry with id '{}'", id))?;
            drop(store);

            let config = item.restore(&GenerationConfig::from_env()?);
            tracing::info!(id = %item.id, mode = %config.mode, "Re-running history entry");
            run_generation(config, &item.input, &options).await
        }
    }
}

fn show_history(store: &VariantStore) -> Result<()> {
    if store.history().is_empty() {
        println!("No history yet.");
        return Ok(());
    }

    println!("🕘 History ({}):", store.history().len());
    for item in store.history() {
        let input = split_list(&item.input).join(", ");
        print!(
            "{}  {}  {:<4} {:>7} result(s)  {}",
            item.id,
            item.timestamp.format("%Y-%m-%d %H:%M:%S"),
            item.mode,
            item.count,
            input
        );
        if let (Some(tags), Some(separator)) = (&item.tags, item.separator) {
            print!("  [{} {}]", separator, split_list(tags).join(","));
        }
        println!();
    }

    Ok(())
}

fn manage_favorites(action: FavoriteAction) -> Result<()> {
    let mut store = VariantStore::open(VariantStore::default_path())?;

    match action {
        FavoriteAction::Toggle(emails) => {
            for email in emails {
                if store.toggle_favorite(&email)? {
                    println!("⭐ {} added to favorites", email);
                } else {
                    println!("☆ {} removed from favorites", email);
                }
            }
        }
        FavoriteAction::List => {
            for email in store.favorites() {
                println!("{}", email);
            }
        }
        FavoriteAction::Clear => {
            store.clear_favorites()?;
            println!("🗑️  Favorites cleared");
        }
        FavoriteAction::Export { format, out_dir } => {
            if store.favorites().is_empty() {
                return Err(alias_forge::validation_error!("No favorites saved"));
            }
            let path = write_export(&out_dir, store.favorites(), format, true)?;
            println!("💾 Exported {} favorite(s): {}", store.favorites().len(), path.display());
        }
    }

    Ok(())
}

/// Print help information
fn print_help() {
    println!("📧 Alias Forge - Gmail alias generation");
    println!("═══════════════════════════════════════");
    println!();
    println!("USAGE:");
    println!("    alias-forge                                   # Interactive prompts");
    println!("    alias-forge dots <ADDRESS>... [OPTIONS]       # Dot-insertion variations");
    println!("    alias-forge tags <ADDRESS>... [OPTIONS]       # Tag-append variations");
    println!("    alias-forge stats <ADDRESS>                   # Dot-count distribution");
    println!("    alias-forge history [clear]                   # List or clear history");
    println!("    alias-forge history delete <ID>");
    println!("    alias-forge history rerun <ID> [OPTIONS]      # Generate again from a history entry");
    println!("    alias-forge fav <EMAIL>... | fav list | fav clear");
    println!("    alias-forge fav export <FMT> [--out DIR]      # Export every saved favorite");
    println!();
    println!("OPTIONS:");
    println!("    --tags <LIST>         Tags for tag mode, comma or newline separated");
    println!("    --separator <SEP>     Tag separator: +, _ or - (default: +)");
    println!("    --chunk-size <N>      Results per chunk for dot mode (default: 500)");
    println!("    --limit <N>           Print at most N results");
    println!("    --filter <TEXT>       Only print results containing TEXT (case-insensitive)");
    println!("    --export <FMT>        Export results as csv, txt or json");
    println!("    --out <DIR>           Export directory (default: output)");
    println!();
    println!("EXAMPLES:");
    println!("    alias-forge dots john.doe@gmail.com");
    println!("    alias-forge tags john@gmail.com --tags shopping,work --separator _");
    println!("    alias-forge dots \"a@gmail.com,b@gmail.com\" --export csv");
    println!();
    println!("ENVIRONMENT VARIABLES:");
    println!("    ALIAS_FORGE_CHUNK_SIZE   Default chunk size");
    println!("    ALIAS_FORGE_WARN_LENGTH  Username length that triggers a warning (default: 15)");
    println!("    ALIAS_FORGE_SEPARATOR    Default tag separator");
    println!("    ALIAS_FORGE_TAGS         Default tag list");
    println!("    ALIAS_FORGE_STORE        History/favorites file (default: output/alias-forge.json)");
    println!("    RUST_LOG                 Log filter (default: alias_forge=warn)");
    println!();
    println!("Made with ❤️ and 🦀 Rust");
}
