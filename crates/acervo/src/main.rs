use std::fs;
use std::io::{self, IsTerminal, Read};
use std::sync::Arc;

use acervo_config::{
    AcervoConfigData, has_interpretation_key, load_config, open_in_editor,
    resolve_interpretation_key, resolve_json_output, resolve_timeout, resolve_user_agent,
    set_config_value,
};
use acervo_core::{AcervoError, AcervoResult, LinkReport, VideoMetadata, validate_url};
use acervo_links::{
    ContentDraft, Fetcher, HttpFetcher, LinkValidator, MetadataOutcome, MetadataResolver, classify,
};
use clap::{Parser, Subcommand};
use console::style;
use dialoguer::{Confirm, theme::ColorfulTheme};
use tracing_subscriber::EnvFilter;

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(flatten)]
    Pipeline(PipelineCommand),
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Subcommands that load config and talk to the network.
#[derive(Subcommand, Debug)]
enum PipelineCommand {
    /// Check that links are reachable
    Check {
        #[arg(long)]
        input: Option<String>,
        #[arg(long)]
        json: bool,
        #[arg(value_name = "URL")]
        urls: Vec<String>,
    },
    /// Resolve title, description and thumbnail for a video link
    Metadata {
        url: String,
        #[arg(long)]
        json: bool,
    },
    /// Build a catalog draft pre-filled from the link's metadata
    Draft {
        url: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        thumbnail: Option<String>,
        #[arg(long)]
        max_description: Option<usize>,
        /// Keep the draft even when the link is unavailable
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Get a configuration value
    Get { key: String },
    /// Set a configuration value
    Set { key: String, value: String },
    /// List all configuration values
    List,
    /// Open config file in editor
    Edit,
}

#[derive(Debug, Parser)]
#[command(name = "acervo")]
#[command(version, long_about = None)]
#[command(about = "Link and video metadata checker for the acervo catalog")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Config { action } => handle_config_command(action).map(|()| 0),
        Commands::Pipeline(command) => run(command).await,
    };

    let code = match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {err}", style("Error:").red());
            1
        }
    };
    std::process::exit(code);
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn run(command: PipelineCommand) -> AcervoResult<i32> {
    let config = load_config()?;
    let fetcher = build_fetcher(&config)?;
    let json_default = resolve_json_output(&config).unwrap_or(false);

    match command {
        PipelineCommand::Check { input, json, urls } => {
            let urls = gather_inputs(urls, input.as_deref())?;
            if urls.is_empty() {
                return Err(AcervoError::InvalidInput("no input URLs provided".to_string()));
            }
            run_check(fetcher, &urls, json || json_default).await
        }
        PipelineCommand::Metadata { url, json } => {
            run_metadata(fetcher, &url, json || json_default).await
        }
        PipelineCommand::Draft {
            url,
            title,
            description,
            thumbnail,
            max_description,
            yes,
        } => {
            let mut draft = ContentDraft::new(url.trim());
            draft.title = title.unwrap_or_default();
            draft.description = description.unwrap_or_default();
            draft.thumbnail = thumbnail.unwrap_or_default();
            run_draft(fetcher, draft, max_description, yes).await
        }
    }
}

fn build_fetcher(config: &AcervoConfigData) -> AcervoResult<Arc<dyn Fetcher>> {
    let fetcher = HttpFetcher::new(&resolve_user_agent(config), resolve_timeout(config))?;
    Ok(Arc::new(fetcher))
}

fn gather_inputs(mut urls: Vec<String>, input: Option<&str>) -> AcervoResult<Vec<String>> {
    if let Some(path) = input {
        let content = fs::read_to_string(path)
            .map_err(|err| AcervoError::InvalidInput(format!("failed to read input file: {err}")))?;
        urls.extend(parse_lines(&content));
    }

    if urls.is_empty() && !io::stdin().is_terminal() {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|err| AcervoError::InvalidInput(format!("failed to read stdin: {err}")))?;
        urls.extend(parse_lines(&buffer));
    }

    Ok(urls)
}

fn parse_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| line.to_string())
        .collect()
}

async fn run_check(fetcher: Arc<dyn Fetcher>, urls: &[String], json: bool) -> AcervoResult<i32> {
    let validator = LinkValidator::new(fetcher);
    let reports = validator.validate_all(urls).await;

    for report in reports.iter().filter(|report| !report.result.is_valid) {
        tracing::debug!(url = %report.url, message = %report.result.message, "link invalid");
    }

    if json {
        print_json(&reports)?;
    } else {
        for report in &reports {
            print_report(report);
        }
    }

    let valid = reports.iter().filter(|report| report.result.is_valid).count();
    let invalid = reports.len() - valid;
    if !json {
        print_summary(reports.len(), valid, invalid);
    }

    Ok(if invalid > 0 { 1 } else { 0 })
}

async fn run_metadata(fetcher: Arc<dyn Fetcher>, url: &str, json: bool) -> AcervoResult<i32> {
    if !classify(url).is_video() {
        return Err(AcervoError::InvalidInput(format!(
            "not a recognized video link: {url}"
        )));
    }

    let outcome = MetadataResolver::new(fetcher).resolve_outcome(url).await;
    log_failures(url, &outcome);

    if json {
        print_json(&outcome.metadata)?;
    } else {
        print_metadata(&outcome.metadata);
    }

    Ok(if outcome.metadata.is_empty() { 1 } else { 0 })
}

async fn run_draft(
    fetcher: Arc<dyn Fetcher>,
    mut draft: ContentDraft,
    max_description: Option<usize>,
    yes: bool,
) -> AcervoResult<i32> {
    validate_url(&draft.url)?;

    let validation = LinkValidator::new(fetcher.clone()).validate(&draft.url).await;
    if !validation.is_valid {
        eprintln!(
            "{} {}: {}",
            style("Unavailable").yellow(),
            draft.url,
            validation.message
        );
        if !yes && !confirm_proceed() {
            return Ok(1);
        }
    }

    let outcome = MetadataResolver::new(fetcher)
        .resolve_checked(&draft.url, &validation)
        .await;
    log_failures(&draft.url, &outcome);

    let filled = draft.apply_metadata(&outcome.metadata, max_description);
    tracing::debug!(url = %draft.url, ?filled, "draft fields filled from metadata");

    print_json(&draft)?;
    Ok(0)
}

fn confirm_proceed() -> bool {
    if !io::stdin().is_terminal() {
        return false;
    }
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("Link looks unavailable. Proceed anyway?")
        .default(false)
        .interact()
        .unwrap_or(false)
}

fn log_failures(url: &str, outcome: &MetadataOutcome) {
    for failure in &outcome.failures {
        tracing::warn!(url, error = %failure, "metadata partially resolved");
    }
}

fn handle_config_command(action: ConfigAction) -> AcervoResult<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = load_config()?;
            match get_nested_config_value(&config, &key) {
                Some(v) => println!("{} = {}", key, v),
                None => println!("{} = <null>", key),
            }
            Ok(())
        }
        ConfigAction::Set { key, value } => {
            set_config_value(&key, &value)?;
            println!("{} Set {} = {}", style("✓").green(), key, value);
            Ok(())
        }
        ConfigAction::List => {
            let mut config = load_config()?;
            config.interpretation.api_key = resolve_interpretation_key(&config);

            println!("Current configuration:");
            println!("\n[http]");
            println!("user_agent = {}", resolve_user_agent(&config));
            println!(
                "timeout_secs = {}",
                config
                    .http
                    .timeout_secs
                    .map(|secs| secs.to_string())
                    .unwrap_or_else(|| "<default>".to_string())
            );
            println!("\n[output]");
            println!("json = {}", resolve_json_output(&config).unwrap_or(false));
            println!("\n[interpretation]");
            println!(
                "api_key = {}",
                if has_interpretation_key(&config) {
                    "<set>"
                } else {
                    "<null>"
                }
            );
            Ok(())
        }
        ConfigAction::Edit => open_in_editor(),
    }
}

fn get_nested_config_value(config: &AcervoConfigData, key_path: &str) -> Option<String> {
    let parts: Vec<&str> = key_path.split('.').collect();

    match parts.as_slice() {
        ["http", "user_agent"] => config.http.user_agent.clone(),
        ["http", "timeout_secs"] => config.http.timeout_secs.map(|secs| secs.to_string()),
        ["output", "json"] => config.output.json.map(|b| b.to_string()),
        ["interpretation", "api_key"] => {
            has_interpretation_key(config).then(|| "<set>".to_string())
        }
        _ => None,
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> AcervoResult<()> {
    let output = serde_json::to_string_pretty(value)
        .map_err(|err| AcervoError::Parse(format!("failed to serialize output: {err}")))?;
    println!("{output}");
    Ok(())
}

fn print_report(report: &LinkReport) {
    let host = classify(&report.url);
    if report.result.is_valid {
        println!(
            "{} {} {}",
            style("✓").green(),
            style(host).dim(),
            report.url
        );
    } else {
        println!("{} {} {}", style("✗").red(), style(host).dim(), report.url);
    }
    println!("  {} {}", style("Status:").dim(), report.result.message);
    if let Some(thumbnail) = &report.result.thumbnail {
        println!("  {} {}", style("Thumbnail:").dim(), thumbnail);
    }
}

fn print_metadata(metadata: &VideoMetadata) {
    if metadata.is_empty() {
        println!("{} no metadata available", style("Warning:").yellow());
        return;
    }
    let fields = [
        ("Title:", &metadata.title),
        ("Description:", &metadata.description),
        ("Thumbnail:", &metadata.thumbnail),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            println!("{} {value}", style(label).cyan());
        }
    }
}

fn print_summary(total: usize, valid: usize, invalid: usize) {
    println!(
        "{} Total: {} | Valid: {} | Invalid: {}",
        style("Summary:").bold(),
        total,
        valid,
        invalid
    );
}
