//! CLI probe for `campusboard_core`.
//!
//! # Responsibility
//! - Load one portal list from a JSON payload file and print the same view a
//!   page would render: tab counts and the filtered, ordered items.
//! - Keep output deterministic for quick local sanity checks.

use anyhow::{bail, Context, Result};
use campusboard_core::{
    core_version, default_log_level, init_logging, preset_names, CategoryCounts,
    CollectionService, DomainConfig, FilterState, JsonFileSource, LoggingConfig, Record,
    RefreshOutcome, RefreshTrigger, Session,
};
use clap::Parser;
use log::info;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "campusboard", version, about = "Render a campus portal list from a JSON payload")]
struct Cli {
    /// Built-in domain preset.
    #[arg(long, default_value = "announcements")]
    domain: String,

    /// Custom domain declaration (JSON); overrides `--domain`.
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON array of records, as returned by the collection endpoint.
    #[arg(long)]
    payload: PathBuf,

    #[arg(long, default_value = "")]
    search: String,

    #[arg(long, default_value = "all")]
    category: String,

    #[arg(long, default_value = "all")]
    kind: String,

    /// Bearer token for the session.
    #[arg(long)]
    token: Option<String>,

    /// Absolute directory for rolling log files; logging is off when unset.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_ref() {
        let level = cli
            .log_level
            .clone()
            .unwrap_or_else(|| default_log_level().to_string());
        let logging = LoggingConfig::parse(&level, &log_dir.to_string_lossy())?;
        init_logging(&logging)?;
    }

    let config = resolve_domain(&cli)?;
    let mut source = JsonFileSource::new(&cli.payload);
    if let Some(envelope) = config.created_envelope.as_deref() {
        source = source.with_envelope(envelope);
    }
    let session = cli
        .token
        .as_deref()
        .map(Session::with_token)
        .unwrap_or_else(Session::anonymous);

    let mut service = CollectionService::new(source, session, config);
    if let RefreshOutcome::Applied { records } = service.refresh(RefreshTrigger::InitialMount) {
        info!(
            "event=cli_load module=cli status=ok domain={} count={records}",
            service.viewer().config().name
        );
    } else {
        bail!(
            "failed to load `{}` as a {} collection",
            cli.payload.display(),
            service.viewer().config().name
        );
    }

    let state = FilterState::new()
        .with_search(cli.search.as_str())
        .with_category(&cli.category)
        .with_kind(&cli.kind);
    let snapshot = service.view(&state);

    println!(
        "campusboard {} domain={}",
        core_version(),
        service.viewer().config().name
    );
    println!("categories: {}", render_tabs(&snapshot.category_counts));
    if snapshot.kind_counts.len() > 1 {
        println!("kinds: {}", render_tabs(&snapshot.kind_counts));
    }
    for record in &snapshot.items {
        println!("{}", render_item(record));
    }
    if snapshot.items.is_empty() {
        println!("(no matching records)");
    }
    Ok(())
}

fn resolve_domain(cli: &Cli) -> Result<DomainConfig> {
    if let Some(path) = cli.config.as_ref() {
        return DomainConfig::load(path)
            .with_context(|| format!("failed to load domain config `{}`", path.display()));
    }
    match DomainConfig::preset(&cli.domain) {
        Some(config) => Ok(config),
        None => bail!(
            "unknown domain `{}`; expected one of {}",
            cli.domain,
            preset_names().join("|")
        ),
    }
}

fn render_tabs(counts: &CategoryCounts) -> String {
    counts
        .iter()
        .map(|entry| format!("{} ({})", entry.label, entry.count))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn render_item(record: &Record) -> String {
    let mut line = format!("#{}", record.id);
    if record.pinned {
        line.push_str(" [pinned]");
    }
    if record.urgent {
        line.push_str(" [urgent]");
    }
    if let Some(kind) = record.kind.as_deref() {
        line.push_str(&format!(" [{kind}]"));
    }
    if !record.category.is_empty() {
        line.push_str(&format!(" {}", record.category));
    }
    if let Some(title) = record.search_fields.first() {
        line.push_str(&format!(" - {title}"));
    }
    line
}
