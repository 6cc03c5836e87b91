//! Event file commands: product summary cards and origin reconciliation.

use std::path::Path;

use anyhow::Context;
use quakeview_core::format::from_epoch_millis;
use quakeview_core::{
    load_contributors, reconcile_origin_value, summarize, AppConfig, Contributors, EventDetails,
    Formatter, Product, SUMMARY_TYPES,
};

fn read_event_file(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read event file {}", path.display()))
}

pub(crate) fn load_event(path: &Path) -> anyhow::Result<EventDetails> {
    let raw = read_event_file(path)?;
    EventDetails::from_json(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

/// Reconciled origin products of an event file. Only unreadable files and
/// invalid JSON are errors; a bad product list is the empty state.
pub(crate) fn load_origins(path: &Path) -> anyhow::Result<Vec<Product>> {
    let raw = read_event_file(path)?;
    let value: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(reconcile_origin_value(&value))
}

/// Contributor table from the configured YAML file, or the built-in one.
pub(crate) fn contributors_for(config: &AppConfig) -> anyhow::Result<Contributors> {
    match &config.contributors_path {
        Some(path) => Ok(load_contributors(path)?),
        None => Ok(Contributors::builtin()),
    }
}

/// Print the summary card for `product_type`, or every card when it is `all`.
///
/// # Errors
///
/// Returns an error if the event file cannot be read or parsed, the
/// contributors file is invalid, or a single requested type has no summary.
pub(crate) fn run_summary(config: &AppConfig, path: &Path, product_type: &str) -> anyhow::Result<()> {
    let event = load_event(path)?;
    let contributors = contributors_for(config)?;
    let formatter = Formatter::default();

    if let Some(title) = &event.properties.title {
        println!("{title}");
        println!();
    }

    if product_type == "all" {
        let mut printed = 0usize;
        for ty in SUMMARY_TYPES {
            if let Some(summary) = summarize(ty, &event, &formatter) {
                if printed > 0 {
                    println!();
                }
                println!("== {ty} ==");
                println!("{}", summary.render(&contributors, &formatter));
                printed += 1;
            }
        }
        tracing::debug!(printed, "summary cards rendered");
        return Ok(());
    }

    let summary = summarize(product_type, &event, &formatter)
        .with_context(|| format!("no '{product_type}' summary available for this event"))?;
    println!("{}", summary.render(&contributors, &formatter));
    Ok(())
}

/// List reconciled origin candidates, preferred first.
///
/// # Errors
///
/// Returns an error if the event file cannot be read or parsed.
pub(crate) fn run_origins(path: &Path, json: bool) -> anyhow::Result<()> {
    let origins = load_origins(path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&origins)?);
        return Ok(());
    }

    if origins.is_empty() {
        println!("No origin product found for this event.");
        return Ok(());
    }

    let formatter = Formatter::default();
    for (i, product) in origins.iter().enumerate() {
        let marker = if i == 0 { "*" } else { " " };
        println!(
            "{marker} {:<24} {:<12} {}",
            product.identity_key(),
            product.product_type.as_deref().unwrap_or(&formatter.empty),
            formatter.date_time(from_epoch_millis(product.update_time), 0, true),
        );
    }
    Ok(())
}
