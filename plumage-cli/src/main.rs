//! Plumage CLI
//!
//! Converts a status-HTML fragment to attributed rich text and prints the
//! resulting runs, for testing and debugging.

use anyhow::{Context, Result};
use plumage_common::warning::clear_warnings;
use plumage_html::{TextStyle, convert_with_issues};
use plumage_text::Run;
use std::env;
use std::fs;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: plumage-cli <file.html>... [--json]");
        eprintln!("       plumage-cli --html '<p>...</p>' [--json]");
        std::process::exit(1);
    }

    let as_json = args.iter().any(|arg| arg == "--json");

    let mut inputs = Vec::new();
    let mut index = 1;
    while index < args.len() {
        match args[index].as_str() {
            "--json" => {}
            "--html" => {
                index += 1;
                let Some(fragment) = args.get(index) else {
                    eprintln!("Error: --html requires an HTML string argument");
                    std::process::exit(1);
                };
                inputs.push(fragment.clone());
            }
            path => inputs
                .push(fs::read_to_string(path).with_context(|| format!("reading {path}"))?),
        }
        index += 1;
    }

    for (position, html) in inputs.iter().enumerate() {
        if position > 0 {
            // Each input is unrelated; let it report its own anomalies.
            clear_warnings();
            println!();
        }
        render(html, as_json)?;
    }

    Ok(())
}

/// Convert one HTML fragment and print it in the selected format.
fn render(html: &str, as_json: bool) -> Result<()> {
    let style = TextStyle::default();
    let (text, issues) = convert_with_issues(html, &style)
        .context("hard parse failure; display the raw string instead")?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&text)?);
        return Ok(());
    }

    println!("=== Runs ===");
    for (index, run) in text.runs().iter().enumerate() {
        println!("{index:3}: {:?}  [{}]", run.text, flag_summary(run));
    }

    println!("\n=== Text ===");
    println!("{}", text.text());

    if !issues.is_empty() {
        println!("\n=== Issues ===");
        for issue in &issues {
            println!("{}: {}", issue.kind, issue.message);
        }
    }

    Ok(())
}

/// Compact one-line summary of a run's attribute flags and tags.
fn flag_summary(run: &Run) -> String {
    let attrs = &run.attributes;
    let mut parts = Vec::new();
    if attrs.bold {
        parts.push("bold".to_string());
    }
    if attrs.italic {
        parts.push("italic".to_string());
    }
    if attrs.monospace {
        parts.push("monospace".to_string());
    }
    if attrs.superscript {
        parts.push("superscript".to_string());
    }
    if attrs.strikethrough {
        parts.push("strikethrough".to_string());
    }
    if let Some(link) = &attrs.link {
        parts.push(format!("link={link}"));
    }
    if let Some(source) = &attrs.image_source {
        parts.push(format!("image={source}"));
    }
    if let Some(id) = attrs.mention_account_id {
        parts.push(format!("mention={id}"));
    }
    if let Some(tag) = &attrs.hashtag {
        parts.push(format!("hashtag={tag}"));
    }
    if let Some(level) = attrs.list_indent {
        parts.push(format!("indent={level}"));
    }
    parts.join(", ")
}
