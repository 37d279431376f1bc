//! xtask frames — print the frame registry as a table or as JSON.

use anyhow::{Context, Result};
use colored::Colorize;
use frames::registry::schemas;
use frames::{FrameSchema, MergePolicy, Version};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub(crate) struct SchemaRow {
    id: &'static str,
    description: &'static str,
    versions: Vec<u8>,
    merge: &'static str,
    fields: Vec<FieldRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    v22: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent: Option<&'static str>,
    untested: bool,
    bozo: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct FieldRow {
    name: &'static str,
    kind: String,
}

impl From<&FrameSchema> for SchemaRow {
    fn from(schema: &FrameSchema) -> Self {
        Self {
            id: schema.id,
            description: schema.description,
            versions: schema.versions.iter().map(Version::major).collect(),
            merge: merge_name(schema.merge_policy),
            fields: schema
                .fields
                .iter()
                .map(|field| FieldRow {
                    name: field.name,
                    kind: field.kind.to_string(),
                })
                .collect(),
            v22: schema.v22,
            parent: schema.parent,
            untested: schema.untested,
            bozo: schema.bozo,
        }
    }
}

const fn merge_name(policy: MergePolicy) -> &'static str {
    match policy {
        MergePolicy::KeepAll => "keep-all",
        MergePolicy::KeepLast => "keep-last",
        MergePolicy::ConcatText => "concat-text",
    }
}

/// Registry rows, optionally restricted to one minor version.
pub(crate) fn rows(minor: Option<u8>) -> Result<Vec<SchemaRow>> {
    let version = minor
        .map(|m| Version::from_major(m).with_context(|| format!("unsupported version 2.{m}")))
        .transpose()?;
    Ok(schemas()
        .filter(|schema| version.map_or(true, |v| schema.in_version(v)))
        .map(SchemaRow::from)
        .collect())
}

/// Entry point called from main.rs
pub fn run(minor: Option<u8>, json: bool) -> Result<()> {
    let rows = rows(minor)?;
    if json {
        let out = serde_json::to_string_pretty(&rows).context("Failed to serialise registry")?;
        println!("{out}");
        return Ok(());
    }

    for row in &rows {
        let versions: Vec<String> = row.versions.iter().map(|m| format!("2.{m}")).collect();
        let mut markers = Vec::new();
        if row.untested {
            markers.push("untested".yellow().to_string());
        }
        if row.bozo {
            markers.push("bozo".red().to_string());
        }
        println!(
            "{} {:<40} {:<12} {:<11} {}",
            row.id.bold(),
            row.description,
            versions.join(","),
            row.merge,
            markers.join(" ")
        );
        let fields: Vec<String> = row
            .fields
            .iter()
            .map(|field| format!("{}: {}", field.name, field.kind))
            .collect();
        println!("     {}", fields.join(", ").dimmed());
        if let Some(link) = row.v22.or(row.parent) {
            println!("     {} {}", "↔".dimmed(), link.dimmed());
        }
    }
    println!();
    println!("{}", format!("{} frame types", rows.len()).green());
    Ok(())
}
