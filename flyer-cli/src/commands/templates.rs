//! `flyer templates [--json] [--local]`

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use flyer_core::{SchemaResolver, SchemaSource, Template};

use super::{load_config, runtime, Backend, BackendArgs};

/// List templates available for selection.
#[derive(Args, Debug)]
pub struct TemplatesArgs {
    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub backend: BackendArgs,
}

#[derive(Tabled)]
struct TemplateRow {
    #[tabled(rename = "id")]
    id: String,
    #[tabled(rename = "name")]
    name: String,
    #[tabled(rename = "fields")]
    fields: String,
    #[tabled(rename = "description")]
    description: String,
}

#[derive(Serialize)]
struct CatalogJson<'a> {
    available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
    templates: &'a [Template],
}

impl TemplatesArgs {
    pub fn run(self) -> Result<()> {
        let config = load_config()?;
        let backend = Backend::from_config(&config, &self.backend)?;
        let snapshot = runtime()?.block_on(backend.catalog());

        if self.json {
            let payload = CatalogJson {
                available: snapshot.is_available(),
                error: snapshot.unavailable.as_deref(),
                templates: &snapshot.templates,
            };
            println!("{}", serde_json::to_string_pretty(&payload)?);
            return Ok(());
        }

        if let Some(reason) = &snapshot.unavailable {
            eprintln!("{} Template catalog unavailable: {reason}", "!".yellow().bold());
            return Ok(());
        }
        if snapshot.templates.is_empty() {
            println!("No templates available.");
            return Ok(());
        }

        let resolver = SchemaResolver::default();
        let rows: Vec<TemplateRow> = snapshot
            .templates
            .iter()
            .map(|t| TemplateRow {
                id: t.id.to_string(),
                name: t.name.clone(),
                fields: field_summary(&resolver, t),
                description: t.description.clone(),
            })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
        Ok(())
    }
}

fn field_summary(resolver: &SchemaResolver, template: &Template) -> String {
    let (schema, source) = resolver.resolve_with_source(template);
    match source {
        SchemaSource::Declared => schema.len().to_string(),
        SchemaSource::Default => format!("{} (default)", schema.len()),
        SchemaSource::Rejected(_) => format!("{} (default, invalid list)", schema.len()),
    }
}
