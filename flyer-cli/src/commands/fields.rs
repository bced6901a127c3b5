//! `flyer fields <template> [--json] [--local]`

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use flyer_core::{SchemaResolver, SchemaSource};

use super::{find_template, load_config, runtime, Backend, BackendArgs};

/// Show the fields a template asks for, in input order.
#[derive(Args, Debug)]
pub struct FieldsArgs {
    /// Template id as listed by `flyer templates`.
    pub template: String,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub backend: BackendArgs,
}

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "field")]
    name: String,
    #[tabled(rename = "kind")]
    kind: String,
    #[tabled(rename = "label")]
    label: String,
}

#[derive(Serialize)]
struct FieldsJson {
    template: String,
    source: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    rejected: Option<String>,
    fields: Vec<FieldJson>,
}

#[derive(Serialize)]
struct FieldJson {
    name: String,
    kind: String,
    label: String,
}

impl FieldsArgs {
    pub fn run(self) -> Result<()> {
        let config = load_config()?;
        let backend = Backend::from_config(&config, &self.backend)?;
        let snapshot = runtime()?.block_on(backend.catalog());
        let template = find_template(&snapshot, &self.template)?;

        let (schema, source) = SchemaResolver::default().resolve_with_source(&template);
        let rejected = match &source {
            SchemaSource::Rejected(reason) => Some(reason.to_string()),
            _ => None,
        };

        if self.json {
            let payload = FieldsJson {
                template: template.id.to_string(),
                source: source_key(&source),
                rejected,
                fields: schema
                    .fields()
                    .iter()
                    .map(|f| FieldJson {
                        name: f.name.clone(),
                        kind: f.kind.to_string(),
                        label: f.label(),
                    })
                    .collect(),
            };
            println!("{}", serde_json::to_string_pretty(&payload)?);
            return Ok(());
        }

        println!("{} ({})", template.name.bold(), template.id);
        match &rejected {
            Some(reason) => println!(
                "{} placeholder list rejected ({reason}); showing default fields",
                "!".yellow().bold()
            ),
            None => println!("source: {}", source_key(&source)),
        }

        let rows: Vec<FieldRow> = schema
            .fields()
            .iter()
            .map(|f| FieldRow {
                name: f.name.clone(),
                kind: f.kind.to_string(),
                label: f.label(),
            })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
        Ok(())
    }
}

fn source_key(source: &SchemaSource) -> &'static str {
    match source {
        SchemaSource::Declared => "declared",
        SchemaSource::Default => "default",
        SchemaSource::Rejected(_) => "rejected",
    }
}
