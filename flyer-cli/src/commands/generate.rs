//! `flyer generate <template> [--set NAME=VALUE]... [--params <file>] [--out <file>]`
//!
//! Values from `--params` are applied first, then `--set` in order, so a
//! later assignment wins. Names outside the template's schema are accepted
//! but never sent.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use flyer_session::Session;

use super::{find_template, load_config, runtime, Backend, BackendArgs};

/// Fill a template's fields and render the flyer.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Template id as listed by `flyer templates`.
    pub template: String,

    /// Field assignment, repeatable (e.g. --set Property_Description="Lake house").
    #[arg(long = "set", short = 's', value_name = "NAME=VALUE", value_parser = parse_assignment)]
    pub set: Vec<(String, String)>,

    /// YAML mapping of field names to values.
    #[arg(long, value_name = "FILE")]
    pub params: Option<PathBuf>,

    /// Write the flyer markup here instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE")]
    pub out: Option<PathBuf>,

    #[command(flatten)]
    pub backend: BackendArgs,
}

impl GenerateArgs {
    pub fn run(self) -> Result<()> {
        let config = load_config()?;
        let backend = Backend::from_config(&config, &self.backend)?;

        let mut assignments = match &self.params {
            Some(path) => read_params(path)?,
            None => Vec::new(),
        };
        assignments.extend(self.set.iter().cloned());

        let runtime = runtime()?;
        let snapshot = runtime.block_on(backend.catalog());
        let template = find_template(&snapshot, &self.template)?;

        let mut session = Session::default();
        session.select(template);
        for (name, value) in assignments {
            if !session.schema().contains(&name) {
                eprintln!(
                    "{} '{name}' is not a field of '{}'; ignored",
                    "!".yellow().bold(),
                    self.template
                );
            }
            session.set_field(name, value);
        }

        let preview = runtime
            .block_on(backend.generate(&mut session))
            .with_context(|| format!("failed to generate flyer from '{}'", self.template))?;
        let markup = preview.markup.clone().trust();

        match &self.out {
            Some(path) => {
                std::fs::write(path, markup.as_str())
                    .with_context(|| format!("failed to write '{}'", path.display()))?;
                eprintln!("{} Wrote {}", "✓".green(), path.display());
            }
            None => println!("{markup}"),
        }
        Ok(())
    }
}

/// Parse `NAME=VALUE`; the value may itself contain `=` or be empty.
fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing field name in '{raw}'"));
    }
    Ok((name.to_string(), value.to_string()))
}

/// Read a YAML mapping of field values, keeping file order.
fn read_params(path: &Path) -> Result<Vec<(String, String)>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read '{}'", path.display()))?;
    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }
    let mapping: serde_yaml::Mapping = serde_yaml::from_str(&contents)
        .with_context(|| format!("'{}' is not a YAML mapping", path.display()))?;

    mapping
        .into_iter()
        .map(|(key, value)| {
            let name = scalar(&key)
                .with_context(|| format!("non-scalar field name in '{}'", path.display()))?;
            let value = match value {
                serde_yaml::Value::Null => String::new(),
                other => scalar(&other).with_context(|| {
                    format!("value of '{name}' in '{}' must be a scalar", path.display())
                })?,
            };
            Ok((name, value))
        })
        .collect()
}

fn scalar(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_splits_on_first_equals() {
        assert_eq!(
            parse_assignment("CTA=Call now: a=b").unwrap(),
            ("CTA".to_string(), "Call now: a=b".to_string())
        );
        assert_eq!(parse_assignment("Image_1=").unwrap().1, "");
    }

    #[test]
    fn assignment_requires_name_and_equals() {
        assert!(parse_assignment("CTA").is_err());
        assert!(parse_assignment("=value").is_err());
    }

    #[test]
    fn params_file_keeps_order_and_stringifies_scalars() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("params.yaml");
        std::fs::write(&path, "Location: Lakeside\nPrice: 450000\nCTA:\n").unwrap();
        assert_eq!(
            read_params(&path).unwrap(),
            vec![
                ("Location".to_string(), "Lakeside".to_string()),
                ("Price".to_string(), "450000".to_string()),
                ("CTA".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn params_file_rejects_nested_values() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("params.yaml");
        std::fs::write(&path, "Location:\n  city: Lakeside\n").unwrap();
        assert!(read_params(&path).is_err());
    }
}
