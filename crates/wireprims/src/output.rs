use std::fmt;
use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

use crate::exit::{CliError, CliResult, INTERNAL};

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

/// A decoded field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Int(i64),
    Text(String),
    Match(bool),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(v) => write!(f, "{v}"),
            FieldValue::Text(v) => f.write_str(v),
            FieldValue::Match(v) => write!(f, "match={v}"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DecodedField {
    pub index: usize,
    pub kind: String,
    pub offset: usize,
    pub size: usize,
    pub value: Option<FieldValue>,
}

#[derive(Debug, Serialize)]
pub struct DecodeReport {
    pub order: &'static str,
    pub fields: Vec<DecodedField>,
    pub consumed: usize,
    pub trailing: usize,
}

#[derive(Debug, Serialize)]
pub struct EncodeReport {
    pub order: &'static str,
    pub size: usize,
    pub hex: String,
}

pub fn print_decode(report: &DecodeReport, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(report)?,
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["#", "KIND", "OFFSET", "SIZE", "VALUE"]);
            for field in &report.fields {
                table.add_row(vec![
                    field.index.to_string(),
                    field.kind.clone(),
                    field.offset.to_string(),
                    field.size.to_string(),
                    value_text(&field.value),
                ]);
            }
            println!("{table}");
            println!(
                "order={} consumed={} trailing={}",
                report.order, report.consumed, report.trailing
            );
        }
        OutputFormat::Pretty => {
            for field in &report.fields {
                println!(
                    "[{}] {} offset={} size={} value={}",
                    field.index,
                    field.kind,
                    field.offset,
                    field.size,
                    value_text(&field.value)
                );
            }
            println!(
                "order={} consumed={} trailing={}",
                report.order, report.consumed, report.trailing
            );
        }
        OutputFormat::Raw => {
            for field in report.fields.iter().filter(|f| f.value.is_some()) {
                println!("{}", value_text(&field.value));
            }
        }
    }
    Ok(())
}

pub fn print_encode(report: &EncodeReport, bytes: &[u8], format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(report)?,
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["ORDER", "SIZE", "HEX"])
                .add_row(vec![
                    report.order.to_string(),
                    report.size.to_string(),
                    report.hex.clone(),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!("order={} size={} hex={}", report.order, report.size, report.hex);
        }
        OutputFormat::Raw => print_raw(bytes),
    }
    Ok(())
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    let text = serde_json::to_string(value)
        .map_err(|err| CliError::new(INTERNAL, format!("serialize output: {err}")))?;
    println!("{text}");
    Ok(())
}

fn value_text(value: &Option<FieldValue>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => "-".to_string(),
    }
}
