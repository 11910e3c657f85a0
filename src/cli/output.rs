use crate::catalog::{CatalogSink, TypeRecord};
use crate::error::Result;
use crate::tokenizer::Tokenizer;
use colored::*;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const SEPARATOR: char = '#';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    List,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "list" => Ok(OutputFormat::List),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::List => write!(f, "list"),
        }
    }
}

impl OutputFormat {
    pub fn file_name(&self) -> &'static str {
        match self {
            OutputFormat::Json => "ProtoFluxTypes.json",
            OutputFormat::List => "ProtoFluxList.txt",
        }
    }
}

/// Serialized shape of one catalog entry.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct JsonRecord<'a> {
    full_name: &'a str,
    nice_name: &'a str,
    nice_category: &'a str,
    parameter_count: usize,
    words_of_nice_name: Vec<String>,
}

/// Pretty printed JSON array; derived fields are computed here.
pub fn render_json(records: &[TypeRecord], tokenizer: &dyn Tokenizer) -> Result<String> {
    let rows: Vec<JsonRecord<'_>> = records
        .iter()
        .map(|record| JsonRecord {
            full_name: record.full_name(),
            nice_name: record.nice_name(),
            nice_category: record.nice_category(),
            parameter_count: record.parameter_count(),
            words_of_nice_name: record.words(tokenizer),
        })
        .collect();

    Ok(serde_json::to_string_pretty(&rows)?)
}

/// Builds the `#`-indented listing: one line per category and per type,
/// the number of leading separators giving the nesting depth.
#[derive(Debug, Default)]
pub struct ListingSink {
    lines: Vec<String>,
    records: Vec<TypeRecord>,
}

impl ListingSink {
    pub fn records(&self) -> &[TypeRecord] {
        &self.records
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

impl CatalogSink for ListingSink {
    fn enter_category(&mut self, depth: usize, name: &str, path: &str) {
        self.lines.push(format!(
            "{} {}{}{}",
            separators(depth),
            name,
            SEPARATOR,
            path
        ));
    }

    fn emit(&mut self, depth: usize, record: TypeRecord) {
        self.lines.push(format!(
            "{} {}{sep}{}{sep}{}",
            separators(depth),
            record.nice_name(),
            record.full_name(),
            record.nice_category(),
            sep = SEPARATOR
        ));
        self.records.push(record);
    }
}

fn separators(depth: usize) -> String {
    SEPARATOR.to_string().repeat(depth)
}

/// Write `contents` into `output_dir`, creating the directory if needed.
pub fn write_catalog(output_dir: &Path, format: OutputFormat, contents: &str) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)?;
    let path = output_dir.join(format.file_name());
    fs::write(&path, contents)?;
    Ok(path)
}

pub fn print_export_summary(type_count: usize, path: &Path, colored: bool) {
    let noun = if type_count == 1 { "type" } else { "types" };
    if colored {
        println!(
            "Loaded {} ProtoFlux {}.",
            type_count.to_string().cyan().bold(),
            noun
        );
        println!(
            "{} ProtoFlux data saved to {}",
            "✓".green().bold(),
            path.display().to_string().bold()
        );
    } else {
        println!("Loaded {} ProtoFlux {}.", type_count, noun);
        println!("✓ ProtoFlux data saved to {}", path.display());
    }
}

pub fn print_words(name: &str, words: &[String], colored: bool) {
    if colored {
        let words = words
            .iter()
            .map(|w| w.green().to_string())
            .collect::<Vec<_>>()
            .join(" ");
        println!("{}\t{}", name.bold(), words);
    } else {
        println!("{}\t{}", name, words.join(" "));
    }
}
