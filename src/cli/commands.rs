//! Command implementations

use crate::config::ExtractorConfig;
use crate::extract::{HierarchyExtractor, Record};
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Records extracted from one input document
#[derive(Debug, Clone, Serialize)]
pub struct DocumentRecords {
    /// File path, or `-` for stdin
    pub source: String,
    pub records: Vec<Record>,
}

/// One record tagged with its source, for line-delimited output
#[derive(Serialize)]
struct SourcedRecord<'a> {
    source: &'a str,
    #[serde(flatten)]
    record: &'a Record,
}

/// Where a document is read from
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    fn label(&self) -> String {
        match self {
            Input::Stdin => "-".to_string(),
            Input::File(path) => path.display().to_string(),
        }
    }

    fn read(&self) -> Result<Vec<u8>> {
        match self {
            Input::Stdin => {
                let mut buf = Vec::new();
                std::io::stdin()
                    .read_to_end(&mut buf)
                    .context("Failed to read stdin")?;
                Ok(buf)
            }
            Input::File(path) => {
                std::fs::read(path).with_context(|| format!("Failed to read {:?}", path))
            }
        }
    }
}

/// Resolve the configuration file, then apply command line overrides
pub fn effective_config(
    config_path: Option<&Path>,
    selector: Option<&str>,
    exclude: &[String],
) -> Result<ExtractorConfig> {
    let mut config = ExtractorConfig::load_or_default(config_path)?;

    if let Some(selector) = selector {
        config = config.with_selector(selector);
    }
    if !exclude.is_empty() {
        config = config.with_excluded_tags(exclude.iter().cloned());
    }

    Ok(config)
}

/// Extract records from every input
///
/// Inputs that cannot be read or decoded are skipped with a warning; the
/// command fails only when nothing could be extracted at all.
pub fn extract(inputs: &[String], config: &ExtractorConfig) -> Result<Vec<DocumentRecords>> {
    let extractor = HierarchyExtractor::new(config)?;

    let mut documents = Vec::new();
    let mut failures = 0usize;

    for input in inputs.iter().flat_map(|i| expand_input(i)) {
        let source = input.label();

        let records = input
            .read()
            .and_then(|bytes| extractor.extract_bytes(&bytes).map_err(Into::into));

        match records {
            Ok(records) => {
                tracing::info!("Extracted {} record(s) from {}", records.len(), source);
                documents.push(DocumentRecords { source, records });
            }
            Err(e) => {
                tracing::warn!("Skipping {}: {:#}", source, e);
                failures += 1;
            }
        }
    }

    if documents.is_empty() && failures > 0 {
        anyhow::bail!("No document could be extracted ({} failed)", failures);
    }

    Ok(documents)
}

/// Expand a command line input into documents
fn expand_input(input: &str) -> Vec<Input> {
    if input == "-" {
        return vec![Input::Stdin];
    }

    let path = Path::new(input);
    if !path.is_dir() {
        return vec![Input::File(path.to_path_buf())];
    }

    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Failed to walk {:?}: {}", path, e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && is_html_file(entry.path()))
        .map(|entry| entry.into_path())
        .collect();
    files.sort();

    tracing::debug!("Found {} HTML file(s) under {:?}", files.len(), path);
    files.into_iter().map(Input::File).collect()
}

fn is_html_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| matches!(e.to_ascii_lowercase().as_str(), "html" | "htm"))
        .unwrap_or(false)
}

/// Show the effective configuration, or write the default one
pub fn config(config_path: Option<&Path>, init: Option<&Path>, force: bool) -> Result<()> {
    if let Some(target) = init {
        if target.exists() && !force {
            anyhow::bail!("{:?} already exists. Use --force to overwrite.", target);
        }
        ExtractorConfig::default().save(target)?;
        eprintln!("✓ Wrote default configuration to {:?}", target);
        return Ok(());
    }

    let config = ExtractorConfig::load_or_default(config_path)?;
    print!("{}", config.to_toml()?);
    Ok(())
}

/// Print documents as a pretty JSON array
pub fn print_documents_json(documents: &[DocumentRecords]) -> Result<()> {
    let json = serde_json::to_string_pretty(documents)?;
    println!("{}", json);
    Ok(())
}

/// Print one JSON record per line
pub fn print_documents_jsonl(documents: &[DocumentRecords]) -> Result<()> {
    for document in documents {
        for record in &document.records {
            let line = serde_json::to_string(&SourcedRecord {
                source: &document.source,
                record,
            })?;
            println!("{}", line);
        }
    }
    Ok(())
}

/// Print documents in text format
pub fn print_documents_text(documents: &[DocumentRecords]) {
    if documents.iter().all(|d| d.records.is_empty()) {
        println!("No records extracted.");
        return;
    }

    for document in documents {
        println!("\n{} ({} records)", document.source, document.records.len());
        println!("{}", "=".repeat(document.source.chars().count().max(8)));

        for record in &document.records {
            let path = if record.headings.is_empty() {
                "-".to_string()
            } else {
                record.headings.join(" > ")
            };
            let anchor = record
                .anchor
                .as_deref()
                .map(|a| format!(" #{}", a))
                .unwrap_or_default();

            println!(
                "[{}] <{}> weight {}{}  {}",
                record.position(),
                record.tag_name,
                record.weight(),
                anchor,
                path
            );
            println!("    {}", preview(&record.content, 80));
        }
    }
}

/// Single-line preview of text, cut at a char boundary
fn preview(text: &str, max_chars: usize) -> String {
    let line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if line.chars().count() <= max_chars {
        return line;
    }
    let cut: String = line.chars().take(max_chars).collect();
    format!("{}…", cut)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_directory_sorted_html_only() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("b.html"), "<p>b</p>").unwrap();
        std::fs::write(dir.path().join("a.HTM"), "<p>a</p>").unwrap();
        std::fs::write(dir.path().join("sub").join("c.html"), "<p>c</p>").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "<p>no</p>").unwrap();

        let inputs = expand_input(dir.path().to_str().unwrap());
        let names: Vec<String> = inputs
            .iter()
            .map(|i| match i {
                Input::File(p) => p.strip_prefix(dir.path()).unwrap().display().to_string(),
                Input::Stdin => "-".to_string(),
            })
            .collect();

        assert_eq!(names, vec!["a.HTM", "b.html", "sub/c.html"]);
    }

    #[test]
    fn test_stdin_input() {
        assert_eq!(expand_input("-"), vec![Input::Stdin]);
    }

    #[test]
    fn test_extract_skips_unreadable_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.html");
        std::fs::write(&good, "<h1>T</h1><p>one</p><p>two</p>").unwrap();
        let missing = dir.path().join("missing.html");

        let inputs = vec![
            good.display().to_string(),
            missing.display().to_string(),
        ];
        let documents = extract(&inputs, &ExtractorConfig::default()).unwrap();

        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].records.len(), 2);
        assert_eq!(documents[0].records[1].headings, vec!["T"]);
    }

    #[test]
    fn test_extract_fails_when_nothing_readable() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.html").display().to_string();
        assert!(extract(&[missing], &ExtractorConfig::default()).is_err());
    }

    #[test]
    fn test_overrides_apply() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hierex.toml");
        std::fs::write(&path, "content_selector = \"li\"\nexcluded_tags = [\"code\"]\n").unwrap();

        let config = effective_config(Some(&path), None, &[]).unwrap();
        assert_eq!(config.content_selector, "li");

        let config = effective_config(Some(&path), Some("div"), &["script".to_string()]).unwrap();
        assert_eq!(config.content_selector, "div");
        assert_eq!(config.excluded_tags, vec!["script"]);
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("  a\n  b  ", 10), "a b");
        assert_eq!(preview("abcdef", 3), "abc…");
    }
}
