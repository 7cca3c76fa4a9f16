//! Batch conversion of a directory.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use rayon::prelude::*;

use crate::detect::is_supported;
use crate::error::Result;

use super::{convert_file, ConvertOptions};

/// Prefix of the date-stamped output directory.
pub const OUTPUT_DIR_PREFIX: &str = "Converted";

/// Options for converting a directory.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Per-document conversion options
    pub convert: ConvertOptions,

    /// Output directory (None = date-stamped directory inside the input)
    pub output_dir: Option<PathBuf>,

    /// Also write the HTML under a `.txt` name next to the `.html` file
    pub write_text_copy: bool,

    /// Convert files in parallel
    pub parallel: bool,
}

impl BatchOptions {
    /// Create new batch options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set per-document conversion options.
    pub fn with_convert_options(mut self, options: ConvertOptions) -> Self {
        self.convert = options;
        self
    }

    /// Set the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Enable or disable the `.txt` copy of each output.
    pub fn with_text_copy(mut self, write: bool) -> Self {
        self.write_text_copy = write;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            convert: ConvertOptions::default(),
            output_dir: None,
            write_text_copy: true,
            parallel: true,
        }
    }
}

/// A successfully converted file.
#[derive(Debug, Clone)]
pub struct ConvertedFile {
    /// Input file
    pub source: PathBuf,
    /// Files written for it
    pub outputs: Vec<PathBuf>,
    /// Paragraphs in the source document
    pub paragraph_count: usize,
}

/// A file that could not be converted.
#[derive(Debug, Clone)]
pub struct SkippedFile {
    /// Input file
    pub source: PathBuf,
    /// Why it was skipped
    pub reason: String,
}

/// Outcome of a batch run.
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// Directory the outputs were written to
    pub output_dir: PathBuf,
    /// Converted files in input order
    pub converted: Vec<ConvertedFile>,
    /// Skipped files in input order
    pub skipped: Vec<SkippedFile>,
}

impl BatchReport {
    /// Number of files looked at.
    pub fn total(&self) -> usize {
        self.converted.len() + self.skipped.len()
    }

    /// Whether every input was converted.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Name of the output directory for a date, e.g. `Converted_19_10_2026`.
pub fn dated_output_dir_name(date: NaiveDate) -> String {
    format!("{}{}", OUTPUT_DIR_PREFIX, date.format("_%d_%m_%Y"))
}

/// Today's output directory inside `input_dir`.
pub fn default_output_dir(input_dir: &Path) -> PathBuf {
    input_dir.join(dated_output_dir_name(Local::now().date_naive()))
}

/// List convertible files in a directory, sorted by name.
///
/// Only regular files with a supported extension are returned; the
/// directory is not searched recursively.
pub fn collect_inputs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_file() && is_supported(&path) {
            inputs.push(path);
        }
    }
    inputs.sort();
    Ok(inputs)
}

/// Convert every supported file of `input_dir`.
///
/// Files that fail to read or parse are logged and reported as skipped;
/// only failing to list the input or create the output directory aborts
/// the run.
pub fn convert_directory(input_dir: &Path, options: &BatchOptions) -> Result<BatchReport> {
    let output_dir = options
        .output_dir
        .clone()
        .unwrap_or_else(|| default_output_dir(input_dir));
    fs::create_dir_all(&output_dir)?;

    let inputs = collect_inputs(input_dir)?;
    let stems = output_stems(&inputs);
    log::info!(
        "Converting {} files from {} into {}",
        inputs.len(),
        input_dir.display(),
        output_dir.display()
    );

    let convert = |(source, stem): (&PathBuf, &String)| {
        let outcome = convert_one(source, stem, &output_dir, options);
        (source.clone(), outcome)
    };
    let outcomes: Vec<(PathBuf, Result<ConvertedFile>)> = if options.parallel {
        inputs.par_iter().zip(stems.par_iter()).map(convert).collect()
    } else {
        inputs.iter().zip(stems.iter()).map(convert).collect()
    };

    let mut report = BatchReport {
        output_dir,
        converted: Vec::new(),
        skipped: Vec::new(),
    };
    for (source, outcome) in outcomes {
        match outcome {
            Ok(converted) => report.converted.push(converted),
            Err(e) => {
                log::warn!("Skipping {}: {}", source.display(), e);
                report.skipped.push(SkippedFile {
                    source,
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok(report)
}

fn convert_one(
    source: &Path,
    stem: &str,
    output_dir: &Path,
    options: &BatchOptions,
) -> Result<ConvertedFile> {
    let result = convert_file(source, &options.convert)?;
    let bytes = result.encode(&options.convert.output_encoding)?;

    let mut outputs = vec![output_dir.join(format!("{}.html", stem))];
    if options.write_text_copy {
        let copy = output_dir.join(format!("{}.txt", stem));
        if is_same_file(&copy, source) {
            log::warn!("Not writing text copy over its source {}", source.display());
        } else {
            outputs.push(copy);
        }
    }
    for path in &outputs {
        fs::write(path, &bytes)?;
    }

    log::debug!("Converted {} ({} bytes)", source.display(), bytes.len());
    Ok(ConvertedFile {
        source: source.to_path_buf(),
        outputs,
        paragraph_count: result.metadata.paragraph_count,
    })
}

/// Whether two paths name the same existing file.
fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Output base names. Inputs sharing a stem (e.g. `a.txt` and `a.docx`)
/// keep their full file name so their outputs do not overwrite each other.
fn output_stems(inputs: &[PathBuf]) -> Vec<String> {
    let stem = |path: &PathBuf| {
        path.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    };

    let mut counts: HashMap<String, usize> = HashMap::new();
    for path in inputs {
        *counts.entry(stem(path)).or_default() += 1;
    }

    inputs
        .iter()
        .map(|path| {
            let base = stem(path);
            if counts.get(&base).copied().unwrap_or(0) > 1 {
                path.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or(base)
            } else {
                base
            }
        })
        .collect()
}
