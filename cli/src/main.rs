//! dochtml CLI - text and DOCX to HTML fragment converter

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use dochtml::convert::{
    collect_inputs, convert_directory, convert_file, BatchOptions, ConvertOptions,
};
use dochtml::{parse_file_with_options, Document, JsonFormat, LayoutConfig, ParseOptions};

/// Configuration file picked up from the working directory.
const DEFAULT_CONFIG: &str = "basic.ini";

#[derive(Parser)]
#[command(name = "dochtml")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Convert text and DOCX documents to HTML fragments", long_about = None)]
struct Cli {
    /// Directory to convert (defaults to the current directory)
    #[arg(value_name = "DIR")]
    input: Option<PathBuf>,

    /// Layout configuration file (INI or JSON)
    #[arg(long, global = true, value_name = "PATH", env = "DOCHTML_CONFIG")]
    config: Option<PathBuf>,

    /// Configuration section to read instead of DEFAULT
    #[arg(long, global = true, value_name = "NAME")]
    section: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert one document to HTML
    Convert {
        /// Input .txt or .docx file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Put each fragment on its own line
        #[arg(long)]
        pretty: bool,
    },

    /// Convert every document in a directory
    Batch {
        /// Input directory
        #[arg(value_name = "DIR")]
        input: PathBuf,

        /// Output directory (defaults to Converted_DD_MM_YYYY inside DIR)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Convert one file at a time
        #[arg(long)]
        sequential: bool,

        /// Do not write the .txt copy of each output
        #[arg(long)]
        no_text_copy: bool,

        /// Encoding of the written files
        #[arg(long, value_name = "LABEL", default_value = "utf-8")]
        output_encoding: String,
    },

    /// Dump the parsed document model as JSON
    Json {
        /// Input .txt or .docx file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show document information
    Info {
        /// Input .txt or .docx file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print the information as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();
    let section = cli.section.as_deref();

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            output,
            pretty,
        }) => cmd_convert(&input, output.as_deref(), pretty, config, section),
        Some(Commands::Batch {
            input,
            output,
            sequential,
            no_text_copy,
            output_encoding,
        }) => {
            let options = BatchOptions::new()
                .with_text_copy(!no_text_copy)
                .with_convert_options(ConvertOptions::new().with_output_encoding(output_encoding));
            let options = match output {
                Some(dir) => options.with_output_dir(dir),
                None => options,
            };
            let options = if sequential {
                options.sequential()
            } else {
                options
            };
            cmd_batch(&input, options, config, section)
        }
        Some(Commands::Json {
            input,
            output,
            compact,
        }) => cmd_json(&input, output.as_deref(), compact),
        Some(Commands::Info { input, json }) => cmd_info(&input, json),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert the given or current directory
            let input = cli.input.unwrap_or_else(|| PathBuf::from("."));
            cmd_batch(&input, BatchOptions::new(), config, section)
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Resolve the layout: an explicit file, then `basic.ini` in the working
/// directory, then the built-in default.
fn load_layout(
    config: Option<&Path>,
    section: Option<&str>,
) -> Result<LayoutConfig, Box<dyn std::error::Error>> {
    if let Some(path) = config {
        return Ok(LayoutConfig::from_path(path, section)?);
    }

    let fallback = Path::new(DEFAULT_CONFIG);
    if fallback.is_file() {
        return Ok(LayoutConfig::from_path(fallback, section)?);
    }

    log::warn!(
        "No {} in the working directory, using the default layout",
        DEFAULT_CONFIG
    );
    Ok(LayoutConfig::default())
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    pretty: bool,
    config: Option<&Path>,
    section: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let layout = load_layout(config, section)?;
    let mut options = ConvertOptions::new().with_layout(layout);
    if pretty {
        options.render.separator = "\n".to_string();
    }

    let result = convert_file(input, &options)?;

    if let Some(path) = output {
        fs::write(path, &result.content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", result.content);
    }

    Ok(())
}

fn cmd_batch(
    input: &Path,
    options: BatchOptions,
    config: Option<&Path>,
    section: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let layout = load_layout(config, section)?;
    let convert = options.convert.clone().with_layout(layout);
    let options = options.with_convert_options(convert);

    let pending = collect_inputs(input)?.len();
    if pending == 0 {
        println!("{} {}", "No documents found in".yellow(), input.display());
        return Ok(());
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Converting {} documents...", pending));

    let report = convert_directory(input, &options)?;
    pb.finish_with_message("Done!");

    println!("\n{}", "Converted:".green().bold());
    for (i, file) in report.converted.iter().enumerate() {
        let branch = if i + 1 == report.converted.len() {
            "└─"
        } else {
            "├─"
        };
        let name = file
            .source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        println!(
            "  {} {} ({} paragraphs)",
            branch.dimmed(),
            name,
            file.paragraph_count
        );
    }

    if !report.skipped.is_empty() {
        println!("\n{}", "Skipped:".yellow().bold());
        for file in &report.skipped {
            println!("  {} {}: {}", "-".dimmed(), file.source.display(), file.reason);
        }
    }

    println!(
        "\n{} {}/{} documents written to {}",
        "Done!".green().bold(),
        report.converted.len(),
        report.total(),
        report.output_dir.display()
    );

    Ok(())
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = dochtml::parse_file(input)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = dochtml::render::to_json(&doc, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_info(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    // Lenient so a truncated DOCX still reports what was readable
    let options = ParseOptions::new().lenient();
    let doc = parse_file_with_options(input, options)?;

    let stats = DocumentStats::of(&doc);

    if json {
        let info = serde_json::json!({
            "file": input.display().to_string(),
            "metadata": doc.metadata,
            "stats": {
                "paragraphs": stats.paragraphs,
                "breaks": stats.breaks,
                "runs": stats.runs,
                "words": stats.words,
                "characters": stats.characters,
            },
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Format".bold(), doc.metadata.format);
    if let Some(ref encoding) = doc.metadata.encoding {
        println!("{}: {}", "Encoding".bold(), encoding);
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Paragraphs".bold(), stats.paragraphs);
    println!("{}: {}", "Breaks".bold(), stats.breaks);
    println!("{}: {}", "Runs".bold(), stats.runs);
    println!("{}: {}", "Words".bold(), stats.words);
    println!("{}: {}", "Characters".bold(), stats.characters);

    Ok(())
}

/// Counts shown by `info`.
struct DocumentStats {
    paragraphs: usize,
    breaks: usize,
    runs: usize,
    words: usize,
    characters: usize,
}

impl DocumentStats {
    fn of(doc: &Document) -> Self {
        let text = doc.plain_text();
        Self {
            paragraphs: doc.paragraph_count(),
            breaks: doc.paragraphs.iter().filter(|p| p.is_empty()).count(),
            runs: doc.run_count(),
            words: text.split_whitespace().count(),
            characters: text.chars().count(),
        }
    }
}

fn cmd_version() {
    println!("{} {}", "dochtml".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Text and DOCX to HTML fragment converter");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/dochtml".dimmed());
    println!("License: MIT");
}
