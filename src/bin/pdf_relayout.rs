//! pdf_relayout - Reconstruct and re-render the layout of PDF files
//!
//! Usage:
//!   pdf_relayout text input.pdf
//!   pdf_relayout layout input.pdf -o layout.json --no-spacing
//!   pdf_relayout render input.pdf -o out.pdf --mode reflow
//!   pdf_relayout render layout.json -o out.pdf --mode exact
//!
//! Set RUST_LOG=info (or debug) for progress output.

use clap::{Parser, Subcommand, ValueEnum};
use pdf_relayout::writer::{Base14Writer, LayoutWriter, PdfWriterConfig};
use pdf_relayout::{DocumentExtraction, ExtractionOptions, LayoutConfig, api};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Re-rendering mode.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum RenderMode {
    /// Every run at its original position
    #[default]
    Exact,
    /// Page text typeset top-down on A4 pages
    Reflow,
}

#[derive(Parser, Debug)]
#[command(name = "pdf_relayout")]
#[command(author, version, about = "PDF layout reconstruction and re-rendering", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print plain text, one line per page
    Text {
        /// Input PDF
        input: PathBuf,
    },
    /// Extract the layout as JSON
    Layout {
        /// Input PDF
        input: PathBuf,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        options: LayoutArgs,
    },
    /// Re-render a PDF or a saved layout JSON
    Render {
        /// Input PDF or layout JSON
        input: PathBuf,

        /// Output PDF
        #[arg(short, long)]
        output: PathBuf,

        /// Placement mode
        #[arg(short, long, value_enum, default_value = "exact")]
        mode: RenderMode,

        /// Compress content streams
        #[arg(long)]
        compress: bool,

        #[command(flatten)]
        options: LayoutArgs,
    },
}

#[derive(clap::Args, Debug)]
struct LayoutArgs {
    /// Join runs with single spaces instead of reconstructing gaps
    #[arg(long)]
    no_spacing: bool,

    /// Skip line grouping
    #[arg(long)]
    no_lines: bool,

    /// Skip column, table and alignment detection
    #[arg(long)]
    no_structure: bool,

    /// Vertical line clustering threshold
    #[arg(long, default_value = "5")]
    line_threshold: i32,

    /// Horizontal column clustering threshold
    #[arg(long, default_value = "20")]
    column_threshold: i32,
}

impl LayoutArgs {
    fn to_options(&self) -> ExtractionOptions {
        ExtractionOptions::new()
            .with_preserve_spacing(!self.no_spacing)
            .with_group_by_lines(!self.no_lines)
            .with_detect_columns(!self.no_structure)
            .with_layout(
                LayoutConfig::new()
                    .with_line_threshold(self.line_threshold)
                    .with_column_threshold(self.column_threshold),
            )
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn load_extraction(input: &Path, options: &ExtractionOptions) -> pdf_relayout::Result<DocumentExtraction> {
    if is_json(input) {
        let json = std::fs::read_to_string(input)?;
        DocumentExtraction::from_json(&json)
    } else {
        api::extract_file(input, options)
    }
}

fn run(cli: Cli) -> pdf_relayout::Result<()> {
    match cli.command {
        Commands::Text { input } => {
            let bytes = std::fs::read(&input)?;
            let text = api::extract_plain_text(&bytes)?;
            std::io::stdout().write_all(text.as_bytes())?;
        },
        Commands::Layout {
            input,
            output,
            options,
        } => {
            let extraction = api::extract_file(&input, &options.to_options())?;
            let json = extraction.to_json()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    log::info!("Wrote {} page(s) to {}", extraction.total_pages, path.display());
                },
                None => println!("{}", json),
            }
        },
        Commands::Render {
            input,
            output,
            mode,
            compress,
            options,
        } => {
            let extraction = load_extraction(&input, &options.to_options())?;
            let config = PdfWriterConfig::default()
                .with_title(extraction.metadata.source.clone())
                .with_compress(compress);
            let writer = LayoutWriter::new(Base14Writer::with_config(config));
            match mode {
                RenderMode::Exact => writer.save_exact(&extraction, &output)?,
                RenderMode::Reflow => writer.save_reflowed(&extraction, &output)?,
            }
            log::info!("Rendered {} page(s) to {}", extraction.total_pages, output.display());
        },
    }
    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
