//! bbox2lines - Group OCR word boxes into text lines
//!
//! Reads a JSON document of recognized words with their bounding boxes and
//! writes the words back out line by line in reading order.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};

use anyhow::{Context, Result};
use bbox_align::{AlignParams, Coords, ResolutionPolicy, assemble_lines, process};
use clap::{ArgAction, Parser, ValueEnum};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

/// Output format for the reconstructed lines.
#[derive(Debug, Clone, Copy, PartialEq, ValueEnum, Default)]
enum OutputType {
    /// One line of space separated words per text line (default)
    #[default]
    Text,
    /// JSON array of lines, each an array of words
    Json,
    /// JSON array of lines, each an array of word indices
    Indices,
}

/// How overlapping boxes inside one line are split apart.
#[derive(Debug, Clone, Copy, PartialEq, ValueEnum, Default)]
enum Policy {
    #[default]
    Bisect,
    ReduceTolerance,
}

/// Group OCR word bounding boxes into reading-order text lines.
#[derive(Parser, Debug)]
#[command(name = "bbox2lines")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the input JSON document, or "-" for stdin
    #[arg(default_value = "-")]
    input: String,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,

    /// Path to file where output is written, or "-" for stdout
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,

    /// Type of output to generate
    #[arg(short = 't', long = "output-type", value_enum, default_value = "text")]
    output_type: OutputType,

    // === Reconstruction options ===
    /// Keep lines whose boxes overlap instead of splitting them
    #[arg(long = "allow-overlaps", action = ArgAction::SetTrue)]
    allow_overlaps: bool,

    /// Overlap percentage above which two boxes count as overlapping
    #[arg(long = "overlap-threshold", default_value = "50.0")]
    overlap_threshold: f64,

    /// Passthrough tolerance (relative to half the box height)
    #[arg(long = "tolerance", default_value = "1.0")]
    tolerance: f64,

    /// Overlap resolution policy
    #[arg(long, value_enum, default_value = "bisect")]
    policy: Policy,

    /// Tolerance decrement per iteration of the reduce-tolerance policy
    #[arg(long = "tolerance-step", default_value = "0.1")]
    tolerance_step: f64,

    /// Iteration cap of the reduce-tolerance policy
    #[arg(long = "max-iterations", default_value = "5")]
    max_iterations: usize,
}

/// Input document: recognized words and an optional page boundary.
#[derive(Debug, Deserialize)]
struct Document {
    #[serde(default)]
    boundary: Option<Vec<Coords>>,
    words: Vec<Word>,
}

#[derive(Debug, Deserialize)]
struct Word {
    text: String,
    vertices: Vec<Coords>,
}

impl Document {
    /// The declared boundary, or the axis-aligned extent of every vertex.
    fn boundary(&self) -> Vec<Coords> {
        if let Some(boundary) = &self.boundary {
            return boundary.clone();
        }

        let mut vertices = self.words.iter().flat_map(|w| w.vertices.iter());
        let Some(&(x, y)) = vertices.next() else {
            return vec![(0.0, 0.0); 4];
        };
        let (x0, y0, x1, y1) = vertices.fold((x, y, x, y), |(x0, y0, x1, y1), &(x, y)| {
            (x0.min(x), y0.min(y), x1.max(x), y1.max(y))
        });
        vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1)]
    }
}

/// Build AlignParams from command line arguments. Range checks happen when
/// the params reach [`process`].
fn build_params(args: &Args) -> AlignParams {
    let policy = match args.policy {
        Policy::Bisect => ResolutionPolicy::Bisect,
        Policy::ReduceTolerance => ResolutionPolicy::ReduceTolerance {
            step: args.tolerance_step,
            max_iterations: args.max_iterations,
        },
    };

    AlignParams::default()
        .with_allow_overlaps(args.allow_overlaps)
        .with_overlap_threshold(args.overlap_threshold)
        .with_passthrough_tolerance(args.tolerance)
        .with_policy(policy)
}

fn read_document(input: &str) -> Result<Document> {
    let mut raw = String::new();
    if input == "-" {
        io::stdin()
            .read_to_string(&mut raw)
            .context("Failed to read document from stdin")?;
    } else {
        File::open(input)
            .and_then(|mut f| f.read_to_string(&mut raw))
            .with_context(|| format!("Failed to read input file: {input}"))?;
    }
    parse_document(&raw)
}

fn parse_document(raw: &str) -> Result<Document> {
    serde_json::from_str(raw).context("Failed to parse input document")
}

/// Reconstruct lines and render them in the requested format.
fn render(doc: &Document, params: &AlignParams, output_type: OutputType) -> Result<String> {
    let boxes: Vec<&[Coords]> = doc.words.iter().map(|w| w.vertices.as_slice()).collect();
    let lines = process(&boxes, &doc.boundary(), params)?;
    tracing::debug!(words = doc.words.len(), lines = lines.len(), "reconstructed lines");

    let texts: Vec<&str> = doc.words.iter().map(|w| w.text.as_str()).collect();
    let words = assemble_lines(&lines, &texts);

    let out = match output_type {
        OutputType::Text => {
            let mut out = String::new();
            for line in &words {
                let joined: Vec<&str> = line.iter().map(|w| **w).collect();
                out.push_str(&joined.join(" "));
                out.push('\n');
            }
            out
        }
        OutputType::Json => serde_json::to_string(&words)? + "\n",
        OutputType::Indices => serde_json::to_string(&lines)? + "\n",
    };
    Ok(out)
}

fn init_logging(debug: bool) {
    let fallback = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    let params = build_params(&args);
    let doc = read_document(&args.input)?;
    let rendered = render(&doc, &params, args.output_type)?;

    // Open output file or use stdout
    let mut output: Box<dyn Write> = if args.outfile == "-" {
        Box::new(BufWriter::new(io::stdout()))
    } else {
        let file = File::create(&args.outfile)
            .with_context(|| format!("Failed to create output file: {}", args.outfile))?;
        Box::new(BufWriter::new(file))
    };
    output.write_all(rendered.as_bytes())?;
    output.flush()?;

    Ok(())
}
