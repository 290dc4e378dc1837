//! docsift CLI - document outline and relevance extraction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docsift::{
    ChunkConfig, HashingEncoder, LevelingStrategy, OutlineConfig, RankerConfig, RepetitionConfig,
    RepetitionScope,
};

#[derive(Parser)]
#[command(name = "docsift")]
#[command(version)]
#[command(about = "Extract document outlines and persona-driven relevance rankings from PDFs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract title/heading outlines for every PDF in a directory
    Outline {
        /// Directory containing the PDF files to process
        #[arg(short, long, value_name = "DIR", default_value = "input")]
        input_dir: PathBuf,

        /// Directory where the output JSON files are written
        #[arg(short, long, value_name = "DIR", default_value = "output")]
        output_dir: PathBuf,

        /// Heading leveling strategy
        #[arg(long, value_enum, default_value = "quantile")]
        leveling: Leveling,

        /// Repetition threshold (fraction of pages a line must appear on)
        #[arg(long, default_value = "0.7")]
        repetition_threshold: f32,

        /// Consider every line for repetition, not just page edges
        #[arg(long)]
        all_lines: bool,
    },

    /// Rank document passages against a persona/task job spec
    Rank {
        /// Path to the job spec JSON (documents resolve against its PDFs/ subfolder)
        #[arg(value_name = "JOB")]
        job: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Number of whole-page sections to keep
        #[arg(long, default_value = "10")]
        top_sections: usize,

        /// Number of sliding-window subsections to keep
        #[arg(long, default_value = "15")]
        top_subsections: usize,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Leveling {
    /// Level by numbering depth ("3.1.4" -> H3)
    Numbering,
    /// Level by score percentile over the document
    Quantile,
}

impl From<Leveling> for LevelingStrategy {
    fn from(leveling: Leveling) -> Self {
        match leveling {
            Leveling::Numbering => LevelingStrategy::NumberingExact,
            Leveling::Quantile => LevelingStrategy::QuantileStatistical,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Outline {
            input_dir,
            output_dir,
            leveling,
            repetition_threshold,
            all_lines,
        } => cmd_outline(
            &input_dir,
            &output_dir,
            leveling,
            repetition_threshold,
            all_lines,
        ),
        Commands::Rank {
            job,
            output,
            top_sections,
            top_subsections,
        } => cmd_rank(&job, output.as_deref(), top_sections, top_subsections),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_outline(
    input_dir: &Path,
    output_dir: &Path,
    leveling: Leveling,
    repetition_threshold: f32,
    all_lines: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(input_dir)?;
    fs::create_dir_all(output_dir)?;

    let mut repetition = RepetitionConfig::default().with_threshold(repetition_threshold);
    if all_lines {
        repetition = repetition.with_scope(RepetitionScope::AllLines);
    }
    let config = OutlineConfig::new()
        .with_leveling(leveling.into())
        .with_repetition(repetition);

    let mut pdf_paths: Vec<PathBuf> = fs::read_dir(input_dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|path| {
            path.extension()
                .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("pdf"))
                .unwrap_or(false)
        })
        .collect();
    pdf_paths.sort();

    if pdf_paths.is_empty() {
        println!(
            "{} No PDF files found in '{}'. Add files and retry.",
            "Note:".yellow(),
            input_dir.display()
        );
        return Ok(());
    }

    let pb = ProgressBar::new(pdf_paths.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let mut written = 0usize;
    for path in &pdf_paths {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        pb.set_message(name.clone());

        match docsift::extract_outline_with_config(path, &config) {
            Ok(outline) => {
                let stem = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().to_string())
                    .unwrap_or_else(|| "output".to_string());
                let out_path = output_dir.join(format!("{stem}.json"));
                fs::write(&out_path, serde_json::to_string_pretty(&outline)?)?;
                written += 1;
            }
            Err(e) => {
                pb.println(format!("{} {name}: {e}", "Skipped".yellow()));
            }
        }
        pb.inc(1);
    }
    pb.finish_with_message("Done!");

    println!(
        "\n{} {written}/{} outlines written to {}",
        "Done!".green().bold(),
        pdf_paths.len(),
        output_dir.display()
    );

    Ok(())
}

fn cmd_rank(
    job: &Path,
    output: Option<&Path>,
    top_sections: usize,
    top_subsections: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let encoder = HashingEncoder::default();
    let ranker_config = RankerConfig::new()
        .with_top_sections(top_sections)
        .with_top_subsections(top_subsections);

    let report = match docsift::run_relevance_job(
        job,
        &encoder,
        &ChunkConfig::default(),
        &ranker_config,
    ) {
        Ok(report) => report,
        Err(e @ docsift::Error::NoExtractableChunks) => {
            // Fatal for the run, but surfaced as a structured error object.
            println!("{}", serde_json::json!({ "error": e.to_string() }));
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    let json = serde_json::to_string_pretty(&report)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{json}");
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "docsift".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Document outline and relevance extraction tool");
}
