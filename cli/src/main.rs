//! docxgen CLI - IEEE-style Word article generator

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docxgen::{Article, Docxgen, JsonFormat, SMECI_OUTPUT};

#[derive(Parser)]
#[command(name = "docxgen")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Generate IEEE-style Word articles", long_about = None)]
struct Cli {
    /// Output file for the built-in article
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an article (the built-in one unless a manifest is given)
    Build {
        /// Article manifest (JSON)
        #[arg(short, long, value_name = "FILE")]
        manifest: Option<PathBuf>,

        /// Output file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Store package entries without compression
        #[arg(long)]
        stored: bool,

        /// Let a repeated style registration replace the earlier one
        #[arg(long)]
        overwrite_styles: bool,
    },

    /// Print the block outline of a generated file
    Inspect {
        /// Input DOCX file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print the document model as JSON instead
        #[arg(long)]
        json: bool,

        /// Output compact JSON
        #[arg(long, requires = "json")]
        compact: bool,

        /// Print the plain text instead
        #[arg(long, conflicts_with = "json")]
        text: bool,
    },

    /// Show document information
    Info {
        /// Input DOCX file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Build {
            manifest,
            output,
            stored,
            overwrite_styles,
        }) => cmd_build(
            manifest.as_deref(),
            output.as_deref(),
            stored,
            overwrite_styles,
        ),
        Some(Commands::Inspect {
            input,
            json,
            compact,
            text,
        }) => cmd_inspect(&input, json, compact, text),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        // Default behavior: build the built-in article
        None => cmd_build(None, cli.output.as_deref(), false, false),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_build(
    manifest: Option<&Path>,
    output: Option<&Path>,
    stored: bool,
    overwrite_styles: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = output.unwrap_or_else(|| Path::new(SMECI_OUTPUT));

    let pb = ProgressBar::new(3);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Loading article...");
    let article = match manifest {
        Some(path) => Article::from_file(path)?,
        None => Article::smeci()?,
    };
    pb.inc(1);

    let mut builder = Docxgen::new();
    if stored {
        builder = builder.stored();
    }
    if overwrite_styles {
        builder = builder.overwrite_styles();
    }

    pb.set_message("Assembling blocks...");
    let asm = builder.assemble(&article)?;
    pb.inc(1);

    pb.set_message("Writing package...");
    let doc = asm.save_with_options(output, builder.write_options())?;
    pb.inc(1);
    pb.finish_and_clear();

    println!("{} {}", "Saved to".green(), output.display());
    log::info!(
        "{} blocks, {} styles",
        doc.block_count(),
        doc.styles.len()
    );

    Ok(())
}

fn cmd_inspect(
    input: &Path,
    json: bool,
    compact: bool,
    text: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if text {
        let doc = docxgen::read_file(input)?;
        println!("{}", docxgen::render::to_text(&doc));
    } else if json {
        let format = if compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        };
        println!("{}", docxgen::to_json(input, format)?);
    } else {
        print!("{}", docxgen::outline(input)?);
    }
    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let size = fs::metadata(input)?.len();
    let doc = docxgen::read_file(input)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {} bytes", "Size".bold(), size);

    if let Some(ref title) = doc.metadata.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(ref author) = doc.metadata.author {
        println!("{}: {}", "Author".bold(), author);
    }
    if let Some(ref keywords) = doc.metadata.keywords {
        println!("{}: {}", "Keywords".bold(), keywords);
    }
    if let Some(ref created) = doc.metadata.created {
        println!("{}: {}", "Created".bold(), created);
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let text = doc.plain_text();
    let count = |kind: &str| doc.blocks.iter().filter(|b| b.kind() == kind).count();
    let rows: usize = doc.tables().map(|t| t.row_count()).sum();

    println!("{}: {}", "Styles".bold(), doc.styles.len());
    println!("{}: {}", "Headings".bold(), count("heading"));
    println!("{}: {}", "Paragraphs".bold(), count("paragraph"));
    println!("{}: {} ({} data rows)", "Tables".bold(), count("table"), rows);
    println!("{}: {}", "Equations".bold(), count("equation"));
    println!("{}: {}", "Words".bold(), text.split_whitespace().count());

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "docxgen".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("IEEE-style Word article generator");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/docxgen".dimmed());
    println!("License: MIT");
}
