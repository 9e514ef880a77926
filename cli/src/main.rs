//! scanbuddy CLI - match spreadsheet values against document text

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use scanbuddy::{
    detect_kind_from_path, Condition, JsonFormat, PageRange, PagedDocument, Pipeline,
    PipelineOptions, RunInputs, RunParams, RunReport, SourceDocument, Stage, Table,
    DEFAULT_SAMPLE_SIZE,
};

#[derive(Parser)]
#[command(name = "scanbuddy")]
#[command(version)]
#[command(about = "Find spreadsheet column values in PDF text", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Match one column of a spreadsheet against filtered document lines
    Run(RunArgs),

    /// Show page count of a document or columns of a spreadsheet
    Info {
        /// Input PDF, text or spreadsheet file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// List available line conditions
    Conditions {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct RunArgs {
    /// Source document (PDF, or text with form-feed page breaks)
    #[arg(long, value_name = "FILE")]
    pdf: PathBuf,

    /// Spreadsheet holding the values to look for
    #[arg(long, value_name = "FILE")]
    table: PathBuf,

    /// Page range (e.g., "2-5" or "3"); whole document if omitted
    #[arg(long)]
    pages: Option<String>,

    /// Column number, starting at 1
    #[arg(long, default_value_t = 1)]
    column: usize,

    /// Line condition, by key or label (see `scanbuddy conditions`)
    #[arg(long, default_value = "slash-year")]
    condition: String,

    /// Output file (.xlsx or .csv)
    #[arg(short, long, value_name = "FILE", default_value = "matched_output.xlsx")]
    output: PathBuf,

    /// Directory for diagnostic files
    #[arg(long, value_name = "DIR", env = "SCANBUDDY_DIAGNOSTICS_DIR")]
    diagnostics: Option<PathBuf>,

    /// Skip unreadable pages instead of dropping all text
    #[arg(long)]
    lenient: bool,

    /// Number of matches to print
    #[arg(long, default_value_t = DEFAULT_SAMPLE_SIZE)]
    sample: usize,

    /// Print the run report as JSON
    #[arg(long)]
    json: bool,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run(args) => cmd_run(&args),
        Commands::Info { input } => cmd_info(&input),
        Commands::Conditions { json } => cmd_conditions(json),
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

fn cmd_run(args: &RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let page_count = scanbuddy::page_count(&args.pdf)?;
    let column_count = scanbuddy::column_count(&args.table)?;

    let page_range = match args.pages.as_deref() {
        Some(p) => PageRange::parse(p)?,
        None => PageRange::whole(page_count).ok_or("Source document has no pages")?,
    };
    let column = args
        .column
        .checked_sub(1)
        .ok_or("Column numbers start at 1")?;
    let condition = Condition::from_name(&args.condition)?;

    let params = RunParams::new(page_range, column, condition);
    params.validate(page_count, column_count)?;
    log::debug!("run parameters: {:?}", params);

    let mut options = PipelineOptions::new();
    if args.lenient {
        options = options.lenient();
    }
    if let Some(ref dir) = args.diagnostics {
        options = options.with_diagnostics(dir);
    }

    let inputs = RunInputs::new(&args.pdf, &args.table, &args.output);

    let pb = if args.json {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(Stage::ALL.len() as u64)
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    let result = Pipeline::new(options).run_with_progress(&inputs, &params, |stage| {
        pb.set_message(format!("{}...", stage));
        pb.inc(1);
    });
    let report = match result {
        Ok(report) => {
            pb.finish_with_message("Done!");
            report
        }
        Err(e) => {
            pb.abandon();
            return Err(e.into());
        }
    };

    if args.json {
        println!("{}", report.to_json(JsonFormat::Pretty)?);
    } else {
        print_summary(&report, args.sample);
    }
    Ok(())
}

fn print_summary(report: &RunReport, sample: usize) {
    println!();
    for warning in &report.warnings {
        println!("{} {}", "Warning:".yellow().bold(), warning);
    }

    println!("{}: {}", "Pages searched".bold(), report.pages_extracted);
    println!(
        "{}: {}",
        "Lines matching condition".bold(),
        report.filtered_line_count
    );
    println!("{}: {}", "Column values".bold(), report.column_value_count);

    if report.matches.is_empty() {
        println!("\n{}", "No matches found".yellow());
    } else {
        println!(
            "\n{} {}",
            "Matches found:".green().bold(),
            report.match_count()
        );
        for value in report.sample(sample) {
            println!("  {} {}", "├─".dimmed(), value);
        }
        let remaining = report.remaining_after(sample);
        if remaining > 0 {
            println!("  {} ... and {} more", "└─".dimmed(), remaining);
        }
    }

    println!("\n{} {}", "Saved to".green(), report.output.display());
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let kind = detect_kind_from_path(input)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());

    if kind.is_workbook() {
        let table = Table::open(input)?;
        println!("{}: {}", "Format".bold(), kind);
        println!("{}: {}", "Columns".bold(), table.column_count());
        println!("{}: {}", "Rows".bold(), table.row_count());

        println!();
        println!("{}", "Columns".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        for (i, header) in table.headers.iter().enumerate() {
            println!("{:>4}  {}", i + 1, header);
        }
    } else {
        let doc = SourceDocument::open(input)?;
        let format = match doc {
            SourceDocument::Pdf(_) => kind.to_string(),
            SourceDocument::Text(_) => "text".to_string(),
        };
        println!("{}: {}", "Format".bold(), format);
        println!("{}: {}", "Pages".bold(), doc.page_count());
    }

    Ok(())
}

fn cmd_conditions(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        let list: Vec<serde_json::Value> = Condition::ALL
            .iter()
            .map(|c| serde_json::json!({ "key": c.key(), "label": c.label() }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&list)?);
        return Ok(());
    }

    println!("{}", "Conditions".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for condition in Condition::ALL {
        let key = format!("{:<12}", condition.key());
        println!("{} {}", key.bold(), condition.label());
    }
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "scanbuddy".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Spreadsheet-to-PDF value matching tool");
    println!();
    println!("License: MIT");
}
