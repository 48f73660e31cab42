use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use land_use_treemap::{
    config::PipelineConfig,
    io::{self, ParsedTable},
    views::{validate_views, Extractor, ViewSpec},
    visualization::{print_country_chart, print_issue_table, print_table_summary, print_view_summary},
};

#[derive(Parser)]
#[command(
    name = "land-treemap",
    about = "Land-Use Treemap Builder - restructures land-use tables into treemap documents",
    version,
    author
)]
struct Cli {
    /// Pipeline configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a land-use table into the intermediate year/country mapping
    Parse {
        /// Path to input table (CSV)
        #[arg(short, long)]
        input: PathBuf,

        /// Path of the JSON mapping to write
        #[arg(short, long)]
        output: PathBuf,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Fail on the first malformed row instead of skipping it
        #[arg(long)]
        strict: bool,
    },

    /// Write one treemap document per year for each view
    Extract {
        /// Path to input table (CSV) or intermediate mapping (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Directory to write documents into
        #[arg(short = 'd', long, default_value = ".")]
        output_dir: PathBuf,

        /// View as label=measurement (repeatable; replaces configured views)
        #[arg(long = "view")]
        views: Vec<ViewSpec>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Parse a table, write the mapping, then write every view's documents
    Run {
        /// Path to input table (CSV)
        #[arg(short, long)]
        input: PathBuf,

        /// Directory to write the mapping and documents into
        #[arg(short = 'd', long, default_value = ".")]
        output_dir: PathBuf,

        /// View as label=measurement (repeatable; replaces configured views)
        #[arg(long = "view")]
        views: Vec<ViewSpec>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Fail on the first malformed row instead of skipping it
        #[arg(long)]
        strict: bool,
    },

    /// Display a summary of a table and its views
    Summary {
        /// Path to input table (CSV) or intermediate mapping (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Maximum number of parse issues to list
        #[arg(long, default_value = "20")]
        issues: usize,

        /// Chart the heaviest countries of this year's documents
        #[arg(long)]
        year: Option<String>,

        /// Number of countries to chart
        #[arg(long, default_value = "10")]
        top: usize,
    },

    /// Serve the mapping and view documents over HTTP
    #[cfg(feature = "web")]
    Serve {
        /// Path to input table (CSV) or intermediate mapping (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load(path: &Path, strict: bool) -> Result<ParsedTable> {
    let parsed = io::load_table(path, strict)?;
    println!(
        "  Loaded {} rows across {} years from {}",
        parsed.rows_read,
        parsed.mapping.num_years(),
        path.display()
    );
    if !parsed.issues.is_empty() {
        eprintln!(
            "{}: {} rows had issues (run `summary` to list them)",
            "Warning".yellow(),
            parsed.issues.len()
        );
    }
    Ok(parsed)
}

fn select_views(config: &mut PipelineConfig, views: Vec<ViewSpec>) -> Result<()> {
    if !views.is_empty() {
        validate_views(&views)?;
        config.views = views;
    }
    Ok(())
}

fn write_documents(parsed: &ParsedTable, config: &PipelineConfig, output_dir: &Path) -> Result<()> {
    let extractor = Extractor::with_options(&parsed.mapping, config.extract_options());
    for extracted in extractor.extract_all(&config.views) {
        let written =
            io::write_view_documents(&extracted, output_dir, &config.output_prefix, config.pretty)?;
        println!(
            "{} Wrote {} '{}' documents to {}",
            "Success:".green().bold(),
            written.len(),
            extracted.view.label,
            output_dir.display()
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let mut config = PipelineConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Parse {
            input,
            output,
            pretty,
            strict,
        } => {
            let parsed = load(&input, strict || config.strict)?;
            io::write_mapping_json(&parsed.mapping, &output, pretty || config.pretty)?;
            println!(
                "{} Parsed {} -> {}",
                "Success:".green().bold(),
                input.display(),
                output.display()
            );
        }

        Commands::Extract {
            input,
            output_dir,
            views,
            pretty,
        } => {
            select_views(&mut config, views)?;
            config.pretty |= pretty;
            let parsed = load(&input, config.strict)?;
            write_documents(&parsed, &config, &output_dir)?;
        }

        Commands::Run {
            input,
            output_dir,
            views,
            pretty,
            strict,
        } => {
            select_views(&mut config, views)?;
            config.pretty |= pretty;
            config.strict |= strict;

            let parsed = load(&input, config.strict)?;
            std::fs::create_dir_all(&output_dir)?;
            let mapping_path = output_dir.join(config.mapping_file_name());
            io::write_mapping_json(&parsed.mapping, &mapping_path, config.pretty)?;
            println!(
                "{} First parse complete: {}",
                "Success:".green().bold(),
                mapping_path.display()
            );

            write_documents(&parsed, &config, &output_dir)?;
        }

        Commands::Summary {
            input,
            issues,
            year,
            top,
        } => {
            println!(
                "\n{}",
                format!("Land-Use Summary: {}", input.display()).bold().cyan()
            );
            let parsed = load(&input, config.strict)?;
            print_table_summary(&parsed);
            print_issue_table(&parsed.issues, issues);

            let extractor = Extractor::with_options(&parsed.mapping, config.extract_options());
            for extracted in extractor.extract_all(&config.views) {
                print_view_summary(&extracted);
                if let Some(year) = &year {
                    match extracted.document(year) {
                        Some(doc) => print_country_chart(doc, top),
                        None => eprintln!(
                            "{}: no '{}' data for year {year}",
                            "Warning".yellow(),
                            extracted.view.label
                        ),
                    }
                }
            }
        }

        #[cfg(feature = "web")]
        Commands::Serve { input, port } => {
            let parsed = load(&input, config.strict)?;
            let state = land_use_treemap::web::AppState::new(parsed, &config);
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(land_use_treemap::web::start_server(state, port))?;
        }
    }

    Ok(())
}
