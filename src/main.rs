use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use usosplan::pipeline::{BatchOptions, BuildOptions, build_page, run_batch};

#[derive(Parser, Debug)]
#[command(
    name = "usosplan",
    about = "USOS timetable scraper and readable schedule generator"
)]
struct Cli {
    #[arg(long, default_value = "template.html")]
    template: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scrape a saved plan page into a readable schedule
    Build {
        #[arg(default_value = "timetable.html")]
        input: PathBuf,
        #[arg(short, long, default_value = "readable_timetable.html")]
        output: PathBuf,
        /// Also write the extracted events as JSON next to the output
        #[arg(long, default_value_t = false)]
        json: bool,
        #[arg(long, default_value = "Plan Zajęć")]
        title: String,
    },
    /// Fetch every plan in the url table and write one schedule per entry
    Batch {
        #[arg(long, default_value = "urls.toml")]
        urls: PathBuf,
        #[arg(long, default_value = "dist")]
        out_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    init_tracing()?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            input,
            output,
            json,
            title,
        } => {
            let events = build_page(&BuildOptions {
                input,
                template: cli.template,
                output,
                title,
                export_json: json,
            })?;
            info!(events, "build complete");
        }
        Commands::Batch { urls, out_dir } => {
            let report = run_batch(&BatchOptions {
                urls_path: urls,
                template: cli.template,
                out_dir,
            })?;
            info!(
                built = report.built,
                total = report.total,
                "batch summary"
            );
        }
    }

    Ok(())
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|err| anyhow::anyhow!(err.to_string()))?;
    Ok(())
}
