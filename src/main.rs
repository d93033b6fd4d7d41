use chrono::Local;
use clap::Parser;
use shotsort::{AssumeYes, Confirm, PromptConfirm, RemovalMode, RunConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "shotsort",
    version,
    about = "Sort screenshots into dated folders and purge old ones"
)]
struct Cli {
    /// Delete dated folders older than this many months (0 = off)
    #[arg(short, long, default_value_t = 0)]
    months_back: u32,

    /// Delete dated folders older than this many days (ignored when --months-back is set)
    #[arg(short, long, default_value_t = 0)]
    days_back: u32,

    /// Use this folder instead of looking for the screenshot folder
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Show what would happen without moving or deleting anything
    #[arg(long)]
    dry_run: bool,

    /// Delete without asking for confirmation
    #[arg(long)]
    yes: bool,

    /// Send old folders to the system bin instead of deleting them
    #[arg(long)]
    trash: bool,

    /// Log debug details to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn run_config(&self) -> RunConfig {
        RunConfig {
            months_back: self.months_back,
            days_back: self.days_back,
            dry_run: self.dry_run,
            removal: if self.trash {
                RemovalMode::Trash
            } else {
                RemovalMode::Permanent
            },
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "shotsort=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = cli.run_config();

    let dir = match cli.dir.clone().or_else(shotsort::resolve_screenshot_dir) {
        Some(dir) => dir,
        None => {
            println!("Error: screenshot folder not found.");
            return Ok(());
        }
    };

    println!("Target folder: {}", dir.display());

    println!("Sorting images into dated folders...");
    let report = shotsort::organize_folder(&dir, config.dry_run)?;
    shotsort::print_organize_report(&report);

    if let Some(threshold) = config.threshold(Local::now().naive_local())? {
        println!();
        let mut confirm: Box<dyn Confirm> = if cli.yes {
            Box::new(AssumeYes)
        } else {
            Box::new(PromptConfirm::stdio())
        };

        let outcome = shotsort::clean_folders(
            &dir,
            threshold,
            confirm.as_mut(),
            config.removal,
            config.dry_run,
        )?;

        if let shotsort::CleanOutcome::Removed(clean) = outcome {
            if !clean.failures.is_empty() {
                println!("{} folder(s) could not be deleted.", clean.failures.len());
            }
        }
    }

    println!("\nDone.");
    Ok(())
}
