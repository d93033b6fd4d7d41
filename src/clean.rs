use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::RemovalMode;
use crate::confirm::Confirm;
use crate::organize::{DATE_FORMAT, Failure};

#[derive(Debug, Clone)]
pub struct DatedFolder {
    pub path: PathBuf,
    pub name: String,
    pub date: NaiveDate,
    pub file_count: usize,
}

#[derive(Debug, Clone)]
pub struct CleanPlan {
    pub root: PathBuf,
    pub threshold: NaiveDateTime,
    pub candidates: Vec<DatedFolder>,
}

#[derive(Debug, Default)]
pub struct CleanReport {
    pub removed: Vec<PathBuf>,
    pub failures: Vec<Failure>,
}

#[derive(Debug)]
pub enum CleanOutcome {
    NothingToDelete,
    DryRun(CleanPlan),
    Cancelled(CleanPlan),
    Removed(CleanReport),
}

/// Strict `YYYY-MM-DD`; anything else is not a dated folder.
pub fn parse_folder_date(name: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(name, DATE_FORMAT).ok()?;
    // reject forms like "2024-3-1" that parse but would never be produced
    (date.format(DATE_FORMAT).to_string() == name).then_some(date)
}

/// Dated subfolders of `root` whose date falls strictly before `threshold`, oldest first.
pub fn scan_dated_folders(root: &Path, threshold: NaiveDateTime) -> Result<CleanPlan> {
    let mut candidates = Vec::new();

    for entry in fs::read_dir(root).with_context(|| format!("read_dir failed: {}", root.display()))?
    {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable directory entry");
                continue;
            }
        };
        let path = entry.path();

        if !path.is_dir() {
            continue;
        }

        let Some(name) = path.file_name().and_then(|s| s.to_str()).map(str::to_string) else {
            continue;
        };
        let Some(date) = parse_folder_date(&name) else {
            tracing::debug!(folder = %name, "not a dated folder, leaving it alone");
            continue;
        };

        if date.and_time(chrono::NaiveTime::MIN) < threshold {
            let file_count = count_files(&path);
            candidates.push(DatedFolder {
                path,
                name,
                date,
                file_count,
            });
        }
    }

    candidates.sort_by_key(|c| c.date);

    Ok(CleanPlan {
        root: root.to_path_buf(),
        threshold,
        candidates,
    })
}

fn count_files(dir: &Path) -> usize {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .count()
}

pub fn print_plan(plan: &CleanPlan) {
    println!(
        "Folders dated before {} under {}:",
        plan.threshold.format(DATE_FORMAT),
        plan.root.display()
    );
    for item in &plan.candidates {
        println!("  [DIR] {}  ({} files)", item.name, item.file_count);
    }
}

/// Removes every candidate. One failure does not stop the rest.
pub fn apply_clean_plan(plan: &CleanPlan, mode: RemovalMode) -> CleanReport {
    let mut report = CleanReport::default();

    for item in &plan.candidates {
        let result = match mode {
            RemovalMode::Permanent => fs::remove_dir_all(&item.path)
                .with_context(|| format!("Failed to delete '{}'", item.path.display())),
            RemovalMode::Trash => trash::delete(&item.path)
                .with_context(|| format!("Failed to move '{}' to trash", item.path.display())),
        };

        match result {
            Ok(()) => {
                println!("Deleted: {}", item.name);
                tracing::debug!(path = %item.path.display(), ?mode, "removed dated folder");
                report.removed.push(item.path.clone());
            }
            Err(error) => {
                println!("Failed to delete: {} ({:#})", item.name, error);
                tracing::warn!(path = %item.path.display(), "{error:#}");
                report.failures.push(Failure {
                    path: item.path.clone(),
                    error,
                });
            }
        }
    }

    report
}

/// List old dated folders, ask once, and remove them if the answer is yes.
pub fn clean_folders(
    root: &Path,
    threshold: NaiveDateTime,
    confirm: &mut dyn Confirm,
    mode: RemovalMode,
    dry_run: bool,
) -> Result<CleanOutcome> {
    let plan = scan_dated_folders(root, threshold)?;

    if plan.candidates.is_empty() {
        println!("Nothing to delete.");
        return Ok(CleanOutcome::NothingToDelete);
    }

    print_plan(&plan);

    if dry_run {
        println!("\nDry-run only. Nothing was deleted.");
        return Ok(CleanOutcome::DryRun(plan));
    }

    let prompt = match mode {
        RemovalMode::Permanent => format!(
            "\nPermanently delete {} folder(s)?",
            plan.candidates.len()
        ),
        RemovalMode::Trash => format!("\nMove {} folder(s) to the bin?", plan.candidates.len()),
    };

    if !confirm.confirm(&prompt)? {
        println!("Deletion cancelled.");
        return Ok(CleanOutcome::Cancelled(plan));
    }

    Ok(CleanOutcome::Removed(apply_clean_plan(&plan, mode)))
}
