pub mod clean;
pub mod config;
pub mod confirm;
pub mod organize;
pub mod paths;

pub use clean::{
    CleanOutcome, CleanPlan, CleanReport, DatedFolder, apply_clean_plan, clean_folders,
    parse_folder_date, print_plan, scan_dated_folders,
};
pub use config::{RemovalMode, RunConfig};
pub use confirm::{AssumeYes, Confirm, PromptConfirm, is_affirmative};
pub use organize::{
    DATE_FORMAT, Failure, FileMove, OrganizeReport, is_image, organize_folder,
    print_organize_report, safe_destination,
};
pub use paths::{first_existing_dir, resolve_screenshot_dir, screenshot_candidates};
