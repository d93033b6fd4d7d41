use std::path::{Path, PathBuf};

/// Screenshot folder locations relative to the home directory, in lookup order.
const SCREENSHOT_DIRS: &[&[&str]] = &[
    &["Pictures", "Screenshots"],
    &["OneDrive", "画像", "Screenshots"],
    &["OneDrive", "Pictures", "Screenshots"],
    &["画像", "スクリーンショット"],
];

pub fn screenshot_candidates(home: &Path) -> impl Iterator<Item = PathBuf> + '_ {
    SCREENSHOT_DIRS
        .iter()
        .map(move |parts| parts.iter().fold(home.to_path_buf(), |acc, p| acc.join(p)))
}

/// First candidate under `home` that exists as a directory.
pub fn first_existing_dir(home: &Path) -> Option<PathBuf> {
    screenshot_candidates(home).find(|p| {
        let found = p.is_dir();
        tracing::debug!(path = %p.display(), found, "checked screenshot candidate");
        found
    })
}

pub fn resolve_screenshot_dir() -> Option<PathBuf> {
    let Some(home) = dirs::home_dir() else {
        tracing::warn!("could not determine home directory");
        return None;
    };
    first_existing_dir(&home)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn candidates_keep_lookup_order() {
        let home = Path::new("/home/u");
        let all: Vec<PathBuf> = screenshot_candidates(home).collect();
        assert_eq!(all.len(), 4);
        assert_eq!(all[0], home.join("Pictures").join("Screenshots"));
        assert_eq!(all[3], home.join("画像").join("スクリーンショット"));
    }

    #[test]
    fn returns_none_when_nothing_exists() {
        let home = tempfile::tempdir().unwrap();
        assert_eq!(first_existing_dir(home.path()), None);
    }

    #[test]
    fn earlier_candidate_wins() {
        let home = tempfile::tempdir().unwrap();
        let onedrive = home.path().join("OneDrive").join("Pictures").join("Screenshots");
        let pictures = home.path().join("Pictures").join("Screenshots");
        fs::create_dir_all(&onedrive).unwrap();
        assert_eq!(first_existing_dir(home.path()), Some(onedrive));

        fs::create_dir_all(&pictures).unwrap();
        assert_eq!(first_existing_dir(home.path()), Some(pictures));
    }

    #[test]
    fn plain_file_is_not_a_match() {
        let home = tempfile::tempdir().unwrap();
        fs::create_dir_all(home.path().join("Pictures")).unwrap();
        fs::write(home.path().join("Pictures").join("Screenshots"), b"x").unwrap();
        assert_eq!(first_existing_dir(home.path()), None);
    }
}
