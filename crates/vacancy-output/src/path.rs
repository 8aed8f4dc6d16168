use std::path::{Path, PathBuf};

/// File name used next to the executable.
pub const PREFERRED_FILE_NAME: &str = "scraped_data.csv";

/// File name used in the documents directory when the preferred spot is read-only.
pub const FALLBACK_FILE_NAME: &str = "vacancymail_scraped_data.csv";

/// Candidate destinations for the CSV output, in order of preference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLocations {
    pub preferred: PathBuf,
    pub fallback: PathBuf,
}

impl OutputLocations {
    /// Next to the running executable, falling back to the user's documents directory.
    pub fn standard() -> Self {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."));

        let documents = dirs::document_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join("Documents")))
            .unwrap_or_else(|| PathBuf::from("."));

        Self {
            preferred: exe_dir.join(PREFERRED_FILE_NAME),
            fallback: documents.join(FALLBACK_FILE_NAME),
        }
    }

    /// Pick the preferred path if its directory accepts new files.
    pub fn resolve(&self) -> PathBuf {
        let dir = parent_dir(&self.preferred);
        if is_writable_dir(dir) {
            self.preferred.clone()
        } else {
            tracing::debug!(
                dir = %dir.display(),
                fallback = %self.fallback.display(),
                "Preferred output directory is not writable"
            );
            self.fallback.clone()
        }
    }
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Probe by creating (and immediately dropping) an anonymous file in `dir`.
pub fn is_writable_dir(dir: &Path) -> bool {
    tempfile::tempfile_in(dir).is_ok()
}
