use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use vacancy_model::{ListingRecord, COLUMNS};

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("permission denied for {}", .path.display())]
    Permission {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error saving file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl WriteError {
    /// Classify an I/O failure against the destination `path`.
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        if source.kind() == io::ErrorKind::PermissionDenied {
            Self::Permission { path, source }
        } else {
            Self::Io { path, source }
        }
    }

    fn from_csv(path: &Path, err: csv::Error) -> Self {
        match err.into_kind() {
            csv::ErrorKind::Io(source) => Self::from_io(path, source),
            kind => Self::from_io(path, io::Error::other(format!("{kind:?}"))),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Permission { path, .. } | Self::Io { path, .. } => path,
        }
    }
}

/// Write `records` as CSV to `path`, header first.
///
/// Rows are staged in a temporary file next to `path` and renamed into place
/// once complete, so a failed write leaves any existing file untouched.
/// Failures are logged at error level before being returned.
pub fn write_records(records: &[ListingRecord], path: &Path) -> Result<(), WriteError> {
    match write_staged(records, path) {
        Ok(()) => {
            tracing::info!(
                path = %path.display(),
                rows = records.len(),
                "Successfully saved {} jobs to {}",
                records.len(),
                path.display()
            );
            Ok(())
        }
        Err(err) => {
            match &err {
                WriteError::Permission { path, .. } => {
                    tracing::error!("Permission denied for {}", path.display());
                }
                WriteError::Io { source, .. } => {
                    tracing::error!(path = %path.display(), "Error saving file: {source}");
                }
            }
            Err(err)
        }
    }
}

fn write_staged(records: &[ListingRecord], path: &Path) -> Result<(), WriteError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir).map_err(|e| WriteError::from_io(path, e))?;

    {
        // Header is written by hand so an empty record set still gets one.
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(staged.as_file_mut());
        writer
            .write_record(COLUMNS)
            .map_err(|e| WriteError::from_csv(path, e))?;
        for record in records {
            writer
                .serialize(record)
                .map_err(|e| WriteError::from_csv(path, e))?;
        }
        writer.flush().map_err(|e| WriteError::from_io(path, e))?;
    }

    if let Some(permissions) = output_permissions(path) {
        staged
            .as_file()
            .set_permissions(permissions)
            .map_err(|e| WriteError::from_io(path, e))?;
    }
    staged
        .persist(path)
        .map_err(|e| WriteError::from_io(path, e.error))?;
    Ok(())
}

/// Keep the mode of the file being replaced; new files get the usual 0644.
fn output_permissions(path: &Path) -> Option<fs::Permissions> {
    match fs::metadata(path) {
        Ok(meta) => Some(meta.permissions()),
        Err(_) => default_permissions(),
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 1).unwrap()
    }

    fn sample() -> Vec<ListingRecord> {
        vec![
            ListingRecord {
                title: "Senior Accountant".into(),
                company: "Acme, Ltd".into(),
                location: "Harare".into(),
                expiry_date: "31 Dec 2024".into(),
                description: "Prepare \"monthly\" accounts".into(),
                scraped_date: date(),
            },
            ListingRecord::titled("Driver", date()),
        ]
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scraped_data.csv");
        let records = sample();

        write_records(&records, &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(headers, COLUMNS);

        let read: Vec<ListingRecord> = reader.deserialize().map(Result::unwrap).collect();
        assert_eq!(read, records);
    }

    #[test]
    fn test_raw_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        write_records(&sample()[1..], &path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Job Title,Company,Location,Expiry Date,Description,Scraped Date",
                "Driver,Not specified,Not specified,Not specified,No description,2024-12-01",
            ]
        );
    }

    #[test]
    fn test_empty_records_write_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");

        write_records(&[], &path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 1);
        assert!(contents.starts_with("Job Title,"));
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        fs::write(&path, "stale contents\nmore\nand more\n").unwrap();

        write_records(&sample(), &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(reader.records().count(), 2);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.csv");

        let err = write_records(&sample(), &path).unwrap_err();

        assert!(matches!(err, WriteError::Io { .. }));
        assert_eq!(err.path(), path.as_path());
        assert!(!path.exists());
    }

    #[test]
    fn test_permission_denied_is_classified() {
        let path = Path::new("/nowhere/out.csv");
        let err = WriteError::from_io(path, io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, WriteError::Permission { .. }));
        assert_eq!(err.to_string(), "permission denied for /nowhere/out.csv");

        let err = WriteError::from_io(path, io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, WriteError::Io { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_new_file_is_world_readable() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        write_records(&sample(), &path).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[cfg(unix)]
    #[test]
    fn test_replacing_keeps_existing_mode() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        fs::write(&path, "old\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();

        write_records(&sample(), &path).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o640);
    }

    #[cfg(unix)]
    #[test]
    fn test_read_only_directory_is_permission_error() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let locked = dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();

        // Privileged users bypass directory permissions.
        if tempfile::tempfile_in(&locked).is_ok() {
            return;
        }

        let path = locked.join("out.csv");
        let err = write_records(&sample(), &path).unwrap_err();

        assert!(matches!(err, WriteError::Permission { .. }));
        assert!(!path.exists());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
    }
}
