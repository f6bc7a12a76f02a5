//! Filesystem report persistence.
//!
//! [`ReportStore`] keeps one pretty-printed JSON file per report,
//! `<directory>/<report_id>.json`. It sits outside the analysis pipeline:
//! [`ReportBuilder`](crate::ReportBuilder) never writes anything itself.
//!
//! # Example
//!
//! ```no_run
//! use motion_report::{ReportBuilder, ReportStore};
//!
//! let store = ReportStore::new("reports");
//! let report = ReportBuilder::default().analyze("match.mp4")?;
//! store.save(&report)?;
//!
//! let again = store.load(report.report_id())?;
//! assert_eq!(again, report);
//! # Ok::<(), motion_report::MotionError>(())
//! ```

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{error::MotionError, report::AnalysisReport};

/// A directory of JSON reports keyed by report identifier.
#[derive(Debug, Clone)]
pub struct ReportStore {
    directory: PathBuf,
}

impl ReportStore {
    /// Use `directory` for reports. It is created on the first save.
    pub fn new<P: AsRef<Path>>(directory: P) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
        }
    }

    /// Directory the store writes to.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path a report with this identifier is stored at.
    ///
    /// Returns `None` for identifiers that would escape the directory.
    pub fn path_for(&self, report_id: &str) -> Option<PathBuf> {
        let valid = !report_id.is_empty()
            && report_id != "."
            && report_id != ".."
            && !report_id.contains(['/', '\\', '\0']);
        valid.then(|| self.directory.join(format!("{report_id}.json")))
    }

    /// Write `report` as indented UTF-8 JSON, replacing any previous copy.
    ///
    /// Returns the path written.
    pub fn save(&self, report: &AnalysisReport) -> Result<PathBuf, MotionError> {
        let path = self
            .path_for(report.report_id())
            .ok_or_else(|| MotionError::MalformedReport {
                report_id: report.report_id().to_string(),
                reason: "identifier is not a valid file name".to_string(),
            })?;

        fs::create_dir_all(&self.directory)?;
        fs::write(&path, report.to_json_pretty()?)?;
        log::debug!("Saved report {} to {}", report.report_id(), path.display());
        Ok(path)
    }

    /// Load a previously saved report.
    ///
    /// # Errors
    ///
    /// [`MotionError::ReportNotFound`] when no file exists for the identifier
    /// (or the identifier is not a valid file name), and
    /// [`MotionError::MalformedReport`] when the file exists but does not
    /// parse as a report.
    pub fn load(&self, report_id: &str) -> Result<AnalysisReport, MotionError> {
        let not_found = || MotionError::ReportNotFound {
            report_id: report_id.to_string(),
        };
        let path = self.path_for(report_id).ok_or_else(not_found)?;

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == ErrorKind::NotFound => return Err(not_found()),
            Err(error) if error.kind() == ErrorKind::InvalidData => {
                return Err(MotionError::MalformedReport {
                    report_id: report_id.to_string(),
                    reason: error.to_string(),
                });
            }
            Err(error) => return Err(error.into()),
        };

        serde_json::from_str(&contents).map_err(|error| MotionError::MalformedReport {
            report_id: report_id.to_string(),
            reason: error.to_string(),
        })
    }

    /// Whether a report file exists for the identifier.
    pub fn contains(&self, report_id: &str) -> bool {
        self.path_for(report_id).is_some_and(|path| path.is_file())
    }
}
