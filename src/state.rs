use {
    chrono::{DateTime, Local},
    std::{
        fs, io,
        path::{Path, PathBuf},
    },
    thiserror::Error,
};

const LOGS_DIR_NAME: &str = "logs";
const FIRST_RUN_MARKER: &str = "firststart";
const LOG_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

#[derive(Debug, Error)]
pub enum StateError {
    #[error("Could not create directory {}", .0.display())]
    CreateDirectory(PathBuf, #[source] io::Error),
    #[error("Could not write first-run marker {}", .0.display())]
    WriteMarker(PathBuf, #[source] io::Error),
}

/// The per-user directory holding logs and the first-run marker.
#[derive(Debug, Clone)]
pub struct StateDirectory {
    root: PathBuf,
    logs: PathBuf,
}

impl StateDirectory {
    pub fn new(root: PathBuf) -> Self {
        let logs = root.join(LOGS_DIR_NAME);
        Self { root, logs }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn logs(&self) -> &Path {
        &self.logs
    }

    pub fn ensure_directories(&self) -> Result<(), StateError> {
        for dir in [&self.root, &self.logs] {
            if dir.is_dir() {
                continue;
            }
            fs::create_dir_all(dir).map_err(|e| StateError::CreateDirectory(dir.clone(), e))?;
            log::debug!("Created {}", dir.display());
        }
        Ok(())
    }

    /// Returns `true` the first time it is called for this directory and creates the
    /// marker so that every later call returns `false`.
    pub fn is_first_launch(&self) -> Result<bool, StateError> {
        let marker = self.root.join(FIRST_RUN_MARKER);
        if marker.exists() {
            return Ok(false);
        }
        fs::write(&marker, "false").map_err(|e| StateError::WriteMarker(marker.clone(), e))?;
        log::info!("First launch, created {}", marker.display());
        Ok(true)
    }

    pub fn log_file_path(&self, now: DateTime<Local>) -> PathBuf {
        let name = format!("launcher_log_{}.log", now.format(LOG_TIMESTAMP_FORMAT));
        self.logs.join(name)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        chrono::TimeZone,
        tempfile::TempDir,
    };

    fn state(dir: &TempDir) -> StateDirectory {
        StateDirectory::new(dir.path().join(".amcl"))
    }

    #[test]
    fn ensure_directories_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir);
        state.ensure_directories().unwrap();
        assert!(state.root().is_dir());
        assert!(state.logs().is_dir());
        assert_eq!(state.logs(), state.root().join("logs"));

        fs::write(state.logs().join("keep.log"), "x").unwrap();
        state.ensure_directories().unwrap();
        assert!(state.logs().join("keep.log").is_file());
    }

    #[test]
    fn ensure_directories_fails_when_root_is_a_file() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir);
        fs::write(state.root(), "not a directory").unwrap();
        let err = state.ensure_directories().unwrap_err();
        assert!(matches!(err, StateError::CreateDirectory(..)));
    }

    #[test]
    fn first_launch_is_reported_exactly_once() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir);
        state.ensure_directories().unwrap();

        assert!(state.is_first_launch().unwrap());
        assert!(state.root().join(FIRST_RUN_MARKER).is_file());
        for _ in 0..3 {
            assert!(!state.is_first_launch().unwrap());
        }
    }

    #[test]
    fn existing_marker_means_not_first_launch() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir);
        state.ensure_directories().unwrap();
        fs::write(state.root().join(FIRST_RUN_MARKER), "").unwrap();
        assert!(!state.is_first_launch().unwrap());
    }

    #[test]
    fn log_file_name_uses_second_resolution_timestamp() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir);
        let now = Local.with_ymd_and_hms(2024, 3, 7, 9, 5, 2).unwrap();
        assert_eq!(
            state.log_file_path(now),
            state.logs().join("launcher_log_20240307090502.log")
        );
    }
}
