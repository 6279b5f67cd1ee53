//! RON persistence for the job-request form.
//!
//! Loading is permissive: a missing, unreadable, or corrupt state file
//! degrades to the default form rather than failing startup.

use std::fs;
use std::io;
use std::path::Path;

use client_logging::{client_info, client_warn};
use insight_core::JobRequest;
use serde::{Deserialize, Serialize};

const STATE_FILENAME: &str = ".insight_state.ron";

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("serialize job request: {0}")]
    Serialize(#[from] ron::Error),
    #[error("write state file: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedRequest {
    subjects: Vec<String>,
    sources: Vec<String>,
    limit: u32,
    window: String,
    use_ai: bool,
}

pub fn load_job_request(dir: &Path) -> JobRequest {
    let path = dir.join(STATE_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return JobRequest::default(),
        Err(err) => {
            client_warn!("failed to read saved form from {:?}: {}", path, err);
            return JobRequest::default();
        }
    };

    match ron::from_str::<PersistedRequest>(&content) {
        Ok(saved) => {
            client_info!("restored job request from {:?}", path);
            JobRequest {
                subjects: saved.subjects,
                sources: saved.sources,
                limit: saved.limit,
                window: saved.window,
                use_ai: saved.use_ai,
            }
        }
        Err(err) => {
            client_warn!("failed to parse saved form from {:?}: {}", path, err);
            JobRequest::default()
        }
    }
}

pub fn save_job_request(dir: &Path, request: &JobRequest) -> Result<(), PersistError> {
    let state = PersistedRequest {
        subjects: request.subjects.clone(),
        sources: request.sources.clone(),
        limit: request.limit,
        window: request.window.clone(),
        use_ai: request.use_ai,
    };
    let content = ron::ser::to_string_pretty(&state, ron::ser::PrettyConfig::new())?;

    // Write-then-rename keeps a crash from leaving a half-written file.
    let path = dir.join(STATE_FILENAME);
    let staging = dir.join(format!("{STATE_FILENAME}.tmp"));
    fs::write(&staging, content)?;
    fs::rename(&staging, &path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_the_form() {
        let dir = tempfile::tempdir().expect("tempdir");
        let request = JobRequest {
            subjects: vec!["widget".to_string(), "gadget".to_string()],
            sources: vec!["widgets".to_string()],
            limit: 120,
            window: "month".to_string(),
            use_ai: true,
        };
        save_job_request(dir.path(), &request).expect("save");
        assert_eq!(load_job_request(dir.path()), request);
    }

    #[test]
    fn missing_file_degrades_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert_eq!(load_job_request(dir.path()), JobRequest::default());
    }

    #[test]
    fn corrupt_file_degrades_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join(STATE_FILENAME), "not ron at all {{{").expect("write");
        assert_eq!(load_job_request(dir.path()), JobRequest::default());
    }
}
