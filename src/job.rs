//! Relevance job specification.
//!
//! A job names a persona, the task they are trying to accomplish, and the
//! set of documents to rank, resolved relative to a `PDFs` subfolder next
//! to the spec file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The persona the ranking is performed for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persona {
    /// Persona role, e.g. "Travel Planner"
    pub role: String,
}

/// The persona's task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobToBeDone {
    /// Task description
    pub task: String,
}

/// One input document named by the job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobDocument {
    /// File name relative to the job's `PDFs` folder
    pub filename: String,

    /// Optional human-readable title (unused by the engine)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// A parsed relevance job specification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSpec {
    /// The persona
    pub persona: Persona,

    /// The task
    pub job_to_be_done: JobToBeDone,

    /// Documents to rank
    pub documents: Vec<JobDocument>,
}

impl JobSpec {
    /// Load a job spec from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    /// Parse a job spec from a JSON string.
    pub fn from_json(data: &str) -> Result<Self> {
        let spec: JobSpec =
            serde_json::from_str(data).map_err(|e| Error::InvalidJobSpec(e.to_string()))?;
        if spec.documents.is_empty() {
            return Err(Error::InvalidJobSpec("no documents listed".to_string()));
        }
        Ok(spec)
    }

    /// File names of all documents in the job.
    pub fn filenames(&self) -> Vec<String> {
        self.documents.iter().map(|d| d.filename.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPEC: &str = r#"{
        "persona": {"role": "Travel Planner"},
        "job_to_be_done": {"task": "Plan a 4-day trip for college friends"},
        "documents": [
            {"filename": "south-of-france.pdf", "title": "South of France"},
            {"filename": "cities.pdf"}
        ]
    }"#;

    #[test]
    fn test_parse_job_spec() {
        let spec = JobSpec::from_json(SPEC).unwrap();
        assert_eq!(spec.persona.role, "Travel Planner");
        assert_eq!(spec.job_to_be_done.task, "Plan a 4-day trip for college friends");
        assert_eq!(
            spec.filenames(),
            vec!["south-of-france.pdf", "cities.pdf"]
        );
    }

    #[test]
    fn test_empty_documents_rejected() {
        let json = r#"{"persona":{"role":"r"},"job_to_be_done":{"task":"t"},"documents":[]}"#;
        assert!(matches!(
            JobSpec::from_json(json),
            Err(Error::InvalidJobSpec(_))
        ));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(
            JobSpec::from_json("{not json"),
            Err(Error::InvalidJobSpec(_))
        ));
    }
}
