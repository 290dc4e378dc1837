//! Relevance report artifact: ranked sections and subsections plus run metadata.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Metadata describing one relevance run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// File names of the documents named by the job spec
    pub input_documents: Vec<String>,

    /// Persona role the ranking was performed for
    pub persona: String,

    /// The persona's stated task
    pub job_to_be_done: String,

    /// ISO-8601 UTC timestamp of the run
    pub processing_timestamp: String,
}

impl ReportMetadata {
    /// Create metadata stamped with the current UTC time.
    pub fn new(
        input_documents: Vec<String>,
        persona: impl Into<String>,
        job_to_be_done: impl Into<String>,
    ) -> Self {
        Self::at(input_documents, persona, job_to_be_done, Utc::now())
    }

    /// Create metadata with an explicit timestamp, for deterministic tests.
    pub fn at(
        input_documents: Vec<String>,
        persona: impl Into<String>,
        job_to_be_done: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            input_documents,
            persona: persona.into(),
            job_to_be_done: job_to_be_done.into(),
            processing_timestamp: timestamp.to_rfc3339_opts(SecondsFormat::Micros, true),
        }
    }
}

/// A ranked whole-page section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedSection {
    /// Source document name
    pub document: String,

    /// Page number (1-indexed)
    pub page_number: u32,

    /// Synthesized section title
    pub section_title: String,

    /// 1-based rank, most relevant first
    pub importance_rank: u32,
}

/// A ranked sliding-window subsection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedSubsection {
    /// Source document name
    pub document: String,

    /// The chunk's cleaned text
    pub refined_text: String,

    /// Page number (1-indexed)
    pub page_number: u32,
}

/// The relevance artifact produced for one job run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelevanceReport {
    /// Run metadata
    pub metadata: ReportMetadata,

    /// Top-ranked whole-page sections
    pub extracted_sections: Vec<RankedSection>,

    /// Top-ranked sliding-window subsections
    pub subsection_analysis: Vec<RankedSubsection>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_metadata_timestamp_format() {
        let ts = Utc.with_ymd_and_hms(2025, 7, 1, 12, 30, 45).unwrap();
        let meta = ReportMetadata::at(vec!["a.pdf".into()], "Student", "Plan a trip", ts);
        assert_eq!(meta.processing_timestamp, "2025-07-01T12:30:45.000000Z");
    }

    #[test]
    fn test_report_json_shape() {
        let report = RelevanceReport {
            metadata: ReportMetadata::new(vec!["a.pdf".into()], "Planner", "Organize"),
            extracted_sections: vec![RankedSection {
                document: "a.pdf".into(),
                page_number: 3,
                section_title: "Relevant Content from Page 3".into(),
                importance_rank: 1,
            }],
            subsection_analysis: vec![RankedSubsection {
                document: "a.pdf".into(),
                refined_text: "some text".into(),
                page_number: 3,
            }],
        };

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"extracted_sections\""));
        assert!(json.contains("\"subsection_analysis\""));
        assert!(json.contains("\"importance_rank\":1"));
        assert!(json.contains("\"refined_text\""));
    }
}
