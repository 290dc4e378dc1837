//! Batch processing: directory-level outline extraction and relevance
//! job runs.
//!
//! No error is allowed past an individual document's boundary: a document
//! that fails to parse is logged and skipped, and the rest of the batch
//! proceeds. Documents carry no shared mutable state, so the batch runs
//! them in parallel with rayon.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::analysis::{extract_outline, OutlineConfig};
use crate::error::{Error, Result};
use crate::job::JobSpec;
use crate::layout::{LayoutProvider, LopdfProvider};
use crate::model::{
    Document, RankedSection, RankedSubsection, RelevanceReport, ReportMetadata, TextChunk,
};
use crate::relevance::{build_query, chunk_document, rank, ChunkConfig, Encoder, RankerConfig};

/// Extract the outline of a single PDF file.
pub fn outline_file<P: AsRef<Path>>(path: P, config: &OutlineConfig) -> Result<crate::model::OutlineDocument> {
    let provider = LopdfProvider::open(path)?;
    let doc = provider.document()?;
    Ok(extract_outline(&doc, config))
}

/// Process every `*.pdf` in `input_dir`, writing `<stem>.json` outline
/// files to `output_dir`.
///
/// Documents are processed in parallel. Per-document failures are logged
/// and skipped; the return value is the number of documents successfully
/// written.
pub fn outline_directory(
    input_dir: &Path,
    output_dir: &Path,
    config: &OutlineConfig,
) -> Result<usize> {
    fs::create_dir_all(output_dir)?;

    let mut pdf_paths: Vec<PathBuf> = fs::read_dir(input_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("pdf"))
                .unwrap_or(false)
        })
        .collect();
    pdf_paths.sort();

    let written = pdf_paths
        .par_iter()
        .filter(|path| match outline_to_file(path, output_dir, config) {
            Ok(()) => true,
            Err(e) => {
                log::error!("failed to process {}: {e}", path.display());
                false
            }
        })
        .count();

    Ok(written)
}

fn outline_to_file(path: &Path, output_dir: &Path, config: &OutlineConfig) -> Result<()> {
    let outline = outline_file(path, config)?;

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "output".to_string());
    let out_path = output_dir.join(format!("{stem}.json"));

    let json = serde_json::to_string_pretty(&outline)?;
    fs::write(&out_path, json)?;
    log::info!("wrote {}", out_path.display());
    Ok(())
}

/// Run a relevance job against already-extracted documents.
///
/// This is the in-memory core of [`run_relevance_job`], separated so that
/// tests and embedders can rank documents from any layout source.
pub fn relevance_report(
    documents: &[Document],
    persona: &str,
    task: &str,
    input_names: Vec<String>,
    encoder: &dyn Encoder,
    chunk_config: &ChunkConfig,
    ranker_config: &RankerConfig,
) -> Result<RelevanceReport> {
    let mut sections: Vec<TextChunk> = Vec::new();
    let mut subsections: Vec<TextChunk> = Vec::new();
    for doc in documents {
        let (mut s, mut w) = chunk_document(doc, chunk_config);
        sections.append(&mut s);
        subsections.append(&mut w);
    }

    if subsections.is_empty() {
        return Err(Error::NoExtractableChunks);
    }

    let query = build_query(persona, task, &ranker_config.keywords);
    log::debug!("relevance query: {query}");

    let ranked_sections = rank(&query, &sections, encoder, ranker_config)?;
    let ranked_subsections = rank(&query, &subsections, encoder, ranker_config)?;

    let extracted_sections = ranked_sections
        .into_iter()
        .take(ranker_config.top_sections)
        .enumerate()
        .map(|(i, sc)| RankedSection {
            document: sc.chunk.document,
            page_number: sc.chunk.page_number,
            section_title: format!("Relevant Content from Page {}", sc.chunk.page_number),
            importance_rank: (i + 1) as u32,
        })
        .collect();

    let subsection_analysis = ranked_subsections
        .into_iter()
        .take(ranker_config.top_subsections)
        .map(|sc| RankedSubsection {
            document: sc.chunk.document,
            refined_text: sc.chunk.text,
            page_number: sc.chunk.page_number,
        })
        .collect();

    Ok(RelevanceReport {
        metadata: ReportMetadata::new(input_names, persona, task),
        extracted_sections,
        subsection_analysis,
    })
}

/// Run a relevance job from a spec file.
///
/// Documents are resolved against the `PDFs` subfolder of the spec's
/// directory. Missing files are skipped with a warning; a document that
/// fails to parse is logged and skipped. The run fails only when no
/// subsection chunk could be extracted from any document.
pub fn run_relevance_job<P: AsRef<Path>>(
    spec_path: P,
    encoder: &dyn Encoder,
    chunk_config: &ChunkConfig,
    ranker_config: &RankerConfig,
) -> Result<RelevanceReport> {
    let spec_path = spec_path.as_ref();
    let spec = JobSpec::load(spec_path)?;
    let pdf_dir = spec_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join("PDFs");

    let documents: Vec<Document> = spec
        .documents
        .iter()
        .filter_map(|doc| {
            let path = pdf_dir.join(&doc.filename);
            if !path.exists() {
                log::warn!("skipping missing input {}", path.display());
                return None;
            }
            match LopdfProvider::open(&path).and_then(|p| p.document()) {
                Ok(doc) => Some(doc),
                Err(e) => {
                    log::error!("failed to extract {}: {e}", path.display());
                    None
                }
            }
        })
        .collect();

    relevance_report(
        &documents,
        &spec.persona.role,
        &spec.job_to_be_done.task,
        spec.filenames(),
        encoder,
        chunk_config,
        ranker_config,
    )
}
