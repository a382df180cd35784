//! Document-to-audio pipeline: extraction, normalization, chunking,
//! sequential synthesis and a single output write.

use crate::document::{self, DocumentKind};
use crate::error::PipelineError;
use crate::output::{self, AUDIO_EXTENSION};
use crate::text::{self, TextChunk};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use tts_client::{SpeechProvider, SpeechRequest, VoiceParams};

/// Settings for one run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Directory the audio file is written to
    pub output_dir: PathBuf,
    /// Chunk ceiling in UTF-8 bytes
    pub max_chunk_bytes: usize,
    /// Voice used for every chunk
    pub voice: VoiceParams,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("audio_files"),
            max_chunk_bytes: text::DEFAULT_MAX_CHUNK_BYTES,
            voice: VoiceParams::default(),
        }
    }
}

/// A validated document, chunked and with its output path reserved.
#[derive(Debug)]
pub struct PreparedRun {
    pub source: PathBuf,
    pub title: Option<String>,
    pub chunks: Vec<TextChunk>,
    pub output_path: PathBuf,
}

impl PreparedRun {
    pub fn total_bytes(&self) -> usize {
        self.chunks.iter().map(|c| c.text.len()).sum()
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub output_path: PathBuf,
    pub chunk_count: usize,
    pub audio_bytes: usize,
}

/// Convert `source` into an audio file.
///
/// `connect` is only called once the document has been extracted and
/// chunked, and the provider it returns serves every chunk of the run.
pub async fn run<F>(
    source: &Path,
    options: &RunOptions,
    connect: F,
) -> Result<RunReport, PipelineError>
where
    F: FnOnce() -> tts_client::Result<Box<dyn SpeechProvider>>,
{
    let prepared = prepare(source, options)?;
    let provider = connect()?;
    log::debug!("Using provider: {}", provider.name());
    synthesize(&prepared, &options.voice, provider.as_ref()).await
}

/// Everything up to synthesis: validate, extract, normalize, pick the
/// output name and split into chunks.
pub fn prepare(source: &Path, options: &RunOptions) -> Result<PreparedRun, PipelineError> {
    if !source.exists() {
        return Err(PipelineError::NotFound(source.to_path_buf()));
    }

    let kind = DocumentKind::from_path(source);
    if let DocumentKind::Unsupported(ext) = &kind {
        return Err(PipelineError::UnsupportedFormat(ext.clone()));
    }

    log::info!("Extracting text from {}", source.display());
    let extracted = document::extract(source, &kind)?;

    if let Some(title) = &extracted.title {
        log::info!(
            "Book: \"{}\" by {}",
            title,
            extracted.author.as_deref().unwrap_or("Unknown")
        );
    }
    log::info!(
        "Sections: {}, Words: ~{}",
        extracted.sections.len(),
        extracted.total_words()
    );

    let normalized = text::normalize(&extracted.raw_text());

    if output::ensure_output_dir(&options.output_dir)? {
        log::info!(
            "Directory '{}' created to store audio files.",
            options.output_dir.display()
        );
    }

    let filename = format!("{}.{}", output::output_stem(source), AUDIO_EXTENSION);
    let filename = output::unique_filename(&options.output_dir, &filename);
    let output_path = options.output_dir.join(filename);

    let chunks = text::chunk_document(&normalized, options.max_chunk_bytes);
    if chunks.is_empty() {
        return Err(PipelineError::NoText(source.to_path_buf()));
    }

    log::info!(
        "Splitting text into {} chunks for TTS processing.",
        chunks.len()
    );

    Ok(PreparedRun {
        source: source.to_path_buf(),
        title: extracted.title,
        chunks,
        output_path,
    })
}

/// Synthesize every chunk in order and write the concatenated audio.
///
/// The first failing chunk aborts the run and nothing is written.
pub async fn synthesize(
    prepared: &PreparedRun,
    voice: &VoiceParams,
    provider: &dyn SpeechProvider,
) -> Result<RunReport, PipelineError> {
    let total = prepared.chunks.len();
    let oversized = prepared
        .chunks
        .iter()
        .filter(|c| c.text.len() > provider.max_input_bytes())
        .count();
    if oversized > 0 {
        log::warn!(
            "{} chunk(s) exceed the {} byte limit of {}",
            oversized,
            provider.max_input_bytes(),
            provider.name()
        );
    }

    let pb = chunk_progress(total);
    let mut audio = Vec::new();

    for chunk in &prepared.chunks {
        log::debug!("Processing chunk {}/{}", chunk.index, total);

        let request = SpeechRequest {
            text: chunk.text.clone(),
            voice: voice.clone(),
        };

        let response = match provider.synthesize(&request).await {
            Ok(response) => response,
            Err(source) => {
                pb.abandon();
                return Err(PipelineError::SynthesisFailure {
                    chunk: chunk.index,
                    total,
                    source,
                });
            }
        };

        audio.extend_from_slice(&response.audio_content);
        pb.inc(1);
    }

    pb.finish_with_message("Synthesis complete");

    fs::write(&prepared.output_path, &audio)?;
    log::info!(
        "Audio content written to file {}",
        prepared.output_path.display()
    );

    Ok(RunReport {
        output_path: prepared.output_path.clone(),
        chunk_count: total,
        audio_bytes: audio.len(),
    })
}

fn chunk_progress(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} chunks ({eta}) {msg}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}
