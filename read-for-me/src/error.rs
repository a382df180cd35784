use std::path::PathBuf;
use thiserror::Error;
use tts_client::TtsError;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("File '{}' does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("Unsupported file format '{0}'. Please provide a PDF or EPUB file.")]
    UnsupportedFormat(String),

    #[error("Error reading {}: {message}", path.display())]
    ExtractionFailure { path: PathBuf, message: String },

    #[error("No readable text found in {}", .0.display())]
    NoText(PathBuf),

    #[error("Speech synthesis failed on chunk {chunk}/{total}: {source}")]
    SynthesisFailure {
        chunk: usize,
        total: usize,
        #[source]
        source: TtsError,
    },

    #[error("Failed to set up TTS provider: {0}")]
    Provider(#[from] TtsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    pub(crate) fn extraction(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::ExtractionFailure {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
