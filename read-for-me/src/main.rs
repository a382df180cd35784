//! read-for-me - Convert PDF and EPUB files to MP3 audio using cloud text-to-speech

mod config;
mod document;
mod error;
mod output;
mod pipeline;
mod text;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::ReadForMeConfig;
use pipeline::RunOptions;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "read-for-me")]
#[command(about = "Convert PDF and EPUB files to MP3 audio using cloud text-to-speech", long_about = None)]
#[command(version)]
struct Args {
    /// Path to the PDF or EPUB file
    file: Option<PathBuf>,

    /// Voice gender: male, female or neutral (unknown values use male)
    #[arg(short, long)]
    gender: Option<String>,

    /// Speaking rate multiplier (0.25-4.0, default 1.0)
    #[arg(short, long)]
    speed: Option<f32>,

    /// Pitch offset in semitones (-20.0-20.0, default 0.0)
    #[arg(short, long, allow_negative_numbers = true)]
    pitch: Option<f32>,

    /// Voice language code (default en-US)
    #[arg(long)]
    language: Option<String>,

    /// Directory for the generated audio (default: audio_files)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Maximum chunk size in bytes sent per request (default 4500)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    chunk_size: Option<u32>,

    /// Extract and chunk the document without calling the TTS provider
    #[arg(long)]
    dry_run: bool,

    /// Enable debug output
    #[arg(short, long, default_value_t = false)]
    debug: bool,

    /// Subcommands
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set default voice gender
    SetGender {
        /// male, female or neutral
        gender: String,
    },
    /// Set default speaking rate
    SetSpeed {
        /// Value (0.25-4.0)
        value: f32,
    },
    /// Set default pitch
    SetPitch {
        /// Value in semitones (-20.0-20.0)
        #[arg(allow_negative_numbers = true)]
        value: f32,
    },
    /// Set default output directory
    SetOutputDir {
        /// Directory path
        path: PathBuf,
    },
    /// Set default maximum chunk size in bytes
    SetChunkSize {
        /// Bytes per request
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        value: u32,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.debug);

    // Credentials may live in a .env file next to the working directory
    if let Ok(path) = dotenvy::dotenv() {
        log::debug!("Loaded environment from {}", path.display());
    }

    if let Some(Commands::Config { action }) = &args.command {
        return handle_config_command(action);
    }

    let source = args
        .file
        .clone()
        .ok_or_else(|| anyhow::anyhow!("File path is required. Run 'read-for-me --help' for usage."))?;

    let config = ReadForMeConfig::load().context("Failed to load configuration")?;
    let options = build_run_options(&args, &config);

    log::debug!("Source: {}", source.display());
    log::debug!("Output dir: {}", options.output_dir.display());
    log::debug!("Voice: {:?}", options.voice);
    log::debug!("Chunk size: {} bytes", options.max_chunk_bytes);

    if args.dry_run {
        let prepared = pipeline::prepare(&source, &options)?;
        println!("Source: {}", prepared.source.display());
        if let Some(title) = &prepared.title {
            println!("Title: {}", title);
        }
        println!(
            "Chunks: {} ({} bytes total)",
            prepared.chunks.len(),
            prepared.total_bytes()
        );
        println!("Would write: {}", prepared.output_path.display());
        return Ok(());
    }

    let report = pipeline::run(&source, &options, || {
        tts_client::create_provider(&config.provider)
    })
    .await?;

    let file_name = report
        .output_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let size_mb = report.audio_bytes as f64 / (1024.0 * 1024.0);
    log::info!(
        "Audio saved as {} in {} ({} chunks, {:.1} MB)",
        file_name,
        options.output_dir.display(),
        report.chunk_count,
        size_mb
    );

    Ok(())
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

/// Merge CLI arguments over the config file values.
fn build_run_options(args: &Args, config: &ReadForMeConfig) -> RunOptions {
    let mut effective = config.clone();

    if let Some(gender) = &args.gender {
        effective.gender = gender.clone();
    }
    if let Some(speed) = args.speed {
        effective.speed = speed;
    }
    if let Some(pitch) = args.pitch {
        effective.pitch = pitch;
    }
    if let Some(language) = &args.language {
        effective.language = language.clone();
    }
    if let Some(dir) = &args.output_dir {
        effective.output_dir = dir.clone();
    }
    if let Some(size) = args.chunk_size {
        effective.chunk_size = size as usize;
    }

    RunOptions {
        output_dir: effective.output_dir.clone(),
        max_chunk_bytes: effective.chunk_size,
        voice: effective.voice(),
    }
}

fn handle_config_command(action: &ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = ReadForMeConfig::load()?;
            println!("Configuration file: {:?}", ReadForMeConfig::config_path()?);
            println!();
            println!("gender = \"{}\"", config.gender);
            println!("speed = {}", config.speed);
            println!("pitch = {}", config.pitch);
            println!("language = \"{}\"", config.language);
            println!("output_dir = \"{}\"", config.output_dir.display());
            println!("chunk_size = {}", config.chunk_size);
            let credentials = if config.provider.api_key.is_some() {
                "api_key (stored in plaintext in this file)"
            } else if config.provider.access_token.is_some() {
                "access_token (stored in plaintext in this file)"
            } else {
                "(from environment)"
            };
            println!("provider credentials = {}", credentials);
            if let Some(path) = &config.provider.credentials_file {
                println!("provider credentials_file = \"{}\"", path.display());
            }
            if let Some(url) = &config.provider.base_url {
                println!("provider base_url = \"{}\"", url);
            }
        }
        ConfigAction::SetGender { gender } => {
            let mut config = ReadForMeConfig::load()?;
            config.gender = tts_client::VoiceGender::from_name(gender).as_str().to_string();
            config.save()?;
            println!("Default gender set to: {}", config.gender);
        }
        ConfigAction::SetSpeed { value } => {
            let mut config = ReadForMeConfig::load()?;
            config.speed = *value;
            config.save()?;
            println!("Default speed set to: {}", config.speed);
        }
        ConfigAction::SetPitch { value } => {
            let mut config = ReadForMeConfig::load()?;
            config.pitch = *value;
            config.save()?;
            println!("Default pitch set to: {}", config.pitch);
        }
        ConfigAction::SetOutputDir { path } => {
            let mut config = ReadForMeConfig::load()?;
            config.output_dir = path.clone();
            config.save()?;
            println!("Default output directory set to: {}", path.display());
        }
        ConfigAction::SetChunkSize { value } => {
            let mut config = ReadForMeConfig::load()?;
            config.chunk_size = *value as usize;
            config.save()?;
            println!("Default chunk size set to: {} bytes", config.chunk_size);
        }
    }
    Ok(())
}
