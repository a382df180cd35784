//! Output location: directory creation and collision-free file names.

use std::fs;
use std::io;
use std::path::Path;

/// Extension of the generated audio files
pub const AUDIO_EXTENSION: &str = "mp3";

/// Create `dir` (and parents) if missing. Returns true when it was created.
pub fn ensure_output_dir(dir: &Path) -> io::Result<bool> {
    if dir.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(dir)?;
    Ok(true)
}

/// Base name for the audio file of `source`.
///
/// Spaces become underscores and everything from the first `.` on is
/// dropped, so `"My Book.v2.pdf"` gives `"My_Book"`.
pub fn output_stem(source: &Path) -> String {
    let name = source
        .file_name()
        .map(|n| n.to_string_lossy().replace(' ', "_"))
        .unwrap_or_default();

    let stem = name.split('.').next().unwrap_or_default();
    if stem.is_empty() {
        "output".to_string()
    } else {
        stem.to_string()
    }
}

/// Return `filename` if nothing in `dir` has that name, otherwise the first
/// free `<base>_<n><ext>` for n = 1, 2, ...
pub fn unique_filename(dir: &Path, filename: &str) -> String {
    let (base, extension) = split_extension(filename);
    let mut candidate = filename.to_string();
    let mut counter = 1;

    while dir.join(&candidate).exists() {
        candidate = format!("{}_{}{}", base, counter, extension);
        counter += 1;
    }

    candidate
}

/// Split at the last `.`, keeping the dot with the extension.
fn split_extension(filename: &str) -> (&str, &str) {
    match filename.rfind('.') {
        Some(pos) if pos > 0 => filename.split_at(pos),
        _ => (filename, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_unique_filename_when_free() {
        let dir = TempDir::new().unwrap();
        assert_eq!(unique_filename(dir.path(), "book.mp3"), "book.mp3");
    }

    #[test]
    fn test_unique_filename_skips_existing() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("book.mp3"), b"").unwrap();
        fs::write(dir.path().join("book_1.mp3"), b"").unwrap();
        assert_eq!(unique_filename(dir.path(), "book.mp3"), "book_2.mp3");
    }

    #[test]
    fn test_unique_filename_fills_first_gap() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("book.mp3"), b"").unwrap();
        fs::write(dir.path().join("book_2.mp3"), b"").unwrap();
        assert_eq!(unique_filename(dir.path(), "book.mp3"), "book_1.mp3");
    }

    #[test]
    fn test_unique_filename_without_extension() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("book"), b"").unwrap();
        assert_eq!(unique_filename(dir.path(), "book"), "book_1");
    }

    #[test]
    fn test_output_stem() {
        assert_eq!(output_stem(&PathBuf::from("./my_files/silent_reading.pdf")), "silent_reading");
        assert_eq!(output_stem(&PathBuf::from("My Great Book.epub")), "My_Great_Book");
        assert_eq!(output_stem(&PathBuf::from("vol.2.final.pdf")), "vol");
    }

    #[test]
    fn test_output_stem_of_hidden_file() {
        assert_eq!(output_stem(&PathBuf::from(".pdf")), "output");
    }

    #[test]
    fn test_ensure_output_dir() {
        let dir = TempDir::new().unwrap();
        let audio_dir = dir.path().join("audio_files").join("nested");

        assert!(ensure_output_dir(&audio_dir).unwrap());
        assert!(audio_dir.is_dir());
        assert!(!ensure_output_dir(&audio_dir).unwrap());
    }
}
