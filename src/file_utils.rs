use anyhow::{Context, Result, anyhow};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::language_utils::LanguageCode;

// @module: File utilities for lyrics input and output

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    // @generates: Output path for translated lyrics next to the input
    // @params: input_file, target_language
    pub fn generate_output_path<P: AsRef<Path>>(input_file: P, target_language: LanguageCode) -> PathBuf {
        let input_file = input_file.as_ref();
        let stem = input_file.file_stem().unwrap_or_default().to_string_lossy();
        let extension = input_file
            .extension()
            .map(|e| e.to_string_lossy().to_string())
            .unwrap_or_else(|| "txt".to_string());

        let output_filename = format!("{}.{}.{}", stem, target_language, extension);
        input_file.with_file_name(output_filename)
    }

    /// Read lyrics from a file, normalizing Windows line endings
    pub fn read_lyrics<P: AsRef<Path>>(path: P) -> Result<String> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))?;
        Ok(normalize_line_endings(&content))
    }

    /// Read lyrics from any reader (stdin for the CLI)
    pub fn read_lyrics_from<R: Read>(mut reader: R) -> Result<String> {
        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .context("Failed to read lyrics from input")?;
        Ok(normalize_line_endings(&content))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str, force_overwrite: bool) -> Result<()> {
        let path = path.as_ref();
        if path.exists() && !force_overwrite {
            return Err(anyhow!("Output file already exists: {:?}. Use -f to force overwrite.", path));
        }

        if let Some(parent) = path.parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(path, content).with_context(|| format!("Failed to write to file: {:?}", path))
    }
}

/// Convert CRLF and lone CR line endings to LF
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Lay out two texts in side-by-side columns
pub fn side_by_side(left: &str, right: &str, column_width: usize) -> String {
    let left_lines: Vec<&str> = left.lines().collect();
    let right_lines: Vec<&str> = right.lines().collect();
    let rows = left_lines.len().max(right_lines.len());

    let mut out = String::new();
    for i in 0..rows {
        let l = left_lines.get(i).copied().unwrap_or("");
        let r = right_lines.get(i).copied().unwrap_or("");
        let l: String = l.chars().take(column_width).collect();
        let padding = column_width.saturating_sub(l.chars().count());
        out.push_str(&l);
        out.push_str(&" ".repeat(padding));
        out.push_str(" | ");
        out.push_str(r);
        out.push('\n');
    }
    out
}
