// src/fs/detection.rs
//! File categorization for the browser: magic-number sniffing first,
//! extension-based guess when the content is inconclusive.

use std::path::Path;

use anyhow::Result;
use infer::{Infer, MatcherType};
use mime_guess::MimeGuess;

/// What the browser needs to know about a file: playable audio, or
/// which icon to show otherwise.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FileCategory {
    Audio,
    Image,
    Video,
    Document,
    Other,
}

/// Categorize `path` by content, falling back to its extension.
pub fn detect_category(path: &Path) -> Result<FileCategory> {
    if let Some(kind) = Infer::new().get_from_path(path)? {
        return Ok(match kind.matcher_type() {
            MatcherType::Audio => FileCategory::Audio,
            MatcherType::Image => FileCategory::Image,
            MatcherType::Video => FileCategory::Video,
            MatcherType::Doc | MatcherType::Text => FileCategory::Document,
            _ => FileCategory::Other,
        });
    }
    Ok(extension_category(path))
}

fn extension_category(path: &Path) -> FileCategory {
    let mime = MimeGuess::from_path(path).first_or_octet_stream();
    match mime.type_().as_str() {
        "audio" => FileCategory::Audio,
        "image" => FileCategory::Image,
        "video" => FileCategory::Video,
        "text" | "application" => FileCategory::Document,
        _ => FileCategory::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_fallback_spots_audio() {
        assert_eq!(extension_category(Path::new("song.mp3")), FileCategory::Audio);
        assert_eq!(extension_category(Path::new("song.flac")), FileCategory::Audio);
    }

    #[test]
    fn unknown_extensions_read_as_documents() {
        // first_or_octet_stream gives application/octet-stream.
        assert_eq!(
            extension_category(Path::new("mystery.zzz")),
            FileCategory::Document
        );
    }
}
