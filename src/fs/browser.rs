// src/fs/browser.rs
//! Directory listing for the file browser pane.

use std::fs;
use std::path::{Path, PathBuf};

use super::detection::{FileCategory, detect_category};

/// One row in the browser list.
#[derive(Debug, Clone)]
pub struct BrowserEntry {
    pub name: String,
    pub is_dir: bool,
    pub category: FileCategory,
}

impl BrowserEntry {
    /// Whether selecting this entry should start playback.
    pub fn is_audio(&self) -> bool {
        !self.is_dir && self.category == FileCategory::Audio
    }
}

/// Load the entries of `dir`: directories first, each group sorted
/// case-insensitively. Unreadable directories come back empty.
pub fn load_entries(dir: &Path) -> Vec<BrowserEntry> {
    let mut list: Vec<BrowserEntry> = fs::read_dir(dir)
        .map(|rd| {
            rd.filter_map(Result::ok)
                .map(|e| {
                    let name = e.file_name().to_string_lossy().into_owned();
                    let path = e.path();
                    if path.is_dir() {
                        BrowserEntry {
                            name,
                            is_dir: true,
                            category: FileCategory::Other,
                        }
                    } else {
                        let category =
                            detect_category(&path).unwrap_or(FileCategory::Other);
                        BrowserEntry {
                            name,
                            is_dir: false,
                            category,
                        }
                    }
                })
                .collect()
        })
        .unwrap_or_default();
    list.sort_by_key(|e| (!e.is_dir, e.name.to_lowercase()));
    list
}

/// The last `n` components of `path`, joined — keeps pane titles short.
pub fn tail_path(path: &Path, n: usize) -> String {
    let components: Vec<String> = path
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    let start = components.len().saturating_sub(n);
    let tail = components[start..].join("/");
    if start > 0 { format!("…/{}", tail) } else { tail }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tail_keeps_only_the_last_components() {
        let p = PathBuf::from("/home/user/music/album");
        assert_eq!(tail_path(&p, 2), "…/music/album");
    }

    #[test]
    fn short_paths_are_untouched() {
        let p = PathBuf::from("music");
        assert_eq!(tail_path(&p, 3), "music");
    }

    #[test]
    fn directories_are_never_audio() {
        let entry = BrowserEntry {
            name: "samples.mp3".into(),
            is_dir: true,
            category: FileCategory::Audio,
        };
        assert!(!entry.is_audio());
    }
}
