//! Finding pictures, sounds and avatars on disk.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use walkdir::WalkDir;

use crate::core::{Extensions, MediaFolder};

/// Extensions accepted as card pictures.
pub const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "bmp"];

/// Every card picture under `folder`, recursively, sorted by path.
///
/// A missing folder yields no pictures.
#[must_use]
pub fn list_images(folder: &Path) -> Vec<PathBuf> {
    if !folder.is_dir() {
        return Vec::new();
    }
    let mut paths: Vec<PathBuf> = WalkDir::new(folder)
        .min_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| is_image(p))
        .collect();
    paths.sort();
    paths
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.as_str()))
}

/// Files directly inside `folder` carrying one of `extensions`.
///
/// An empty extension list accepts every file. Unsorted.
#[must_use]
pub fn list_media_files(folder: &Path, extensions: &Extensions) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(folder) {
        Ok(entries) => entries,
        Err(_) => return Vec::new(),
    };
    entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .filter(|p| extensions.is_empty() || extensions.matches(p))
        .collect()
}

/// Avatar pictures a player can choose from.
#[derive(Clone, Debug, Default)]
pub struct AvatarCatalog {
    /// `(display name, absolute path)`, sorted by name ignoring case.
    options: Vec<(String, PathBuf)>,
    known: FxHashSet<PathBuf>,
}

impl AvatarCatalog {
    /// Scan the configured avatar folder.
    #[must_use]
    pub fn scan(media: &MediaFolder) -> Self {
        let options = list_media_files(&media.folder, &media.extensions)
            .into_iter()
            .filter_map(|path| {
                let name = path.file_stem()?.to_string_lossy().into_owned();
                Some((name, absolute(&path)))
            })
            .collect();
        let catalog = Self::from_options(options);
        log::debug!("found {} avatars in {}", catalog.len(), media.folder.display());
        catalog
    }

    /// Build from `(name, path)` pairs.
    #[must_use]
    pub fn from_options(mut options: Vec<(String, PathBuf)>) -> Self {
        options.sort_by_cached_key(|(name, _)| name.to_lowercase());
        let known = options.iter().map(|(_, path)| absolute(path)).collect();
        Self { options, known }
    }

    #[must_use]
    pub fn options(&self) -> &[(String, PathBuf)] {
        &self.options
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// First avatar in display order.
    #[must_use]
    pub fn default_avatar(&self) -> Option<&Path> {
        self.options.first().map(|(_, path)| path.as_path())
    }

    /// The absolute path of `path` if it is a known avatar.
    #[must_use]
    pub fn normalize(&self, path: &Path) -> Option<PathBuf> {
        if path.as_os_str().is_empty() {
            return None;
        }
        let abs = absolute(path);
        self.known.contains(&abs).then_some(abs)
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
