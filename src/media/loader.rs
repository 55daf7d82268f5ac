//! Image loading.
//!
//! Hosts go through [`ImageLoader`]; [`ThumbnailLoader`] decodes files with
//! the `image` crate and letterboxes them onto square card faces.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage};
use rustc_hash::FxHashMap;

use crate::core::{MemoryError, Result};

/// Background behind letterboxed card faces.
pub const CARD_BACKGROUND: Rgba<u8> = Rgba([0x2b, 0x2b, 0x2b, 0xff]);

/// A decoded RGBA picture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    image: RgbaImage,
}

impl Bitmap {
    #[must_use]
    pub fn new(image: RgbaImage) -> Self {
        Self { image }
    }

    /// A plain square in the card background color; used for card backs.
    #[must_use]
    pub fn blank(size: u32) -> Self {
        Self::new(RgbaImage::from_pixel(size, size, CARD_BACKGROUND))
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Row-major RGBA bytes.
    #[must_use]
    pub fn as_rgba(&self) -> &[u8] {
        self.image.as_raw()
    }

    #[must_use]
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

/// Path → decoded bitmap.
pub trait ImageLoader {
    /// Load `path` as a `size × size` card face.
    fn load(&mut self, path: &Path, size: u32) -> Result<Arc<Bitmap>>;
}

/// Decoding loader with a `(path, size)` cache.
#[derive(Debug, Default)]
pub struct ThumbnailLoader {
    cache: FxHashMap<(PathBuf, u32), Arc<Bitmap>>,
    banners: FxHashMap<(PathBuf, u32, u32), Arc<Bitmap>>,
}

impl ThumbnailLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached card faces.
    #[must_use]
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    /// Load a banner picture scaled down to fit `max_width × max_height`,
    /// without letterboxing.
    pub fn load_fitted(&mut self, path: &Path, max_width: u32, max_height: u32) -> Result<Arc<Bitmap>> {
        let key = (path.to_path_buf(), max_width, max_height);
        if let Some(hit) = self.banners.get(&key) {
            return Ok(Arc::clone(hit));
        }
        let fitted = shrink_to_fit(decode(path)?, max_width, max_height).to_rgba8();
        let bitmap = Arc::new(Bitmap::new(fitted));
        self.banners.insert(key, Arc::clone(&bitmap));
        Ok(bitmap)
    }
}

impl ImageLoader for ThumbnailLoader {
    fn load(&mut self, path: &Path, size: u32) -> Result<Arc<Bitmap>> {
        let key = (path.to_path_buf(), size);
        if let Some(hit) = self.cache.get(&key) {
            return Ok(Arc::clone(hit));
        }

        let thumb = shrink_to_fit(decode(path)?, size, size).to_rgba8();
        let mut canvas = RgbaImage::from_pixel(size, size, CARD_BACKGROUND);
        let x = i64::from(size.saturating_sub(thumb.width()) / 2);
        let y = i64::from(size.saturating_sub(thumb.height()) / 2);
        imageops::overlay(&mut canvas, &thumb, x, y);

        let bitmap = Arc::new(Bitmap::new(canvas));
        self.cache.insert(key, Arc::clone(&bitmap));
        log::debug!("loaded {} at {}px", path.display(), size);
        Ok(bitmap)
    }
}

fn decode(path: &Path) -> Result<DynamicImage> {
    image::open(path).map_err(|source| MemoryError::ImageDecode {
        path: path.to_path_buf(),
        source,
    })
}

/// Scale down, keeping the aspect ratio, so the picture fits the bounds.
/// Pictures that already fit are left alone.
fn shrink_to_fit(image: DynamicImage, max_width: u32, max_height: u32) -> DynamicImage {
    if image.width() <= max_width && image.height() <= max_height {
        return image;
    }
    image.resize(max_width.max(1), max_height.max(1), FilterType::Lanczos3)
}
