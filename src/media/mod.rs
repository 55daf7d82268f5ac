//! Pictures, avatars and sounds on disk.

pub mod library;
pub mod loader;
pub mod sound;

pub use library::{list_images, list_media_files, AvatarCatalog, IMAGE_EXTENSIONS};
pub use loader::{Bitmap, ImageLoader, ThumbnailLoader, CARD_BACKGROUND};
pub use sound::SoundPicker;
