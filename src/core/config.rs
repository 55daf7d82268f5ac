//! Game configuration.
//!
//! `GameConfig` is built once at startup and handed to every constructor
//! that needs it. It is loaded from a TOML file deep-merged over the
//! built-in defaults:
//!
//! ```toml
//! language = "en"
//!
//! [title]
//! text = "Memory"
//! image = "title.png"          # shorthand for [title.image] path = ...
//!
//! [layout]
//! bottom_border_fraction = 0.15
//!
//! [media.sounds]
//! folder = "sounds"
//! extensions = ["wav"]
//! ```
//!
//! Relative folders and paths resolve against the config file's directory.
//! A missing file yields the defaults; a malformed one is logged and also
//! yields the defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::{MemoryError, Result};
use super::player::MAX_PLAYERS;

pub const DEFAULT_LANGUAGE: &str = "de";
const DEFAULT_FONT_FAMILY: &str = "Helvetica";

/// Complete, normalized game configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Lower-case locale code.
    pub language: String,
    pub title: TitleConfig,
    pub layout: LayoutConfig,
    pub ui: UiConfig,
    pub media: MediaConfig,
    pub game: RulesConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            title: TitleConfig::default(),
            layout: LayoutConfig::default(),
            ui: UiConfig::default(),
            media: MediaConfig::default(),
            game: RulesConfig::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleConfig {
    pub text: String,
    pub image: TitleImage,
}

impl Default for TitleConfig {
    fn default() -> Self {
        Self {
            text: "Memory-Spiel".to_string(),
            image: TitleImage::default(),
        }
    }
}

/// Optional banner image shown above the menu.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "TitleImageRepr")]
pub struct TitleImage {
    /// Empty when no title image is configured.
    pub path: PathBuf,
    pub max_width: u32,
    pub max_height: u32,
}

impl Default for TitleImage {
    fn default() -> Self {
        Self {
            path: PathBuf::new(),
            max_width: 520,
            max_height: 220,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TitleImageRepr {
    Path(PathBuf),
    Table {
        #[serde(default)]
        path: PathBuf,
        max_width: Option<u32>,
        max_height: Option<u32>,
    },
}

impl From<TitleImageRepr> for TitleImage {
    fn from(repr: TitleImageRepr) -> Self {
        let defaults = TitleImage::default();
        match repr {
            TitleImageRepr::Path(path) => Self { path, ..defaults },
            TitleImageRepr::Table {
                path,
                max_width,
                max_height,
            } => Self {
                path,
                max_width: max_width.unwrap_or(defaults.max_width),
                max_height: max_height.unwrap_or(defaults.max_height),
            },
        }
    }
}

/// Board sizing parameters. See [`crate::layout`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Share of the available height reserved for the footer.
    pub bottom_border_fraction: f64,
    /// Largest card edge in pixels.
    pub max_card_size: u32,
    /// Card edge used when the viewport leaves no room at all.
    pub fallback_card_size: u32,
    /// Pixels subtracted from each screen dimension before sizing.
    pub viewport_margin: u32,
    /// Floor for each available viewport dimension.
    pub min_viewport: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            bottom_border_fraction: 0.1,
            max_card_size: 240,
            fallback_card_size: 60,
            viewport_margin: 160,
            min_viewport: 320,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub font: FontConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            font: FontConfig::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    pub family: String,
    pub title: FontSection,
    pub emphasis: FontSection,
    pub body: FontSection,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: DEFAULT_FONT_FAMILY.to_string(),
            title: FontSection::new(24, "bold"),
            emphasis: FontSection::new(14, "bold"),
            body: FontSection::new(12, "normal"),
        }
    }
}

/// Font size and weight for one text role.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSection {
    pub size: i64,
    pub weight: String,
}

impl FontSection {
    fn new(size: i64, weight: &str) -> Self {
        Self {
            size,
            weight: weight.to_string(),
        }
    }

    fn normalized(mut self, fallback: &FontSection) -> Self {
        self.size = self.size.max(1);
        let weight = self.weight.trim();
        self.weight = if weight.is_empty() {
            fallback.weight.clone()
        } else {
            weight.to_string()
        };
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    pub sounds: MediaFolder,
    pub avatars: MediaFolder,
    pub images: ImageFolder,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            sounds: MediaFolder {
                folder: PathBuf::from("data/sounds"),
                extensions: Extensions::new(&[".opus", ".wav"]),
            },
            avatars: MediaFolder {
                folder: PathBuf::from("data/avatars"),
                extensions: Extensions::new(&[".png", ".jpg", ".jpeg"]),
            },
            images: ImageFolder {
                folder: PathBuf::from("data/images"),
            },
        }
    }
}

/// A media folder plus the file extensions it accepts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MediaFolder {
    pub folder: PathBuf,
    pub extensions: Extensions,
}

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageFolder {
    pub folder: PathBuf,
}

/// Lower-case, dot-prefixed file extensions.
///
/// Accepts a single string or a list in the config file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ExtensionsRepr")]
pub struct Extensions(Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum ExtensionsRepr {
    One(String),
    Many(Vec<String>),
}

impl From<ExtensionsRepr> for Extensions {
    fn from(repr: ExtensionsRepr) -> Self {
        match repr {
            ExtensionsRepr::One(ext) => Self::normalize([ext]),
            ExtensionsRepr::Many(exts) => Self::normalize(exts),
        }
    }
}

impl Extensions {
    /// Normalize the given extensions (case, leading dot).
    #[must_use]
    pub fn new(exts: &[&str]) -> Self {
        Self::normalize(exts.iter().map(|e| e.to_string()))
    }

    fn normalize(exts: impl IntoIterator<Item = String>) -> Self {
        let normalized = exts
            .into_iter()
            .map(|e| e.trim().to_lowercase())
            .filter(|e| !e.is_empty() && e != ".")
            .map(|e| if e.starts_with('.') { e } else { format!(".{}", e) })
            .collect();
        Self(normalized)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Does `path` carry one of these extensions (case-insensitive)?
    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        let dotted = format!(".{}", ext.to_lowercase());
        self.0.iter().any(|e| *e == dotted)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// How long two face-up cards stay visible before evaluation.
    pub reveal_delay_ms: u64,
    /// Seat limit offered by the setup screen.
    pub max_players: usize,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            reveal_delay_ms: 1000,
            max_players: MAX_PLAYERS,
        }
    }
}

impl RulesConfig {
    #[must_use]
    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }
}

impl GameConfig {
    /// Load from `path`, falling back to defaults when the file is missing
    /// or malformed.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        match Self::try_load(path) {
            Ok(Some(config)) => {
                log::info!("loaded config from {}", path.display());
                config
            }
            Ok(None) => {
                log::info!("no config at {}, using defaults", path.display());
                Self::default().normalized(base_dir)
            }
            Err(err) => {
                log::warn!("{}; using defaults", err);
                Self::default().normalized(base_dir)
            }
        }
    }

    /// Load from `path`. `Ok(None)` when the file does not exist.
    pub fn try_load(path: &Path) -> Result<Option<Self>> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(MemoryError::io(path, err)),
        };
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_toml_str(&text, base_dir)
            .map(Some)
            .map_err(|source| MemoryError::Config {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Parse TOML text, merge it over the defaults and normalize.
    pub fn from_toml_str(
        text: &str,
        base_dir: &Path,
    ) -> std::result::Result<Self, toml::de::Error> {
        let overlay: toml::Table = toml::from_str(text)?;
        let mut merged = default_table();
        deep_merge(&mut merged, overlay);
        let config: Self = toml::Value::Table(merged).try_into()?;
        Ok(config.normalized(base_dir))
    }

    /// Apply the normalization rules and resolve relative paths.
    #[must_use]
    pub fn normalized(mut self, base_dir: &Path) -> Self {
        let defaults = Self::default();

        let language = self.language.trim().to_lowercase();
        self.language = if language.is_empty() {
            defaults.language.clone()
        } else {
            language
        };

        self.title.image.path = resolve_path(base_dir, &self.title.image.path);

        let fraction = self.layout.bottom_border_fraction;
        if !(0.0..=0.9).contains(&fraction) || fraction.is_nan() {
            log::warn!("bottom_border_fraction {} out of range, clamping", fraction);
            self.layout.bottom_border_fraction = if fraction.is_nan() {
                defaults.layout.bottom_border_fraction
            } else {
                fraction.clamp(0.0, 0.9)
            };
        }

        let layout = &mut self.layout;
        if layout.max_card_size == 0 {
            log::warn!("max_card_size must be positive, using {}", defaults.layout.max_card_size);
            layout.max_card_size = defaults.layout.max_card_size;
        }
        if layout.fallback_card_size == 0 {
            log::warn!(
                "fallback_card_size must be positive, using {}",
                defaults.layout.fallback_card_size
            );
            layout.fallback_card_size = defaults.layout.fallback_card_size;
        }

        let font = &mut self.ui.font;
        let family = font.family.trim();
        font.family = if family.is_empty() {
            defaults.ui.font.family.clone()
        } else {
            family.to_string()
        };
        font.title = font.title.clone().normalized(&defaults.ui.font.title);
        font.emphasis = font.emphasis.clone().normalized(&defaults.ui.font.emphasis);
        font.body = font.body.clone().normalized(&defaults.ui.font.body);

        let media = &mut self.media;
        media.sounds.folder = resolve_path(base_dir, &media.sounds.folder);
        if media.sounds.extensions.is_empty() {
            media.sounds.extensions = defaults.media.sounds.extensions.clone();
        }
        media.avatars.folder = resolve_path(base_dir, &media.avatars.folder);
        if media.avatars.extensions.is_empty() {
            media.avatars.extensions = defaults.media.avatars.extensions.clone();
        }
        media.images.folder = resolve_path(base_dir, &media.images.folder);

        self.game.max_players = self.game.max_players.clamp(1, MAX_PLAYERS);

        self
    }

    /// Override the language.
    #[must_use]
    pub fn with_language(mut self, code: impl Into<String>) -> Self {
        self.language = code.into().trim().to_lowercase();
        self
    }

    /// Override the reveal delay.
    #[must_use]
    pub fn with_reveal_delay(mut self, delay: Duration) -> Self {
        self.game.reveal_delay_ms = delay.as_millis() as u64;
        self
    }

    /// Override the bottom-border fraction.
    #[must_use]
    pub fn with_bottom_border_fraction(mut self, fraction: f64) -> Self {
        self.layout.bottom_border_fraction = fraction;
        self
    }
}

fn default_table() -> toml::Table {
    match toml::Value::try_from(GameConfig::default()) {
        Ok(toml::Value::Table(table)) => table,
        _ => toml::Table::new(),
    }
}

/// Merge `overlay` into `base`. Tables merge key by key; any other value
/// replaces the base value.
fn deep_merge(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                deep_merge(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

fn resolve_path(base_dir: &Path, path: &Path) -> PathBuf {
    if path.as_os_str().is_empty() || path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}
