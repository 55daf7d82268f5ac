//! Card pixel size from the available viewport.

use serde::{Deserialize, Serialize};

use super::grid::GridSize;
use crate::core::LayoutConfig;

/// Gallery thumbnails per row.
pub const GALLERY_COLUMNS: usize = 3;

/// Screen area the host can give to the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub screen_width: u32,
    pub screen_height: u32,
    /// Width taken by the scoreboard column.
    pub sidebar_width: u32,
    /// Height taken above the board.
    pub header_height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(screen_width: u32, screen_height: u32) -> Self {
        Self {
            screen_width,
            screen_height,
            sidebar_width: 0,
            header_height: 0,
        }
    }

    #[must_use]
    pub fn with_sidebar(mut self, width: u32) -> Self {
        self.sidebar_width = width;
        self
    }

    #[must_use]
    pub fn with_header(mut self, height: u32) -> Self {
        self.header_height = height;
        self
    }
}

/// Computes card sizes from a [`LayoutConfig`].
#[derive(Clone, Debug)]
pub struct CardSizer {
    config: LayoutConfig,
}

impl CardSizer {
    #[must_use]
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Width and height left for the grid.
    ///
    /// Each dimension loses the margin (and sidebar or header), is floored
    /// at `min_viewport`, and the height then gives up the bottom-border
    /// fraction.
    #[must_use]
    pub fn available_area(&self, viewport: &Viewport) -> (u32, u32) {
        let cfg = &self.config;
        let width = viewport
            .screen_width
            .saturating_sub(viewport.sidebar_width)
            .saturating_sub(cfg.viewport_margin)
            .max(cfg.min_viewport);
        let height = viewport
            .screen_height
            .saturating_sub(viewport.header_height)
            .saturating_sub(cfg.viewport_margin)
            .max(cfg.min_viewport);
        let height = (f64::from(height) * (1.0 - cfg.bottom_border_fraction)) as u32;
        (width, height)
    }

    /// Edge length of a square card.
    #[must_use]
    pub fn card_size(&self, grid: GridSize, viewport: &Viewport) -> u32 {
        if grid.columns == 0 || grid.rows == 0 {
            return self.config.max_card_size.max(1);
        }
        let (width, height) = self.available_area(viewport);
        let by_width = f64::from(width) / grid.columns as f64;
        let by_height = f64::from(height) / grid.rows as f64;
        let base = by_width.min(by_height) as u32;
        let base = if base == 0 {
            self.config.fallback_card_size
        } else {
            base
        };
        base.min(self.config.max_card_size).max(1)
    }
}

/// Edge length of a gallery thumbnail for boards with `card_size` cards.
#[must_use]
pub fn gallery_thumb_size(card_size: u32) -> u32 {
    (card_size + 80).clamp(260, 360)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sizer() -> CardSizer {
        CardSizer::new(&LayoutConfig::default())
    }

    #[test]
    fn test_available_area() {
        let viewport = Viewport::new(1920, 1080).with_sidebar(300);
        // width: 1920 - 300 - 160 = 1460; height: (1080 - 160) * 0.9 = 828
        assert_eq!(sizer().available_area(&viewport), (1460, 828));
    }

    #[test]
    fn test_small_screen_uses_floor() {
        let viewport = Viewport::new(200, 100);
        assert_eq!(sizer().available_area(&viewport), (320, 288));
    }

    #[test]
    fn test_card_size_height_bound() {
        let viewport = Viewport::new(1920, 1080).with_sidebar(300);
        let grid = GridSize::for_cards(20); // 4 x 5
        // min(1460 / 5, 828 / 4) = min(292, 207)
        assert_eq!(sizer().card_size(grid, &viewport), 207);
    }

    #[test]
    fn test_card_size_capped() {
        let viewport = Viewport::new(3840, 2160);
        let grid = GridSize::for_cards(4);
        assert_eq!(sizer().card_size(grid, &viewport), 240);
    }

    #[test]
    fn test_card_size_fallback() {
        let viewport = Viewport::new(0, 0);
        let grid = GridSize { rows: 400, columns: 400 };
        assert_eq!(sizer().card_size(grid, &viewport), 60);
    }

    #[test]
    fn test_card_size_never_zero() {
        let config = LayoutConfig {
            max_card_size: 0,
            fallback_card_size: 0,
            ..LayoutConfig::default()
        };
        let sizer = CardSizer::new(&config);
        let viewport = Viewport::new(1920, 1080);
        assert_eq!(sizer.card_size(GridSize::for_cards(4), &viewport), 1);
        assert_eq!(sizer.card_size(GridSize { rows: 0, columns: 0 }, &viewport), 1);
    }

    #[test]
    fn test_border_fraction_shrinks_cards() {
        let viewport = Viewport::new(1920, 1080);
        let grid = GridSize::for_cards(16);
        let config = LayoutConfig {
            bottom_border_fraction: 0.5,
            ..LayoutConfig::default()
        };
        let tight = CardSizer::new(&config).card_size(grid, &viewport);
        let loose = sizer().card_size(grid, &viewport);
        assert!(tight < loose);
        assert_eq!(tight, 115); // (1080 - 160) * 0.5 / 4
    }

    #[test]
    fn test_gallery_thumb_size() {
        assert_eq!(gallery_thumb_size(100), 260);
        assert_eq!(gallery_thumb_size(220), 300);
        assert_eq!(gallery_thumb_size(240), 320);
        assert_eq!(gallery_thumb_size(400), 360);
    }
}
