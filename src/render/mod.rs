//! Card rendering subsystem.
//!
//! # Data Flow
//! ```text
//! quote text
//!     → wrap.rs (greedy line fill: chars for SVG, measured pixels for PNG)
//!     → vector.rs | raster.rs (compose scene, escape user text)
//!     → raster.rs (resvg → PNG) for raster output
//!     → RenderedImage { format, bytes }
//! ```
//!
//! # Design Decisions
//! - Geometry and theme are immutable values shared by all requests
//! - SVG cards omit missing work/year; PNG cards show placeholders
//! - Rendering is pure; the HTTP layer owns the network write

pub mod fallback;
pub mod layout;
pub mod raster;
pub mod theme;
pub mod vector;
pub mod wrap;

use std::path::Path;
use std::sync::Arc;

use usvg::fontdb;

use crate::config::CardConfig;
use crate::error::CardResult;

pub use layout::CardLayout;
pub use theme::Theme;
pub use wrap::{wrap, AverageAdvance, MeasureText, WidthConstraint};

/// Output image family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
}

impl OutputFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            OutputFormat::Svg => "image/svg+xml",
            OutputFormat::Png => "image/png",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
        }
    }
}

/// Who said it, and where.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribution {
    pub author: String,
    pub work: Option<String>,
    pub year: Option<String>,
}

/// Encoded image ready to be written to a response body.
#[derive(Debug, Clone)]
pub struct RenderedImage {
    pub format: OutputFormat,
    pub bytes: Vec<u8>,
    /// Number of wrapped quote lines on the card.
    pub line_count: usize,
}

/// Renders quote cards in either output format.
pub struct CardRenderer {
    theme: Theme,
    vector: CardLayout,
    raster: CardLayout,
    vector_max_chars: usize,
    measure: AverageAdvance,
    fonts: Arc<fontdb::Database>,
}

impl CardRenderer {
    /// Create a renderer, loading system fonts plus the configured font dir.
    pub fn new(theme: Theme, card: &CardConfig) -> Self {
        let fonts = raster::load_fonts(card.fonts_dir.as_deref().map(Path::new));
        Self::with_fonts(theme, card, fonts)
    }

    /// Create a renderer over an existing font database.
    pub fn with_fonts(theme: Theme, card: &CardConfig, fonts: Arc<fontdb::Database>) -> Self {
        let mut vector = CardLayout::vector();
        let mut raster = CardLayout::raster();
        vector.shrink_after_lines = card.shrink_after_lines;
        raster.shrink_after_lines = card.shrink_after_lines;

        Self {
            theme,
            vector,
            raster,
            vector_max_chars: card.vector_max_chars,
            measure: AverageAdvance::default(),
            fonts,
        }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Wrap the quote for the given format's card.
    pub fn wrap_lines(&self, text: &str, format: OutputFormat) -> Vec<String> {
        match format {
            OutputFormat::Svg => wrap(text, &WidthConstraint::MaxChars(self.vector_max_chars)),
            OutputFormat::Png => wrap(
                text,
                &WidthConstraint::MaxWidth {
                    pixels: self.raster.text_width() as f32,
                    font_size: self.raster.font_size,
                    measure: &self.measure,
                },
            ),
        }
    }

    /// Wrap, compose, and encode a card.
    pub fn render(
        &self,
        text: &str,
        attribution: &Attribution,
        format: OutputFormat,
    ) -> CardResult<RenderedImage> {
        let lines = self.wrap_lines(text, format);
        let bytes = match format {
            OutputFormat::Svg => {
                vector::compose(&lines, attribution, &self.theme, &self.vector).into_bytes()
            }
            OutputFormat::Png => {
                let scene = raster::compose(&lines, attribution, &self.theme, &self.raster);
                raster::rasterize(&scene, &self.fonts)?
            }
        };

        Ok(RenderedImage {
            format,
            bytes,
            line_count: lines.len(),
        })
    }

    /// Render the error card for `format`.
    pub fn render_fallback(&self, format: OutputFormat) -> CardResult<RenderedImage> {
        let bytes = match format {
            OutputFormat::Svg => fallback::svg(&self.theme).into_bytes(),
            OutputFormat::Png => fallback::png(&self.theme, &self.fonts)?,
        };
        Ok(RenderedImage {
            format,
            bytes,
            line_count: 0,
        })
    }
}
