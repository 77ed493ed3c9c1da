//! Card geometry.

/// Fixed geometry for one card style. Only the height varies, and only with
/// the number of wrapped quote lines.
#[derive(Debug, Clone, PartialEq)]
pub struct CardLayout {
    pub width: u32,
    pub padding_x: u32,
    pub padding_top: u32,
    pub padding_bottom: u32,
    pub line_height: u32,
    /// Space reserved below the quote for author, work, and year.
    pub attribution_height: u32,
    pub font_size: f32,
    pub small_font_size: f32,
    pub attribution_font_size: f32,
    /// Cards with more lines than this use `small_font_size`.
    pub shrink_after_lines: usize,
}

impl CardLayout {
    /// Geometry of the SVG card.
    pub fn vector() -> Self {
        Self {
            width: 600,
            padding_x: 30,
            padding_top: 50,
            padding_bottom: 30,
            line_height: 28,
            attribution_height: 70,
            font_size: 20.0,
            small_font_size: 16.0,
            attribution_font_size: 16.0,
            shrink_after_lines: 5,
        }
    }

    /// Geometry of the PNG card.
    pub fn raster() -> Self {
        Self {
            width: 800,
            padding_x: 60,
            padding_top: 90,
            padding_bottom: 50,
            line_height: 40,
            attribution_height: 120,
            font_size: 28.0,
            small_font_size: 22.0,
            attribution_font_size: 22.0,
            shrink_after_lines: 5,
        }
    }

    /// Total canvas height for `line_count` quote lines.
    pub fn height(&self, line_count: usize) -> u32 {
        let lines = u32::try_from(line_count).unwrap_or(u32::MAX);
        self.padding_top
            .saturating_add(lines.saturating_mul(self.line_height))
            .saturating_add(self.attribution_height)
            .saturating_add(self.padding_bottom)
    }

    /// Quote font size for `line_count` lines.
    pub fn font_size_for(&self, line_count: usize) -> f32 {
        if line_count > self.shrink_after_lines {
            self.small_font_size
        } else {
            self.font_size
        }
    }

    /// Horizontal space available to quote text.
    pub fn text_width(&self) -> u32 {
        self.width.saturating_sub(self.padding_x * 2)
    }

    /// Baseline of quote line `index`, counted from zero.
    pub fn line_baseline(&self, index: usize) -> u32 {
        let index = u32::try_from(index).unwrap_or(u32::MAX);
        self.padding_top
            .saturating_add(index.saturating_mul(self.line_height))
    }

    /// Top edge of the attribution block. Author, work, and year baselines
    /// are offsets from here.
    pub fn attribution_top(&self, line_count: usize) -> u32 {
        self.height(line_count) - self.attribution_height - self.padding_bottom
    }
}
