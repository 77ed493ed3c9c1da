//! Greedy word wrapping.
//!
//! Splits text into display lines bounded either by a character count or by a
//! measured pixel width. Tokens are never split: a single token wider than the
//! constraint is emitted on its own line as-is. Empty or whitespace-only input
//! produces no lines at all.

/// Measures the rendered width of a run of text at a given font size.
pub trait MeasureText {
    fn measure(&self, text: &str, font_size: f32) -> f32;
}

impl<F> MeasureText for F
where
    F: Fn(&str, f32) -> f32,
{
    fn measure(&self, text: &str, font_size: f32) -> f32 {
        self(text, font_size)
    }
}

/// Width estimate from per-character advance ratios (fraction of an em).
///
/// Good enough for laying out serif body text without shaping; the card
/// leaves horizontal padding to absorb the error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AverageAdvance {
    pub narrow: f32,
    pub regular: f32,
    pub capital: f32,
    pub wide: f32,
}

impl Default for AverageAdvance {
    fn default() -> Self {
        Self {
            narrow: 0.28,
            regular: 0.52,
            capital: 0.68,
            wide: 0.9,
        }
    }
}

impl AverageAdvance {
    fn ratio(&self, c: char) -> f32 {
        match c {
            ' ' | 'i' | 'j' | 'l' | 'I' | '.' | ',' | ';' | ':' | '\'' | '!' | '|' | '`' => {
                self.narrow
            }
            'm' | 'w' | 'M' | 'W' | '@' | '—' => self.wide,
            c if c.is_ascii_uppercase() || c.is_ascii_digit() => self.capital,
            c if c.is_ascii() => self.regular,
            // CJK and other full-width scripts.
            _ => self.wide,
        }
    }
}

impl MeasureText for AverageAdvance {
    fn measure(&self, text: &str, font_size: f32) -> f32 {
        text.chars().map(|c| self.ratio(c)).sum::<f32>() * font_size
    }
}

/// Bound applied to every wrapped line.
#[derive(Clone, Copy)]
pub enum WidthConstraint<'a> {
    /// At most this many characters (Unicode scalar values) per line.
    MaxChars(usize),
    /// At most this many pixels per line at the given font size.
    MaxWidth {
        pixels: f32,
        font_size: f32,
        measure: &'a dyn MeasureText,
    },
}

impl WidthConstraint<'_> {
    /// Whether `line` fits within the constraint.
    pub fn fits(&self, line: &str) -> bool {
        match *self {
            WidthConstraint::MaxChars(max) => line.chars().count() <= max,
            WidthConstraint::MaxWidth {
                pixels,
                font_size,
                measure,
            } => measure.measure(line, font_size) <= pixels,
        }
    }
}

impl std::fmt::Debug for WidthConstraint<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WidthConstraint::MaxChars(max) => f.debug_tuple("MaxChars").field(max).finish(),
            WidthConstraint::MaxWidth {
                pixels, font_size, ..
            } => f
                .debug_struct("MaxWidth")
                .field("pixels", pixels)
                .field("font_size", font_size)
                .finish_non_exhaustive(),
        }
    }
}

/// Wrap `text` into lines that satisfy `constraint`.
pub fn wrap(text: &str, constraint: &WidthConstraint<'_>) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate = format!("{current} {word}");
        if constraint.fits(&candidate) {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}
