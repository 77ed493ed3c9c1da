//! PNG card composition and rasterization.
//!
//! The raster card is described as an SVG scene and rasterized with `resvg`.
//! Unlike the vector card it always shows a work and a year line, filling in
//! placeholders when the quote does not carry them.

use std::path::Path;
use std::sync::Arc;

use usvg::fontdb;

use super::layout::CardLayout;
use super::theme::Theme;
use super::vector::escape_xml;
use super::Attribution;
use crate::error::{CardError, CardResult};

pub const UNKNOWN_WORK: &str = "Unknown Work";
pub const UNKNOWN_YEAR: &str = "Unknown Year";

/// Compose the raster card scene. Lines and attribution are centered.
pub fn compose(
    lines: &[String],
    attribution: &Attribution,
    theme: &Theme,
    layout: &CardLayout,
) -> String {
    let width = layout.width;
    let height = layout.height(lines.len());
    let font_size = layout.font_size_for(lines.len());
    let font_family = escape_xml(&theme.font_family);
    let center = width / 2;

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );
    svg.push_str(&format!(
        r#"<rect width="{width}" height="{height}" fill="{}"/>"#,
        escape_xml(&theme.background)
    ));
    svg.push_str(&format!(
        r#"<rect x="20" y="20" width="{}" height="{}" fill="none" stroke="{}" stroke-width="3"/>"#,
        width.saturating_sub(40),
        height.saturating_sub(40),
        escape_xml(&theme.border)
    ));

    for (i, line) in lines.iter().enumerate() {
        let y = layout.line_baseline(i);
        svg.push_str(&format!(
            r#"<text x="{center}" y="{y}" font-family="{font_family}" font-size="{font_size}" text-anchor="middle" fill="{}">{}</text>"#,
            escape_xml(&theme.quote),
            escape_xml(line)
        ));
    }

    let top = layout.attribution_top(lines.len());
    let small = layout.attribution_font_size;
    let work = attribution.work.as_deref().unwrap_or(UNKNOWN_WORK);
    let year = attribution.year.as_deref().unwrap_or(UNKNOWN_YEAR);

    svg.push_str(&format!(
        r#"<text x="{center}" y="{}" font-family="{font_family}" font-size="{small}" font-weight="bold" text-anchor="middle" fill="{}">— {}</text>"#,
        top + 36,
        escape_xml(&theme.author),
        escape_xml(&attribution.author)
    ));
    svg.push_str(&format!(
        r#"<text x="{center}" y="{}" font-family="{font_family}" font-size="{small}" font-style="italic" text-anchor="middle" fill="{}">{}</text>"#,
        top + 70,
        escape_xml(&theme.work),
        escape_xml(work)
    ));
    svg.push_str(&format!(
        r#"<text x="{center}" y="{}" font-family="{font_family}" font-size="{}" text-anchor="middle" fill="{}">{}</text>"#,
        top + 100,
        small * 0.8,
        escape_xml(&theme.year),
        escape_xml(year)
    ));

    svg.push_str("</svg>");
    svg
}

/// Rasterize an SVG scene into PNG bytes.
pub fn rasterize(svg: &str, fonts: &Arc<fontdb::Database>) -> CardResult<Vec<u8>> {
    let options = usvg::Options {
        fontdb: fonts.clone(),
        ..Default::default()
    };

    let tree = usvg::Tree::from_str(svg, &options)
        .map_err(|e| CardError::ComposeFailure(format!("parse svg scene: {e}")))?;

    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height()).ok_or_else(|| {
        CardError::ComposeFailure(format!(
            "cannot allocate {}x{} pixmap",
            size.width(),
            size.height()
        ))
    })?;

    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::default(),
        &mut pixmap.as_mut(),
    );

    pixmap
        .encode_png()
        .map_err(|e| CardError::ComposeFailure(format!("encode png: {e}")))
}

/// Build the font database used for raster cards: system fonts plus any
/// font files found in `extra_dir`.
pub fn load_fonts(extra_dir: Option<&Path>) -> Arc<fontdb::Database> {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();

    if let Some(dir) = extra_dir {
        load_fonts_from_dir(&mut db, dir);
    }

    tracing::debug!(faces = db.faces().count(), "Font database loaded");
    Arc::new(db)
}

fn load_fonts_from_dir(db: &mut fontdb::Database, dir: &Path) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "Font directory not readable");
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        if matches!(ext.to_ascii_lowercase().as_str(), "ttf" | "otf" | "ttc") {
            if let Err(e) = db.load_font_file(&path) {
                tracing::warn!(path = %path.display(), error = %e, "Skipping font file");
            }
        }
    }
}
