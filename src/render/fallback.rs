//! Minimal error cards returned when a request fails.
//!
//! Consumers embed the endpoint as an image source, so failures still answer
//! with a small, valid image instead of a broken one.

use std::sync::Arc;

use usvg::fontdb;

use super::raster;
use super::theme::Theme;
use super::vector::escape_xml;
use crate::error::CardResult;

const WIDTH: u32 = 400;
const HEIGHT: u32 = 100;
const MESSAGE: &str = "Could not load a quote right now.";

/// SVG error card.
pub fn svg(theme: &Theme) -> String {
    format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            r#"<rect x="1" y="1" width="{rw}" height="{rh}" rx="8" fill="{bg}" stroke="{border}" stroke-width="2"/>"#,
            r#"<text x="{cx}" y="{cy}" font-family="{font}" font-size="16" text-anchor="middle" fill="{fg}">{msg}</text>"#,
            "</svg>"
        ),
        w = WIDTH,
        h = HEIGHT,
        rw = WIDTH - 2,
        rh = HEIGHT - 2,
        cx = WIDTH / 2,
        cy = HEIGHT / 2 + 6,
        bg = escape_xml(&theme.background),
        border = escape_xml(&theme.border),
        font = escape_xml(&theme.font_family),
        fg = escape_xml(&theme.quote),
        msg = MESSAGE,
    )
}

/// PNG error card.
pub fn png(theme: &Theme, fonts: &Arc<fontdb::Database>) -> CardResult<Vec<u8>> {
    raster::rasterize(&svg(theme), fonts)
}
