//! SVG card composition.

use super::layout::CardLayout;
use super::theme::Theme;
use super::Attribution;

/// Escape text for embedding in SVG/XML content or attribute values.
pub fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

/// Compose the SVG card.
///
/// Quote lines are left aligned from the top. Work and year are omitted
/// entirely when the quote does not carry them.
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
    let x = layout.padding_x;

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );
    svg.push_str(&format!(
        r#"<rect x="1" y="1" width="{}" height="{}" rx="10" fill="{}" stroke="{}" stroke-width="2"/>"#,
        width - 2,
        height - 2,
        escape_xml(&theme.background),
        escape_xml(&theme.border),
    ));

    svg.push_str(&format!(
        r#"<text font-family="{font_family}" font-size="{font_size}" fill="{}">"#,
        escape_xml(&theme.quote)
    ));
    for (i, line) in lines.iter().enumerate() {
        let y = layout.line_baseline(i);
        svg.push_str(&format!(
            r#"<tspan x="{x}" y="{y}">{}</tspan>"#,
            escape_xml(line)
        ));
    }
    svg.push_str("</text>");

    let top = layout.attribution_top(lines.len());
    let small = layout.attribution_font_size;
    svg.push_str(&format!(
        r#"<text x="{x}" y="{}" font-family="{font_family}" font-size="{small}" font-weight="bold" fill="{}">— {}</text>"#,
        top + 26,
        escape_xml(&theme.author),
        escape_xml(&attribution.author),
    ));

    if let Some(work) = &attribution.work {
        svg.push_str(&format!(
            r#"<text x="{x}" y="{}" font-family="{font_family}" font-size="{small}" font-style="italic" fill="{}">{}</text>"#,
            top + 52,
            escape_xml(&theme.work),
            escape_xml(work),
        ));
    }

    if let Some(year) = &attribution.year {
        svg.push_str(&format!(
            r#"<text x="{}" y="{}" font-family="{font_family}" font-size="{small}" text-anchor="end" fill="{}">{}</text>"#,
            width - layout.padding_x,
            top + 52,
            escape_xml(&theme.year),
            escape_xml(year),
        ));
    }

    svg.push_str("</svg>");
    svg
}
