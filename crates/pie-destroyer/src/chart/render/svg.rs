use super::{ChartSpec, LabelStyle};
use crate::chart::domain::BackgroundPattern;
use std::f64::consts::PI;
use std::fmt::Write as _;

pub const CANVAS_WIDTH: u32 = 400;
pub const CHART_HEIGHT: u32 = 350;

const LEGEND_COLUMNS: usize = 4;
const LEGEND_ROW_HEIGHT: u32 = 18;
const DESCRIPTION_HEIGHT: u32 = 48;
const LABEL_OFFSET: f64 = 20.0;

/// Draws `chart` as a standalone SVG document, `scale` times its natural size, on a solid
/// `background` color.
pub fn render_svg(chart: &ChartSpec, scale: u32, background: &str) -> String {
    let legend_rows = if chart.show_legend {
        chart.slices.len().div_ceil(LEGEND_COLUMNS) as u32
    } else {
        0
    };
    let legend_height = legend_rows * LEGEND_ROW_HEIGHT;
    let description_height = if chart.description.is_some() {
        DESCRIPTION_HEIGHT
    } else {
        0
    };
    let height = CHART_HEIGHT + legend_height + description_height;
    let scale = scale.max(1);

    let mut out = String::new();
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        CANVAS_WIDTH * scale,
        height * scale,
        CANVAS_WIDTH,
        height
    );
    write_defs(&mut out, chart);
    let _ = write!(
        out,
        r#"<rect width="100%" height="100%" fill="{}"/>"#,
        escape(background)
    );
    if chart.background.is_decorated() {
        let _ = write!(
            out,
            r#"<rect width="100%" height="{CHART_HEIGHT}" fill="url(#bg-{})"/>"#,
            chart.background.as_str()
        );
    }

    let filter = if chart.drop_shadow {
        r#" filter="url(#drop-shadow)""#
    } else {
        ""
    };
    let _ = write!(out, "<g{filter}>");

    if chart.perspective {
        out.push_str(
            r#"<ellipse cx="216" cy="237" rx="110" ry="33" fill="rgba(0,0,0,0.5)" filter="url(#blur)"/>"#,
        );
        out.push_str(
            r#"<ellipse cx="168" cy="223" rx="100" ry="25" fill="rgba(0,0,0,0.2)" filter="url(#blur)"/>"#,
        );
        out.push_str(r#"<g transform="translate(40 40) scale(0.9 0.75) skewX(-10)">"#);
    } else {
        out.push_str("<g>");
    }
    write_slices(&mut out, chart);
    out.push_str("</g></g>");

    if chart.show_legend {
        write_legend(&mut out, chart);
    }
    if let Some(description) = &chart.description {
        let top = CHART_HEIGHT + legend_height + 16;
        let _ = write!(
            out,
            r#"<foreignObject x="8" y="{top}" width="{}" height="{}"><p xmlns="http://www.w3.org/1999/xhtml" style="margin:0;font:11px sans-serif"><strong>Description:</strong> {}</p></foreignObject>"#,
            CANVAS_WIDTH - 16,
            DESCRIPTION_HEIGHT - 8,
            escape(description)
        );
    }

    out.push_str("</svg>");
    out
}

fn write_defs(out: &mut String, chart: &ChartSpec) {
    out.push_str("<defs>");
    match chart.background {
        BackgroundPattern::Checkered => out.push_str(
            r##"<pattern id="bg-checkered" width="20" height="20" patternUnits="userSpaceOnUse"><rect width="20" height="20" fill="#fff"/><rect width="10" height="10" fill="#000"/><rect x="10" y="10" width="10" height="10" fill="#000"/></pattern>"##,
        ),
        BackgroundPattern::Houndstooth => out.push_str(
            r##"<pattern id="bg-houndstooth" width="100" height="100" patternUnits="userSpaceOnUse"><rect width="100" height="100" fill="#edf6ee"/><path d="M0 0H50V50H0Z M50 50L100 100H75L50 75Z M0 50L50 100H25L0 75Z" fill="#5b7c8d"/></pattern>"##,
        ),
        BackgroundPattern::None => {}
    }
    if chart.drop_shadow {
        out.push_str(
            r#"<filter id="drop-shadow" x="-50%" y="-50%" width="200%" height="200%"><feDropShadow dx="0" dy="25" stdDeviation="20" flood-opacity="0.7"/><feDropShadow dx="0" dy="10" stdDeviation="10" flood-opacity="0.5"/></filter>"#,
        );
    }
    if chart.perspective {
        out.push_str(r#"<filter id="blur"><feGaussianBlur stdDeviation="10"/></filter>"#);
    }
    out.push_str("</defs>");
}

fn write_slices(out: &mut String, chart: &ChartSpec) {
    let center = (f64::from(CANVAS_WIDTH) / 2.0, f64::from(CHART_HEIGHT) / 2.0);
    let total: f64 = chart.slices.iter().map(|slice| slice.value).sum();
    if total <= 0.0 {
        return;
    }

    let count = chart.slices.iter().filter(|slice| slice.value > 0.0).count() as f64;
    let span = (chart.end_angle - chart.start_angle).abs();
    let available = (span - count * chart.padding_angle).max(0.0);

    let mut angle = chart.start_angle;
    for (index, slice) in chart.slices.iter().enumerate() {
        let sweep = available * slice.value / total;
        let (from, to) = (angle, angle + sweep);

        let _ = write!(
            out,
            r#"<path d="{}" fill="{}" stroke="{}" stroke-width="{}" fill-rule="evenodd"/>"#,
            sector_path(center, chart.outer_radius, chart.inner_radius, from, to),
            escape(&slice.fill),
            slice.stroke,
            slice.stroke_width
        );

        if let Some(font_size) = chart.labels.font_size(index) {
            write_label(out, center, chart.outer_radius, (from + to) / 2.0, slice.name, font_size);
        }

        angle = to + chart.padding_angle;
    }
}

fn write_label(
    out: &mut String,
    center: (f64, f64),
    radius: f64,
    angle: f64,
    name: &str,
    font_size: u8,
) {
    let (edge_x, edge_y) = polar(center, radius, angle);
    let (x, y) = polar(center, radius + LABEL_OFFSET, angle);
    let anchor = if x >= center.0 { "start" } else { "end" };
    let _ = write!(
        out,
        r##"<line x1="{edge_x:.2}" y1="{edge_y:.2}" x2="{x:.2}" y2="{y:.2}" stroke="#999"/><text x="{x:.2}" y="{y:.2}" text-anchor="{anchor}" dominant-baseline="central" font-size="{font_size}" fill="black">{}</text>"##,
        escape(name)
    );
}

fn write_legend(out: &mut String, chart: &ChartSpec) {
    let column_width = CANVAS_WIDTH / LEGEND_COLUMNS as u32;
    let legend_font = match &chart.labels {
        LabelStyle::Uniform { font_size } => (*font_size).min(12),
        _ => 11,
    };
    for (index, slice) in chart.slices.iter().enumerate() {
        let column = (index % LEGEND_COLUMNS) as u32;
        let row = (index / LEGEND_COLUMNS) as u32;
        let x = column * column_width + 8;
        let y = CHART_HEIGHT + row * LEGEND_ROW_HEIGHT + 4;
        let _ = write!(
            out,
            r##"<rect x="{x}" y="{y}" width="10" height="10" fill="{}"/><text x="{}" y="{}" font-size="{legend_font}" fill="#333">{}</text>"##,
            escape(&slice.fill),
            x + 14,
            y + 9,
            escape(slice.name)
        );
    }
}

fn polar(center: (f64, f64), radius: f64, degrees: f64) -> (f64, f64) {
    let radians = degrees * PI / 180.0;
    (
        center.0 + radius * radians.cos(),
        center.1 - radius * radians.sin(),
    )
}

/// Counter-clockwise sector between `from` and `to` degrees. Full turns are drawn as two
/// half arcs since a single arc cannot close on itself.
fn sector_path(center: (f64, f64), outer: f64, inner: f64, from: f64, to: f64) -> String {
    let sweep = to - from;
    let mut path = String::new();

    if sweep >= 359.999 {
        let (ax, ay) = polar(center, outer, from);
        let (bx, by) = polar(center, outer, from + 180.0);
        let _ = write!(
            path,
            "M{ax:.2} {ay:.2}A{outer} {outer} 0 0 0 {bx:.2} {by:.2}A{outer} {outer} 0 0 0 {ax:.2} {ay:.2}Z"
        );
        if inner > 0.0 {
            let (cx, cy) = polar(center, inner, from);
            let (dx, dy) = polar(center, inner, from + 180.0);
            let _ = write!(
                path,
                "M{cx:.2} {cy:.2}A{inner} {inner} 0 0 1 {dx:.2} {dy:.2}A{inner} {inner} 0 0 1 {cx:.2} {cy:.2}Z"
            );
        }
        return path;
    }

    let large_arc = u8::from(sweep > 180.0);
    let (ax, ay) = polar(center, outer, from);
    let (bx, by) = polar(center, outer, to);

    if inner > 0.0 {
        let (cx, cy) = polar(center, inner, to);
        let (dx, dy) = polar(center, inner, from);
        let _ = write!(
            path,
            "M{ax:.2} {ay:.2}A{outer} {outer} 0 {large_arc} 0 {bx:.2} {by:.2}L{cx:.2} {cy:.2}A{inner} {inner} 0 {large_arc} 1 {dx:.2} {dy:.2}Z"
        );
    } else {
        let _ = write!(
            path,
            "M{:.2} {:.2}L{ax:.2} {ay:.2}A{outer} {outer} 0 {large_arc} 0 {bx:.2} {by:.2}Z",
            center.0, center.1
        );
    }
    path
}

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::domain::OptionSet;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn chart_for(options: &OptionSet) -> ChartSpec {
        let mut rng = StdRng::seed_from_u64(11);
        ChartSpec::build(options, &mut rng)
    }

    #[test]
    fn renders_one_sector_per_slice_at_double_scale() {
        let svg = render_svg(&chart_for(&OptionSet::default()), 2, "#ffffff");

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(r#"width="800""#));
        assert!(svg.contains(r##"fill="#ffffff""##));
        assert_eq!(svg.matches("<path").count(), 5);
        assert!(svg.contains("Alpha Corp"));
    }

    #[test]
    fn hidden_labels_drop_text_and_legend() {
        let svg = render_svg(
            &chart_for(&OptionSet {
                hide_labels: true,
                ..OptionSet::default()
            }),
            1,
            "#ffffff",
        );
        assert!(!svg.contains("<text"));
    }

    #[test]
    fn decorations_emit_their_defs() {
        let svg = render_svg(
            &chart_for(&OptionSet {
                shadow: true,
                three_d: true,
                background: BackgroundPattern::Houndstooth,
                text_description: true,
                ..OptionSet::default()
            }),
            1,
            "#ffffff",
        );
        assert!(svg.contains("url(#bg-houndstooth)"));
        assert!(svg.contains("feDropShadow"));
        assert!(svg.contains("skewX"));
        assert!(svg.contains("market share distribution"));
    }

    #[test]
    fn single_slice_draws_a_full_disc() {
        let mut chart = chart_for(&OptionSet::default());
        chart.slices.truncate(1);
        let path = sector_path((200.0, 175.0), 110.0, 0.0, 90.0, 450.0);
        assert_eq!(path.matches('A').count(), 2);
        assert_eq!(render_svg(&chart, 1, "#fff").matches("<path").count(), 1);
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }
}
