use crate::layout::{
    CircleShape, Layout, LineShape, RectShape, Stroke, TextAnchor, TextBaseline, TextShape,
};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

#[cfg(feature = "png")]
use crate::config::RenderConfig;

/// Serializes the geometry in paint order: header, quarter bands and labels,
/// gridlines, rows, legend.
pub fn render_svg(layout: &Layout, theme: &Theme) -> String {
    let mut svg = String::new();
    let width = layout.width;
    let height = layout.height;

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\" font-family=\"{}\">",
        escape_xml(&theme.font_family)
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        escape_xml(&theme.background)
    ));

    for band in &layout.year_bands {
        svg.push_str(&format!("<g class=\"year-band\" data-year=\"{}\">", band.year));
        svg.push_str(&rect_svg(&band.rect));
        svg.push_str(&text_svg(&band.label));
        svg.push_str("</g>");
    }
    if let Some(button) = &layout.back_button {
        svg.push_str("<g class=\"back-button\">");
        svg.push_str(&rect_svg(&button.rect));
        svg.push_str(&text_svg(&button.label));
        svg.push_str("</g>");
    }

    for quarter in &layout.quarters {
        svg.push_str(&rect_svg(&quarter.band));
    }
    for quarter in &layout.quarters {
        svg.push_str(&text_svg(&quarter.label));
    }
    for quarter in &layout.quarters {
        svg.push_str(&line_svg(&quarter.gridline));
    }

    for group in &layout.groups {
        svg.push_str(&rect_svg(&group.column));
        svg.push_str(&text_svg(&group.label));
        for category in &group.categories {
            svg.push_str(&rect_svg(&category.column));
            svg.push_str(&text_svg(&category.label));
            for task in &category.tasks {
                svg.push_str(&rect_svg(&task.name_background));
                svg.push_str(&text_svg(&task.label));
                for segment in &task.segments {
                    svg.push_str(&rect_svg(&segment.rect));
                }
                for milestone in &task.milestones {
                    svg.push_str(&circle_svg(&milestone.marker));
                    if let Some(label) = &milestone.label {
                        svg.push_str(&text_svg(label));
                    }
                }
            }
        }
    }

    svg.push_str(&text_svg(&layout.legend.header));
    for entry in &layout.legend.entries {
        svg.push_str(&format!(
            "<g class=\"legend-entry\" data-phase=\"{}\">",
            entry.phase.name()
        ));
        svg.push_str(&rect_svg(&entry.rect));
        svg.push_str(&text_svg(&entry.label));
        if let Some(check) = &entry.check {
            svg.push_str(&text_svg(check));
        }
        svg.push_str("</g>");
    }
    for text in &layout.legend.status {
        svg.push_str(&text_svg(text));
    }

    svg.push_str("</svg>");
    svg
}

fn stroke_attrs(stroke: &Option<Stroke>) -> String {
    let Some(stroke) = stroke else {
        return String::new();
    };
    let mut attrs = format!(
        " stroke=\"{}\" stroke-width=\"{}\"",
        escape_xml(&stroke.color),
        stroke.width
    );
    if let Some(dash) = &stroke.dasharray {
        attrs.push_str(&format!(" stroke-dasharray=\"{}\"", escape_xml(dash)));
    }
    attrs
}

fn rect_svg(rect: &RectShape) -> String {
    let mut out = format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\"",
        rect.x,
        rect.y,
        rect.width.max(0.0),
        rect.height.max(0.0),
        escape_xml(&rect.fill)
    );
    if rect.corner_radius > 0.0 {
        out.push_str(&format!(
            " rx=\"{r}\" ry=\"{r}\"",
            r = rect.corner_radius
        ));
    }
    if rect.opacity < 1.0 {
        out.push_str(&format!(" opacity=\"{}\"", rect.opacity));
    }
    out.push_str(&stroke_attrs(&rect.stroke));
    out.push_str("/>");
    out
}

fn line_svg(line: &LineShape) -> String {
    format!(
        "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\"{}/>",
        line.x1,
        line.y1,
        line.x2,
        line.y2,
        stroke_attrs(&Some(line.stroke.clone()))
    )
}

fn circle_svg(circle: &CircleShape) -> String {
    format!(
        "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{}\" fill=\"{}\"/>",
        circle.cx,
        circle.cy,
        circle.r,
        escape_xml(&circle.fill)
    )
}

fn text_svg(text: &TextShape) -> String {
    let x = text.x;
    let lines = text.lines.len().max(1) as f32;
    let start_y = match text.baseline {
        TextBaseline::Alphabetic => text.y,
        TextBaseline::Middle => text.y - (lines - 1.0) * text.line_height / 2.0,
    };
    let anchor = match text.anchor {
        TextAnchor::Start => "start",
        TextAnchor::Middle => "middle",
    };
    let mut out = format!(
        "<text x=\"{x:.2}\" y=\"{start_y:.2}\" text-anchor=\"{anchor}\" font-size=\"{}\" fill=\"{}\"",
        text.font_size,
        escape_xml(&text.fill)
    );
    if text.baseline == TextBaseline::Middle {
        out.push_str(" dominant-baseline=\"middle\"");
    }
    if text.bold {
        out.push_str(" font-weight=\"bold\"");
    }
    if let Some(angle) = text.rotate {
        out.push_str(&format!(
            " transform=\"rotate({angle} {x:.2} {:.2})\"",
            text.y
        ));
    }
    out.push('>');

    if text.lines.len() <= 1 {
        out.push_str(&escape_xml(&text.text()));
    } else {
        for (idx, line) in text.lines.iter().enumerate() {
            let dy = if idx == 0 { 0.0 } else { text.line_height };
            out.push_str(&format!(
                "<tspan x=\"{x:.2}\" dy=\"{dy:.2}\">{}</tspan>",
                escape_xml(line)
            ));
        }
    }
    out.push_str("</text>");
    out
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig, theme: &Theme) -> Result<()> {
    let mut opt = usvg::Options::default();
    if let Some(first) = theme.font_family.split(',').next() {
        opt.font_family = first.trim().trim_matches('"').to_string();
    }
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .ok_or_else(|| anyhow::anyhow!("Invalid render size"))?;
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::layout::compute_layout;
    use crate::loader::parse_dataset;
    use crate::model::Phase;
    use crate::state::InteractionState;
    use crate::text_metrics::HeuristicMetrics;

    fn render(state: InteractionState) -> String {
        let dataset = parse_dataset(
            r#"[{"type":"customer","name":"BTDT - All","tasks":[
                {"name":"BTDT: Serving Health & Welfare","start":"2025-07","end":"2025-12","phases":["Strategy","Plan"],
                 "milestones":[{"date":"2025-10","label":"Go <Live>"}]}
            ]}]"#,
        )
        .unwrap();
        let theme = Theme::classic();
        let layout = compute_layout(&dataset, &state, &theme, &LayoutConfig::default(), &HeuristicMetrics);
        render_svg(&layout, &theme)
    }

    #[test]
    fn render_svg_basic() {
        let svg = render(InteractionState::new());
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("Health &amp; Welfare"));
        assert!(svg.contains("Go &lt;Live&gt;"));
        assert!(svg.contains("data-year=\"2028\""));
        assert!(svg.contains("stroke-dasharray=\"3,3\""));
        assert!(svg.contains("fill=\"#d8bfd8\""));
        assert!(svg.contains("<circle"));
        assert!(svg.contains("rotate(-90"));
    }

    #[test]
    fn year_view_renders_back_button() {
        let svg = render(InteractionState::new().with_year(Some(2025)));
        assert!(svg.contains("Back to all years"));
        assert!(!svg.contains("data-year"));
    }

    #[test]
    fn phase_filter_drops_other_segments() {
        let svg = render(InteractionState::new().with_phase(Some(Phase::Plan)));
        assert!(svg.contains("fill=\"#ffa500\""));
        // Strategy's color still appears once, in the legend.
        assert_eq!(svg.matches("fill=\"#d8bfd8\"").count(), 1);
        assert!(svg.contains("✓"));
    }

    #[test]
    fn multi_line_text_uses_tspans() {
        let mut text = TextShape::new(10.0, 50.0, "", 12.0, "white").middle();
        text.lines = vec!["one".to_string(), "two".to_string()];
        text.line_height = 13.2;
        let out = text_svg(&text);
        assert!(out.contains("y=\"43.40\""));
        assert_eq!(out.matches("<tspan").count(), 2);
    }

    #[test]
    fn theme_colors_are_escaped_in_attributes() {
        let dataset = parse_dataset(
            r#"[{"type":"customer","name":"CLM","tasks":[
                {"name":"CLM Global Design","start":"2025-01","end":"2025-06","phases":["Plan"],
                 "milestones":[{"date":"2025-03"}]}
            ]}]"#,
        )
        .unwrap();
        let mut theme = Theme::classic();
        theme.background = "#fff\" onload=\"x".to_string();
        theme.column_color = "red\"/><script/>".to_string();
        theme.text_color = "a&b".to_string();
        let layout = compute_layout(
            &dataset,
            &InteractionState::new(),
            &theme,
            &LayoutConfig::default(),
            &HeuristicMetrics,
        );
        let svg = render_svg(&layout, &theme);
        assert!(!svg.contains("onload=\""));
        assert!(!svg.contains("<script"));
        assert!(svg.contains("fill=\"#fff&quot; onload=&quot;x\""));
        assert!(!svg.contains("a&b"));

        let stroke = stroke_attrs(&Some(Stroke {
            color: "#ccc\"".to_string(),
            width: 1.0,
            dasharray: Some("3,3\"".to_string()),
        }));
        assert_eq!(
            stroke,
            " stroke=\"#ccc&quot;\" stroke-width=\"1\" stroke-dasharray=\"3,3&quot;\""
        );
    }

    #[cfg(feature = "png")]
    #[test]
    fn png_export_ignores_unparseable_background() {
        let svg = render(InteractionState::new());
        let render_cfg = RenderConfig {
            background: "#1\u{e9}234".to_string(),
            ..RenderConfig::default()
        };
        let path = std::env::temp_dir().join(format!("tlr-render-{}.png", std::process::id()));
        write_output_png(&svg, &path, &render_cfg, &Theme::classic()).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert!(bytes.starts_with(b"\x89PNG"));
    }
}
