use super::scale::TimeScale;
use super::types::*;
use crate::config::LayoutConfig;
use crate::model::{Date, year_start, ymd};
use crate::state::ClickTarget;
use crate::theme::Theme;

const BACK_LABEL: &str = "Back to all years";
/// Vertical distance of the back button above the content top.
const BACK_BUTTON_RISE: f32 = 30.0;

pub(super) fn year_bands(
    scale: &TimeScale,
    theme: &Theme,
    config: &LayoutConfig,
    hits: &mut Vec<HitRegion>,
) -> Vec<YearBand> {
    let top = config.margin.top;
    config
        .domain_years()
        .enumerate()
        .map(|(idx, year)| {
            let x = scale.x(year_start(year));
            let width = scale.x(year_start(year + 1)) - x;
            let fill = if idx % 2 == 0 {
                &theme.year_band_even
            } else {
                &theme.year_band_odd
            };
            let rect = RectShape::new(x, top - config.header_height, width, config.header_height, fill);
            let label_x = ymd(year, 7, 1).map_or(x + width / 2.0, |mid| scale.x(mid));
            let label = TextShape::new(
                label_x,
                top - config.header_height / 2.0,
                year.to_string(),
                config.font_sizes.year,
                &theme.year_label_color,
            )
            .centered()
            .middle()
            .bold(true);
            hits.push(HitRegion::from_rect(&rect, ClickTarget::Year(year)));
            YearBand { year, rect, label }
        })
        .collect()
}

pub(super) fn back_button(
    theme: &Theme,
    config: &LayoutConfig,
    hits: &mut Vec<HitRegion>,
) -> ButtonLayout {
    let x = config.margin_left();
    let y = config.margin.top - BACK_BUTTON_RISE;
    let rect = RectShape::new(
        x,
        y,
        config.back_button_width,
        config.back_button_height,
        &theme.button_color,
    )
    .rounded(config.bar_corner_radius);
    let label = TextShape::new(
        x + config.back_button_width / 2.0,
        y + config.back_button_height / 2.0,
        BACK_LABEL,
        config.font_sizes.legend,
        &theme.button_text,
    )
    .centered()
    .middle();
    hits.push(HitRegion::from_rect(&rect, ClickTarget::Back));
    ButtonLayout { rect, label }
}

fn quarter_dates(year: i32, quarter: u32) -> Option<(Date, Date, Date)> {
    let first_month = (quarter - 1) * 3 + 1;
    let start = ymd(year, first_month, 1)?;
    // Bands stop on day 30 of the quarter's last month.
    let end = ymd(year, quarter * 3, 30)?;
    let middle = ymd(year, first_month + 1, 15)?;
    Some((start, end, middle))
}

/// Quarter bands, `Q1..Q4` labels and dashed gridlines for each visible year.
pub(super) fn quarters(
    years: &[i32],
    scale: &TimeScale,
    content_bottom: f32,
    theme: &Theme,
    config: &LayoutConfig,
) -> Vec<QuarterLayout> {
    let top = config.margin.top;
    let mut out = Vec::with_capacity(years.len() * 4);
    for &year in years {
        for quarter in 1..=4u32 {
            let Some((start, end, middle)) = quarter_dates(year, quarter) else {
                continue;
            };
            let x = scale.x(start);
            let fill = if quarter % 2 == 0 {
                &theme.quarter_band_even
            } else {
                &theme.quarter_band_odd
            };
            let mut band = RectShape::new(x, top, scale.x(end) - x, content_bottom - top, fill);
            band.opacity = theme.quarter_band_opacity;
            let label = TextShape::new(
                scale.x(middle),
                top - 5.0,
                format!("Q{quarter}"),
                config.font_sizes.quarter,
                &theme.text_color,
            )
            .centered();
            let gridline = LineShape {
                x1: x,
                y1: top,
                x2: x,
                y2: content_bottom,
                stroke: Stroke {
                    color: theme.gridline_color.clone(),
                    width: 1.0,
                    dasharray: Some("3,3".to_string()),
                },
            };
            out.push(QuarterLayout {
                year,
                quarter,
                band,
                label,
                gridline,
            });
        }
    }
    out
}
