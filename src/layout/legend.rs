use super::types::*;
use crate::config::LayoutConfig;
use crate::model::Phase;
use crate::state::{ClickTarget, InteractionState};
use crate::theme::Theme;

const DEPLOYMENT_STATUSES: [(&str, &str); 5] = [
    ("●", "Kick Off Ready"),
    ("◆", "Deployment Ready"),
    ("■", "Deployment Complete"),
    ("★", "Activation Complete"),
    ("◯", "Other"),
];

const COMMITMENTS: [(&str, &str); 2] = [("●", "Committed"), ("○", "Non Committed")];

/// Phase legend to the right of the time axis, followed by the static status key.
pub(super) fn legend(
    state: &InteractionState,
    theme: &Theme,
    config: &LayoutConfig,
    hits: &mut Vec<HitRegion>,
) -> LegendLayout {
    let x = config.width + config.margin_left() + config.legend_offset_x;
    let top = config.margin.top;
    let sizes = &config.font_sizes;

    let header = TextShape::new(x, top - 10.0, "Phases", sizes.legend, &theme.text_color).bold(true);

    let entries = Phase::ALL
        .iter()
        .enumerate()
        .map(|(idx, phase)| {
            let selected = state.selected_phase == Some(*phase);
            let y = top + idx as f32 * config.legend_entry_spacing;
            let stroke = if selected {
                Stroke::solid(&theme.legend_selected_stroke, 2.0)
            } else {
                Stroke::solid(&theme.legend_stroke, 0.5)
            };
            let rect = RectShape::new(
                x,
                y,
                config.legend_entry_width,
                config.legend_entry_height,
                theme.phase_color(*phase),
            )
            .with_stroke(stroke)
            .rounded(config.bar_corner_radius);
            let label = TextShape::new(
                x + config.legend_entry_width / 2.0,
                y + config.legend_entry_height / 2.0,
                phase.name(),
                sizes.legend,
                &theme.text_color,
            )
            .centered()
            .middle()
            .bold(selected);
            let check = selected.then(|| {
                TextShape::new(
                    x - 15.0,
                    y + config.legend_entry_height / 2.0,
                    "✓",
                    sizes.legend_check,
                    &theme.text_color,
                )
                .middle()
                .bold(true)
            });
            hits.push(HitRegion::from_rect(&rect, ClickTarget::Phase(*phase)));
            LegendEntry {
                phase: *phase,
                selected,
                rect,
                label,
                check,
            }
        })
        .collect();

    let status = status_key(x, top + Phase::ALL.len() as f32 * config.legend_entry_spacing + 30.0, theme, config);

    LegendLayout {
        header,
        entries,
        status,
    }
}

fn status_key(x: f32, top: f32, theme: &Theme, config: &LayoutConfig) -> Vec<TextShape> {
    let sizes = &config.font_sizes;
    let color = theme.text_color.as_str();
    let mut out = vec![
        TextShape::new(x, top, "Status to Watch", sizes.legend, color).bold(true),
        TextShape::new(x, top + 25.0, "Potential Market Start", sizes.status_label, color),
        TextShape::new(x - 15.0, top + 25.0, "+", sizes.legend_check, color).bold(true),
        TextShape::new(x, top + 50.0, "Market Deployment", sizes.status_label, color).bold(true),
    ];
    for (idx, (symbol, label)) in DEPLOYMENT_STATUSES.iter().enumerate() {
        let y = top + 75.0 + idx as f32 * 20.0;
        out.push(TextShape::new(x, y, *symbol, sizes.status_symbol, color));
        out.push(TextShape::new(x + 25.0, y, *label, sizes.status_label, color));
    }

    let commitment_top = top + 75.0 + DEPLOYMENT_STATUSES.len() as f32 * 20.0 + 20.0;
    out.push(TextShape::new(x, commitment_top, "Market Commitment", sizes.legend, color).bold(true));
    for (idx, (symbol, label)) in COMMITMENTS.iter().enumerate() {
        let y = commitment_top + 25.0 + idx as f32 * 20.0;
        out.push(TextShape::new(x, y, *symbol, sizes.status_symbol, color));
        out.push(TextShape::new(x + 25.0, y, *label, sizes.status_label, color));
    }
    out
}
