use crate::model::Phase;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub text_color: String,
    pub background: String,
    pub phase_colors: BTreeMap<Phase, String>,
    /// Used when `phase_colors` has no entry for a phase.
    pub fallback_phase_color: String,
    pub column_color: String,
    pub column_border: String,
    pub column_text: String,
    pub year_band_even: String,
    pub year_band_odd: String,
    pub year_label_color: String,
    pub quarter_band_odd: String,
    pub quarter_band_even: String,
    pub quarter_band_opacity: f32,
    pub gridline_color: String,
    pub task_label_background: String,
    pub task_label_border: String,
    pub bar_stroke: String,
    pub milestone_color: String,
    pub legend_stroke: String,
    pub legend_selected_stroke: String,
    pub button_color: String,
    pub button_text: String,
}

fn palette(entries: [(Phase, &str); 8]) -> BTreeMap<Phase, String> {
    entries
        .into_iter()
        .map(|(phase, color)| (phase, color.to_string()))
        .collect()
}

impl Theme {
    pub fn classic() -> Self {
        Self {
            font_family: "system-ui, -apple-system, \"Segoe UI\", Roboto, sans-serif".to_string(),
            text_color: "#000000".to_string(),
            background: "#FFFFFF".to_string(),
            phase_colors: palette([
                (Phase::Strategy, "#d8bfd8"),
                (Phase::Plan, "#ffa500"),
                (Phase::Discover, "#f0e68c"),
                (Phase::Develop, "#add8e6"),
                (Phase::Deploy, "#90ee90"),
                (Phase::Adopt, "#ffb6c1"),
                (Phase::Hypercare, "#c0c0c0"),
                (Phase::Other, "#e0e0e0"),
            ]),
            fallback_phase_color: "#cccccc".to_string(),
            column_color: "#3498db".to_string(),
            column_border: "#fff".to_string(),
            column_text: "white".to_string(),
            year_band_even: "#555".to_string(),
            year_band_odd: "#777".to_string(),
            year_label_color: "white".to_string(),
            quarter_band_odd: "#f0f0f0".to_string(),
            quarter_band_even: "#f9f9f9".to_string(),
            quarter_band_opacity: 0.5,
            gridline_color: "#ccc".to_string(),
            task_label_background: "white".to_string(),
            task_label_border: "#eee".to_string(),
            bar_stroke: "#888".to_string(),
            milestone_color: "#333".to_string(),
            legend_stroke: "#888".to_string(),
            legend_selected_stroke: "#000".to_string(),
            button_color: "#3498db".to_string(),
            button_text: "white".to_string(),
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            text_color: "#1C2430".to_string(),
            background: "#FFFFFF".to_string(),
            phase_colors: palette([
                (Phase::Strategy, "#c4b5fd"),
                (Phase::Plan, "#fdba74"),
                (Phase::Discover, "#fde68a"),
                (Phase::Develop, "#93c5fd"),
                (Phase::Deploy, "#86efac"),
                (Phase::Adopt, "#f9a8d4"),
                (Phase::Hypercare, "#cbd5e1"),
                (Phase::Other, "#e5e7eb"),
            ]),
            fallback_phase_color: "#d1d5db".to_string(),
            column_color: "#1e3a5f".to_string(),
            column_border: "#F8FAFF".to_string(),
            column_text: "#F8FAFF".to_string(),
            year_band_even: "#334155".to_string(),
            year_band_odd: "#475569".to_string(),
            year_label_color: "#F8FAFF".to_string(),
            quarter_band_odd: "#EEF2F8".to_string(),
            quarter_band_even: "#F7FAFF".to_string(),
            quarter_band_opacity: 0.6,
            gridline_color: "#C7D2E5".to_string(),
            task_label_background: "#FFFFFF".to_string(),
            task_label_border: "#E2E8F0".to_string(),
            bar_stroke: "#7A8AA6".to_string(),
            milestone_color: "#1C2430".to_string(),
            legend_stroke: "#7A8AA6".to_string(),
            legend_selected_stroke: "#1C2430".to_string(),
            button_color: "#2563eb".to_string(),
            button_text: "#FFFFFF".to_string(),
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "classic" | "default" => Some(Self::classic()),
            "modern" => Some(Self::modern()),
            _ => None,
        }
    }

    pub fn phase_color(&self, phase: Phase) -> &str {
        self.phase_colors
            .get(&phase)
            .map(String::as_str)
            .unwrap_or(self.fallback_phase_color.as_str())
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}
