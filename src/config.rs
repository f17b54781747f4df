use crate::model::Phase;
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 50.0,
            right: 200.0,
            bottom: 150.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FontSizes {
    pub year: f32,
    pub group: f32,
    pub category: f32,
    pub task: f32,
    pub quarter: f32,
    pub milestone: f32,
    pub legend: f32,
    pub legend_check: f32,
    pub status_symbol: f32,
    pub status_label: f32,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            year: 14.0,
            group: 14.0,
            category: 12.0,
            task: 11.0,
            quarter: 10.0,
            milestone: 8.0,
            legend: 12.0,
            legend_check: 14.0,
            status_symbol: 16.0,
            status_label: 11.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Width of the time axis in pixels.
    pub width: f32,
    pub header_height: f32,
    pub bar_height: f32,
    pub task_spacing: f32,
    pub task_name_width: f32,
    pub left_column_width: f32,
    pub name_column_width: f32,
    pub margin: Margins,
    pub min_content_height: f32,
    pub domain_start_year: i32,
    /// Exclusive.
    pub domain_end_year: i32,
    pub milestone_radius: f32,
    pub milestone_label_offset: f32,
    pub category_wrap_chars: usize,
    pub category_wrap_padding: f32,
    pub task_label_padding: f32,
    pub truncate_trigger: f32,
    pub truncate_fit: f32,
    pub min_truncated_chars: usize,
    pub legend_offset_x: f32,
    pub legend_entry_width: f32,
    pub legend_entry_height: f32,
    pub legend_entry_spacing: f32,
    pub back_button_width: f32,
    pub back_button_height: f32,
    pub bar_corner_radius: f32,
    pub font_sizes: FontSizes,
    /// In em.
    pub label_line_height: f32,
    pub fast_text_metrics: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            header_height: 40.0,
            bar_height: 20.0,
            task_spacing: 5.0,
            task_name_width: 200.0,
            left_column_width: 70.0,
            name_column_width: 130.0,
            margin: Margins::default(),
            min_content_height: 400.0,
            domain_start_year: 2025,
            domain_end_year: 2029,
            milestone_radius: 5.0,
            milestone_label_offset: 12.0,
            category_wrap_chars: 20,
            category_wrap_padding: 10.0,
            task_label_padding: 5.0,
            truncate_trigger: 10.0,
            truncate_fit: 15.0,
            min_truncated_chars: 3,
            legend_offset_x: 20.0,
            legend_entry_width: 120.0,
            legend_entry_height: 20.0,
            legend_entry_spacing: 25.0,
            back_button_width: 120.0,
            back_button_height: 20.0,
            bar_corner_radius: 3.0,
            font_sizes: FontSizes::default(),
            label_line_height: 1.1,
            fast_text_metrics: false,
        }
    }
}

impl LayoutConfig {
    pub fn row_height(&self) -> f32 {
        self.bar_height + self.task_spacing
    }

    /// The three label columns sit left of the time axis.
    pub fn margin_left(&self) -> f32 {
        self.left_column_width + self.name_column_width + self.task_name_width
    }

    pub fn total_width(&self) -> f32 {
        self.width + self.margin_left() + self.margin.right
    }

    /// Years covered by the unfiltered view, in order.
    pub fn domain_years(&self) -> impl Iterator<Item = i32> {
        self.domain_start_year..self.domain_end_year.max(self.domain_start_year + 1)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1600.0,
            height: 900.0,
            background: "#FFFFFF".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        let theme = Theme::classic();
        let render = RenderConfig {
            background: theme.background.clone(),
            ..Default::default()
        };
        Self {
            theme,
            layout: LayoutConfig::default(),
            render,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    text_color: Option<String>,
    background: Option<String>,
    phase_colors: Option<BTreeMap<Phase, String>>,
    fallback_phase_color: Option<String>,
    column_color: Option<String>,
    column_border: Option<String>,
    column_text: Option<String>,
    year_band_even: Option<String>,
    year_band_odd: Option<String>,
    quarter_band_odd: Option<String>,
    quarter_band_even: Option<String>,
    gridline_color: Option<String>,
    bar_stroke: Option<String>,
    milestone_color: Option<String>,
    button_color: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    layout: Option<LayoutConfig>,
    render: Option<RenderSection>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenderSection {
    width: Option<f32>,
    height: Option<f32>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = serde_json::from_str(&contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        match Theme::by_name(theme_name) {
            Some(theme) => config.theme = theme,
            None => tracing::warn!(theme = theme_name, "unknown theme, keeping default"),
        }
    }

    if let Some(vars) = parsed.theme_variables {
        apply_theme_variables(&mut config.theme, vars);
    }

    if let Some(layout) = parsed.layout {
        config.layout = layout;
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.width {
            config.render.width = v;
        }
        if let Some(v) = render.height {
            config.render.height = v;
        }
    }

    config.render.background = config.theme.background.clone();

    Ok(config)
}

fn apply_theme_variables(theme: &mut Theme, vars: ThemeVariables) {
    if let Some(v) = vars.font_family {
        theme.font_family = v;
    }
    if let Some(v) = vars.text_color {
        theme.text_color = v;
    }
    if let Some(v) = vars.background {
        theme.background = v;
    }
    if let Some(colors) = vars.phase_colors {
        theme.phase_colors.extend(colors);
    }
    if let Some(v) = vars.fallback_phase_color {
        theme.fallback_phase_color = v;
    }
    if let Some(v) = vars.column_color {
        theme.column_color = v;
    }
    if let Some(v) = vars.column_border {
        theme.column_border = v;
    }
    if let Some(v) = vars.column_text {
        theme.column_text = v;
    }
    if let Some(v) = vars.year_band_even {
        theme.year_band_even = v;
    }
    if let Some(v) = vars.year_band_odd {
        theme.year_band_odd = v;
    }
    if let Some(v) = vars.quarter_band_odd {
        theme.quarter_band_odd = v;
    }
    if let Some(v) = vars.quarter_band_even {
        theme.quarter_band_even = v;
    }
    if let Some(v) = vars.gridline_color {
        theme.gridline_color = v;
    }
    if let Some(v) = vars.bar_stroke {
        theme.bar_stroke = v;
    }
    if let Some(v) = vars.milestone_color {
        theme.milestone_color = v;
    }
    if let Some(v) = vars.button_color {
        theme.button_color = v;
    }
}
