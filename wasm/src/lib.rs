use serde::Deserialize;
use timeline_rs_renderer::text_metrics::HeuristicMetrics;
use timeline_rs_renderer::{InteractionState, LayoutConfig, Phase, Theme, parse_dataset};
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimelineRenderOptions {
    theme: Option<String>,
    font_family: Option<String>,
    year: Option<i32>,
    phase: Option<String>,
}

fn build_theme(options: &TimelineRenderOptions) -> Theme {
    let mut theme = options
        .theme
        .as_deref()
        .and_then(Theme::by_name)
        .unwrap_or_else(Theme::classic);
    if let Some(font_family) = &options.font_family {
        theme.font_family = font_family.clone();
    }
    theme
}

fn build_state(options: &TimelineRenderOptions) -> Result<InteractionState, String> {
    let phase = match options.phase.as_deref() {
        Some(name) => Some(Phase::from_name(name).ok_or_else(|| format!("unknown phase '{name}'"))?),
        None => None,
    };
    Ok(InteractionState::new().with_year(options.year).with_phase(phase))
}

fn parse_options(options_json: Option<String>) -> Result<TimelineRenderOptions, String> {
    match options_json {
        Some(raw) => serde_json::from_str(&raw).map_err(|error| error.to_string()),
        None => Ok(TimelineRenderOptions::default()),
    }
}

/// Interactive chart for the browser host: it owns the state and answers clicks.
///
/// Browsers have no system font database, so widths come from the heuristic.
#[wasm_bindgen]
pub struct TimelineView {
    inner: timeline_rs_renderer::TimelineView<HeuristicMetrics>,
}

#[wasm_bindgen]
impl TimelineView {
    #[wasm_bindgen(constructor)]
    pub fn new(data: &str, options_json: Option<String>) -> Result<TimelineView, JsValue> {
        let options = parse_options(options_json).map_err(|error| JsValue::from_str(&error))?;
        let state = build_state(&options).map_err(|error| JsValue::from_str(&error))?;
        let dataset = parse_dataset(data).map_err(|error| JsValue::from_str(&error.to_string()))?;
        let mut inner = timeline_rs_renderer::TimelineView::with_measurer(
            dataset,
            build_theme(&options),
            LayoutConfig::default(),
            HeuristicMetrics,
        );
        inner.set_state(state);
        Ok(Self { inner })
    }

    pub fn render(&self) -> String {
        self.inner.render_svg()
    }

    /// Returns true when the click changed the view and `render` should be called again.
    pub fn click(&mut self, x: f32, y: f32) -> bool {
        self.inner.click(x, y)
    }

    #[wasm_bindgen(js_name = selectedYear)]
    pub fn selected_year(&self) -> Option<i32> {
        self.inner.state().selected_year
    }

    #[wasm_bindgen(js_name = selectedPhase)]
    pub fn selected_phase(&self) -> Option<String> {
        self.inner.state().selected_phase.map(|phase| phase.name().to_string())
    }
}

#[wasm_bindgen]
pub fn render_timeline_svg(data: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = parse_options(options_json).map_err(|error| JsValue::from_str(&error))?;
    let state = build_state(&options).map_err(|error| JsValue::from_str(&error))?;
    let mut render_options = timeline_rs_renderer::RenderOptions::classic().with_state(state);
    render_options.theme = build_theme(&options);
    render_options.layout.fast_text_metrics = true;
    timeline_rs_renderer::render_with_options(data, render_options)
        .map_err(|error| JsValue::from_str(&error.to_string()))
}
