#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod layout;
pub mod layout_dump;
pub mod loader;
pub mod model;
pub mod render;
pub mod state;
pub mod text_metrics;
pub mod theme;
pub mod view;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, RenderConfig, load_config};
pub use error::DataValidationError;
pub use layout::{Layout, compute_layout, filter_by_year};
pub use loader::{load_dataset, parse_dataset};
pub use model::{Category, Dataset, Group, GroupKind, Milestone, Phase, Task};
pub use render::render_svg;
pub use state::{ClickTarget, InteractionState};
pub use theme::Theme;
pub use view::TimelineView;

use text_metrics::SystemMetrics;

/// Everything a one-shot render needs besides the data.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub state: InteractionState,
}

impl RenderOptions {
    pub fn classic() -> Self {
        Self::default()
    }

    pub fn modern() -> Self {
        Self {
            theme: Theme::modern(),
            ..Self::default()
        }
    }

    pub fn with_state(mut self, state: InteractionState) -> Self {
        self.state = state;
        self
    }
}

/// Parses timeline data and renders it to an SVG string in one call.
pub fn render_with_options(
    source: &str,
    options: RenderOptions,
) -> Result<String, DataValidationError> {
    let dataset = parse_dataset(source)?;
    let measurer = SystemMetrics::new(options.layout.fast_text_metrics);
    let layout = compute_layout(
        &dataset,
        &options.state,
        &options.theme,
        &options.layout,
        &measurer,
    );
    Ok(render_svg(&layout, &options.theme))
}

pub fn render(source: &str) -> Result<String, DataValidationError> {
    render_with_options(source, RenderOptions::default())
}
