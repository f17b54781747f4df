use crate::config::LayoutConfig;
use crate::layout::{Layout, compute_layout};
use crate::model::Dataset;
use crate::render::render_svg;
use crate::state::{ClickTarget, InteractionState};
use crate::text_metrics::{SystemMetrics, TextMeasure};
use crate::theme::Theme;

/// A chart bound to one dataset whose only mutable part is the interaction state.
///
/// Every state change recomputes the whole layout; nothing is patched in place.
pub struct TimelineView<M: TextMeasure = SystemMetrics> {
    dataset: Dataset,
    theme: Theme,
    config: LayoutConfig,
    measurer: M,
    state: InteractionState,
    layout: Layout,
}

impl TimelineView<SystemMetrics> {
    pub fn new(dataset: Dataset, theme: Theme, config: LayoutConfig) -> Self {
        let measurer = SystemMetrics::new(config.fast_text_metrics);
        Self::with_measurer(dataset, theme, config, measurer)
    }
}

impl<M: TextMeasure> TimelineView<M> {
    pub fn with_measurer(dataset: Dataset, theme: Theme, config: LayoutConfig, measurer: M) -> Self {
        let state = InteractionState::new();
        let layout = compute_layout(&dataset, &state, &theme, &config, &measurer);
        Self {
            dataset,
            theme,
            config,
            measurer,
            state,
            layout,
        }
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Replaces the state and redraws. Returns whether anything changed.
    pub fn set_state(&mut self, state: InteractionState) -> bool {
        if state == self.state {
            return false;
        }
        self.state = state;
        self.layout = compute_layout(
            &self.dataset,
            &self.state,
            &self.theme,
            &self.config,
            &self.measurer,
        );
        true
    }

    pub fn apply(&mut self, target: ClickTarget) -> bool {
        self.set_state(self.state.apply(target))
    }

    /// Routes a pointer click through the current layout's hit regions.
    pub fn click(&mut self, x: f32, y: f32) -> bool {
        match self.layout.hit_test(x, y) {
            Some(target) => {
                tracing::debug!(?target, "click");
                self.apply(target)
            }
            None => false,
        }
    }

    pub fn render_svg(&self) -> String {
        render_svg(&self.layout, &self.theme)
    }
}
