mod axis;
mod filter;
mod legend;
mod rows;
mod scale;
mod text;
pub(crate) mod types;

pub use filter::filter_by_year;
pub use rows::phase_segments;
pub use scale::{TimeScale, view_domain};
pub use types::*;

use crate::config::LayoutConfig;
use crate::model::Dataset;
use crate::state::InteractionState;
use crate::text_metrics::TextMeasure;
use crate::theme::Theme;

/// Computes the full chart geometry for one state.
///
/// The dataset is narrowed to the selected year, the time scale is rebuilt
/// over the matching domain, and every primitive is placed from scratch; the
/// result depends only on the arguments.
pub fn compute_layout<M: TextMeasure + ?Sized>(
    dataset: &Dataset,
    state: &InteractionState,
    theme: &Theme,
    config: &LayoutConfig,
    measurer: &M,
) -> Layout {
    let filtered = filter_by_year(dataset, state.selected_year);
    let scale = TimeScale::for_view(state.selected_year, config);
    let (domain_start, domain_end) = scale.domain();

    let content_y = config.margin.top;
    let content_height = rows::content_height(&filtered, config);
    let height = (content_y + content_height + config.margin.bottom)
        .max(content_y + config.min_content_height);
    let width = config.total_width();
    let content_bottom = height - config.margin.bottom;

    let mut hit_regions = Vec::new();
    let (year_bands, back_button) = match state.selected_year {
        None => (
            axis::year_bands(&scale, theme, config, &mut hit_regions),
            None,
        ),
        Some(_) => (
            Vec::new(),
            Some(axis::back_button(theme, config, &mut hit_regions)),
        ),
    };
    let visible_years: Vec<i32> = match state.selected_year {
        Some(year) => vec![year],
        None => config.domain_years().collect(),
    };
    let quarters = axis::quarters(&visible_years, &scale, content_bottom, theme, config);
    let groups = rows::plan_groups(&filtered, state, &scale, theme, config, measurer);
    let legend = legend::legend(state, theme, config, &mut hit_regions);

    tracing::debug!(
        year = ?state.selected_year,
        phase = ?state.selected_phase,
        tasks = filtered.task_count(),
        width,
        height,
        "timeline layout computed"
    );

    Layout {
        state: *state,
        width,
        height,
        domain_start,
        domain_end,
        chart_x: config.margin_left(),
        chart_width: config.width,
        content_y,
        content_height,
        year_bands,
        back_button,
        quarters,
        groups,
        legend,
        hit_regions,
    }
}
