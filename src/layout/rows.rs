use super::scale::TimeScale;
use super::text::{truncate_label, wrap_words};
use super::types::*;
use crate::config::LayoutConfig;
use crate::model::{Category, Dataset, GroupKind, Task, year_end, year_start};
use crate::state::InteractionState;
use crate::text_metrics::TextMeasure;
use crate::theme::Theme;

/// Content height of the dataset: one fixed-height row per task.
pub(super) fn content_height(dataset: &Dataset, config: &LayoutConfig) -> f32 {
    dataset.task_count() as f32 * config.row_height()
}

/// Splits `[x0, x1]` into `count` contiguous equal-width intervals.
pub fn phase_segments(x0: f32, x1: f32, count: usize) -> Vec<(f32, f32)> {
    if count == 0 {
        return Vec::new();
    }
    let width = (x1 - x0) / count as f32;
    (0..count)
        .map(|idx| (x0 + idx as f32 * width, width))
        .collect()
}

struct Planner<'a, M: ?Sized> {
    state: &'a InteractionState,
    scale: &'a TimeScale,
    theme: &'a Theme,
    config: &'a LayoutConfig,
    measurer: &'a M,
    y: f32,
    row: usize,
}

/// Stacks groups, categories and tasks top to bottom in a single pass.
pub(super) fn plan_groups<M: TextMeasure + ?Sized>(
    dataset: &Dataset,
    state: &InteractionState,
    scale: &TimeScale,
    theme: &Theme,
    config: &LayoutConfig,
    measurer: &M,
) -> Vec<GroupLayout> {
    let mut planner = Planner {
        state,
        scale,
        theme,
        config,
        measurer,
        y: config.margin.top,
        row: 0,
    };
    GroupKind::ALL
        .iter()
        .filter_map(|kind| {
            let categories: Vec<&Category> = dataset
                .categories_of(*kind)
                .filter(|category| !category.tasks.is_empty())
                .collect();
            (!categories.is_empty()).then(|| planner.group(*kind, &categories))
        })
        .collect()
}

impl<M: TextMeasure + ?Sized> Planner<'_, M> {
    fn group(&mut self, kind: GroupKind, categories: &[&Category]) -> GroupLayout {
        let config = self.config;
        let theme = self.theme;
        let top = self.y;
        let height = categories
            .iter()
            .map(|category| category.tasks.len() as f32 * config.row_height())
            .sum::<f32>();

        let column = RectShape::new(0.0, top, config.left_column_width, height, &theme.column_color)
            .with_stroke(Stroke::solid(&theme.column_border, 1.0));
        let mut label = TextShape::new(
            config.left_column_width / 2.0,
            top + height / 2.0,
            kind.label(),
            config.font_sizes.group,
            &theme.column_text,
        )
        .centered()
        .middle()
        .bold(true);
        label.rotate = Some(-90.0);

        let categories = categories
            .iter()
            .map(|category| self.category(category))
            .collect();
        GroupLayout {
            kind,
            column,
            label,
            categories,
        }
    }

    fn category(&mut self, category: &Category) -> CategoryLayout {
        let config = self.config;
        let theme = self.theme;
        let top = self.y;
        let height = category.tasks.len() as f32 * config.row_height();
        let font_size = config.font_sizes.category;

        let column = RectShape::new(
            config.left_column_width,
            top,
            config.name_column_width,
            height,
            &theme.column_color,
        )
        .with_stroke(Stroke::solid(&theme.column_border, 1.0));

        let lines = if category.name.chars().count() > config.category_wrap_chars {
            wrap_words(
                &category.name,
                config.name_column_width - config.category_wrap_padding,
                font_size,
                &theme.font_family,
                self.measurer,
            )
        } else {
            vec![category.name.clone()]
        };
        let mut label = TextShape::new(
            config.left_column_width + config.name_column_width / 2.0,
            top + height / 2.0,
            String::new(),
            font_size,
            &theme.column_text,
        )
        .centered()
        .middle()
        .bold(true);
        label.lines = lines;
        label.line_height = font_size * config.label_line_height;

        let tasks = category
            .tasks
            .iter()
            .map(|task| self.task(task))
            .collect();
        CategoryLayout {
            name: category.name.clone(),
            column,
            label,
            tasks,
        }
    }

    fn task(&mut self, task: &Task) -> TaskLayout {
        let config = self.config;
        let theme = self.theme;
        let scale = self.scale;
        let y = self.y;
        let row = self.row;
        self.y += config.row_height();
        self.row += 1;

        let (display_start, display_end) = match self.state.selected_year {
            Some(year) => (task.start.max(year_start(year)), task.end.min(year_end(year))),
            None => (task.start, task.end),
        };

        let name_x = config.left_column_width + config.name_column_width;
        let name_background = RectShape::new(
            name_x,
            y,
            config.task_name_width,
            config.bar_height,
            &theme.task_label_background,
        )
        .with_stroke(Stroke::solid(&theme.task_label_border, 1.0));
        let shown = truncate_label(
            &task.name,
            config.task_name_width,
            config.font_sizes.task,
            &theme.font_family,
            config,
            self.measurer,
        );
        let label = TextShape::new(
            name_x + config.task_label_padding,
            y + config.bar_height / 2.0,
            shown,
            config.font_sizes.task,
            &theme.text_color,
        )
        .middle();

        let bar_x = scale.x(display_start);
        let bar_width = scale.x(display_end) - bar_x;
        let segments = phase_segments(bar_x, bar_x + bar_width, task.phases.len())
            .into_iter()
            .zip(&task.phases)
            .enumerate()
            .filter(|(_, (_, phase))| self.state.phase_visible(**phase))
            .map(|(index, ((x, width), phase))| SegmentLayout {
                phase: *phase,
                index,
                rect: RectShape::new(x, y, width, config.bar_height, theme.phase_color(*phase))
                    .with_stroke(Stroke::solid(&theme.bar_stroke, 0.5))
                    .rounded(config.bar_corner_radius),
            })
            .collect();

        let visible = self.state.task_visible(task);
        let milestones = if visible {
            task.milestones
                .iter()
                .map(|milestone| {
                    let cx = scale.x(milestone.date);
                    MilestoneLayout {
                        date: milestone.date,
                        marker: CircleShape {
                            cx,
                            cy: y + config.bar_height / 2.0,
                            r: config.milestone_radius,
                            fill: theme.milestone_color.clone(),
                        },
                        label: milestone.label.as_ref().map(|text| {
                            TextShape::new(
                                cx,
                                y + config.bar_height + config.milestone_label_offset,
                                text.clone(),
                                config.font_sizes.milestone,
                                &theme.text_color,
                            )
                            .centered()
                        }),
                    }
                })
                .collect()
        } else {
            Vec::new()
        };

        TaskLayout {
            name: task.name.clone(),
            row,
            y,
            display_start,
            display_end,
            bar_x,
            bar_width,
            visible,
            name_background,
            label,
            segments,
            milestones,
        }
    }
}
