use crate::model::{Phase, Task};
use serde::Serialize;

/// The two independent view filters. Every combination is valid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InteractionState {
    pub selected_phase: Option<Phase>,
    pub selected_year: Option<i32>,
}

/// What a pointer click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ClickTarget {
    Year(i32),
    Back,
    Phase(Phase),
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_year(mut self, year: Option<i32>) -> Self {
        self.selected_year = year;
        self
    }

    pub fn with_phase(mut self, phase: Option<Phase>) -> Self {
        self.selected_phase = phase;
        self
    }

    pub fn select_year(self, year: i32) -> Self {
        self.with_year(Some(year))
    }

    pub fn clear_year(self) -> Self {
        self.with_year(None)
    }

    /// Selecting the active phase clears the filter.
    pub fn toggle_phase(self, phase: Phase) -> Self {
        if self.selected_phase == Some(phase) {
            self.with_phase(None)
        } else {
            self.with_phase(Some(phase))
        }
    }

    pub fn apply(self, target: ClickTarget) -> Self {
        match target {
            ClickTarget::Year(year) => self.select_year(year),
            ClickTarget::Back => self.clear_year(),
            ClickTarget::Phase(phase) => self.toggle_phase(phase),
        }
    }

    pub fn phase_visible(&self, phase: Phase) -> bool {
        self.selected_phase.is_none_or(|selected| selected == phase)
    }

    /// True when no phase filter is set or any of the task's phases matches it.
    pub fn task_visible(&self, task: &Task) -> bool {
        self.selected_phase
            .is_none_or(|selected| task.has_phase(selected))
    }
}
