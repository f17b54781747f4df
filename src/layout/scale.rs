use crate::config::LayoutConfig;
use crate::model::{Date, year_end, year_start};

/// Linear map from calendar time to horizontal pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    domain_start: Date,
    domain_end: Date,
    range_start: f32,
    range_end: f32,
}

impl TimeScale {
    pub fn new(domain_start: Date, domain_end: Date, range_start: f32, range_end: f32) -> Self {
        Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
        }
    }

    /// `[Jan 1 of the first domain year, Jan 1 after the last)` unfiltered,
    /// `[Jan 1, Dec 31]` of the selected year otherwise.
    pub fn for_view(selected_year: Option<i32>, config: &LayoutConfig) -> Self {
        let (start, end) = view_domain(selected_year, config);
        let left = config.margin_left();
        Self::new(start, end, left, left + config.width)
    }

    pub fn domain(&self) -> (Date, Date) {
        (self.domain_start, self.domain_end)
    }

    pub fn range(&self) -> (f32, f32) {
        (self.range_start, self.range_end)
    }

    pub fn x(&self, date: Date) -> f32 {
        let span = (self.domain_end - self.domain_start).num_days() as f64;
        if span <= 0.0 {
            return self.range_start;
        }
        let elapsed = (date - self.domain_start).num_days() as f64;
        let t = elapsed / span;
        (self.range_start as f64 + t * (self.range_end - self.range_start) as f64) as f32
    }
}

pub fn view_domain(selected_year: Option<i32>, config: &LayoutConfig) -> (Date, Date) {
    match selected_year {
        Some(year) => (year_start(year), year_end(year)),
        None => {
            let mut years = config.domain_years();
            let first = years.next().unwrap_or(config.domain_start_year);
            let last = years.last().unwrap_or(first);
            (year_start(first), year_start(last + 1))
        }
    }
}
