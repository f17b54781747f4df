use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Calendar dates are day-precision and read as midnight.
pub type Date = NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Phase {
    Strategy,
    Plan,
    Discover,
    Develop,
    Deploy,
    Adopt,
    Hypercare,
    Other,
}

impl Phase {
    /// Legend order.
    pub const ALL: [Phase; 8] = [
        Phase::Strategy,
        Phase::Plan,
        Phase::Discover,
        Phase::Develop,
        Phase::Deploy,
        Phase::Adopt,
        Phase::Hypercare,
        Phase::Other,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Phase::Strategy => "Strategy",
            Phase::Plan => "Plan",
            Phase::Discover => "Discover",
            Phase::Develop => "Develop",
            Phase::Deploy => "Deploy",
            Phase::Adopt => "Adopt",
            Phase::Hypercare => "Hypercare",
            Phase::Other => "Other",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|phase| phase.name() == name)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum GroupKind {
    Customer,
    Transfer,
}

impl GroupKind {
    /// Top-to-bottom stacking order.
    pub const ALL: [GroupKind; 2] = [GroupKind::Customer, GroupKind::Transfer];

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "customer" => Some(Self::Customer),
            "transfer" => Some(Self::Transfer),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GroupKind::Customer => "Customer",
            GroupKind::Transfer => "Transfer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum MilestoneKind {
    #[default]
    Checkpoint,
}

impl MilestoneKind {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "checkpoint" => Some(Self::Checkpoint),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Milestone {
    pub date: Date,
    pub kind: MilestoneKind,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub name: String,
    pub start: Date,
    pub end: Date,
    /// Never empty once loaded; bar segments follow this order.
    pub phases: Vec<Phase>,
    pub milestones: Vec<Milestone>,
}

impl Task {
    pub fn has_phase(&self, phase: Phase) -> bool {
        self.phases.contains(&phase)
    }

    /// Inclusive overlap with `[from, to]`.
    pub fn overlaps(&self, from: Date, to: Date) -> bool {
        self.start <= to && self.end >= from
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub kind: GroupKind,
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dataset {
    pub groups: Vec<Group>,
}

impl Dataset {
    pub fn new(groups: Vec<Group>) -> Self {
        Self { groups }
    }

    pub fn task_count(&self) -> usize {
        self.groups
            .iter()
            .flat_map(|group| &group.categories)
            .map(|category| category.tasks.len())
            .sum()
    }

    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.groups
            .iter()
            .flat_map(|group| &group.categories)
            .flat_map(|category| &category.tasks)
    }

    /// Categories of one group kind, in input order, across every group of that kind.
    pub fn categories_of(&self, kind: GroupKind) -> impl Iterator<Item = &Category> {
        self.groups
            .iter()
            .filter(move |group| group.kind == kind)
            .flat_map(|group| &group.categories)
    }
}

fn clamp_year(year: i32) -> i32 {
    year.clamp(NaiveDate::MIN.year() + 1, NaiveDate::MAX.year() - 1)
}

pub fn ymd(year: i32, month: u32, day: u32) -> Option<Date> {
    NaiveDate::from_ymd_opt(year, month, day)
}

/// January 1 of `year`.
pub fn year_start(year: i32) -> Date {
    NaiveDate::from_ymd_opt(clamp_year(year), 1, 1).unwrap_or(NaiveDate::MIN)
}

/// December 31 of `year` (midnight, so the last day itself is excluded from spans).
pub fn year_end(year: i32) -> Date {
    NaiveDate::from_ymd_opt(clamp_year(year), 12, 31).unwrap_or(NaiveDate::MAX)
}

/// Parses `YYYY-MM` (first of the month) or `YYYY-MM-DD`.
pub fn parse_date(value: &str) -> Option<Date> {
    let value = value.trim();
    let parts: Vec<&str> = value.split('-').collect();
    let [year, month, rest @ ..] = parts.as_slice() else {
        return None;
    };
    if year.len() != 4 || month.is_empty() || month.len() > 2 {
        return None;
    }
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    let day: u32 = match rest {
        [] => 1,
        [day] if !day.is_empty() && day.len() <= 2 => day.parse().ok()?,
        _ => return None,
    };
    NaiveDate::from_ymd_opt(year, month, day)
}
