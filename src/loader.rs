use crate::error::DataValidationError;
use crate::model::{
    Category, Dataset, Group, GroupKind, Milestone, MilestoneKind, Phase, Task, parse_date,
};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct DatasetFile {
    #[serde(default)]
    categories: Vec<CategoryRecord>,
}

#[derive(Debug, Deserialize)]
struct CategoryRecord {
    #[serde(rename = "type")]
    kind: String,
    name: String,
    #[serde(default)]
    tasks: Vec<TaskRecord>,
}

#[derive(Debug, Deserialize)]
struct TaskRecord {
    name: String,
    start: String,
    end: String,
    #[serde(default)]
    phases: Vec<String>,
    #[serde(default)]
    milestones: Vec<MilestoneRecord>,
}

#[derive(Debug, Deserialize)]
struct MilestoneRecord {
    date: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    label: Option<String>,
}

pub fn load_dataset(path: &Path) -> Result<Dataset, DataValidationError> {
    let source = std::fs::read_to_string(path).map_err(|source| DataValidationError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_dataset(&source)
}

/// Parses and validates a JSON/JSON5 dataset. The document is either
/// `{ "categories": [...] }` or the bare category array.
pub fn parse_dataset(source: &str) -> Result<Dataset, DataValidationError> {
    let value: serde_json::Value = json5::from_str(source).map_err(|err| {
        DataValidationError::Syntax {
            message: err.to_string(),
        }
    })?;
    let records: Vec<CategoryRecord> = if value.is_array() {
        serde_json::from_value(value)
    } else {
        serde_json::from_value::<DatasetFile>(value).map(|file| file.categories)
    }
    .map_err(|err| DataValidationError::Syntax {
        message: err.to_string(),
    })?;

    let mut buckets: Vec<(GroupKind, Vec<Category>)> =
        GroupKind::ALL.iter().map(|kind| (*kind, Vec::new())).collect();
    for record in records {
        let kind = GroupKind::from_token(record.kind.trim()).ok_or_else(|| {
            DataValidationError::UnknownGroupKind {
                category: record.name.clone(),
                value: record.kind.clone(),
            }
        })?;
        let category = validate_category(record)?;
        if let Some((_, categories)) = buckets.iter_mut().find(|(k, _)| *k == kind) {
            categories.push(category);
        }
    }

    let groups = buckets
        .into_iter()
        .filter(|(_, categories)| !categories.is_empty())
        .map(|(kind, categories)| Group { kind, categories })
        .collect();
    let dataset = Dataset::new(groups);
    tracing::debug!(
        groups = dataset.groups.len(),
        tasks = dataset.task_count(),
        "dataset loaded"
    );
    Ok(dataset)
}

fn validate_category(record: CategoryRecord) -> Result<Category, DataValidationError> {
    if record.tasks.is_empty() {
        tracing::warn!(category = %record.name, "category has no tasks");
    }
    let tasks = record
        .tasks
        .into_iter()
        .map(|task| validate_task(&record.name, task))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Category {
        name: record.name,
        tasks,
    })
}

fn validate_task(category: &str, record: TaskRecord) -> Result<Task, DataValidationError> {
    let date = |field: &'static str, value: &str| {
        parse_date(value).ok_or_else(|| DataValidationError::InvalidDate {
            task: record.name.clone(),
            field,
            value: value.to_string(),
        })
    };
    let start = date("start", &record.start)?;
    let end = date("end", &record.end)?;
    if start > end {
        return Err(DataValidationError::EndBeforeStart {
            task: record.name.clone(),
            start: record.start.clone(),
            end: record.end.clone(),
        });
    }

    if record.phases.is_empty() {
        return Err(DataValidationError::EmptyPhases {
            category: category.to_string(),
            task: record.name.clone(),
        });
    }
    let phases = record
        .phases
        .iter()
        .map(|value| {
            Phase::from_name(value.trim()).ok_or_else(|| DataValidationError::UnknownPhase {
                task: record.name.clone(),
                value: value.clone(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut milestones = Vec::with_capacity(record.milestones.len());
    for milestone in &record.milestones {
        let when = date("milestone", &milestone.date)?;
        let kind = match milestone.kind.as_deref() {
            None => MilestoneKind::default(),
            Some(token) => MilestoneKind::from_token(token.trim()).ok_or_else(|| {
                DataValidationError::UnknownMilestoneKind {
                    task: record.name.clone(),
                    value: token.to_string(),
                }
            })?,
        };
        if when < start || when > end {
            tracing::warn!(
                task = %record.name,
                date = %when,
                "milestone falls outside its task range"
            );
        }
        milestones.push(Milestone {
            date: when,
            kind,
            label: milestone
                .label
                .as_ref()
                .map(|label| label.trim().to_string())
                .filter(|label| !label.is_empty()),
        });
    }

    Ok(Task {
        name: record.name,
        start,
        end,
        phases,
        milestones,
    })
}
