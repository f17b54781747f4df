use crate::model::{Category, Dataset, Group, Task, year_end, year_start};

/// Narrows a dataset to one calendar year.
///
/// Tasks are kept when `[start, end]` overlaps `[Jan 1, Dec 31]` of `year`;
/// their milestones are kept when they fall inside that window. Categories
/// left without tasks, and groups left without categories, are dropped.
/// Without a year the dataset is returned as is.
pub fn filter_by_year(dataset: &Dataset, year: Option<i32>) -> Dataset {
    let Some(year) = year else {
        return dataset.clone();
    };
    let from = year_start(year);
    let to = year_end(year);

    let groups = dataset
        .groups
        .iter()
        .filter_map(|group| {
            let categories: Vec<Category> = group
                .categories
                .iter()
                .filter_map(|category| {
                    let tasks: Vec<Task> = category
                        .tasks
                        .iter()
                        .filter(|task| task.overlaps(from, to))
                        .map(|task| Task {
                            milestones: task
                                .milestones
                                .iter()
                                .filter(|m| m.date >= from && m.date <= to)
                                .cloned()
                                .collect(),
                            ..task.clone()
                        })
                        .collect();
                    (!tasks.is_empty()).then(|| Category {
                        name: category.name.clone(),
                        tasks,
                    })
                })
                .collect();
            (!categories.is_empty()).then_some(Group {
                kind: group.kind,
                categories,
            })
        })
        .collect();

    Dataset::new(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GroupKind, Milestone, MilestoneKind, Phase, ymd};

    fn task(name: &str, start: (i32, u32), end: (i32, u32)) -> Task {
        Task {
            name: name.to_string(),
            start: ymd(start.0, start.1, 1).unwrap(),
            end: ymd(end.0, end.1, 1).unwrap(),
            phases: vec![Phase::Develop],
            milestones: Vec::new(),
        }
    }

    fn dataset() -> Dataset {
        let mut design = task("CLM Global Design", (2025, 9), (2026, 1));
        design.milestones = vec![
            Milestone {
                date: ymd(2025, 10, 1).unwrap(),
                kind: MilestoneKind::Checkpoint,
                label: None,
            },
            Milestone {
                date: ymd(2026, 1, 1).unwrap(),
                kind: MilestoneKind::Checkpoint,
                label: Some("Sign-off".to_string()),
            },
        ];
        Dataset::new(vec![
            Group {
                kind: GroupKind::Customer,
                categories: vec![
                    Category {
                        name: "BTDT".to_string(),
                        tasks: vec![task("Health", (2025, 7), (2025, 12))],
                    },
                    Category {
                        name: "CLM".to_string(),
                        tasks: vec![design, task("Wave 4", (2026, 7), (2027, 1))],
                    },
                ],
            },
            Group {
                kind: GroupKind::Transfer,
                categories: vec![Category {
                    name: "ECC".to_string(),
                    tasks: vec![task("Phase 3", (2026, 8), (2027, 3))],
                }],
            },
        ])
    }

    #[test]
    fn no_year_returns_input_unchanged() {
        let data = dataset();
        assert_eq!(filter_by_year(&data, None), data);
    }

    #[test]
    fn keeps_overlapping_tasks_and_drops_empty_categories() {
        let filtered = filter_by_year(&dataset(), Some(2025));
        assert_eq!(filtered.groups.len(), 1);
        let names: Vec<&str> = filtered.tasks().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Health", "CLM Global Design"]);
    }

    #[test]
    fn keeps_tasks_spanning_the_whole_year() {
        let mut data = dataset();
        data.groups[1].categories[0].tasks[0] = task("Long", (2025, 1), (2028, 1));
        let filtered = filter_by_year(&data, Some(2027));
        let names: Vec<&str> = filtered.tasks().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Wave 4", "Long"]);
    }

    #[test]
    fn narrows_milestones_to_the_year() {
        let filtered = filter_by_year(&dataset(), Some(2026));
        let design = filtered
            .tasks()
            .find(|t| t.name == "CLM Global Design")
            .unwrap();
        assert_eq!(design.milestones.len(), 1);
        assert_eq!(design.milestones[0].label.as_deref(), Some("Sign-off"));
    }

    #[test]
    fn year_without_tasks_is_empty() {
        let filtered = filter_by_year(&dataset(), Some(2030));
        assert!(filtered.groups.is_empty());
        assert_eq!(filtered.task_count(), 0);
    }

    #[test]
    fn filtering_is_idempotent() {
        let once = filter_by_year(&dataset(), Some(2026));
        assert_eq!(filter_by_year(&once, Some(2026)), once);
    }
}
