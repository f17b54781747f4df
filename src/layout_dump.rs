use crate::layout::{HitRegion, Layout};
use crate::model::{Date, Phase};
use crate::state::{ClickTarget, InteractionState};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Flattened geometry for debugging and golden comparisons.
#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub state: InteractionState,
    pub width: f32,
    pub height: f32,
    pub domain: [Date; 2],
    pub content_height: f32,
    pub years: Vec<i32>,
    pub quarters: Vec<String>,
    pub rows: Vec<RowDump>,
    pub hit_regions: Vec<HitRegionDump>,
}

#[derive(Debug, Serialize)]
pub struct RowDump {
    pub row: usize,
    pub group: String,
    pub category: String,
    pub task: String,
    pub label: String,
    pub y: f32,
    pub display_start: Date,
    pub display_end: Date,
    pub bar: [f32; 2],
    pub visible: bool,
    pub segments: Vec<SegmentDump>,
    pub milestones: Vec<MilestoneDump>,
}

#[derive(Debug, Serialize)]
pub struct SegmentDump {
    pub phase: Phase,
    pub x: f32,
    pub width: f32,
}

#[derive(Debug, Serialize)]
pub struct MilestoneDump {
    pub date: Date,
    pub x: f32,
    pub label: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HitRegionDump {
    pub target: ClickTarget,
    pub rect: [f32; 4],
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout) -> Self {
        let mut rows = Vec::new();
        for group in &layout.groups {
            for category in &group.categories {
                for task in &category.tasks {
                    rows.push(RowDump {
                        row: task.row,
                        group: group.kind.label().to_string(),
                        category: category.name.clone(),
                        task: task.name.clone(),
                        label: task.label.text(),
                        y: task.y,
                        display_start: task.display_start,
                        display_end: task.display_end,
                        bar: [task.bar_x, task.bar_width],
                        visible: task.visible,
                        segments: task
                            .segments
                            .iter()
                            .map(|segment| SegmentDump {
                                phase: segment.phase,
                                x: segment.rect.x,
                                width: segment.rect.width,
                            })
                            .collect(),
                        milestones: task
                            .milestones
                            .iter()
                            .map(|milestone| MilestoneDump {
                                date: milestone.date,
                                x: milestone.marker.cx,
                                label: milestone.label.as_ref().map(|label| label.text()),
                            })
                            .collect(),
                    });
                }
            }
        }

        LayoutDump {
            state: layout.state,
            width: layout.width,
            height: layout.height,
            domain: [layout.domain_start, layout.domain_end],
            content_height: layout.content_height,
            years: layout.year_bands.iter().map(|band| band.year).collect(),
            quarters: layout
                .quarters
                .iter()
                .map(|q| format!("{}-Q{}", q.year, q.quarter))
                .collect(),
            rows,
            hit_regions: layout.hit_regions.iter().map(hit_region_dump).collect(),
        }
    }
}

fn hit_region_dump(region: &HitRegion) -> HitRegionDump {
    HitRegionDump {
        target: region.target,
        rect: [region.x, region.y, region.width, region.height],
    }
}

pub fn write_layout_dump(path: &Path, layout: &Layout) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
