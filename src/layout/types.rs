use crate::model::{Date, GroupKind, Phase};
use crate::state::{ClickTarget, InteractionState};

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: String,
    pub width: f32,
    pub dasharray: Option<String>,
}

impl Stroke {
    pub fn solid(color: &str, width: f32) -> Self {
        Self {
            color: color.to_string(),
            width,
            dasharray: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RectShape {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub fill: String,
    pub stroke: Option<Stroke>,
    pub corner_radius: f32,
    pub opacity: f32,
}

impl RectShape {
    pub fn new(x: f32, y: f32, width: f32, height: f32, fill: &str) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill: fill.to_string(),
            stroke: None,
            corner_radius: 0.0,
            opacity: 1.0,
        }
    }

    pub fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = Some(stroke);
        self
    }

    pub fn rounded(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineShape {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub stroke: Stroke,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CircleShape {
    pub cx: f32,
    pub cy: f32,
    pub r: f32,
    pub fill: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBaseline {
    Alphabetic,
    /// `y` is the vertical center of the text block.
    Middle,
}

/// A text element; several lines stack downward `line_height` pixels apart.
#[derive(Debug, Clone, PartialEq)]
pub struct TextShape {
    pub x: f32,
    pub y: f32,
    pub lines: Vec<String>,
    pub font_size: f32,
    pub bold: bool,
    pub fill: String,
    pub anchor: TextAnchor,
    pub baseline: TextBaseline,
    pub line_height: f32,
    /// Degrees, around (`x`, `y`).
    pub rotate: Option<f32>,
}

impl TextShape {
    pub fn new(x: f32, y: f32, text: impl Into<String>, font_size: f32, fill: &str) -> Self {
        Self {
            x,
            y,
            lines: vec![text.into()],
            font_size,
            bold: false,
            fill: fill.to_string(),
            anchor: TextAnchor::Start,
            baseline: TextBaseline::Alphabetic,
            line_height: font_size,
            rotate: None,
        }
    }

    pub fn centered(mut self) -> Self {
        self.anchor = TextAnchor::Middle;
        self
    }

    pub fn middle(mut self) -> Self {
        self.baseline = TextBaseline::Middle;
        self
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn text(&self) -> String {
        self.lines.join(" ")
    }
}

#[derive(Debug, Clone)]
pub struct YearBand {
    pub year: i32,
    pub rect: RectShape,
    pub label: TextShape,
}

#[derive(Debug, Clone)]
pub struct ButtonLayout {
    pub rect: RectShape,
    pub label: TextShape,
}

#[derive(Debug, Clone)]
pub struct QuarterLayout {
    pub year: i32,
    pub quarter: u32,
    pub band: RectShape,
    pub label: TextShape,
    pub gridline: LineShape,
}

#[derive(Debug, Clone)]
pub struct SegmentLayout {
    pub phase: Phase,
    /// Position of the phase within the task's phase list.
    pub index: usize,
    pub rect: RectShape,
}

#[derive(Debug, Clone)]
pub struct MilestoneLayout {
    pub date: Date,
    pub marker: CircleShape,
    pub label: Option<TextShape>,
}

#[derive(Debug, Clone)]
pub struct TaskLayout {
    pub name: String,
    /// Global row index, top to bottom.
    pub row: usize,
    pub y: f32,
    pub display_start: Date,
    pub display_end: Date,
    pub bar_x: f32,
    pub bar_width: f32,
    /// Task-level phase gate; milestones are drawn only when set.
    pub visible: bool,
    pub name_background: RectShape,
    pub label: TextShape,
    /// Drawn segments only; filtered-out phases are absent.
    pub segments: Vec<SegmentLayout>,
    pub milestones: Vec<MilestoneLayout>,
}

#[derive(Debug, Clone)]
pub struct CategoryLayout {
    pub name: String,
    pub column: RectShape,
    pub label: TextShape,
    pub tasks: Vec<TaskLayout>,
}

#[derive(Debug, Clone)]
pub struct GroupLayout {
    pub kind: GroupKind,
    pub column: RectShape,
    pub label: TextShape,
    pub categories: Vec<CategoryLayout>,
}

#[derive(Debug, Clone)]
pub struct LegendEntry {
    pub phase: Phase,
    pub selected: bool,
    pub rect: RectShape,
    pub label: TextShape,
    pub check: Option<TextShape>,
}

#[derive(Debug, Clone)]
pub struct LegendLayout {
    pub header: TextShape,
    pub entries: Vec<LegendEntry>,
    /// Static "Status to Watch" block.
    pub status: Vec<TextShape>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HitRegion {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub target: ClickTarget,
}

impl HitRegion {
    pub fn from_rect(rect: &RectShape, target: ClickTarget) -> Self {
        Self {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            target,
        }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// Geometry for one render pass.
#[derive(Debug, Clone)]
pub struct Layout {
    pub state: InteractionState,
    pub width: f32,
    pub height: f32,
    pub domain_start: Date,
    pub domain_end: Date,
    pub chart_x: f32,
    pub chart_width: f32,
    pub content_y: f32,
    pub content_height: f32,
    pub year_bands: Vec<YearBand>,
    pub back_button: Option<ButtonLayout>,
    pub quarters: Vec<QuarterLayout>,
    pub groups: Vec<GroupLayout>,
    pub legend: LegendLayout,
    pub hit_regions: Vec<HitRegion>,
}

impl Layout {
    /// Topmost clickable region under the point.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<ClickTarget> {
        self.hit_regions
            .iter()
            .rev()
            .find(|region| region.contains(x, y))
            .map(|region| region.target)
    }

    pub fn tasks(&self) -> impl Iterator<Item = &TaskLayout> {
        self.groups
            .iter()
            .flat_map(|group| &group.categories)
            .flat_map(|category| &category.tasks)
    }

    pub fn task(&self, name: &str) -> Option<&TaskLayout> {
        self.tasks().find(|task| task.name == name)
    }
}
