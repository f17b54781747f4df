use std::path::{Path, PathBuf};

use timeline_rs_renderer::layout::TimeScale;
use timeline_rs_renderer::model::ymd;
use timeline_rs_renderer::text_metrics::HeuristicMetrics;
use timeline_rs_renderer::{
    ClickTarget, DataValidationError, Dataset, InteractionState, Layout, LayoutConfig, Phase,
    RenderOptions, Theme, TimelineView, compute_layout, load_dataset, parse_dataset,
    render_svg, render_with_options,
};

fn fixture_path(rel: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(rel)
}

fn portfolio() -> Dataset {
    load_dataset(&fixture_path("portfolio.json")).expect("portfolio fixture should load")
}

fn layout_for(dataset: &Dataset, state: InteractionState) -> Layout {
    compute_layout(
        dataset,
        &state,
        &Theme::classic(),
        &LayoutConfig::default(),
        &HeuristicMetrics,
    )
}

fn assert_valid_svg(svg: &str, context: &str) {
    assert!(svg.starts_with("<svg"), "{context}: missing <svg tag");
    assert!(svg.ends_with("</svg>"), "{context}: missing </svg tag");
}

const HEALTH: &str = r#"[{"type":"customer","name":"BTDT - All","tasks":[
    {"name":"BTDT: Serving Health & Welfare","start":"2025-07","end":"2025-12","phases":["Strategy","Plan"]}
]}]"#;

#[test]
fn unfiltered_task_splits_into_equal_phase_segments() {
    let dataset = parse_dataset(HEALTH).unwrap();
    let layout = layout_for(&dataset, InteractionState::new());
    let task = layout.task("BTDT: Serving Health & Welfare").unwrap();

    let scale = TimeScale::for_view(None, &LayoutConfig::default());
    assert_eq!(task.display_start, ymd(2025, 7, 1).unwrap());
    assert_eq!(task.display_end, ymd(2025, 12, 1).unwrap());
    assert!((task.bar_x - scale.x(ymd(2025, 7, 1).unwrap())).abs() < 1e-3);

    let fills: Vec<&str> = task.segments.iter().map(|s| s.rect.fill.as_str()).collect();
    assert_eq!(fills, vec!["#d8bfd8", "#ffa500"]);
    let widths: Vec<f32> = task.segments.iter().map(|s| s.rect.width).collect();
    assert!((widths[0] - widths[1]).abs() < 1e-3);
    assert!((widths[0] + widths[1] - task.bar_width).abs() < 1e-3);
}

#[test]
fn task_outside_selected_year_is_excluded() {
    let dataset = parse_dataset(HEALTH).unwrap();
    let layout = layout_for(&dataset, InteractionState::new().with_year(Some(2026)));
    assert_eq!(layout.tasks().count(), 0);
    assert!(layout.groups.is_empty());
    assert_eq!(layout.content_height, 0.0);
    assert_eq!(layout.height, 50.0 + 400.0);
}

#[test]
fn selected_year_clamps_and_reproportions_segments() {
    let dataset = parse_dataset(
        r#"[{"type":"customer","name":"EDNA","tasks":[
            {"name":"EDNA Wave 1","start":"2025-09","end":"2026-05","phases":["Discover","Develop"]}
        ]}]"#,
    )
    .unwrap();
    let layout = layout_for(&dataset, InteractionState::new().with_year(Some(2025)));
    let task = layout.task("EDNA Wave 1").unwrap();
    assert_eq!(task.display_start, ymd(2025, 9, 1).unwrap());
    assert_eq!(task.display_end, ymd(2025, 12, 31).unwrap());
    assert_eq!(task.segments.len(), 2);
    assert!((task.segments[0].rect.width - task.bar_width / 2.0).abs() < 1e-3);
    assert!((task.bar_x + task.bar_width - (layout.chart_x + layout.chart_width)).abs() < 1e-3);
}

#[test]
fn phase_filter_keeps_the_row_but_draws_only_matching_segments() {
    let dataset = parse_dataset(
        r#"[{"type":"transfer","name":"ECC","tasks":[
            {"name":"Phase 1","start":"2025-09","end":"2026-08","phases":["Develop"]},
            {"name":"Phase 3","start":"2026-08","end":"2027-03","phases":["Deploy","Hypercare"]}
        ]}]"#,
    )
    .unwrap();
    let layout = layout_for(&dataset, InteractionState::new().with_phase(Some(Phase::Deploy)));
    let phase1 = layout.task("Phase 1").unwrap();
    assert!(!phase1.visible);
    assert!(phase1.segments.is_empty());

    let phase3 = layout.task("Phase 3").unwrap();
    assert!(phase3.visible);
    assert_eq!(phase3.row, 1);
    assert_eq!(phase3.y, 75.0);
    assert_eq!(phase3.segments.len(), 1);
    assert_eq!(phase3.segments[0].phase, Phase::Deploy);
    assert!((phase3.segments[0].rect.width - phase3.bar_width / 2.0).abs() < 1e-3);
}

#[test]
fn portfolio_renders_in_every_view() {
    let dataset = portfolio();
    assert_eq!(dataset.task_count(), 19);

    let mut states = vec![InteractionState::new()];
    for year in 2025..=2028 {
        states.push(InteractionState::new().with_year(Some(year)));
    }
    for phase in Phase::ALL {
        states.push(InteractionState::new().with_phase(Some(phase)));
        states.push(InteractionState::new().with_year(Some(2026)).with_phase(Some(phase)));
    }

    let theme = Theme::classic();
    for state in states {
        let layout = layout_for(&dataset, state);
        let svg = render_svg(&layout, &theme);
        assert_valid_svg(&svg, &format!("{state:?}"));
        assert!(layout.height >= layout.content_y + 400.0);
    }
}

#[test]
fn portfolio_year_views_keep_only_overlapping_tasks() {
    let dataset = portfolio();
    let counts: Vec<usize> = (2025..=2028)
        .map(|year| {
            layout_for(&dataset, InteractionState::new().with_year(Some(year)))
                .tasks()
                .count()
        })
        .collect();
    // 2027 keeps only the tasks that run into the new year.
    assert_eq!(counts, vec![11, 16, 4, 0]);
}

#[test]
fn portfolio_milestones_and_groups() {
    let layout = layout_for(&portfolio(), InteractionState::new());
    assert_eq!(layout.groups.len(), 2);
    assert_eq!(layout.groups[0].categories.len(), 3);
    assert_eq!(layout.groups[1].categories.len(), 2);
    assert_eq!(layout.content_height, 19.0 * 25.0);
    assert_eq!(layout.height, 50.0 + 475.0 + 150.0);

    let design = layout.task("CLM Global Design").unwrap();
    assert_eq!(design.milestones.len(), 2);
    assert!(design.milestones.iter().all(|m| m.label.is_none()));
    let ecc = layout.task("ECC Wave Phase 2 - Load Confirmation").unwrap();
    assert_eq!(
        ecc.milestones[0].label.as_ref().map(|l| l.text()),
        Some("Go Live".to_string())
    );
}

#[test]
fn json5_bare_list_is_accepted() {
    let dataset = load_dataset(&fixture_path("compact.json5")).unwrap();
    let layout = layout_for(&dataset, InteractionState::new());
    let names: Vec<&str> = layout.tasks().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Core Wave 4", "Tracker Wave 3"]);
    let wave4 = layout.task("Core Wave 4").unwrap();
    assert_eq!(wave4.display_end, ymd(2027, 1, 15).unwrap());
}

#[test]
fn invalid_fixtures_are_rejected() {
    let cases = [
        ("invalid/bad_date.json", "invalid start date"),
        ("invalid/empty_phases.json", "has no phases"),
        ("invalid/unknown_phase.json", "unknown phase"),
        ("invalid/end_before_start.json", "before it starts"),
        ("invalid/unknown_group.json", "unknown group type"),
    ];
    for (rel, expected) in cases {
        let err = load_dataset(&fixture_path(rel)).unwrap_err();
        assert!(
            err.to_string().contains(expected),
            "{rel}: unexpected error {err}"
        );
    }
    assert!(matches!(
        load_dataset(&fixture_path("missing.json")),
        Err(DataValidationError::Io { .. })
    ));
}

#[test]
fn clicks_drive_the_view_through_year_and_phase() {
    let mut view = TimelineView::with_measurer(
        portfolio(),
        Theme::classic(),
        LayoutConfig::default(),
        HeuristicMetrics,
    );
    let band = view.layout().year_bands[0].rect.clone();
    assert!(view.click(band.x + band.width / 2.0, band.y + band.height / 2.0));
    assert_eq!(view.state().selected_year, Some(2025));
    assert_eq!(view.layout().tasks().count(), 11);

    assert!(view.apply(ClickTarget::Phase(Phase::Develop)));
    let svg = view.render_svg();
    assert!(svg.contains("Back to all years"));
    assert!(svg.contains("✓"));

    assert!(view.apply(ClickTarget::Back));
    assert_eq!(
        view.state(),
        InteractionState::new().with_phase(Some(Phase::Develop))
    );
    assert_eq!(view.layout().tasks().count(), 19);
}

#[test]
fn render_with_options_uses_the_requested_state() {
    let source = std::fs::read_to_string(fixture_path("portfolio.json")).unwrap();
    let mut options = RenderOptions::modern().with_state(InteractionState::new().with_year(Some(2027)));
    options.layout.fast_text_metrics = true;
    let svg = render_with_options(&source, options).unwrap();
    assert_valid_svg(&svg, "modern 2027");
    assert!(svg.contains("EDNA Wave 3"));
    assert!(!svg.contains("EDNA Wave 0 Core"));
    assert!(svg.contains(&Theme::modern().column_color));

    assert!(render_with_options("[{", RenderOptions::classic()).is_err());
}
