use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use timeline_rs_renderer::config::LayoutConfig;
use timeline_rs_renderer::layout::compute_layout;
use timeline_rs_renderer::loader::parse_dataset;
use timeline_rs_renderer::model::Phase;
use timeline_rs_renderer::render::render_svg;
use timeline_rs_renderer::state::InteractionState;
use timeline_rs_renderer::text_metrics::HeuristicMetrics;
use timeline_rs_renderer::theme::Theme;

const PHASE_SETS: [&str; 5] = [
    r#"["Strategy","Plan"]"#,
    r#"["Discover","Develop"]"#,
    r#"["Develop","Deploy"]"#,
    r#"["Deploy","Hypercare"]"#,
    r#"["Other"]"#,
];

fn synthetic_source(categories: usize, tasks_per_category: usize) -> String {
    let mut out = String::from("[");
    for c in 0..categories {
        if c > 0 {
            out.push(',');
        }
        let kind = if c % 2 == 0 { "customer" } else { "transfer" };
        out.push_str(&format!(
            r#"{{"type":"{kind}","name":"Program {c} - Synthetic Portfolio Stream","tasks":["#
        ));
        for t in 0..tasks_per_category {
            if t > 0 {
                out.push(',');
            }
            let start_month = (c + t) % 36;
            let length = 2 + (t * 7 + c) % 14;
            let end_month = start_month + length;
            out.push_str(&format!(
                r#"{{"name":"Program {c} Wave {t} - Rollout","start":"{}-{:02}","end":"{}-{:02}","phases":{},"milestones":[{{"date":"{}-{:02}","label":"Go Live"}}]}}"#,
                2025 + start_month / 12,
                start_month % 12 + 1,
                2025 + end_month / 12,
                end_month % 12 + 1,
                PHASE_SETS[(c + t) % PHASE_SETS.len()],
                2025 + end_month / 12,
                end_month % 12 + 1,
            ));
        }
        out.push_str("]}");
    }
    out.push(']');
    out
}

fn fixture() -> &'static str {
    include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/portfolio.json"
    ))
}

fn inputs() -> Vec<(String, String)> {
    vec![
        ("portfolio".to_string(), fixture().to_string()),
        ("synthetic_10x10".to_string(), synthetic_source(10, 10)),
        ("synthetic_40x25".to_string(), synthetic_source(40, 25)),
    ]
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for (name, input) in inputs() {
        group.bench_with_input(BenchmarkId::from_parameter(name), &input, |b, data| {
            b.iter(|| {
                let dataset = parse_dataset(black_box(data)).expect("parse failed");
                black_box(dataset.task_count());
            });
        });
    }
    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let theme = Theme::classic();
    let config = LayoutConfig::default();
    let states = [
        ("all", InteractionState::new()),
        ("year", InteractionState::new().with_year(Some(2026))),
        ("phase", InteractionState::new().with_phase(Some(Phase::Deploy))),
    ];
    for (name, input) in inputs() {
        let dataset = parse_dataset(&input).expect("parse failed");
        for (label, state) in &states {
            group.bench_with_input(
                BenchmarkId::new(name.clone(), label),
                &dataset,
                |b, dataset| {
                    b.iter(|| {
                        let layout =
                            compute_layout(black_box(dataset), state, &theme, &config, &HeuristicMetrics);
                        black_box(layout.hit_regions.len());
                    });
                },
            );
        }
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let theme = Theme::classic();
    let config = LayoutConfig::default();
    for (name, input) in inputs() {
        let dataset = parse_dataset(&input).expect("parse failed");
        let layout = compute_layout(&dataset, &InteractionState::new(), &theme, &config, &HeuristicMetrics);
        group.bench_with_input(BenchmarkId::from_parameter(name), &layout, |b, layout| {
            b.iter(|| {
                let svg = render_svg(black_box(layout), &theme);
                black_box(svg.len());
            });
        });
    }
    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("end_to_end");
    let theme = Theme::classic();
    let config = LayoutConfig::default();
    for (name, input) in inputs() {
        group.bench_with_input(BenchmarkId::from_parameter(name), &input, |b, data| {
            b.iter(|| {
                let dataset = parse_dataset(black_box(data)).expect("parse failed");
                let layout =
                    compute_layout(&dataset, &InteractionState::new(), &theme, &config, &HeuristicMetrics);
                let svg = render_svg(&layout, &theme);
                black_box(svg.len());
            });
        });
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_parse, bench_layout, bench_render, bench_end_to_end
);
criterion_main!(benches);
