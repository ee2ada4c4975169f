use namegraph::api::{ChartSession, ChartSessionConfig};
use namegraph::core::{Gender, NameSeries, Region, Viewport, YearRecord};
use namegraph::error::ChartError;
use namegraph::render::NullRenderer;

fn series(counts: &[(i32, u64, u64)]) -> NameSeries {
    let records = counts
        .iter()
        .map(|&(year, count, total)| YearRecord::new(year, count, total).expect("record"))
        .collect();
    NameSeries::new(records).expect("series")
}

fn region(text: &str) -> Region {
    Region::parse(text).expect("region")
}

fn session() -> ChartSession<NullRenderer> {
    let config = ChartSessionConfig::new(Viewport::new(900, 500), Gender::Female)
        .with_color_seed(42);
    ChartSession::new(NullRenderer::default(), config).expect("session")
}

#[test]
fn invalid_viewport_is_rejected_at_construction() {
    let config = ChartSessionConfig::new(Viewport::new(0, 500), Gender::Female);
    let result = ChartSession::new(NullRenderer::default(), config);

    assert!(matches!(
        result,
        Err(ChartError::InvalidViewport { width: 0, .. })
    ));
}

#[test]
fn duplicate_add_fails_and_leaves_session_untouched() {
    let mut session = session();
    session
        .add_series(Region::Aggregate, series(&[(2000, 10, 1000)]))
        .expect("first add");
    let domain_before = session.coordinator().y().domain();
    let scene_before = session.scene().len();

    let result = session.add_series(Region::Aggregate, series(&[(1990, 1, 10)]));

    assert!(matches!(result, Err(ChartError::DuplicateRegion(_))));
    assert_eq!(session.registry().len(), 1);
    assert_eq!(session.coordinator().y().domain(), domain_before);
    assert_eq!(session.scene().len(), scene_before);
}

#[test]
fn y_domain_contains_every_active_series_after_each_add() {
    let mut session = session();
    let fixtures = [
        ("aggregate", series(&[(2000, 10, 1000), (2002, 20, 1000)])),
        ("CA", series(&[(2000, 1, 500), (2002, 40, 500)])),
        ("NY", series(&[(2001, 45, 500)])),
    ];

    for (name, data) in fixtures {
        session
            .add_series(region(name), data)
            .expect("add series");

        let (domain_min, domain_max) = session.coordinator().y().domain();
        for entry in session.registry().entries() {
            let (low, high) = entry.data.rate_bounds().expect("bounds");
            assert!(
                domain_min <= low && high <= domain_max,
                "domain [{domain_min}, {domain_max}] must cover {} [{low}, {high}]",
                entry.region
            );
        }
    }
}

#[test]
fn overlay_colors_stay_distinct_from_the_aggregate_palette() {
    let mut session = session();
    session
        .add_series(Region::Aggregate, series(&[(2000, 10, 1000)]))
        .expect("add aggregate");
    session
        .add_series(region("CA"), series(&[(2000, 5, 500)]))
        .expect("add CA");

    let colors: Vec<_> = session
        .registry()
        .entries()
        .map(|entry| entry.color)
        .collect();
    assert_eq!(colors.len(), 2);
    assert!(
        colors[0].channel_distance(colors[1]) > 0.0,
        "best-effort distinct colors"
    );
}

#[test]
fn render_frame_carries_axes_labels_and_series_primitives() {
    let mut session = session();
    session
        .add_series(
            Region::Aggregate,
            series(&[(2000, 10, 1000), (2001, 20, 1000), (2002, 15, 1000)]),
        )
        .expect("add aggregate");

    let frame = session.build_render_frame().expect("build frame");
    frame.validate().expect("valid frame");

    assert_eq!(frame.points.len(), 3);
    // 2 axis lines + 5 ticks per axis + 2 connecting segments.
    assert_eq!(frame.lines.len(), 14);
    assert_eq!(frame.texts.len(), 10, "5 year + 5 rate labels");
}

#[test]
fn null_renderer_receives_computed_frame_counts() {
    let mut session = session();
    session
        .add_series(
            Region::Aggregate,
            series(&[(2000, 10, 1000), (2001, 20, 1000), (2002, 15, 1000)]),
        )
        .expect("add aggregate");

    session.render().expect("render");
    let renderer = session.into_renderer();

    assert_eq!(renderer.last_point_count, 3);
    assert_eq!(renderer.last_line_count, 14);
    assert_eq!(renderer.last_text_count, 10);
}

#[test]
fn single_year_chart_renders_one_tick_per_axis_value() {
    let mut session = session();
    session
        .add_series(Region::Aggregate, series(&[(2004, 9, 90_000)]))
        .expect("add single year");

    let frame = session.build_render_frame().expect("build frame");
    frame.validate().expect("valid frame");

    // Degenerate domains collapse all tick positions onto one.
    assert_eq!(frame.points.len(), 1);
    assert_eq!(frame.texts.len(), 2, "one year label + one rate label");
}

#[test]
fn seeded_sessions_pick_identical_overlay_colors() {
    let build = || {
        let config = ChartSessionConfig::new(Viewport::new(900, 500), Gender::Male)
            .with_color_seed(9);
        let mut session =
            ChartSession::new(NullRenderer::default(), config).expect("session");
        session
            .add_series(region("CA"), series(&[(2000, 5, 500)]))
            .expect("add CA");
        session
            .registry()
            .get(region("CA"))
            .expect("entry")
            .color
    };

    assert_eq!(build(), build());
}
