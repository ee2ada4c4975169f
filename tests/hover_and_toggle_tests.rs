use namegraph::api::{ChartSession, ChartSessionConfig, MutationOutcome};
use namegraph::core::{Gender, Region, StateCode, Viewport};
use namegraph::data::{DataAccessor, Dataset};
use namegraph::error::ChartError;
use namegraph::interaction::ToggleOutcome;
use namegraph::render::NullRenderer;
use serde_json::json;

fn fixture_accessor() -> DataAccessor {
    let dataset = Dataset::from_value(json!({
        "aggregate": {
            "female": {
                "2000": { "total_births": 1_000_000u64, "names": { "Emma": 100 } },
                "2001": { "total_births": 1_050_000u64, "names": { "Emma": 120 } },
                "2002": { "total_births": 1_020_000u64, "names": { "Emma": 90 } }
            },
            "male": {}
        },
        "CA": {
            "female": {
                "2000": { "total_births": 120_000u64, "names": { "Emma": 20 } },
                "2001": { "total_births": 119_000u64, "names": { "Emma": 22 } },
                "2002": { "total_births": 118_000u64, "names": { "Emma": 25 } }
            },
            "male": {}
        }
    }))
    .expect("fixture dataset");
    DataAccessor::new(dataset)
}

fn session() -> ChartSession<NullRenderer> {
    let config = ChartSessionConfig::new(Viewport::new(900, 500), Gender::Female)
        .with_color_seed(3);
    ChartSession::new(NullRenderer::default(), config).expect("session")
}

fn ca() -> StateCode {
    StateCode::new("CA").expect("state code")
}

#[test]
fn state_click_toggles_the_overlay_on_and_off() {
    let accessor = fixture_accessor();
    let mut session = session();
    session
        .plot_aggregate(&accessor, "Emma")
        .expect("plot aggregate");

    let added = session
        .toggle_state(&accessor, "Emma", ca())
        .expect("first toggle");
    assert_eq!(added, ToggleOutcome::Added(MutationOutcome::Applied));
    assert!(session.registry().contains(Region::State(ca())));

    let removed = session
        .toggle_state(&accessor, "Emma", ca())
        .expect("second toggle");
    assert_eq!(removed, ToggleOutcome::Removed(MutationOutcome::Applied));
    assert!(!session.registry().contains(Region::State(ca())));
}

#[test]
fn toggling_an_unknown_state_surfaces_not_found() {
    let accessor = fixture_accessor();
    let mut session = session();
    let wyoming = StateCode::new("WY").expect("state code");

    let result = session.toggle_state(&accessor, "Emma", wyoming);

    assert!(matches!(result, Err(ChartError::NotFound { .. })));
    assert!(session.registry().is_empty(), "failed toggle changes nothing");
}

#[test]
fn hovering_a_point_presents_its_record_without_mutation() {
    let accessor = fixture_accessor();
    let mut session = session();
    session
        .plot_aggregate(&accessor, "Emma")
        .expect("plot aggregate");
    session.advance(1.0).expect("settle");

    let entry = session
        .registry()
        .get(Region::Aggregate)
        .expect("aggregate entry");
    let record = entry.data.records()[1];
    let (x, y) = session
        .coordinator()
        .project(record.year, record.rate())
        .expect("project");
    let domain_before = session.coordinator().y().domain();

    session.pointer_move(x + 2.0, y - 2.0);
    let info = session.hover_info().expect("hover hit");
    assert_eq!(info.region, Region::Aggregate);
    assert_eq!(info.year, 2001);
    assert_eq!(info.count, 120);
    assert_eq!(info.total_births, 1_050_000);

    assert_eq!(session.coordinator().y().domain(), domain_before);
    assert_eq!(session.registry().len(), 1);

    session.pointer_leave();
    assert!(session.hover_info().is_none());
}

#[test]
fn hover_misses_when_no_point_is_within_the_snap_radius() {
    let accessor = fixture_accessor();
    let mut session = session();
    session
        .plot_aggregate(&accessor, "Emma")
        .expect("plot aggregate");

    session.pointer_move(1.0, 1.0);

    assert!(session.hover_info().is_none());
}

#[test]
fn fading_series_points_are_not_hover_candidates() {
    let accessor = fixture_accessor();
    let mut session = session();
    session
        .plot_aggregate(&accessor, "Emma")
        .expect("plot aggregate");
    session
        .toggle_state(&accessor, "Emma", ca())
        .expect("add CA");
    session.advance(1.0).expect("settle");

    // Capture a CA point position, then start its exit fade.
    let ca_region = Region::State(ca());
    let ca_point = session
        .scene()
        .ids_for_region(ca_region)
        .into_iter()
        .filter_map(|id| session.scene().get(id))
        .find_map(|primitive| match primitive.shape {
            namegraph::render::SceneShape::Point { x, y } => Some((x, y)),
            namegraph::render::SceneShape::Segment { .. } => None,
        })
        .expect("a CA point");
    session
        .toggle_state(&accessor, "Emma", ca())
        .expect("remove CA");

    session.pointer_move(ca_point.0, ca_point.1);

    let info = session.hover_info();
    assert!(
        info.is_none() || info.expect("hover info").region != ca_region,
        "exiting series must not answer hovers"
    );
}
