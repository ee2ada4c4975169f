use approx::assert_relative_eq;
use namegraph::api::{ChartSession, ChartSessionConfig, MutationOutcome};
use namegraph::core::{Gender, NameSeries, Region, Viewport, YearRecord};
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
        .with_transition_durations(0.75, 0.4)
        .with_color_seed(7);
    ChartSession::new(NullRenderer::default(), config).expect("session")
}

fn aggregate_series() -> NameSeries {
    // Rates 1000, 2000, 1500 per 100k.
    series(&[(2000, 10, 1000), (2001, 20, 1000), (2002, 15, 1000)])
}

fn ca_series() -> NameSeries {
    // Rates 200 and 8000 per 100k, widening the shared domain on both ends.
    series(&[(2000, 1, 500), (2002, 40, 500)])
}

fn ny_series() -> NameSeries {
    // Rates 100 and 9000 per 100k, wider than CA on both ends.
    series(&[(2000, 1, 1000), (2002, 45, 500)])
}

fn settled_session_with_aggregate_and_ca() -> ChartSession<NullRenderer> {
    let mut session = session();
    session
        .add_series(Region::Aggregate, aggregate_series())
        .expect("add aggregate");
    session
        .add_series(region("CA"), ca_series())
        .expect("add CA");
    session.advance(1.0).expect("settle");
    assert!(!session.is_animating());
    session
}

#[test]
fn survivors_rescale_only_after_the_last_fade_completes() {
    let mut session = settled_session_with_aggregate_and_ca();
    let ca = region("CA");
    let union_domain = session.coordinator().y().domain();

    let outcome = session.remove_series(ca).expect("remove CA");
    assert_eq!(outcome, MutationOutcome::Applied);
    assert!(!session.registry().contains(ca));
    assert!(session.exiting_regions().contains(&ca));
    assert!(
        !session.scene().ids_for_region(ca).is_empty(),
        "primitives linger while fading"
    );
    assert_eq!(session.coordinator().y().domain(), union_domain);

    // Half-way through the fade nothing has rescaled yet.
    session.advance(0.2).expect("half fade");
    assert_eq!(session.coordinator().y().domain(), union_domain);
    for id in session.scene().ids_for_region(ca) {
        let opacity = session.scene().get(id).expect("fading primitive").opacity;
        assert!((opacity - 0.5).abs() < 1e-9);
    }

    // Fade completes: exiting primitives are deleted, then the survivors
    // refit and start moving.
    session.advance(0.2).expect("finish fade");
    assert!(session.scene().ids_for_region(ca).is_empty());
    assert!(session.exiting_regions().is_empty());
    let (domain_min, domain_max) = session.coordinator().y().domain();
    assert_relative_eq!(domain_min, 1000.0, max_relative = 1e-12);
    assert_relative_eq!(domain_max, 2000.0, max_relative = 1e-12);
    assert!(session.is_animating(), "survivor rescale is in flight");

    session.advance(0.75).expect("settle survivors");
    assert!(!session.is_animating());

    // Settled aggregate points sit exactly where the aggregate-only
    // projection puts them.
    let aggregate_entry = session
        .registry()
        .get(Region::Aggregate)
        .expect("aggregate survives");
    for record in aggregate_entry.data.records() {
        let (expected_x, expected_y) = session
            .coordinator()
            .project(record.year, record.rate())
            .expect("project");
        let found = session
            .scene()
            .ids_for_region(Region::Aggregate)
            .into_iter()
            .filter_map(|id| session.scene().get(id))
            .any(|primitive| match primitive.shape {
                namegraph::render::SceneShape::Point { x, y } => {
                    (x - expected_x).abs() < 1e-9 && (y - expected_y).abs() < 1e-9
                }
                namegraph::render::SceneShape::Segment { .. } => false,
            });
        assert!(found, "no settled point for year {}", record.year);
    }
}

#[test]
fn readding_an_exiting_region_waits_for_its_fade() {
    let mut session = settled_session_with_aggregate_and_ca();
    let ca = region("CA");

    session.remove_series(ca).expect("remove CA");
    let outcome = session.add_series(ca, ca_series()).expect("re-add CA");
    assert_eq!(outcome, MutationOutcome::Deferred);
    assert_eq!(session.pending_mutation_count(), 1);
    assert!(!session.registry().contains(ca));

    session.advance(0.4).expect("finish fade");
    assert_eq!(session.pending_mutation_count(), 0);
    assert!(session.registry().contains(ca));
    for id in session.scene().ids_for_region(ca) {
        let primitive = session.scene().get(id).expect("fresh primitive");
        assert_eq!(primitive.opacity, 1.0);
    }
}

#[test]
fn add_during_unrelated_fade_absorbs_the_pending_rescale() {
    let mut session = settled_session_with_aggregate_and_ca();
    let ca = region("CA");
    let ny = region("NY");

    session.remove_series(ca).expect("remove CA");
    let outcome = session.add_series(ny, ny_series()).expect("add NY");
    assert_eq!(outcome, MutationOutcome::Applied);

    // The add already refit Y over {aggregate, NY}.
    let refit = session.coordinator().y().domain();
    assert_relative_eq!(refit.0, 100.0, max_relative = 1e-12);
    assert_relative_eq!(refit.1, 9000.0, max_relative = 1e-12);

    // CA's fade ends during this step; with the pending rescale absorbed,
    // the only remaining work is the add's own move transitions.
    session.advance(0.5).expect("fade ends, moves continue");
    assert!(session.scene().ids_for_region(ca).is_empty());
    session.advance(0.25).expect("moves complete");
    assert!(
        !session.is_animating(),
        "a second survivor rescale would still be running here"
    );
    assert_eq!(session.coordinator().y().domain(), refit);
}

#[test]
fn queued_mutations_apply_in_fifo_order() {
    let mut session = settled_session_with_aggregate_and_ca();
    let ca = region("CA");

    session.remove_series(ca).expect("remove CA");
    assert_eq!(
        session.add_series(ca, ca_series()).expect("queued add"),
        MutationOutcome::Deferred
    );
    assert_eq!(
        session.remove_series(ca).expect("queued remove"),
        MutationOutcome::Deferred
    );
    assert_eq!(session.pending_mutation_count(), 2);

    // First fade ends; the queued add applies, then the queued remove
    // starts a fresh exit fade for the re-added series.
    session.advance(0.4).expect("drain queue");
    assert_eq!(session.pending_mutation_count(), 0);
    assert!(!session.registry().contains(ca));
    assert!(session.exiting_regions().contains(&ca));

    session.advance(0.4).expect("second fade");
    assert!(session.scene().ids_for_region(ca).is_empty());
    assert!(session.exiting_regions().is_empty());
}

#[test]
fn removing_a_region_with_nothing_on_screen_rescales_immediately() {
    let mut session = session();
    session
        .add_series(Region::Aggregate, NameSeries::empty())
        .expect("add empty aggregate");
    session
        .add_series(region("CA"), ca_series())
        .expect("add CA");
    session.advance(1.0).expect("settle");

    let outcome = session.remove_series(Region::Aggregate).expect("remove");
    assert_eq!(outcome, MutationOutcome::Applied);
    assert!(session.exiting_regions().is_empty(), "nothing to fade");
    assert_eq!(session.registry().len(), 1);
}

#[test]
fn double_remove_of_an_exiting_region_fails() {
    let mut session = settled_session_with_aggregate_and_ca();
    let ca = region("CA");

    session.remove_series(ca).expect("first remove");
    let second = session.remove_series(ca);

    assert!(second.is_err());
    assert!(session.exiting_regions().contains(&ca));
}
