//! Behavioural tests for route building using rstest-bdd.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use shiftplan_core::test_support::sample_shift;
use shiftplan_core::{Route, ShiftParameters, StopKind, TimeOfDay};
use shiftplan_planner::test_support::candidate;
use shiftplan_planner::{LookupOutcome, NameTicket, PlanningError, PlanningSession, PlanningState};

#[derive(Debug)]
struct PlanningWorld {
    session: RefCell<PlanningSession>,
    shift: RefCell<Option<ShiftParameters>>,
    last_error: RefCell<Option<PlanningError>>,
    ticket: RefCell<Option<NameTicket>>,
    outcome: RefCell<Option<LookupOutcome>>,
}

impl PlanningWorld {
    fn new() -> Self {
        Self {
            session: RefCell::new(PlanningSession::new()),
            shift: RefCell::new(None),
            last_error: RefCell::new(None),
            ticket: RefCell::new(None),
            outcome: RefCell::new(None),
        }
    }

    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn submit(&self) {
        let shift = self.shift.borrow().clone().expect("a shift is configured");
        self.session
            .borrow_mut()
            .submit_shift(shift)
            .expect("submitting a fresh shift succeeds");
    }

    fn route_len(&self) -> Option<usize> {
        self.session.borrow().route().map(Route::len)
    }
}

#[fixture]
fn world() -> PlanningWorld {
    PlanningWorld::new()
}

#[given("an overnight shift from 6 to 25 with a lunch break")]
fn given_shift(world: &PlanningWorld) {
    world.shift.replace(sample_shift().ok());
}

#[when("the shift is submitted")]
fn when_submitted(world: &PlanningWorld) {
    world.submit();
}

#[when("a drop-off eighteen hours away is committed")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn when_long_dropoff(world: &PlanningWorld) {
    let stop = candidate("airport", 1.36, 103.99, 18 * 3600);
    world
        .session
        .borrow_mut()
        .commit_dropoff(&stop)
        .expect("drop-off is expected");
}

#[when("a pickup one hour away is committed")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn when_late_pickup(world: &PlanningWorld) {
    let stop = candidate("terminal", 1.35, 103.98, 3600);
    world
        .session
        .borrow_mut()
        .commit_pickup(&stop)
        .expect("pickup is expected");
}

#[when("a pickup is attempted first")]
fn when_pickup_first(world: &PlanningWorld) {
    let stop = candidate("early", 1.36, 103.83, 600);
    let result = world.session.borrow_mut().commit_pickup(&stop);
    world.last_error.replace(result.err());
}

#[when("a name lookup starts for the seed stop")]
fn when_lookup_starts(world: &PlanningWorld) {
    let ticket = world.session.borrow().stop_name_ticket(0);
    world.ticket.replace(ticket);
}

#[when("the route is abandoned and the shift resubmitted")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn when_abandoned(world: &PlanningWorld) {
    world
        .session
        .borrow_mut()
        .abandon()
        .expect("abandoning an open route succeeds");
    world.submit();
}

#[when("the lookup returns a name")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn when_lookup_returns(world: &PlanningWorld) {
    let ticket = world.ticket.borrow().expect("a lookup was started");
    let outcome = world
        .session
        .borrow_mut()
        .apply_stop_name(ticket, Ok::<_, String>("Raffles Place".to_owned()));
    world.outcome.replace(Some(outcome));
}

#[then("the route holds a single seed pickup at 6:00 AM")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn then_seeded(world: &PlanningWorld) {
    let session = world.session.borrow();
    let route = session.route().expect("route exists");
    assert_eq!(route.len(), 1);
    let seed = route.first().expect("seed stop");
    assert_eq!(seed.kind, StopKind::Pickup);
    assert_eq!(seed.trip_id, 0);
    assert!(seed.revenue.abs() < f64::EPSILON);
    assert_eq!(seed.time, TimeOfDay::from_hour(6));
}

#[then("the planner is selecting a drop-off")]
fn then_selecting_dropoff(world: &PlanningWorld) {
    assert_eq!(world.session.borrow().state(), PlanningState::SelectingDropoff);
}

#[then("the route is finalized")]
fn then_finalized(world: &PlanningWorld) {
    let session = world.session.borrow();
    assert_eq!(session.state(), PlanningState::Finalized);
    assert!(session.route().is_some_and(Route::is_finalized));
}

#[then("the route has been archived")]
fn then_archived(world: &PlanningWorld) {
    let session = world.session.borrow();
    let archived = session.previous_routes();
    assert_eq!(archived.len(), 1);
    assert!(archived.iter().all(|a| a.route().len() == 3));
}

#[then("the transition is rejected")]
fn then_rejected(world: &PlanningWorld) {
    assert_eq!(
        *world.last_error.borrow(),
        Some(PlanningError::InvalidTransition {
            state: PlanningState::SelectingDropoff,
            action: "commit a pickup",
        })
    );
}

#[then("the route still holds only the seed pickup")]
fn then_only_seed(world: &PlanningWorld) {
    assert_eq!(world.route_len(), Some(1));
}

#[then("the lookup result is discarded")]
fn then_discarded(world: &PlanningWorld) {
    assert_eq!(*world.outcome.borrow(), Some(LookupOutcome::Discarded));
    let session = world.session.borrow();
    let named = session
        .route()
        .and_then(Route::first)
        .and_then(|s| s.location_name.clone());
    assert_eq!(named, None);
}

#[scenario(path = "tests/features/route_builder.feature", index = 0)]
fn submitting_seeds_route(world: PlanningWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/route_builder.feature", index = 1)]
fn late_pickup_ends_shift(world: PlanningWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/route_builder.feature", index = 2)]
fn out_of_turn_commit_rejected(world: PlanningWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/route_builder.feature", index = 3)]
fn stale_lookup_discarded(world: PlanningWorld) {
    let _ = world;
}
