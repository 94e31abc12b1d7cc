// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Integration tests for universe membership, the tick fold and the scheduler

use std::any::Any;
use std::sync::{Arc, Mutex};

use universe::laws::{Gravitation, Law, Motion};
use universe::scheduler::{Scheduler, SchedulerConfig};
use universe::space::{ManualClock, Space, Time};
use universe::thing::{Thing, TickContext};
use universe::{Member, MemberKind, Universe, UniverseError};

/// Records every delta it sees and hands on `delta * factor`
struct Probe {
    label: &'static str,
    factor: f64,
    seen: Arc<Mutex<Vec<(&'static str, f64)>>>,
}

impl Thing for Probe {
    fn happen(&mut self, delta: f64, _ctx: &mut TickContext<'_>) -> f64 {
        self.seen.lock().unwrap().push((self.label, delta));
        delta * self.factor
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl Law for Probe {
    fn name(&self) -> &str {
        self.label
    }

    fn version(&self) -> &str {
        "0.1.0"
    }
}

fn xy_universe(time: Time) -> Universe {
    Universe::new([Member::from(Space::euclidean(&["x", "y"], time).unwrap())]).unwrap()
}

#[test]
fn test_tick_folds_delta_through_members() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut universe = xy_universe(Time::fixed(3.0));
    for (label, factor) in [("double", 2.0), ("halve", 0.5), ("last", 1.0)] {
        let probe = Probe {
            label,
            factor,
            seen: Arc::clone(&seen),
        };
        universe.add(Member::law(probe)).unwrap();
    }

    let delta = universe.happen();

    assert_eq!(delta, 3.0);
    assert_eq!(
        *seen.lock().unwrap(),
        vec![("double", 3.0), ("halve", 6.0), ("last", 3.0)]
    );
}

#[test]
fn test_body_children_share_the_fold() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut universe = xy_universe(Time::fixed(1.0));

    let mut body = universe.new_body().name("carrier").mass(1.0).build().unwrap();
    body.children_mut().add(Probe {
        label: "child",
        factor: 4.0,
        seen: Arc::clone(&seen),
    });
    universe.add(body).unwrap();
    universe
        .add(Member::law(Probe {
            label: "after",
            factor: 1.0,
            seen: Arc::clone(&seen),
        }))
        .unwrap();

    assert_eq!(universe.happen(), 4.0);
    assert_eq!(*seen.lock().unwrap(), vec![("child", 1.0), ("after", 4.0)]);
}

#[test]
fn test_manual_clock_drives_the_step() {
    let clock = ManualClock::new();
    let mut universe = Universe::new([
        Member::from(Space::euclidean(&["x"], Time::manual(&clock)).unwrap()),
        Member::from(Motion::new()),
    ])
    .unwrap();
    let body = universe.new_body().velocity(&[("x", 2.0)]).build().unwrap();
    let id = universe.add(body).unwrap();

    clock.advance(0.25);
    assert_eq!(universe.happen(), 0.25);
    assert_eq!(universe.body(id).unwrap().position().get("x"), Some(0.5));

    // Nothing pending: the body stays put
    assert_eq!(universe.happen(), 0.0);
    assert_eq!(universe.body(id).unwrap().position().get("x"), Some(0.5));
}

#[test]
fn test_membership_invariant() {
    let mut universe = xy_universe(Time::fixed(1.0));
    let motion = universe.add(Motion::new()).unwrap();
    let body = universe.new_body().build().unwrap();
    let body = universe.add(body).unwrap();

    assert!(universe.contains(motion));
    assert!(universe.contains(body));
    assert_eq!(universe.kind_of(motion), Some(MemberKind::Law));
    assert_eq!(universe.kind_of(body), Some(MemberKind::Body));
    assert_eq!(universe.laws().count(), 1);
    assert_eq!(universe.bodies().len(), 1);
    assert_eq!(universe.len(), 3);

    let removed = universe.remove(body).unwrap();
    assert_eq!(removed.kind(), MemberKind::Body);
    assert!(!universe.contains(body));
    assert!(universe.bodies().is_empty());
    assert!(removed.into_body().unwrap().attached_as().is_none());

    // Removing twice is a no-op
    assert!(universe.remove(body).is_none());
    assert_eq!(universe.len(), 2);
}

#[test]
fn test_removed_body_can_rejoin_its_universe() {
    let mut universe = xy_universe(Time::fixed(1.0));
    let body = universe.new_body().name("wanderer").build().unwrap();
    let first = universe.add(body).unwrap();

    let body = universe.remove(first).unwrap().into_body().unwrap();
    let second = universe.add(body).unwrap();

    assert_ne!(first, second);
    assert!(!universe.contains(first));
    assert_eq!(universe.body(second).unwrap().name(), "wanderer");
}

#[test]
fn test_body_from_another_universe_is_rejected() {
    let mut first = xy_universe(Time::fixed(1.0));
    let second = xy_universe(Time::fixed(1.0));
    let stranger = second.new_body().mass(1.0).build().unwrap();

    assert_eq!(first.add(stranger), Err(UniverseError::ForeignBody));
    assert!(first.bodies().is_empty());
    assert_eq!(first.len(), 1);
}

#[test]
fn test_incompatible_law_is_rejected() {
    struct Legacy;

    impl Thing for Legacy {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    impl Law for Legacy {
        fn name(&self) -> &str {
            "legacy"
        }

        fn version(&self) -> &str {
            "3.2.1"
        }

        fn api_version(&self) -> &str {
            "0.0.1"
        }
    }

    let mut universe = xy_universe(Time::fixed(1.0));
    let result = universe.add(Member::law(Legacy));
    assert!(matches!(result, Err(UniverseError::IncompatibleLaw { .. })));
    assert_eq!(universe.laws().count(), 0);
}

#[test]
fn test_observer_lifecycle() {
    let mut universe = xy_universe(Time::fixed(1.0));
    let body = universe.new_body().build().unwrap();
    let body = universe.add(body).unwrap();

    universe.set_observer(Some(body)).unwrap();
    assert_eq!(universe.observer(), Some(body));

    universe.remove(body);
    assert_eq!(universe.observer(), None);
    assert_eq!(
        universe.set_observer(Some(body)),
        Err(UniverseError::InvalidObserver(body))
    );
}

#[test]
fn test_law_can_be_tuned_in_place() {
    let mut universe = xy_universe(Time::fixed(1.0));
    let id = universe.add(Gravitation::default()).unwrap();

    universe
        .law_as_mut::<Gravitation>(id)
        .unwrap()
        .set_collision_distance(5.0);

    assert_eq!(universe.law_as::<Gravitation>(id).unwrap().collision_distance(), 5.0);
    assert!(universe.law_as::<Motion>(id).is_none());
}

#[test]
fn test_scheduler_drives_universes_until_stopped() {
    let mut scheduler = Scheduler::with_config(SchedulerConfig::default().with_logging());
    let mut universe = Universe::new([
        Member::from(Space::euclidean(&["x"], Time::fixed(1.0)).unwrap()),
        Member::from(Motion::new()),
    ])
    .unwrap();
    let body = universe.new_body().velocity(&[("x", 1.0)]).build().unwrap();
    let body = universe.add(body).unwrap();
    let id = scheduler.add_universe(universe);

    assert_eq!(scheduler.run_frames(3), 0);

    scheduler.start();
    assert_eq!(scheduler.run_frames(3), 3);
    scheduler.stop();
    assert_eq!(scheduler.tick(), 0);

    let universe = scheduler.universe(id).unwrap();
    assert_eq!(universe.tick_count(), 3);
    assert_eq!(universe.body(body).unwrap().position().get("x"), Some(3.0));
}
