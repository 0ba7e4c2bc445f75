/// ----- SCHEDULING STRATEGIES -----
/// This stateless module decides which elevator should serve a new
/// request. A strategy gets a snapshot of every elevator in the fleet and
/// returns the index of the chosen one, or `None` if no elevator can take
/// the request. Elevators in maintenance are never chosen.

use tracing::{debug, warn};

use shared_resources::config::{ElevatorSettings, StrategyKind};
use shared_resources::direction::Direction;
use shared_resources::elevator_status::ElevatorStatus;
use shared_resources::request::Request;

pub trait SchedulingStrategy: Send + Sync {
    fn select_elevator(&self, fleet: &[ElevatorStatus], request: &Request) -> Option<usize>;

    fn name(&self) -> &'static str {
        "custom"
    }
}

impl<F> SchedulingStrategy for F
where
    F: Fn(&[ElevatorStatus], &Request) -> Option<usize> + Send + Sync,
{
    fn select_elevator(&self, fleet: &[ElevatorStatus], request: &Request) -> Option<usize> {
        self(fleet, request)
    }
}

pub fn from_kind(kind: StrategyKind, settings: &ElevatorSettings) -> Box<dyn SchedulingStrategy> {
    match kind {
        StrategyKind::FirstAvailable => Box::new(FirstAvailable),
        StrategyKind::LeastCost => Box::new(LeastCost::new(settings)),
    }
}

/// Picks the first elevator, in fleet order, that is not in maintenance.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstAvailable;

impl SchedulingStrategy for FirstAvailable {
    fn select_elevator(&self, fleet: &[ElevatorStatus], request: &Request) -> Option<usize> {
        let selected = fleet.iter().position(ElevatorStatus::is_available);
        match selected {
            Some(index) => debug!(
                elevator = %fleet[index].id,
                source = request.source_floor(),
                destination = request.destination_floor(),
                "first available elevator selected"
            ),
            None => warn!("No available elevator found for the request"),
        }
        selected
    }

    fn name(&self) -> &'static str {
        "first_available"
    }
}

/// SCAN-like cost: distance to the pickup floor, plus a penalty for
/// elevators that would have to turn around to get there.
#[derive(Debug, Clone, Copy)]
pub struct LeastCost {
    penalty: i64,
}

impl LeastCost {
    /// The penalty is one more than the height of the building, so any
    /// penalized cost is above every unpenalized one.
    pub fn new(settings: &ElevatorSettings) -> Self {
        Self::with_penalty(settings.span() + 1)
    }

    pub fn with_penalty(penalty: i64) -> Self {
        LeastCost { penalty: penalty }
    }

    pub fn penalty(&self) -> i64 {
        self.penalty
    }

    pub fn cost(&self, elevator: &ElevatorStatus, request: &Request) -> i64 {
        let source_floor = request.source_floor();
        let cost = (i64::from(elevator.floor) - i64::from(source_floor)).abs();

        let on_the_way = match elevator.direction {
            Direction::Idle => true,
            Direction::Up => source_floor > elevator.floor,
            Direction::Down => source_floor < elevator.floor,
        };
        if on_the_way { cost } else { cost + self.penalty }
    }
}

impl SchedulingStrategy for LeastCost {
    fn select_elevator(&self, fleet: &[ElevatorStatus], request: &Request) -> Option<usize> {
        let mut best: Option<(usize, i64)> = None;
        for (index, elevator) in fleet.iter().enumerate() {
            if !elevator.is_available() {
                continue;
            }
            let cost = self.cost(elevator, request);
            if best.map_or(true, |(_, min_cost)| cost < min_cost) {
                best = Some((index, cost));
            }
        }

        match best {
            Some((index, cost)) => debug!(
                elevator = %fleet[index].id,
                floor = fleet[index].floor,
                cost,
                "least cost elevator selected"
            ),
            None => warn!("No available elevator found for the request"),
        }
        best.map(|(index, _)| index)
    }

    fn name(&self) -> &'static str {
        "least_cost"
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use shared_resources::elevator_status::Behaviour;

    use super::*;

    fn elevator(id: &str, floor: i32, direction: Direction, destinations: Vec<i32>) -> ElevatorStatus {
        let behaviour = if destinations.is_empty() { Behaviour::Stopped } else { Behaviour::Moving };
        ElevatorStatus {
            id: id.to_string(),
            floor: floor,
            direction: direction,
            behaviour: behaviour,
            destinations: destinations,
        }
    }

    fn in_maintenance(mut status: ElevatorStatus) -> ElevatorStatus {
        status.behaviour = Behaviour::Maintenance;
        status
    }

    fn least_cost() -> LeastCost {
        LeastCost::new(&ElevatorSettings::new(0, 10))
    }

    #[test]
    fn first_available_takes_fleet_order() {
        let fleet = vec![
            elevator("one", 9, Direction::Idle, vec![]),
            elevator("two", 0, Direction::Idle, vec![]),
        ];
        assert_eq!(FirstAvailable.select_elevator(&fleet, &Request::new(0, 5)), Some(0));
    }

    #[test]
    fn first_available_skips_maintenance() {
        let fleet = vec![
            in_maintenance(elevator("one", 0, Direction::Idle, vec![])),
            elevator("two", 0, Direction::Idle, vec![]),
        ];
        assert_eq!(FirstAvailable.select_elevator(&fleet, &Request::new(0, 5)), Some(1));
    }

    #[test]
    fn nothing_selected_when_everyone_is_in_maintenance() {
        let fleet = vec![
            in_maintenance(elevator("one", 0, Direction::Idle, vec![])),
            in_maintenance(elevator("two", 3, Direction::Idle, vec![])),
        ];
        let request = Request::new(0, 5);
        assert_eq!(FirstAvailable.select_elevator(&fleet, &request), None);
        assert_eq!(least_cost().select_elevator(&fleet, &request), None);
        assert_eq!(least_cost().select_elevator(&[], &request), None);
    }

    #[test]
    fn penalty_dominates_the_building() {
        assert_eq!(least_cost().penalty(), 11);
        assert_eq!(LeastCost::new(&ElevatorSettings::new(-2, 100)).penalty(), 103);
    }

    #[test]
    fn cost_is_distance_for_idle_elevators() {
        let idle = elevator("one", 2, Direction::Idle, vec![]);
        assert_eq!(least_cost().cost(&idle, &Request::new(7, 1)), 5);
    }

    #[test]
    fn turning_around_is_penalized() {
        let going_up = elevator("one", 5, Direction::Up, vec![9]);
        assert_eq!(least_cost().cost(&going_up, &Request::new(7, 0)), 2);
        assert_eq!(least_cost().cost(&going_up, &Request::new(3, 0)), 2 + 11);
        assert_eq!(least_cost().cost(&going_up, &Request::new(5, 0)), 11);

        let going_down = elevator("two", 5, Direction::Down, vec![0]);
        assert_eq!(least_cost().cost(&going_down, &Request::new(3, 9)), 2);
        assert_eq!(least_cost().cost(&going_down, &Request::new(8, 9)), 3 + 11);
    }

    #[test]
    fn moving_elevator_picks_up_along_its_way() {
        let fleet = vec![
            elevator("idle", 0, Direction::Idle, vec![]),
            elevator("moving", 5, Direction::Up, vec![9]),
        ];
        assert_eq!(least_cost().select_elevator(&fleet, &Request::new(7, 8)), Some(1));
        assert_eq!(least_cost().select_elevator(&fleet, &Request::new(3, 8)), Some(0));
        assert_eq!(least_cost().select_elevator(&fleet, &Request::new(5, 8)), Some(0));
    }

    #[test]
    fn ties_go_to_the_first_elevator() {
        let fleet = vec![
            elevator("one", 2, Direction::Idle, vec![]),
            elevator("two", 6, Direction::Idle, vec![]),
        ];
        assert_eq!(least_cost().select_elevator(&fleet, &Request::new(4, 0)), Some(0));
    }

    #[test]
    fn cheap_elevator_in_maintenance_is_skipped() {
        let fleet = vec![
            elevator("far", 10, Direction::Idle, vec![]),
            in_maintenance(elevator("near", 4, Direction::Idle, vec![])),
        ];
        assert_eq!(least_cost().select_elevator(&fleet, &Request::new(4, 0)), Some(0));
    }

    #[test]
    fn closures_are_strategies() {
        let always_last = |fleet: &[ElevatorStatus], _: &Request| fleet.len().checked_sub(1);
        let fleet = vec![
            elevator("one", 0, Direction::Idle, vec![]),
            elevator("two", 0, Direction::Idle, vec![]),
        ];
        assert_eq!(always_last.select_elevator(&fleet, &Request::new(0, 1)), Some(1));
        assert_eq!(always_last.name(), "custom");
    }

    #[test]
    fn kinds_build_their_strategy() {
        let settings = ElevatorSettings::new(0, 10);
        assert_eq!(from_kind(StrategyKind::FirstAvailable, &settings).name(), "first_available");
        assert_eq!(from_kind(StrategyKind::LeastCost, &settings).name(), "least_cost");
    }

    fn arb_elevator() -> impl Strategy<Value = ElevatorStatus> {
        let direction = prop_oneof![Just(Direction::Idle), Just(Direction::Up), Just(Direction::Down)];
        (0..=10i32, direction, any::<bool>())
            .prop_map(|(floor, direction, maintenance)| {
                let destinations = if direction == Direction::Idle { vec![] } else { vec![(floor + 1) % 11] };
                let status = elevator("prop", floor, direction, destinations);
                if maintenance { in_maintenance(status) } else { status }
            })
    }

    proptest! {
        #[test]
        fn maintenance_is_never_selected(
            fleet in proptest::collection::vec(arb_elevator(), 0..6),
            source in 0..=10i32,
            destination in 0..=10i32,
        ) {
            let request = Request::new(source, destination);
            let strategies: Vec<Box<dyn SchedulingStrategy>> =
                vec![Box::new(FirstAvailable), Box::new(least_cost())];
            for strategy in strategies {
                match strategy.select_elevator(&fleet, &request) {
                    Some(index) => prop_assert!(fleet[index].is_available()),
                    None => prop_assert!(fleet.iter().all(|e| !e.is_available())),
                }
            }
        }

        #[test]
        fn least_cost_selects_the_first_minimum(
            fleet in proptest::collection::vec(arb_elevator(), 1..6),
            source in 0..=10i32,
        ) {
            let strategy = least_cost();
            let request = Request::new(source, 0);
            let expected = fleet
                .iter()
                .enumerate()
                .filter(|(_, e)| e.is_available())
                .min_by_key(|(index, e)| (strategy.cost(e, &request), *index))
                .map(|(index, _)| index);
            prop_assert_eq!(strategy.select_elevator(&fleet, &request), expected);
        }
    }
}
