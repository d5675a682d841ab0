use crate::sim::{Event, SimTime, Simulator, World};
use std::any::Any;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct DummyWorld;

impl World for DummyWorld {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

struct Push {
    id: u32,
    log: Arc<Mutex<Vec<(u32, SimTime)>>>,
}

impl Event for Push {
    fn execute(self: Box<Self>, sim: &mut Simulator, _world: &mut dyn World) {
        let Push { id, log } = *self;
        log.lock().expect("log lock").push((id, sim.now()));
    }
}

/// 执行时再调度一个相对延迟的事件
struct PushThenScheduleIn {
    id: u32,
    next_id: u32,
    delay: SimTime,
    log: Arc<Mutex<Vec<(u32, SimTime)>>>,
}

impl Event for PushThenScheduleIn {
    fn execute(self: Box<Self>, sim: &mut Simulator, _world: &mut dyn World) {
        let PushThenScheduleIn {
            id,
            next_id,
            delay,
            log,
        } = *self;
        log.lock().expect("log lock").push((id, sim.now()));
        sim.schedule_in(delay, Push { id: next_id, log });
    }
}

fn ids(log: &Arc<Mutex<Vec<(u32, SimTime)>>>) -> Vec<u32> {
    log.lock().expect("log lock").iter().map(|(id, _)| *id).collect()
}

#[test]
fn scheduled_events_order_by_time_then_seq() {
    let log = Arc::new(Mutex::new(Vec::new()));

    let mut sim = Simulator::default();
    for (id, at) in [(1, 10), (2, 5), (3, 10)] {
        sim.schedule(
            SimTime(at),
            Push {
                id,
                log: Arc::clone(&log),
            },
        );
    }
    assert_eq!(sim.pending_events(), 3);

    let mut world = DummyWorld;
    sim.run_until(SimTime(10), &mut world);

    assert_eq!(ids(&log), vec![2, 1, 3]);
    assert_eq!(sim.pending_events(), 0);
    assert_eq!(sim.executed_events(), 3);
    assert_eq!(sim.now(), SimTime(10));
}

#[test]
fn schedule_in_is_relative_to_the_executing_event() {
    let log = Arc::new(Mutex::new(Vec::new()));

    let mut sim = Simulator::default();
    sim.schedule(
        SimTime::from_millis(500),
        PushThenScheduleIn {
            id: 1,
            next_id: 2,
            delay: SimTime::from_millis(100),
            log: Arc::clone(&log),
        },
    );

    let mut world = DummyWorld;
    sim.run_until(SimTime::from_secs(1), &mut world);

    let got = log.lock().expect("log lock").clone();
    assert_eq!(
        got,
        vec![(1, SimTime::from_millis(500)), (2, SimTime::from_millis(600))]
    );
}

#[test]
fn run_until_executes_events_at_until_and_leaves_later_ones_queued() {
    let log = Arc::new(Mutex::new(Vec::new()));

    let mut sim = Simulator::default();
    for (id, at) in [(1, 0), (2, 5), (3, 10)] {
        sim.schedule(
            SimTime(at),
            Push {
                id,
                log: Arc::clone(&log),
            },
        );
    }

    let mut world = DummyWorld;
    sim.run_until(SimTime(5), &mut world);

    assert_eq!(ids(&log), vec![1, 2]);
    assert_eq!(sim.executed_events(), 2);
    assert_eq!(sim.now(), SimTime(5));
    assert_eq!(sim.pending_events(), 1);
}

#[test]
fn run_until_advances_time_even_if_there_are_no_events() {
    let mut sim = Simulator::default();
    let mut world = DummyWorld;

    sim.run_until(SimTime(7), &mut world);
    assert_eq!(sim.now(), SimTime(7));
    assert_eq!(sim.executed_events(), 0);
}
