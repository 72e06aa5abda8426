//! Unit tests for pt-engine.

use pt_core::{CarrierConfig, ChainId, Vec3};
use pt_path::{PathGraph, PathGraphBuilder, WaypointNode};

use crate::{
    CarrierEvent, CarrierObserver, EngineBuilder, EventLog, InputSnapshot, MovementEngine,
    NotifyError, NotifyResult,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Three nodes along +X at 0, 100 and 300.
fn line_graph() -> (PathGraph, ChainId) {
    let mut b = PathGraphBuilder::new();
    let c = b.add_chain(
        "main",
        [Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0), Vec3::new(300.0, 0.0, 0.0)],
    );
    (b.build().unwrap(), c)
}

/// Acceleration 50, push cap 200 at tier 3.
fn scenario_config() -> CarrierConfig {
    CarrierConfig {
        level3_speed: 200.0,
        acceleration: 50.0,
        ..CarrierConfig::default()
    }
}

fn engine(graph: &PathGraph, chain: ChainId, config: CarrierConfig) -> MovementEngine {
    MovementEngine::new(config, graph, chain).unwrap()
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

/// Fails every hook.
struct BrokenSink {
    calls: u32,
}

impl BrokenSink {
    fn fail(&mut self) -> NotifyResult {
        self.calls += 1;
        Err(NotifyError("speaker unplugged".into()))
    }
}

impl CarrierObserver for BrokenSink {
    fn on_node_changed(&mut self, _node: &WaypointNode) -> NotifyResult {
        self.fail()
    }
    fn on_reached_end(&mut self) -> NotifyResult {
        self.fail()
    }
    fn on_start_moving(&mut self) -> NotifyResult {
        self.fail()
    }
    fn on_moving(&mut self) -> NotifyResult {
        self.fail()
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use super::*;
    use crate::EngineError;
    use pt_core::CoreError;

    #[test]
    fn starts_at_rest_on_first_node() {
        let (g, c) = line_graph();
        let e = engine(&g, c, CarrierConfig::default());
        assert_eq!(e.state().index, 0);
        assert_eq!(e.state().fraction, 0.0);
        assert_eq!(e.speed(), 0.0);
        assert!(!e.is_at_end());
        assert_eq!(e.position(), Vec3::ZERO);
        assert_eq!(e.facing(), Vec3::X);
        assert_eq!(e.velocity(), Vec3::ZERO);
        assert_eq!(e.current_node(&g).id, g.chain_node(c, 0).id);
    }

    #[test]
    fn start_index_places_carrier_on_that_node() {
        let (g, c) = line_graph();
        let e = EngineBuilder::new(CarrierConfig::default())
            .start_chain(c)
            .start_index(1)
            .build(&g)
            .unwrap();
        assert_eq!(e.state().index, 1);
        assert_eq!(e.position(), Vec3::new(100.0, 0.0, 0.0));
    }

    #[test]
    fn initial_facing_follows_first_segment() {
        let mut b = PathGraphBuilder::new();
        let c = b.add_chain("up", [Vec3::ZERO, Vec3::new(0.0, 5.0, 0.0)]);
        let g = b.build().unwrap();
        let e = engine(&g, c, CarrierConfig::default());
        assert_eq!(e.facing(), Vec3::Y);
        assert!(e.rotation().mul_vec3(Vec3::X).abs_diff_eq(Vec3::Y, 1e-5));
    }

    #[test]
    fn initial_facing_defaults_on_terminal_node() {
        let (g, c) = line_graph();
        let e = EngineBuilder::new(CarrierConfig::default())
            .start_chain(c)
            .start_index(2)
            .build(&g)
            .unwrap();
        assert_eq!(e.facing(), Vec3::X);
    }

    #[test]
    fn unknown_chain_rejected() {
        let (g, _) = line_graph();
        let err = MovementEngine::new(CarrierConfig::default(), &g, ChainId(9)).unwrap_err();
        assert!(matches!(err, EngineError::Core(CoreError::ChainNotFound(ChainId(9)))));
    }

    #[test]
    fn start_index_out_of_range_rejected() {
        let (g, c) = line_graph();
        let err = EngineBuilder::new(CarrierConfig::default())
            .start_chain(c)
            .start_index(3)
            .build(&g)
            .unwrap_err();
        assert!(matches!(err, EngineError::StartIndexOutOfRange { index: 3, len: 3, .. }));
    }

    #[test]
    fn invalid_config_rejected() {
        let (g, c) = line_graph();
        let cfg = CarrierConfig { acceleration: 0.0, ..CarrierConfig::default() };
        let err = MovementEngine::new(cfg, &g, c).unwrap_err();
        assert!(matches!(err, EngineError::Core(CoreError::Config(_))));
    }
}

// ── Tick ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tick {
    use super::*;
    use pt_motion::MotionState;

    #[test]
    fn pushed_carrier_walks_the_line_and_stops_at_end() {
        let (g, c) = line_graph();
        let mut e = engine(&g, c, scenario_config());
        let mut log = EventLog::new();
        let push = InputSnapshot::pushing(3);

        // Tick 1: speed 50, halfway along the first segment.
        let r = e.tick(&g, 1.0, &push, &mut log);
        assert_eq!(r.motion, MotionState::Pushing);
        assert_eq!(r.speed, 50.0);
        assert_eq!(e.state().index, 0);
        assert!(approx(e.state().fraction, 0.5));
        assert!(r.position.abs_diff_eq(Vec3::new(50.0, 0.0, 0.0), 1e-3));
        assert_eq!(log.take(), vec![CarrierEvent::StartMoving]);

        // Tick 2: speed 100, crosses node 1 and carries 50 into the 200-long
        // second segment.
        let r = e.tick(&g, 1.0, &push, &mut log);
        assert_eq!(r.speed, 100.0);
        assert_eq!(e.state().index, 1);
        assert!(approx(e.state().fraction, 0.25));
        assert!(r.position.abs_diff_eq(Vec3::new(150.0, 0.0, 0.0), 1e-3));
        assert_eq!(
            log.take(),
            vec![CarrierEvent::NodeChanged(g.chain_node(c, 1).id), CarrierEvent::Moving]
        );

        // Tick 3: speed 150 lands exactly on the final node.
        let r = e.tick(&g, 1.0, &push, &mut log);
        assert!(r.reached_end);
        assert!(e.is_at_end());
        assert_eq!(e.state().index, 2);
        assert_eq!(e.state().fraction, 0.0);
        assert!(r.position.abs_diff_eq(Vec3::new(300.0, 0.0, 0.0), 1e-3));
        assert_eq!(
            log.take(),
            vec![
                CarrierEvent::NodeChanged(g.chain_node(c, 2).id),
                CarrierEvent::ReachedEnd,
                CarrierEvent::StopMoving,
            ]
        );

        // Tick 4: terminal, no further movement and no further cues.
        let r = e.tick(&g, 1.0, &push, &mut log);
        assert!(!r.reached_end);
        assert_eq!(r.displacement, Vec3::ZERO);
        assert_eq!(e.velocity(), Vec3::ZERO);
        assert!(e.position().abs_diff_eq(Vec3::new(300.0, 0.0, 0.0), 1e-3));
        assert!(log.take().is_empty());
    }

    #[test]
    fn long_tick_does_not_overshoot() {
        let (g, c) = line_graph();
        let cfg = CarrierConfig {
            level3_speed: 5_000.0,
            acceleration: 5_000.0,
            ..CarrierConfig::default()
        };
        let mut e = engine(&g, c, cfg);
        let mut log = EventLog::new();
        let r = e.tick(&g, 1.0, &InputSnapshot::pushing(3), &mut log);
        assert!(r.reached_end);
        assert!(e.position().abs_diff_eq(Vec3::new(300.0, 0.0, 0.0), 1e-3));
        assert_eq!(log.count(CarrierEvent::NodeChanged(g.chain_node(c, 1).id)), 1);
        assert_eq!(log.count(CarrierEvent::NodeChanged(g.chain_node(c, 2).id)), 1);
        assert_eq!(log.count(CarrierEvent::ReachedEnd), 1);
    }

    #[test]
    fn velocity_is_tick_displacement() {
        let (g, c) = line_graph();
        let mut e = engine(&g, c, scenario_config());
        let r = e.tick(&g, 0.5, &InputSnapshot::pushing(3), &mut EventLog::new());
        // speed 25 for half a second
        assert!(r.displacement.abs_diff_eq(Vec3::new(12.5, 0.0, 0.0), 1e-3));
        assert_eq!(e.velocity(), r.displacement);
    }

    #[test]
    fn idle_carrier_never_moves() {
        let (g, c) = line_graph();
        let mut e = engine(&g, c, scenario_config());
        let mut log = EventLog::new();
        for _ in 0..10 {
            let r = e.tick(&g, 0.1, &InputSnapshot::idle(), &mut log);
            assert_eq!(r.motion, MotionState::Stopped);
            assert_eq!(r.substeps, 0);
        }
        assert_eq!(e.position(), Vec3::ZERO);
        assert!(log.events.is_empty());
    }

    #[test]
    fn decays_to_rest_after_push_ends() {
        let (g, c) = line_graph();
        let mut e = engine(&g, c, scenario_config());
        let mut log = EventLog::without_moving_cue();
        e.tick(&g, 1.0, &InputSnapshot::pushing(3), &mut log);
        e.tick(&g, 1.0, &InputSnapshot::pushing(3), &mut log);
        assert_eq!(e.speed(), 100.0);

        e.tick(&g, 1.0, &InputSnapshot::idle(), &mut log);
        assert_eq!(e.speed(), 50.0);
        e.tick(&g, 1.0, &InputSnapshot::idle(), &mut log);
        assert_eq!(e.speed(), 0.0);
        assert_eq!(log.count(CarrierEvent::StopMoving), 1);

        let rest = e.position();
        e.tick(&g, 1.0, &InputSnapshot::idle(), &mut log);
        assert_eq!(e.position(), rest);
        assert_eq!(log.count(CarrierEvent::StopMoving), 1);
    }

    #[test]
    fn rolling_edges_notify_once() {
        let (g, c) = line_graph();
        let mut e = engine(&g, c, CarrierConfig::default());
        let mut log = EventLog::without_moving_cue();

        e.tick(&g, 0.1, &InputSnapshot::rolling_forward(), &mut log);
        e.tick(&g, 0.1, &InputSnapshot::rolling_forward(), &mut log);
        e.tick(&g, 0.1, &InputSnapshot::idle(), &mut log);
        e.tick(&g, 0.1, &InputSnapshot::idle(), &mut log);

        assert_eq!(log.count(CarrierEvent::StartRolling), 1);
        assert_eq!(log.count(CarrierEvent::StopRolling), 1);
        // The roll edge comes before the movement cue of the same tick.
        assert_eq!(&log.events[..2], &[CarrierEvent::StartRolling, CarrierEvent::StartMoving]);
    }

    #[test]
    fn backward_roll_never_regresses_past_origin() {
        let (g, c) = line_graph();
        let mut e = engine(&g, c, scenario_config());
        let mut log = EventLog::new();
        e.tick(&g, 1.0, &InputSnapshot::pushing(3), &mut log);
        assert!(approx(e.position().x, 50.0));

        for _ in 0..20 {
            e.tick(&g, 1.0, &InputSnapshot::rolling_backward(), &mut log);
            assert!(e.position().x >= 0.0);
            assert_eq!(e.state().index, 0);
        }
        assert_eq!(e.position(), Vec3::ZERO);
        assert_eq!(e.speed(), 0.0);
    }

    #[test]
    fn hitting_the_origin_stops_the_cue_that_tick() {
        let (g, c) = line_graph();
        let mut e = engine(&g, c, scenario_config());
        let mut log = EventLog::new();
        e.tick(&g, 0.2, &InputSnapshot::pushing(3), &mut log);
        assert!(approx(e.position().x, 2.0));
        log.take();

        // Rolls back more than the 2 units left before the origin.
        e.tick(&g, 1.0, &InputSnapshot::rolling_backward(), &mut log);
        assert_eq!(e.position(), Vec3::ZERO);
        assert_eq!(e.speed(), 0.0);
        assert_eq!(log.take(), vec![CarrierEvent::StartRolling, CarrierEvent::StopMoving]);

        e.tick(&g, 1.0, &InputSnapshot::rolling_backward(), &mut log);
        assert_eq!(log.count(CarrierEvent::StopMoving), 0);
    }

    #[test]
    fn arriving_from_rest_starts_and_stops_in_one_tick() {
        let (g, c) = line_graph();
        let cfg = CarrierConfig {
            level3_speed: 5_000.0,
            acceleration: 5_000.0,
            ..CarrierConfig::default()
        };
        let mut e = engine(&g, c, cfg);
        let mut log = EventLog::new();
        e.tick(&g, 1.0, &InputSnapshot::pushing(3), &mut log);
        assert_eq!(
            log.take(),
            vec![
                CarrierEvent::NodeChanged(g.chain_node(c, 1).id),
                CarrierEvent::NodeChanged(g.chain_node(c, 2).id),
                CarrierEvent::ReachedEnd,
                CarrierEvent::StartMoving,
                CarrierEvent::StopMoving,
            ]
        );
    }

    #[test]
    fn invalid_dt_leaves_carrier_untouched() {
        let (g, c) = line_graph();
        let mut e = engine(&g, c, scenario_config());
        let mut log = EventLog::new();
        e.tick(&g, 1.0, &InputSnapshot::pushing(3), &mut log);
        log.take();
        let state = e.state().clone();
        let position = e.position();

        for dt in [f32::NAN, f32::INFINITY, -1.0] {
            let r = e.tick(&g, dt, &InputSnapshot::pushing(3), &mut log);
            assert_eq!(r.displacement, Vec3::ZERO);
            assert_eq!(r.substeps, 0);
            assert_eq!(e.state(), &state);
            assert_eq!(e.position(), position);
        }
        assert!(log.events.is_empty());
        assert_eq!(e.speed(), 50.0);

        // A zero-length tick is still a valid one.
        e.tick(&g, 0.0, &InputSnapshot::pushing(3), &mut log);
        assert_eq!(e.position(), position);
    }

    #[test]
    fn rolling_back_across_a_node_notifies_it() {
        let (g, c) = line_graph();
        let mut e = EngineBuilder::new(scenario_config())
            .start_chain(c)
            .start_index(1)
            .build(&g)
            .unwrap();
        let mut log = EventLog::without_moving_cue();
        // speed -30 (capped), 30 back from node 1 into segment 0
        e.tick(&g, 1.0, &InputSnapshot::rolling_backward(), &mut log);
        assert_eq!(e.speed(), -30.0);
        assert_eq!(e.state().index, 0);
        assert!(approx(e.state().fraction, 0.7));
        assert!(e.position().abs_diff_eq(Vec3::new(70.0, 0.0, 0.0), 1e-3));
        assert!(log.events.contains(&CarrierEvent::NodeChanged(g.chain_node(c, 0).id)));
    }

    #[test]
    fn facing_stays_path_forward_while_reversing() {
        let (g, c) = line_graph();
        let mut e = engine(&g, c, scenario_config());
        let mut log = EventLog::new();
        e.tick(&g, 1.0, &InputSnapshot::pushing(3), &mut log);
        e.tick(&g, 1.0, &InputSnapshot::rolling_backward(), &mut log);
        let r = e.tick(&g, 0.5, &InputSnapshot::rolling_backward(), &mut log);
        assert!(r.displacement.x < 0.0);
        assert!(e.velocity().x < 0.0);
        assert!(e.facing().abs_diff_eq(Vec3::X, 1e-5));
    }

    #[test]
    fn locked_carrier_only_reports_halt() {
        let (g, c) = line_graph();
        let mut e = engine(&g, c, scenario_config());
        let mut log = EventLog::new();
        e.tick(&g, 1.0, &InputSnapshot::pushing(3), &mut log);
        log.take();
        let before = e.state().clone();

        let r = e.tick(&g, 1.0, &InputSnapshot::locked(), &mut log);
        assert!(r.halted);
        assert_eq!(r.displacement, Vec3::ZERO);
        assert_eq!(e.state(), &before);
        assert_eq!(log.take(), vec![CarrierEvent::Halted]);
    }

    #[test]
    fn physics_enabled_once_at_end() {
        let (g, c) = line_graph();
        let cfg = CarrierConfig { enable_physics_at_end: true, ..scenario_config() };
        let mut e = engine(&g, c, cfg);
        let mut log = EventLog::without_moving_cue();
        for _ in 0..8 {
            e.tick(&g, 1.0, &InputSnapshot::pushing(3), &mut log);
        }
        assert_eq!(log.count(CarrierEvent::ReachedEnd), 1);
        assert_eq!(log.count(CarrierEvent::PhysicsEnabled), 1);
        let end = log.events.iter().position(|&ev| ev == CarrierEvent::ReachedEnd).unwrap();
        assert_eq!(log.events[end + 1], CarrierEvent::PhysicsEnabled);
    }

    #[test]
    fn physics_not_requested_by_default() {
        let (g, c) = line_graph();
        let mut e = engine(&g, c, scenario_config());
        let mut log = EventLog::new();
        for _ in 0..8 {
            e.tick(&g, 1.0, &InputSnapshot::pushing(3), &mut log);
        }
        assert_eq!(log.count(CarrierEvent::ReachedEnd), 1);
        assert_eq!(log.count(CarrierEvent::PhysicsEnabled), 0);
    }

    #[test]
    fn failing_sink_does_not_stop_the_tick() {
        let (g, c) = line_graph();
        let mut e = engine(&g, c, scenario_config());
        let mut sink = BrokenSink { calls: 0 };

        let r = e.tick(&g, 1.0, &InputSnapshot::pushing(3), &mut sink);
        assert_eq!(r.sink_failures, 1);
        assert!(approx(e.position().x, 50.0));

        // node change + moving cue
        let r = e.tick(&g, 1.0, &InputSnapshot::pushing(3), &mut sink);
        assert_eq!(r.sink_failures, 2);
        assert!(approx(e.position().x, 150.0));

        // node change + end; the stop cue succeeds
        let r = e.tick(&g, 1.0, &InputSnapshot::pushing(3), &mut sink);
        assert_eq!(r.sink_failures, 2);
        assert!(e.is_at_end());
        assert_eq!(sink.calls, 5);
    }

    #[test]
    fn hands_over_to_successor_chain_mid_tick() {
        let mut b = PathGraphBuilder::new();
        let a = b.add_chain("a", [Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0)]);
        let n = b.add_chain("b", [Vec3::new(100.0, 0.0, 0.0), Vec3::new(200.0, 0.0, 0.0)]);
        b.link(a, n);
        let g = b.build().unwrap();

        let cfg = CarrierConfig { acceleration: 150.0, level3_speed: 200.0, ..CarrierConfig::default() };
        let mut e = engine(&g, a, cfg);
        let mut log = EventLog::without_moving_cue();
        let r = e.tick(&g, 1.0, &InputSnapshot::pushing(3), &mut log);

        assert!(!r.reached_end);
        assert_eq!(e.state().chain, n);
        assert_eq!(e.state().index, 0);
        assert!(approx(e.state().fraction, 0.5));
        assert!(e.position().abs_diff_eq(Vec3::new(150.0, 0.0, 0.0), 1e-3));
        assert_eq!(log.events[0], CarrierEvent::NodeChanged(g.chain_node(a, 1).id));
        assert_eq!(log.events[1], CarrierEvent::StartMoving);
    }

    #[test]
    fn time_since_push_resets_on_push() {
        let (g, c) = line_graph();
        let mut e = engine(&g, c, scenario_config());
        let mut sink = crate::NoopObserver;
        e.tick(&g, 0.25, &InputSnapshot::idle(), &mut sink);
        e.tick(&g, 0.25, &InputSnapshot::idle(), &mut sink);
        assert!(approx(e.time_since_push(), 0.5));
        e.tick(&g, 0.25, &InputSnapshot::pushing(1), &mut sink);
        assert_eq!(e.time_since_push(), 0.0);
    }
}

// ── EventLog ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod event_log {
    use super::*;
    use pt_core::NodeId;

    #[test]
    fn labels_are_stable() {
        assert_eq!(CarrierEvent::ReachedEnd.as_str(), "reached_end");
        assert_eq!(CarrierEvent::NodeChanged(NodeId(4)).as_str(), "node_changed");
        assert_eq!(CarrierEvent::NodeChanged(NodeId(4)).node(), Some(NodeId(4)));
        assert_eq!(CarrierEvent::Halted.node(), None);
    }

    #[test]
    fn take_empties_the_log() {
        let mut log = EventLog::new();
        log.on_start_moving().unwrap();
        log.on_moving().unwrap();
        assert_eq!(log.take().len(), 2);
        assert!(log.events.is_empty());
    }

    #[test]
    fn moving_cue_can_be_skipped() {
        let mut log = EventLog::without_moving_cue();
        log.on_moving().unwrap();
        log.on_stop_moving().unwrap();
        assert_eq!(log.events, vec![CarrierEvent::StopMoving]);
    }
}
