//! Unit tests for tsim-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, ComponentId, TaskId};

    #[test]
    fn index_roundtrip() {
        let id = AgentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AgentId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn component_id_rejects_overflow() {
        assert!(ComponentId::try_from(70_000usize).is_err());
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(AgentId::INVALID.0, u32::MAX);
        assert_eq!(TaskId::INVALID.0, u64::MAX);
        assert_eq!(AgentId::default(), AgentId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
    }
}

#[cfg(test)]
mod time {
    use crate::SimTime;

    #[test]
    fn arithmetic() {
        let t = SimTime(100) + 250;
        assert_eq!(t, SimTime(350));
        assert_eq!(t - SimTime(100), 250);
        assert_eq!(SimTime(100).since(SimTime(400)), -300);
    }

    #[test]
    fn seconds() {
        assert!((SimTime(1_500).as_secs_f64() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn display() {
        assert_eq!(SimTime(20).to_string(), "20ms");
    }
}

#[cfg(test)]
mod geometry {
    use std::f64::consts::FRAC_PI_2;

    use crate::Vector2d;

    fn close(a: Vector2d, b: Vector2d) -> bool {
        (a - b).length() < 1e-9
    }

    #[test]
    fn rotate_quarter_turn() {
        let v = Vector2d::new(1.0, 0.0).rotate(FRAC_PI_2);
        assert!(close(v, Vector2d::new(0.0, 1.0)), "got {v}");
    }

    #[test]
    fn dot_and_cross() {
        let a = Vector2d::new(1.0, 2.0);
        let b = Vector2d::new(3.0, -1.0);
        assert_eq!(a.dot(b), 1.0);
        assert_eq!(a.cross(b), -7.0);
    }

    #[test]
    fn length_and_normalize() {
        let v = Vector2d::new(3.0, 4.0);
        assert_eq!(v.length(), 5.0);
        let n = v.normalized().unwrap();
        assert!((n.length() - 1.0).abs() < 1e-12);
        assert!(Vector2d::ZERO.normalized().is_none());
    }

    #[test]
    fn translate_adds() {
        let p = Vector2d::new(1.0, 1.0).translate(Vector2d::new(-2.0, 0.5));
        assert_eq!(p, Vector2d::new(-1.0, 1.5));
    }
}

#[cfg(test)]
mod config {
    use crate::RunConfig;

    #[test]
    fn default_is_valid() {
        assert!(RunConfig::default().validate().is_ok());
    }

    #[test]
    fn end_before_start_rejected() {
        let cfg = RunConfig { start_time_ms: 1_000, end_time_ms: 0, ..RunConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_collision_cycle_rejected() {
        let cfg = RunConfig { collision_cycle_ms: 0, ..RunConfig::default() };
        assert!(cfg.validate().is_err());
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SimRng::new(7);
        let mut b = SimRng::new(7);
        let xs: Vec<u32> = (0..8).map(|_| a.random()).collect();
        let ys: Vec<u32> = (0..8).map(|_| b.random()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn children_differ_by_offset() {
        let mut root_a = SimRng::new(7);
        let mut root_b = SimRng::new(7);
        let mut c1 = root_a.child(1);
        let mut c2 = root_b.child(2);
        assert_ne!(c1.random::<u64>(), c2.random::<u64>());
    }

    #[test]
    fn gen_range_in_bounds() {
        let mut rng = SimRng::new(3);
        for _ in 0..100 {
            let v: f64 = rng.gen_range(10.0..20.0);
            assert!((10.0..20.0).contains(&v));
        }
    }
}
