//! Longitudinal crash prediction for two vehicles in the same lane.
//!
//! Both vehicles follow constant-acceleration motion until they reach
//! standstill; a vehicle never reverses.  The follower ("ego") is `gap`
//! metres behind the leader ("front"), measured bumper to bumper.  A gap
//! that shrinks to zero counts as a crash.
//!
//! A front vehicle with zero speed and zero acceleration is stationary.

/// Constant-acceleration motion clamped at standstill.
#[derive(Copy, Clone, Debug)]
struct Motion {
    velocity:     f64,
    acceleration: f64,
}

impl Motion {
    fn new(velocity: f64, acceleration: f64) -> Self {
        Motion { velocity: velocity.max(0.0), acceleration }
    }

    /// Time until standstill; infinite if the vehicle never stops.
    fn stop_time(self) -> f64 {
        if self.acceleration < 0.0 {
            self.velocity / -self.acceleration
        } else if self.velocity == 0.0 && self.acceleration == 0.0 {
            0.0
        } else {
            f64::INFINITY
        }
    }

    fn distance(self, t: f64) -> f64 {
        let t = t.min(self.stop_time());
        self.velocity * t + 0.5 * self.acceleration * t * t
    }

    fn speed(self, t: f64) -> f64 {
        let t = t.min(self.stop_time());
        self.velocity + self.acceleration * t
    }

    /// Motion from `t` onwards.
    fn after(self, t: f64) -> Motion {
        if t >= self.stop_time() {
            Motion::new(0.0, 0.0)
        } else {
            Motion::new(self.speed(t), self.acceleration)
        }
    }
}

/// `true` if the gap closes at any time in `[0, horizon]`.
fn gap_closes(gap: f64, ego: Motion, front: Motion, horizon: f64) -> bool {
    let gap_at = |t: f64| gap + front.distance(t) - ego.distance(t);
    if gap_at(0.0) <= 0.0 {
        return true;
    }

    let (ego_stop, front_stop) = (ego.stop_time(), front.stop_time());
    let mut candidates = vec![horizon, ego_stop, front_stop];
    // While both move, the gap is quadratic with its minimum where the
    // speeds match.
    let rel_accel = front.acceleration - ego.acceleration;
    if rel_accel > 0.0 {
        candidates.push((ego.velocity - front.velocity) / rel_accel);
    }
    if candidates
        .into_iter()
        .filter(|t| t.is_finite() && *t >= 0.0 && *t <= horizon)
        .any(|t| gap_at(t) <= 0.0)
    {
        return true;
    }

    if horizon.is_finite() || ego_stop.is_finite() {
        return false;
    }
    // Ego never stops: it catches up unless the front keeps pulling away.
    if front_stop.is_finite() {
        return true;
    }
    rel_accel < 0.0 || (rel_accel == 0.0 && front.velocity < ego.velocity)
}

/// Will ego hit the front vehicle if both brake right now?
///
/// `a_ego` and `a_front` are the (negative) decelerations applied until
/// each vehicle stops.
pub fn will_crash_during_brake(gap: f64, v_ego: f64, a_ego: f64, v_front: f64, a_front: f64) -> bool {
    gap_closes(gap, Motion::new(v_ego, a_ego), Motion::new(v_front, a_front), f64::INFINITY)
}

/// Will ego hit the front vehicle if it keeps its speed for `reaction_time`
/// seconds and then brakes with `a_ego_brake`?
pub fn will_crash(
    gap: f64,
    v_ego: f64,
    a_ego_brake: f64,
    v_front: f64,
    a_front: f64,
    reaction_time: f64,
) -> bool {
    let ego = Motion::new(v_ego, 0.0);
    let front = Motion::new(v_front, a_front);
    let reaction_time = reaction_time.max(0.0);
    if gap_closes(gap, ego, front, reaction_time) {
        return true;
    }

    let gap_after = gap + front.distance(reaction_time) - ego.distance(reaction_time);
    let front_after = front.after(reaction_time);
    will_crash_during_brake(gap_after, v_ego, a_ego_brake, front_after.velocity, front_after.acceleration)
}
