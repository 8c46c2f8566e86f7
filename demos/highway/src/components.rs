//! Vehicle components: sensor → driver → dynamics.
//!
//! Each vehicle carries three components wired in a chain.  The sensor
//! measures the gap to the obstacle in the vehicle's lane, the driver turns
//! that into an acceleration command, and the dynamics integrate it.

use std::sync::Arc;

use tsim_collision::will_crash;
use tsim_core::{ComponentId, LinkId, SimTime, Vector2d};
use tsim_world::{
    AgentState, ChannelTarget, ComponentError, ComponentModel, ComponentResult, ComponentSpec, Signal,
    downcast_signal,
};

pub const SENSOR:   ComponentId = ComponentId(0);
pub const DRIVER:   ComponentId = ComponentId(1);
pub const DYNAMICS: ComponentId = ComponentId(2);

/// Every component uses link 0 for both directions.
const LINK: LinkId = LinkId(0);

/// Step of all three components, in milliseconds.
pub const CYCLE_MS: i64 = 100;

/// Lateral tolerance for "same lane as the obstacle".
const LANE_HALF_WIDTH: f64 = 1.75;

// ── Signals ───────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug)]
pub struct Perception {
    /// Bumper-to-obstacle distance; infinite when nothing is ahead.
    pub gap:   f64,
    pub speed: f64,
}

#[derive(Copy, Clone, Debug)]
pub struct AccelerationCommand(pub f64);

// ── Sensor ────────────────────────────────────────────────────────────────────

/// Measures the gap to one static obstacle.
pub struct Sensor {
    obstacle:   Vector2d,
    /// Distance from the obstacle's centre to its rear face.
    half_depth: f64,
    last:       Perception,
}

impl Sensor {
    pub fn new(obstacle: Vector2d, obstacle_length: f64) -> Self {
        Sensor {
            obstacle,
            half_depth: obstacle_length / 2.0,
            last:       Perception { gap: f64::INFINITY, speed: 0.0 },
        }
    }
}

impl ComponentModel for Sensor {
    fn trigger(&mut self, _time: SimTime, agent: &mut AgentState) -> ComponentResult<()> {
        let front = agent.position.x + agent.distance_reference_point_to_leading_edge;
        let rear_of_obstacle = self.obstacle.x - self.half_depth;
        let same_lane = (agent.position.y - self.obstacle.y).abs() < LANE_HALF_WIDTH;
        let gap = if same_lane && rear_of_obstacle >= front {
            rear_of_obstacle - front
        } else {
            f64::INFINITY
        };
        self.last = Perception { gap, speed: agent.velocity };
        Ok(())
    }

    fn update_output(&mut self, link: LinkId, _time: SimTime) -> ComponentResult<Signal> {
        if link != LINK {
            return Err(ComponentError::UnknownLink(link));
        }
        Ok(Arc::new(self.last))
    }
}

// ── Driver ────────────────────────────────────────────────────────────────────

/// Brakes as hard as it can once braking comfortably would no longer
/// avoid the obstacle.
pub struct Driver {
    comfort_brake: f64,
    max_brake:     f64,
    reaction_secs: f64,
    perception:    Option<Perception>,
    command:       f64,
}

impl Driver {
    pub fn new(comfort_brake: f64, max_brake: f64, reaction_secs: f64) -> Self {
        Driver { comfort_brake, max_brake, reaction_secs, perception: None, command: 0.0 }
    }
}

impl ComponentModel for Driver {
    fn trigger(&mut self, _time: SimTime, _agent: &mut AgentState) -> ComponentResult<()> {
        let Some(p) = self.perception else {
            return Ok(());
        };
        self.command = if !p.gap.is_finite() {
            0.0
        } else if will_crash(p.gap, p.speed, -self.comfort_brake, 0.0, 0.0, self.reaction_secs) {
            -self.max_brake
        } else if self.command < 0.0 {
            // Keep braking once started.
            -self.comfort_brake
        } else {
            0.0
        };
        Ok(())
    }

    fn update_output(&mut self, link: LinkId, _time: SimTime) -> ComponentResult<Signal> {
        if link != LINK {
            return Err(ComponentError::UnknownLink(link));
        }
        Ok(Arc::new(AccelerationCommand(self.command)))
    }

    fn update_input(&mut self, link: LinkId, signal: &Signal, _time: SimTime) -> ComponentResult<()> {
        match downcast_signal::<Perception>(signal) {
            Some(p) if link == LINK => {
                self.perception = Some(*p);
                Ok(())
            }
            Some(_) => Err(ComponentError::UnknownLink(link)),
            None => Err(ComponentError::Failed(format!("driver expected a perception on {link}"))),
        }
    }
}

// ── Dynamics ──────────────────────────────────────────────────────────────────

/// Point-mass longitudinal dynamics.  Leaves the simulation at `road_end`.
pub struct Dynamics {
    road_end:     f64,
    acceleration: f64,
}

impl Dynamics {
    pub fn new(road_end: f64) -> Self {
        Dynamics { road_end, acceleration: 0.0 }
    }
}

impl ComponentModel for Dynamics {
    fn trigger(&mut self, _time: SimTime, agent: &mut AgentState) -> ComponentResult<()> {
        let dt = CYCLE_MS as f64 / 1_000.0;
        agent.acceleration = self.acceleration;
        agent.velocity = (agent.velocity + self.acceleration * dt).max(0.0);
        let heading = Vector2d::new(agent.yaw.cos(), agent.yaw.sin());
        agent.position = agent.position + heading * (agent.velocity * dt);
        if agent.position.x > self.road_end {
            agent.mark_for_removal();
        }
        Ok(())
    }

    fn update_input(&mut self, link: LinkId, signal: &Signal, _time: SimTime) -> ComponentResult<()> {
        match downcast_signal::<AccelerationCommand>(signal) {
            Some(cmd) if link == LINK => {
                self.acceleration = cmd.0;
                Ok(())
            }
            Some(_) => Err(ComponentError::UnknownLink(link)),
            None => Err(ComponentError::Failed(format!("dynamics expected a command on {link}"))),
        }
    }
}

// ── Wiring ────────────────────────────────────────────────────────────────────

/// Driver parameters sampled per vehicle.
#[derive(Copy, Clone, Debug)]
pub struct DriverProfile {
    pub comfort_brake: f64,
    pub max_brake:     f64,
    pub reaction_secs: f64,
}

/// The three component specs of one vehicle, in id order.
pub fn vehicle_components(
    obstacle: Vector2d,
    obstacle_length: f64,
    road_end: f64,
    profile: DriverProfile,
) -> [ComponentSpec; 3] {
    [
        ComponentSpec::new("sensor", Sensor::new(obstacle, obstacle_length))
            .priority(0)
            .cycle_time(CYCLE_MS)
            .output(LINK, vec![ChannelTarget::new(DRIVER, LINK)]),
        ComponentSpec::new(
            "driver",
            Driver::new(profile.comfort_brake, profile.max_brake, profile.reaction_secs),
        )
        .priority(1)
        .cycle_time(CYCLE_MS)
        .output(LINK, vec![ChannelTarget::new(DYNAMICS, LINK)]),
        ComponentSpec::new("dynamics", Dynamics::new(road_end))
            .priority(2)
            .cycle_time(CYCLE_MS),
    ]
}
