//! Fluent builder for constructing a [`Sim`].

use tsim_collision::{CollisionDetector, EventNetwork};
use tsim_core::{CoreError, RunConfig};
use tsim_schedule::{SchedulePolicy, ScheduleError, SpawnPoint, SpawnPointLibrary};
use tsim_world::{TrafficObject, World};

use crate::{Sim, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`RunConfig`] — start/end time, seed, collision cycle
///
/// # Optional inputs (have defaults)
///
/// | Method                     | Default                                       |
/// |----------------------------|-----------------------------------------------|
/// | `.spawn_point(p)`          | none; the run ends after its first slot       |
/// | `.traffic_object(o)`       | no static objects                             |
/// | `.collision_detector(d)`   | `CollisionDetector::new(collision_cycle_ms)`  |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config)
///     .spawn_point(ScenarioSpawnPoint::new(ego))
///     .spawn_point(PeriodicSpawnPoint::new(2_000, traffic))
///     .traffic_object(TrafficObject::new(Vector2d::new(200.0, 0.0), 0.0, 4.0, 2.0))
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config:       RunConfig,
    spawn_points: SpawnPointLibrary,
    world:        World,
    detector:     Option<CollisionDetector>,
    /// First spawn point registration failure, reported by `build`.
    rejected:     Option<ScheduleError>,
}

impl SimBuilder {
    pub fn new(config: RunConfig) -> Self {
        Self {
            spawn_points: SpawnPointLibrary::new(config.seed),
            config,
            world:        World::new(),
            detector:     None,
            rejected:     None,
        }
    }

    /// Register a spawn point.  Spawn points are polled in registration
    /// order; each gets its own RNG stream derived from the run seed.
    /// Registering more points than a `SpawnPointId` addresses makes
    /// [`build`][Self::build] fail.
    pub fn spawn_point(mut self, point: impl SpawnPoint + 'static) -> Self {
        if self.rejected.is_none() {
            if let Err(e) = self.spawn_points.add(point) {
                self.rejected = Some(e);
            }
        }
        self
    }

    pub fn traffic_object(mut self, object: TrafficObject) -> Self {
        self.world.add_traffic_object(object);
        self
    }

    pub fn collision_detector(mut self, detector: CollisionDetector) -> Self {
        self.detector = Some(detector);
        self
    }

    /// Validate the configuration and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;
        if let Some(e) = self.rejected {
            return Err(e.into());
        }
        let detector = self
            .detector
            .unwrap_or_else(|| CollisionDetector::new(self.config.collision_cycle_ms));
        if detector.cycle_time() <= 0 {
            return Err(CoreError::Config(format!(
                "collision detector cycle must be positive, got {} ms",
                detector.cycle_time()
            ))
            .into());
        }

        Ok(Sim {
            next_detection: self.config.start_time(),
            config:         self.config,
            world:          self.world,
            schedule:       SchedulePolicy::new(),
            spawn_points:   self.spawn_points,
            detector,
            events:         EventNetwork::new(),
            run_result:     Default::default(),
            started:        false,
        })
    }
}
