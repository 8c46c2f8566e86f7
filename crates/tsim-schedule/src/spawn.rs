//! Spawn points: sources of new agents.
//!
//! Placement heuristics live in the implementations; the scheduler only
//! asks for "the next agent" and "when to ask again".

use tsim_core::{SimRng, SimTime, SpawnPointId};
use tsim_world::AgentBlueprint;

use crate::{ScheduleError, ScheduleResult, SpawnError};

/// A source of agents, polled by the spawn item it owns.
pub trait SpawnPoint: Send {
    /// Sample the next agent, or `None` if nothing should spawn now.
    fn next_agent(&mut self, time: SimTime, rng: &mut SimRng) -> Result<Option<AgentBlueprint>, SpawnError>;

    /// Delay in ms until this point is polled again.  Negative: never.
    fn respawn_delay(&self) -> i64;

    fn name(&self) -> &str {
        "spawn point"
    }
}

/// Every spawn point of a run, each with its own RNG stream.
pub struct SpawnPointLibrary {
    root:   SimRng,
    points: Vec<(Box<dyn SpawnPoint>, SimRng)>,
}

impl SpawnPointLibrary {
    pub fn new(seed: u64) -> Self {
        SpawnPointLibrary { root: SimRng::new(seed), points: Vec::new() }
    }

    /// Register `point` and return its id.  Fails once the library holds
    /// more points than a [`SpawnPointId`] can address.
    pub fn add(&mut self, point: impl SpawnPoint + 'static) -> ScheduleResult<SpawnPointId> {
        let index = self.points.len();
        let id = SpawnPointId::try_from(index).map_err(|_| ScheduleError::TooManySpawnPoints(index + 1))?;
        let rng = self.root.child(index as u64);
        self.points.push((Box::new(point), rng));
        Ok(id)
    }

    /// Ids of every registered point.  `add` guarantees each index fits.
    pub fn ids(&self) -> impl Iterator<Item = SpawnPointId> + '_ {
        (0..self.points.len()).filter_map(|i| SpawnPointId::try_from(i).ok())
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub(crate) fn get_mut(&mut self, id: SpawnPointId) -> Option<(&mut dyn SpawnPoint, &mut SimRng)> {
        self.points
            .get_mut(id.index())
            .map(|(point, rng)| (point.as_mut() as &mut dyn SpawnPoint, rng))
    }
}

impl std::fmt::Debug for SpawnPointLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.points.iter().map(|(p, _)| p.name())).finish()
    }
}

// ── Stock spawn points ────────────────────────────────────────────────────────

/// Spawns one predefined agent at the start of the run, then retires.
pub struct ScenarioSpawnPoint {
    blueprint: Option<AgentBlueprint>,
}

impl ScenarioSpawnPoint {
    pub fn new(blueprint: AgentBlueprint) -> Self {
        ScenarioSpawnPoint { blueprint: Some(blueprint) }
    }
}

impl SpawnPoint for ScenarioSpawnPoint {
    fn next_agent(&mut self, _time: SimTime, _rng: &mut SimRng) -> Result<Option<AgentBlueprint>, SpawnError> {
        Ok(self.blueprint.take())
    }

    fn respawn_delay(&self) -> i64 {
        -1
    }

    fn name(&self) -> &str {
        "scenario"
    }
}

/// Calls a sampler every `interval` ms, up to `limit` agents.
///
/// The sampler may decline (return `None`), e.g. when the entry lane is
/// still occupied; declined polls do not count against the limit.
pub struct PeriodicSpawnPoint<F> {
    sampler:  F,
    interval: i64,
    limit:    Option<usize>,
    spawned:  usize,
}

impl<F> PeriodicSpawnPoint<F>
where
    F: FnMut(SimTime, &mut SimRng) -> Option<AgentBlueprint> + Send,
{
    pub fn new(interval: i64, sampler: F) -> Self {
        PeriodicSpawnPoint { sampler, interval, limit: None, spawned: 0 }
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn spawned(&self) -> usize {
        self.spawned
    }

    fn exhausted(&self) -> bool {
        self.limit.is_some_and(|limit| self.spawned >= limit)
    }
}

impl<F> SpawnPoint for PeriodicSpawnPoint<F>
where
    F: FnMut(SimTime, &mut SimRng) -> Option<AgentBlueprint> + Send,
{
    fn next_agent(&mut self, time: SimTime, rng: &mut SimRng) -> Result<Option<AgentBlueprint>, SpawnError> {
        if self.interval <= 0 {
            return Err(SpawnError::Sampling(format!("non-positive interval {} ms", self.interval)));
        }
        if self.exhausted() {
            return Ok(None);
        }
        let blueprint = (self.sampler)(time, rng);
        if blueprint.is_some() {
            self.spawned += 1;
        }
        Ok(blueprint)
    }

    fn respawn_delay(&self) -> i64 {
        if self.exhausted() { -1 } else { self.interval }
    }

    fn name(&self) -> &str {
        "periodic"
    }
}
