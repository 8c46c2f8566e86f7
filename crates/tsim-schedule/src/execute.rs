//! What each schedule item does when it runs.

use tracing::{error, info};
use tsim_core::{AgentId, ComponentId, LinkId, SpawnPointId, TaskId};
use tsim_world::{ChannelTarget, ComponentError, World};

use crate::{ItemKind, ScheduleError, ScheduleResult, SchedulePolicy, SpawnPointLibrary};

impl SchedulePolicy {
    /// Execute `task` against the world.
    ///
    /// Invalid items are skipped.  Items whose agent is gone or marked
    /// invalid retire the whole agent instead of running.  Init items are
    /// invalidated after their single execution.
    pub fn execute_task(
        &mut self,
        task: TaskId,
        world: &mut World,
        spawn_points: &mut SpawnPointLibrary,
    ) -> ScheduleResult<()> {
        let item = self.pool.get(task).ok_or(ScheduleError::UnknownTask(task))?;
        if !item.is_valid() {
            return Ok(());
        }
        let (kind, init) = (item.kind(), item.is_init());

        match kind {
            ItemKind::Spawn { point } => self.execute_spawn(task, point, world, spawn_points)?,
            ItemKind::Trigger { agent, component } => {
                if !self.ensure_alive(agent, world) {
                    return Ok(());
                }
                self.execute_trigger(agent, component, world)?;
            }
            ItemKind::Update { agent, component } => {
                if !self.ensure_alive(agent, world) {
                    return Ok(());
                }
                self.execute_update(agent, component, world)?;
            }
        }

        if init {
            if let Some(item) = self.pool.get_mut(task) {
                item.invalidate();
            }
        }
        Ok(())
    }

    fn execute_spawn(
        &mut self,
        task: TaskId,
        point: SpawnPointId,
        world: &mut World,
        spawn_points: &mut SpawnPointLibrary,
    ) -> ScheduleResult<()> {
        let now = self.current_time;
        let (spawn_point, rng) = spawn_points
            .get_mut(point)
            .ok_or(ScheduleError::UnknownSpawnPoint(point))?;

        let blueprint = spawn_point
            .next_agent(now, rng)
            .map_err(|source| ScheduleError::Spawn { point, source })?;
        if let Some(blueprint) = blueprint {
            let id = world.add_agent(blueprint)?;
            let agent = world.agent(id).ok_or(ScheduleError::AgentNotFound(id))?;
            self.spawn_agent(agent)?;
            info!(agent = %id, %point, time = %now, "agent spawned");
        }

        let delay = spawn_point.respawn_delay();
        if let Some(item) = self.pool.get_mut(task) {
            item.set_next_delay(delay);
        }
        Ok(())
    }

    fn execute_trigger(&mut self, agent_id: AgentId, component_id: ComponentId, world: &mut World) -> ScheduleResult<()> {
        let now = self.current_time;
        let agent = world.agent_mut(agent_id).ok_or(ScheduleError::AgentNotFound(agent_id))?;
        let (component, state) = agent
            .component_and_state_mut(component_id)
            .ok_or(ScheduleError::UnknownComponent { agent: agent_id, component: component_id })?;

        component
            .trigger_cycle(now, state)
            .map_err(|source| execution_error(agent_id, component_id, source))
    }

    fn execute_update(&mut self, agent_id: AgentId, component_id: ComponentId, world: &mut World) -> ScheduleResult<()> {
        let now = self.current_time;
        let agent = world.agent_mut(agent_id).ok_or(ScheduleError::AgentNotFound(agent_id))?;
        let unknown = |component| ScheduleError::UnknownComponent { agent: agent_id, component };

        let links: Vec<(LinkId, Vec<ChannelTarget>)> = agent
            .component(component_id)
            .ok_or(unknown(component_id))?
            .output_links()
            .iter()
            .map(|(link, targets)| (*link, targets.clone()))
            .collect();

        for (link, targets) in links {
            let signal = agent
                .component_mut(component_id)
                .ok_or(unknown(component_id))?
                .acquire_output_data(link, now)
                .map_err(|source| execution_error(agent_id, component_id, source))?;

            for target in &targets {
                agent
                    .component_mut(target.component)
                    .ok_or(unknown(target.component))?
                    .update_input_data(target.link, &signal, now)
                    .map_err(|source| execution_error(agent_id, target.component, source))?;
            }

            if let Some(component) = agent.component_mut(component_id) {
                component.release_output_data(link);
            }
        }
        Ok(())
    }

    /// `true` if `agent` exists and is valid.  Otherwise removes it from
    /// the schedule and queues it for removal from the world.
    fn ensure_alive(&mut self, agent: AgentId, world: &mut World) -> bool {
        if world.agent(agent).is_some_and(|a| a.is_valid()) {
            return true;
        }
        self.remove_from_schedule(agent);
        world.queue_agent_remove(agent);
        false
    }
}

fn execution_error(agent: AgentId, component: ComponentId, source: ComponentError) -> ScheduleError {
    error!(%agent, %component, error = %source, "component execution failed");
    ScheduleError::Execution { agent, component, source }
}
