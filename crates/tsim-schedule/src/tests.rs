//! Unit tests for tsim-schedule.

use std::sync::atomic::{AtomicU32, Ordering as AtomicOrdering};
use std::sync::{Arc, Mutex};

use tsim_core::{AgentId, ComponentId, LinkId, SimTime, TaskId, Vector2d};
use tsim_world::{
    downcast_signal, AgentBlueprint, AgentState, ChannelTarget, ComponentError, ComponentModel,
    ComponentResult, ComponentSpec, Signal, World,
};

use crate::{
    ItemKind, RunResult, ScheduleItem, ScheduleItemType, SchedulePolicy, SpawnPointLibrary,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn car() -> AgentState {
    AgentState::new(Vector2d::ZERO, 0.0, 10.0, 4.0, 2.0)
}

/// Counts compute steps in a shared counter and emits the count on link 0.
#[derive(Clone, Default)]
struct Tally(Arc<AtomicU32>);

impl Tally {
    fn count(&self) -> u32 {
        self.0.load(AtomicOrdering::SeqCst)
    }
}

impl ComponentModel for Tally {
    fn trigger(&mut self, _time: SimTime, _agent: &mut AgentState) -> ComponentResult<()> {
        self.0.fetch_add(1, AtomicOrdering::SeqCst);
        Ok(())
    }

    fn update_output(&mut self, _link: LinkId, _time: SimTime) -> ComponentResult<Signal> {
        Ok(Arc::new(self.count()))
    }
}

/// Records `(time, value)` for every signal received.
#[derive(Clone, Default)]
struct Recorder(Arc<Mutex<Vec<(i64, u32)>>>);

impl ComponentModel for Recorder {
    fn trigger(&mut self, _time: SimTime, _agent: &mut AgentState) -> ComponentResult<()> {
        Ok(())
    }

    fn update_input(&mut self, _link: LinkId, signal: &Signal, time: SimTime) -> ComponentResult<()> {
        if let Some(v) = downcast_signal::<u32>(signal) {
            self.0.lock().unwrap().push((time.millis(), *v));
        }
        Ok(())
    }
}

struct Broken;

impl ComponentModel for Broken {
    fn trigger(&mut self, _time: SimTime, _agent: &mut AgentState) -> ComponentResult<()> {
        Err(ComponentError::Failed("sensor offline".into()))
    }
}

fn policy_at(start: i64, end: i64) -> SchedulePolicy {
    let mut policy = SchedulePolicy::new();
    policy
        .init_schedule(SimTime(start), SimTime(end), &SpawnPointLibrary::new(1))
        .unwrap();
    policy
}

/// Pool a detached item (no agent behind it) directly on the timeline.
fn put(policy: &mut SchedulePolicy, item: ScheduleItem, offset: i64) -> TaskId {
    let task = policy.pool.insert(item);
    policy.insert_schedule_item(task, offset).unwrap();
    task
}

/// Drain the current slot, executing and re-scheduling each task.
/// Returns the drained items' kinds in execution order.
fn drain(
    policy: &mut SchedulePolicy,
    world: &mut World,
    spawns: &mut SpawnPointLibrary,
    result: &mut RunResult,
) -> Vec<ItemKind> {
    let mut kinds = Vec::new();
    while let Some(task) = policy.get_task(result) {
        kinds.push(policy.item(task).unwrap().kind());
        policy.execute_task(task, world, spawns).unwrap();
        policy.schedule_task(task).unwrap();
    }
    kinds
}

/// Two-component agent: C1 priority 1, C2 priority 2, both 100 ms cycle.
fn two_component_agent(world: &mut World, c1: Tally, c2: Tally) -> AgentId {
    world
        .add_agent(
            AgentBlueprint::new(car())
                .component(ComponentSpec::new("c1", c1).priority(1).cycle_time(100))
                .component(ComponentSpec::new("c2", c2).priority(2).cycle_time(100)),
        )
        .unwrap()
}

// ── Item priority ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod item {
    use std::cmp::Ordering;

    use tsim_core::SpawnPointId;

    use super::*;

    /// Trigger/update items for every component of a freshly added agent.
    fn items(priority: i32, specs: Vec<ComponentSpec>) -> Vec<(ScheduleItem, ScheduleItem)> {
        let mut world = World::new();
        let mut blueprint = AgentBlueprint::new(car()).priority(priority);
        for spec in specs {
            blueprint = blueprint.component(spec);
        }
        let id = world.add_agent(blueprint).unwrap();
        let agent = world.agent(id).unwrap();
        agent
            .components()
            .iter()
            .map(|c| {
                (
                    ScheduleItem::trigger(id, agent.priority(), c),
                    ScheduleItem::update(id, agent.priority(), c),
                )
            })
            .collect()
    }

    #[test]
    fn spawn_outranks_everything() {
        let spawn = ScheduleItem::spawn(SpawnPointId(0));
        let init = items(0, vec![ComponentSpec::new("i", Tally::default()).init(true)]);
        assert_eq!(spawn.compare_priority(&init[0].0), Ordering::Less);
        assert_eq!(init[0].1.compare_priority(&spawn), Ordering::Greater);
        assert_eq!(spawn.compare_priority(&ScheduleItem::spawn(SpawnPointId(1))), Ordering::Equal);
    }

    #[test]
    fn init_outranks_lower_priority_number() {
        let list = items(
            0,
            vec![
                ComponentSpec::new("regular", Tally::default()).priority(-10),
                ComponentSpec::new("init", Tally::default()).priority(50).init(true),
            ],
        );
        assert_eq!(list[1].0.compare_priority(&list[0].0), Ordering::Less);
    }

    #[test]
    fn component_priority_before_agent_priority() {
        let low_agent = items(9, vec![ComponentSpec::new("a", Tally::default()).priority(1)]);
        let high_agent = items(0, vec![ComponentSpec::new("b", Tally::default()).priority(2)]);
        assert_eq!(low_agent[0].0.compare_priority(&high_agent[0].0), Ordering::Less);

        let same_comp = items(0, vec![ComponentSpec::new("c", Tally::default()).priority(1)]);
        assert_eq!(same_comp[0].1.compare_priority(&low_agent[0].0), Ordering::Less);
    }

    #[test]
    fn trigger_before_update_of_same_component() {
        let list = items(0, vec![ComponentSpec::new("c", Tally::default())]);
        let (trigger, update) = &list[0];
        assert_eq!(trigger.compare_priority(update), Ordering::Less);
        assert_eq!(update.compare_priority(trigger), Ordering::Greater);
        assert_eq!(trigger.compare_priority(trigger), Ordering::Equal);
    }

    #[test]
    fn negative_respawn_delay_invalidates() {
        let mut spawn = ScheduleItem::spawn(SpawnPointId(0));
        assert!(spawn.is_valid());
        assert_eq!(spawn.next_time(), -1);
        assert!(!spawn.is_valid());
    }

    #[test]
    fn component_items_repeat_at_cycle_time() {
        let mut list = items(0, vec![ComponentSpec::new("c", Tally::default()).cycle_time(40)]);
        assert_eq!(list[0].0.next_time(), 40);
        assert!(list[0].0.is_valid());
        assert_eq!(list[0].1.item_type(), ScheduleItemType::Update);
    }
}

// ── Priority list ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod priority_list {
    use std::cmp::Ordering;

    use tsim_core::SpawnPointId;

    use crate::{ScheduleError, PriorityList};

    use super::*;

    #[test]
    fn insertion_keeps_list_sorted() {
        let mut world = World::new();
        let mut policy = policy_at(0, 1000);
        let mut blueprint = AgentBlueprint::new(car());
        for (i, prio) in [3, 1, 2, 1, 0].into_iter().enumerate() {
            blueprint = blueprint.component(
                ComponentSpec::new(format!("c{i}"), Tally::default())
                    .priority(prio)
                    .init(i == 4),
            );
        }
        let id = world.add_agent(blueprint).unwrap();
        let agent = world.agent(id).unwrap();

        let mut list = PriorityList::new(0);
        for component in agent.components().iter().rev() {
            let u = policy.pool.insert(ScheduleItem::update(id, 0, component));
            let t = policy.pool.insert(ScheduleItem::trigger(id, 0, component));
            list.insert_schedule_item(u, &policy.pool).unwrap();
            list.insert_schedule_item(t, &policy.pool).unwrap();
        }
        let spawn = policy.pool.insert(ScheduleItem::spawn(SpawnPointId(0)));
        list.insert_schedule_item(spawn, &policy.pool).unwrap();

        let tasks: Vec<_> = list.tasks().collect();
        assert_eq!(tasks.len(), 11);
        assert_eq!(tasks[0], spawn);
        for pair in tasks.windows(2) {
            let a = policy.pool.get(pair[0]).unwrap();
            let b = policy.pool.get(pair[1]).unwrap();
            assert_ne!(a.compare_priority(b), Ordering::Greater);
        }
        assert!(policy.pool.get(tasks[1]).unwrap().is_init());
    }

    #[test]
    fn equal_priority_keeps_insertion_order() {
        let mut policy = policy_at(0, 1000);
        let mut list = PriorityList::new(0);
        let a = policy.pool.insert(ScheduleItem::spawn(SpawnPointId(0)));
        let b = policy.pool.insert(ScheduleItem::spawn(SpawnPointId(1)));
        list.insert_schedule_item(a, &policy.pool).unwrap();
        list.insert_schedule_item(b, &policy.pool).unwrap();
        assert_eq!(list.remove_next_task().unwrap(), a);
        assert_eq!(list.remove_next_task().unwrap(), b);
        assert!(matches!(list.remove_next_task(), Err(ScheduleError::EmptyList)));
    }

    #[test]
    fn unknown_task_rejected() {
        let policy = policy_at(0, 1000);
        let mut list = PriorityList::new(0);
        assert!(matches!(
            list.insert_schedule_item(TaskId(99), &policy.pool),
            Err(ScheduleError::UnknownTask(TaskId(99)))
        ));
        assert!(list.is_empty());
    }

    #[test]
    fn subtract_underflow_leaves_offset_untouched() {
        let mut list = PriorityList::new(30);
        list.subtract_relative_offset(10).unwrap();
        assert_eq!(list.relative_offset(), 20);
        assert!(matches!(
            list.subtract_relative_offset(21),
            Err(ScheduleError::OffsetUnderflow { offset: 20, amount: 21 })
        ));
        assert_eq!(list.relative_offset(), 20);
    }
}

// ── Timeline ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod timeline {
    use tsim_core::SpawnPointId;

    use crate::{EndCondition, ScheduleError};

    use super::*;

    #[test]
    fn offsets_are_conserved() {
        let mut policy = policy_at(1000, 5000);
        let offsets = [50, 10, 30, 10, 0, 100, 75];
        let tasks: Vec<_> = offsets
            .iter()
            .map(|&o| (put(&mut policy, ScheduleItem::spawn(SpawnPointId(0)), o), o))
            .collect();

        for (task, offset) in &tasks {
            assert_eq!(policy.scheduled_time(*task), Some(SimTime(1000 + offset)));
        }
        assert_eq!(policy.slot_offsets(), vec![0, 10, 20, 20, 25, 25]);
    }

    #[test]
    fn splice_before_first_list() {
        let mut policy = policy_at(0, 5000);
        let late = put(&mut policy, ScheduleItem::spawn(SpawnPointId(0)), 80);
        let early = put(&mut policy, ScheduleItem::spawn(SpawnPointId(1)), 30);
        assert_eq!(policy.slot_offsets(), vec![30, 50]);
        assert_eq!(policy.scheduled_time(late), Some(SimTime(80)));
        assert_eq!(policy.scheduled_time(early), Some(SimTime(30)));
    }

    #[test]
    fn negative_offset_rejected() {
        let mut policy = policy_at(0, 1000);
        let task = policy.pool.insert(ScheduleItem::spawn(SpawnPointId(0)));
        assert!(matches!(
            policy.insert_schedule_item(task, -5),
            Err(ScheduleError::NegativeOffset { offset: -5, .. })
        ));
        assert!(policy.slot_offsets().is_empty());
    }

    #[test]
    fn time_only_moves_forward_after_drain() {
        let mut policy = policy_at(0, 1000);
        let mut result = RunResult::new();
        for o in [0, 40, 40, 90] {
            put(&mut policy, ScheduleItem::spawn(SpawnPointId(0)), o);
        }

        // Front slot not drained yet: no advance, and not exhausted.
        assert_eq!(policy.time_step(), 0);
        assert_eq!(policy.time_current(), SimTime(0));
        assert!(!policy.is_exhausted());

        let mut last = policy.time_current();
        let mut drained = 0;
        loop {
            while policy.get_task(&mut result).is_some() {
                drained += 1;
            }
            let delta = policy.time_step();
            assert!(policy.time_current() >= last);
            last = policy.time_current();
            if delta == 0 {
                break;
            }
        }
        assert_eq!(drained, 4);
        assert!(policy.is_exhausted());
        assert_eq!(last, SimTime(90));
        assert_eq!(result.end_condition(), None);
    }

    #[test]
    fn get_task_reports_time_over() {
        let mut policy = policy_at(0, 50);
        let mut result = RunResult::new();
        put(&mut policy, ScheduleItem::spawn(SpawnPointId(0)), 60);
        assert!(policy.get_task(&mut result).is_none());
        assert_eq!(policy.time_step(), 60);
        assert!(policy.get_task(&mut result).is_none());
        assert_eq!(result.end_condition(), Some(EndCondition::TimeOver));
    }

    #[test]
    fn clear_tasks_empties_everything() {
        let mut policy = policy_at(0, 50);
        put(&mut policy, ScheduleItem::spawn(SpawnPointId(0)), 10);
        policy.clear_tasks();
        assert_eq!(policy.pending_tasks(), 0);
        assert!(policy.pool().is_empty());
    }
}

// ── Agent scheduling ──────────────────────────────────────────────────────────

#[cfg(test)]
mod agents {
    use crate::ScheduleError;

    use super::*;

    #[test]
    fn drain_order_follows_priority() {
        let mut world = World::new();
        let mut spawns = SpawnPointLibrary::new(1);
        let mut result = RunResult::new();
        let mut policy = policy_at(0, 1000);
        let (c1, c2) = (Tally::default(), Tally::default());
        let id = two_component_agent(&mut world, c1.clone(), c2.clone());
        policy.spawn_agent(world.agent(id).unwrap()).unwrap();

        let expected = vec![
            ItemKind::Trigger { agent: id, component: ComponentId(0) },
            ItemKind::Update { agent: id, component: ComponentId(0) },
            ItemKind::Trigger { agent: id, component: ComponentId(1) },
            ItemKind::Update { agent: id, component: ComponentId(1) },
        ];
        assert_eq!(drain(&mut policy, &mut world, &mut spawns, &mut result), expected);
        assert_eq!(policy.time_step(), 100);
        assert_eq!(drain(&mut policy, &mut world, &mut spawns, &mut result), expected);
        assert_eq!((c1.count(), c2.count()), (2, 2));
    }

    #[test]
    fn mid_run_spawn_offset_is_elapsed_mod_cycle() {
        let mut world = World::new();
        let mut policy = policy_at(0, 1000);
        put(&mut policy, ScheduleItem::spawn(tsim_core::SpawnPointId(0)), 130);
        assert_eq!(policy.time_step(), 130);

        let id = world
            .add_agent(
                AgentBlueprint::new(car())
                    .component(ComponentSpec::new("a", Tally::default()).cycle_time(100))
                    .component(ComponentSpec::new("b", Tally::default()).cycle_time(100).offset_time(10).response_time(5))
                    .component(ComponentSpec::new("c", Tally::default()).init(true)),
            )
            .unwrap();
        policy.spawn_agent(world.agent(id).unwrap()).unwrap();

        let times: Vec<_> = policy
            .pool()
            .tasks_of(id)
            .iter()
            .map(|t| policy.scheduled_time(*t).unwrap().millis())
            .collect();
        // 130 mod 100 = 30 ms from now for the cyclic components.
        assert_eq!(times, vec![160, 160, 170, 175, 130, 130]);
    }

    #[test]
    fn non_positive_cycle_rejected() {
        let mut world = World::new();
        let mut policy = policy_at(0, 1000);
        let id = world
            .add_agent(AgentBlueprint::new(car()).component(ComponentSpec::new("c", Tally::default()).cycle_time(0)))
            .unwrap();
        assert!(matches!(
            policy.spawn_agent(world.agent(id).unwrap()),
            Err(ScheduleError::InvalidCycleTime { cycle_time: 0, .. })
        ));
        assert_eq!(policy.pending_tasks(), 0);
    }

    #[test]
    fn init_component_runs_once() {
        let mut world = World::new();
        let mut spawns = SpawnPointLibrary::new(1);
        let mut result = RunResult::new();
        let mut policy = policy_at(0, 1000);
        let (init, cyclic) = (Tally::default(), Tally::default());
        let id = world
            .add_agent(
                AgentBlueprint::new(car())
                    .component(ComponentSpec::new("cyclic", cyclic.clone()).cycle_time(100))
                    .component(ComponentSpec::new("init", init.clone()).init(true)),
            )
            .unwrap();
        policy.spawn_agent(world.agent(id).unwrap()).unwrap();

        let first = drain(&mut policy, &mut world, &mut spawns, &mut result);
        assert_eq!(first[0], ItemKind::Trigger { agent: id, component: ComponentId(1) });
        for _ in 0..3 {
            policy.time_step();
            drain(&mut policy, &mut world, &mut spawns, &mut result);
        }
        assert_eq!(init.count(), 1);
        assert_eq!(cyclic.count(), 4);
    }

    #[test]
    fn update_publishes_after_response_time() {
        let mut world = World::new();
        let mut spawns = SpawnPointLibrary::new(1);
        let mut result = RunResult::new();
        let mut policy = policy_at(0, 1000);
        let recorder = Recorder::default();
        let id = world
            .add_agent(
                AgentBlueprint::new(car())
                    .component(
                        ComponentSpec::new("sensor", Tally::default())
                            .priority(1)
                            .response_time(20)
                            .output(LinkId(0), vec![ChannelTarget::new(ComponentId(1), LinkId(0))]),
                    )
                    .component(ComponentSpec::new("driver", recorder.clone()).priority(2)),
            )
            .unwrap();
        policy.spawn_agent(world.agent(id).unwrap()).unwrap();

        drain(&mut policy, &mut world, &mut spawns, &mut result);
        assert!(recorder.0.lock().unwrap().is_empty());
        assert_eq!(policy.time_step(), 20);
        drain(&mut policy, &mut world, &mut spawns, &mut result);
        assert_eq!(*recorder.0.lock().unwrap(), vec![(20, 1)]);
        assert_eq!(world.agent(id).unwrap().component(ComponentId(0)).unwrap().buffered_outputs(), 0);
    }

    #[test]
    fn component_failure_is_fatal() {
        let mut world = World::new();
        let mut spawns = SpawnPointLibrary::new(1);
        let mut result = RunResult::new();
        let mut policy = policy_at(0, 1000);
        let id = world
            .add_agent(AgentBlueprint::new(car()).component(ComponentSpec::new("broken", Broken)))
            .unwrap();
        policy.spawn_agent(world.agent(id).unwrap()).unwrap();

        let task = policy.get_task(&mut result).unwrap();
        assert!(matches!(
            policy.execute_task(task, &mut world, &mut spawns),
            Err(ScheduleError::Execution { component: ComponentId(0), .. })
        ));
    }
}

// ── Invalidation & removal ────────────────────────────────────────────────────

#[cfg(test)]
mod removal {
    use super::*;

    #[test]
    fn invalidation_is_idempotent_and_inert() {
        let mut world = World::new();
        let mut spawns = SpawnPointLibrary::new(1);
        let mut result = RunResult::new();
        let mut policy = policy_at(0, 1000);
        let (c1, c2) = (Tally::default(), Tally::default());
        let id = two_component_agent(&mut world, c1.clone(), c2.clone());
        policy.spawn_agent(world.agent(id).unwrap()).unwrap();
        let tasks = policy.pool().tasks_of(id).to_vec();

        policy.remove_from_schedule(id);
        policy.remove_from_schedule(id);
        for task in &tasks {
            assert!(!policy.item(*task).unwrap().is_valid());
            policy.execute_task(*task, &mut world, &mut spawns).unwrap();
        }
        assert_eq!((c1.count(), c2.count()), (0, 0));

        assert!(policy.get_task(&mut result).is_none());
        assert!(policy.pool().is_empty());
        assert_eq!(policy.time_step(), 0);
    }

    #[test]
    fn invalid_agent_retires_at_next_task() {
        let mut world = World::new();
        let mut spawns = SpawnPointLibrary::new(1);
        let mut result = RunResult::new();
        let mut policy = policy_at(0, 1000);
        let c1 = Tally::default();
        let id = two_component_agent(&mut world, c1.clone(), Tally::default());
        policy.spawn_agent(world.agent(id).unwrap()).unwrap();
        world.agent_mut(id).unwrap().state_mut().mark_for_removal();

        let drained = drain(&mut policy, &mut world, &mut spawns, &mut result);
        assert_eq!(drained.len(), 1);
        assert_eq!(c1.count(), 0);
        assert_eq!(world.pending_removals(), 1);
        assert!(world.agent(id).is_some());
        assert_eq!(world.sync_global_data(), vec![id]);
        assert!(policy.pool().is_empty());
    }

    #[test]
    fn missing_agent_retires_without_error() {
        let mut world = World::new();
        let mut spawns = SpawnPointLibrary::new(1);
        let mut result = RunResult::new();
        let mut policy = policy_at(0, 1000);
        let id = two_component_agent(&mut world, Tally::default(), Tally::default());
        policy.spawn_agent(world.agent(id).unwrap()).unwrap();
        world.queue_agent_remove(id);
        world.sync_global_data();

        assert_eq!(drain(&mut policy, &mut world, &mut spawns, &mut result).len(), 1);
        assert!(policy.pool().is_empty());
    }
}

// ── Spawn points ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod spawning {
    use tsim_core::SpawnPointId;

    use crate::{PeriodicSpawnPoint, ScenarioSpawnPoint, ScheduleError};

    use super::*;

    fn scenario_car(tally: &Tally) -> AgentBlueprint {
        AgentBlueprint::new(car()).component(ComponentSpec::new("c", tally.clone()).cycle_time(100))
    }

    #[test]
    fn scenario_spawn_item_is_released_after_use() {
        let mut world = World::new();
        let mut result = RunResult::new();
        let tally = Tally::default();
        let mut spawns = SpawnPointLibrary::new(7);
        spawns.add(ScenarioSpawnPoint::new(scenario_car(&tally))).unwrap();

        let mut policy = SchedulePolicy::new();
        policy.init_schedule(SimTime(0), SimTime(1000), &spawns).unwrap();
        let spawn_task = policy.slot_tasks(0)[0];

        let kinds = drain(&mut policy, &mut world, &mut spawns, &mut result);
        assert_eq!(world.agent_count(), 1);
        assert!(matches!(kinds[0], ItemKind::Spawn { .. }));
        // The new agent's items joined the slot being drained.
        assert_eq!(kinds.len(), 3);
        assert_eq!(tally.count(), 1);
        assert!(policy.item(spawn_task).is_none());
        assert!(!policy.slot_tasks(0).contains(&spawn_task));
    }

    #[test]
    fn periodic_spawn_point_respects_limit() {
        let mut world = World::new();
        let mut result = RunResult::new();
        let mut spawns = SpawnPointLibrary::new(7);
        spawns.add(
            PeriodicSpawnPoint::new(500, |_, _| {
                Some(AgentBlueprint::new(car()).component(ComponentSpec::new("c", Tally::default())))
            })
            .limit(2),
        )
        .unwrap();

        let mut policy = SchedulePolicy::new();
        policy.init_schedule(SimTime(0), SimTime(2000), &spawns).unwrap();
        let mut spawned_at = Vec::new();
        loop {
            let before = world.agent_count();
            drain(&mut policy, &mut world, &mut spawns, &mut result);
            if world.agent_count() > before {
                spawned_at.push(policy.time_current().millis());
            }
            if result.is_end_condition() || policy.time_step() == 0 {
                break;
            }
        }
        assert_eq!(spawned_at, vec![0, 500]);
        assert_eq!(world.agent_count(), 2);
    }

    #[test]
    fn zero_respawn_delay_rejected() {
        let mut world = World::new();
        let mut result = RunResult::new();
        let mut spawns = SpawnPointLibrary::new(7);
        spawns.add(PeriodicSpawnPoint::new(0, |_, _| None)).unwrap();
        let mut policy = SchedulePolicy::new();
        policy.init_schedule(SimTime(0), SimTime(100), &spawns).unwrap();

        let task = policy.get_task(&mut result).unwrap();
        assert!(matches!(
            policy.execute_task(task, &mut world, &mut spawns),
            Err(ScheduleError::Spawn { .. })
        ));
    }

    #[test]
    fn child_rngs_are_reproducible() {
        let sample = |seed| {
            let mut spawns = SpawnPointLibrary::new(seed);
            let seen = Arc::new(Mutex::new(Vec::new()));
            let sink = Arc::clone(&seen);
            spawns.add(PeriodicSpawnPoint::new(100, move |_, rng: &mut tsim_core::SimRng| {
                sink.lock().unwrap().push(rng.gen_range(0..1000_u32));
                None
            }))
            .unwrap();
            let mut world = World::new();
            let mut result = RunResult::new();
            let mut policy = SchedulePolicy::new();
            policy.init_schedule(SimTime(0), SimTime(300), &spawns).unwrap();
            loop {
                drain(&mut policy, &mut world, &mut spawns, &mut result);
                if result.is_end_condition() || policy.time_step() == 0 {
                    break;
                }
            }
            let values = seen.lock().unwrap().clone();
            values
        };
        assert_eq!(sample(3).len(), 4);
        assert_eq!(sample(3), sample(3));
    }

    #[test]
    fn ids_follow_registration_order() {
        let mut spawns = SpawnPointLibrary::new(7);
        let first = spawns.add(PeriodicSpawnPoint::new(100, |_, _| None)).unwrap();
        let second = spawns.add(PeriodicSpawnPoint::new(100, |_, _| None)).unwrap();
        assert_eq!((first, second), (SpawnPointId(0), SpawnPointId(1)));
        assert_eq!(spawns.ids().collect::<Vec<_>>(), vec![first, second]);
    }

    #[test]
    fn library_refuses_more_points_than_ids() {
        let mut spawns = SpawnPointLibrary::new(7);
        for _ in 0..=u16::MAX as usize {
            spawns.add(PeriodicSpawnPoint::new(100, |_, _| None)).unwrap();
        }
        assert_eq!(spawns.len(), u16::MAX as usize + 1);
        assert!(matches!(
            spawns.add(PeriodicSpawnPoint::new(100, |_, _| None)),
            Err(ScheduleError::TooManySpawnPoints(n)) if n == u16::MAX as usize + 2
        ));
        assert_eq!(spawns.len(), u16::MAX as usize + 1);
        assert_eq!(spawns.ids().last(), Some(SpawnPointId(u16::MAX)));
    }
}
