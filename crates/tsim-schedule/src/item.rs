//! Schedule items and the pool that owns them.
//!
//! Items never hold references to agents or components.  They carry ids
//! plus a snapshot of the priority values captured when the agent was
//! spawned, and are looked up by [`TaskId`] wherever they are queued.

use std::cmp::Ordering;

use tsim_core::{AgentId, ComponentId, SpawnPointId, TaskId};
use tsim_world::Component;

#[cfg(feature = "fx-hash")]
type Map<K, V> = rustc_hash::FxHashMap<K, V>;
#[cfg(not(feature = "fx-hash"))]
type Map<K, V> = std::collections::HashMap<K, V>;

// ── Item data ─────────────────────────────────────────────────────────────────

/// Coarse item variant, used for logging and for ordering within a slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScheduleItemType {
    Spawn,
    Trigger,
    Update,
}

/// What an item does when executed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ItemKind {
    /// Ask a spawn point for a new agent.
    Spawn { point: SpawnPointId },
    /// Run one compute step of a component.
    Trigger { agent: AgentId, component: ComponentId },
    /// Publish a component's outputs to its link targets.
    Update { agent: AgentId, component: ComponentId },
}

/// Priority values captured from the component and its agent at spawn time.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskPriority {
    pub init:      bool,
    pub component: i32,
    pub agent:     i32,
}

#[derive(Clone, Debug)]
pub struct ScheduleItem {
    kind:       ItemKind,
    priority:   TaskPriority,
    /// Cycle time for trigger/update items; the spawn point's re-spawn
    /// delay for spawn items (set during execution).
    next_delay: i64,
    valid:      bool,
}

impl ScheduleItem {
    pub fn spawn(point: SpawnPointId) -> Self {
        ScheduleItem {
            kind:       ItemKind::Spawn { point },
            priority:   TaskPriority::default(),
            next_delay: -1,
            valid:      true,
        }
    }

    pub fn trigger(agent: AgentId, agent_priority: i32, component: &Component) -> Self {
        Self::for_component(ItemKind::Trigger { agent, component: component.id() }, agent_priority, component)
    }

    pub fn update(agent: AgentId, agent_priority: i32, component: &Component) -> Self {
        Self::for_component(ItemKind::Update { agent, component: component.id() }, agent_priority, component)
    }

    fn for_component(kind: ItemKind, agent_priority: i32, component: &Component) -> Self {
        ScheduleItem {
            kind,
            priority: TaskPriority {
                init:      component.is_init(),
                component: component.priority(),
                agent:     agent_priority,
            },
            next_delay: component.cycle_time(),
            valid: true,
        }
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn item_type(&self) -> ScheduleItemType {
        match self.kind {
            ItemKind::Spawn { .. } => ScheduleItemType::Spawn,
            ItemKind::Trigger { .. } => ScheduleItemType::Trigger,
            ItemKind::Update { .. } => ScheduleItemType::Update,
        }
    }

    pub fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// The agent this item acts on, `None` for spawn items.
    pub fn agent(&self) -> Option<AgentId> {
        match self.kind {
            ItemKind::Spawn { .. } => None,
            ItemKind::Trigger { agent, .. } | ItemKind::Update { agent, .. } => Some(agent),
        }
    }

    pub fn is_init(&self) -> bool {
        self.priority.init
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn invalidate(&mut self) {
        self.valid = false;
    }

    /// Offset at which this item wants to run again after executing.
    ///
    /// A spawn item whose spawn point reported a negative delay is
    /// invalidated here and never re-scheduled.
    pub fn next_time(&mut self) -> i64 {
        if matches!(self.kind, ItemKind::Spawn { .. }) && self.next_delay < 0 {
            self.valid = false;
        }
        self.next_delay
    }

    pub(crate) fn set_next_delay(&mut self, delay: i64) {
        self.next_delay = delay;
    }

    /// Order two items that share a time slot.  `Less` means `self` runs
    /// first; `Equal` keeps insertion order.
    ///
    /// Spawn items run before everything else, init items before regular
    /// ones, then lower component priority, then lower agent priority, and
    /// finally a trigger before an update.
    pub fn compare_priority(&self, other: &ScheduleItem) -> Ordering {
        use ScheduleItemType::{Spawn, Trigger, Update};

        match (self.item_type(), other.item_type()) {
            (Spawn, Spawn) => return Ordering::Equal,
            (Spawn, _) => return Ordering::Less,
            (_, Spawn) => return Ordering::Greater,
            _ => {}
        }

        let (a, b) = (self.priority, other.priority);
        // `true` sorts after `false`, so compare reversed: init first.
        b.init
            .cmp(&a.init)
            .then(a.component.cmp(&b.component))
            .then(a.agent.cmp(&b.agent))
            .then_with(|| match (self.item_type(), other.item_type()) {
                (Trigger, Update) => Ordering::Less,
                (Update, Trigger) => Ordering::Greater,
                _ => Ordering::Equal,
            })
    }
}

// ── Item pool ─────────────────────────────────────────────────────────────────

/// Owner of every live schedule item, keyed by a never-reused [`TaskId`].
///
/// Also indexes trigger/update items by agent so that removing an agent
/// from the schedule does not need to walk the timeline.
#[derive(Debug, Default)]
pub struct ItemPool {
    items:     Map<TaskId, ScheduleItem>,
    by_agent:  Map<AgentId, Vec<TaskId>>,
    next_task: u64,
}

impl ItemPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, item: ScheduleItem) -> TaskId {
        let id = TaskId(self.next_task);
        self.next_task += 1;
        if let Some(agent) = item.agent() {
            self.by_agent.entry(agent).or_default().push(id);
        }
        self.items.insert(id, item);
        id
    }

    pub fn get(&self, id: TaskId) -> Option<&ScheduleItem> {
        self.items.get(&id)
    }

    pub fn get_mut(&mut self, id: TaskId) -> Option<&mut ScheduleItem> {
        self.items.get_mut(&id)
    }

    /// Drop an item for good.  Its id is never handed out again.
    pub fn release(&mut self, id: TaskId) -> Option<ScheduleItem> {
        let item = self.items.remove(&id)?;
        if let Some(agent) = item.agent() {
            if let Some(tasks) = self.by_agent.get_mut(&agent) {
                tasks.retain(|t| *t != id);
                if tasks.is_empty() {
                    self.by_agent.remove(&agent);
                }
            }
        }
        Some(item)
    }

    /// Invalidate every item belonging to `agent`.  Returns how many were
    /// affected.  The items stay queued and are released when dequeued.
    pub fn invalidate_agent(&mut self, agent: AgentId) -> usize {
        let Some(tasks) = self.by_agent.get(&agent) else {
            return 0;
        };
        let mut count = 0;
        for id in tasks {
            if let Some(item) = self.items.get_mut(id) {
                item.invalidate();
                count += 1;
            }
        }
        count
    }

    pub fn tasks_of(&self, agent: AgentId) -> &[TaskId] {
        self.by_agent.get(&agent).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.by_agent.clear();
    }
}
