//! Pipeline components and the signals flowing between them.
//!
//! # Design
//!
//! A [`Component`] is the scheduler-facing shell around a user-supplied
//! [`ComponentModel`].  The shell carries the timing configuration the
//! scheduler reads (priority, cycle, offset, response time, init flag) and
//! the output channel table; the model holds the actual formulas.
//!
//! Signals are type-erased behind [`SignalData`] and shared as
//! `Arc<dyn SignalData>`, so one output can fan out to several inputs
//! without copying.  Receivers recover the concrete type with
//! [`downcast_signal`].

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tsim_core::{ComponentId, LinkId, SimTime};

use crate::{AgentState, ComponentError, ComponentResult};

// ── Signals ───────────────────────────────────────────────────────────────────

/// Any value that can travel over a channel.
///
/// Blanket-implemented for every `Any + Debug + Send + Sync` type.
pub trait SignalData: Any + fmt::Debug + Send + Sync {
    #[doc(hidden)]
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any + fmt::Debug + Send + Sync> SignalData for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A shared, immutable signal value.
pub type Signal = Arc<dyn SignalData>;

/// Borrow the concrete value behind `signal`, or `None` if it is not a `T`.
pub fn downcast_signal<T: 'static>(signal: &Signal) -> Option<&T> {
    // Deref to the trait object first so the call dispatches through the
    // vtable rather than hitting the blanket impl on `Arc` itself.
    let data: &dyn SignalData = &**signal;
    data.as_any().downcast_ref::<T>()
}

// ── Model trait ───────────────────────────────────────────────────────────────

/// Pluggable component behavior (sensor, driver model, dynamics, …).
///
/// Only [`trigger`][Self::trigger] is required.  Components without outputs
/// or inputs can rely on the default link handlers, which reject every link.
pub trait ComponentModel: Send + 'static {
    /// Compute step for the current cycle.
    ///
    /// `agent` is the owning agent's physical state; dynamics components
    /// write to it, everything else usually only reads it.
    fn trigger(&mut self, time: SimTime, agent: &mut AgentState) -> ComponentResult<()>;

    /// Produce the value for output `link` from the last compute step.
    fn update_output(&mut self, link: LinkId, _time: SimTime) -> ComponentResult<Signal> {
        Err(ComponentError::UnknownLink(link))
    }

    /// Accept a value arriving on input `link`.
    fn update_input(
        &mut self,
        link:    LinkId,
        _signal: &Signal,
        _time:   SimTime,
    ) -> ComponentResult<()> {
        Err(ComponentError::UnknownLink(link))
    }
}

// ── Channels ──────────────────────────────────────────────────────────────────

/// Destination of one output channel: an input slot of a sibling component.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChannelTarget {
    pub component: ComponentId,
    pub link:      LinkId,
}

impl ChannelTarget {
    #[inline]
    pub fn new(component: ComponentId, link: LinkId) -> Self {
        Self { component, link }
    }
}

// ── ComponentSpec ─────────────────────────────────────────────────────────────

/// Declarative description of a component, consumed by the agent factory.
///
/// ```rust,ignore
/// let spec = ComponentSpec::new("sensor", SensorModel::default())
///     .priority(1)
///     .cycle_time(100)
///     .response_time(20)
///     .output(LinkId(0), vec![ChannelTarget::new(ComponentId(1), LinkId(0))]);
/// ```
pub struct ComponentSpec {
    pub(crate) name:          String,
    pub(crate) priority:      i32,
    pub(crate) cycle_time:    i64,
    pub(crate) offset_time:   i64,
    pub(crate) response_time: i64,
    pub(crate) init:          bool,
    pub(crate) outputs:       Vec<(LinkId, Vec<ChannelTarget>)>,
    pub(crate) model:         Box<dyn ComponentModel>,
}

impl ComponentSpec {
    /// A component with priority 0, a 100 ms cycle and no offset, latency,
    /// or outputs.
    pub fn new(name: impl Into<String>, model: impl ComponentModel) -> Self {
        Self {
            name:          name.into(),
            priority:      0,
            cycle_time:    100,
            offset_time:   0,
            response_time: 0,
            init:          false,
            outputs:       Vec::new(),
            model:         Box::new(model),
        }
    }

    /// Scheduling priority; lower numbers run first within a time slot.
    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn cycle_time(mut self, ms: i64) -> Self {
        self.cycle_time = ms;
        self
    }

    pub fn offset_time(mut self, ms: i64) -> Self {
        self.offset_time = ms;
        self
    }

    /// Delay between the compute step and output availability.
    pub fn response_time(mut self, ms: i64) -> Self {
        self.response_time = ms;
        self
    }

    /// Mark the component as one-shot: it runs exactly once, at spawn time.
    pub fn init(mut self, init: bool) -> Self {
        self.init = init;
        self
    }

    /// Register output channel `link` feeding `targets`.
    ///
    /// Registering the same link twice is rejected when the agent is built.
    pub fn output(mut self, link: LinkId, targets: Vec<ChannelTarget>) -> Self {
        self.outputs.push((link, targets));
        self
    }
}

// ── Component ─────────────────────────────────────────────────────────────────

/// One pipeline stage of an agent.
pub struct Component {
    id:            ComponentId,
    name:          String,
    priority:      i32,
    cycle_time:    i64,
    offset_time:   i64,
    response_time: i64,
    init:          bool,
    output_links:  BTreeMap<LinkId, Vec<ChannelTarget>>,
    /// Values acquired for propagation and not yet released.
    output_buffer: BTreeMap<LinkId, Signal>,
    model:         Box<dyn ComponentModel>,
}

impl Component {
    pub(crate) fn new(
        id:           ComponentId,
        spec:         ComponentSpec,
        output_links: BTreeMap<LinkId, Vec<ChannelTarget>>,
    ) -> Self {
        Self {
            id,
            name:          spec.name,
            priority:      spec.priority,
            cycle_time:    spec.cycle_time,
            offset_time:   spec.offset_time,
            response_time: spec.response_time,
            init:          spec.init,
            output_links,
            output_buffer: BTreeMap::new(),
            model:         spec.model,
        }
    }

    #[inline]
    pub fn id(&self) -> ComponentId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn priority(&self) -> i32 {
        self.priority
    }

    #[inline]
    pub fn cycle_time(&self) -> i64 {
        self.cycle_time
    }

    #[inline]
    pub fn offset_time(&self) -> i64 {
        self.offset_time
    }

    #[inline]
    pub fn response_time(&self) -> i64 {
        self.response_time
    }

    #[inline]
    pub fn is_init(&self) -> bool {
        self.init
    }

    /// Output channel table: local output link → input slots it feeds.
    pub fn output_links(&self) -> &BTreeMap<LinkId, Vec<ChannelTarget>> {
        &self.output_links
    }

    /// Run the model's compute step.
    pub fn trigger_cycle(&mut self, time: SimTime, agent: &mut AgentState) -> ComponentResult<()> {
        self.model.trigger(time, agent)
    }

    /// Ask the model for output `link` and hold the value until released.
    pub fn acquire_output_data(&mut self, link: LinkId, time: SimTime) -> ComponentResult<Signal> {
        if !self.output_links.contains_key(&link) {
            return Err(ComponentError::UnknownLink(link));
        }
        let signal = self.model.update_output(link, time)?;
        self.output_buffer.insert(link, Arc::clone(&signal));
        Ok(signal)
    }

    /// Hand `signal` to the model's input slot `link`.
    pub fn update_input_data(
        &mut self,
        link:   LinkId,
        signal: &Signal,
        time:   SimTime,
    ) -> ComponentResult<()> {
        self.model.update_input(link, signal, time)
    }

    /// Drop the buffered value of output `link`.
    pub fn release_output_data(&mut self, link: LinkId) {
        self.output_buffer.remove(&link);
    }

    /// Number of outputs acquired but not yet released.
    pub fn buffered_outputs(&self) -> usize {
        self.output_buffer.len()
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("priority", &self.priority)
            .field("cycle_time", &self.cycle_time)
            .field("offset_time", &self.offset_time)
            .field("response_time", &self.response_time)
            .field("init", &self.init)
            .finish_non_exhaustive()
    }
}
