//! Host-facing pipeline: wires the readiness gate, the boundary channel, and
//! the current spec batch into the API the UI shell consumes.

pub mod readiness;

use tracing::{debug, warn};

use crate::bridge::{BatchOutcome, ChartBridge, SurfaceChannel, SurfaceHandle, SurfaceInbox, SurfaceSignal};
use crate::core::spec::ChartSpec;
use crate::error::{ChartError, ChartResult};

pub use readiness::{GateFire, GateState, ReadinessGate};

/// User-facing progress indication. Carries no chart logic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderState {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// The data-producing collaborator: builds the whole batch synchronously, or
/// fails with a data error.
pub trait SpecProducer {
    fn build_all(&self) -> ChartResult<Vec<ChartSpec>>;
}

/// The chart pipeline owned by the host's single control context.
///
/// All gate transitions and outbound invocations happen here; inbound surface
/// signals are queued by [`SurfaceHandle`] and only applied when the host
/// calls [`ChartPipeline::process_signals`].
#[derive(Debug)]
pub struct ChartPipeline<S: SurfaceChannel> {
    bridge: ChartBridge<S>,
    inbox: SurfaceInbox,
    handle: SurfaceHandle,
    gate: ReadinessGate,
    batch: Vec<ChartSpec>,
    state: RenderState,
    last_error: Option<String>,
}

impl<S: SurfaceChannel> ChartPipeline<S> {
    #[must_use]
    pub fn new(surface: S) -> Self {
        let (handle, inbox) = SurfaceInbox::new();
        Self {
            bridge: ChartBridge::new(surface),
            inbox,
            handle,
            gate: ReadinessGate::new(),
            batch: Vec::new(),
            state: RenderState::Idle,
            last_error: None,
        }
    }

    /// Signal producer for the surface's execution context. Clonable and
    /// sendable; the surface calls it from wherever it runs.
    #[must_use]
    pub fn surface_handle(&self) -> SurfaceHandle {
        self.handle.clone()
    }

    #[must_use]
    pub fn render_state(&self) -> RenderState {
        self.state
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    #[must_use]
    pub fn charts(&self) -> &[ChartSpec] {
        &self.batch
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        self.bridge.surface()
    }

    /// Drains queued surface signals on the host control context and applies
    /// them. Returns the surface errors for the UI shell; a surface error is
    /// always recoverable and never stops other charts from rendering.
    pub fn process_signals(&mut self) -> Vec<ChartError> {
        let mut errors = Vec::new();
        for signal in self.inbox.drain() {
            match signal {
                SurfaceSignal::Ready => self.mark_surface_ready(),
                SurfaceSignal::Error(message) => {
                    warn!(message = %message, "surface reported an error");
                    if !self.gate.is_rendered() {
                        self.state = RenderState::Error;
                        self.last_error = Some(message.clone());
                    }
                    errors.push(ChartError::Surface(message));
                }
            }
        }
        errors
    }

    /// Marks the surface usable, from the host control context directly.
    /// For surface callbacks that already arrive on the host context;
    /// signals queued through [`SurfaceHandle`] reach the same place via
    /// [`ChartPipeline::process_signals`]. Idempotent.
    pub fn mark_surface_ready(&mut self) {
        self.bridge.mark_surface_ready();
        if self.gate.mark_surface_ready() == GateFire::RenderAll {
            self.render_all();
        }
    }

    /// Runs the producer and feeds the result into the gate.
    pub fn load_from(&mut self, producer: &dyn SpecProducer) {
        self.state = RenderState::Loading;
        match producer.build_all() {
            Ok(specs) => self.on_data_ready(specs),
            Err(err) => self.on_data_error(err.to_string()),
        }
    }

    /// Accepts a freshly built batch. Triggers the one-shot full render when
    /// the surface is already ready, otherwise waits for its signal. A batch
    /// arriving after the initial render supersedes the previous one and
    /// re-renders immediately; charts the new batch no longer carries must be
    /// removed explicitly.
    pub fn on_data_ready(&mut self, specs: Vec<ChartSpec>) {
        debug!(charts = specs.len(), "data ready");
        self.batch = specs;
        self.state = RenderState::Loading;
        let _ = self.gate.mark_data_ready();
        if self.gate.is_rendered() {
            self.render_all();
        }
    }

    pub fn on_data_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!(message = %message, "data producer failed");
        self.state = RenderState::Error;
        self.last_error = Some(message);
    }

    /// Adds or updates one chart. After the initial render this bypasses the
    /// gate and re-sends immediately — same id, same on-surface instance.
    /// Before it, the spec replaces (or joins) the pending batch.
    pub fn update_chart(&mut self, spec: ChartSpec) -> ChartResult<()> {
        match self.batch.iter_mut().find(|s| s.id() == spec.id()) {
            Some(slot) => *slot = spec.clone(),
            None => self.batch.push(spec.clone()),
        }
        if self.gate.is_rendered() {
            self.bridge.render_one(&spec)?;
        }
        Ok(())
    }

    /// Removes a chart by id. Unknown ids are a no-op.
    pub fn remove_chart(&mut self, chart_id: &str) {
        self.batch.retain(|s| s.id() != chart_id);
        if self.gate.is_rendered() {
            self.bridge.remove(chart_id);
        }
    }

    /// Clears the surface and the pending batch.
    pub fn clear(&mut self) {
        self.batch.clear();
        if self.gate.is_rendered() {
            self.bridge.clear_all();
        }
    }

    fn render_all(&mut self) {
        let outcome: BatchOutcome = self.bridge.render_batch(&self.batch);
        if outcome.all_failed() {
            self.state = RenderState::Error;
            self.last_error = outcome
                .failures
                .first()
                .map(|(id, err)| format!("chart '{id}': {err}"));
        } else {
            self.state = RenderState::Success;
        }
    }
}
