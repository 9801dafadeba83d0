//! The boundary channel: fire-and-forget outbound commands into the rendering
//! surface, and the inbound signal queue coming back.

pub mod codec;
pub mod inbound;

use tracing::{debug, trace, warn};

use crate::core::spec::ChartSpec;
use crate::error::{ChartError, ChartResult};

pub use codec::{RenderPayload, SurfaceConfig};
pub use inbound::{SurfaceHandle, SurfaceInbox, SurfaceSignal};

/// Outbound transport into the rendering surface.
///
/// `invoke` is fire-and-forget: no return value, no delivery confirmation.
/// Whatever the surface has to say comes back asynchronously through the
/// inbound channel.
pub trait SurfaceChannel {
    fn invoke(&mut self, command: &str);
}

/// Headless surface used by tests and the demo binary. Records every invoked
/// command.
#[derive(Debug, Default)]
pub struct NullSurface {
    pub commands: Vec<String>,
}

impl SurfaceChannel for NullSurface {
    fn invoke(&mut self, command: &str) {
        self.commands.push(command.to_owned());
    }
}

/// Result of a batch render: how many charts went out, and which specs were
/// dropped with what error. Failures never abort the rest of the batch.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub rendered: usize,
    pub failures: Vec<(String, ChartError)>,
}

impl BatchOutcome {
    #[must_use]
    pub fn all_failed(&self) -> bool {
        self.rendered == 0 && !self.failures.is_empty()
    }
}

/// Host-side wrapper around a [`SurfaceChannel`].
///
/// Every operation is a silent no-op until the surface has signaled ready;
/// callers queue at a higher level (the readiness gate) rather than here.
#[derive(Debug)]
pub struct ChartBridge<S: SurfaceChannel> {
    surface: S,
    surface_ready: bool,
}

impl<S: SurfaceChannel> ChartBridge<S> {
    #[must_use]
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            surface_ready: false,
        }
    }

    #[must_use]
    pub fn is_surface_ready(&self) -> bool {
        self.surface_ready
    }

    /// Marks the surface usable. Idempotent; only the first call has effect.
    pub fn mark_surface_ready(&mut self) {
        if !self.surface_ready {
            debug!("rendering surface ready");
            self.surface_ready = true;
        }
    }

    /// Encodes and sends one chart. Serialization problems are per-chart
    /// errors; an unready surface swallows the call by design.
    pub fn render_one(&mut self, spec: &ChartSpec) -> ChartResult<()> {
        if !self.surface_ready {
            trace!(chart_id = spec.id(), "surface not ready, dropping render");
            return Ok(());
        }
        let command = codec::encode_render(spec)?;
        trace!(chart_id = spec.id(), bytes = command.len(), "render command sent");
        self.surface.invoke(&command);
        Ok(())
    }

    /// Sends the whole batch sequentially, preserving order. A failing spec
    /// is collected and skipped; the rest still render.
    pub fn render_batch(&mut self, specs: &[ChartSpec]) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();
        for spec in specs {
            match self.render_one(spec) {
                Ok(()) => outcome.rendered += 1,
                Err(err) => {
                    warn!(chart_id = spec.id(), error = %err, "dropping chart from batch");
                    outcome.failures.push((spec.id().to_owned(), err));
                }
            }
        }
        debug!(
            rendered = outcome.rendered,
            failed = outcome.failures.len(),
            "batch render finished"
        );
        outcome
    }

    /// Removes a chart by id. Unknown ids are the surface's no-op, not an
    /// error.
    pub fn remove(&mut self, chart_id: &str) {
        if !self.surface_ready {
            trace!(chart_id, "surface not ready, dropping remove");
            return;
        }
        self.surface.invoke(&codec::encode_remove(chart_id));
    }

    pub fn clear_all(&mut self) {
        if !self.surface_ready {
            trace!("surface not ready, dropping clear");
            return;
        }
        self.surface.invoke(&codec::encode_clear());
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::{ChartBridge, NullSurface};
    use crate::core::spec::{ChartSpec, EncodeMapping};
    use crate::core::value::{Value, row};

    fn sample_spec(id: &str) -> ChartSpec {
        ChartSpec::builder(
            id,
            vec![row([("date", Value::text("Jan")), ("revenue", Value::number(1.0))])],
        )
        .encode(EncodeMapping::xy("date", "revenue"))
        .build()
        .expect("valid spec")
    }

    #[test]
    fn operations_are_noops_until_surface_ready() {
        let mut bridge = ChartBridge::new(NullSurface::default());
        bridge.render_one(&sample_spec("a")).expect("no-op render");
        bridge.remove("a");
        bridge.clear_all();
        assert!(bridge.surface().commands.is_empty());

        bridge.mark_surface_ready();
        bridge.render_one(&sample_spec("a")).expect("render");
        assert_eq!(bridge.surface().commands.len(), 1);
    }

    #[test]
    fn batch_preserves_order_and_isolates_failures() {
        let mut bridge = ChartBridge::new(NullSurface::default());
        bridge.mark_surface_ready();

        // Grouping without an x/y encode fails at pivot time.
        let bad = ChartSpec::builder("bad", Vec::new())
            .encode(EncodeMapping::item_value("name", "value"))
            .group_field("channel")
            .build()
            .expect("constructs fine, fails at serialization");

        let outcome = bridge.render_batch(&[sample_spec("first"), bad, sample_spec("last")]);
        assert_eq!(outcome.rendered, 2);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].0, "bad");
        assert!(!outcome.all_failed());

        let commands = &bridge.surface().commands;
        assert!(commands[0].contains("'first'"));
        assert!(commands[1].contains("'last'"));
    }
}
