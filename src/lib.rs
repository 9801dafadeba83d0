//! chart-bridge: declarative chart contract and rendering-surface protocol.
//!
//! This crate models "what to draw" as immutable [`core::ChartSpec`] values,
//! pivots flat grouped rows into aligned multi-series data, and transports the
//! result across an asynchronous, text-serialized boundary to an opaque
//! rendering surface. The surface signals readiness and failures back through
//! an inbound channel that is drained on the host's single control context.

pub mod api;
pub mod bridge;
pub mod core;
pub mod error;
pub mod presets;
pub mod telemetry;

pub use api::{ChartPipeline, RenderState, SpecProducer};
pub use error::{ChartError, ChartResult};
