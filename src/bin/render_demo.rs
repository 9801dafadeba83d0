//! Headless walk through the full pipeline: surface readiness and data
//! readiness arrive in arbitrary order, the gate fires once, and every
//! catalog chart goes over the boundary as a text command.

use chart_bridge::bridge::SurfaceChannel;
use chart_bridge::presets::SampleCatalog;
use chart_bridge::{ChartPipeline, RenderState};

/// Prints each outbound command the way a real surface would receive it.
#[derive(Debug, Default)]
struct EchoSurface;

impl SurfaceChannel for EchoSurface {
    fn invoke(&mut self, command: &str) {
        let preview: String = command.chars().take(120).collect();
        if command.len() > preview.len() {
            println!("-> {preview}… ({} bytes)", command.len());
        } else {
            println!("-> {preview}");
        }
    }
}

fn main() {
    let _ = chart_bridge::telemetry::init_boundary_tracing();

    let mut pipeline = ChartPipeline::new(EchoSurface);
    let handle = pipeline.surface_handle();

    // Data first, surface second: the gate holds until both are in.
    pipeline.load_from(&SampleCatalog);
    assert_eq!(pipeline.render_state(), RenderState::Loading);

    handle.notify_ready();
    let errors = pipeline.process_signals();
    assert!(errors.is_empty());
    assert_eq!(pipeline.render_state(), RenderState::Success);

    println!("rendered {} charts", pipeline.charts().len());
}
