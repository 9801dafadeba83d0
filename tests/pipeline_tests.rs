use chart_bridge::bridge::NullSurface;
use chart_bridge::bridge::codec::decode_render;
use chart_bridge::core::{ChartSpec, EncodeMapping, Value, row};
use chart_bridge::error::ChartError;
use chart_bridge::{ChartPipeline, RenderState, SpecProducer};

fn one_spec(id: &str, month: &str, amount: f64) -> ChartSpec {
    ChartSpec::builder(
        id,
        vec![row([("date", Value::text(month)), ("revenue", Value::number(amount))])],
    )
    .encode(EncodeMapping::xy("date", "revenue"))
    .build()
    .expect("valid spec")
}

fn ready_pipeline() -> ChartPipeline<NullSurface> {
    let mut pipeline = ChartPipeline::new(NullSurface::default());
    pipeline.surface_handle().notify_ready();
    pipeline.process_signals();
    pipeline
}

struct FailingProducer;

impl SpecProducer for FailingProducer {
    fn build_all(&self) -> chart_bridge::ChartResult<Vec<ChartSpec>> {
        Err(ChartError::InvalidData("upstream returned nothing".to_owned()))
    }
}

#[test]
fn producer_failure_is_a_data_error_not_a_crash() {
    let mut pipeline = ready_pipeline();
    pipeline.load_from(&FailingProducer);
    assert_eq!(pipeline.render_state(), RenderState::Error);
    assert!(
        pipeline
            .last_error()
            .is_some_and(|msg| msg.contains("upstream returned nothing"))
    );
    assert!(pipeline.surface().commands.is_empty());
}

#[test]
fn resending_an_id_updates_the_same_chart_instance() {
    let mut pipeline = ready_pipeline();
    pipeline.on_data_ready(vec![one_spec("revenue_chart", "Jan", 8500.0)]);
    assert_eq!(pipeline.charts().len(), 1);

    pipeline
        .update_chart(one_spec("revenue_chart", "Feb", 9200.0))
        .expect("update");

    // Still one chart in the batch, and the second command addresses the
    // same on-surface instance.
    assert_eq!(pipeline.charts().len(), 1);
    let commands = &pipeline.surface().commands;
    assert_eq!(commands.len(), 2);
    let first = decode_render(&commands[0]).expect("decode");
    let second = decode_render(&commands[1]).expect("decode");
    assert_eq!(first.chart_id, second.chart_id);
    assert_eq!(second.rows[0]["date"], Value::text("Feb"));
}

#[test]
fn update_before_readiness_queues_into_the_pending_batch() {
    let mut pipeline = ChartPipeline::new(NullSurface::default());
    pipeline.on_data_ready(vec![one_spec("a", "Jan", 1.0)]);
    pipeline
        .update_chart(one_spec("a", "Feb", 2.0))
        .expect("pre-render update");
    pipeline.update_chart(one_spec("b", "Jan", 3.0)).expect("pre-render add");
    assert!(pipeline.surface().commands.is_empty());

    pipeline.surface_handle().notify_ready();
    pipeline.process_signals();

    let commands = &pipeline.surface().commands;
    assert_eq!(commands.len(), 2);
    let first = decode_render(&commands[0]).expect("decode");
    assert_eq!(first.rows[0]["date"], Value::text("Feb"));
}

#[test]
fn removing_an_unknown_id_is_a_noop() {
    let mut pipeline = ready_pipeline();
    pipeline.on_data_ready(vec![one_spec("a", "Jan", 1.0)]);
    let before = pipeline.surface().commands.len();

    pipeline.remove_chart("never_rendered");

    // The command still goes out (the surface treats it as a no-op), and
    // nothing errors or changes in the batch.
    assert_eq!(pipeline.charts().len(), 1);
    assert_eq!(pipeline.surface().commands.len(), before + 1);
    assert_eq!(pipeline.render_state(), RenderState::Success);
}

#[test]
fn clear_empties_surface_and_batch() {
    let mut pipeline = ready_pipeline();
    pipeline.on_data_ready(vec![one_spec("a", "Jan", 1.0), one_spec("b", "Feb", 2.0)]);

    pipeline.clear();
    assert!(pipeline.charts().is_empty());
    assert_eq!(
        pipeline.surface().commands.last().map(String::as_str),
        Some("clearAllCharts();")
    );
}

#[test]
fn partial_batch_failure_still_succeeds() {
    let mut pipeline = ready_pipeline();
    let unpivotable = ChartSpec::builder("broken", vec![row([("a", Value::number(1.0))])])
        .encode(EncodeMapping::item_value("name", "value"))
        .group_field("group")
        .build()
        .expect("constructs fine, fails at serialization");

    pipeline.on_data_ready(vec![
        one_spec("first", "Jan", 1.0),
        unpivotable,
        one_spec("last", "Feb", 2.0),
    ]);

    assert_eq!(pipeline.render_state(), RenderState::Success);
    let commands = &pipeline.surface().commands;
    assert_eq!(commands.len(), 2);
    assert_eq!(decode_render(&commands[0]).expect("decode").chart_id, "first");
    assert_eq!(decode_render(&commands[1]).expect("decode").chart_id, "last");
}

#[test]
fn batch_with_no_renderable_chart_is_an_error() {
    let mut pipeline = ready_pipeline();
    let unpivotable = ChartSpec::builder("broken", vec![row([("a", Value::number(1.0))])])
        .encode(EncodeMapping::item_value("name", "value"))
        .group_field("group")
        .build()
        .expect("constructs fine, fails at serialization");

    pipeline.on_data_ready(vec![unpivotable]);
    assert_eq!(pipeline.render_state(), RenderState::Error);
    assert!(pipeline.last_error().is_some_and(|msg| msg.contains("broken")));
}

#[test]
fn refreshed_batch_after_first_render_renders_immediately() {
    let mut pipeline = ready_pipeline();
    pipeline.on_data_ready(vec![one_spec("revenue_chart", "Jan", 8500.0)]);
    assert_eq!(pipeline.render_state(), RenderState::Success);
    assert_eq!(pipeline.surface().commands.len(), 1);

    // A full refresh supersedes the previous batch without waiting on the
    // gate again.
    pipeline.on_data_ready(vec![
        one_spec("revenue_chart", "Feb", 9200.0),
        one_spec("weather_chart", "Feb", 21.3),
    ]);

    assert_eq!(pipeline.render_state(), RenderState::Success);
    assert_eq!(pipeline.charts().len(), 2);
    let commands = &pipeline.surface().commands;
    assert_eq!(commands.len(), 3);
    let refreshed = decode_render(&commands[1]).expect("decode");
    assert_eq!(refreshed.chart_id, "revenue_chart");
    assert_eq!(refreshed.rows[0]["date"], Value::text("Feb"));
    assert_eq!(decode_render(&commands[2]).expect("decode").chart_id, "weather_chart");
}

#[test]
fn never_ready_surface_is_a_quiet_terminal_state() {
    let mut pipeline = ChartPipeline::new(NullSurface::default());
    pipeline.on_data_ready(vec![one_spec("a", "Jan", 1.0)]);
    pipeline.process_signals();

    assert_eq!(pipeline.render_state(), RenderState::Loading);
    assert!(pipeline.surface().commands.is_empty());
}
