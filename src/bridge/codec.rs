//! Serialization codec for the rendering-surface boundary.
//!
//! Every outbound operation is one self-contained text command. Structured
//! payloads travel as JSON framed in single quotes, so before framing the
//! codec escapes backslashes, single quotes, newlines, and carriage returns —
//! backslash first, otherwise previously inserted escapes would be escaped
//! again. The decode path inverts the framing and is what the round-trip
//! property tests exercise.

use serde::{Deserialize, Serialize};

use crate::core::pivot::pivot;
use crate::core::spec::{ChartSpec, ChartType, EncodeMapping};
use crate::core::value::DataRow;
use crate::error::{ChartError, ChartResult};

/// Configuration block embedded alongside the row data in a render command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceConfig {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub title: String,
    pub encode: EncodeMapping,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<serde_json::Value>,
}

/// A fully decoded render command, used by tests and mock surfaces.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPayload {
    pub chart_id: String,
    pub rows: Vec<DataRow>,
    pub config: SurfaceConfig,
}

/// Escapes a payload for embedding inside a single-quoted command argument.
///
/// Backslash must be handled first; the remaining replacements are then safe
/// against double-escaping.
#[must_use]
pub fn escape(payload: &str) -> String {
    payload
        .replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}

/// Inverts [`escape`]. A dangling or unknown escape sequence is a protocol
/// error: a correct encoder never produces one.
pub fn unescape(payload: &str) -> ChartResult<String> {
    let mut out = String::with_capacity(payload.len());
    let mut chars = payload.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('\'') => out.push('\''),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some(other) => {
                return Err(ChartError::Protocol(format!(
                    "unknown escape sequence '\\{other}'"
                )));
            }
            None => {
                return Err(ChartError::Protocol(
                    "dangling escape at end of payload".to_owned(),
                ));
            }
        }
    }
    Ok(out)
}

/// Serializes rows as a JSON array of ordered field→value objects.
pub fn rows_to_json(chart_id: &str, rows: &[DataRow]) -> ChartResult<String> {
    serde_json::to_string(rows).map_err(|e| ChartError::Serialization {
        chart_id: chart_id.to_owned(),
        reason: format!("row data is not representable as JSON: {e}"),
    })
}

pub fn rows_from_json(payload: &str) -> ChartResult<Vec<DataRow>> {
    serde_json::from_str(payload)
        .map_err(|e| ChartError::Protocol(format!("row payload is not valid JSON: {e}")))
}

/// Encodes one render command for the spec.
///
/// When the spec carries a group field its rows are pivoted first and the
/// wide-row projection is embedded instead, along with derived dimensions
/// (an explicit dimension list on the spec still wins).
pub fn encode_render(spec: &ChartSpec) -> ChartResult<String> {
    let mut dimensions = spec.dimensions().map(<[String]>::to_vec);
    let rows_json;

    if spec.group_field().is_some() {
        let table = pivot(spec)?;
        let category_field = spec
            .encode()
            .field_for(EncodeMapping::ROLE_X)
            .unwrap_or_default();
        if let Some(column) = table.duplicate_column(category_field) {
            return Err(ChartError::Serialization {
                chart_id: spec.id().to_owned(),
                reason: format!(
                    "pivoted group column '{column}' collides with another column"
                ),
            });
        }
        if dimensions.is_none() {
            dimensions = Some(table.dimension_names(category_field));
        }
        rows_json = rows_to_json(spec.id(), &table.to_rows(category_field))?;
    } else {
        rows_json = rows_to_json(spec.id(), spec.rows())?;
    }

    let config = SurfaceConfig {
        chart_type: spec.chart_type().clone(),
        title: spec.title().to_owned(),
        encode: spec.encode().clone(),
        dimensions,
        group_field: spec.group_field().map(str::to_owned),
        options: spec.options().cloned(),
    };
    let config_json = serde_json::to_string(&config).map_err(|e| ChartError::Serialization {
        chart_id: spec.id().to_owned(),
        reason: format!("config block is not representable as JSON: {e}"),
    })?;

    Ok(format!(
        "renderChart('{}','{}','{}');",
        escape(spec.id()),
        escape(&rows_json),
        escape(&config_json)
    ))
}

#[must_use]
pub fn encode_remove(chart_id: &str) -> String {
    format!("removeChart('{}');", escape(chart_id))
}

#[must_use]
pub fn encode_clear() -> String {
    "clearAllCharts();".to_owned()
}

/// Decodes a render command produced by [`encode_render`].
pub fn decode_render(command: &str) -> ChartResult<RenderPayload> {
    let args = command
        .strip_prefix("renderChart(")
        .and_then(|rest| rest.strip_suffix(");"))
        .ok_or_else(|| ChartError::Protocol("not a renderChart command".to_owned()))?;

    let [chart_id, rows_json, config_json] = split_quoted_args(args)?;
    let config: SurfaceConfig = serde_json::from_str(&config_json)
        .map_err(|e| ChartError::Protocol(format!("config payload is not valid JSON: {e}")))?;
    Ok(RenderPayload {
        chart_id,
        rows: rows_from_json(&rows_json)?,
        config,
    })
}

/// Splits `'a','b','c'` into its three unescaped arguments, honoring escaped
/// quotes inside each.
fn split_quoted_args(args: &str) -> ChartResult<[String; 3]> {
    let mut parts = Vec::with_capacity(3);
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escaped = false;

    for ch in args.chars() {
        if !in_quotes {
            match ch {
                '\'' => in_quotes = true,
                ',' => {}
                other => {
                    return Err(ChartError::Protocol(format!(
                        "unexpected character '{other}' between arguments"
                    )));
                }
            }
            continue;
        }
        if escaped {
            current.push('\\');
            current.push(ch);
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == '\'' {
            in_quotes = false;
            parts.push(unescape(&std::mem::take(&mut current))?);
        } else {
            current.push(ch);
        }
    }

    if in_quotes {
        return Err(ChartError::Protocol("unterminated quoted argument".to_owned()));
    }
    <[String; 3]>::try_from(parts).map_err(|parts: Vec<String>| {
        ChartError::Protocol(format!("expected 3 arguments, found {}", parts.len()))
    })
}

#[cfg(test)]
mod tests {
    use super::{decode_render, encode_remove, encode_render, escape, unescape};
    use crate::core::spec::{ChartSpec, ChartType, EncodeMapping};
    use crate::core::value::{Value, row};

    #[test]
    fn escape_handles_backslash_before_other_replacements() {
        assert_eq!(escape(r"a\n"), r"a\\n");
        assert_eq!(escape("a\n"), r"a\n");
        assert_eq!(escape("it's"), r"it\'s");
        assert_eq!(unescape(&escape("\\'\r\n")).expect("unescape"), "\\'\r\n");
    }

    #[test]
    fn unescape_rejects_unknown_and_dangling_escapes() {
        assert!(unescape(r"a\z").is_err());
        assert!(unescape("a\\").is_err());
    }

    #[test]
    fn render_command_round_trips_id_rows_and_config() {
        let spec = ChartSpec::builder(
            "weather_chart",
            vec![
                row([("time", Value::text("08:00")), ("temp", Value::number(18.2))]),
                row([("time", Value::text("10:00")), ("temp", Value::number(22.5))]),
            ],
        )
        .title("Temperature trend")
        .chart_type(ChartType::Line)
        .encode(EncodeMapping::xy("time", "temp"))
        .build()
        .expect("valid spec");

        let payload = decode_render(&encode_render(&spec).expect("encode")).expect("decode");
        assert_eq!(payload.chart_id, "weather_chart");
        assert_eq!(payload.rows, spec.rows());
        assert_eq!(payload.config.chart_type, ChartType::Line);
        assert_eq!(payload.config.title, "Temperature trend");
        assert_eq!(payload.config.encode, *spec.encode());
        assert!(payload.config.dimensions.is_none());
        assert!(payload.config.group_field.is_none());
    }

    #[test]
    fn grouped_spec_embeds_pivoted_rows_and_derived_dimensions() {
        let spec = ChartSpec::builder(
            "stacked_bar_chart",
            vec![
                row([
                    ("date", Value::text("Jan")),
                    ("channel", Value::text("Online")),
                    ("revenue", Value::number(5000.0)),
                ]),
                row([
                    ("date", Value::text("Jan")),
                    ("channel", Value::text("Offline")),
                    ("revenue", Value::number(3500.0)),
                ]),
                row([
                    ("date", Value::text("Feb")),
                    ("channel", Value::text("Online")),
                    ("revenue", Value::number(6200.0)),
                ]),
            ],
        )
        .encode(EncodeMapping::xy("date", "revenue"))
        .group_field("channel")
        .build()
        .expect("valid spec");

        let payload = decode_render(&encode_render(&spec).expect("encode")).expect("decode");
        assert_eq!(
            payload.config.dimensions,
            Some(vec!["date".to_owned(), "Online".to_owned(), "Offline".to_owned()])
        );
        assert_eq!(payload.config.group_field.as_deref(), Some("channel"));
        assert_eq!(payload.rows.len(), 2);
        assert_eq!(payload.rows[0]["Online"], Value::number(5000.0));
        assert_eq!(payload.rows[0]["Offline"], Value::number(3500.0));
        assert_eq!(payload.rows[1]["Offline"], Value::number(0.0));
    }

    #[test]
    fn remove_command_escapes_the_id() {
        assert_eq!(encode_remove("it's"), r"removeChart('it\'s');");
    }
}
