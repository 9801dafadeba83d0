use chart_bridge::bridge::codec::{decode_render, encode_render, escape, unescape};
use chart_bridge::core::{ChartSpec, DataRow, EncodeMapping, Value};
use proptest::prelude::*;

/// Text containing the four characters the escaping discipline exists for,
/// mixed with ordinary content.
fn hazardous_text() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-zA-Z0-9 '\\\\\n\r]{0,24}").expect("valid regex")
}

fn cell_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        (-1.0e9f64..1.0e9).prop_map(Value::number),
        hazardous_text().prop_map(Value::Text),
    ]
}

fn data_row() -> impl Strategy<Value = DataRow> {
    proptest::collection::vec(("[a-z]{1,8}", cell_value()), 0..6).prop_map(|fields| {
        fields.into_iter().collect()
    })
}

proptest! {
    #[test]
    fn decode_encode_reproduces_rows_exactly(
        rows in proptest::collection::vec(data_row(), 0..8),
        title in hazardous_text(),
        id_suffix in "[a-z0-9_]{0,12}"
    ) {
        let spec = ChartSpec::builder(format!("chart_{id_suffix}"), rows.clone())
            .title(title.clone())
            .encode(EncodeMapping::xy("x", "y"))
            .build()
            .expect("valid spec");

        let command = encode_render(&spec).expect("encode");
        let payload = decode_render(&command).expect("decode");

        prop_assert_eq!(payload.chart_id, spec.id());
        prop_assert_eq!(payload.rows, rows);
        prop_assert_eq!(payload.config.title, title);
        prop_assert_eq!(&payload.config.encode, spec.encode());
    }

    #[test]
    fn unescape_inverts_escape_for_arbitrary_text(text in hazardous_text()) {
        prop_assert_eq!(unescape(&escape(&text)).expect("unescape"), text);
    }

    #[test]
    fn escaped_text_never_contains_raw_framing_breakers(text in hazardous_text()) {
        let escaped = escape(&text);
        prop_assert!(!escaped.contains('\n'));
        prop_assert!(!escaped.contains('\r'));
        // Every quote must be preceded by a backslash.
        let chars: Vec<char> = escaped.chars().collect();
        for (i, ch) in chars.iter().enumerate() {
            if *ch == '\'' {
                prop_assert!(i > 0 && chars[i - 1] == '\\');
            }
        }
    }
}
