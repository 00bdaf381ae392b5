use replot_rs::api::{RELAYOUT_UPDATE_JSON_SCHEMA_V1, RelayoutUpdateJsonContractV1};
use replot_rs::core::{AxisId, Coord, Figure, LayoutPatch, Series};
use replot_rs::{EngineError, RelayoutUpdate};
use serde_json::json;

fn sample_update() -> RelayoutUpdate {
    let mut layout = LayoutPatch::new();
    layout.set_axis_range(
        &AxisId::default_x(),
        json!("2023-01-05 00:00:00"),
        json!("2023-01-06 00:00:00"),
    );
    layout.set("yaxis.range", json!([82.2, 123.8]));

    let series: Series = serde_json::from_value(json!({
        "name": "price",
        "type": "scatter",
        "x": [1.0, 2.0, 3.0],
        "y": [10.0, 20.0, 30.0]
    }))
    .expect("series");

    RelayoutUpdate {
        layout,
        data: vec![series],
    }
}

#[test]
fn envelope_round_trips_through_the_v1_contract() {
    let update = sample_update();

    let encoded = update.to_json_contract_v1_pretty().expect("encode");
    let decoded = RelayoutUpdate::from_json_compat_str(&encoded).expect("decode");

    assert_eq!(decoded, update);

    let envelope: RelayoutUpdateJsonContractV1 =
        serde_json::from_str(&encoded).expect("envelope");
    assert_eq!(envelope.schema_version, RELAYOUT_UPDATE_JSON_SCHEMA_V1);
}

#[test]
fn bare_updates_without_the_envelope_still_parse() {
    let raw = r#"{
        "layout": { "xaxis.range": [1.0, 5.0], "yaxis.autorange": true },
        "data": []
    }"#;

    let update = RelayoutUpdate::from_json_compat_str(raw).expect("bare update");

    assert_eq!(update.layout.get("xaxis.range"), Some(&json!([1.0, 5.0])));
    assert_eq!(update.layout.get("yaxis.autorange"), Some(&json!(true)));
    assert!(update.data.is_empty());
}

#[test]
fn future_schema_versions_are_rejected() {
    let raw = r#"{
        "schema_version": 99,
        "update": { "layout": {}, "data": [] }
    }"#;

    let error = RelayoutUpdate::from_json_compat_str(raw).expect_err("must reject");

    assert!(matches!(error, EngineError::InvalidData(_)));
    assert!(
        error
            .to_string()
            .contains("unsupported relayout update schema version: 99")
    );
}

#[test]
fn garbage_payloads_report_a_parse_error() {
    let error = RelayoutUpdate::from_json_compat_str("not even json").expect_err("must reject");

    assert!(matches!(error, EngineError::InvalidData(_)));
    assert!(error.to_string().contains("failed to parse relayout update payload"));
}

#[test]
fn figure_json_keeps_unknown_attributes_through_a_round_trip() {
    let raw = json!({
        "data": [{
            "name": "ohlc",
            "type": "candlestick",
            "x": ["2023-01-03 00:00:00"],
            "open": [100.0],
            "high": [110.0],
            "low": [90.0],
            "close": [105.0],
            "hovertemplate": "%{x}: %{close}",
            "increasing": { "line": { "color": "green" } }
        }],
        "layout": {
            "title": { "text": "demo" },
            "yaxis2": { "fixedrange": true, "tickvals": [1.0], "tickformat": ".2p" }
        },
        "frames": []
    });

    let figure = Figure::from_json_value(raw.clone()).expect("figure");
    let echoed = serde_json::to_value(&figure).expect("serialize");

    assert_eq!(echoed["data"][0]["hovertemplate"], json!("%{x}: %{close}"));
    assert_eq!(
        echoed["data"][0]["increasing"],
        json!({ "line": { "color": "green" } })
    );
    assert_eq!(echoed["layout"]["title"], json!({ "text": "demo" }));
    assert_eq!(echoed["frames"], json!([]));
    assert_eq!(figure.layout.get("title"), Some(&json!({ "text": "demo" })));
    assert_eq!(figure.data[0].x, vec![Coord::Text("2023-01-03 00:00:00".into())]);
}

#[test]
fn misaligned_series_arrays_are_rejected_at_parse_time() {
    let raw = r#"{
        "data": [{
            "name": "broken",
            "type": "scatter",
            "x": [1.0, 2.0, 3.0],
            "y": [10.0]
        }],
        "layout": {}
    }"#;

    let error = Figure::from_json_str(raw).expect_err("must reject");

    assert!(matches!(error, EngineError::InvalidFigure(_)));
    let message = error.to_string();
    assert!(message.contains("trace 0"));
    assert!(message.contains("`y` has 1 entries but x has 3"));
}
