use replot_rs::api::{EventIntent, RelayoutEvent};
use replot_rs::core::{AxisId, Coord};
use serde_json::json;

#[test]
fn indexed_range_keys_classify_as_a_window() {
    let event = RelayoutEvent::from_json_value(&json!({
        "xaxis.range[0]": "2023-01-05 00:00:00",
        "xaxis.range[1]": "2023-01-06 00:00:00",
    }))
    .expect("event");

    assert_eq!(event.intent(), EventIntent::Window);
    assert_eq!(event.axis(), &AxisId::default_x());
    let (start, end) = event.range().expect("range");
    assert_eq!(start, &Coord::from("2023-01-05 00:00:00"));
    assert_eq!(end, &Coord::from("2023-01-06 00:00:00"));
}

#[test]
fn array_range_form_is_accepted() {
    let event = RelayoutEvent::from_json_value(&json!({
        "xaxis.range": [10.5, 42.0],
    }))
    .expect("event");

    assert_eq!(event.intent(), EventIntent::Window);
    let (start, end) = event.range().expect("range");
    assert_eq!(start, &Coord::from(10.5));
    assert_eq!(end, &Coord::from(42.0));
}

#[test]
fn autorange_classifies_as_reset() {
    let event = RelayoutEvent::from_json_value(&json!({
        "xaxis.autorange": true,
    }))
    .expect("event");
    assert_eq!(event.intent(), EventIntent::ResetToFull);
}

#[test]
fn autorange_accepts_boolean_ish_values() {
    for flag in [json!(true), json!(1), json!("true")] {
        let event = RelayoutEvent::from_json_value(&json!({ "xaxis.autorange": flag }))
            .expect("event");
        assert_eq!(event.intent(), EventIntent::ResetToFull, "flag {flag:?}");
    }
    for flag in [json!(false), json!(0), json!("")] {
        let event = RelayoutEvent::from_json_value(&json!({ "xaxis.autorange": flag }))
            .expect("event");
        assert_eq!(event.intent(), EventIntent::Ignore, "flag {flag:?}");
    }
}

#[test]
fn secondary_x_axes_keep_their_identity() {
    let event = RelayoutEvent::from_json_value(&json!({
        "xaxis2.range[0]": 1.0,
        "xaxis2.range[1]": 2.0,
    }))
    .expect("event");

    assert_eq!(event.axis(), &AxisId::from_trace_ref("x2"));
    assert_eq!(event.axis().layout_key(), "xaxis2");
}

#[test]
fn y_axis_keys_are_not_mistaken_for_x_windows() {
    let event = RelayoutEvent::from_json_value(&json!({
        "yaxis.range[0]": 1.0,
        "yaxis.range[1]": 2.0,
    }))
    .expect("event");
    assert_eq!(event.intent(), EventIntent::Ignore);
}

#[test]
fn restyle_payloads_are_ignored_not_rejected() {
    let event = RelayoutEvent::from_json_value(&json!({
        "width": 800,
        "dragmode": "pan",
    }))
    .expect("event");
    assert_eq!(event.intent(), EventIntent::Ignore);
}

#[test]
fn explicit_bounds_win_over_a_stray_autorange_key() {
    let event = RelayoutEvent::from_json_value(&json!({
        "xaxis.range[0]": 1.0,
        "xaxis.range[1]": 2.0,
        "xaxis.autorange": true,
    }))
    .expect("event");
    assert_eq!(event.intent(), EventIntent::Window);
}

#[test]
fn a_lone_lower_bound_is_not_a_window() {
    let event = RelayoutEvent::from_json_value(&json!({
        "xaxis.range[0]": 5.0,
    }))
    .expect("event");
    assert_eq!(event.intent(), EventIntent::Ignore);
}

#[test]
fn the_relayout_marker_flags_synthetic_dispatches() {
    let event = RelayoutEvent::from_json_value(&json!({
        "xaxis.range[0]": 1.0,
        "xaxis.range[1]": 2.0,
        "relayout": true,
    }))
    .expect("event");
    assert!(event.is_synthetic());

    let event = RelayoutEvent::from_json_value(&json!({
        "xaxis.range[0]": 1.0,
        "xaxis.range[1]": 2.0,
        "relayout": false,
    }))
    .expect("event");
    assert!(!event.is_synthetic());
}

#[test]
fn non_object_payloads_are_invalid() {
    assert!(RelayoutEvent::from_json_value(&json!([1, 2, 3])).is_err());
    assert!(RelayoutEvent::from_json_str("not json at all").is_err());
}

#[test]
fn builders_mirror_the_parsed_forms() {
    let built = RelayoutEvent::with_range(1.0, 2.0);
    assert_eq!(built.intent(), EventIntent::Window);
    assert!(!built.is_synthetic());
    assert!(built.clone().mark_synthetic().is_synthetic());
    assert_eq!(RelayoutEvent::autorange().intent(), EventIntent::ResetToFull);
}
