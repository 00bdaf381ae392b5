use approx::assert_relative_eq;
use replot_rs::core::{
    AxisConfig, AxisId, Coord, Layout, RescaleTuning, Series, VOLUME_TICK_FORMAT, rescale_axes,
};

fn volume_series(ys: &[f64]) -> Series {
    Series {
        name: Some("volume".to_owned()),
        x: (0..ys.len()).map(|i| Coord::from(i as f64)).collect(),
        y: Some(ys.iter().copied().map(Some).collect()),
        yaxis: Some("y2".to_owned()),
        ..Series::default()
    }
}

fn volume_layout() -> Layout {
    let mut layout = Layout::new();
    layout
        .set_axis(
            &AxisId::from_trace_ref("y2"),
            &AxisConfig {
                fixedrange: true,
                tickvals: Some(vec![1.0]),
                tickformat: Some(VOLUME_TICK_FORMAT.to_owned()),
                range: Some([Coord::from(0.0), Coord::from(1.0)]),
                ..AxisConfig::default()
            },
        )
        .expect("axis config");
    layout
}

fn assert_ticks(update_ticks: Option<&Vec<f64>>, expected: &[f64]) {
    let ticks = update_ticks.expect("tickvals");
    assert_eq!(ticks.len(), expected.len());
    for (tick, want) in ticks.iter().zip(expected) {
        assert_relative_eq!(*tick, *want, epsilon = 1e-6);
    }
}

#[test]
fn half_million_max_snaps_ticks_to_clean_hundred_thousands() {
    let series = [volume_series(&[100_000.0, 500_000.0, 250_000.0])];
    let updates =
        rescale_axes(&series, &volume_layout(), RescaleTuning::default()).expect("rescale");

    assert_eq!(updates.len(), 1);
    let update = &updates[0];
    assert_relative_eq!(update.range[0], 0.0, epsilon = 1e-9);
    assert_relative_eq!(update.range[1], 3_500_000.0, epsilon = 1e-3);
    assert_ticks(
        update.tickvals.as_ref(),
        &[100_000.0, 200_000.0, 300_000.0, 400_000.0],
    );
    assert_eq!(update.tickformat.as_deref(), Some(".2p"));
}

#[test]
fn four_digit_max_rounds_the_base_tick_to_tens() {
    let series = [volume_series(&[5_000.0, 2_500.0])];
    let updates =
        rescale_axes(&series, &volume_layout(), RescaleTuning::default()).expect("rescale");

    assert_ticks(
        updates[0].tickvals.as_ref(),
        &[1_000.0, 2_000.0, 3_000.0, 4_000.0],
    );
    assert_relative_eq!(updates[0].range[1], 35_000.0, epsilon = 1e-6);
}

#[test]
fn eight_digit_max_rounds_the_base_tick_to_ten_thousands() {
    let series = [volume_series(&[50_000_000.0, 12_000_000.0])];
    let updates =
        rescale_axes(&series, &volume_layout(), RescaleTuning::default()).expect("rescale");

    assert_ticks(
        updates[0].tickvals.as_ref(),
        &[10_000_000.0, 20_000_000.0, 30_000_000.0, 40_000_000.0],
    );
    assert_relative_eq!(updates[0].range[1], 350_000_000.0, epsilon = 1.0);
}

#[test]
fn uneven_max_produces_snapped_but_uneven_looking_ticks() {
    let series = [volume_series(&[123_456.0, 60_000.0])];
    let updates =
        rescale_axes(&series, &volume_layout(), RescaleTuning::default()).expect("rescale");

    // base = round(123456 * 0.2, to hundreds) = 24700
    assert_ticks(
        updates[0].tickvals.as_ref(),
        &[24_700.0, 49_400.0, 74_100.0, 98_800.0],
    );
    assert_relative_eq!(updates[0].range[1], 864_192.0, epsilon = 1e-3);
}

#[test]
fn tickvals_without_fixedrange_is_not_a_volume_pane() {
    let axis = AxisId::from_trace_ref("y2");
    let mut layout = Layout::new();
    layout
        .set_axis(
            &axis,
            &AxisConfig {
                tickvals: Some(vec![1.0, 2.0]),
                ..AxisConfig::default()
            },
        )
        .expect("axis config");

    let series = [volume_series(&[100.0, 200.0])];
    let updates = rescale_axes(&series, &layout, RescaleTuning::default()).expect("rescale");

    // Plain padded rescale applies instead of the volume treatment.
    assert_relative_eq!(updates[0].range[0], 85.0, epsilon = 1e-9);
    assert_relative_eq!(updates[0].range[1], 215.0, epsilon = 1e-9);
    assert!(updates[0].tickvals.is_none());
}
