//! End-to-end indicator scenarios over loaded series.

use quant::{Ema, Indicator, IndicatorEngine, Rsi};
use storage::{ClosePricesSource, load_from};
use types::{
    IndicatorConfig, IndicatorError, IndicatorKind, IndicatorValues, Series, Signal,
};

fn closes_series(closes: Vec<f64>) -> Series {
    let store = load_from("TEST", &ClosePricesSource::new(closes)).unwrap();
    store.series().clone()
}

#[test]
fn test_strictly_increasing_is_overbought() {
    let series = closes_series((0..60).map(|i| 100.0 + i as f64 * 1.5).collect());

    let out = Rsi::new(14).calculate(&series).unwrap();
    match out.values {
        IndicatorValues::Rsi { value, .. } => assert!(value > 70.0),
        other => panic!("unexpected values {other:?}"),
    }
    assert_eq!(out.signal, Signal::Overbought);
}

#[test]
fn test_constant_prices_are_flat() {
    let series = closes_series(vec![250.0; 250]);
    let report = IndicatorEngine::default().analyze(&series);

    match &report.indicators["macd"].as_ref().unwrap().values {
        IndicatorValues::Macd { output, .. } => assert!(output.histogram.abs() < 1e-9),
        other => panic!("unexpected values {other:?}"),
    }
    match &report.indicators["bollinger"].as_ref().unwrap().values {
        IndicatorValues::Bollinger(b) => assert!(b.bandwidth.abs() < 1e-9),
        other => panic!("unexpected values {other:?}"),
    }
    // Every indicator defined at 250 points
    assert!(report.indicators.values().all(|r| r.is_ok()));
}

#[test]
fn test_five_points_rsi_fails_ema_succeeds() {
    let series = closes_series(vec![10.0, 10.5, 10.2, 10.8, 11.0]);

    assert_eq!(
        Rsi::new(14).calculate(&series).unwrap_err(),
        IndicatorError::insufficient(15, 5)
    );
    assert!(Ema::new(3).calculate(&series).is_ok());
}

#[test]
fn test_close_only_input_flags_approximation() {
    let series = closes_series((0..40).map(|i| 50.0 + (i as f64).sin()).collect());
    let report = IndicatorEngine::default().analyze(&series);

    assert_eq!(report.approximated_rows, 40);
    // Approximated high/low still feed the stochastic and the levels
    assert!(report.indicators["stochastic"].is_ok());
    assert!(report.levels.diagnostic.is_none());
}

#[test]
fn test_oscillators_stay_bounded() {
    let closes: Vec<f64> = (0..300)
        .map(|i| 100.0 + (i as f64 * 0.37).sin() * 12.0 + (i as f64 * 0.05).cos() * 4.0)
        .collect();
    let series = closes_series(closes);
    let engine = IndicatorEngine::default();

    for value in Rsi::series(&series.closes(), 14) {
        assert!((0.0..=100.0).contains(&value));
    }
    match engine.compute(IndicatorKind::Bollinger, &series).unwrap().values {
        IndicatorValues::Bollinger(b) => assert!(b.upper >= b.middle && b.middle >= b.lower),
        other => panic!("unexpected values {other:?}"),
    }
    match engine.compute(IndicatorKind::Stochastic, &series).unwrap().values {
        IndicatorValues::Stochastic(s) => {
            assert!((0.0..=100.0).contains(&s.k));
            assert!((0.0..=100.0).contains(&s.d));
        }
        other => panic!("unexpected values {other:?}"),
    }
}

#[test]
fn test_report_serializes_results_in_place() {
    let series = closes_series((0..30).map(|i| 10.0 + i as f64).collect());
    let config = IndicatorConfig::default().with_enabled(&[IndicatorKind::Rsi, IndicatorKind::Trend]);
    let report = IndicatorEngine::new(config).analyze(&series);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["indicators"]["rsi"]["Ok"]["signal"], "OVERBOUGHT");
    assert!(json["indicators"]["trend"]["Err"]["insufficient_data"].is_object());
    assert_eq!(json["summary"]["total_indicators"], 2);
}
