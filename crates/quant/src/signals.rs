//! Majority-vote aggregation of per-indicator signals.

use types::{IndicatorKind, IndicatorResult, OverallSignal, Signal, SignalSummary};

/// How one indicator's signal counts in the aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vote {
    Bullish,
    Bearish,
    Abstain,
}

impl Vote {
    /// Map a family's signal onto a vote.
    ///
    /// Oscillators vote bullish when oversold and bearish when overbought;
    /// trend-following families vote with their direction. `Near*` and
    /// `Neutral` abstain, and the volume family never votes.
    pub fn of(kind: IndicatorKind, signal: Signal) -> Self {
        use IndicatorKind as K;

        match (kind, signal) {
            (K::Volume, _) => Vote::Abstain,

            (K::Rsi | K::Bollinger | K::Stochastic, Signal::Oversold) => Vote::Bullish,
            (K::Rsi | K::Bollinger | K::Stochastic, Signal::Overbought) => Vote::Bearish,

            (
                K::Stochastic | K::Ema | K::Macd | K::Obv | K::Trend,
                Signal::Bullish | Signal::Buy,
            ) => Vote::Bullish,
            (
                K::Stochastic | K::Ema | K::Macd | K::Obv | K::Trend,
                Signal::Bearish | Signal::Sell,
            ) => Vote::Bearish,

            _ => Vote::Abstain,
        }
    }
}

/// Folds indicator results into an overall verdict.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalAggregator;

impl SignalAggregator {
    /// Count votes over `results`.
    ///
    /// Failed indicators do not vote but still count toward
    /// `total_indicators`. Equal counts give `Neutral`.
    pub fn aggregate(results: &[(IndicatorKind, IndicatorResult)]) -> SignalSummary {
        let (bullish, bearish) =
            results
                .iter()
                .fold((0, 0), |(bull, bear), (kind, result)| match result {
                    Ok(out) => match Vote::of(*kind, out.signal) {
                        Vote::Bullish => (bull + 1, bear),
                        Vote::Bearish => (bull, bear + 1),
                        Vote::Abstain => (bull, bear),
                    },
                    Err(_) => (bull, bear),
                });

        let overall_signal = match bullish.cmp(&bearish) {
            std::cmp::Ordering::Greater => OverallSignal::Bullish,
            std::cmp::Ordering::Less => OverallSignal::Bearish,
            std::cmp::Ordering::Equal => OverallSignal::Neutral,
        };

        SignalSummary {
            overall_signal,
            recommendation: recommendation(overall_signal).to_string(),
            bullish_signals: bullish,
            bearish_signals: bearish,
            total_indicators: results.len(),
        }
    }
}

fn recommendation(overall: OverallSignal) -> &'static str {
    match overall {
        OverallSignal::Bullish => "Uptrend - consider buying",
        OverallSignal::Bearish => "Downtrend - consider selling",
        OverallSignal::Neutral => "Mixed signals - keep watching",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::{IndicatorError, IndicatorOutput, IndicatorValues};

    fn ok(kind: IndicatorKind, signal: Signal) -> (IndicatorKind, IndicatorResult) {
        (
            kind,
            Ok(IndicatorOutput {
                kind,
                name: kind.name().to_uppercase(),
                values: IndicatorValues::Rsi {
                    value: 0.0,
                    period: 0,
                },
                signal,
                message: String::new(),
                history: Vec::new(),
            }),
        )
    }

    #[test]
    fn test_oscillator_votes() {
        assert_eq!(Vote::of(IndicatorKind::Rsi, Signal::Oversold), Vote::Bullish);
        assert_eq!(Vote::of(IndicatorKind::Rsi, Signal::Overbought), Vote::Bearish);
        assert_eq!(Vote::of(IndicatorKind::Bollinger, Signal::NearOverbought), Vote::Abstain);
        assert_eq!(Vote::of(IndicatorKind::Stochastic, Signal::Bullish), Vote::Bullish);
    }

    #[test]
    fn test_volume_never_votes() {
        assert_eq!(Vote::of(IndicatorKind::Volume, Signal::Bullish), Vote::Abstain);
        assert_eq!(Vote::of(IndicatorKind::Volume, Signal::Overbought), Vote::Abstain);
    }

    #[test]
    fn test_majority_bullish() {
        let summary = SignalAggregator::aggregate(&[
            ok(IndicatorKind::Rsi, Signal::Oversold),
            ok(IndicatorKind::Macd, Signal::Buy),
            ok(IndicatorKind::Ema, Signal::Bearish),
        ]);
        assert_eq!(summary.overall_signal, OverallSignal::Bullish);
        assert_eq!(summary.bullish_signals, 2);
        assert_eq!(summary.bearish_signals, 1);
        assert_eq!(summary.total_indicators, 3);
    }

    #[test]
    fn test_tie_is_neutral() {
        let summary = SignalAggregator::aggregate(&[
            ok(IndicatorKind::Ema, Signal::Bullish),
            ok(IndicatorKind::Macd, Signal::Sell),
        ]);
        assert_eq!(summary.overall_signal, OverallSignal::Neutral);
    }

    #[test]
    fn test_errors_count_in_total_only() {
        let summary = SignalAggregator::aggregate(&[
            ok(IndicatorKind::Ema, Signal::Bearish),
            (
                IndicatorKind::Rsi,
                Err(IndicatorError::insufficient(15, 5)),
            ),
        ]);
        assert_eq!(summary.overall_signal, OverallSignal::Bearish);
        assert_eq!(summary.bearish_signals, 1);
        assert_eq!(summary.total_indicators, 2);
    }

    #[test]
    fn test_empty_is_neutral() {
        let summary = SignalAggregator::aggregate(&[]);
        assert_eq!(summary.overall_signal, OverallSignal::Neutral);
        assert_eq!(summary.total_indicators, 0);
    }
}
