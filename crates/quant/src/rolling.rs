//! Rolling window data structure for series-wide indicator calculations.
//!
//! Provides O(1) push operations and a running sum, so computing a moving
//! average over every position of a series costs one pass.

use std::collections::VecDeque;

/// A fixed-size rolling window of values.
///
/// Maintains the most recent `capacity` values, discarding old values when
/// new ones are pushed.
///
/// # Example
/// ```
/// use quant::rolling::RollingWindow;
///
/// let mut window = RollingWindow::new(3);
/// window.push(1.0);
/// window.push(2.0);
/// window.push(3.0);
/// assert_eq!(window.mean(), Some(2.0));
///
/// window.push(4.0); // Drops 1.0
/// assert_eq!(window.mean(), Some(3.0));
/// ```
#[derive(Debug, Clone)]
pub struct RollingWindow {
    data: VecDeque<f64>,
    capacity: usize,
    /// Running sum for O(1) mean computation.
    sum: f64,
}

impl RollingWindow {
    /// Create a new rolling window with the given capacity.
    ///
    /// A zero capacity is bumped to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            data: VecDeque::with_capacity(capacity),
            capacity,
            sum: 0.0,
        }
    }

    /// Push a value into the window.
    ///
    /// If the window is full, the oldest value is removed and returned.
    pub fn push(&mut self, value: f64) -> Option<f64> {
        let removed = if self.data.len() >= self.capacity {
            let old = self.data.pop_front();
            if let Some(v) = old {
                self.sum -= v;
            }
            old
        } else {
            None
        };

        self.data.push_back(value);
        self.sum += value;
        removed
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.data.len() >= self.capacity
    }

    #[inline]
    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// Mean of values in the window, `None` if empty.
    #[inline]
    pub fn mean(&self) -> Option<f64> {
        if self.is_empty() {
            None
        } else {
            Some(self.sum / self.data.len() as f64)
        }
    }

    /// Maximum value in the window.
    pub fn max(&self) -> Option<f64> {
        self.data.iter().copied().reduce(f64::max)
    }

    /// Minimum value in the window.
    pub fn min(&self) -> Option<f64> {
        self.data.iter().copied().reduce(f64::min)
    }
}

/// Trailing mean at every position where a full `period` window exists.
///
/// Output has `values.len() - period + 1` entries (empty if too short); entry
/// `i` is the mean of `values[i..i + period]`.
pub fn rolling_mean(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return Vec::new();
    }
    let mut window = RollingWindow::new(period);
    values
        .iter()
        .filter_map(|&v| {
            window.push(v);
            if window.is_full() { window.mean() } else { None }
        })
        .collect()
}

/// Trailing `(max, min)` at every position where a full window exists.
///
/// `highs` and `lows` must be the same length; the max is taken over `highs`,
/// the min over `lows`.
pub fn rolling_range(highs: &[f64], lows: &[f64], period: usize) -> Vec<(f64, f64)> {
    let len = highs.len().min(lows.len());
    if period == 0 || len < period {
        return Vec::new();
    }
    let mut hi = RollingWindow::new(period);
    let mut lo = RollingWindow::new(period);
    (0..len)
        .filter_map(|i| {
            hi.push(highs[i]);
            lo.push(lows[i]);
            if hi.is_full() {
                Some((hi.max()?, lo.min()?))
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rolling_window_basic() {
        let mut window = RollingWindow::new(3);
        assert!(window.is_empty());
        assert!(!window.is_full());

        window.push(1.0);
        window.push(2.0);
        assert_eq!(window.len(), 2);
        assert!(!window.is_full());

        window.push(3.0);
        assert!(window.is_full());
        assert_eq!(window.len(), 3);
    }

    #[test]
    fn test_rolling_window_push_overflow() {
        let mut window = RollingWindow::new(3);
        window.push(1.0);
        window.push(2.0);
        window.push(3.0);

        let removed = window.push(4.0);
        assert_eq!(removed, Some(1.0));
        assert_eq!(window.sum(), 9.0);
        assert_eq!(window.max(), Some(4.0));
        assert_eq!(window.min(), Some(2.0));
    }

    #[test]
    fn test_rolling_window_zero_capacity() {
        let mut window = RollingWindow::new(0);
        window.push(5.0);
        window.push(6.0);
        assert_eq!(window.len(), 1);
        assert_eq!(window.mean(), Some(6.0));
    }

    #[test]
    fn test_rolling_mean_alignment() {
        let means = rolling_mean(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
        assert_eq!(means, vec![2.0, 3.0, 4.0]);
        assert!(rolling_mean(&[1.0, 2.0], 3).is_empty());
        assert!(rolling_mean(&[1.0, 2.0], 0).is_empty());
    }

    #[test]
    fn test_rolling_range() {
        let highs = [5.0, 7.0, 6.0, 8.0];
        let lows = [1.0, 3.0, 2.0, 4.0];
        let ranges = rolling_range(&highs, &lows, 2);
        assert_eq!(ranges, vec![(7.0, 1.0), (7.0, 2.0), (8.0, 2.0)]);
    }
}
