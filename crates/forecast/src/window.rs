//! Fixed-length sliding window of scaled feature rows.

use std::collections::VecDeque;

use types::FeatureVector;

/// The model input: the last `capacity` scaled feature rows, oldest first.
///
/// Pushing a row when full drops the oldest, so the length never changes
/// once the window is built.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastWindow {
    rows: VecDeque<FeatureVector>,
    capacity: usize,
}

impl ForecastWindow {
    /// Build a full window from exactly the rows given.
    pub fn new(rows: Vec<FeatureVector>) -> Self {
        let capacity = rows.len();
        Self {
            rows: rows.into(),
            capacity,
        }
    }

    /// Append a row, dropping the oldest when full.
    pub fn push(&mut self, row: FeatureVector) {
        if self.rows.len() >= self.capacity {
            self.rows.pop_front();
        }
        self.rows.push_back(row);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Width of the rows (0 for an empty window).
    pub fn n_features(&self) -> usize {
        self.rows.front().map_or(0, |r| r.len())
    }

    /// Most recent row.
    pub fn last(&self) -> Option<&FeatureVector> {
        self.rows.back()
    }

    /// Rows, oldest first.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &FeatureVector> {
        self.rows.iter()
    }

    /// Row-major flattening, oldest row first.
    pub fn flatten(&self) -> Vec<f64> {
        self.rows.iter().flatten().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_keeps_length() {
        let mut window = ForecastWindow::new(vec![vec![1.0, 10.0], vec![2.0, 20.0]]);
        window.push(vec![3.0, 30.0]);
        assert_eq!(window.len(), 2);
        assert_eq!(window.flatten(), vec![2.0, 20.0, 3.0, 30.0]);
        assert_eq!(window.last(), Some(&vec![3.0, 30.0]));
        assert_eq!(window.n_features(), 2);
    }
}
