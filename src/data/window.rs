//! Capacity-bounded rolling window.

use std::collections::VecDeque;

/// Default number of samples kept per metric.
pub const DEFAULT_WINDOW_SIZE: usize = 60;

/// Fixed-capacity FIFO history of recent samples.
///
/// Pushing onto a full window evicts the oldest sample, so the window always
/// holds the most recent `capacity` values in arrival order.
#[derive(Debug, Clone)]
pub struct RollingWindow<T> {
    values: VecDeque<T>,
    capacity: usize,
}

impl<T> RollingWindow<T> {
    /// Create an empty window. A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            values: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a sample, evicting the oldest one if the window is full.
    pub fn push(&mut self, value: T) {
        if self.values.len() >= self.capacity {
            self.values.pop_front();
        }
        self.values.push_back(value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Sample at `idx`, counting from the oldest.
    pub fn get(&self, idx: usize) -> Option<&T> {
        self.values.get(idx)
    }

    /// Most recent sample.
    pub fn latest(&self) -> Option<&T> {
        self.values.back()
    }

    /// Samples from oldest to newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator + '_ {
        self.values.iter()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl<T: Clone> RollingWindow<T> {
    /// Copy the samples out, oldest first.
    pub fn to_vec(&self) -> Vec<T> {
        self.values.iter().cloned().collect()
    }
}

impl<T> Default for RollingWindow<T> {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_keeps_last_capacity_values() {
        let mut window = RollingWindow::new(60);
        for i in 1..=65 {
            window.push(i);
        }

        assert_eq!(window.len(), 60);
        // Samples 1..=5 were evicted; sample 6 is the new oldest
        assert_eq!(window.iter().next(), Some(&6));
        assert_eq!(window.latest(), Some(&65));
        assert_eq!(window.get(0), Some(&6));
        assert_eq!(window.get(60), None);
        assert_eq!(window.to_vec(), (6..=65).collect::<Vec<_>>());
    }

    #[test]
    fn test_window_under_capacity() {
        let mut window = RollingWindow::new(4);
        window.push(1.5);
        window.push(2.5);
        assert_eq!(window.len(), 2);
        assert_eq!(window.to_vec(), vec![1.5, 2.5]);
    }

    #[test]
    fn test_window_length_never_exceeds_capacity() {
        let mut window = RollingWindow::new(3);
        for i in 0..100 {
            window.push(i);
            assert!(window.len() <= 3);
        }
        assert_eq!(window.to_vec(), vec![97, 98, 99]);
    }

    #[test]
    fn test_zero_capacity_raised_to_one() {
        let mut window = RollingWindow::new(0);
        assert_eq!(window.capacity(), 1);
        window.push('a');
        window.push('b');
        assert_eq!(window.to_vec(), vec!['b']);
    }

    #[test]
    fn test_clear() {
        let mut window: RollingWindow<u8> = RollingWindow::default();
        assert_eq!(window.capacity(), DEFAULT_WINDOW_SIZE);
        window.push(1);
        window.clear();
        assert!(window.is_empty());
        assert_eq!(window.latest(), None);
    }
}
