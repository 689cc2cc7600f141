//! Fixed-capacity history of recent positions, used for drawing only

use super::states::NVec2;

/// Circular buffer of positions. Pushing into a full trail overwrites the
/// oldest entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Trail {
    data: Vec<NVec2>,
    capacity: usize,
    head: usize, // next write slot
}

impl Trail {
    pub fn new(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            capacity,
            head: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn push(&mut self, p: NVec2) {
        if self.capacity == 0 {
            return;
        }
        if self.data.len() < self.capacity {
            self.data.push(p);
        } else {
            self.data[self.head] = p;
        }
        self.head = (self.head + 1) % self.capacity;
    }

    pub fn clear(&mut self) {
        self.data.clear();
        self.head = 0;
    }

    /// Most recent position, if any
    pub fn latest(&self) -> Option<NVec2> {
        self.iter().next()
    }

    /// Positions from newest to oldest
    pub fn iter(&self) -> impl Iterator<Item = NVec2> + '_ {
        let len = self.data.len();
        // while filling, head == len
        let newest = (self.head + len.max(1) - 1) % len.max(1);
        (0..len).map(move |k| self.data[(newest + len - k) % len])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64) -> NVec2 {
        NVec2::new(x, 0.0)
    }

    #[test]
    fn evicts_oldest() {
        let mut t = Trail::new(3);
        for i in 1..=5 {
            t.push(p(i as f64));
        }
        assert_eq!(t.len(), 3);
        let xs: Vec<f64> = t.iter().map(|v| v.x).collect();
        assert_eq!(xs, vec![5.0, 4.0, 3.0]);
    }

    #[test]
    fn partial_fill_is_newest_first() {
        let mut t = Trail::new(4);
        t.push(p(1.0));
        t.push(p(2.0));
        let xs: Vec<f64> = t.iter().map(|v| v.x).collect();
        assert_eq!(xs, vec![2.0, 1.0]);
        assert_eq!(t.latest(), Some(p(2.0)));
    }

    #[test]
    fn zero_capacity_stays_empty() {
        let mut t = Trail::new(0);
        t.push(p(1.0));
        assert!(t.is_empty());
        assert_eq!(t.iter().count(), 0);
        assert_eq!(t.latest(), None);
    }

    #[test]
    fn clear_resets() {
        let mut t = Trail::new(2);
        t.push(p(1.0));
        t.push(p(2.0));
        t.push(p(3.0));
        t.clear();
        assert!(t.is_empty());
        t.push(p(9.0));
        assert_eq!(t.latest(), Some(p(9.0)));
    }
}
