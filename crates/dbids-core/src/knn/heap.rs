//! Heap-backed k-nearest-neighbor accumulator.
//!
//! A binary max-heap over parallel `f64`/`i32` arrays keeps the `k` best
//! candidates with the current worst (`kdist`) at the root. Candidates
//! arriving after the heap is full with a distance exactly equal to `kdist`
//! go to a side list of ties instead of displacing the root, so the result
//! never depends on which of several equidistant candidates came first.

use super::list::KnnList;
use super::KnnHeap;
use crate::dbid::DbidRef;
use crate::error::{Error, Result};
use crate::pair::DoubleDbidPair;
use crate::sort::{self, compare_keys};
use std::cmp::Ordering;

/// Bounded max-heap with tie preservation at the k-th distance.
#[derive(Debug, Clone)]
pub struct DoubleIntegerKnnHeap {
    k: usize,
    keys: Vec<f64>,
    values: Vec<i32>,
    /// Ids tied with `kdist` that arrived after the heap filled up.
    ties: Vec<i32>,
    kdist: f64,
}

impl DoubleIntegerKnnHeap {
    /// Creates an empty heap for `k` neighbors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for `k == 0`.
    pub fn new(k: usize) -> Result<Self> {
        if k == 0 {
            return Err(Error::InvalidArgument(
                "k must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            k,
            keys: Vec::with_capacity(k),
            values: Vec::with_capacity(k),
            ties: Vec::new(),
            kdist: f64::INFINITY,
        })
    }

    /// Number of ties currently held besides the heap.
    #[must_use]
    pub fn tie_count(&self) -> usize {
        self.ties.len()
    }

    fn push(&mut self, key: f64, value: i32) {
        self.keys.push(key);
        self.values.push(value);
        self.sift_up(self.keys.len() - 1);
    }

    /// Replaces the root and restores heap order, returning the old root.
    fn replace_top(&mut self, key: f64, value: i32) -> (f64, i32) {
        let old = (self.keys[0], self.values[0]);
        self.keys[0] = key;
        self.values[0] = value;
        self.sift_down(0);
        old
    }

    fn pop(&mut self) -> Option<(f64, i32)> {
        if self.keys.is_empty() {
            return None;
        }
        let last = self.keys.len() - 1;
        self.keys.swap(0, last);
        self.values.swap(0, last);
        let key = self.keys.pop()?;
        let value = self.values.pop()?;
        if !self.keys.is_empty() {
            self.sift_down(0);
        }
        Some((key, value))
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) >> 1;
            if compare_keys(self.keys[pos], self.keys[parent]) != Ordering::Greater {
                break;
            }
            self.keys.swap(pos, parent);
            self.values.swap(pos, parent);
            pos = parent;
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        let size = self.keys.len();
        loop {
            let left = (pos << 1) + 1;
            if left >= size {
                break;
            }
            let right = left + 1;
            let mut largest = left;
            if right < size
                && compare_keys(self.keys[right], self.keys[left]) == Ordering::Greater
            {
                largest = right;
            }
            if compare_keys(self.keys[pos], self.keys[largest]) != Ordering::Less {
                break;
            }
            self.keys.swap(pos, largest);
            self.values.swap(pos, largest);
            pos = largest;
        }
    }
}

impl KnnHeap for DoubleIntegerKnnHeap {
    #[inline]
    fn k(&self) -> usize {
        self.k
    }

    #[inline]
    fn len(&self) -> usize {
        self.keys.len() + self.ties.len()
    }

    #[inline]
    fn kdist(&self) -> f64 {
        if self.keys.len() < self.k {
            f64::INFINITY
        } else {
            self.kdist
        }
    }

    fn insert(&mut self, distance: f64, id: &impl DbidRef) -> f64 {
        let id = id.internal_index();
        if self.keys.len() < self.k {
            self.push(distance, id);
            if self.keys.len() == self.k {
                self.kdist = self.keys[0];
            }
            return self.kdist();
        }
        match compare_keys(distance, self.kdist) {
            Ordering::Greater => {}
            Ordering::Equal => self.ties.push(id),
            Ordering::Less => {
                let previous = self.kdist;
                let (_, evicted) = self.replace_top(distance, id);
                self.kdist = self.keys[0];
                if compare_keys(self.kdist, previous) == Ordering::Less {
                    self.ties.clear();
                } else {
                    // Another entry with the old distance is still the root.
                    self.ties.push(evicted);
                }
            }
        }
        self.kdist
    }

    fn peek(&self) -> Option<DoubleDbidPair> {
        if let Some(&tie) = self.ties.last() {
            return Some(DoubleDbidPair::new(self.kdist, &tie));
        }
        self.keys
            .first()
            .map(|&key| DoubleDbidPair::new(key, &self.values[0]))
    }

    fn poll(&mut self) -> Option<DoubleDbidPair> {
        if let Some(tie) = self.ties.pop() {
            return Some(DoubleDbidPair::new(self.kdist, &tie));
        }
        let (key, value) = self.pop()?;
        Some(DoubleDbidPair::new(key, &value))
    }

    fn clear(&mut self) {
        self.keys.clear();
        self.values.clear();
        self.ties.clear();
        self.kdist = f64::INFINITY;
    }

    fn to_knn_list(mut self) -> KnnList {
        let mut keys = std::mem::take(&mut self.keys);
        let mut values = std::mem::take(&mut self.values);
        keys.reserve_exact(self.ties.len());
        values.reserve_exact(self.ties.len());
        for &tie in &self.ties {
            keys.push(self.kdist);
            values.push(tie);
        }
        sort::sort_pairs(&mut keys, &mut values);
        tracing::trace!(
            k = self.k,
            len = keys.len(),
            ties = self.ties.len(),
            "finalized heap-backed knn list"
        );
        KnnList::from_sorted(self.k, keys, values)
    }
}
