//! Binary min-heap with in-place rescoring.
//!
//! [std::collections::BinaryHeap] cannot change the priority of an element
//! it already holds, which A* needs when it finds a cheaper route to a cell
//! that is still open. [PriorityQueue] keeps its entries in a plain vector
//! and sifts them itself so an entry can be located and moved.
use crate::error::{Error, Result};
use core::cmp::Ordering;
use log::trace;

#[derive(Clone, Debug)]
struct Entry<T, P> {
    element: T,
    priority: P,
    // Insertion counter, breaks ties so equal priorities pop in FIFO order.
    seq: u64,
}

impl<T, P: PartialOrd> Entry<T, P> {
    fn precedes(&self, other: &Self) -> bool {
        match self.priority.partial_cmp(&other.priority) {
            Some(Ordering::Less) => true,
            Some(Ordering::Greater) => false,
            _ => self.seq < other.seq,
        }
    }
}

/// Min-priority queue ordered by ascending priority, FIFO among equal priorities.
#[derive(Clone, Debug)]
pub struct PriorityQueue<T, P> {
    content: Vec<Entry<T, P>>,
    next_seq: u64,
}

impl<T, P> Default for PriorityQueue<T, P> {
    fn default() -> Self {
        PriorityQueue {
            content: Vec::new(),
            next_seq: 0,
        }
    }
}

impl<T, P: PartialOrd + Copy> PriorityQueue<T, P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        PriorityQueue {
            content: Vec::with_capacity(capacity),
            next_seq: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn push(&mut self, element: T, priority: P) {
        self.content.push(Entry {
            element,
            priority,
            seq: self.next_seq,
        });
        self.next_seq += 1;
        self.sift_up(self.content.len() - 1);
    }

    /// Removes the element with the smallest priority.
    pub fn pop(&mut self) -> Result<T> {
        self.pop_with_priority().map(|(element, _)| element)
    }

    /// Like [PriorityQueue::pop] but also hands back the priority the element had.
    pub fn pop_with_priority(&mut self) -> Result<(T, P)> {
        if self.content.is_empty() {
            return Err(Error::EmptyQueue);
        }
        let last = self.content.len() - 1;
        self.content.swap(0, last);
        let entry = self.content.pop().ok_or(Error::EmptyQueue)?;
        if !self.content.is_empty() {
            self.sift_down(0);
        }
        Ok((entry.element, entry.priority))
    }

    pub fn peek(&self) -> Option<(&T, P)> {
        self.content.first().map(|e| (&e.element, e.priority))
    }

    pub fn clear(&mut self) {
        self.content.clear();
    }

    fn sift_up(&mut self, mut n: usize) {
        while n > 0 {
            let parent = (n - 1) / 2;
            if self.content[n].precedes(&self.content[parent]) {
                self.content.swap(n, parent);
                n = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut n: usize) {
        let len = self.content.len();
        loop {
            let left = 2 * n + 1;
            let right = left + 1;
            let mut smallest = n;
            if left < len && self.content[left].precedes(&self.content[smallest]) {
                smallest = left;
            }
            if right < len && self.content[right].precedes(&self.content[smallest]) {
                smallest = right;
            }
            if smallest == n {
                break;
            }
            self.content.swap(n, smallest);
            n = smallest;
        }
    }
}

impl<T: PartialEq, P: PartialOrd + Copy> PriorityQueue<T, P> {
    pub fn contains(&self, element: &T) -> bool {
        self.content.iter().any(|e| e.element == *element)
    }

    /// Changes the priority of a queued element and restores the heap order
    /// around it. Locating the element is a linear scan. Returns false when
    /// the element is not in the queue.
    pub fn rescore(&mut self, element: &T, priority: P) -> bool {
        let Some(n) = self.content.iter().position(|e| e.element == *element) else {
            return false;
        };
        trace!("rescoring heap entry {n} of {}", self.content.len());
        let decreased = matches!(
            priority.partial_cmp(&self.content[n].priority),
            Some(Ordering::Less)
        );
        self.content[n].priority = priority;
        if decreased {
            self.sift_up(n);
        } else {
            self.sift_down(n);
        }
        true
    }
}
