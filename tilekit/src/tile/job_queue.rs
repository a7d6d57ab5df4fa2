//! Pending tile jobs ordered by distance to the view.

use std::{
    cmp::Reverse,
    collections::{BinaryHeap, HashSet},
    sync::{Condvar, Mutex, MutexGuard, PoisonError},
};

use crate::coords::{TileCoords, ViewPosition};

/// A tile waiting for a worker. Smaller priorities are polled first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Job {
    pub priority: i64,
    pub coords: TileCoords,
}

#[derive(Default)]
struct QueueState {
    heap: BinaryHeap<Reverse<Job>>,
    members: HashSet<TileCoords>,
    view: Option<ViewPosition>,
    reschedule: bool,
    closed: bool,
}

impl QueueState {
    fn priority(&self, coords: &TileCoords) -> i64 {
        self.view.as_ref().map_or(0, |view| coords.distance_to(view))
    }

    /// Recomputes all priorities against the current view and rebuilds the heap.
    fn reschedule(&mut self) {
        let Some(view) = self.view else {
            self.reschedule = false;
            return;
        };

        let jobs: Vec<Reverse<Job>> = self
            .heap
            .drain()
            .map(|Reverse(job)| {
                Reverse(Job {
                    priority: job.coords.distance_to(&view),
                    coords: job.coords,
                })
            })
            .collect();
        self.heap = BinaryHeap::from(jobs);
        self.reschedule = false;
    }

    fn pop(&mut self) -> Option<Job> {
        if self.reschedule {
            self.reschedule();
        }
        let Reverse(job) = self.heap.pop()?;
        self.members.remove(&job.coords);
        Some(job)
    }
}

/// Priority queue shared by the tile manager and its workers. Every operation, including the
/// rescheduling before a poll, happens under one lock.
#[derive(Default)]
pub struct JobQueue {
    state: Mutex<QueueState>,
    available: Condvar,
}

impl JobQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queues `coords` with a priority derived from the current view. Returns false if the tile
    /// is already queued or the queue is closed.
    pub fn add(&self, coords: TileCoords) -> bool {
        let mut state = self.lock();
        let priority = state.priority(&coords);
        self.push(&mut state, Job { priority, coords })
    }

    pub fn add_with_priority(&self, coords: TileCoords, priority: i64) -> bool {
        let mut state = self.lock();
        self.push(&mut state, Job { priority, coords })
    }

    fn push(&self, state: &mut QueueState, job: Job) -> bool {
        if state.closed || !state.members.insert(job.coords) {
            return false;
        }
        state.heap.push(Reverse(job));
        self.available.notify_one();
        true
    }

    /// Sets the view priorities are computed against. They are recomputed before the next poll.
    pub fn request_reschedule(&self, view: ViewPosition) {
        let mut state = self.lock();
        state.view = Some(view);
        state.reschedule = true;
    }

    /// Takes the job with the smallest priority without blocking.
    pub fn poll(&self) -> Option<Job> {
        self.lock().pop()
    }

    /// Blocks until a job is available. Returns `None` once the queue is closed.
    pub fn wait_poll(&self) -> Option<Job> {
        let mut state = self.lock();
        loop {
            if state.closed {
                return None;
            }
            if let Some(job) = state.pop() {
                return Some(job);
            }
            state = self
                .available
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    pub fn remove(&self, coords: &TileCoords) -> bool {
        let mut state = self.lock();
        if !state.members.remove(coords) {
            return false;
        }
        let jobs: Vec<Reverse<Job>> = state
            .heap
            .drain()
            .filter(|Reverse(job)| job.coords != *coords)
            .collect();
        state.heap = BinaryHeap::from(jobs);
        true
    }

    pub fn contains(&self, coords: &TileCoords) -> bool {
        self.lock().members.contains(coords)
    }

    pub fn clear(&self) {
        let mut state = self.lock();
        state.heap.clear();
        state.members.clear();
    }

    /// Drops all jobs and wakes every blocked worker. Later additions are ignored.
    pub fn close(&self) {
        let mut state = self.lock();
        state.closed = true;
        state.heap.clear();
        state.members.clear();
        self.available.notify_all();
    }

    pub fn len(&self) -> usize {
        self.lock().heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, thread};

    use crate::{
        coords::{TileCoords, ViewPosition, ZoomLevel},
        tile::JobQueue,
    };

    #[test]
    fn test_priority_order() {
        let queue = JobQueue::new();
        let far = TileCoords::from((1, 1, 4));
        let near = TileCoords::from((2, 2, 4));

        assert!(queue.add_with_priority(far, 10));
        assert!(queue.add_with_priority(near, 1));
        assert!(!queue.add_with_priority(near, 0));
        assert_eq!(queue.len(), 2);

        assert_eq!(queue.poll().map(|job| job.coords), Some(near));
        assert_eq!(queue.poll().map(|job| job.coords), Some(far));
        assert!(queue.poll().is_none());
    }

    #[test]
    fn test_reschedule_reorders() {
        let queue = JobQueue::new();
        let west = TileCoords::from((0, 8, 4));
        let east = TileCoords::from((15, 8, 4));

        queue.add_with_priority(west, 1);
        queue.add_with_priority(east, 10);

        // Looking at the east edge of the world now.
        queue.request_reschedule(ViewPosition::new(0.99, 0.5, ZoomLevel::new(4)));

        assert_eq!(queue.poll().map(|job| job.coords), Some(east));
        assert_eq!(queue.poll().map(|job| job.coords), Some(west));
    }

    #[test]
    fn test_remove() {
        let queue = JobQueue::new();
        let coords = TileCoords::from((1, 1, 2));
        queue.add(coords);

        assert!(queue.contains(&coords));
        assert!(queue.remove(&coords));
        assert!(!queue.remove(&coords));
        assert!(queue.is_empty());
        assert!(queue.add(coords));
    }

    #[test]
    fn test_close_wakes_workers() {
        let queue = Arc::new(JobQueue::new());
        let workers: Vec<_> = (0..2)
            .map(|_| {
                let queue = queue.clone();
                thread::spawn(move || queue.wait_poll())
            })
            .collect();

        queue.close();
        for worker in workers {
            assert!(worker.join().unwrap().is_none());
        }
        assert!(!queue.add(TileCoords::from((0, 0, 0))));
    }
}
