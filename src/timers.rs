use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::effects::EffectId;
use crate::species::Species;

/// Something the play area must do once virtual time reaches `fire_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimedAction {
    /// Place a replacement critter of this species.
    Respawn(Species),
    /// Remove a catch sparkle.
    ExpireEffect(EffectId),
}

#[derive(Debug, Clone, Copy)]
struct Scheduled {
    fire_at: f64,
    seq: u64,
    action: TimedAction,
}

impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Scheduled {}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scheduled {
    // Reversed so the max-heap pops the earliest deadline first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .fire_at
            .total_cmp(&self.fire_at)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// One-shot delayed events keyed on the play area's virtual clock.
///
/// Events with equal deadlines fire in the order they were scheduled.
pub struct TimerQueue {
    heap: BinaryHeap<Scheduled>,
    next_seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    pub fn schedule(&mut self, fire_at: f64, action: TimedAction) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Scheduled {
            fire_at,
            seq,
            action,
        });
    }

    /// Pop every action due at or before `now`, earliest first.
    pub fn drain_due(&mut self, now: f64) -> Vec<TimedAction> {
        let mut due = Vec::new();
        while let Some(next) = self.heap.peek() {
            if next.fire_at > now {
                break;
            }
            if let Some(item) = self.heap.pop() {
                due.push(item.action);
            }
        }
        due
    }

    /// Deadline of the next pending action.
    pub fn next_deadline(&self) -> Option<f64> {
        self.heap.peek().map(|s| s.fire_at)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Cancel everything pending.
    pub fn clear(&mut self) {
        self.heap.clear();
    }
}

impl Default for TimerQueue {
    fn default() -> Self {
        Self::new()
    }
}
