//! CPU occupancy timeline (Gantt data).
//!
//! A timeline is an ordered list of half-open `[start, end)` intervals during
//! which a single process held the CPU. Gaps between intervals are idle time.

use serde::{Deserialize, Serialize};

use super::Pid;

/// A contiguous run of one process on the CPU, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineInterval {
    /// First tick of the run.
    pub start: i64,
    /// Tick after the last unit executed.
    pub end: i64,
    /// Process on the CPU.
    pub pid: Pid,
}

impl TimelineInterval {
    /// Creates an interval.
    pub fn new(start: i64, end: i64, pid: Pid) -> Self {
        Self { start, end, pid }
    }

    /// Interval length in ticks.
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }
}

/// A timeline entry with idle gaps made explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Slot {
    /// CPU executing a process.
    Busy(TimelineInterval),
    /// CPU idle over `[start, end)`.
    Idle { start: i64, end: i64 },
}

impl Slot {
    /// Start tick.
    pub fn start(&self) -> i64 {
        match self {
            Slot::Busy(iv) => iv.start,
            Slot::Idle { start, .. } => *start,
        }
    }

    /// End tick.
    pub fn end(&self) -> i64 {
        match self {
            Slot::Busy(iv) => iv.end,
            Slot::Idle { end, .. } => *end,
        }
    }

    /// Process on the CPU, `None` when idle.
    pub fn pid(&self) -> Option<Pid> {
        match self {
            Slot::Busy(iv) => Some(iv.pid),
            Slot::Idle { .. } => None,
        }
    }
}

/// Ordered, non-overlapping CPU occupancy intervals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    intervals: Vec<TimelineInterval>,
}

impl Timeline {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an interval as-is.
    ///
    /// Callers append in time order; empty intervals are dropped.
    pub fn push(&mut self, start: i64, end: i64, pid: Pid) {
        debug_assert!(
            self.intervals.last().map_or(true, |last| last.end <= start),
            "interval [{start}, {end}) for P{pid} overlaps the previous one"
        );
        if end > start {
            self.intervals.push(TimelineInterval::new(start, end, pid));
        }
    }

    /// Appends an interval, extending the last one when it belongs to the
    /// same process and ends exactly at `start`.
    pub fn record(&mut self, start: i64, end: i64, pid: Pid) {
        if let Some(last) = self.intervals.last_mut() {
            if last.pid == pid && last.end == start {
                last.end = end;
                return;
            }
        }
        self.push(start, end, pid);
    }

    /// All intervals in time order.
    pub fn intervals(&self) -> &[TimelineInterval] {
        &self.intervals
    }

    /// Iterates over intervals in time order.
    pub fn iter(&self) -> std::slice::Iter<'_, TimelineInterval> {
        self.intervals.iter()
    }

    /// Number of intervals.
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Whether the timeline has no intervals.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// End of the last interval (0 for an empty timeline).
    pub fn end(&self) -> i64 {
        self.intervals.last().map(|iv| iv.end).unwrap_or(0)
    }

    /// Total busy ticks.
    pub fn busy_time(&self) -> i64 {
        self.intervals.iter().map(TimelineInterval::duration).sum()
    }

    /// Total ticks a given process held the CPU.
    pub fn busy_time_for(&self, pid: Pid) -> i64 {
        self.intervals
            .iter()
            .filter(|iv| iv.pid == pid)
            .map(TimelineInterval::duration)
            .sum()
    }

    /// Intervals of a given process.
    pub fn intervals_for(&self, pid: Pid) -> Vec<&TimelineInterval> {
        self.intervals.iter().filter(|iv| iv.pid == pid).collect()
    }

    /// Process on the CPU during tick `t`, if any.
    pub fn running_at(&self, t: i64) -> Option<Pid> {
        let idx = self.intervals.partition_point(|iv| iv.end <= t);
        self.intervals
            .get(idx)
            .filter(|iv| iv.start <= t)
            .map(|iv| iv.pid)
    }

    /// Number of hand-overs between distinct processes.
    ///
    /// Idle gaps do not reset the last process: `P1, idle, P1` is zero
    /// switches, `P1, idle, P2` is one.
    pub fn context_switches(&self) -> usize {
        self.intervals
            .windows(2)
            .filter(|w| w[0].pid != w[1].pid)
            .count()
    }

    /// Timeline with explicit idle slots, starting at t=0.
    pub fn slots(&self) -> Vec<Slot> {
        let mut slots = Vec::with_capacity(self.intervals.len() * 2);
        let mut cursor = 0;
        for iv in &self.intervals {
            if iv.start > cursor {
                slots.push(Slot::Idle {
                    start: cursor,
                    end: iv.start,
                });
            }
            slots.push(Slot::Busy(*iv));
            cursor = iv.end;
        }
        slots
    }

    /// Whether intervals are sorted, non-empty and non-overlapping.
    pub fn is_well_formed(&self) -> bool {
        self.intervals.iter().all(|iv| iv.start < iv.end)
            && self.intervals.windows(2).all(|w| w[0].end <= w[1].start)
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a TimelineInterval;
    type IntoIter = std::slice::Iter<'a, TimelineInterval>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.iter()
    }
}
