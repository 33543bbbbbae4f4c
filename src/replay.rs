//! Step-by-step replay of a computed schedule.
//!
//! A presentation helper for animated views: it walks an existing
//! [`Schedule`] one tick at a time and reports what the CPU and the
//! queues look like, without re-running any scheduling logic. The caller
//! drives it from its own timer by calling [`Replay::tick`].
//!
//! # States
//!
//! ```text
//! Idle --play--> Playing --pause--> Paused --resume--> Playing
//! Playing --(last tick)--> Finished
//! any --cancel--> Cancelled        any --reset--> Idle (t = 0)
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{Pid, ProcessOutcome, Schedule, Timeline};

/// Replay lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplayState {
    /// Not started, positioned at t=0.
    Idle,
    /// Advancing on every tick.
    Playing,
    /// Frozen; ticks are ignored.
    Paused,
    /// Every tick up to the makespan was emitted.
    Finished,
    /// Stopped by the caller; only `reset` leaves this state.
    Cancelled,
}

/// Snapshot of the simulated system during tick `[time, time + 1)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayFrame {
    /// Tick being shown.
    pub time: i64,
    /// Process on the CPU, `None` when idle.
    pub running: Option<Pid>,
    /// Arrived, unfinished, not running; in arrival order.
    pub ready: Vec<Pid>,
    /// Not yet arrived; in arrival order.
    pub incoming: Vec<Pid>,
    /// Finished by `time`; in completion order.
    pub completed: Vec<Pid>,
    /// Hand-overs between distinct processes up to and including this tick.
    pub context_switches: usize,
}

/// Tick-driven replay of one schedule.
#[derive(Debug, Clone)]
pub struct Replay {
    label: String,
    /// Outcomes stably sorted by arrival.
    by_arrival: Vec<ProcessOutcome>,
    timeline: Timeline,
    horizon: i64,
    time: i64,
    state: ReplayState,
}

impl Replay {
    /// Creates a replay positioned at t=0.
    pub fn new(schedule: &Schedule) -> Self {
        let mut by_arrival = schedule.outcomes.clone();
        by_arrival.sort_by_key(|o| o.arrival);
        Self {
            label: schedule.algorithm.clone(),
            by_arrival,
            timeline: schedule.timeline.clone(),
            horizon: schedule.makespan(),
            time: 0,
            state: ReplayState::Idle,
        }
    }

    /// Current state.
    pub fn state(&self) -> ReplayState {
        self.state
    }

    /// Next tick to be emitted.
    pub fn time(&self) -> i64 {
        self.time
    }

    /// Total number of ticks in the replay.
    pub fn horizon(&self) -> i64 {
        self.horizon
    }

    /// Starts playback from `Idle`. Returns whether the state changed.
    pub fn play(&mut self) -> bool {
        self.transition(ReplayState::Idle, ReplayState::Playing)
    }

    /// Pauses a playing replay. Returns whether the state changed.
    pub fn pause(&mut self) -> bool {
        self.transition(ReplayState::Playing, ReplayState::Paused)
    }

    /// Resumes a paused replay. Returns whether the state changed.
    pub fn resume(&mut self) -> bool {
        self.transition(ReplayState::Paused, ReplayState::Playing)
    }

    /// Stops the replay; ticks yield nothing until `reset`.
    pub fn cancel(&mut self) {
        if self.state != ReplayState::Cancelled {
            debug!(algorithm = %self.label, at = self.time, "replay cancelled");
            self.state = ReplayState::Cancelled;
        }
    }

    /// Rewinds to t=0 in the `Idle` state.
    pub fn reset(&mut self) {
        debug!(algorithm = %self.label, from = ?self.state, "replay reset");
        self.time = 0;
        self.state = ReplayState::Idle;
    }

    /// Emits the frame for the current tick and advances, while playing.
    ///
    /// Returns `None` in any other state. The last tick moves the replay
    /// to `Finished`.
    pub fn tick(&mut self) -> Option<ReplayFrame> {
        if self.state != ReplayState::Playing {
            return None;
        }
        if self.time >= self.horizon {
            self.state = ReplayState::Finished;
            return None;
        }

        let frame = self.frame_at(self.time);
        self.time += 1;
        if self.time >= self.horizon {
            debug!(algorithm = %self.label, ticks = self.horizon, "replay finished");
            self.state = ReplayState::Finished;
        }
        Some(frame)
    }

    /// Frame for tick `t`, independent of the playback state.
    pub fn frame_at(&self, t: i64) -> ReplayFrame {
        let running = self.timeline.running_at(t);

        let mut ready = Vec::new();
        let mut incoming = Vec::new();
        for o in &self.by_arrival {
            if o.arrival > t {
                incoming.push(o.pid);
            } else if o.completion > t && running != Some(o.pid) {
                ready.push(o.pid);
            }
        }

        let mut done: Vec<&ProcessOutcome> =
            self.by_arrival.iter().filter(|o| o.completion <= t).collect();
        done.sort_by_key(|o| o.completion);

        let started: Vec<Pid> = self
            .timeline
            .iter()
            .take_while(|iv| iv.start <= t)
            .map(|iv| iv.pid)
            .collect();
        let context_switches = started.windows(2).filter(|w| w[0] != w[1]).count();

        ReplayFrame {
            time: t,
            running,
            ready,
            incoming,
            completed: done.iter().map(|o| o.pid).collect(),
            context_switches,
        }
    }

    /// All frames from t=0 to the makespan.
    pub fn frames(&self) -> Vec<ReplayFrame> {
        (0..self.horizon).map(|t| self.frame_at(t)).collect()
    }

    fn transition(&mut self, from: ReplayState, to: ReplayState) -> bool {
        if self.state != from {
            return false;
        }
        debug!(algorithm = %self.label, ?from, ?to, at = self.time, "replay transition");
        self.state = to;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::processes;
    use crate::scheduler::{fcfs, srtf};

    fn srtf_replay() -> Replay {
        let ps = processes([(1, 0, 8), (2, 1, 4)]);
        Replay::new(&srtf(&ps).unwrap())
    }

    #[test]
    fn test_ticks_only_while_playing() {
        let mut r = srtf_replay();
        assert_eq!(r.state(), ReplayState::Idle);
        assert!(r.tick().is_none());

        assert!(r.play());
        let f0 = r.tick().unwrap();
        assert_eq!(f0.time, 0);
        assert_eq!(f0.running, Some(1));
        assert_eq!(f0.incoming, vec![2]);

        assert!(r.pause());
        assert!(r.tick().is_none());
        assert_eq!(r.time(), 1);

        assert!(r.resume());
        let f1 = r.tick().unwrap();
        assert_eq!(f1.running, Some(2));
        assert_eq!(f1.ready, vec![1]);
        assert_eq!(f1.context_switches, 1);
    }

    #[test]
    fn test_runs_to_finished() {
        let mut r = srtf_replay();
        r.play();
        let mut count = 0;
        while let Some(frame) = r.tick() {
            assert_eq!(frame.time, count);
            count += 1;
        }
        assert_eq!(count, 12);
        assert_eq!(r.state(), ReplayState::Finished);
        assert!(!r.resume());
    }

    #[test]
    fn test_cancel_and_reset() {
        let mut r = srtf_replay();
        r.play();
        r.tick();
        r.tick();
        r.cancel();
        assert_eq!(r.state(), ReplayState::Cancelled);
        assert!(r.tick().is_none());
        assert!(!r.play());

        r.reset();
        assert_eq!(r.state(), ReplayState::Idle);
        assert_eq!(r.time(), 0);
        assert!(r.play());
        assert_eq!(r.tick().map(|f| f.time), Some(0));
    }

    #[test]
    fn test_frames_match_schedule() {
        let ps = processes([(1, 0, 2), (2, 4, 1)]);
        let schedule = fcfs(&ps).unwrap();
        let r = Replay::new(&schedule);
        let frames = r.frames();
        assert_eq!(frames.len(), 5);
        // idle gap at t=2..4
        assert_eq!(frames[2].running, None);
        assert_eq!(frames[2].completed, vec![1]);
        assert_eq!(frames[2].incoming, vec![2]);
        assert_eq!(frames[4].running, Some(2));
        for (t, frame) in frames.iter().enumerate() {
            assert_eq!(frame.running, schedule.timeline.running_at(t as i64));
        }
    }

    #[test]
    fn test_completed_in_completion_order() {
        let ps = processes([(1, 0, 8), (2, 1, 4)]);
        let r = Replay::new(&srtf(&ps).unwrap());
        let last = r.frame_at(12);
        assert_eq!(last.completed, vec![2, 1]);
        assert!(last.ready.is_empty());
        assert_eq!(last.running, None);
    }
}
