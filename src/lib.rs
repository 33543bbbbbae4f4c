//! Single-CPU scheduling simulator.
//!
//! Simulates classical CPU scheduling algorithms over a set of processes
//! and reports per-process timing metrics plus a Gantt timeline. Rendering
//! and input forms are left to the surrounding application, which only
//! needs the `(start, end, pid)` intervals and the metrics tables produced
//! here.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Process`, `ProcessOutcome`,
//!   `TimelineInterval`, `Timeline`, `Schedule`
//! - **`scheduler`**: FCFS, SJF, SRTF, Round Robin, Priority (NP/P) and
//!   `ScheduleMetrics`
//! - **`comparator`**: Runs all algorithms, sweeps the RR quantum and ranks
//!   the results
//! - **`replay`**: Tick-by-tick playback of a computed schedule
//! - **`generator`**: Seeded random workloads
//! - **`validation`**: Input integrity checks (duplicate PIDs, bursts, quanta)
//!
//! # Example
//!
//! ```
//! use cpu_sched::comparator::{Comparator, Metric};
//! use cpu_sched::models::processes;
//! use cpu_sched::scheduler::{fcfs, ScheduleMetrics};
//!
//! let ps = processes([(1, 0, 5), (2, 1, 3), (3, 2, 8)]);
//!
//! let schedule = fcfs(&ps).unwrap();
//! let metrics = ScheduleMetrics::calculate(&schedule).unwrap();
//! assert_eq!(metrics.makespan, 16);
//!
//! let comparison = Comparator::new().compare(&ps).unwrap();
//! assert_eq!(comparison.best(Metric::Response).unwrap().label, "SRTF");
//! ```
//!
//! # Logging
//!
//! The crate emits `tracing` events (run start/finish, dispatches,
//! comparator progress) and never installs a subscriber.

pub mod comparator;
pub mod error;
pub mod generator;
pub mod models;
pub mod replay;
pub mod scheduler;
pub mod validation;

pub use error::{Result, SchedError};
