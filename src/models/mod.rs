//! Simulation domain models.
//!
//! Provides the value types shared by every scheduling algorithm: the
//! input process record and the output results table and timeline.
//!
//! # Vocabulary
//!
//! | Type | Meaning |
//! |------|---------|
//! | `Process` | Input record: pid, arrival, burst, optional priority |
//! | `ProcessOutcome` | Results-table row: start, completion, turnaround, waiting, response |
//! | `TimelineInterval` | `[start, end)` run of one pid on the CPU |
//! | `Timeline` | Ordered, non-overlapping intervals (Gantt data) |
//! | `Schedule` | Results table + timeline of one algorithm run |

mod outcome;
mod process;
mod schedule;
mod timeline;

pub use outcome::ProcessOutcome;
pub use process::{processes, Pid, Process};
pub use schedule::Schedule;
pub use timeline::{Slot, Timeline, TimelineInterval};
