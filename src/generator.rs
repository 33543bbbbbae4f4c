//! Random process-set generation.
//!
//! Produces reproducible workloads from a caller-supplied RNG, for demos,
//! benchmarks and randomized tests.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::Process;

/// Generator of random process sets.
///
/// PIDs are assigned `1..=count` in generation order.
///
/// # Example
///
/// ```
/// use cpu_sched::generator::WorkloadGenerator;
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let mut rng = StdRng::seed_from_u64(1);
/// let ps = WorkloadGenerator::new(5).with_priorities(0, 3).generate(&mut rng);
/// assert_eq!(ps.len(), 5);
/// assert!(ps.iter().all(|p| p.burst >= 1 && p.priority.is_some()));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadGenerator {
    /// Number of processes to generate.
    pub count: usize,
    /// Largest arrival tick (arrivals drawn from `0..=max_arrival`).
    pub max_arrival: i64,
    /// Largest burst (bursts drawn from `1..=max_burst`).
    pub max_burst: i64,
    /// Inclusive priority range; `None` = no priorities.
    pub priority_range: Option<(i32, i32)>,
}

impl WorkloadGenerator {
    /// Creates a generator for `count` processes (arrivals ≤ 10, bursts ≤ 10).
    pub fn new(count: usize) -> Self {
        Self {
            count,
            max_arrival: 10,
            max_burst: 10,
            priority_range: None,
        }
    }

    /// Sets the latest arrival tick.
    pub fn with_max_arrival(mut self, max_arrival: i64) -> Self {
        self.max_arrival = max_arrival.max(0);
        self
    }

    /// Sets the largest burst.
    pub fn with_max_burst(mut self, max_burst: i64) -> Self {
        self.max_burst = max_burst.max(1);
        self
    }

    /// Assigns priorities drawn from `low..=high`.
    pub fn with_priorities(mut self, low: i32, high: i32) -> Self {
        let low = low.max(0);
        self.priority_range = Some((low, high.max(low)));
        self
    }

    /// Generates a process set.
    ///
    /// Out-of-range settings (set directly or deserialized) are clamped the
    /// same way the `with_*` setters clamp them.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Vec<Process> {
        let max_arrival = self.max_arrival.max(0);
        let max_burst = self.max_burst.max(1);
        let priority_range = self.priority_range.map(|(low, high)| {
            let low = low.max(0);
            (low, high.max(low))
        });

        (1..=self.count)
            .map(|pid| {
                let process = Process::new(
                    pid as u32,
                    rng.random_range(0..=max_arrival),
                    rng.random_range(1..=max_burst),
                );
                match priority_range {
                    Some((low, high)) => process.with_priority(rng.random_range(low..=high)),
                    None => process,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_processes;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generated_workload_is_valid() {
        let mut rng = StdRng::seed_from_u64(3);
        let ps = WorkloadGenerator::new(20)
            .with_max_arrival(5)
            .with_max_burst(4)
            .generate(&mut rng);
        assert_eq!(ps.len(), 20);
        assert!(validate_processes(&ps).is_ok());
        assert!(ps.iter().all(|p| p.arrival <= 5 && p.burst <= 4));
        assert!(ps.iter().all(|p| p.priority.is_none()));
    }

    #[test]
    fn test_same_seed_same_workload() {
        let generator = WorkloadGenerator::new(10).with_priorities(1, 5);
        let a = generator.generate(&mut StdRng::seed_from_u64(11));
        let b = generator.generate(&mut StdRng::seed_from_u64(11));
        assert_eq!(a, b);
        assert!(a
            .iter()
            .all(|p| matches!(p.priority, Some(pr) if (1..=5).contains(&pr))));
    }

    #[test]
    fn test_clamped_settings() {
        let g = WorkloadGenerator::new(1)
            .with_max_arrival(-3)
            .with_max_burst(0)
            .with_priorities(4, 2);
        assert_eq!(g.max_arrival, 0);
        assert_eq!(g.max_burst, 1);
        assert_eq!(g.priority_range, Some((4, 4)));
    }

    #[test]
    fn test_raw_settings_are_clamped_on_generate() {
        let g = WorkloadGenerator {
            count: 3,
            max_arrival: -1,
            max_burst: 0,
            priority_range: Some((5, 2)),
        };
        let ps = g.generate(&mut StdRng::seed_from_u64(5));
        assert!(ps
            .iter()
            .all(|p| p.arrival == 0 && p.burst == 1 && p.priority == Some(5)));

        let g: WorkloadGenerator = serde_json::from_str(
            r#"{"count": 2, "max_arrival": 4, "max_burst": -7, "priority_range": [-3, -9]}"#,
        )
        .unwrap();
        let ps = g.generate(&mut StdRng::seed_from_u64(5));
        assert!(validate_processes(&ps).is_ok());
        assert!(ps.iter().all(|p| p.burst == 1 && p.priority == Some(0)));
    }
}
