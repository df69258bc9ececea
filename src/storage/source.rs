// ============================================================================
// Initial Load Collaborator
// ============================================================================
//
// The store is filled once at startup from a RecordSource. The mock source
// fabricates a realistic roster after a simulated network delay.
//
// ============================================================================

use crate::core::{GridError, Record, RecordId, Result, Role, Status};
use async_trait::async_trait;
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::time::Duration;

pub const DEPARTMENTS: [&str; 6] = [
    "Engineering",
    "Sales",
    "Marketing",
    "HR",
    "Finance",
    "Operations",
];

const FIRST_NAMES: [&str; 30] = [
    "John", "Jane", "Michael", "Sarah", "David", "Emma", "James", "Olivia", "Robert", "Ava",
    "William", "Isabella", "Richard", "Mia", "Joseph", "Charlotte", "Thomas", "Amelia",
    "Charles", "Harper", "Christopher", "Evelyn", "Daniel", "Abigail", "Matthew", "Emily",
    "Anthony", "Elizabeth", "Donald", "Sofia",
];

const LAST_NAMES: [&str; 30] = [
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson", "White", "Harris", "Sanchez",
    "Clark", "Ramirez", "Lewis", "Robinson",
];

/// Upstream provider of the initial collection
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch_initial(&self, count: usize) -> Result<Vec<Record>>;
}

/// Generates records locally after a fixed delay
///
/// The same seed always yields the same roster.
#[derive(Debug, Clone)]
pub struct MockRecordSource {
    seed: u64,
    latency: Duration,
    fail: bool,
}

impl MockRecordSource {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            latency: Duration::from_millis(1500),
            fail: false,
        }
    }

    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Make every fetch fail after the delay
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn generate(&self, count: usize) -> Vec<Record> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        (0..count).map(|i| Self::generate_one(&mut rng, i)).collect()
    }

    fn generate_one(rng: &mut StdRng, i: usize) -> Record {
        let first = FIRST_NAMES.choose(rng).copied().unwrap_or("John");
        let last = LAST_NAMES.choose(rng).copied().unwrap_or("Smith");
        let department = DEPARTMENTS.choose(rng).copied().unwrap_or("Engineering");
        let role = Role::ALL.choose(rng).copied().unwrap_or(Role::Viewer);

        let status = if rng.gen_bool(0.8) { Status::Active } else { Status::Inactive };
        let join_date = NaiveDate::from_ymd_opt(
            rng.gen_range(2015..2024),
            rng.gen_range(1..=12),
            rng.gen_range(1..=28),
        )
        .unwrap_or_default();

        Record::new(
            RecordId::sequential(i + 1),
            format!("{} {}", first, last),
            format!("{}.{}{}@company.com", first.to_lowercase(), last.to_lowercase(), i),
        )
        .age(rng.gen_range(22..65))
        .department(department)
        .salary(rng.gen_range(40_000..150_000))
        .joined(join_date)
        .status(status)
        .role(role)
    }
}

#[async_trait]
impl RecordSource for MockRecordSource {
    async fn fetch_initial(&self, count: usize) -> Result<Vec<Record>> {
        tokio::time::sleep(self.latency).await;

        if self.fail {
            return Err(GridError::LoadFailure("mock source unavailable".into()));
        }
        Ok(self.generate(count))
    }
}
