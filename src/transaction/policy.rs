use rand::Rng;
use std::fmt::Debug;

/// Decides whether a simulated save fails
pub trait FailurePolicy: Debug + Send + Sync {
    fn should_fail(&self) -> bool;
}

/// Fails with a fixed probability
#[derive(Debug, Clone, Copy)]
pub struct RandomFailure {
    probability: f64,
}

impl RandomFailure {
    pub fn new(probability: f64) -> Self {
        Self {
            probability: probability.clamp(0.0, 1.0),
        }
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl Default for RandomFailure {
    fn default() -> Self {
        Self::new(0.10)
    }
}

impl FailurePolicy for RandomFailure {
    fn should_fail(&self) -> bool {
        rand::thread_rng().gen_bool(self.probability)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysCommit;

impl FailurePolicy for AlwaysCommit {
    fn should_fail(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysFail;

impl FailurePolicy for AlwaysFail {
    fn should_fail(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extremes() {
        assert!(!RandomFailure::new(0.0).should_fail());
        assert!(RandomFailure::new(1.0).should_fail());
        assert_eq!(RandomFailure::new(7.0).probability(), 1.0);
        assert!(!AlwaysCommit.should_fail());
        assert!(AlwaysFail.should_fail());
    }

    #[test]
    fn test_default_rate_roughly_ten_percent() {
        let policy = RandomFailure::default();
        let failures = (0..10_000).filter(|_| policy.should_fail()).count();
        assert!((500..1_500).contains(&failures), "{} failures", failures);
    }
}
