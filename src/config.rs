use crate::core::{GridError, Result};
use serde::Deserialize;
use std::time::Duration;

/// Engine tuning: simulated latencies, failure rate and view geometry
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Delay before an optimistic edit resolves
    pub edit_latency: Duration,

    /// Chance that a simulated save fails and is rolled back
    pub failure_probability: f64,

    /// How long a rollback notice stays visible
    pub notice_duration: Duration,

    /// Quiet period before typed search text is applied
    pub search_debounce: Duration,

    /// Delay of the simulated initial load
    pub load_latency: Duration,

    /// Number of records requested from the source at startup
    pub initial_count: usize,

    /// Rows per page in page mode
    pub page_size: usize,

    /// Fixed row height in pixels
    pub row_height: u32,

    /// Viewport height in pixels
    pub viewport_height: u32,

    /// Extra rows laid out above and below the viewport
    pub overscan: usize,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self {
            edit_latency: Duration::from_millis(800),
            failure_probability: 0.10,
            notice_duration: Duration::from_secs(3),
            search_debounce: Duration::from_millis(400),
            load_latency: Duration::from_millis(1500),
            initial_count: 10_000,
            page_size: 50,
            row_height: 52,
            viewport_height: 600,
            overscan: 2,
        }
    }

    pub fn edit_latency(mut self, latency: Duration) -> Self {
        self.edit_latency = latency;
        self
    }

    pub fn failure_probability(mut self, probability: f64) -> Self {
        self.failure_probability = probability;
        self
    }

    pub fn notice_duration(mut self, duration: Duration) -> Self {
        self.notice_duration = duration;
        self
    }

    pub fn search_debounce(mut self, debounce: Duration) -> Self {
        self.search_debounce = debounce;
        self
    }

    pub fn load_latency(mut self, latency: Duration) -> Self {
        self.load_latency = latency;
        self
    }

    pub fn initial_count(mut self, count: usize) -> Self {
        self.initial_count = count;
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn row_height(mut self, row_height: u32) -> Self {
        self.row_height = row_height;
        self
    }

    pub fn viewport_height(mut self, height: u32) -> Self {
        self.viewport_height = height;
        self
    }

    pub fn overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    /// Parse a JSON document; missing keys keep their defaults
    ///
    /// Durations are given in milliseconds, e.g. `{"editLatencyMs": 200}`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawConfig = serde_json::from_str(json)?;
        let config = raw.apply(Self::new());
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.failure_probability) {
            return Err(GridError::InvalidConfig(
                "failure_probability must be within [0, 1]".into(),
            ));
        }

        if self.page_size == 0 {
            return Err(GridError::InvalidConfig("page_size must be > 0".into()));
        }

        if self.row_height == 0 {
            return Err(GridError::InvalidConfig("row_height must be > 0".into()));
        }

        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawConfig {
    edit_latency_ms: Option<u64>,
    failure_probability: Option<f64>,
    notice_duration_ms: Option<u64>,
    search_debounce_ms: Option<u64>,
    load_latency_ms: Option<u64>,
    initial_count: Option<usize>,
    page_size: Option<usize>,
    row_height: Option<u32>,
    viewport_height: Option<u32>,
    overscan: Option<usize>,
}

impl RawConfig {
    fn apply(self, mut config: EngineConfig) -> EngineConfig {
        if let Some(ms) = self.edit_latency_ms {
            config.edit_latency = Duration::from_millis(ms);
        }
        if let Some(p) = self.failure_probability {
            config.failure_probability = p;
        }
        if let Some(ms) = self.notice_duration_ms {
            config.notice_duration = Duration::from_millis(ms);
        }
        if let Some(ms) = self.search_debounce_ms {
            config.search_debounce = Duration::from_millis(ms);
        }
        if let Some(ms) = self.load_latency_ms {
            config.load_latency = Duration::from_millis(ms);
        }
        if let Some(count) = self.initial_count {
            config.initial_count = count;
        }
        if let Some(size) = self.page_size {
            config.page_size = size;
        }
        if let Some(height) = self.row_height {
            config.row_height = height;
        }
        if let Some(height) = self.viewport_height {
            config.viewport_height = height;
        }
        if let Some(overscan) = self.overscan {
            config.overscan = overscan;
        }
        config
    }
}
