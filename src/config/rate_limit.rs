use tower_governor::governor::{GovernorConfig, GovernorConfigBuilder};
use tower_governor::key_extractor::PeerIpKeyExtractor;

/// Rate limit configuration for the API.
///
/// Public read endpoints share the general bucket; mutating endpoints get a
/// stricter one. The limits are a serving-edge concern: the configs built
/// here are attached where the listener is set up, not inside the router,
/// so the router stays drivable in tests.
#[derive(Clone, Debug)]
pub struct RateLimitConfig {
    /// Requests per second for read endpoints
    pub general_per_second: u64,
    /// Burst size for read endpoints
    pub general_burst_size: u32,
    /// Requests per second for mutating endpoints (stricter)
    pub mutation_per_second: u64,
    /// Burst size for mutating endpoints (stricter)
    pub mutation_burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            general_per_second: 2,
            general_burst_size: 30,
            mutation_per_second: 10,
            mutation_burst_size: 5,
        }
    }
}

impl RateLimitConfig {
    pub fn from_env() -> Self {
        Self {
            general_per_second: std::env::var("RATE_LIMIT_GENERAL_PER_SECOND")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(2),
            general_burst_size: std::env::var("RATE_LIMIT_GENERAL_BURST_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            mutation_per_second: std::env::var("RATE_LIMIT_MUTATION_PER_SECOND")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            mutation_burst_size: std::env::var("RATE_LIMIT_MUTATION_BURST_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
        }
    }

    /// Creates a `GovernorConfig` for read endpoints, keyed by peer IP.
    pub fn general_governor_config(
        &self,
    ) -> GovernorConfig<PeerIpKeyExtractor, ::governor::middleware::NoOpMiddleware> {
        GovernorConfigBuilder::default()
            .per_second(self.general_per_second)
            .burst_size(self.general_burst_size)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .expect("Failed to build general rate limiter config")
    }

    /// Creates a `GovernorConfig` for mutating endpoints, keyed by peer IP.
    pub fn mutation_governor_config(
        &self,
    ) -> GovernorConfig<PeerIpKeyExtractor, ::governor::middleware::NoOpMiddleware> {
        GovernorConfigBuilder::default()
            .per_second(self.mutation_per_second)
            .burst_size(self.mutation_burst_size)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .expect("Failed to build mutation rate limiter config")
    }
}
