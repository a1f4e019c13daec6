pub mod creators;
pub mod memberships;
pub mod posts;
pub mod stats;
pub mod tiers;
pub mod tips;
