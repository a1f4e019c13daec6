use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Creator identification for the stats query. `creator` is canonical,
/// `address` is accepted as an alias.
#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct StatsParams {
    pub creator: Option<String>,
    pub address: Option<String>,
}

impl StatsParams {
    pub fn creator_address(&self) -> Option<&str> {
        self.creator.as_deref().or(self.address.as_deref())
    }
}

/// One month of the revenue chart. Only the current month carries the
/// recurring total; earlier months are placeholders until per-period
/// settlement data exists.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RevenueMonth {
    pub name: String,
    pub revenue: f64,
}

/// Onboarding checklist shown on the creator dashboard.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StatsChecklist {
    pub profile_set: bool,
    pub is_deployed: bool,
    pub has_tiers: bool,
    pub has_posts: bool,
}

/// Dashboard aggregation for a single creator. Membership figures count
/// only unexpired subscriptions; revenue sums the price of each active
/// member's matched tier.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreatorStats {
    pub contract_address: Option<String>,
    pub total_revenue: f64,
    pub monthly_recurring: f64,
    pub active_members: i64,
    pub history: Vec<RevenueMonth>,
    pub checklist: StatsChecklist,
    pub total_backrs: i64,
    pub active_discussions: i64,
    pub likes_this_week: i64,
    pub top_tier_members: i64,
}
