//! Shared access-control policy for gated content.
//!
//! Every handler that gates or mutates creator resources goes through this
//! module; no route carries its own copy of the checks. The pipeline is
//! fixed: identity extraction ([`crate::middleware::auth`]) feeds the
//! authorization guard for mutations, and membership evaluation feeds the
//! sanitizer for gated reads. Any ambiguity (missing viewer, store error,
//! malformed credential) resolves to "no access".

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::middleware::auth::MaybeAuthUser;
use crate::modules::memberships::model::Membership;
use crate::modules::memberships::service::MembershipService;
use crate::modules::posts::model::Post;
use crate::utils::address::{is_valid_address, normalize_address};

/// Sentinel substituted for gated post content.
pub const LOCKED_CONTENT: &str = "LOCKED";

/// True iff the principal may act as `target`: both addresses present and
/// equal under case-insensitive comparison.
pub fn check_authorization(principal_address: &str, target_address: &str) -> bool {
    if principal_address.is_empty() || target_address.is_empty() {
        return false;
    }
    principal_address.eq_ignore_ascii_case(target_address)
}

/// Pure membership evaluation against an already-fetched membership list.
///
/// The owner always has access to their own content, even with no
/// memberships on record. `now` is captured once by the caller so a single
/// check cannot straddle an expiry boundary. Expiry is exclusive: a
/// membership expiring exactly at `now` is no longer active.
pub fn evaluate_access(
    viewer_address: Option<&str>,
    creator_address: &str,
    memberships: &[Membership],
    now: DateTime<Utc>,
) -> bool {
    let Some(viewer) = viewer_address else {
        return false;
    };

    if check_authorization(viewer, creator_address) {
        return true;
    }

    memberships.iter().any(|m| {
        m.creator_address.eq_ignore_ascii_case(creator_address) && m.expires_at > now
    })
}

/// Looks up the viewer's memberships and evaluates access to a creator's
/// gated content. A store failure is logged and treated as "no access",
/// so this path never fails open.
pub async fn has_active_access(
    db: &PgPool,
    viewer_address: Option<&str>,
    creator_address: &str,
) -> bool {
    let Some(viewer) = viewer_address else {
        return false;
    };

    if check_authorization(viewer, creator_address) {
        return true;
    }

    match MembershipService::get_by_subscriber(db, viewer).await {
        Ok(memberships) => {
            evaluate_access(Some(viewer), creator_address, &memberships, Utc::now())
        }
        Err(e) => {
            tracing::error!(error = %e.error, viewer, creator_address,
                "membership lookup failed, denying access");
            false
        }
    }
}

/// Returns the post untouched for public posts or entitled viewers;
/// otherwise a redacted projection with the gated fields stripped. Title and
/// the remaining preview metadata survive so browse UIs can render teasers.
pub fn sanitize_post(post: Post, has_access: bool) -> Post {
    if post.is_public || has_access {
        return post;
    }

    Post {
        content: LOCKED_CONTENT.to_string(),
        image: None,
        video_url: None,
        ..post
    }
}

/// Resolves which address a gated read is evaluated for.
///
/// A verified principal always wins. The self-reported `viewer` query
/// parameter is honored only for unauthenticated callers (public preview
/// computation) and only when syntactically valid.
pub fn resolve_viewer(auth: &MaybeAuthUser, viewer_param: Option<&str>) -> Option<String> {
    if let Some(address) = auth.address() {
        return Some(address.to_string());
    }

    viewer_param
        .filter(|v| is_valid_address(v))
        .map(normalize_address)
}
