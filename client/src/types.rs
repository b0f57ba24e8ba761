//! Domain DTOs for the linkhub API.
//!
//! # Design
//! Response payloads mirror the server's wire schema but are defined
//! independently of the mock-server crate; integration tests catch schema
//! drift. Field names and nullability follow the production envelopes
//! exactly, so `Option` appears wherever the server may send `null`.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Generic response payloads
// ---------------------------------------------------------------------------

/// Empty acknowledgement payload (`{}`) returned by mutation endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ack {}

/// `{ result: bool }` payload, e.g. the logged-in probe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultPayload {
    pub result: bool,
}

/// `{ username: string | null }` payload from the session-username probe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsernamePayload {
    pub username: Option<String>,
}

/// `{ href }` returned by the image upload endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUploaded {
    pub href: String,
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

/// A profile page as served to viewers. Follower counts are `null` when the
/// profile is private and the viewer is not allowed to see them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub display_name: String,
    pub bio: Option<String>,
    pub picture: String,
    pub following: Option<i64>,
    pub followers: Option<i64>,
    pub is_private: bool,
    pub is_owner: bool,
    pub id: i64,
}

/// One row of a paginated profile listing (followers, following, search).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub username: String,
    pub img_src: Option<String>,
    pub id: i64,
    pub display_name: Option<String>,
}

/// `{ profiles, total_size }` page of profile rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfilePage {
    pub profiles: Vec<ProfileSummary>,
    pub total_size: i64,
}

// ---------------------------------------------------------------------------
// Links
// ---------------------------------------------------------------------------

/// One link of a profile. `next_id` chains the display order; the link whose
/// id no other link points at renders first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub id: i64,
    pub user_id: i64,
    pub next_id: Option<i64>,
    pub title: Option<String>,
    pub href: String,
    pub description: Option<String>,
    pub img_src: Option<String>,
}

/// `{ links: [...] }` payload of the link listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkList {
    pub links: Vec<Link>,
}

// ---------------------------------------------------------------------------
// Follows
// ---------------------------------------------------------------------------

/// Relation between the session user and a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FollowStatus {
    Following,
    Pending,
    None,
}

/// `{ status }` payload of the follow-status endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowStatusPayload {
    pub status: FollowStatus,
}

/// Direction of a pending follow request relative to the session user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FollowRequestType {
    Outgoing,
    Incoming,
}

/// One row of the pending-follow-request listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowRequestSummary {
    pub username: String,
    pub img_src: Option<String>,
    pub id: i64,
    pub display_name: Option<String>,
    pub request_type: FollowRequestType,
}

/// `{ profiles, total_size }` page of pending follow requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowRequestPage {
    pub profiles: Vec<FollowRequestSummary>,
    pub total_size: i64,
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    pub trigger_id: i64,
    pub notification_type: i32,
    pub msg: String,
    pub is_read: bool,
}

/// `{ notifications: [...] }` payload of the notification listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationList {
    pub notifications: Vec<Notification>,
}

// ---------------------------------------------------------------------------
// Insights
// ---------------------------------------------------------------------------

/// Usage insights: total views plus per-bucket interval series, each entry
/// a `(bucket timestamp, count)` pair sorted ascending by bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInsights {
    pub total_profile_views: i64,
    pub interval_views: Vec<(NaiveDateTime, i64)>,
    pub interval_follows: Vec<(NaiveDateTime, i64)>,
    pub interval_unfollows: Vec<(NaiveDateTime, i64)>,
    pub interval_follow_requests: Vec<(NaiveDateTime, i64)>,
    pub interval_shares: Vec<(NaiveDateTime, i64)>,
}

// ---------------------------------------------------------------------------
// Request payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub email: String,
}

/// Partial profile update; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_private: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLink {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub href: String,
}

/// Moves `link_id` so it renders immediately before `new_position_id`, or
/// last when `new_position_id` is `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderLink {
    pub link_id: i64,
    pub new_position_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowRequestRef {
    pub pending_follow_id: i64,
}

/// Accept or decline an inbound follow request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettleFollowRequest {
    pub pending_follow_id: i64,
    pub accept: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowUserRef {
    pub user_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationRef {
    pub notification_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateLinkTitle {
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateLinkBio {
    pub bio: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateLinkHref {
    pub href: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetCode {
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetPassword {
    pub code: String,
    pub password: String,
}
