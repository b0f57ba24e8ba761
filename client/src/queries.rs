//! Typed endpoint wrappers.
//!
//! One method per API operation, each a thin call through
//! [`ApiClient::send`](crate::ApiClient::send) with the matching payload
//! type and response schema. Wrappers whose callers treat failure as "show
//! nothing" collapse to `Option` or a default (`links` → empty list,
//! `is_logged_in` → `false`, `username` → empty string, uploads → empty
//! `href`); the rest return the full [`Outcome`] so mutation callers can
//! react to declared 400s.

use serde_json::json;

use crate::client::{ApiClient, Outcome};
use crate::http::{HttpMethod, Transport};
use crate::report::Reporter;
use crate::types::{
    Ack, CreateLink, Credentials, FollowRequestPage, FollowRequestRef, FollowStatusPayload,
    FollowUserRef, ImageUploaded, Link, LinkList, Notification, NotificationList, NotificationRef,
    Profile, ProfilePage, Registration, ReorderLink, ResetCode, ResetPassword, ResultPayload,
    SettleFollowRequest, UpdateLinkBio, UpdateLinkHref, UpdateLinkTitle, UpdateProfile,
    UserInsights, UsernamePayload,
};
use crate::validate::Schema;

const LOGIN_ENDPOINT: &str = "/login";
const REGISTER_ENDPOINT: &str = "/register";
const LOGOUT_ENDPOINT: &str = "/logout";
const LOGGED_IN_ENDPOINT: &str = "/logged-in";
const GET_USERNAME_ENDPOINT: &str = "/get-username";
const RESET_PASSWORD_ENDPOINT: &str = "/reset-password";
const PASSWORD_CODE_ENDPOINT: &str = "/password-code";
const PROFILES_PREFIX: &str = "/profiles";
const UPDATE_DISPLAY_PROFILE_ENDPOINT: &str = "/profiles/display";
const UPDATE_PROFILE_IMAGE_ENDPOINT: &str = "/profiles/image";
const LINKS_PREFIX: &str = "/links";
const REORDER_LINK_ENDPOINT: &str = "/links/reorder";
const FOLLOW_REQUESTS_ENDPOINT: &str = "/follows/requests";
const FOLLOW_STATUS_PREFIX: &str = "/follows/status";
const FOLLOWERS_ENDPOINT: &str = "/follows/followers";
const FOLLOWING_ENDPOINT: &str = "/follows/following";
const SEARCH_USERS_ENDPOINT: &str = "/search/users";
const NOTIFICATIONS_ENDPOINT: &str = "/notifications";
const INSIGHTS_ENDPOINT: &str = "/insights";

impl<T: Transport, R: Reporter> ApiClient<T, R> {
    // -- auth ---------------------------------------------------------------

    pub fn login(&self, username: &str, password: &str) -> Outcome<Ack> {
        self.send(
            LOGIN_ENDPOINT,
            HttpMethod::Post,
            &Credentials {
                username: username.to_string(),
                password: password.to_string(),
            },
            &Schema::<Ack>::new(),
        )
    }

    pub fn register(&self, username: &str, password: &str, email: &str) -> Outcome<Ack> {
        self.send(
            REGISTER_ENDPOINT,
            HttpMethod::Post,
            &Registration {
                username: username.to_string(),
                password: password.to_string(),
                email: email.to_string(),
            },
            &Schema::<Ack>::new(),
        )
    }

    /// Logging out while not logged in succeeds and does nothing.
    pub fn logout(&self) -> Outcome<Ack> {
        self.send(LOGOUT_ENDPOINT, HttpMethod::Post, &json!({}), &Schema::<Ack>::new())
    }

    pub fn is_logged_in(&self) -> bool {
        self.send(LOGGED_IN_ENDPOINT, HttpMethod::Get, &(), &Schema::<ResultPayload>::new())
            .ok()
            .map(|p| p.result)
            .unwrap_or(false)
    }

    /// Username of the session user, empty when logged out or on failure —
    /// failures are already surfaced through the reporter by then.
    pub fn username(&self) -> String {
        self.send(GET_USERNAME_ENDPOINT, HttpMethod::Get, &(), &Schema::<UsernamePayload>::new())
            .ok()
            .and_then(|p| p.username)
            .unwrap_or_default()
    }

    // -- password reset -----------------------------------------------------

    pub fn request_password_reset(&self) -> Outcome<Ack> {
        self.send(RESET_PASSWORD_ENDPOINT, HttpMethod::Get, &(), &Schema::<Ack>::new())
    }

    pub fn check_password_reset_code(&self, code: &str) -> Outcome<Ack> {
        self.send(
            PASSWORD_CODE_ENDPOINT,
            HttpMethod::Post,
            &ResetCode {
                code: code.to_string(),
            },
            &Schema::<Ack>::new(),
        )
    }

    pub fn reset_password(&self, code: &str, password: &str) -> Outcome<Ack> {
        self.send(
            RESET_PASSWORD_ENDPOINT,
            HttpMethod::Post,
            &ResetPassword {
                code: code.to_string(),
                password: password.to_string(),
            },
            &Schema::<Ack>::new(),
        )
    }

    // -- profile ------------------------------------------------------------

    pub fn profile(&self, username: &str) -> Option<Profile> {
        self.send(
            &format!("{PROFILES_PREFIX}/{username}"),
            HttpMethod::Get,
            &(),
            &Schema::<Profile>::new(),
        )
        .ok()
    }

    pub fn update_profile(&self, update: &UpdateProfile) -> Outcome<Ack> {
        self.send(
            UPDATE_DISPLAY_PROFILE_ENDPOINT,
            HttpMethod::Put,
            update,
            &Schema::<Ack>::new(),
        )
    }

    /// Upload a new profile picture; `filetype` is the extension the server
    /// uses to pick a content type. Returns an empty `href` on failure.
    pub fn upload_profile_image(&self, image: &[u8], filetype: &str) -> ImageUploaded {
        self.send_blob(
            &format!("{UPDATE_PROFILE_IMAGE_ENDPOINT}/{filetype}"),
            HttpMethod::Put,
            image,
            &Schema::<ImageUploaded>::new(),
        )
        .ok()
        .unwrap_or(ImageUploaded { href: String::new() })
    }

    // -- links --------------------------------------------------------------

    /// Links of a profile in display order; empty on failure.
    pub fn links(&self, username: &str) -> Vec<Link> {
        self.send(
            &format!("{LINKS_PREFIX}/{username}"),
            HttpMethod::Get,
            &(),
            &Schema::<LinkList>::new(),
        )
        .ok()
        .map(|body| body.links)
        .unwrap_or_default()
    }

    pub fn add_link(&self, link: &CreateLink) -> Outcome<Ack> {
        self.send(LINKS_PREFIX, HttpMethod::Post, link, &Schema::<Ack>::new())
    }

    pub fn update_link_title(&self, link_id: i64, title: &str) -> Outcome<Ack> {
        self.send(
            &format!("{LINKS_PREFIX}/title/{link_id}"),
            HttpMethod::Put,
            &UpdateLinkTitle {
                title: title.to_string(),
            },
            &Schema::<Ack>::new(),
        )
    }

    pub fn update_link_bio(&self, link_id: i64, bio: &str) -> Outcome<Ack> {
        self.send(
            &format!("{LINKS_PREFIX}/bio/{link_id}"),
            HttpMethod::Put,
            &UpdateLinkBio { bio: bio.to_string() },
            &Schema::<Ack>::new(),
        )
    }

    pub fn update_link_href(&self, link_id: i64, href: &str) -> Outcome<Ack> {
        self.send(
            &format!("{LINKS_PREFIX}/href/{link_id}"),
            HttpMethod::Put,
            &UpdateLinkHref { href: href.to_string() },
            &Schema::<Ack>::new(),
        )
    }

    pub fn delete_link(&self, link_id: i64) -> Outcome<Ack> {
        self.send(
            &format!("{LINKS_PREFIX}/{link_id}"),
            HttpMethod::Delete,
            &json!({}),
            &Schema::<Ack>::new(),
        )
    }

    pub fn reorder_link(&self, reorder: &ReorderLink) -> Outcome<Ack> {
        self.send(REORDER_LINK_ENDPOINT, HttpMethod::Post, reorder, &Schema::<Ack>::new())
    }

    /// Upload a link image. Returns an empty `href` on failure.
    pub fn upload_link_image(&self, link_id: i64, image: &[u8], filetype: &str) -> ImageUploaded {
        self.send_blob(
            &format!("{LINKS_PREFIX}/{link_id}/image/{filetype}"),
            HttpMethod::Put,
            image,
            &Schema::<ImageUploaded>::new(),
        )
        .ok()
        .unwrap_or(ImageUploaded { href: String::new() })
    }

    // -- follows ------------------------------------------------------------

    pub fn follow_status(&self, username: &str) -> Outcome<FollowStatusPayload> {
        self.send(
            &format!("{FOLLOW_STATUS_PREFIX}/{username}"),
            HttpMethod::Get,
            &(),
            &Schema::<FollowStatusPayload>::new(),
        )
    }

    pub fn create_follow_request(&self, pending_follow_id: i64) -> Outcome<Ack> {
        self.send(
            FOLLOW_REQUESTS_ENDPOINT,
            HttpMethod::Post,
            &FollowRequestRef { pending_follow_id },
            &Schema::<Ack>::new(),
        )
    }

    /// Accept or decline an inbound follow request.
    pub fn settle_follow_request(&self, pending_follow_id: i64, accept: bool) -> Outcome<Ack> {
        self.send(
            FOLLOW_REQUESTS_ENDPOINT,
            HttpMethod::Put,
            &SettleFollowRequest {
                pending_follow_id,
                accept,
            },
            &Schema::<Ack>::new(),
        )
    }

    /// Withdraw an outbound follow request.
    pub fn remove_follow_request(&self, pending_follow_id: i64) -> Outcome<Ack> {
        self.send(
            FOLLOW_REQUESTS_ENDPOINT,
            HttpMethod::Delete,
            &FollowRequestRef { pending_follow_id },
            &Schema::<Ack>::new(),
        )
    }

    pub fn pending_follow_requests(&self, page: u32) -> Option<FollowRequestPage> {
        self.send(
            &format!("{FOLLOW_REQUESTS_ENDPOINT}?page={page}"),
            HttpMethod::Get,
            &(),
            &Schema::<FollowRequestPage>::new(),
        )
        .ok()
    }

    pub fn followers(&self, page: u32) -> Option<ProfilePage> {
        self.send(
            &format!("{FOLLOWERS_ENDPOINT}?page={page}"),
            HttpMethod::Get,
            &(),
            &Schema::<ProfilePage>::new(),
        )
        .ok()
    }

    pub fn following(&self, page: u32) -> Option<ProfilePage> {
        self.send(
            &format!("{FOLLOWING_ENDPOINT}?page={page}"),
            HttpMethod::Get,
            &(),
            &Schema::<ProfilePage>::new(),
        )
        .ok()
    }

    pub fn remove_follower(&self, user_id: i64) -> Outcome<Ack> {
        self.send(
            FOLLOWERS_ENDPOINT,
            HttpMethod::Delete,
            &FollowUserRef { user_id },
            &Schema::<Ack>::new(),
        )
    }

    pub fn remove_following(&self, user_id: i64) -> Outcome<Ack> {
        self.send(
            FOLLOWING_ENDPOINT,
            HttpMethod::Delete,
            &FollowUserRef { user_id },
            &Schema::<Ack>::new(),
        )
    }

    // -- search -------------------------------------------------------------

    pub fn search_users(&self, query: &str, page: u32) -> Option<ProfilePage> {
        self.send(
            &format!("{SEARCH_USERS_ENDPOINT}?query={query}&page={page}"),
            HttpMethod::Get,
            &(),
            &Schema::<ProfilePage>::new(),
        )
        .ok()
    }

    // -- notifications ------------------------------------------------------

    /// Notifications for the session user, newest first; empty when logged
    /// out or on failure.
    pub fn notifications(&self) -> Vec<Notification> {
        self.send(
            NOTIFICATIONS_ENDPOINT,
            HttpMethod::Get,
            &(),
            &Schema::<NotificationList>::new(),
        )
        .ok()
        .map(|body| body.notifications)
        .unwrap_or_default()
    }

    pub fn read_notification(&self, notification_id: i64) -> Outcome<Ack> {
        self.send(
            NOTIFICATIONS_ENDPOINT,
            HttpMethod::Put,
            &NotificationRef { notification_id },
            &Schema::<Ack>::new(),
        )
    }

    pub fn clear_notifications(&self) -> Outcome<Ack> {
        self.send(NOTIFICATIONS_ENDPOINT, HttpMethod::Delete, &json!({}), &Schema::<Ack>::new())
    }

    // -- insights -----------------------------------------------------------

    pub fn user_insights(&self) -> Option<UserInsights> {
        self.send(INSIGHTS_ENDPOINT, HttpMethod::Get, &(), &Schema::<UserInsights>::new())
            .ok()
    }
}
