//! In-memory rendition of the linkhub API for client tests.
//!
//! Speaks the production envelope: every 2xx body is `{"payload": ...}`,
//! every error body is `{"err": "..."}`. State lives in one
//! `Arc<RwLock<ServerState>>`; a single current-session slot stands in for
//! cookie auth, which is enough for the sequential request chains the
//! client issues.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

const PAGE_SIZE: usize = 10;
const RESET_CODE: &str = "123456";

#[derive(Clone, Debug)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub email: String,
    pub display_name: String,
    pub bio: Option<String>,
    pub picture: String,
    pub is_private: bool,
}

#[derive(Clone, Debug)]
pub struct StoredLink {
    pub id: i64,
    pub user_id: i64,
    pub title: Option<String>,
    pub href: String,
    pub description: Option<String>,
    pub img_src: Option<String>,
}

#[derive(Clone, Debug)]
pub struct StoredNotification {
    pub id: i64,
    pub user_id: i64,
    pub trigger_id: i64,
    pub notification_type: i32,
    pub msg: String,
    pub is_read: bool,
}

/// Per-user usage counters, all attributed to one daily bucket.
#[derive(Clone, Debug, Default)]
pub struct InsightCounters {
    pub views: i64,
    pub follows: i64,
    pub unfollows: i64,
    pub follow_requests: i64,
    pub shares: i64,
}

#[derive(Debug, Default)]
pub struct ServerState {
    users: Vec<User>,
    /// Links in display order per user; `next_id` is derived on read.
    links: Vec<StoredLink>,
    /// (follower id, followed id)
    follows: Vec<(i64, i64)>,
    /// (requesting id, requested id)
    follow_requests: Vec<(i64, i64)>,
    notifications: Vec<StoredNotification>,
    insights: std::collections::HashMap<i64, InsightCounters>,
    session: Option<i64>,
    reset_code: Option<(i64, String)>,
    next_id: i64,
}

impl ServerState {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn user_by_name(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|u| u.username == username)
    }

    fn user_by_id(&self, id: i64) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    fn is_following(&self, follower: i64, followed: i64) -> bool {
        self.follows.contains(&(follower, followed))
    }

    fn has_request(&self, from: i64, to: i64) -> bool {
        self.follow_requests.contains(&(from, to))
    }

    fn notify(&mut self, user_id: i64, trigger_id: i64, notification_type: i32, msg: String) {
        let id = self.allocate_id();
        self.notifications.push(StoredNotification {
            id,
            user_id,
            trigger_id,
            notification_type,
            msg,
            is_read: false,
        });
    }

    fn counters(&mut self, user_id: i64) -> &mut InsightCounters {
        self.insights.entry(user_id).or_default()
    }
}

pub type Db = Arc<RwLock<ServerState>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(ServerState::default()));
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/logout", post(logout))
        .route("/logged-in", get(logged_in))
        .route("/get-username", get(get_username))
        .route("/reset-password", get(request_reset).post(reset_password))
        .route("/password-code", post(check_reset_code))
        .route("/profiles/display", put(update_profile))
        .route("/profiles/image/{filetype}", put(upload_profile_image))
        .route("/profiles/{username}", get(get_profile))
        .route("/links/reorder", post(reorder_link))
        .route("/links/title/{id}", put(update_link_title))
        .route("/links/bio/{id}", put(update_link_bio))
        .route("/links/href/{id}", put(update_link_href))
        .route("/links/{id}/image/{filetype}", put(upload_link_image))
        .route("/links/{id}", get(get_links).delete(delete_link))
        .route("/links", post(add_link))
        .route(
            "/follows/requests",
            get(list_follow_requests)
                .post(create_follow_request)
                .put(settle_follow_request)
                .delete(remove_follow_request),
        )
        .route("/follows/status/{username}", get(follow_status))
        .route("/follows/followers", get(list_followers).delete(remove_follower))
        .route("/follows/following", get(list_following).delete(remove_following))
        .route("/search/users", get(search_users))
        .route(
            "/notifications",
            get(list_notifications)
                .put(read_notification)
                .delete(clear_notifications),
        )
        .route("/insights", get(user_insights))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

type Reply = (StatusCode, Json<Value>);

fn payload(value: Value) -> Reply {
    (StatusCode::OK, Json(json!({ "payload": value })))
}

fn err(status: StatusCode, msg: &str) -> Reply {
    (status, Json(json!({ "err": msg })))
}

fn forbidden() -> Reply {
    err(StatusCode::FORBIDDEN, "Not logged in")
}

/// Midnight of the current day, the bucket all counters land in.
fn today_bucket() -> NaiveDateTime {
    chrono::Utc::now()
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .expect("midnight is always valid")
}

fn paginate<T: Clone>(rows: &[T], page: usize) -> (Vec<T>, usize) {
    let page = page.max(1);
    let start = (page - 1) * PAGE_SIZE;
    let slice = rows
        .iter()
        .skip(start)
        .take(PAGE_SIZE)
        .cloned()
        .collect::<Vec<_>>();
    (slice, rows.len())
}

fn profile_row(user: &User) -> Value {
    json!({
        "username": user.username,
        "img_src": if user.picture.is_empty() { Value::Null } else { Value::String(user.picture.clone()) },
        "id": user.id,
        "display_name": user.display_name,
    })
}

// -- auth -------------------------------------------------------------------

#[derive(Deserialize)]
struct Credentials {
    username: String,
    password: String,
}

async fn login(State(db): State<Db>, Json(input): Json<Credentials>) -> Reply {
    let mut state = db.write().await;
    match state.user_by_name(&input.username) {
        Some(user) if user.password == input.password => {
            let id = user.id;
            state.session = Some(id);
            payload(json!({}))
        }
        _ => err(StatusCode::BAD_REQUEST, "bad credentials"),
    }
}

#[derive(Deserialize)]
struct Registration {
    username: String,
    password: String,
    email: String,
}

async fn register(State(db): State<Db>, Json(input): Json<Registration>) -> Reply {
    let mut state = db.write().await;
    if input.username.is_empty() || input.password.is_empty() {
        return err(StatusCode::BAD_REQUEST, "Username and password are required");
    }
    if state.user_by_name(&input.username).is_some() {
        return err(StatusCode::BAD_REQUEST, "Username is already taken");
    }
    let id = state.allocate_id();
    state.users.push(User {
        id,
        username: input.username.clone(),
        password: input.password,
        email: input.email,
        display_name: input.username,
        bio: None,
        picture: String::new(),
        is_private: false,
    });
    payload(json!({}))
}

async fn logout(State(db): State<Db>) -> Reply {
    db.write().await.session = None;
    payload(json!({}))
}

async fn logged_in(State(db): State<Db>) -> Reply {
    let state = db.read().await;
    payload(json!({ "result": state.session.is_some() }))
}

async fn get_username(State(db): State<Db>) -> Reply {
    let state = db.read().await;
    let username = state
        .session
        .and_then(|id| state.user_by_id(id))
        .map(|u| u.username.clone());
    payload(json!({ "username": username }))
}

// -- password reset ---------------------------------------------------------

async fn request_reset(State(db): State<Db>) -> Reply {
    let mut state = db.write().await;
    let Some(user_id) = state.session else {
        return forbidden();
    };
    state.reset_code = Some((user_id, RESET_CODE.to_string()));
    payload(json!({}))
}

#[derive(Deserialize)]
struct ResetCodeBody {
    code: String,
}

async fn check_reset_code(State(db): State<Db>, Json(input): Json<ResetCodeBody>) -> Reply {
    let state = db.read().await;
    match &state.reset_code {
        Some((_, code)) if *code == input.code => payload(json!({})),
        _ => err(StatusCode::BAD_REQUEST, "Invalid reset code"),
    }
}

#[derive(Deserialize)]
struct ResetPasswordBody {
    code: String,
    password: String,
}

async fn reset_password(State(db): State<Db>, Json(input): Json<ResetPasswordBody>) -> Reply {
    let mut state = db.write().await;
    let Some((user_id, code)) = state.reset_code.clone() else {
        return err(StatusCode::BAD_REQUEST, "Invalid reset code");
    };
    if code != input.code {
        return err(StatusCode::BAD_REQUEST, "Invalid reset code");
    }
    if let Some(user) = state.users.iter_mut().find(|u| u.id == user_id) {
        user.password = input.password;
    }
    state.reset_code = None;
    payload(json!({}))
}

// -- profiles ---------------------------------------------------------------

async fn get_profile(State(db): State<Db>, Path(username): Path<String>) -> Reply {
    let mut state = db.write().await;
    let Some(user) = state.user_by_name(&username).cloned() else {
        return err(StatusCode::NOT_FOUND, "User not found");
    };
    let viewer = state.session;
    let is_owner = viewer == Some(user.id);
    let visible =
        is_owner || !user.is_private || viewer.is_some_and(|v| state.is_following(v, user.id));

    let followers = state.follows.iter().filter(|&&(_, to)| to == user.id).count() as i64;
    let following = state.follows.iter().filter(|&&(from, _)| from == user.id).count() as i64;

    if !is_owner {
        state.counters(user.id).views += 1;
    }

    payload(json!({
        "display_name": user.display_name,
        "bio": user.bio,
        "picture": user.picture,
        "following": if visible { Value::from(following) } else { Value::Null },
        "followers": if visible { Value::from(followers) } else { Value::Null },
        "is_private": user.is_private,
        "is_owner": is_owner,
        "id": user.id,
    }))
}

#[derive(Deserialize)]
struct UpdateProfileBody {
    display_name: Option<String>,
    bio: Option<String>,
    is_private: Option<bool>,
}

async fn update_profile(State(db): State<Db>, Json(input): Json<UpdateProfileBody>) -> Reply {
    let mut state = db.write().await;
    let Some(user_id) = state.session else {
        return forbidden();
    };
    if let Some(name) = &input.display_name {
        if name.is_empty() {
            return err(StatusCode::BAD_REQUEST, "Display name cannot be empty");
        }
    }
    let user = state
        .users
        .iter_mut()
        .find(|u| u.id == user_id)
        .expect("session user exists");
    if let Some(name) = input.display_name {
        user.display_name = name;
    }
    if let Some(bio) = input.bio {
        user.bio = Some(bio);
    }
    if let Some(is_private) = input.is_private {
        user.is_private = is_private;
    }
    payload(json!({}))
}

async fn upload_profile_image(
    State(db): State<Db>,
    Path(filetype): Path<String>,
    body: Bytes,
) -> Reply {
    let mut state = db.write().await;
    let Some(user_id) = state.session else {
        return forbidden();
    };
    if body.is_empty() {
        return err(StatusCode::BAD_REQUEST, "Image body is empty");
    }
    let href = format!("/assets/{user_id}/profile.{filetype}");
    let user = state
        .users
        .iter_mut()
        .find(|u| u.id == user_id)
        .expect("session user exists");
    user.picture = href.clone();
    payload(json!({ "href": href }))
}

// -- links ------------------------------------------------------------------

/// Serialize a user's links in display order, deriving each `next_id` from
/// the position of its successor.
fn links_payload(state: &ServerState, user_id: i64) -> Value {
    let owned: Vec<&StoredLink> = state.links.iter().filter(|l| l.user_id == user_id).collect();
    let rows: Vec<Value> = owned
        .iter()
        .enumerate()
        .map(|(i, link)| {
            json!({
                "id": link.id,
                "user_id": link.user_id,
                "next_id": owned.get(i + 1).map(|next| next.id),
                "title": link.title,
                "href": link.href,
                "description": link.description,
                "img_src": link.img_src,
            })
        })
        .collect();
    json!({ "links": rows })
}

async fn get_links(State(db): State<Db>, Path(username): Path<String>) -> Reply {
    let state = db.read().await;
    let Some(user) = state.user_by_name(&username) else {
        return err(StatusCode::NOT_FOUND, "User not found");
    };
    payload(links_payload(&state, user.id))
}

#[derive(Deserialize)]
struct CreateLinkBody {
    title: Option<String>,
    bio: Option<String>,
    href: String,
}

async fn add_link(State(db): State<Db>, Json(input): Json<CreateLinkBody>) -> Reply {
    let mut state = db.write().await;
    let Some(user_id) = state.session else {
        return forbidden();
    };
    if input.href.is_empty() {
        return err(StatusCode::BAD_REQUEST, "Link href cannot be empty");
    }
    let id = state.allocate_id();
    state.links.push(StoredLink {
        id,
        user_id,
        title: input.title,
        href: input.href,
        description: input.bio,
        img_src: None,
    });
    payload(json!({}))
}

/// Look up a link and check it belongs to the session user. Returns the
/// index into `state.links`.
fn owned_link_index(state: &ServerState, link_id: i64) -> Result<usize, Reply> {
    let Some(user_id) = state.session else {
        return Err(forbidden());
    };
    let Some(index) = state.links.iter().position(|l| l.id == link_id) else {
        return Err(err(StatusCode::NOT_FOUND, "Link not found"));
    };
    if state.links[index].user_id != user_id {
        return Err(forbidden());
    }
    Ok(index)
}

#[derive(Deserialize)]
struct TitleBody {
    title: String,
}

async fn update_link_title(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<TitleBody>,
) -> Reply {
    let mut state = db.write().await;
    match owned_link_index(&state, id) {
        Ok(index) => {
            state.links[index].title = Some(input.title);
            payload(json!({}))
        }
        Err(reply) => reply,
    }
}

#[derive(Deserialize)]
struct BioBody {
    bio: String,
}

async fn update_link_bio(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<BioBody>,
) -> Reply {
    let mut state = db.write().await;
    match owned_link_index(&state, id) {
        Ok(index) => {
            state.links[index].description = Some(input.bio);
            payload(json!({}))
        }
        Err(reply) => reply,
    }
}

#[derive(Deserialize)]
struct HrefBody {
    href: String,
}

async fn update_link_href(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<HrefBody>,
) -> Reply {
    let mut state = db.write().await;
    if input.href.is_empty() {
        return err(StatusCode::BAD_REQUEST, "Link href cannot be empty");
    }
    match owned_link_index(&state, id) {
        Ok(index) => {
            state.links[index].href = input.href;
            payload(json!({}))
        }
        Err(reply) => reply,
    }
}

async fn upload_link_image(
    State(db): State<Db>,
    Path((id, filetype)): Path<(i64, String)>,
    body: Bytes,
) -> Reply {
    let mut state = db.write().await;
    if body.is_empty() {
        return err(StatusCode::BAD_REQUEST, "Image body is empty");
    }
    match owned_link_index(&state, id) {
        Ok(index) => {
            let href = format!("/assets/links/{id}.{filetype}");
            state.links[index].img_src = Some(href.clone());
            payload(json!({ "href": href }))
        }
        Err(reply) => reply,
    }
}

async fn delete_link(State(db): State<Db>, Path(id): Path<i64>) -> Reply {
    let mut state = db.write().await;
    match owned_link_index(&state, id) {
        Ok(index) => {
            state.links.remove(index);
            payload(json!({}))
        }
        Err(reply) => reply,
    }
}

#[derive(Deserialize)]
struct ReorderBody {
    link_id: i64,
    new_position_id: Option<i64>,
}

async fn reorder_link(State(db): State<Db>, Json(input): Json<ReorderBody>) -> Reply {
    let mut state = db.write().await;
    let index = match owned_link_index(&state, input.link_id) {
        Ok(index) => index,
        Err(reply) => return reply,
    };
    let link = state.links.remove(index);
    let target = match input.new_position_id {
        Some(before_id) => match state.links.iter().position(|l| l.id == before_id) {
            Some(position) => position,
            None => {
                state.links.insert(index, link);
                return err(StatusCode::NOT_FOUND, "Link not found");
            }
        },
        // `null` moves the link to the end of its user's chain.
        None => state.links.len(),
    };
    state.links.insert(target, link);
    payload(json!({}))
}

// -- follows ----------------------------------------------------------------

async fn follow_status(State(db): State<Db>, Path(username): Path<String>) -> Reply {
    let state = db.read().await;
    let Some(target) = state.user_by_name(&username) else {
        return err(StatusCode::NOT_FOUND, "User not found");
    };
    let status = match state.session {
        Some(viewer) if state.is_following(viewer, target.id) => "following",
        Some(viewer) if state.has_request(viewer, target.id) => "pending",
        _ => "none",
    };
    payload(json!({ "status": status }))
}

#[derive(Deserialize)]
struct FollowRequestBody {
    pending_follow_id: i64,
}

async fn create_follow_request(
    State(db): State<Db>,
    Json(input): Json<FollowRequestBody>,
) -> Reply {
    let mut state = db.write().await;
    let Some(user_id) = state.session else {
        return forbidden();
    };
    let to_id = input.pending_follow_id;
    if to_id == user_id {
        return err(StatusCode::BAD_REQUEST, "Cannot follow yourself");
    }
    let Some(target) = state.user_by_id(to_id).cloned() else {
        return err(StatusCode::NOT_FOUND, "User not found");
    };
    if state.is_following(user_id, to_id) {
        return err(StatusCode::BAD_REQUEST, "Already following this user");
    }
    if state.has_request(user_id, to_id) {
        return err(StatusCode::BAD_REQUEST, "Follow request already exists");
    }

    let requester = state
        .user_by_id(user_id)
        .map(|u| u.username.clone())
        .expect("session user exists");
    if target.is_private {
        state.follow_requests.push((user_id, to_id));
        state.counters(to_id).follow_requests += 1;
        state.notify(to_id, user_id, 0, format!("{requester} requested to follow you"));
    } else {
        state.follows.push((user_id, to_id));
        state.counters(to_id).follows += 1;
        state.notify(to_id, user_id, 1, format!("{requester} started following you"));
    }
    payload(json!({}))
}

#[derive(Deserialize)]
struct SettleFollowRequestBody {
    pending_follow_id: i64,
    accept: bool,
}

async fn settle_follow_request(
    State(db): State<Db>,
    Json(input): Json<SettleFollowRequestBody>,
) -> Reply {
    let mut state = db.write().await;
    let Some(user_id) = state.session else {
        return forbidden();
    };
    let from_id = input.pending_follow_id;
    let Some(index) = state
        .follow_requests
        .iter()
        .position(|&(from, to)| from == from_id && to == user_id)
    else {
        return err(StatusCode::NOT_FOUND, "Follow request not found");
    };
    state.follow_requests.remove(index);
    if input.accept {
        state.follows.push((from_id, user_id));
        state.counters(user_id).follows += 1;
        let acceptor = state
            .user_by_id(user_id)
            .map(|u| u.username.clone())
            .expect("session user exists");
        state.notify(from_id, user_id, 2, format!("{acceptor} accepted your follow request"));
    }
    payload(json!({}))
}

async fn remove_follow_request(
    State(db): State<Db>,
    Json(input): Json<FollowRequestBody>,
) -> Reply {
    let mut state = db.write().await;
    let Some(user_id) = state.session else {
        return forbidden();
    };
    let to_id = input.pending_follow_id;
    let Some(index) = state
        .follow_requests
        .iter()
        .position(|&(from, to)| from == user_id && to == to_id)
    else {
        return err(StatusCode::NOT_FOUND, "Follow request not found");
    };
    state.follow_requests.remove(index);
    payload(json!({}))
}

#[derive(Deserialize)]
struct PageParams {
    #[serde(default)]
    page: usize,
}

async fn list_follow_requests(State(db): State<Db>, Query(params): Query<PageParams>) -> Reply {
    let state = db.read().await;
    let Some(user_id) = state.session else {
        return forbidden();
    };
    let rows: Vec<Value> = state
        .follow_requests
        .iter()
        .filter(|&&(from, to)| from == user_id || to == user_id)
        .filter_map(|&(from, to)| {
            let (other, request_type) = if from == user_id {
                (to, "OUTGOING")
            } else {
                (from, "INCOMING")
            };
            state.user_by_id(other).map(|user| {
                let mut row = profile_row(user);
                row["request_type"] = json!(request_type);
                row
            })
        })
        .collect();
    let (slice, total) = paginate(&rows, params.page);
    payload(json!({ "profiles": slice, "total_size": total }))
}

async fn list_followers(State(db): State<Db>, Query(params): Query<PageParams>) -> Reply {
    let state = db.read().await;
    let Some(user_id) = state.session else {
        return forbidden();
    };
    let rows: Vec<Value> = state
        .follows
        .iter()
        .filter(|&&(_, to)| to == user_id)
        .filter_map(|&(from, _)| state.user_by_id(from).map(profile_row))
        .collect();
    let (slice, total) = paginate(&rows, params.page);
    payload(json!({ "profiles": slice, "total_size": total }))
}

async fn list_following(State(db): State<Db>, Query(params): Query<PageParams>) -> Reply {
    let state = db.read().await;
    let Some(user_id) = state.session else {
        return forbidden();
    };
    let rows: Vec<Value> = state
        .follows
        .iter()
        .filter(|&&(from, _)| from == user_id)
        .filter_map(|&(_, to)| state.user_by_id(to).map(profile_row))
        .collect();
    let (slice, total) = paginate(&rows, params.page);
    payload(json!({ "profiles": slice, "total_size": total }))
}

#[derive(Deserialize)]
struct FollowUserBody {
    user_id: i64,
}

async fn remove_follower(State(db): State<Db>, Json(input): Json<FollowUserBody>) -> Reply {
    let mut state = db.write().await;
    let Some(user_id) = state.session else {
        return forbidden();
    };
    let Some(index) = state
        .follows
        .iter()
        .position(|&(from, to)| from == input.user_id && to == user_id)
    else {
        return err(StatusCode::NOT_FOUND, "Follower not found");
    };
    state.follows.remove(index);
    state.counters(user_id).unfollows += 1;
    payload(json!({}))
}

async fn remove_following(State(db): State<Db>, Json(input): Json<FollowUserBody>) -> Reply {
    let mut state = db.write().await;
    let Some(user_id) = state.session else {
        return forbidden();
    };
    let Some(index) = state
        .follows
        .iter()
        .position(|&(from, to)| from == user_id && to == input.user_id)
    else {
        return err(StatusCode::NOT_FOUND, "Following not found");
    };
    state.follows.remove(index);
    state.counters(input.user_id).unfollows += 1;
    payload(json!({}))
}

// -- search -----------------------------------------------------------------

#[derive(Deserialize)]
struct SearchParams {
    #[serde(default)]
    query: String,
    #[serde(default)]
    page: usize,
}

async fn search_users(State(db): State<Db>, Query(params): Query<SearchParams>) -> Reply {
    let state = db.read().await;
    let needle = params.query.to_lowercase();
    let rows: Vec<Value> = state
        .users
        .iter()
        .filter(|u| u.username.to_lowercase().contains(&needle))
        .map(profile_row)
        .collect();
    let (slice, total) = paginate(&rows, params.page);
    payload(json!({ "profiles": slice, "total_size": total }))
}

// -- notifications ----------------------------------------------------------

async fn list_notifications(State(db): State<Db>) -> Reply {
    let state = db.read().await;
    // Logged-out viewers get an empty list, not an error.
    let rows: Vec<Value> = match state.session {
        Some(user_id) => state
            .notifications
            .iter()
            .filter(|n| n.user_id == user_id)
            .map(|n| {
                json!({
                    "id": n.id,
                    "user_id": n.user_id,
                    "trigger_id": n.trigger_id,
                    "notification_type": n.notification_type,
                    "msg": n.msg,
                    "is_read": n.is_read,
                })
            })
            .collect(),
        None => Vec::new(),
    };
    payload(json!({ "notifications": rows }))
}

#[derive(Deserialize)]
struct NotificationBody {
    notification_id: i64,
}

async fn read_notification(State(db): State<Db>, Json(input): Json<NotificationBody>) -> Reply {
    let mut state = db.write().await;
    let Some(user_id) = state.session else {
        return forbidden();
    };
    let Some(notification) = state
        .notifications
        .iter_mut()
        .find(|n| n.id == input.notification_id && n.user_id == user_id)
    else {
        return err(StatusCode::NOT_FOUND, "Notification not found");
    };
    notification.is_read = true;
    payload(json!({}))
}

async fn clear_notifications(State(db): State<Db>) -> Reply {
    let mut state = db.write().await;
    let Some(user_id) = state.session else {
        return forbidden();
    };
    state.notifications.retain(|n| n.user_id != user_id);
    payload(json!({}))
}

// -- insights ---------------------------------------------------------------

async fn user_insights(State(db): State<Db>) -> Reply {
    let state = db.read().await;
    let Some(user_id) = state.session else {
        return forbidden();
    };
    let counters = state.insights.get(&user_id).cloned().unwrap_or_default();
    let bucket = today_bucket();
    let series = |count: i64| -> Value {
        if count == 0 {
            json!([])
        } else {
            json!([[bucket, count]])
        }
    };
    payload(json!({
        "total_profile_views": counters.views,
        "interval_views": series(counters.views),
        "interval_follows": series(counters.follows),
        "interval_unfollows": series(counters.unfollows),
        "interval_follow_requests": series(counters.follow_requests),
        "interval_shares": series(counters.shares),
    }))
}
