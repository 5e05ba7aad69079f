//! In-process stand-in for the remote scheduler API plus helpers to drive the
//! front-end app against it.

#![allow(dead_code)]

use actix_web::http::header::AUTHORIZATION;
use actix_web::test::TestRequest;
use actix_web::web::{self, Data};
use actix_web::{App, HttpRequest, HttpResponse, HttpServer};
use chrono::{DateTime, Duration, Utc};
use serde_json::{Value, json};
use shiftdesk::model::replacement::{NewReplacementRequest, ReplacementRequest, ReplacementStatus};
use shiftdesk::model::shift::{Shift, ShiftStatus};
use shiftdesk::model::time_clock::{ClockInRequest, TimeClockEntry};
use shiftdesk::model::user::User;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::{Mutex, MutexGuard};

pub const PASSWORD: &str = "correct-horse";

#[derive(Default)]
pub struct RemoteState {
    users: Vec<User>,
    revoked: HashSet<String>,
    pub shifts: BTreeMap<u64, Shift>,
    pub entries: Vec<TimeClockEntry>,
    pub requests: BTreeMap<u64, ReplacementRequest>,
    pub approve_calls: usize,
    /// Shift listings are split into pages of this size when set
    page_size: Option<usize>,
    next_id: u64,
}

impl RemoteState {
    pub fn user(mut self, id: u64, username: &str, role: &str, employee_id: Option<u64>) -> Self {
        self.users.push(User {
            id,
            username: username.to_string(),
            email: format!("{username}@example.com"),
            role: role.to_string(),
            employee_id,
            company_id: Some(1),
        });
        self
    }

    pub fn shift(mut self, shift: Shift) -> Self {
        self.shifts.insert(shift.id, shift);
        self
    }

    pub fn entry(mut self, entry: TimeClockEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn paged(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    fn company_of(&self, shift: Option<u64>) -> Option<u64> {
        shift.and_then(|id| self.shifts.get(&id)).map(|s| s.company)
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        1000 + self.next_id
    }
}

pub fn shift(id: u64, employee: u64, start: DateTime<Utc>, created_at: DateTime<Utc>) -> Shift {
    Shift {
        id,
        employee,
        company: 1,
        team: None,
        start_time: start,
        end_time: start + Duration::hours(8),
        status: ShiftStatus::Scheduled,
        is_missed: false,
        replacement_employee: None,
        replacement_approved_at: None,
        replacement_started_at: None,
        created_at,
        notes: None,
    }
}

pub fn entry(id: u64, employee: u64, shift: Option<u64>, clock_in: DateTime<Utc>) -> TimeClockEntry {
    TimeClockEntry {
        id,
        employee,
        shift,
        clock_in,
        clock_out: None,
        break_start: None,
        break_end: None,
    }
}

type Shared = Data<Mutex<RemoteState>>;

pub struct MockRemote {
    pub url: String,
    state: Shared,
}

impl MockRemote {
    pub async fn start(state: RemoteState) -> Self {
        let state = Data::new(Mutex::new(state));
        let app_state = state.clone();

        let server = HttpServer::new(move || {
            App::new()
                .app_data(app_state.clone())
                .configure(remote_routes)
        })
        .workers(1)
        .disable_signals()
        .bind(("127.0.0.1", 0))
        .expect("bind mock remote");
        let addr: SocketAddr = server.addrs()[0];
        actix_web::rt::spawn(server.run());

        Self {
            url: format!("http://{addr}"),
            state,
        }
    }

    pub fn state(&self) -> MutexGuard<'_, RemoteState> {
        self.state.lock().unwrap()
    }

    /// Make the remote reject `username`'s access token from now on.
    pub fn revoke(&self, username: &str) {
        self.state().revoked.insert(format!("tok-{username}"));
    }
}

fn remote_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/auth/login/", web::post().to(login))
        .route("/auth/user/", web::get().to(current_user))
        .route("/scheduler/shifts/", web::get().to(list_shifts))
        .route("/scheduler/shifts/{id}/", web::get().to(get_shift))
        .route("/scheduler/shifts/{id}/mark_missed/", web::post().to(mark_missed))
        .route("/scheduler/time-clock/", web::get().to(list_entries))
        .route("/scheduler/time-clock/clock_in/", web::post().to(clock_in))
        .service(
            web::resource("/scheduler/replacement-requests/")
                .route(web::get().to(list_requests))
                .route(web::post().to(create_request)),
        )
        .route("/scheduler/replacement-requests/{id}/", web::get().to(get_request))
        .route("/scheduler/replacement-requests/{id}/approve/", web::post().to(approve))
        .route("/scheduler/replacement-requests/{id}/reject/", web::post().to(reject));
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({ "detail": "Not found." }))
}

fn caller(req: &HttpRequest, state: &RemoteState) -> Option<User> {
    let token = req
        .headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")?;
    if state.revoked.contains(token) {
        return None;
    }
    let username = token.strip_prefix("tok-")?;
    state.users.iter().find(|u| u.username == username).cloned()
}

macro_rules! authorized {
    ($req:expr, $state:expr) => {
        match caller(&$req, &$state) {
            Some(user) => user,
            None => {
                return HttpResponse::Unauthorized()
                    .json(json!({ "detail": "Given token not valid for any token type" }))
            }
        }
    };
}

fn matches<T: ToString>(query: &HashMap<String, String>, key: &str, value: T) -> bool {
    query.get(key).is_none_or(|q| *q == value.to_string())
}

fn matches_opt<T: ToString>(query: &HashMap<String, String>, key: &str, value: Option<T>) -> bool {
    query
        .get(key)
        .is_none_or(|q| value.is_some_and(|v| *q == v.to_string()))
}

/// Link to `page` of the same listing, keeping the other query parameters.
fn page_url(req: &HttpRequest, page: usize) -> String {
    let info = req.connection_info();
    let page = format!("page={page}");
    let mut params: Vec<&str> = req
        .query_string()
        .split('&')
        .filter(|p| !p.is_empty() && !p.starts_with("page="))
        .collect();
    params.push(&page);
    format!("{}://{}{}?{}", info.scheme(), info.host(), req.path(), params.join("&"))
}

async fn login(state: Shared, body: web::Json<Value>) -> HttpResponse {
    let state = state.lock().unwrap();
    let username = body["username"].as_str().unwrap_or_default();
    let known = state.users.iter().any(|u| u.username == username);

    if known && body["password"] == PASSWORD {
        HttpResponse::Ok().json(json!({ "access": format!("tok-{username}"), "refresh": "r" }))
    } else {
        HttpResponse::Unauthorized()
            .json(json!({ "detail": "No active account found with the given credentials" }))
    }
}

async fn current_user(req: HttpRequest, state: Shared) -> HttpResponse {
    let state = state.lock().unwrap();
    let user = authorized!(req, state);
    HttpResponse::Ok().json(user)
}

async fn list_shifts(
    req: HttpRequest,
    state: Shared,
    query: web::Query<HashMap<String, String>>,
) -> HttpResponse {
    let state = state.lock().unwrap();
    authorized!(req, state);
    let found: Vec<&Shift> = state
        .shifts
        .values()
        .filter(|s| matches(&query, "is_missed", s.is_missed))
        .filter(|s| matches(&query, "employee", s.employee))
        .filter(|s| matches_opt(&query, "replacement_employee", s.replacement_employee))
        .filter(|s| matches(&query, "company", s.company))
        .filter(|s| matches(&query, "status", s.status))
        .collect();

    // page envelope on purpose: the client accepts both shapes
    let Some(size) = state.page_size else {
        return HttpResponse::Ok().json(json!({ "count": found.len(), "next": null, "results": found }));
    };
    let page: usize = query.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let skip = (page - 1) * size;
    let results: Vec<&Shift> = found.iter().skip(skip).take(size).copied().collect();
    let next = (skip + size < found.len()).then(|| page_url(&req, page + 1));
    HttpResponse::Ok().json(json!({ "count": found.len(), "next": next, "results": results }))
}

async fn get_shift(req: HttpRequest, state: Shared, path: web::Path<u64>) -> HttpResponse {
    let state = state.lock().unwrap();
    authorized!(req, state);
    match state.shifts.get(&path.into_inner()) {
        Some(shift) => HttpResponse::Ok().json(shift),
        None => not_found(),
    }
}

async fn mark_missed(req: HttpRequest, state: Shared, path: web::Path<u64>) -> HttpResponse {
    let mut state = state.lock().unwrap();
    authorized!(req, state);
    match state.shifts.get_mut(&path.into_inner()) {
        Some(shift) => {
            shift.is_missed = true;
            HttpResponse::Ok().json(json!({ "status": "marked as missed" }))
        }
        None => not_found(),
    }
}

async fn list_entries(
    req: HttpRequest,
    state: Shared,
    query: web::Query<HashMap<String, String>>,
) -> HttpResponse {
    let state = state.lock().unwrap();
    authorized!(req, state);
    let found: Vec<&TimeClockEntry> = state
        .entries
        .iter()
        .filter(|e| matches(&query, "employee", e.employee))
        .filter(|e| matches_opt(&query, "shift", e.shift))
        .filter(|e| matches_opt(&query, "company", state.company_of(e.shift)))
        .collect();
    HttpResponse::Ok().json(found)
}

async fn clock_in(req: HttpRequest, state: Shared, body: web::Json<ClockInRequest>) -> HttpResponse {
    let mut state = state.lock().unwrap();
    let user = authorized!(req, state);
    let Some(employee) = user.employee_id else {
        return HttpResponse::BadRequest().json(json!({ "detail": "No employee profile" }));
    };
    if state.entries.iter().any(|e| e.employee == employee && e.is_active()) {
        return HttpResponse::BadRequest().json(json!({ "detail": "Already clocked in" }));
    }

    let id = state.next_id();
    let created = entry(id, employee, body.shift, Utc::now());
    state.entries.push(created.clone());
    HttpResponse::Created().json(created)
}

async fn list_requests(
    req: HttpRequest,
    state: Shared,
    query: web::Query<HashMap<String, String>>,
) -> HttpResponse {
    let state = state.lock().unwrap();
    authorized!(req, state);
    let found: Vec<&ReplacementRequest> = state
        .requests
        .values()
        .filter(|r| matches(&query, "shift", r.shift))
        .filter(|r| matches(&query, "replacement_employee", r.replacement_employee))
        .filter(|r| matches(&query, "status", r.status))
        .filter(|r| matches_opt(&query, "company", state.company_of(Some(r.shift))))
        .collect();
    HttpResponse::Ok().json(found)
}

async fn create_request(
    req: HttpRequest,
    state: Shared,
    body: web::Json<NewReplacementRequest>,
) -> HttpResponse {
    let mut state = state.lock().unwrap();
    authorized!(req, state);
    let id = state.next_id();
    let body = body.into_inner();
    let created = ReplacementRequest {
        id,
        shift: body.shift,
        original_employee: body.original_employee,
        replacement_employee: body.replacement_employee,
        status: ReplacementStatus::Pending,
        notes: body.notes,
        reviewer_notes: None,
        created_at: Utc::now(),
        reviewed_at: None,
    };
    state.requests.insert(id, created.clone());
    HttpResponse::Created().json(created)
}

async fn get_request(req: HttpRequest, state: Shared, path: web::Path<u64>) -> HttpResponse {
    let state = state.lock().unwrap();
    authorized!(req, state);
    match state.requests.get(&path.into_inner()) {
        Some(request) => HttpResponse::Ok().json(request),
        None => not_found(),
    }
}

/// Deliberately does not check the current status, so double approvals are
/// only prevented by the front-end.
async fn approve(req: HttpRequest, state: Shared, path: web::Path<u64>) -> HttpResponse {
    let mut state = state.lock().unwrap();
    authorized!(req, state);
    state.approve_calls += 1;

    let now = Utc::now();
    let Some(request) = state.requests.get_mut(&path.into_inner()) else {
        return not_found();
    };
    request.status = ReplacementStatus::Approved;
    request.reviewed_at = Some(now);
    let (shift_id, replacement) = (request.shift, request.replacement_employee);

    if let Some(shift) = state.shifts.get_mut(&shift_id) {
        shift.replacement_employee = Some(replacement);
        shift.replacement_approved_at = Some(now);
    }
    HttpResponse::Ok().json(json!({ "status": "approved" }))
}

async fn reject(
    req: HttpRequest,
    state: Shared,
    path: web::Path<u64>,
    body: web::Json<Value>,
) -> HttpResponse {
    let mut state = state.lock().unwrap();
    authorized!(req, state);
    let Some(request) = state.requests.get_mut(&path.into_inner()) else {
        return not_found();
    };
    request.status = ReplacementStatus::Rejected;
    request.reviewed_at = Some(Utc::now());
    request.reviewer_notes = body["reviewer_notes"].as_str().map(str::to_string);
    HttpResponse::Ok().json(json!({ "status": "rejected" }))
}

/// A request builder carrying a peer address, which the rate limiter keys on.
pub fn request(method: actix_web::http::Method, uri: &str) -> TestRequest {
    TestRequest::default()
        .method(method)
        .uri(uri)
        .peer_addr("127.0.0.1:40000".parse().unwrap())
}

pub fn get(uri: &str, token: Option<&str>) -> TestRequest {
    with_token(request(actix_web::http::Method::GET, uri), token)
}

pub fn post(uri: &str, token: Option<&str>, body: Value) -> TestRequest {
    with_token(request(actix_web::http::Method::POST, uri), token).set_json(body)
}

fn with_token(req: TestRequest, token: Option<&str>) -> TestRequest {
    match token {
        Some(token) => req.insert_header((AUTHORIZATION, format!("Bearer {token}"))),
        None => req,
    }
}

/// Build the front-end app against `$remote`; background polling is off
/// unless `$config` turns it on.
#[macro_export]
macro_rules! spawn_app {
    ($remote:expr) => {
        spawn_app!($remote, shiftdesk::config::Config::for_api(&$remote.url))
    };
    ($remote:expr, $config:expr) => {{
        let config: shiftdesk::config::Config = $config;
        let anon = shiftdesk::client::ApiClient::new(&config).unwrap();
        let sessions = shiftdesk::auth::session::SessionStore::new(config.session_ttl);
        let routes_config = config.clone();
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(actix_web::middleware::NormalizePath::trim())
                .app_data(actix_web::web::Data::new(config))
                .app_data(actix_web::web::Data::new(anon))
                .app_data(actix_web::web::Data::new(sessions))
                .configure(move |cfg| shiftdesk::routes::configure(cfg, routes_config)),
        )
        .await
    }};
}

/// Sign in through the front-end and return the session token.
#[macro_export]
macro_rules! sign_in {
    ($app:expr, $username:expr) => {{
        let resp = actix_web::test::call_service(
            &$app,
            common::post(
                "/auth/login",
                None,
                serde_json::json!({ "username": $username, "password": common::PASSWORD }),
            )
            .to_request(),
        )
        .await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::OK, "sign in as {}", $username);
        let body: serde_json::Value = actix_web::test::read_body_json(resp).await;
        body["token"].as_str().unwrap().to_string()
    }};
}
