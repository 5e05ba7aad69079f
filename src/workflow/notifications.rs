use super::WorkflowError;
use super::replacement::{assigned_shifts, available_shifts};
use crate::auth::auth::Viewer;
use crate::client::SchedulerApi;
use crate::model::replacement::{ReplacementFilter, ReplacementStatus};
use crate::model::shift::{ShiftFilter, ShiftStatus};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::HashSet;
use strum_macros::Display;
use utoipa::ToSchema;

/// Lead time for the "your shift starts soon" reminder.
pub const UPCOMING_SHIFT_MINUTES: i64 = 30;
/// How far back the viewer's own missed shifts are reported.
const MISSED_LOOKBACK_HOURS: i64 = 24;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Display, ToSchema)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NotificationKind {
    UpcomingShift,
    ShiftMissed,
    ReplacementAvailable,
    ReplacementApproved,
    ReplacementRejected,
    ReplacementRequested,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub shift: Option<u64>,
    pub request: Option<u64>,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    fn new(kind: NotificationKind, message: String, created_at: DateTime<Utc>) -> Self {
        Self {
            kind,
            message,
            shift: None,
            request: None,
            created_at,
        }
    }

    fn for_shift(mut self, shift: u64) -> Self {
        self.shift = Some(shift);
        self
    }

    fn for_request(mut self, request: u64) -> Self {
        self.request = Some(request);
        self
    }

    /// Identity used for de-duplication across polls.
    fn key(&self) -> String {
        format!(
            "{}:{}:{}",
            self.kind,
            self.shift.unwrap_or_default(),
            self.request.unwrap_or_default()
        )
    }
}

/// Per-session notification inbox; a notification is delivered once.
#[derive(Debug, Default)]
pub struct Inbox {
    seen: HashSet<String>,
    unread: Vec<Notification>,
}

impl Inbox {
    /// Queue the notifications not seen before, returning how many were new.
    pub fn push_all(&mut self, notifications: Vec<Notification>) -> usize {
        let before = self.unread.len();
        for n in notifications {
            if self.seen.insert(n.key()) {
                self.unread.push(n);
            }
        }
        self.unread.len() - before
    }

    pub fn unread(&self) -> &[Notification] {
        &self.unread
    }

    /// Hand out the unread notifications, marking them read.
    pub fn take_unread(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.unread)
    }
}

/// Everything currently worth telling the viewer about.
pub async fn check<A>(api: &A, viewer: &Viewer, now: DateTime<Utc>) -> Result<Vec<Notification>, WorkflowError>
where
    A: SchedulerApi + ?Sized,
{
    let mut out = Vec::new();

    if viewer.role.is_manager_or_admin() {
        let pending = api
            .list_replacement_requests(&ReplacementFilter {
                status: Some(ReplacementStatus::Pending),
                company: viewer.scope_company(None),
                ..Default::default()
            })
            .await?;
        out.extend(pending.into_iter().map(|r| {
            Notification::new(
                NotificationKind::ReplacementRequested,
                format!("A replacement was requested for shift #{}", r.shift),
                now,
            )
            .for_shift(r.shift)
            .for_request(r.id)
        }));
    }

    // managers without an employee record stop here
    let Some(me) = viewer.employee_id else {
        return Ok(out);
    };

    let upcoming = assigned_shifts(
        api,
        me,
        ShiftFilter {
            status: Some(ShiftStatus::Scheduled),
            start_after: Some(now),
            start_before: Some(now + Duration::minutes(UPCOMING_SHIFT_MINUTES)),
            ..Default::default()
        },
    )
    .await?;
    out.extend(upcoming.into_iter().filter(|s| s.assignee() == me).map(|s| {
        let minutes = (s.start_time - now).num_minutes().max(0);
        Notification::new(
            NotificationKind::UpcomingShift,
            format!("Your shift starts in {minutes} minutes"),
            now,
        )
        .for_shift(s.id)
    }));

    let missed = api
        .list_shifts(&ShiftFilter {
            employee: Some(me),
            is_missed: Some(true),
            start_after: Some(now - Duration::hours(MISSED_LOOKBACK_HOURS)),
            ..Default::default()
        })
        .await?;
    out.extend(missed.into_iter().map(|s| {
        Notification::new(
            NotificationKind::ShiftMissed,
            format!(
                "You missed your shift starting {}",
                s.start_time.format("%Y-%m-%d %H:%M")
            ),
            now,
        )
        .for_shift(s.id)
    }));

    let open = available_shifts(api, viewer, now).await?;
    out.extend(open.into_iter().map(|s| {
        Notification::new(
            NotificationKind::ReplacementAvailable,
            format!(
                "A shift on {} needs cover",
                s.start_time.format("%Y-%m-%d %H:%M")
            ),
            now,
        )
        .for_shift(s.id)
    }));

    let mine = api
        .list_replacement_requests(&ReplacementFilter {
            replacement_employee: Some(me),
            ..Default::default()
        })
        .await?;
    out.extend(mine.into_iter().filter_map(|r| {
        let (kind, message) = match r.status {
            ReplacementStatus::Pending => return None,
            ReplacementStatus::Approved => (
                NotificationKind::ReplacementApproved,
                format!("You are approved to cover shift #{}", r.shift),
            ),
            ReplacementStatus::Rejected => (
                NotificationKind::ReplacementRejected,
                format!("Your request to cover shift #{} was declined", r.shift),
            ),
        };
        Some(
            Notification::new(kind, message, now)
                .for_shift(r.shift)
                .for_request(r.id),
        )
    }));

    Ok(out)
}
