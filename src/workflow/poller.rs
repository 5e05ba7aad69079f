//! Background polling per signed-in session. The sweep and the notification
//! check run on independent timers and stop once the session is gone.

use super::WorkflowError;
use super::missed::MissedShiftDetector;
use super::notifications;
use crate::auth::session::{Session, SessionStore};
use crate::config::Config;
use actix_web::rt;
use actix_web::rt::task::JoinHandle;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Loops started for one session; `None` where the loop is off.
pub struct Pollers {
    pub sweep: Option<JoinHandle<()>>,
    pub notify: Option<JoinHandle<()>>,
}

pub fn spawn_for_session(store: &SessionStore, session: &Arc<Session>, config: &Config) -> Pollers {
    let sweep = (session.viewer.role.is_manager_or_admin() && config.miss_sweep_interval_secs > 0).then(|| {
        rt::spawn(sweep_loop(
            store.clone(),
            session.clone(),
            MissedShiftDetector::new(config.miss_grace_minutes),
            Duration::from_secs(config.miss_sweep_interval_secs),
        ))
    });

    let notify = (config.notify_interval_secs > 0).then(|| {
        rt::spawn(notify_loop(
            store.clone(),
            session.clone(),
            Duration::from_secs(config.notify_interval_secs),
        ))
    });

    Pollers { sweep, notify }
}

/// Liveness without touching the idle timer, so only browser requests keep a
/// session open.
async fn still_signed_in(store: &SessionStore, session: &Session) -> bool {
    if store.is_live(session) {
        return true;
    }
    store.remove(&session.id).await;
    false
}

async fn sweep_loop(
    store: SessionStore,
    session: Arc<Session>,
    detector: MissedShiftDetector,
    period: Duration,
) {
    let mut ticker = rt::time::interval(period);
    loop {
        ticker.tick().await;
        if !still_signed_in(&store, &session).await {
            debug!(session_id = %session.id, "Stopping missed-shift sweep");
            break;
        }

        match detector.sweep(&session.client, Utc::now()).await {
            Ok(report) if !report.marked.is_empty() || !report.failed.is_empty() => info!(
                session_id = %session.id,
                scanned = report.scanned,
                marked = report.marked.len(),
                failed = report.failed.len(),
                "Missed-shift sweep finished"
            ),
            Ok(_) => {}
            Err(e) => warn!(session_id = %session.id, error = %e, "Missed-shift sweep failed"),
        }
    }
}

/// Run one notification check for the session and queue what is new.
pub async fn poll_notifications(session: &Session) -> Result<usize, WorkflowError> {
    let found = notifications::check(&session.client, &session.viewer, Utc::now()).await?;
    Ok(session.inbox().push_all(found))
}

async fn notify_loop(store: SessionStore, session: Arc<Session>, period: Duration) {
    let mut ticker = rt::time::interval(period);
    loop {
        ticker.tick().await;
        if !still_signed_in(&store, &session).await {
            debug!(session_id = %session.id, "Stopping shift notifications");
            break;
        }

        match poll_notifications(&session).await {
            Ok(0) => {}
            Ok(new) => debug!(session_id = %session.id, new, "Queued notifications"),
            Err(e) => warn!(session_id = %session.id, error = %e, "Notification check failed"),
        }
    }
}
