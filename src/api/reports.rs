//! Downloadable CSV reports for managers and admins.

use crate::auth::auth::AuthSession;
use crate::client::SchedulerApi;
use crate::client::directory::CompanyScope;
use crate::errors::AppError;
use crate::model::employee::Employee;
use crate::model::shift::ShiftFilter;
use crate::model::time_clock::{TimeClockEntry, TimeEntryFilter};
use crate::utils::csv::CsvTable;
use crate::workflow::reconcile::{ShiftView, shift_views};
use actix_web::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use actix_web::{HttpResponse, web};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use utoipa::IntoParams;

const MAX_REPORT_DAYS: i64 = 93;
const TIMESTAMP: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Deserialize, IntoParams)]
pub struct ReportRange {
    /// First day included, `YYYY-MM-DD`
    pub from: NaiveDate,
    /// Last day included, `YYYY-MM-DD`
    pub to: NaiveDate,
}

impl ReportRange {
    fn validate(&self) -> Result<(), AppError> {
        if self.from > self.to {
            return Err(AppError::BadRequest("`from` must not be after `to`".into()));
        }
        if (self.to - self.from).num_days() >= MAX_REPORT_DAYS {
            return Err(AppError::BadRequest(format!(
                "Reports cover at most {MAX_REPORT_DAYS} days"
            )));
        }
        Ok(())
    }

    /// Half-open instant range `[from 00:00, to + 1 day 00:00)`.
    fn bounds(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let start = self.from.and_time(NaiveTime::MIN).and_utc();
        let end = (self.to + chrono::Duration::days(1))
            .and_time(NaiveTime::MIN)
            .and_utc();
        (start, end)
    }

    fn file_name(&self, kind: &str) -> String {
        format!("{kind}_{}_{}.csv", self.from, self.to)
    }
}

fn names(employees: &[Employee]) -> HashMap<u64, String> {
    employees.iter().map(|e| (e.id, e.full_name())).collect()
}

fn name_of(names: &HashMap<u64, String>, id: u64) -> String {
    names.get(&id).cloned().unwrap_or_else(|| format!("#{id}"))
}

fn hours(d: chrono::Duration) -> String {
    format!("{:.2}", d.num_seconds() as f64 / 3600.0)
}

fn stamp(t: Option<DateTime<Utc>>) -> String {
    t.map(|t| t.format(TIMESTAMP).to_string()).unwrap_or_default()
}

/// One row per time-clock entry, oldest first. Open entries have empty
/// clock-out and worked columns.
pub fn timesheet_csv(entries: &[TimeClockEntry], employees: &[Employee]) -> String {
    let names = names(employees);
    let mut sorted: Vec<&TimeClockEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| (e.clock_in, e.id));

    let mut table = CsvTable::new(vec![
        "entry_id",
        "employee_id",
        "employee",
        "shift_id",
        "clock_in",
        "clock_out",
        "break_hours",
        "worked_hours",
    ]);
    for e in sorted {
        table.push(vec![
            e.id.to_string(),
            e.employee.to_string(),
            name_of(&names, e.employee),
            e.shift.map(|s| s.to_string()).unwrap_or_default(),
            stamp(Some(e.clock_in)),
            stamp(e.clock_out),
            hours(e.break_duration()),
            e.worked().map(hours).unwrap_or_default(),
        ]);
    }
    table.render()
}

/// One row per shift with the status shown in the schedule.
pub fn shifts_csv(views: &[ShiftView], employees: &[Employee]) -> String {
    let names = names(employees);
    let mut sorted: Vec<&ShiftView> = views.iter().collect();
    sorted.sort_by_key(|v| (v.shift.start_time, v.shift.id));

    let mut table = CsvTable::new(vec![
        "shift_id",
        "employee",
        "start",
        "end",
        "status",
        "missed",
        "replacement",
        "notes",
    ]);
    for v in sorted {
        let s = &v.shift;
        table.push(vec![
            s.id.to_string(),
            name_of(&names, s.employee),
            stamp(Some(s.start_time)),
            stamp(Some(s.end_time)),
            v.display_status.to_string(),
            if s.is_missed { "yes" } else { "no" }.to_string(),
            s.approved_replacement()
                .map(|id| name_of(&names, id))
                .unwrap_or_default(),
            s.notes.clone().unwrap_or_default(),
        ]);
    }
    table.render()
}

fn csv_response(file_name: String, body: String) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((CONTENT_TYPE, "text/csv; charset=utf-8"))
        .insert_header((
            CONTENT_DISPOSITION,
            format!("attachment; filename=\"{file_name}\""),
        ))
        .body(body)
}

#[utoipa::path(
    get,
    path = "/api/reports/timesheet.csv",
    params(ReportRange),
    responses(
        (status = 200, description = "Timesheet CSV", content_type = "text/csv", body = String),
        (status = 400, description = "Invalid range"),
        (status = 403, description = "Manager/Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Reports"
)]
pub async fn timesheet(
    session: AuthSession,
    range: web::Query<ReportRange>,
) -> Result<HttpResponse, AppError> {
    session.viewer.require_manager_or_admin()?;
    range.validate()?;
    let (start, end) = range.bounds();

    let company = session.viewer.scope_company(None);
    let filter = TimeEntryFilter {
        company,
        clock_in_after: Some(start),
        clock_in_before: Some(end),
        ..Default::default()
    };
    let scope = CompanyScope { company };
    let (entries, employees) = futures::try_join!(
        session.client.list_time_entries(&filter),
        session.client.list_employees(&scope),
    )?;

    tracing::info!(rows = entries.len(), from = %range.from, to = %range.to, "Timesheet report generated");
    Ok(csv_response(
        range.file_name("timesheet"),
        timesheet_csv(&entries, &employees),
    ))
}

#[utoipa::path(
    get,
    path = "/api/reports/shifts.csv",
    params(ReportRange),
    responses(
        (status = 200, description = "Shift CSV", content_type = "text/csv", body = String),
        (status = 400, description = "Invalid range"),
        (status = 403, description = "Manager/Admin only")
    ),
    security(("bearer_auth" = [])),
    tag = "Reports"
)]
pub async fn shifts(
    session: AuthSession,
    range: web::Query<ReportRange>,
) -> Result<HttpResponse, AppError> {
    session.viewer.require_manager_or_admin()?;
    range.validate()?;
    let (start, end) = range.bounds();

    let company = session.viewer.scope_company(None);
    let filter = ShiftFilter {
        company,
        start_after: Some(start),
        start_before: Some(end),
        ..Default::default()
    };
    let scope = CompanyScope { company };
    let (found, employees) = futures::try_join!(
        session.client.list_shifts(&filter),
        session.client.list_employees(&scope),
    )?;
    let views = shift_views(&session.client, found).await;

    tracing::info!(rows = views.len(), from = %range.from, to = %range.to, "Shift report generated");
    Ok(csv_response(range.file_name("shifts"), shifts_csv(&views, &employees)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::fake::{entry, shift_at};
    use crate::workflow::reconcile::DisplayStatus;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn employee(id: u64, first: &str, last: &str) -> Employee {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "company": 1,
            "first_name": first,
            "last_name": last,
        }))
        .unwrap()
    }

    fn nine_am() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap()
    }

    #[test]
    fn timesheet_nets_out_breaks() {
        let mut closed = entry(1, 7, Some(42), nine_am());
        closed.break_start = Some(nine_am() + Duration::hours(3));
        closed.break_end = Some(nine_am() + Duration::minutes(210));
        closed.clock_out = Some(nine_am() + Duration::hours(8));
        let open = entry(2, 8, None, nine_am() + Duration::hours(1));

        let csv = timesheet_csv(
            &[open, closed],
            &[employee(7, "John", "Doe"), employee(8, "Ann", "Lee")],
        );
        let lines: Vec<&str> = csv.split("\r\n").collect();

        assert_eq!(
            lines[0],
            "entry_id,employee_id,employee,shift_id,clock_in,clock_out,break_hours,worked_hours"
        );
        assert_eq!(lines[1], "1,7,John Doe,42,2026-03-02 09:00,2026-03-02 17:00,0.50,7.50");
        assert_eq!(lines[2], "2,8,Ann Lee,,2026-03-02 10:00,,0.00,");
    }

    #[test]
    fn shift_report_names_the_approved_replacement() {
        let mut covered = shift_at(5, 7, nine_am());
        covered.is_missed = true;
        covered.replacement_employee = Some(8);
        covered.replacement_approved_at = Some(nine_am() + Duration::minutes(30));
        covered.notes = Some("late, covered".into());

        let views = vec![ShiftView {
            shift: covered,
            display_status: DisplayStatus::InProgress,
        }];
        let csv = shifts_csv(&views, &[employee(7, "John", "Doe"), employee(8, "Ann", "Lee")]);

        assert!(csv.contains("5,John Doe,2026-03-02 09:00,2026-03-02 17:00,in_progress,yes,Ann Lee,\"late, covered\"\r\n"));
    }

    #[test]
    fn unknown_employees_fall_back_to_their_id() {
        let csv = timesheet_csv(&[entry(3, 99, None, nine_am())], &[]);
        assert!(csv.contains(",99,#99,"));
    }

    #[test]
    fn range_is_validated() {
        let day = |d| NaiveDate::from_ymd_opt(2026, 3, d).unwrap();
        assert!(ReportRange { from: day(5), to: day(1) }.validate().is_err());
        assert!(ReportRange { from: day(1), to: day(31) }.validate().is_ok());

        let long = ReportRange {
            from: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            to: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
        };
        assert!(long.validate().is_err());
    }
}
