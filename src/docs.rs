use crate::access::pages::{Page, Section};
use crate::access::sidebar::{SidebarItem, SidebarSection};
use crate::api::collaboration::MessageDto;
use crate::api::dashboard::{AdminDashboard, EmployeeDashboard, ManagerDashboard};
use crate::api::pages::PageView;
use crate::api::replacement::ReplacementReqDto;
use crate::auth::auth::Viewer;
use crate::auth::handlers::{EmployeeLoginDto, LoginReqDto, LoginResponse, MeResponse};
use crate::client::auth::RegisterAccount;
use crate::model::availability::{Availability, CreateAvailability};
use crate::model::calendar_event::{CalendarEvent, CreateCalendarEvent};
use crate::model::chat::{Chat, ChatMessage, CreateChat};
use crate::model::company::{Company, CreateCompany};
use crate::model::employee::{CreateEmployee, Employee};
use crate::model::replacement::{ReplacementRequest, ReplacementStatus, ReviewNotes};
use crate::model::role::Role;
use crate::model::schedule_template::{CreateScheduleTemplate, ScheduleTemplate};
use crate::model::shift::{CreateShift, Shift, ShiftStatus};
use crate::model::task::{CreateTask, Task, TaskStatus, UpdateTaskStatus};
use crate::model::team::{CreateTeam, Team};
use crate::model::time_clock::{ClockInRequest, TimeClockEntry};
use crate::workflow::missed::SweepReport;
use crate::workflow::notifications::{Notification, NotificationKind};
use crate::workflow::reconcile::{DisplayStatus, ShiftView};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shiftdesk API",
        version = "1.0.0",
        description = r#"
## Shift scheduling front-end

Browser-facing API of a workforce scheduling app. It signs users in against
the scheduling backend, keeps their session, and layers the shift workflows
on top of the backend's REST resources.

### Key Features
- **Missed shifts**
  - Shifts 15 minutes past their start with no clock-in are flagged as missed
- **Replacements**
  - Co-workers volunteer for missed shifts, managers approve or reject
- **Time clock**
  - Clock in/out and breaks, restricted to the shift's assignee
- **Dashboards & pages**
  - Role-specific landing pages, sidebar and page guards
- **Directory, chat, tasks, calendar and CSV reports**

### Security
Sign in through `/auth/login` and send the returned token as
`Authorization: Bearer <token>`.
"#,
    ),
    paths(
        crate::auth::handlers::login,
        crate::auth::handlers::employee_login,
        crate::auth::handlers::register,
        crate::auth::handlers::logout,
        crate::auth::handlers::me,

        crate::api::pages::open_page,
        crate::api::pages::get_sidebar,
        crate::api::dashboard::dashboard,
        crate::api::notifications::list_notifications,

        crate::api::shifts::list_shifts,
        crate::api::shifts::get_shift,
        crate::api::shifts::create_shift,
        crate::api::shifts::patch_shift,
        crate::api::shifts::mark_missed,
        crate::api::shifts::sweep,
        crate::api::shifts::available,
        crate::api::shifts::start_replacement,

        crate::api::replacement::list_requests,
        crate::api::replacement::create_request,
        crate::api::replacement::approve_request,
        crate::api::replacement::reject_request,

        crate::api::time_clock::active,
        crate::api::time_clock::list_entries,
        crate::api::time_clock::clock_in_handler,
        crate::api::time_clock::clock_out_handler,
        crate::api::time_clock::break_start,
        crate::api::time_clock::break_end,

        crate::api::directory::list_companies,
        crate::api::directory::create_company,
        crate::api::directory::patch_company,
        crate::api::directory::delete_company,
        crate::api::directory::list_employees,
        crate::api::directory::create_employee,
        crate::api::directory::patch_employee,
        crate::api::directory::delete_employee,
        crate::api::directory::list_teams,
        crate::api::directory::create_team,
        crate::api::directory::patch_team,
        crate::api::directory::delete_team,
        crate::api::directory::list_availability,
        crate::api::directory::create_availability,
        crate::api::directory::list_templates,
        crate::api::directory::create_template,
        crate::api::directory::delete_template,

        crate::api::collaboration::list_chats,
        crate::api::collaboration::create_chat,
        crate::api::collaboration::list_messages,
        crate::api::collaboration::send_message,
        crate::api::collaboration::list_tasks,
        crate::api::collaboration::create_task,
        crate::api::collaboration::update_task_status,
        crate::api::collaboration::list_events,
        crate::api::collaboration::create_event,

        crate::api::reports::timesheet,
        crate::api::reports::shifts
    ),
    components(
        schemas(
            LoginReqDto,
            EmployeeLoginDto,
            RegisterAccount,
            LoginResponse,
            MeResponse,
            Viewer,
            Role,
            Page,
            Section,
            PageView,
            SidebarItem,
            SidebarSection,
            AdminDashboard,
            ManagerDashboard,
            EmployeeDashboard,
            Notification,
            NotificationKind,
            Shift,
            ShiftStatus,
            ShiftView,
            DisplayStatus,
            CreateShift,
            SweepReport,
            ReplacementRequest,
            ReplacementStatus,
            ReplacementReqDto,
            ReviewNotes,
            TimeClockEntry,
            ClockInRequest,
            Company,
            CreateCompany,
            Employee,
            CreateEmployee,
            Team,
            CreateTeam,
            Availability,
            CreateAvailability,
            ScheduleTemplate,
            CreateScheduleTemplate,
            Chat,
            ChatMessage,
            CreateChat,
            MessageDto,
            Task,
            TaskStatus,
            CreateTask,
            UpdateTaskStatus,
            CalendarEvent,
            CreateCalendarEvent
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Sign-in, sign-out and the current viewer"),
        (name = "Pages", description = "Page guards and navigation"),
        (name = "Dashboard", description = "Role-specific dashboards"),
        (name = "Notifications", description = "Shift notifications"),
        (name = "Shifts", description = "Shifts and missed-shift detection"),
        (name = "Replacement Requests", description = "Covering missed shifts"),
        (name = "Time Clock", description = "Clock in/out and breaks"),
        (name = "Directory", description = "Companies, employees, teams, availability and templates"),
        (name = "Collaboration", description = "Chat, tasks and calendar"),
        (name = "Reports", description = "CSV exports"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
