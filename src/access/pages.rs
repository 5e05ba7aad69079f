use crate::model::role::Role;
use serde::Serialize;
use strum_macros::{Display, EnumIter, EnumString};
use utoipa::ToSchema;

use Role::{Admin, Employee, Manager};

const EVERYONE: &[Role] = &[Admin, Manager, Employee];
const MANAGEMENT: &[Role] = &[Admin, Manager];

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Display, EnumString, EnumIter, ToSchema)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Page {
    Login,
    AdminDashboard,
    ManagerDashboard,
    EmployeeDashboard,
    Companies,
    Employees,
    Teams,
    Schedule,
    ScheduleTemplates,
    ReplacementRequests,
    Reports,
    MyShifts,
    TimeClock,
    AvailableShifts,
    Availability,
    Tasks,
    Chat,
    Calendar,
    Profile,
}

/// Sidebar groups, in display order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Display, EnumIter, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Overview,
    Organization,
    Scheduling,
    MyWork,
    Collaboration,
    Account,
}

impl Page {
    pub fn path(self) -> String {
        format!("/{self}")
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Login => "Sign in",
            Page::AdminDashboard | Page::ManagerDashboard | Page::EmployeeDashboard => "Dashboard",
            Page::Companies => "Companies",
            Page::Employees => "Employees",
            Page::Teams => "Teams",
            Page::Schedule => "Schedule",
            Page::ScheduleTemplates => "Schedule templates",
            Page::ReplacementRequests => "Replacement requests",
            Page::Reports => "Reports",
            Page::MyShifts => "My shifts",
            Page::TimeClock => "Time clock",
            Page::AvailableShifts => "Open shifts",
            Page::Availability => "Availability",
            Page::Tasks => "Tasks",
            Page::Chat => "Chat",
            Page::Calendar => "Calendar",
            Page::Profile => "Profile",
        }
    }

    pub fn allowed_roles(self) -> &'static [Role] {
        match self {
            Page::Login => &[],
            Page::AdminDashboard | Page::Companies => &[Admin],
            Page::ManagerDashboard => &[Manager],
            Page::EmployeeDashboard | Page::MyShifts | Page::TimeClock | Page::AvailableShifts => {
                &[Employee]
            }
            Page::Employees
            | Page::Teams
            | Page::Schedule
            | Page::ScheduleTemplates
            | Page::ReplacementRequests
            | Page::Reports => MANAGEMENT,
            Page::Availability => &[Manager, Employee],
            Page::Tasks | Page::Chat | Page::Calendar | Page::Profile => EVERYONE,
        }
    }

    pub fn allows(self, role: Role) -> bool {
        self.allowed_roles().contains(&role)
    }

    /// `None` for pages kept out of the sidebar.
    pub fn section(self) -> Option<Section> {
        match self {
            Page::Login => None,
            Page::AdminDashboard | Page::ManagerDashboard | Page::EmployeeDashboard => Some(Section::Overview),
            Page::Companies | Page::Employees | Page::Teams => Some(Section::Organization),
            Page::Schedule | Page::ScheduleTemplates | Page::ReplacementRequests | Page::Reports => {
                Some(Section::Scheduling)
            }
            Page::MyShifts | Page::TimeClock | Page::AvailableShifts | Page::Availability => {
                Some(Section::MyWork)
            }
            Page::Tasks | Page::Chat | Page::Calendar => Some(Section::Collaboration),
            Page::Profile => Some(Section::Account),
        }
    }
}

pub fn default_dashboard(role: Role) -> Page {
    match role {
        Admin => Page::AdminDashboard,
        Manager => Page::ManagerDashboard,
        Employee => Page::EmployeeDashboard,
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Access {
    Render,
    Redirect(Page),
}

/// Decide whether `page` renders for a visitor. Anonymous visitors are sent
/// to sign in; a signed-in role that may not see the page lands on its own
/// dashboard instead.
pub fn guard(role: Option<Role>, page: Page) -> Access {
    match role {
        None if page == Page::Login => Access::Render,
        None => Access::Redirect(Page::Login),
        Some(role) if page.allows(role) => Access::Render,
        Some(role) => Access::Redirect(default_dashboard(role)),
    }
}
