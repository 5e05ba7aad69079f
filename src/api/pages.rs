use crate::access::pages::{Access, Page, guard};
use crate::access::sidebar::{SidebarSection, sidebar};
use crate::auth::auth::{AuthSession, MaybeSession, Viewer};
use crate::errors::AppError;
use actix_web::{HttpResponse, http::header::LOCATION, web};
use serde::Serialize;
use serde_json::json;
use std::str::FromStr;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct PageView {
    pub page: Page,
    pub title: String,
    pub viewer: Option<Viewer>,
    pub sidebar: Vec<SidebarSection>,
}

/// Route guard for front-end pages: renders the page shell or redirects.
#[utoipa::path(
    get,
    path = "/pages/{page}",
    params(("page" = String, Path, description = "Page slug, e.g. `replacement-requests`")),
    responses(
        (status = 200, description = "Page may be rendered", body = PageView),
        (status = 302, description = "Redirect to the login page or the viewer's dashboard"),
        (status = 404, description = "Unknown page")
    ),
    tag = "Pages"
)]
pub async fn open_page(
    session: MaybeSession,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let page = Page::from_str(&path)
        .map_err(|_| AppError::NotFound(format!("No page named `{}`", path.as_str())))?;
    let viewer = session.0.as_ref().map(|s| s.viewer.clone());

    match guard(viewer.as_ref().map(|v| v.role), page) {
        Access::Render => Ok(HttpResponse::Ok().json(PageView {
            page,
            title: page.title().to_string(),
            sidebar: viewer
                .as_ref()
                .map(|v| sidebar(v.role).to_vec())
                .unwrap_or_default(),
            viewer,
        })),
        Access::Redirect(target) => Ok(HttpResponse::Found()
            .insert_header((LOCATION, target.path()))
            .json(json!({ "redirect": target.path() }))),
    }
}

#[utoipa::path(
    get,
    path = "/api/sidebar",
    responses(
        (status = 200, description = "Sidebar for the viewer's role", body = [SidebarSection]),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Pages"
)]
pub async fn get_sidebar(session: AuthSession) -> HttpResponse {
    HttpResponse::Ok().json(sidebar(session.viewer.role))
}
