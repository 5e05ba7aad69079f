use crate::{
    api::{
        collaboration, dashboard, directory, notifications, pages, replacement, reports, shifts,
        time_clock,
    },
    auth::{handlers, middleware::auth_middleware},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};
use std::sync::Arc;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let requests_per_min = requests_per_min.max(1);
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(60_000 / requests_per_min as u64)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap_or_default();
        Governor::new(&cfg)
    }

    let login_limiter = Arc::new(build_limiter(config.rate_login_per_min));
    let register_limiter = Arc::new(build_limiter(config.rate_register_per_min));
    let protected_limiter = Arc::new(build_limiter(config.rate_protected_per_min));

    // Public routes
    cfg.service(
        web::scope("/auth")
            .service(
                web::resource("/login")
                    .wrap(login_limiter.clone())
                    .route(web::post().to(handlers::login)),
            )
            .service(
                web::resource("/employee-login")
                    .wrap(login_limiter.clone())
                    .route(web::post().to(handlers::employee_login)),
            )
            .service(
                web::resource("/register")
                    .wrap(register_limiter)
                    .route(web::post().to(handlers::register)),
            )
            .service(
                web::resource("/logout")
                    .wrap(login_limiter)
                    .route(web::post().to(handlers::logout)),
            ),
    );

    // Page guard; anonymous visitors get redirected to the login page
    cfg.service(web::resource("/pages/{page}").route(web::get().to(pages::open_page)));

    // Protected routes
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware))
            .wrap(protected_limiter)
            .route("/me", web::get().to(handlers::me))
            .route("/sidebar", web::get().to(pages::get_sidebar))
            .route("/dashboard", web::get().to(dashboard::dashboard))
            .route("/notifications", web::get().to(notifications::list_notifications))
            .service(
                web::scope("/shifts")
                    // /shifts
                    .service(
                        web::resource("")
                            .route(web::get().to(shifts::list_shifts))
                            .route(web::post().to(shifts::create_shift)),
                    )
                    .service(web::resource("/available").route(web::get().to(shifts::available)))
                    .service(web::resource("/sweep").route(web::post().to(shifts::sweep)))
                    // /shifts/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(shifts::get_shift))
                            .route(web::patch().to(shifts::patch_shift)),
                    )
                    .service(
                        web::resource("/{id}/mark-missed").route(web::post().to(shifts::mark_missed)),
                    )
                    .service(
                        web::resource("/{id}/start-replacement")
                            .route(web::post().to(shifts::start_replacement)),
                    ),
            )
            .service(
                web::scope("/replacement-requests")
                    .service(
                        web::resource("")
                            .route(web::get().to(replacement::list_requests))
                            .route(web::post().to(replacement::create_request)),
                    )
                    .service(
                        web::resource("/{id}/approve")
                            .route(web::post().to(replacement::approve_request)),
                    )
                    .service(
                        web::resource("/{id}/reject").route(web::post().to(replacement::reject_request)),
                    ),
            )
            .service(
                web::scope("/time-clock")
                    .service(web::resource("").route(web::get().to(time_clock::list_entries)))
                    .service(web::resource("/active").route(web::get().to(time_clock::active)))
                    .service(
                        web::resource("/clock-in").route(web::post().to(time_clock::clock_in_handler)),
                    )
                    .service(
                        web::resource("/clock-out")
                            .route(web::post().to(time_clock::clock_out_handler)),
                    )
                    .service(web::resource("/break/start").route(web::post().to(time_clock::break_start)))
                    .service(web::resource("/break/end").route(web::post().to(time_clock::break_end))),
            )
            .service(
                web::scope("/companies")
                    .service(
                        web::resource("")
                            .route(web::get().to(directory::list_companies))
                            .route(web::post().to(directory::create_company)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::patch().to(directory::patch_company))
                            .route(web::delete().to(directory::delete_company)),
                    ),
            )
            .service(
                web::scope("/employees")
                    .service(
                        web::resource("")
                            .route(web::get().to(directory::list_employees))
                            .route(web::post().to(directory::create_employee)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::patch().to(directory::patch_employee))
                            .route(web::delete().to(directory::delete_employee)),
                    ),
            )
            .service(
                web::scope("/teams")
                    .service(
                        web::resource("")
                            .route(web::get().to(directory::list_teams))
                            .route(web::post().to(directory::create_team)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::patch().to(directory::patch_team))
                            .route(web::delete().to(directory::delete_team)),
                    ),
            )
            .service(
                web::resource("/availability")
                    .route(web::get().to(directory::list_availability))
                    .route(web::post().to(directory::create_availability)),
            )
            .service(
                web::scope("/schedule-templates")
                    .service(
                        web::resource("")
                            .route(web::get().to(directory::list_templates))
                            .route(web::post().to(directory::create_template)),
                    )
                    .service(
                        web::resource("/{id}").route(web::delete().to(directory::delete_template)),
                    ),
            )
            .service(
                web::scope("/chats")
                    .service(
                        web::resource("")
                            .route(web::get().to(collaboration::list_chats))
                            .route(web::post().to(collaboration::create_chat)),
                    )
                    .service(
                        web::resource("/{id}/messages")
                            .route(web::get().to(collaboration::list_messages))
                            .route(web::post().to(collaboration::send_message)),
                    ),
            )
            .service(
                web::scope("/tasks")
                    .service(
                        web::resource("")
                            .route(web::get().to(collaboration::list_tasks))
                            .route(web::post().to(collaboration::create_task)),
                    )
                    .service(
                        web::resource("/{id}/status")
                            .route(web::patch().to(collaboration::update_task_status)),
                    ),
            )
            .service(
                web::resource("/calendar/events")
                    .route(web::get().to(collaboration::list_events))
                    .route(web::post().to(collaboration::create_event)),
            )
            .service(
                web::scope("/reports")
                    .service(web::resource("/timesheet.csv").route(web::get().to(reports::timesheet)))
                    .service(web::resource("/shifts.csv").route(web::get().to(reports::shifts))),
            ),
    );
}
