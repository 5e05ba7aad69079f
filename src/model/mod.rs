pub mod availability;
pub mod calendar_event;
pub mod chat;
pub mod company;
pub mod employee;
pub mod replacement;
pub mod role;
pub mod schedule_template;
pub mod shift;
pub mod task;
pub mod team;
pub mod time_clock;
pub mod user;
