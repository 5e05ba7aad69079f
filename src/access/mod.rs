//! Role-based page access and sidebar composition.

pub mod pages;
pub mod sidebar;
