use super::pages::{Page, Section};
use crate::model::role::Role;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;
use strum::IntoEnumIterator;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SidebarItem {
    pub page: Page,
    pub title: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SidebarSection {
    pub section: Section,
    pub items: Vec<SidebarItem>,
}

static SIDEBARS: Lazy<HashMap<Role, Vec<SidebarSection>>> =
    Lazy::new(|| Role::iter().map(|role| (role, compose(role))).collect());

fn compose(role: Role) -> Vec<SidebarSection> {
    Section::iter()
        .map(|section| SidebarSection {
            section,
            items: Page::iter()
                .filter(|page| page.section() == Some(section) && page.allows(role))
                .map(|page| SidebarItem {
                    page,
                    title: page.title().to_string(),
                    path: page.path(),
                })
                .collect(),
        })
        .filter(|s| !s.items.is_empty())
        .collect()
}

pub fn sidebar(role: Role) -> &'static [SidebarSection] {
    SIDEBARS.get(&role).map(Vec::as_slice).unwrap_or_default()
}
