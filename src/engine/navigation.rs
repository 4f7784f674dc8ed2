// ==========================================
// PIAR Portal - dashboard tabs per role
// ==========================================
// Exactly one tab is active at any time.
// ==========================================

use serde::{Deserialize, Serialize};

use crate::domain::types::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DashboardTab {
    Overview,
    Students,
    MyChild,
    Strategies,
    Users,
    Assistant,
    Settings,
}

/// Tabs offered to `role`, in display order. The first one is the landing tab.
pub fn tabs_for(role: Role) -> &'static [DashboardTab] {
    use DashboardTab::*;
    match role {
        Role::Teacher => &[Students, Strategies, Assistant],
        Role::Family => &[MyChild, Assistant],
        Role::Director => &[Overview, Students, Users, Assistant],
        Role::SuperAdmin => &[Overview, Students, Users, Settings],
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabState {
    role: Role,
    active: DashboardTab,
}

impl TabState {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            active: tabs_for(role)[0],
        }
    }

    pub fn active(&self) -> DashboardTab {
        self.active
    }

    pub fn available(&self) -> &'static [DashboardTab] {
        tabs_for(self.role)
    }

    /// Switch to `tab`. A tab the role is not offered is rejected and the
    /// active tab stays as it was.
    pub fn select(&mut self, tab: DashboardTab) -> bool {
        if self.available().contains(&tab) {
            self.active = tab;
            true
        } else {
            false
        }
    }
}
