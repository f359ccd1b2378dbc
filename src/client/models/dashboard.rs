//! Dashboard statistics

use serde::{Deserialize, Serialize};

use super::ContactMessage;

/// Response of `GET /v1/admin/dashboard/stats`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub total_projects: u64,
    pub total_skills: u64,
    pub total_experiences: u64,
    pub total_education: u64,
    pub total_languages: u64,
    pub total_interests: u64,
    pub total_messages: u64,
    pub unread_messages: u64,
    pub read_messages: u64,
    pub recent_messages: Vec<ContactMessage>,
}
