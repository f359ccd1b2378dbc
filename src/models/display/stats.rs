//! Dashboard statistics display model

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::DashboardStats;

/// One counter on the dashboard
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct StatDisplay {
    #[tabled(rename = "SECTION")]
    pub section: String,

    #[tabled(rename = "COUNT")]
    pub count: u64,
}

impl StatDisplay {
    fn new(section: &str, count: u64) -> Self {
        Self {
            section: section.to_string(),
            count,
        }
    }
}

/// Counters in dashboard order
pub fn stat_rows(stats: &DashboardStats) -> Vec<StatDisplay> {
    vec![
        StatDisplay::new("Projects", stats.total_projects),
        StatDisplay::new("Skills", stats.total_skills),
        StatDisplay::new("Experiences", stats.total_experiences),
        StatDisplay::new("Education", stats.total_education),
        StatDisplay::new("Languages", stats.total_languages),
        StatDisplay::new("Interests", stats.total_interests),
        StatDisplay::new("Messages", stats.total_messages),
        StatDisplay::new("Unread", stats.unread_messages),
        StatDisplay::new("Read", stats.read_messages),
    ]
}
