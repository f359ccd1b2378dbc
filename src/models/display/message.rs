//! Contact message display models

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::ContactMessage;
use crate::output::formatters::{format_optional_timestamp, truncate};

/// Contact message row for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct MessageDisplay {
    #[tabled(rename = "ID")]
    pub id: i64,

    #[tabled(rename = "STATUS")]
    pub status: String,

    /// Sender name and address
    #[tabled(rename = "FROM")]
    pub from: String,

    #[tabled(rename = "SUBJECT")]
    pub subject: String,

    #[tabled(rename = "RECEIVED")]
    pub received: String,
}

impl From<&ContactMessage> for MessageDisplay {
    fn from(msg: &ContactMessage) -> Self {
        let status = msg
            .status
            .map(|s| s.as_str().to_string())
            .unwrap_or_else(|| "UNREAD".to_string());

        Self {
            id: msg.id,
            status,
            from: format!("{} <{}>", msg.name, msg.email),
            subject: truncate(&msg.subject, 40),
            received: format_optional_timestamp(msg.created_at.as_deref()),
        }
    }
}

impl From<ContactMessage> for MessageDisplay {
    fn from(msg: ContactMessage) -> Self {
        MessageDisplay::from(&msg)
    }
}

/// Field/value pairs for the full message view
pub fn message_details(msg: &ContactMessage) -> Vec<(String, String)> {
    let row = MessageDisplay::from(msg);
    vec![
        ("ID".to_string(), msg.id.to_string()),
        ("Status".to_string(), row.status),
        ("From".to_string(), row.from),
        ("Subject".to_string(), msg.subject.clone()),
        ("Received".to_string(), row.received),
        (
            "Read".to_string(),
            format_optional_timestamp(msg.read_at.as_deref()),
        ),
        ("Message".to_string(), msg.message.clone()),
    ]
}
