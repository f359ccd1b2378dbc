//! Portfolio entity display models

use serde::Serialize;
use serde_json::Value;
use tabled::Tabled;

use super::common::value_text;
use crate::client::models::{Entity, Resource};
use crate::output::formatters::truncate;

/// Column width for the detail column
const DETAIL_WIDTH: usize = 60;

/// Fields tried, in order, for an entry's headline
fn title_keys(resource: Resource) -> &'static [&'static str] {
    match resource {
        Resource::About => &["name"],
        Resource::Skills | Resource::Languages | Resource::Interests => &["name"],
        Resource::Projects => &["title"],
        Resource::Experiences => &["position", "company"],
        Resource::Education => &["degree", "institution"],
    }
}

/// Fields joined into the detail column
fn detail_keys(resource: Resource) -> &'static [&'static str] {
    match resource {
        Resource::About => &["title", "email", "location"],
        Resource::Skills => &["category", "proficiencyLevel"],
        Resource::Projects => &["category", "technologies"],
        Resource::Experiences => &["company", "startDate", "endDate"],
        Resource::Education => &["institution", "fieldOfStudy", "startDate", "endDate"],
        Resource::Languages => &["proficiency", "proficiencyPercentage"],
        Resource::Interests => &["description"],
    }
}

/// One portfolio entry as a table row
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct EntityRow {
    #[tabled(rename = "ID")]
    pub id: String,

    #[tabled(rename = "TITLE")]
    pub title: String,

    #[tabled(rename = "DETAILS")]
    pub details: String,
}

impl EntityRow {
    pub fn new(resource: Resource, entity: &Entity) -> Self {
        let id = entity.get("id").map(value_text).unwrap_or_else(|| "--".to_string());

        let title = title_keys(resource)
            .iter()
            .filter_map(|key| present(entity, key))
            .next()
            .unwrap_or_else(|| "--".to_string());

        let details: Vec<String> = detail_keys(resource)
            .iter()
            .filter_map(|key| present(entity, key))
            .filter(|value| *value != title)
            .collect();

        Self {
            id,
            title,
            details: truncate(&details.join(" · "), DETAIL_WIDTH),
        }
    }
}

fn present(entity: &Entity, key: &str) -> Option<String> {
    match entity.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(value) => Some(value_text(value)),
    }
}

/// Rows for a section payload: an array of entries, or a single object
pub fn entity_rows(resource: Resource, payload: &Entity) -> Vec<EntityRow> {
    match payload {
        Value::Array(items) => items.iter().map(|item| EntityRow::new(resource, item)).collect(),
        Value::Null => Vec::new(),
        single => vec![EntityRow::new(resource, single)],
    }
}

/// Field/value pairs for one entry, `id` first
pub fn entity_details(entity: &Entity) -> Vec<(String, String)> {
    let Value::Object(map) = entity else {
        return vec![("value".to_string(), value_text(entity))];
    };

    let mut pairs: Vec<(String, String)> = Vec::with_capacity(map.len());
    if let Some(id) = map.get("id") {
        pairs.push(("id".to_string(), value_text(id)));
    }
    pairs.extend(
        map.iter()
            .filter(|(key, _)| key.as_str() != "id")
            .map(|(key, value)| (key.clone(), value_text(value))),
    );
    pairs
}
