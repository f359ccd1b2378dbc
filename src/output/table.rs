//! Table output formatting

use tabled::{
    Table, Tabled,
    builder::Builder,
    settings::{Alignment, Modify, Style, object::Rows},
};

/// Shown in place of an empty table
pub const EMPTY_MESSAGE: &str = "Nothing here yet.";

/// Format rows as a rounded table, or a placeholder line when there are none
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    if data.is_empty() {
        return EMPTY_MESSAGE.to_string();
    }

    let mut table = Table::new(data);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    table.to_string()
}

/// Format field/value pairs as a headerless two-column table
pub fn format_details(pairs: &[(String, String)]) -> String {
    if pairs.is_empty() {
        return EMPTY_MESSAGE.to_string();
    }

    let mut builder = Builder::default();
    for (field, value) in pairs {
        builder.push_record([field.clone(), value.clone()]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_details() {
        let pairs = vec![
            ("Name".to_string(), "Jane".to_string()),
            ("Email".to_string(), "jane@example.com".to_string()),
        ];
        let result = format_details(&pairs);
        assert!(result.contains("Email"));
        assert!(result.contains("jane@example.com"));
        assert_eq!(format_details(&[]), EMPTY_MESSAGE);
    }

    #[derive(Debug, Tabled)]
    struct TestRow {
        #[tabled(rename = "ID")]
        id: String,
        #[tabled(rename = "TITLE")]
        name: String,
    }

    #[test]
    fn test_format_table_empty() {
        let items: Vec<TestRow> = vec![];
        let result = format_table(&items);
        assert_eq!(result, EMPTY_MESSAGE);
    }

    #[test]
    fn test_format_table_single_row() {
        let items = vec![TestRow {
            id: "123".to_string(),
            name: "Portfolio".to_string(),
        }];

        let result = format_table(&items);

        assert!(result.contains("ID"));
        assert!(result.contains("TITLE"));
        assert!(result.contains("123"));
        assert!(result.contains("Portfolio"));
    }

    #[test]
    fn test_format_table_multiple_rows() {
        let items = vec![
            TestRow {
                id: "1".to_string(),
                name: "Backend".to_string(),
            },
            TestRow {
                id: "2".to_string(),
                name: "Frontend".to_string(),
            },
        ];

        let result = format_table(&items);

        assert!(result.contains("Backend"));
        assert!(result.contains("Frontend"));
    }

    #[test]
    fn test_format_table_uses_rounded_style() {
        let items = vec![TestRow {
            id: "1".to_string(),
            name: "Portfolio".to_string(),
        }];

        let result = format_table(&items);

        // Rounded style uses ╭ for top-left corner
        assert!(result.contains("╭"));
        assert!(result.contains("╰"));
    }
}
