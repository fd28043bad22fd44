use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use crossterm::style::Stylize;
use scripts_client::routes::Route;
use serde_json::Value;

/// Print a response body: arrays of objects as a table, anything else as
/// pretty JSON.
pub fn display_results(body: &Value) {
    match render_table(body) {
        Some((table, rows)) => {
            println!("{table}");
            println!("\n{}", format!("{rows} rows returned").green());
        }
        None if body.as_array().is_some_and(|a| a.is_empty()) => {
            println!("{}", "No results found.".yellow());
        }
        None => match serde_json::to_string_pretty(body) {
            Ok(text) => println!("{text}"),
            Err(_) => println!("{body}"),
        },
    }
}

pub fn render_table(body: &Value) -> Option<(Table, usize)> {
    let records = body.as_array()?;
    if records.is_empty() || !records.iter().all(Value::is_object) {
        return None;
    }

    // Columns in first-seen order across all records
    let mut field_names: Vec<String> = Vec::new();
    for record in records.iter().filter_map(Value::as_object) {
        for key in record.keys() {
            if !field_names.contains(key) {
                field_names.push(key.clone());
            }
        }
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(
        field_names
            .iter()
            .map(|f| Cell::new(f).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );

    for record in records.iter().filter_map(Value::as_object) {
        let row: Vec<String> = field_names
            .iter()
            .map(|field| match record.get(field) {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Number(n)) => n.to_string(),
                Some(Value::Bool(b)) => b.to_string(),
                Some(Value::Null) => "NULL".to_string(),
                Some(v) => v.to_string(),
                None => "".to_string(),
            })
            .collect();
        table.add_row(row);
    }

    Some((table, records.len()))
}

pub fn display_routes(routes: &[Route]) {
    let mut table = Table::new();
    table.set_header(
        ["path", "name", "view", "transition"]
            .iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );
    for route in routes {
        table.add_row(vec![
            route.path.to_string(),
            route.name.to_string(),
            route.view.to_string(),
            route
                .transition
                .map(|t| t.as_str().to_string())
                .unwrap_or_default(),
        ]);
    }
    println!("{table}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn objects_render_as_table_with_all_columns() {
        let body = json!([
            {"id": 1, "name": "intro"},
            {"id": 2, "owner": null}
        ]);
        let (table, rows) = render_table(&body).unwrap();
        assert_eq!(rows, 2);

        let text = table.to_string();
        for expected in ["id", "name", "owner", "intro", "NULL"] {
            assert!(text.contains(expected), "missing {expected} in\n{text}");
        }
    }

    #[test]
    fn non_tabular_bodies_are_not_tables() {
        assert!(render_table(&json!({"id": 1})).is_none());
        assert!(render_table(&json!([])).is_none());
        assert!(render_table(&json!([1, 2])).is_none());
        assert!(render_table(&Value::Null).is_none());
    }
}
