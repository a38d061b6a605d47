//! Tests for free-text search and tri-state sorting.

use serde_json::{json, Value};
use table_engine::{search, sort_rows, ColumnConfig, Row, SortConfig, SortDirection};

fn rows(value: Value) -> Vec<Row> {
    value
        .as_array()
        .expect("fixture must be an array")
        .iter()
        .map(|v| v.as_object().cloned().expect("rows must be objects"))
        .collect()
}

fn names(rows: &[Row]) -> Vec<&str> {
    rows.iter()
        .map(|r| r.get("name").and_then(Value::as_str).unwrap_or(""))
        .collect()
}

fn dentists() -> Vec<Row> {
    rows(json!([
        {"name": "Dr. Okafor", "specialty": "Orthodontics", "chair": 3},
        {"name": "Dr. Lindqvist", "specialty": "Endodontics", "chair": 1},
        {"name": "Dr. Haddad", "specialty": "General", "chair": 2},
        {"name": "Dr. Mbeki", "specialty": null, "chair": 12}
    ]))
}

fn columns() -> Vec<ColumnConfig> {
    vec![
        ColumnConfig::serial(),
        ColumnConfig::new("name"),
        ColumnConfig::new("specialty"),
        ColumnConfig::new("chair"),
    ]
}

// ============================================================================
// Search
// ============================================================================

#[test]
fn empty_term_returns_rows_unchanged() {
    let data = dentists();
    assert_eq!(search(&data, &columns(), ""), data);
    assert_eq!(search(&data, &columns(), "   "), data);
}

#[test]
fn surrounding_whitespace_is_part_of_the_term() {
    let data = rows(json!([
        {"name": "Goldsmith"},
        {"name": "Anna Smith"}
    ]));
    let cols = vec![ColumnConfig::new("name")];

    assert_eq!(names(&search(&data, &cols, " smith")), vec!["Anna Smith"]);
    assert_eq!(search(&data, &cols, "smith").len(), 2);
}

#[test]
fn search_is_case_insensitive_substring() {
    let found = search(&dentists(), &columns(), "DONTICS");
    assert_eq!(names(&found), vec!["Dr. Okafor", "Dr. Lindqvist"]);
}

#[test]
fn search_matches_any_column() {
    let found = search(&dentists(), &columns(), "haddad");
    assert_eq!(names(&found), vec!["Dr. Haddad"]);

    let found = search(&dentists(), &columns(), "general");
    assert_eq!(names(&found), vec!["Dr. Haddad"]);
}

#[test]
fn search_matches_numbers_by_text() {
    let found = search(&dentists(), &columns(), "1");
    assert_eq!(names(&found), vec!["Dr. Lindqvist", "Dr. Mbeki"]);
}

#[test]
fn search_ignores_columns_not_configured() {
    let only_name = vec![ColumnConfig::new("name")];
    assert!(search(&dentists(), &only_name, "general").is_empty());
}

#[test]
fn search_never_matches_null() {
    assert!(search(&dentists(), &columns(), "null").is_empty());
}

#[test]
fn search_skips_synthetic_columns() {
    // "1" would match the serial number of the first row if it were searched.
    let only_serial = vec![ColumnConfig::serial()];
    assert!(search(&dentists(), &only_serial, "1").is_empty());
}

#[test]
fn search_never_grows_the_result() {
    for term in ["", "dr", "o", "zzz", "3"] {
        assert!(search(&dentists(), &columns(), term).len() <= dentists().len());
    }
}

// ============================================================================
// Sort
// ============================================================================

fn ages() -> Vec<Row> {
    rows(json!([
        {"name": "Bob", "age": null},
        {"name": "Ann", "age": 30},
        {"name": "Cy", "age": 20}
    ]))
}

#[test]
fn nulls_first_ascending() {
    let sorted = sort_rows(&ages(), &SortConfig::asc("age"));
    assert_eq!(names(&sorted), vec!["Bob", "Cy", "Ann"]);
}

#[test]
fn nulls_last_descending() {
    let sorted = sort_rows(&ages(), &SortConfig::desc("age"));
    assert_eq!(names(&sorted), vec!["Ann", "Cy", "Bob"]);
}

#[test]
fn missing_field_sorts_like_null() {
    let data = rows(json!([{"name": "A", "age": 5}, {"name": "B"}]));
    let sorted = sort_rows(&data, &SortConfig::asc("age"));
    assert_eq!(names(&sorted), vec!["B", "A"]);
}

#[test]
fn strings_sort_natively() {
    let sorted = sort_rows(&dentists(), &SortConfig::asc("name"));
    assert_eq!(
        names(&sorted),
        vec!["Dr. Haddad", "Dr. Lindqvist", "Dr. Mbeki", "Dr. Okafor"]
    );
}

#[test]
fn numbers_sort_numerically_not_lexically() {
    let sorted = sort_rows(&dentists(), &SortConfig::asc("chair"));
    assert_eq!(
        names(&sorted),
        vec!["Dr. Lindqvist", "Dr. Haddad", "Dr. Okafor", "Dr. Mbeki"]
    );
}

#[test]
fn sort_is_stable_for_equal_values() {
    let data = rows(json!([
        {"name": "first", "status": "active"},
        {"name": "second", "status": "active"},
        {"name": "third", "status": "archived"}
    ]));

    let asc = sort_rows(&data, &SortConfig::asc("status"));
    assert_eq!(names(&asc), vec!["first", "second", "third"]);

    let desc = sort_rows(&data, &SortConfig::desc("status"));
    assert_eq!(names(&desc), vec!["third", "first", "second"]);
}

#[test]
fn direction_none_leaves_order_alone() {
    let config = SortConfig {
        key: Some("age".to_string()),
        direction: SortDirection::None,
    };
    assert_eq!(sort_rows(&ages(), &config), ages());
    assert_eq!(sort_rows(&ages(), &SortConfig::default()), ages());
}

#[test]
fn mixed_types_group_numbers_before_strings() {
    let data = rows(json!([{"name": "a", "v": "10"}, {"name": "b", "v": 9}]));
    let sorted = sort_rows(&data, &SortConfig::asc("v"));
    assert_eq!(names(&sorted), vec!["b", "a"]);
}

#[test]
fn long_mixed_type_column_sorts_without_panicking() {
    // Past the insertion-sort threshold, so the full merge path runs.
    let data: Vec<Row> = (0..200)
        .map(|i| {
            let v = if i % 2 == 0 { json!(i) } else { json!(i.to_string()) };
            json!({"name": format!("r{}", i), "v": v})
                .as_object()
                .cloned()
                .unwrap()
        })
        .collect();

    let asc = sort_rows(&data, &SortConfig::asc("v"));
    let desc = sort_rows(&data, &SortConfig::desc("v"));

    assert_eq!(asc.len(), 200);
    assert!(asc[..100].iter().all(|r| r["v"].is_number()));
    assert!(asc[100..].iter().all(|r| r["v"].is_string()));
    let numbers: Vec<i64> = asc[..100].iter().filter_map(|r| r["v"].as_i64()).collect();
    assert!(numbers.windows(2).all(|w| w[0] <= w[1]));
    // Strings compare lexically: "1" < "101" < "11".
    assert_eq!(asc[100]["v"], "1");
    assert!(desc[..100].iter().all(|r| r["v"].is_string()));
}

// ============================================================================
// Header-click state machine
// ============================================================================

#[test]
fn same_column_cycles_none_asc_desc_none() {
    let name = ColumnConfig::new("name");

    let s1 = SortConfig::default().toggle(&name);
    assert_eq!(s1, SortConfig::asc("name"));

    let s2 = s1.toggle(&name);
    assert_eq!(s2, SortConfig::desc("name"));

    let s3 = s2.toggle(&name);
    assert_eq!(s3.direction, SortDirection::None);
    assert_eq!(s3.active_key(), None);

    let s4 = s3.toggle(&name);
    assert_eq!(s4, SortConfig::asc("name"));
}

#[test]
fn switching_columns_always_starts_ascending() {
    let chair = ColumnConfig::new("chair");

    let on_name_desc = SortConfig::desc("name");
    assert_eq!(on_name_desc.toggle(&chair), SortConfig::asc("chair"));
}

#[test]
fn unsortable_columns_ignore_clicks() {
    let current = SortConfig::asc("name");

    assert_eq!(current.toggle(&ColumnConfig::serial()), current);
    assert_eq!(current.toggle(&ColumnConfig::new("notes").unsortable()), current);
}

#[test]
fn header_direction_only_for_active_column() {
    let sort = SortConfig::desc("name");
    assert_eq!(sort.direction_for(&ColumnConfig::new("name")), SortDirection::Desc);
    assert_eq!(sort.direction_for(&ColumnConfig::new("chair")), SortDirection::None);
}

#[test]
fn sort_config_serializes_lowercase_direction() {
    let json = serde_json::to_value(SortConfig::asc("age")).unwrap();
    assert_eq!(json, json!({"key": "age", "direction": "asc"}));

    let parsed: SortConfig = serde_json::from_str(r#"{"key":"age","direction":"desc"}"#).unwrap();
    assert_eq!(parsed, SortConfig::desc("age"));
}
