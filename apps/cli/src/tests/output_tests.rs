use super::*;

#[test]
fn columns_are_padded_to_widest_cell() {
    let rows = vec![
        vec!["c1".to_string(), "Acme".to_string()],
        vec!["c22".to_string(), "Globex Corporation".to_string()],
    ];
    let table = render_table(&["ID", "Name"], &rows);
    assert_eq!(
        table,
        "ID   Name\nc1   Acme\nc22  Globex Corporation\n"
    );
}

#[test]
fn empty_list_prints_only_the_header() {
    assert_eq!(render_table(&["ID", "Name"], &[]), "ID  Name\n");
}

#[test]
fn notices_serialize_with_status() {
    let value: serde_json::Value =
        serde_json::from_str(&notice_json(false, "Failed to add company")).expect("json");
    assert_eq!(value["status"], "error");
    assert_eq!(value["message"], "Failed to add company");
}
