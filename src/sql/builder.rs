//! Builds parameterized SELECT, INSERT, UPDATE, DELETE from a table descriptor.

use crate::registry::TableDescriptor;
use serde_json::{Map, Value};

/// Quote identifier for MySQL. Identifiers come only from descriptor data,
/// never from request input.
fn quoted(s: &str) -> String {
    format!("`{}`", s.replace('`', "``"))
}

/// One statement plus its bind values, in placeholder order.
#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<Value>,
}

impl QueryBuf {
    fn new(sql: String) -> Self {
        QueryBuf {
            sql,
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: Value) {
        self.params.push(v);
    }
}

/// SELECT * over the whole table.
pub fn select_all(table: &TableDescriptor) -> QueryBuf {
    QueryBuf::new(format!("SELECT * FROM {}", quoted(table.name)))
}

/// SELECT * for one row by primary key.
pub fn select_by_id(table: &TableDescriptor, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new(format!(
        "SELECT * FROM {} WHERE {} = ?",
        quoted(table.name),
        quoted(table.id_field)
    ));
    q.push_param(Value::from(id));
    q
}

/// INSERT over exactly the writable fields in declared order. Fields absent
/// from the body bind as NULL; body keys outside the field list are ignored.
pub fn insert(table: &TableDescriptor, body: &Map<String, Value>) -> QueryBuf {
    let columns: Vec<String> = table.writable_fields.iter().map(|f| quoted(f)).collect();
    let placeholders: Vec<&str> = table.writable_fields.iter().map(|_| "?").collect();
    let mut q = QueryBuf::new(format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quoted(table.name),
        columns.join(", "),
        placeholders.join(", ")
    ));
    for field in table.writable_fields {
        q.push_param(body.get(*field).cloned().unwrap_or(Value::Null));
    }
    q
}

/// UPDATE by primary key, setting only body keys that are writable fields.
/// Unknown keys are silently dropped. Returns None when nothing remains to
/// set, in which case no statement should be executed at all.
pub fn update(table: &TableDescriptor, id: i64, body: &Map<String, Value>) -> Option<QueryBuf> {
    let mut sets = Vec::new();
    let mut params = Vec::new();
    for (field, value) in body {
        if table.is_writable(field) {
            sets.push(format!("{} = ?", quoted(field)));
            params.push(value.clone());
        }
    }
    if sets.is_empty() {
        return None;
    }
    params.push(Value::from(id));
    Some(QueryBuf {
        sql: format!(
            "UPDATE {} SET {} WHERE {} = ?",
            quoted(table.name),
            sets.join(", "),
            quoted(table.id_field)
        ),
        params,
    })
}

/// DELETE one row by primary key.
pub fn delete(table: &TableDescriptor, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new(format!(
        "DELETE FROM {} WHERE {} = ?",
        quoted(table.name),
        quoted(table.id_field)
    ));
    q.push_param(Value::from(id));
    q
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const DONOR: &TableDescriptor = &TableDescriptor {
        name: "Donor",
        writable_fields: &["Name", "DOB", "BloodType"],
        id_field: "DonorID",
    };

    fn body(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn select_all_has_no_params() {
        let q = select_all(DONOR);
        assert_eq!(q.sql, "SELECT * FROM `Donor`");
        assert!(q.params.is_empty());
    }

    #[test]
    fn select_by_id_binds_the_id() {
        let q = select_by_id(DONOR, 7);
        assert_eq!(q.sql, "SELECT * FROM `Donor` WHERE `DonorID` = ?");
        assert_eq!(q.params, vec![json!(7)]);
    }

    #[test]
    fn insert_covers_every_writable_field_in_order() {
        let q = insert(DONOR, &body(json!({"BloodType": "O+", "Name": "Alice"})));
        assert_eq!(
            q.sql,
            "INSERT INTO `Donor` (`Name`, `DOB`, `BloodType`) VALUES (?, ?, ?)"
        );
        assert_eq!(q.params, vec![json!("Alice"), Value::Null, json!("O+")]);
    }

    #[test]
    fn insert_ignores_unknown_keys() {
        let q = insert(DONOR, &body(json!({"Name": "Bob", "DonorID": 9, "hacked": 1})));
        assert_eq!(q.params.len(), DONOR.writable_fields.len());
        assert_eq!(q.params[0], json!("Bob"));
    }

    #[test]
    fn update_filters_to_writable_fields_and_binds_id_last() {
        let q = update(DONOR, 3, &body(json!({"Name": "Carol", "DonorID": 99, "x": 1}))).unwrap();
        assert_eq!(q.sql, "UPDATE `Donor` SET `Name` = ? WHERE `DonorID` = ?");
        assert_eq!(q.params, vec![json!("Carol"), json!(3)]);
    }

    #[test]
    fn update_set_order_matches_param_order() {
        let q = update(DONOR, 3, &body(json!({"Name": "Carol", "BloodType": "A-"}))).unwrap();
        let name_pos = q.sql.find("`Name` = ?").unwrap();
        let blood_pos = q.sql.find("`BloodType` = ?").unwrap();
        if name_pos < blood_pos {
            assert_eq!(q.params[0], json!("Carol"));
            assert_eq!(q.params[1], json!("A-"));
        } else {
            assert_eq!(q.params[0], json!("A-"));
            assert_eq!(q.params[1], json!("Carol"));
        }
        assert_eq!(q.params[2], json!(3));
    }

    #[test]
    fn update_with_no_recognized_fields_builds_nothing() {
        assert!(update(DONOR, 3, &body(json!({"hacked_field": "x"}))).is_none());
        assert!(update(DONOR, 3, &body(json!({}))).is_none());
        // The primary key is not writable, so it cannot be smuggled into SET.
        assert!(update(DONOR, 3, &body(json!({"DonorID": 42}))).is_none());
    }

    #[test]
    fn delete_binds_the_id() {
        let q = delete(DONOR, 11);
        assert_eq!(q.sql, "DELETE FROM `Donor` WHERE `DonorID` = ?");
        assert_eq!(q.params, vec![json!(11)]);
    }
}
