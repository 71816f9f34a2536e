use serde::Deserialize;

use crate::rpc::Domain;
use crate::utils::serde_helpers::odoo_nullable;
use crate::{Client, error::Result};

pub const MODEL: &str = "hr.attendance";

/// One `hr.attendance` row as returned by `search_read`.
///
/// `employee_id` is Odoo's many2one pair of record id and display name; a
/// missing check-out comes back as `false` and deserializes to `None`.
#[derive(Debug, Clone, Deserialize)]
pub struct Entry {
    pub id: i64,
    pub employee_id: (i64, String),
    pub check_in: String,
    #[serde(default, deserialize_with = "odoo_nullable")]
    pub check_out: Option<String>,
}

/// Builds the domain matching open attendance entries for the employee: a
/// check-in recorded and no check-out yet.
#[must_use]
pub fn open_domain(employee_id: i64) -> Domain {
    Domain::new()
        .field_eq("employee_id", employee_id)
        .field_ne("check_in", false)
        .field_eq("check_out", false)
}

/// True if the employee currently has an open attendance entry.
#[instrument(skip(client))]
pub async fn is_open(client: &Client, employee_id: i64) -> Result<bool> {
    let entries: Vec<Entry> = client
        .search_read(
            MODEL,
            open_domain(employee_id),
            &["employee_id", "check_in", "check_out"],
        )
        .await?;
    if let Some(entry) = entries.first() {
        debug!(employee = %entry.employee_id.1, check_in = %entry.check_in, "open attendance entry");
    }
    Ok(!entries.is_empty())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn open_domain_matches_unclosed_check_ins() {
        assert_eq!(
            serde_json::to_value(open_domain(42)).unwrap(),
            json!([
                ["employee_id", "=", 42],
                ["check_in", "!=", false],
                ["check_out", "=", false],
            ])
        );
    }

    #[test]
    fn entry_parses_an_open_attendance_row() {
        let entry: Entry = serde_json::from_value(json!({
            "id": 3,
            "employee_id": [7, "Abel"],
            "check_in": "2024-05-06 08:02:11",
            "check_out": false,
        }))
        .unwrap();
        assert_eq!(entry.id, 3);
        assert_eq!(entry.employee_id, (7, "Abel".to_string()));
        assert_eq!(entry.check_in, "2024-05-06 08:02:11");
        assert_eq!(entry.check_out, None);
    }

    #[test]
    fn entry_parses_a_closed_attendance_row() {
        let entry: Entry = serde_json::from_value(json!({
            "id": 3,
            "employee_id": [7, "Abel"],
            "check_in": "2024-05-06 08:02:11",
            "check_out": "2024-05-06 17:14:02",
        }))
        .unwrap();
        assert_eq!(entry.check_out.as_deref(), Some("2024-05-06 17:14:02"));
    }
}
