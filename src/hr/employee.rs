use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::rpc::Domain;
use crate::{Client, error::Result};

pub const MODEL: &str = "hr.employee";

/// An employee record to be created, with the flat field set the gateway
/// accepts. Serializing produces the `hr.employee` values map 1:1, including
/// the remote schema's own `liscence_*` spellings; nothing is validated
/// locally.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewEmployee {
    /// Lands in Odoo's `name` field.
    #[serde(rename(serialize = "name", deserialize = "first_name"))]
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub active: bool,
    pub woreda: String,
    pub kebele: String,
    pub sub_city: String,
    pub private_city: String,
    pub house_number: String,
    pub postal_code: String,
    pub private_phone: String,
    pub private_email: String,
    pub liscence_number: String,
    pub liscence_issue_date: String,
    pub employee_type: String,
}

/// Creates an employee record, returning the new record id.
#[instrument(skip(client, employee), fields(name = %employee.first_name))]
pub async fn create(client: &Client, employee: &NewEmployee) -> Result<i64> {
    let id = client.create(MODEL, employee).await?;
    info!(id, "employee record created");
    Ok(id)
}

/// Reads the given fields of one employee, returning the raw rows.
#[instrument(skip(client))]
pub async fn read(
    client: &Client,
    employee_id: i64,
    fields: &[&str],
) -> Result<Vec<Map<String, Value>>> {
    client.read(MODEL, &[employee_id], fields).await
}

/// Builds the domain matching the employee iff a departure reason is set.
#[must_use]
pub fn departure_domain(employee_id: i64) -> Domain {
    Domain::new()
        .field_eq("id", employee_id)
        .field_ne("departure_reason_id", false)
}

/// True if the employee record carries a departure reason (a resignation or
/// other termination has been registered).
#[instrument(skip(client))]
pub async fn has_departure_reason(client: &Client, employee_id: i64) -> Result<bool> {
    let rows: Vec<Map<String, Value>> = client
        .search_read(
            MODEL,
            departure_domain(employee_id),
            &["id", "departure_reason_id"],
        )
        .await?;
    Ok(!rows.is_empty())
}
