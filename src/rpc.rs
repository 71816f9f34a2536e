//! JSON-RPC 2.0 envelopes for the Odoo external API.
//!
//! Every call posts `{"jsonrpc": "2.0", "method": "call", "params": ...}`;
//! only the params differ per operation. No `id` correlation field is sent:
//! each call is a single POST that waits for its own response.

use std::fmt;

use serde::ser::SerializeTuple;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Value, json};

use crate::endpoints::OdooEndpoint;

pub const JSONRPC_VERSION: &str = "2.0";
pub const RPC_METHOD: &str = "call";

/// A single JSON-RPC request envelope, ready to be posted.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope {
    pub jsonrpc: &'static str,
    pub method: &'static str,
    pub params: Value,
}

/// The request variants understood by the Odoo gateway.
///
/// `Authenticate` posts to the session endpoint; every other variant goes
/// through `call_kw` with `(model, method, args, kwargs)` params. Values are
/// passed through uninspected; Odoo is the sole validator.
#[derive(Debug, Clone)]
pub enum OdooRequest {
    Authenticate {
        db: String,
        login: String,
        password: String,
    },
    Create {
        model: String,
        values: Value,
    },
    Read {
        model: String,
        ids: Vec<i64>,
        fields: Vec<String>,
    },
    Write {
        model: String,
        ids: Vec<i64>,
        values: Value,
    },
    Unlink {
        model: String,
        ids: Vec<i64>,
    },
    SearchRead {
        model: String,
        domain: Domain,
        fields: Vec<String>,
    },
}

impl OdooRequest {
    /// The endpoint this request must be posted to.
    #[must_use]
    pub fn endpoint(&self) -> OdooEndpoint {
        match self {
            Self::Authenticate { .. } => OdooEndpoint::SessionAuthenticate,
            _ => OdooEndpoint::DatasetCall,
        }
    }

    /// Builds the JSON-RPC envelope for this request.
    #[must_use]
    pub fn to_envelope(&self) -> Envelope {
        let params = match self {
            Self::Authenticate {
                db,
                login,
                password,
            } => json!({
                "db": db,
                "login": login,
                "password": password,
            }),
            Self::Create { model, values } => call_kw(model, "create", json!([values])),
            Self::Read { model, ids, fields } => call_kw(model, "read", json!([ids, fields])),
            Self::Write { model, ids, values } => call_kw(model, "write", json!([ids, values])),
            Self::Unlink { model, ids } => call_kw(model, "unlink", json!([ids])),
            Self::SearchRead {
                model,
                domain,
                fields,
            } => call_kw(model, "search_read", json!([domain, fields])),
        };
        Envelope {
            jsonrpc: JSONRPC_VERSION,
            method: RPC_METHOD,
            params,
        }
    }
}

fn call_kw(model: &str, method: &str, args: Value) -> Value {
    json!({
        "model": model,
        "method": method,
        "args": args,
        "kwargs": {},
    })
}

/// An Odoo domain filter: an ordered sequence of `(field, operator, value)`
/// conditions combined with an implicit AND.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Domain(Vec<Condition>);

impl Domain {
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Adds a `field = value` condition.
    #[must_use]
    pub fn field_eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.0.push(Condition {
            field: field.to_string(),
            operator: Operator::Eq,
            value: value.into(),
        });
        self
    }

    /// Adds a `field != value` condition.
    #[must_use]
    pub fn field_ne(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.0.push(Condition {
            field: field.to_string(),
            operator: Operator::NotEq,
            value: value.into(),
        });
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One domain condition, serialized as the 3-element array Odoo expects.
#[derive(Debug, Clone)]
pub struct Condition {
    field: String,
    operator: Operator,
    value: Value,
}

impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut triple = serializer.serialize_tuple(3)?;
        triple.serialize_element(&self.field)?;
        triple.serialize_element(self.operator.symbol())?;
        triple.serialize_element(&self.value)?;
        triple.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    NotEq,
}

impl Operator {
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "!=",
        }
    }
}

/// The error object Odoo embeds in a response body when a call fails at the
/// RPC layer rather than at the HTTP layer.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
}

impl fmt::Display for RpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "code {}: {}", self.code, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_requests() -> Vec<OdooRequest> {
        vec![
            OdooRequest::Authenticate {
                db: "dsp".to_string(),
                login: "admin@example.com".to_string(),
                password: "admin".to_string(),
            },
            OdooRequest::Create {
                model: "hr.employee".to_string(),
                values: json!({"name": "Abel"}),
            },
            OdooRequest::Read {
                model: "hr.employee".to_string(),
                ids: vec![7],
                fields: vec!["active".to_string(), "name".to_string()],
            },
            OdooRequest::Write {
                model: "hr.employee".to_string(),
                ids: vec![7],
                values: json!({"active": false}),
            },
            OdooRequest::Unlink {
                model: "hr.employee".to_string(),
                ids: vec![7],
            },
            OdooRequest::SearchRead {
                model: "hr.attendance".to_string(),
                domain: Domain::new().field_eq("employee_id", 7),
                fields: vec!["check_in".to_string()],
            },
        ]
    }

    #[test]
    fn every_envelope_is_a_jsonrpc_call() {
        for request in sample_requests() {
            let envelope = serde_json::to_value(request.to_envelope()).unwrap();
            assert_eq!(envelope["jsonrpc"], "2.0", "{request:?}");
            assert_eq!(envelope["method"], "call", "{request:?}");
        }
    }

    #[test]
    fn authenticate_params_carry_the_credentials() {
        let request = OdooRequest::Authenticate {
            db: "dsp".to_string(),
            login: "admin@example.com".to_string(),
            password: "admin".to_string(),
        };
        let envelope = serde_json::to_value(request.to_envelope()).unwrap();
        assert_eq!(
            envelope["params"],
            json!({"db": "dsp", "login": "admin@example.com", "password": "admin"})
        );
        assert_eq!(request.endpoint(), OdooEndpoint::SessionAuthenticate);
    }

    #[test]
    fn create_wraps_the_values_in_a_single_element_args_list() {
        let request = OdooRequest::Create {
            model: "hr.employee".to_string(),
            values: json!({"name": "Abel", "active": true}),
        };
        let envelope = serde_json::to_value(request.to_envelope()).unwrap();
        assert_eq!(
            envelope["params"],
            json!({
                "model": "hr.employee",
                "method": "create",
                "args": [{"name": "Abel", "active": true}],
                "kwargs": {},
            })
        );
        assert_eq!(request.endpoint(), OdooEndpoint::DatasetCall);
    }

    #[test]
    fn read_args_are_ids_then_fields() {
        let request = OdooRequest::Read {
            model: "hr.employee".to_string(),
            ids: vec![7],
            fields: vec!["active".to_string(), "name".to_string()],
        };
        let envelope = serde_json::to_value(request.to_envelope()).unwrap();
        assert_eq!(envelope["params"]["args"], json!([[7], ["active", "name"]]));
    }

    #[test]
    fn write_args_are_ids_then_values() {
        let request = OdooRequest::Write {
            model: "hr.employee".to_string(),
            ids: vec![7, 8],
            values: json!({"active": false}),
        };
        let envelope = serde_json::to_value(request.to_envelope()).unwrap();
        assert_eq!(envelope["params"]["args"], json!([[7, 8], {"active": false}]));
        assert_eq!(envelope["params"]["method"], "write");
    }

    #[test]
    fn unlink_args_are_the_ids_alone() {
        let request = OdooRequest::Unlink {
            model: "hr.employee".to_string(),
            ids: vec![7],
        };
        let envelope = serde_json::to_value(request.to_envelope()).unwrap();
        assert_eq!(envelope["params"]["args"], json!([[7]]));
        assert_eq!(envelope["params"]["method"], "unlink");
    }

    #[test]
    fn domain_conditions_serialize_as_triples() {
        let domain = Domain::new()
            .field_eq("employee_id", 42)
            .field_ne("check_in", false);
        assert_eq!(
            serde_json::to_value(&domain).unwrap(),
            json!([["employee_id", "=", 42], ["check_in", "!=", false]])
        );
    }

    #[test]
    fn rpc_error_parses_odoos_error_object() {
        let error: RpcError = serde_json::from_value(json!({
            "code": 200,
            "message": "Odoo Server Error",
            "data": {"name": "odoo.exceptions.AccessDenied"},
        }))
        .unwrap();
        assert_eq!(error.code, 200);
        assert_eq!(error.to_string(), "code 200: Odoo Server Error");
    }
}
