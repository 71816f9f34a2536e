use reqwest::header;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::config::Connection;
use crate::endpoints::OdooEndpoint;
use crate::error::{Error, Result};
use crate::hr::{
    attendance,
    employee::{self, NewEmployee},
};
use crate::rpc::{Domain, OdooRequest, RpcError};
use crate::status::{self, WorkStatus};

/// This is the client used for interacting with the Odoo JSON-RPC gateway.
/// It holds the immutable connection configuration and builds, posts and
/// decodes request envelopes.
///
/// The only state beyond the configuration is the HTTP client's cookie jar:
/// Odoo authorizes `call_kw` requests through the session cookie set by the
/// authenticate endpoint. Nothing else is cached; every public operation
/// authenticates afresh.
#[derive(Clone, Debug)]
pub struct Client {
    http: reqwest::Client,
    connection: Connection,
}

impl Client {
    /// Creates a client for the given connection.
    pub fn new(connection: Connection) -> Result<Self> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(Error::Request)?;
        Ok(Self { http, connection })
    }

    /// Creates a client from the `ODOO_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(Connection::from_env()?)
    }

    /// The connection this client was built with.
    #[must_use]
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Posts a request envelope to its endpoint and returns the value under
    /// `result`.
    #[instrument(skip(self, request), fields(endpoint = %request.endpoint()))]
    pub async fn send(&self, request: &OdooRequest) -> Result<Value> {
        let endpoint = request.endpoint();
        let url = endpoint.to_url(self.connection.base_url())?;
        let envelope = request.to_envelope();
        // The authenticate envelope carries the password and stays out of the
        // logs; call_kw bodies are traced.
        if endpoint == OdooEndpoint::DatasetCall {
            trace!(request = ?envelope, %url, "making JSON-RPC call");
        }

        let response = self
            .http
            .post(url)
            .header(header::ACCEPT, "application/json")
            .json(&envelope)
            .send()
            .await?;

        Self::handle_response(response).await
    }

    #[instrument(skip(response))]
    async fn handle_response(response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        let url = response.url().to_string();

        debug!("response from {url}: status={status}");

        let text = response.text().await?;
        trace!("response text:\n{text}");

        if !status.is_success() {
            error!("unexpected status code: {status}");
            return Err(Error::Http {
                status,
                url,
                response_body: Some(text),
            });
        }

        let body: Value = serde_json::from_str(&text).map_err(|e| {
            error!("failed to deserialize response: {e}");
            Error::Deserialization(e, Some(text.clone()))
        })?;

        Self::extract_result(body, &url)
    }

    /// Splits a parsed JSON-RPC body into its `result`, Odoo's error object,
    /// or a missing-result failure.
    fn extract_result(mut body: Value, url: &str) -> Result<Value> {
        if let Some(result) = body.get_mut("result") {
            return Ok(result.take());
        }
        if let Some(error) = body.get_mut("error") {
            let rpc_error: RpcError = serde_json::from_value(error.take())?;
            error!("odoo returned an error payload: {rpc_error}");
            return Err(Error::Api(rpc_error));
        }
        Err(Error::MissingResult {
            url: url.to_string(),
        })
    }

    /// Authenticates with the stored credentials and returns the Odoo user
    /// id.
    ///
    /// A response without a numeric `uid` is a login failure. Nothing is
    /// cached: the next operation authenticates again.
    #[instrument(skip(self))]
    pub async fn authenticate(&self) -> Result<i64> {
        let request = OdooRequest::Authenticate {
            db: self.connection.database.clone(),
            login: self.connection.login.clone(),
            password: self.connection.password.clone(),
        };
        let result = self.send(&request).await?;
        let uid = result
            .get("uid")
            .and_then(Value::as_i64)
            .ok_or_else(|| {
                warn!(database = %self.connection.database, "authentication rejected");
                Error::LoginFailed {
                    database: self.connection.database.clone(),
                    login: self.connection.login.clone(),
                }
            })?;
        debug!(uid, "authenticated against odoo");
        Ok(uid)
    }

    /// Creates a record of the given model and returns its id.
    #[instrument(skip(self, values))]
    pub async fn create<T: Serialize>(&self, model: &str, values: &T) -> Result<i64> {
        let request = OdooRequest::Create {
            model: model.to_string(),
            values: serde_json::to_value(values)?,
        };
        let result = self.send(&request).await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Reads the given fields of the given records.
    #[instrument(skip(self))]
    pub async fn read<R: DeserializeOwned>(
        &self,
        model: &str,
        ids: &[i64],
        fields: &[&str],
    ) -> Result<Vec<R>> {
        let request = OdooRequest::Read {
            model: model.to_string(),
            ids: ids.to_vec(),
            fields: fields.iter().map(ToString::to_string).collect(),
        };
        let result = self.send(&request).await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Updates the given records, returning Odoo's confirmation.
    #[instrument(skip(self, values))]
    pub async fn write<T: Serialize>(&self, model: &str, ids: &[i64], values: &T) -> Result<bool> {
        let request = OdooRequest::Write {
            model: model.to_string(),
            ids: ids.to_vec(),
            values: serde_json::to_value(values)?,
        };
        let result = self.send(&request).await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Deletes the given records, returning Odoo's confirmation.
    #[instrument(skip(self))]
    pub async fn unlink(&self, model: &str, ids: &[i64]) -> Result<bool> {
        let request = OdooRequest::Unlink {
            model: model.to_string(),
            ids: ids.to_vec(),
        };
        let result = self.send(&request).await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Runs a combined search and read, returning the matching rows.
    #[instrument(skip(self))]
    pub async fn search_read<R: DeserializeOwned>(
        &self,
        model: &str,
        domain: Domain,
        fields: &[&str],
    ) -> Result<Vec<R>> {
        let request = OdooRequest::SearchRead {
            model: model.to_string(),
            domain,
            fields: fields.iter().map(ToString::to_string).collect(),
        };
        let result = self.send(&request).await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Access the employee operations.
    #[must_use]
    pub fn employees(&self) -> EmployeesApi {
        EmployeesApi { client: self }
    }

    /// Access the attendance operations.
    #[must_use]
    pub fn attendance(&self) -> AttendanceApi {
        AttendanceApi { client: self }
    }
}

/// API handler for `hr.employee` operations.
#[derive(Debug)]
pub struct EmployeesApi<'a> {
    client: &'a Client,
}

impl EmployeesApi<'_> {
    /// Creates an employee record, returning the new record id. The caller
    /// is expected to have authenticated first.
    #[instrument(skip(self, new_employee))]
    pub async fn create(&self, new_employee: &NewEmployee) -> Result<i64> {
        employee::create(self.client, new_employee).await
    }

    /// Reads the given fields of one employee, returning the raw rows.
    #[instrument(skip(self))]
    pub async fn read(&self, id: i64, fields: &[&str]) -> Result<Vec<Map<String, Value>>> {
        employee::read(self.client, id, fields).await
    }

    /// True if the employee record carries a departure reason.
    #[instrument(skip(self))]
    pub async fn has_departure_reason(&self, id: i64) -> Result<bool> {
        employee::has_departure_reason(self.client, id).await
    }

    /// Authenticates and computes the at-work verdict for one employee.
    #[instrument(skip(self))]
    pub async fn work_status(&self, id: i64) -> Result<WorkStatus> {
        status::check_employee_status(self.client, id).await
    }
}

/// API handler for `hr.attendance` operations.
#[derive(Debug)]
pub struct AttendanceApi<'a> {
    client: &'a Client,
}

impl AttendanceApi<'_> {
    /// True if the employee has an attendance entry with a check-in and no
    /// check-out.
    #[instrument(skip(self))]
    pub async fn is_open(&self, employee_id: i64) -> Result<bool> {
        attendance::is_open(self.client, employee_id).await
    }
}
