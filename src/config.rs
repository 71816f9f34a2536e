use std::fmt;

use url::Url;

use crate::error::{Error, Result};

pub const ENV_URL: &str = "ODOO_URL";
pub const ENV_DB: &str = "ODOO_DB";
pub const ENV_USERNAME: &str = "ODOO_USERNAME";
pub const ENV_PASSWORD: &str = "ODOO_PASSWORD";

/// Stores the Odoo base URL, target database and service-account credentials.
///
/// Immutable for the lifetime of a client; every authenticate call reads from
/// it, nothing writes back.
#[derive(Clone)]
pub struct Connection {
    pub(crate) base_url: Url,
    pub(crate) database: String,
    pub(crate) login: String,
    pub(crate) password: String,
}

impl Connection {
    /// Creates a new `Connection` from the provided coordinates.
    #[must_use]
    pub fn new(
        base_url: Url,
        database: impl Into<String>,
        login: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            base_url,
            database: database.into(),
            login: login.into(),
            password: password.into(),
        }
    }

    /// Creates a new `Connection` from the `ODOO_URL`, `ODOO_DB`,
    /// `ODOO_USERNAME` and `ODOO_PASSWORD` environment variables.
    pub fn from_env() -> Result<Self> {
        let base_url = Url::parse(&required(ENV_URL)?).map_err(|_| Error::InvalidEndpoint)?;
        Ok(Self {
            base_url,
            database: required(ENV_DB)?,
            login: required(ENV_USERNAME)?,
            password: required(ENV_PASSWORD)?,
        })
    }

    /// The base URL requests are joined onto.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The database name passed to the session endpoint.
    #[must_use]
    pub fn database(&self) -> &str {
        &self.database
    }

    /// The service-account login.
    #[must_use]
    pub fn login(&self) -> &str {
        &self.login
    }
}

// The password must never reach logs through a Debug rendering.
impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("base_url", &self.base_url.as_str())
            .field("database", &self.database)
            .field("login", &self.login)
            .field("password", &"[redacted]")
            .finish()
    }
}

fn required(name: &'static str) -> Result<String> {
    std::env::var(name).map_err(|_| Error::Env { name })
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    fn set_all() {
        unsafe {
            std::env::set_var(ENV_URL, "http://localhost:8069");
            std::env::set_var(ENV_DB, "dsp");
            std::env::set_var(ENV_USERNAME, "admin@example.com");
            std::env::set_var(ENV_PASSWORD, "admin");
        }
    }

    #[test]
    #[serial]
    fn from_env_reads_every_variable() {
        set_all();
        let connection = Connection::from_env().unwrap();
        assert_eq!(connection.base_url().as_str(), "http://localhost:8069/");
        assert_eq!(connection.database(), "dsp");
        assert_eq!(connection.login(), "admin@example.com");
        assert_eq!(connection.password, "admin");
    }

    #[test]
    #[serial]
    fn from_env_names_the_missing_variable() {
        set_all();
        unsafe { std::env::remove_var(ENV_DB) };
        match Connection::from_env() {
            Err(Error::Env { name }) => assert_eq!(name, ENV_DB),
            other => panic!("expected a missing-variable error, got {other:?}"),
        }
    }

    #[test]
    #[serial]
    fn from_env_rejects_an_unparseable_url() {
        set_all();
        unsafe { std::env::set_var(ENV_URL, "not a url") };
        assert!(matches!(Connection::from_env(), Err(Error::InvalidEndpoint)));
    }

    #[test]
    fn debug_redacts_the_password() {
        let connection = Connection::new(
            Url::parse("http://localhost:8069").unwrap(),
            "dsp",
            "admin@example.com",
            "hunter2",
        );
        let rendered = format!("{connection:?}");
        assert!(rendered.contains("[redacted]"));
        assert!(!rendered.contains("hunter2"));
    }
}
