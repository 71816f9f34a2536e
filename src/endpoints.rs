use std::fmt;
use url::Url;

use crate::error::{Error, Result};

/// A typed representation of the Odoo gateway endpoints.
///
/// Both endpoints accept a JSON-RPC 2.0 envelope via POST. The paths are
/// fixed by Odoo's web layer; the base URL comes from the connection
/// configuration and is joined in at call time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OdooEndpoint {
    /// `/web/session/authenticate`: opens a session and returns the user id.
    SessionAuthenticate,
    /// `/web/dataset/call_kw`: invokes a method on a model.
    DatasetCall,
}

impl OdooEndpoint {
    /// The URL path of this endpoint.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::SessionAuthenticate => "/web/session/authenticate",
            Self::DatasetCall => "/web/dataset/call_kw",
        }
    }

    /// Joins the endpoint path onto the given base URL.
    pub fn to_url(self, base: &Url) -> Result<Url> {
        base.join(self.path()).map_err(|_| Error::InvalidEndpoint)
    }
}

impl fmt::Display for OdooEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
