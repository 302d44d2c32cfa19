use super::error::{Error, Result};
use crate::session::Session;
use serde::Deserialize;
use serde_json::Value;

/// The body the server sends back from either auth endpoint:
/// `{success, data: {token, user}, message?}`.
///
/// We keep the body as loose JSON and read fields out of it on demand. The
/// server only promises the general shape, and we want a strange `success`
/// or `message` to be interpreted rather than rejected outright.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply(pub Value);

impl Reply {
    /// Parse a raw response body.
    ///
    /// ## Errors
    ///
    /// - `Error::Json` if the body isn't JSON at all
    /// - `Error::EmptyReply` if the body is a bare `null`
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        match serde_json::from_slice(body)? {
            Value::Null => Err(Error::EmptyReply),
            value => Ok(Self(value)),
        }
    }

    /// Did the server say this worked?
    pub fn is_success(&self) -> bool {
        self.0.get("success").is_some_and(truthy)
    }

    /// The message the server gave us, if it gave us a non-empty one.
    pub fn message(&self) -> Option<String> {
        match self.0.get("message") {
            Some(Value::String(message)) if !message.is_empty() => Some(message.clone()),
            Some(Value::String(_)) | None => None,
            Some(other) if truthy(other) => Some(other.to_string()),
            Some(_) => None,
        }
    }

    /// Get the session out of `data`. The user record is taken verbatim; a
    /// missing user is stored as `null`.
    ///
    /// ## Errors
    ///
    /// - `Error::MissingToken` if there's no `data.token`
    /// - `Error::Json` if the token is something other than a string
    pub fn session(&self) -> Result<Session> {
        let data = self.0.get("data").ok_or(Error::MissingToken)?;
        let token = data.get("token").ok_or(Error::MissingToken)?;

        Ok(Session {
            token: String::deserialize(token)?,
            user: data.get("user").cloned().unwrap_or(Value::Null),
        })
    }
}

/// Whether a JSON value counts as "yes" when used as a flag. Empty strings,
/// zero, `false`, and `null` don't; everything else does.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(string) => !string.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
