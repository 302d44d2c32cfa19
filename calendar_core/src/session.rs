use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io;

/// Key-value storage that outlives the process.
pub mod storage;
pub use storage::{FileStorage, MemoryStorage, Storage};

/// Where the raw auth token lives in storage.
pub const TOKEN_KEY: &str = "calendar_auth_token";

/// Where the user record lives in storage, as a JSON string.
pub const USER_KEY: &str = "calendar_user";

/// Easy alias for error handling
pub type Result<T> = std::result::Result<T, Error>;

/// Problems reading or writing a session.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// We had a problem with the underlying storage, for example with
    /// permissions or a full disk.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// We had a problem turning the user record into JSON or back.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// What we get from a successful signup or login. The user record is
/// whatever the server sent; we don't look inside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque token issued by the server.
    pub token: String,

    /// The account we're signed in as.
    pub user: Value,
}

impl Session {
    /// Write the token and user record to storage. Each key is written
    /// exactly once.
    ///
    /// ## Errors
    ///
    /// Fails if the user record can't be serialized or storage can't be
    /// written. The token may already be written if the second write fails.
    pub async fn persist<S: Storage>(&self, storage: &S) -> Result<()> {
        let user = serde_json::to_string(&integral_numbers(&self.user))?;

        storage.set_item(TOKEN_KEY, &self.token).await?;
        storage.set_item(USER_KEY, &user).await?;

        Ok(())
    }

    /// Read a previously-persisted session, if there is one. A token with no
    /// user record still counts as a session.
    ///
    /// ## Errors
    ///
    /// Fails if storage can't be read or the stored user record isn't JSON.
    pub async fn load<S: Storage>(storage: &S) -> Result<Option<Self>> {
        let Some(token) = storage.get_item(TOKEN_KEY).await? else {
            return Ok(None);
        };

        let user = match storage.get_item(USER_KEY).await? {
            Some(user) => serde_json::from_str(&user)?,
            None => Value::Null,
        };

        Ok(Some(Self { token, user }))
    }

    /// Forget any stored session (i.e. sign out.)
    ///
    /// ## Errors
    ///
    /// Fails if storage can't be written.
    pub async fn clear<S: Storage>(storage: &S) -> Result<()> {
        storage.remove_item(TOKEN_KEY).await?;
        storage.remove_item(USER_KEY).await?;

        Ok(())
    }
}

/// The largest float that still holds every integer below it exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Write whole-number floats the way the server's JSON clients do (`1`, not
/// `1.0`) so the stored record reads the same as what was sent. Key order is
/// left alone.
#[expect(clippy::cast_possible_truncation)]
fn integral_numbers(value: &Value) -> Value {
    match value {
        Value::Number(number) => match number.as_f64() {
            Some(float)
                if number.is_f64() && float.fract() == 0.0 && float.abs() < MAX_SAFE_INTEGER =>
            {
                Value::from(float as i64)
            }
            _ => value.clone(),
        },
        Value::Array(items) => Value::Array(items.iter().map(integral_numbers).collect()),
        Value::Object(fields) => Value::Object(
            fields
                .iter()
                .map(|(key, field)| (key.clone(), integral_numbers(field)))
                .collect(),
        ),
        other => other.clone(),
    }
}
