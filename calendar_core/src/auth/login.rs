use serde::{Deserialize, Serialize};

/// The request to log into the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Req {
    /// Phone number the account was created with.
    pub phone_number: String,

    /// Plaintext password to use for login.
    pub password: String,
}

/// Where the login endpoint lives.
pub const PATH: &str = "/api/auth/login";
