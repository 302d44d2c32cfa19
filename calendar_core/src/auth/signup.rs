use serde::{Deserialize, Serialize};

/// The request to create a new account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Req {
    /// Phone number, which is also what you log in with later.
    pub phone_number: String,

    /// Email to use for contact.
    pub email: String,

    /// Plaintext password to use for login.
    pub password: String,
}

/// Where the signup endpoint lives.
pub const PATH: &str = "/api/auth/signup";
