/// Things that can go wrong in the API
pub mod error;
pub use error::Error;

/// Client for the auth API
pub mod client;
pub use client::Client;

/// Create a new account
pub mod signup;

/// Log into an existing account
pub mod login;

/// What the server sends back from either endpoint
pub mod reply;
pub use reply::Reply;

/// A request shaped for one endpoint or the other
pub mod submission;
pub use submission::Submission;
