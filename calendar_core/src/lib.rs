//! Common code for calendar clients: talking to the auth API, the sign-up /
//! sign-in form, and keeping the resulting session around.

/// Talk to the auth API.
pub mod auth;

/// The sign-up / sign-in form.
pub mod form;
pub use form::AuthForm;

/// Iterable field enums for forms.
mod form_fields;

/// Submitting the form and acting on the result.
pub mod flow;
pub use flow::{Authenticator, Outcome};

/// The session we get after authenticating, and where we keep it.
pub mod session;
pub use session::Session;

/// Helpers shared by tests
#[cfg(test)]
mod test;
