use crate::auth::{Client, Submission};
use crate::form::{AuthForm, Blocked};
use crate::session::{Session, Storage};

/// What we show when we couldn't get a usable answer from the server.
pub const NETWORK_ERROR: &str = "Network error. Please check if the server is running.";

/// What we show when the server says no but doesn't say why.
pub const FALLBACK_ERROR: &str = "Authentication failed";

/// How a submission turned out.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The server accepted us and the session has been stored.
    Authenticated(Session),

    /// The server turned us down, with a message to show.
    Rejected(String),

    /// We couldn't get a usable answer. Bad connections, bad JSON, and
    /// failures to store the session all end up here.
    Unreachable,
}

impl Outcome {
    /// The error to show for this outcome, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Authenticated(_) => None,
            Self::Rejected(message) => Some(message),
            Self::Unreachable => Some(NETWORK_ERROR),
        }
    }
}

/// Send a submission and, if the server accepts it, persist the session.
/// Storage is only written when the server reports success.
#[tracing::instrument(skip_all, fields(path = submission.path()))]
pub async fn authenticate<S: Storage>(
    http: &reqwest::Client,
    client: &Client,
    submission: &Submission,
    storage: &S,
) -> Outcome {
    let reply = match client.submit(http, submission).await {
        Ok(reply) => reply,
        Err(err) => {
            tracing::warn!(?err, "could not reach the auth server");
            return Outcome::Unreachable;
        }
    };

    if !reply.is_success() {
        let message = reply
            .message()
            .unwrap_or_else(|| FALLBACK_ERROR.to_string());

        tracing::info!(%message, "auth server rejected the request");
        return Outcome::Rejected(message);
    }

    let session = match reply.session() {
        Ok(session) => session,
        Err(err) => {
            tracing::warn!(?err, "auth server reported success without a session");
            return Outcome::Unreachable;
        }
    };

    if let Err(err) = session.persist(storage).await {
        tracing::error!(?err, "could not store the session");
        return Outcome::Unreachable;
    }

    tracing::info!("authenticated");
    Outcome::Authenticated(session)
}

/// A form wired up to a server and storage. Calls `on_auth_success` with the
/// token once per successful submission, after the session is stored.
pub struct Authenticator<S, F> {
    /// The form being filled in
    form: AuthForm,

    /// Where to send it
    client: Client,

    /// An HTTP client with reqwest
    http: reqwest::Client,

    /// Where the session goes
    storage: S,

    /// Who to tell when we've signed in
    on_auth_success: F,
}

impl<S, F> Authenticator<S, F>
where
    S: Storage,
    F: FnMut(&str),
{
    /// Start with a blank signup form.
    pub fn new(client: Client, http: reqwest::Client, storage: S, on_auth_success: F) -> Self {
        Self {
            form: AuthForm::default(),
            client,
            http,
            storage,
            on_auth_success,
        }
    }

    /// The form, for display.
    pub fn form(&self) -> &AuthForm {
        &self.form
    }

    /// The form, for editing.
    pub fn form_mut(&mut self) -> &mut AuthForm {
        &mut self.form
    }

    /// Where the session is stored.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Submit the form and wait for the result.
    ///
    /// ## Errors
    ///
    /// Returns `Blocked` if the form refused to submit. Failures talking to
    /// the server are not errors here; they're reported in the `Outcome` and
    /// on the form.
    pub async fn submit(&mut self) -> Result<Outcome, Blocked> {
        let submission = self.form.submit()?;

        let outcome = authenticate(&self.http, &self.client, &submission, &self.storage).await;
        self.form.settle(&outcome);

        if let Outcome::Authenticated(session) = &outcome {
            (self.on_auth_success)(&session.token);
        }

        Ok(outcome)
    }
}
