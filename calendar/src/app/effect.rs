use super::Action;
use crate::config::Config;
use calendar_core::{
    auth::{Client, Submission},
    flow,
    session::{self, FileStorage},
    Session,
};

/// Connections to external services that effects use. We keep these around
/// to have some level of connection sharing for the app as a whole.
pub struct EffectContext {
    /// an HTTP client with reqwest
    http: reqwest::Client,

    /// Where to send auth requests
    client: Client,

    /// Where the session lives between runs
    storage: FileStorage,
}

impl EffectContext {
    /// Get a new `EffectContext` for the configured server and data directory
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            client: Client::new(config.server.clone()),
            storage: FileStorage::new(config.data_dir()),
        }
    }
}

/// Things that can happen as a result of user input. Side effects!
#[derive(Debug)]
pub enum Effect {
    /// See if we signed in on a previous run
    LoadSession,

    /// Send a signup or login request, storing the session if it works
    Authenticate(Submission),

    /// Forget the stored session
    SignOut,
}

impl Effect {
    /// Perform the side-effectful portions of this effect, returning the next
    /// `Action` the application needs to handle
    pub async fn run(self, conn: &EffectContext) -> Option<Action> {
        match self.run_inner(conn).await {
            Ok(action) => action,
            Err(problem) => {
                tracing::error!(?problem, "problem running effect");
                Some(Action::Problem(problem.to_string()))
            }
        }
    }

    /// The actual implementation of `run`, but with a `Result` wrapper to make
    /// it more ergonomic to write.
    async fn run_inner(self, conn: &EffectContext) -> Result<Option<Action>, Problem> {
        match self {
            Self::LoadSession => {
                tracing::debug!("loading session");

                match Session::load(&conn.storage).await {
                    Ok(session) => Ok(Some(Action::LoadedSession(session))),
                    Err(err) => {
                        // A session we can't read is as good as no session.
                        // Signing in again will overwrite it.
                        tracing::warn!(?err, "ignoring unreadable session");
                        Ok(Some(Action::LoadedSession(None)))
                    }
                }
            }

            Self::Authenticate(submission) => {
                tracing::info!(path = submission.path(), "authenticating");

                let outcome =
                    flow::authenticate(&conn.http, &conn.client, &submission, &conn.storage)
                        .await;

                Ok(Some(Action::Settled(outcome)))
            }

            Self::SignOut => {
                tracing::info!("signing out");

                Session::clear(&conn.storage).await?;

                Ok(Some(Action::SignedOut))
            }
        }
    }
}

/// Problems that can happen while running an `Effect`.
#[derive(Debug, thiserror::Error)]
pub enum Problem {
    /// We had a problem reading or writing the stored session, for example
    /// with permissions.
    #[error("Problem with the stored session: {0}")]
    Session(#[from] session::Error),
}
