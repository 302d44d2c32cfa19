use super::error::Result;
use super::{login, signup, Reply, Submission};
use url::Url;

/// Where the calendar backend lives unless told otherwise.
pub const DEFAULT_SERVER: &str = "https://sdk-calendar-be.onrender.com";

/// Client for the auth API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    /// The server to connect to. Should only be the protocol and domain, e.g.
    /// `https://calendar.your-domain.com`.
    pub server: String,
}

impl Client {
    /// Construct a new client
    pub fn new(server: String) -> Self {
        Self { server }
    }

    /// Create a new account.
    ///
    /// ## Errors
    ///
    /// Errors are the same as `handle_response`.
    pub async fn signup(&self, http: &reqwest::Client, req: &signup::Req) -> Result<Reply> {
        let url = Url::parse(&self.server)?.join(signup::PATH)?;

        Self::handle_response(http.post(url).json(req)).await
    }

    /// Log into an existing account.
    ///
    /// ## Errors
    ///
    /// Errors are the same as `handle_response`.
    pub async fn login(&self, http: &reqwest::Client, req: &login::Req) -> Result<Reply> {
        let url = Url::parse(&self.server)?.join(login::PATH)?;

        Self::handle_response(http.post(url).json(req)).await
    }

    /// Send whichever request the form produced to the matching endpoint.
    ///
    /// ## Errors
    ///
    /// Errors are the same as `handle_response`.
    pub async fn submit(&self, http: &reqwest::Client, submission: &Submission) -> Result<Reply> {
        match submission {
            Submission::Signup(req) => self.signup(http, req).await,
            Submission::Login(req) => self.login(http, req).await,
        }
    }

    /// Read the body of an HTTP response as a `Reply`. Both endpoints put
    /// their verdict in the body, so we read it whatever the status code is.
    ///
    /// ## Errors
    ///
    /// - `Error::Http` if we couldn't send the request or read the body
    /// - `Error::Json` or `Error::EmptyReply` if the body isn't a usable reply
    async fn handle_response(req: reqwest::RequestBuilder) -> Result<Reply> {
        let resp = req.send().await?;

        let status = resp.status();
        tracing::debug!(%status, url = %resp.url(), "got auth response");

        let body = resp.bytes().await?;

        Reply::from_slice(&body)
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new(DEFAULT_SERVER.to_string())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::auth::Error;
    use crate::test::{serve, Canned};
    use axum::http::StatusCode;
    use serde_json::json;

    #[test_log::test(tokio::test)]
    async fn signup_posts_all_fields() {
        let canned = Canned::new(StatusCode::OK, json!({"success": true}));
        let client = Client::new(serve(canned.router()).await);

        let req = signup::Req {
            phone_number: "5550100".to_string(),
            email: "a@example.com".to_string(),
            password: "hunter2".to_string(),
        };

        let reply = client.signup(&reqwest::Client::new(), &req).await.unwrap();

        assert!(reply.is_success());
        assert_eq!(
            canned.seen(),
            vec![(
                signup::PATH.to_string(),
                json!({"phoneNumber": "5550100", "email": "a@example.com", "password": "hunter2"})
            )]
        );
    }

    #[test_log::test(tokio::test)]
    async fn login_posts_phone_and_password() {
        let canned = Canned::new(StatusCode::OK, json!({"success": true}));
        let client = Client::new(serve(canned.router()).await);

        let req = Submission::Login(login::Req {
            phone_number: "5550100".to_string(),
            password: "hunter2".to_string(),
        });

        client.submit(&reqwest::Client::new(), &req).await.unwrap();

        assert_eq!(
            canned.seen(),
            vec![(
                login::PATH.to_string(),
                json!({"phoneNumber": "5550100", "password": "hunter2"})
            )]
        );
    }

    #[test_log::test(tokio::test)]
    async fn error_statuses_still_read_the_body() {
        let canned = Canned::new(
            StatusCode::UNAUTHORIZED,
            json!({"success": false, "message": "Invalid credentials"}),
        );
        let client = Client::new(serve(canned.router()).await);

        let req = login::Req {
            phone_number: "5550100".to_string(),
            password: "wrong".to_string(),
        };

        let reply = client.login(&reqwest::Client::new(), &req).await.unwrap();

        assert_eq!(reply.message(), Some("Invalid credentials".to_string()));
    }

    #[test_log::test(tokio::test)]
    async fn bad_server_url_is_an_error() {
        let client = Client::new("not a url".to_string());

        let req = login::Req {
            phone_number: String::new(),
            password: String::new(),
        };

        let err = client
            .login(&reqwest::Client::new(), &req)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::UrlParse(_)));
    }
}
