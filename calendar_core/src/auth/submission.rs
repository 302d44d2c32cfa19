use super::{login, signup};

/// A request for one of the two auth endpoints. Which one we send depends on
/// the mode the form was in when it was submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Create an account
    Signup(signup::Req),

    /// Log into an existing account
    Login(login::Req),
}

impl Submission {
    /// The path of the endpoint this submission goes to.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Signup(_) => signup::PATH,
            Self::Login(_) => login::PATH,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn login_payload_has_no_email() {
        let req = login::Req {
            phone_number: "5550100".to_string(),
            password: "hunter2".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            serde_json::json!({"phoneNumber": "5550100", "password": "hunter2"})
        );
    }

    #[test]
    fn signup_payload_has_all_fields() {
        let req = signup::Req {
            phone_number: "5550100".to_string(),
            email: "a@example.com".to_string(),
            password: "hunter2".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            serde_json::json!({
                "phoneNumber": "5550100",
                "email": "a@example.com",
                "password": "hunter2",
            })
        );
    }

    #[test]
    fn paths_follow_mode() {
        let login = Submission::Login(login::Req {
            phone_number: String::new(),
            password: String::new(),
        });

        assert_eq!(login.path(), "/api/auth/login");
    }
}
