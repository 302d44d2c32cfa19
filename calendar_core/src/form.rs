use crate::auth::{login, signup, Submission};
use crate::flow::Outcome;
use crate::form_fields::form_fields;
use core::fmt::{self, Display, Formatter};

/// Which endpoint the form talks to, and therefore which fields it asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum Mode {
    /// Create a new account. Needs a phone number, email, and password.
    #[default]
    Signup,

    /// Sign into an existing account. Needs a phone number and password.
    Login,
}

impl Mode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            Self::Signup => Self::Login,
            Self::Login => Self::Signup,
        }
    }
}

form_fields!(
    /// The fields in the auth form, in display order.
    Field,
    /// Phone number (both modes)
    PhoneNumber,
    /// Email (signup only)
    Email,
    /// Password (both modes, masked when shown)
    Password
);

impl Field {
    /// A human-readable name for the field.
    pub fn label(self) -> &'static str {
        match self {
            Self::PhoneNumber => "Phone Number",
            Self::Email => "Email",
            Self::Password => "Password",
        }
    }

    /// Placeholder text to show while the field is empty.
    pub fn placeholder(self) -> &'static str {
        match self {
            Self::PhoneNumber => "Enter your phone number",
            Self::Email => "Enter your email",
            Self::Password => "Enter your password",
        }
    }

    /// Should we hide what's typed here?
    pub fn is_secret(self) -> bool {
        matches!(self, Self::Password)
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What's been typed into the form so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    /// Phone number, used to log in
    pub phone_number: String,

    /// Email, only sent when signing up
    pub email: String,

    /// Password, in plaintext until it's sent
    pub password: String,
}

impl FormData {
    /// Get the value of a field.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::PhoneNumber => &self.phone_number,
            Field::Email => &self.email,
            Field::Password => &self.password,
        }
    }

    /// Get a mutable reference to the value of a field.
    fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::PhoneNumber => &mut self.phone_number,
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
        }
    }
}

/// Why the form refused to submit. None of these change the form's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Blocked {
    /// We're already waiting on the server.
    #[error("Already waiting on the server")]
    InFlight,

    /// A required field is empty.
    #[error("Please fill out the {0} field")]
    Missing(Field),

    /// The email field has something in it, but it isn't an email address.
    #[error("Please enter an email address")]
    InvalidEmail,
}

/// A sign-up / sign-in form. This only tracks state: sending the request and
/// storing the result live in `flow`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthForm {
    /// Are we signing up or logging in?
    mode: Mode,

    /// What's been typed so far
    data: FormData,

    /// Are we waiting on the server? Submitting is refused while this is set.
    loading: bool,

    /// The error to show, if any
    error: Option<String>,
}

impl AuthForm {
    /// Make an empty form in the given mode.
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Which mode we're in.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// What's been typed so far.
    pub fn data(&self) -> &FormData {
        &self.data
    }

    /// Are we waiting on the server?
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The error to show, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The fields to show for the current mode, in display order.
    pub fn visible_fields(&self) -> &'static [Field] {
        match self.mode {
            Mode::Signup => &[Field::PhoneNumber, Field::Email, Field::Password],
            Mode::Login => &[Field::PhoneNumber, Field::Password],
        }
    }

    /// Does the current mode need this field filled in? Every visible field
    /// is required.
    pub fn is_required(&self, field: Field) -> bool {
        self.visible_fields().contains(&field)
    }

    /// Switch between signing up and logging in. This starts over with a
    /// blank form.
    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
        self.data = FormData::default();
        self.error = None;
    }

    /// Change the value of one field. Editing dismisses any error.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        *self.data.get_mut(field) = value.into();
        self.error = None;
    }

    /// Try to submit the form, producing the request to send.
    ///
    /// ## Errors
    ///
    /// Returns `Blocked` without touching the form if a request is already
    /// in flight or the fields aren't filled in properly.
    pub fn submit(&mut self) -> Result<Submission, Blocked> {
        if self.loading {
            return Err(Blocked::InFlight);
        }

        if let Some(field) = self
            .visible_fields()
            .iter()
            .find(|field| self.data.get(**field).is_empty())
        {
            return Err(Blocked::Missing(*field));
        }

        if self.mode == Mode::Signup && !looks_like_email(&self.data.email) {
            return Err(Blocked::InvalidEmail);
        }

        self.loading = true;
        self.error = None;

        Ok(match self.mode {
            Mode::Signup => Submission::Signup(signup::Req {
                phone_number: self.data.phone_number.clone(),
                email: self.data.email.clone(),
                password: self.data.password.clone(),
            }),
            Mode::Login => Submission::Login(login::Req {
                phone_number: self.data.phone_number.clone(),
                password: self.data.password.clone(),
            }),
        })
    }

    /// The request is over, one way or another. Stop loading and show what
    /// happened.
    pub fn settle(&mut self, outcome: &Outcome) {
        self.loading = false;
        self.error = outcome.message().map(str::to_string);
    }

    /// Big text at the top of the form.
    pub fn heading(&self) -> &'static str {
        match self.mode {
            Mode::Signup => "Welcome",
            Mode::Login => "Welcome Back",
        }
    }

    /// Smaller text under the heading.
    pub fn subheading(&self) -> &'static str {
        match self.mode {
            Mode::Signup => "Create your account to continue",
            Mode::Login => "Sign in to access your calendar",
        }
    }

    /// What the submit button says.
    pub fn submit_label(&self) -> &'static str {
        match (self.loading, self.mode) {
            (true, _) => "Processing...",
            (false, Mode::Signup) => "Create Account",
            (false, Mode::Login) => "Sign In",
        }
    }

    /// What the mode toggle says.
    pub fn toggle_label(&self) -> &'static str {
        match self.mode {
            Mode::Signup => "Already have an account? Sign In",
            Mode::Login => "Need an account? Sign Up",
        }
    }
}

/// Roughly what an email input accepts: something, an `@`, something, and no
/// whitespace anywhere.
fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}
