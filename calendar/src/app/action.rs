use calendar_core::{Outcome, Session};
use crossterm::event::KeyEvent;

/// Things that can happen to this app
#[derive(Debug)]
pub enum Action {
    /// We looked for a stored session, and maybe found one
    LoadedSession(Option<Session>),

    /// A signup or login request finished
    Settled(Outcome),

    /// We forgot the stored session
    SignedOut,

    /// The user did something on the keyboard
    Key(KeyEvent),

    /// Something bad happened; display it to the user
    Problem(String),
}
