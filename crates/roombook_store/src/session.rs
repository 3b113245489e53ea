use roombook_slots::policy::Role;
use std::fmt;

/// An authenticated session with the booking store.
///
/// Created by a successful login and dropped at logout; the token is passed
/// explicitly to every store call that needs it.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    role: Role,
}

impl Session {
    pub fn new(token: impl Into<String>, role: Role) -> Self {
        Self {
            token: token.into(),
            role,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn may_delete_bookings(&self) -> bool {
        self.role.may_delete_bookings()
    }
}

// Tokens stay out of logs.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}
