//! The identity behind an incoming call.

use super::UserId;

/// Authenticated caller, resolved from the identity header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    /// User making the call.
    pub user_id: UserId,
    /// Whether the user may review requests.
    pub is_admin: bool,
}

impl Caller {
    /// A regular submitter.
    #[must_use]
    pub const fn user(user_id: UserId) -> Self {
        Self {
            user_id,
            is_admin: false,
        }
    }

    /// An administrator.
    #[must_use]
    pub const fn admin(user_id: UserId) -> Self {
        Self {
            user_id,
            is_admin: true,
        }
    }

    /// Owner filter for listings: `None` (everything) for administrators,
    /// the caller's own id otherwise.
    #[must_use]
    pub const fn visibility(&self) -> Option<UserId> {
        if self.is_admin {
            None
        } else {
            Some(self.user_id)
        }
    }
}
