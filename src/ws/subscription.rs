//! Per-connection follow list.
//!
//! A connection follows submitters; review events about anyone else are
//! dropped server-side. Who may be followed depends on the caller:
//! administrators may follow anyone or everyone, other users only
//! themselves.

use std::collections::HashSet;

use crate::domain::{Caller, UserId};
use crate::error::DeskError;

/// Follow list for a single WebSocket connection.
#[derive(Debug)]
pub struct FollowList {
    caller: Caller,
    /// Followed user IDs. Ignored while `everyone` is set.
    user_ids: HashSet<UserId>,
    /// Set by the `"*"` wildcard.
    everyone: bool,
}

impl FollowList {
    /// Creates an empty follow list for `caller`.
    #[must_use]
    pub fn new(caller: Caller) -> Self {
        Self {
            caller,
            user_ids: HashSet::new(),
            everyone: false,
        }
    }

    /// Whether `caller` may follow `ids` (and everyone, if `wildcard`).
    #[must_use]
    pub fn may_follow(&self, ids: &[UserId], wildcard: bool) -> bool {
        self.caller.is_admin || (!wildcard && ids.iter().all(|id| *id == self.caller.user_id))
    }

    /// Starts following `ids`, and everyone when `wildcard` is set.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::Forbidden`] when a non-administrator asks for
    /// anyone but themselves; the list is left unchanged.
    pub fn follow(&mut self, ids: &[UserId], wildcard: bool) -> Result<(), DeskError> {
        if !self.may_follow(ids, wildcard) {
            return Err(DeskError::Forbidden);
        }
        self.everyone |= wildcard;
        self.user_ids.extend(ids.iter().copied());
        Ok(())
    }

    /// Stops following `ids`; `wildcard` clears the everyone flag.
    pub fn unfollow(&mut self, ids: &[UserId], wildcard: bool) {
        if wildcard {
            self.everyone = false;
        }
        for id in ids {
            self.user_ids.remove(id);
        }
    }

    /// Whether events about `user_id` go to this connection.
    #[must_use]
    pub fn matches(&self, user_id: UserId) -> bool {
        self.everyone || self.user_ids.contains(&user_id)
    }

    /// Number of explicitly followed users.
    #[must_use]
    pub fn count(&self) -> usize {
        self.user_ids.len()
    }

    /// Whether the wildcard is active.
    #[must_use]
    pub const fn follows_everyone(&self) -> bool {
        self.everyone
    }
}
