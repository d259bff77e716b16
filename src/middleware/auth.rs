//! Authorization middleware
//!
//! Role-based checks guarding every moderation command. Each check returns
//! `PermissionDenied` carrying the text shown to the caller.

use tracing::debug;
use crate::models::Role;
use crate::utils::errors::{ModBuddyError, Result};

/// Role authorization rules
#[derive(Debug, Clone)]
pub struct AuthMiddleware {
    owner_id: i64,
}

fn denied(text: &str) -> ModBuddyError {
    ModBuddyError::PermissionDenied(text.to_string())
}

impl AuthMiddleware {
    /// Create a new AuthMiddleware instance
    pub fn new(owner_id: i64) -> Self {
        Self { owner_id }
    }

    /// Check if user is the bot owner
    pub fn is_owner(&self, user_id: i64) -> bool {
        user_id == self.owner_id
    }

    /// Require ADMIN, rejecting with `text`
    pub fn check_admin(&self, caller_role: Role, text: &str) -> Result<()> {
        if caller_role.is_admin() {
            Ok(())
        } else {
            Err(denied(text))
        }
    }

    /// Require MODERATOR or ADMIN, rejecting with `text`
    pub fn check_moderator(&self, caller_role: Role, text: &str) -> Result<()> {
        if caller_role.is_moderator() {
            Ok(())
        } else {
            Err(denied(text))
        }
    }

    /// Whether the caller may grant `role` at all
    pub fn check_grant(&self, caller_id: i64, caller_role: Role, role: Role) -> Result<()> {
        match role {
            Role::Admin if !(caller_role.is_admin() || self.is_owner(caller_id)) => {
                Err(denied("Only the bot owner or an Admin can set other admins."))
            }
            Role::Moderator if !caller_role.is_admin() => {
                Err(denied("You are not authorized to set this role."))
            }
            Role::User if !caller_role.is_admin() => {
                Err(denied("You are not authorized to remove permissions."))
            }
            _ => Ok(()),
        }
    }

    /// Only the owner may change anything about the owner's role
    pub fn check_role_target(&self, caller_id: i64, target_id: i64) -> Result<()> {
        if self.is_owner(target_id) && !self.is_owner(caller_id) {
            debug!(caller_id = caller_id, "Attempt to change the owner's role");
            return Err(denied("Cannot change the role of the bot owner."));
        }
        Ok(())
    }

    /// Target-dependent mute rules; the caller is already known to be a moderator
    pub fn check_mute_target(&self, caller_id: i64, caller_role: Role, target_role: Role) -> Result<()> {
        match target_role {
            Role::Admin if !self.is_owner(caller_id) => {
                Err(denied("Admins cannot be muted by non-owner Admins or Moderators."))
            }
            Role::Moderator if !caller_role.is_admin() => {
                Err(denied("Moderators cannot mute other Moderators."))
            }
            _ => Ok(()),
        }
    }

    /// Target-dependent kick rules; the caller is already known to be an admin
    pub fn check_kick_target(&self, caller_id: i64, target_id: i64, target_role: Role) -> Result<()> {
        if self.is_owner(caller_id) {
            return Ok(());
        }
        if self.is_owner(target_id) {
            return Err(denied("The bot owner cannot be kicked."));
        }
        if target_role.is_admin() {
            return Err(denied("Admins cannot kick other Admins unless you are the Bot Owner."));
        }
        Ok(())
    }

    /// Reports against yourself or privileged users are refused
    pub fn check_report_target(&self, reporter_id: i64, target_id: i64, target_role: Role) -> Result<()> {
        if reporter_id == target_id {
            return Err(denied("You cannot report yourself."));
        }
        if target_role.is_privileged() {
            return Err(denied("You cannot report Admins or Moderators."));
        }
        Ok(())
    }
}
