//! Moderation state store
//!
//! Process-local state of the moderation core: roles, mute expiries, report
//! logs, rate-limit windows and per-chat toggles, all keyed by chat and
//! user. Nothing here is persisted; the store is lost on restart.

use std::collections::HashMap;
use chrono::{DateTime, Utc};
use tracing::debug;
use crate::middleware::rate_limit::{RateLimitConfig, RateLimitVerdict, RateWindow};
use crate::models::{Report, ReportSummary, Role};

/// (chat_id, user_id)
pub type MemberKey = (i64, i64);

/// Per-chat switches flipped by admins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatToggles {
    pub spam_protection: bool,
    pub auto_actions: bool,
}

impl Default for ChatToggles {
    fn default() -> Self {
        Self {
            spam_protection: true,
            auto_actions: true,
        }
    }
}

/// Mute state observed for one message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MuteStatus {
    NotMuted,
    Muted { until: DateTime<Utc> },
    /// The record had expired and has just been removed
    Expired { expired_at: DateTime<Utc> },
}

/// In-memory moderation state
#[derive(Debug, Clone)]
pub struct ModerationStore {
    owner_id: i64,
    default_toggles: ChatToggles,
    roles: HashMap<MemberKey, Role>,
    mutes: HashMap<MemberKey, DateTime<Utc>>,
    reports: HashMap<MemberKey, Vec<Report>>,
    windows: HashMap<MemberKey, RateWindow>,
    toggles: HashMap<i64, ChatToggles>,
}

impl ModerationStore {
    pub fn new(owner_id: i64, default_toggles: ChatToggles) -> Self {
        Self {
            owner_id,
            default_toggles,
            roles: HashMap::new(),
            mutes: HashMap::new(),
            reports: HashMap::new(),
            windows: HashMap::new(),
            toggles: HashMap::new(),
        }
    }

    // ---- roles ----

    /// Role of a member; USER when never assigned, ADMIN for the owner
    pub fn role(&self, chat_id: i64, user_id: i64) -> Role {
        if user_id == self.owner_id {
            return Role::Admin;
        }
        self.roles.get(&(chat_id, user_id)).copied().unwrap_or_default()
    }

    pub fn is_admin(&self, chat_id: i64, user_id: i64) -> bool {
        self.role(chat_id, user_id).is_admin()
    }

    pub fn is_moderator(&self, chat_id: i64, user_id: i64) -> bool {
        self.role(chat_id, user_id).is_moderator()
    }

    /// Store a role and return the previous one.
    ///
    /// USER removes the assignment. The owner's role is fixed and never stored.
    pub fn set_role(&mut self, chat_id: i64, user_id: i64, role: Role) -> Role {
        let previous = self.role(chat_id, user_id);
        if user_id == self.owner_id {
            return previous;
        }

        match role {
            Role::User => {
                self.roles.remove(&(chat_id, user_id));
            }
            _ => {
                self.roles.insert((chat_id, user_id), role);
            }
        }
        debug!(chat_id = chat_id, user_id = user_id, role = %role, "Role stored");
        previous
    }

    /// Everyone who is ADMIN in the chat, owner first
    pub fn admins(&self, chat_id: i64) -> Vec<i64> {
        let mut admins: Vec<i64> = self
            .roles
            .iter()
            .filter(|((chat, user), role)| *chat == chat_id && role.is_admin() && *user != self.owner_id)
            .map(|((_, user), _)| *user)
            .collect();
        admins.sort_unstable();
        admins.insert(0, self.owner_id);
        admins
    }

    // ---- mutes ----

    pub fn mute(&mut self, chat_id: i64, user_id: i64, until: DateTime<Utc>) {
        self.mutes.insert((chat_id, user_id), until);
    }

    /// Remove a mute record; false when there was none
    pub fn unmute(&mut self, chat_id: i64, user_id: i64) -> bool {
        self.mutes.remove(&(chat_id, user_id)).is_some()
    }

    pub fn mute_expiry(&self, chat_id: i64, user_id: i64) -> Option<DateTime<Utc>> {
        self.mutes.get(&(chat_id, user_id)).copied()
    }

    /// Check the mute record at `now`, lazily removing it once expired
    pub fn check_mute(&mut self, chat_id: i64, user_id: i64, now: DateTime<Utc>) -> MuteStatus {
        match self.mutes.get(&(chat_id, user_id)).copied() {
            None => MuteStatus::NotMuted,
            Some(until) if now < until => MuteStatus::Muted { until },
            Some(until) => {
                self.mutes.remove(&(chat_id, user_id));
                MuteStatus::Expired { expired_at: until }
            }
        }
    }

    // ---- rate limiting ----

    /// Record one message in the member's trailing window.
    ///
    /// Windows of other members that have gone quiet are dropped on the way.
    pub fn record_message(
        &mut self,
        chat_id: i64,
        user_id: i64,
        now: DateTime<Utc>,
        config: &RateLimitConfig,
    ) -> RateLimitVerdict {
        self.windows.retain(|_, window| !config.prune(window, now).is_empty());
        let window = self.windows.entry((chat_id, user_id)).or_default();
        config.record(window, now)
    }

    // ---- reports ----

    /// Append a report and return the running total for the target
    pub fn add_report(&mut self, chat_id: i64, target_id: i64, report: Report) -> usize {
        let reports = self.reports.entry((chat_id, target_id)).or_default();
        reports.push(report);
        reports.len()
    }

    pub fn reports(&self, chat_id: i64, target_id: i64) -> &[Report] {
        self.reports
            .get(&(chat_id, target_id))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Wipe a target's reports and return how many there were
    pub fn clear_reports(&mut self, chat_id: i64, target_id: i64) -> usize {
        self.reports
            .remove(&(chat_id, target_id))
            .map(|reports| reports.len())
            .unwrap_or(0)
    }

    /// Users with at least one report, in order of their first report
    pub fn reported_users(&self, chat_id: i64) -> Vec<ReportSummary> {
        let mut reported: Vec<(DateTime<Utc>, ReportSummary)> = self
            .reports
            .iter()
            .filter(|((chat, _), reports)| *chat == chat_id && !reports.is_empty())
            .map(|((_, user_id), reports)| {
                (
                    reports[0].timestamp,
                    ReportSummary {
                        user_id: *user_id,
                        count: reports.len(),
                    },
                )
            })
            .collect();
        reported.sort_by_key(|(first, summary)| (*first, summary.user_id));
        reported.into_iter().map(|(_, summary)| summary).collect()
    }

    // ---- toggles ----

    pub fn toggles(&self, chat_id: i64) -> ChatToggles {
        self.toggles.get(&chat_id).copied().unwrap_or(self.default_toggles)
    }

    /// Flip spam protection for a chat and return the new state
    pub fn toggle_spam_protection(&mut self, chat_id: i64) -> bool {
        let defaults = self.default_toggles;
        let toggles = self.toggles.entry(chat_id).or_insert(defaults);
        toggles.spam_protection = !toggles.spam_protection;
        toggles.spam_protection
    }

    /// Flip automatic report actions for a chat and return the new state
    pub fn toggle_auto_actions(&mut self, chat_id: i64) -> bool {
        let defaults = self.default_toggles;
        let toggles = self.toggles.entry(chat_id).or_insert(defaults);
        toggles.auto_actions = !toggles.auto_actions;
        toggles.auto_actions
    }
}
