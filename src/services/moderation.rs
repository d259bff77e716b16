//! Moderation service
//!
//! The moderation core: turns inbound commands and text messages into state
//! changes and outbound platform calls. State lives in a [`ModerationStore`]
//! behind a mutex that is only ever held for short synchronous sections.

use std::sync::{Arc, Mutex, MutexGuard};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};
use crate::config::Settings;
use crate::middleware::{AuthMiddleware, KeywordFilter, RateLimitConfig};
use crate::models::{
    CommandEvent, CommandKind, InboundEvent, MessageContext, MuteDuration, Report, ReportSummary, Role,
    TextMessage, INVALID_DURATION_MESSAGE,
};
use crate::services::gateway::ChatGateway;
use crate::services::notification::NotificationService;
use crate::services::target::{resolve_target, ResolvedTarget};
use crate::state::{ChatToggles, Clock, ModerationStore, MuteStatus};
use crate::utils::errors::{ModBuddyError, Result};
use crate::utils::helpers::{fallback_user_label, format_timestamp, whole_minutes};
use crate::utils::logging::{log_auto_action, log_gateway_error, log_moderation_action, log_rejected_command};

const MUTE_USAGE: &str = "Usage: /mute <@username or user_id> <duration (e.g., 30m, 1h, 1d)>";
const UNMUTE_USAGE: &str = "Usage: /unmute <@username or user_id>";
const KICK_USAGE: &str = "Usage: /kick <@username or user_id> [reason]";
const REPORT_USAGE: &str =
    "Usage: /report <@username or user_id> <reason> OR reply to a message with /report <reason>";
const LIST_REPORTS_USAGE: &str = "Usage: /listreports [@username or user_id]";
const CLEAR_REPORTS_USAGE: &str = "Usage: /clearreports <@username or user_id>";

/// Anything that consumes inbound chat events
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle_event(&self, event: InboundEvent) -> Result<()>;
}

/// Report escalation thresholds
#[derive(Debug, Clone, Copy)]
pub struct ReportPolicy {
    pub mute_threshold: usize,
    pub kick_threshold: usize,
    pub auto_mute: MuteDuration,
}

/// What a new report total calls for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escalation {
    None,
    Mute,
    Kick,
}

impl ReportPolicy {
    /// Kick wins when both thresholds are reached
    pub fn escalation(&self, total_reports: usize) -> Escalation {
        if total_reports >= self.kick_threshold {
            Escalation::Kick
        } else if total_reports >= self.mute_threshold {
            Escalation::Mute
        } else {
            Escalation::None
        }
    }
}

fn tag(target: &ResolvedTarget) -> String {
    format!("@{} (ID: {})", target.label, target.user_id)
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "enabled"
    } else {
        "disabled"
    }
}

fn later(now: DateTime<Utc>, by: Duration) -> Result<DateTime<Utc>> {
    now.checked_add_signed(by)
        .ok_or_else(|| ModBuddyError::InvalidInput(INVALID_DURATION_MESSAGE.to_string()))
}

/// Chat moderation core
pub struct ModerationService {
    store: Mutex<ModerationStore>,
    notifier: NotificationService,
    clock: Arc<dyn Clock>,
    auth: AuthMiddleware,
    rate_limit: RateLimitConfig,
    keywords: KeywordFilter,
    spam_mute: Duration,
    policy: ReportPolicy,
}

impl ModerationService {
    pub fn new(settings: &Settings, gateway: Arc<dyn ChatGateway>, clock: Arc<dyn Clock>) -> Result<Self> {
        let spam = &settings.moderation.spam;
        let reports = &settings.moderation.reports;

        let defaults = ChatToggles {
            spam_protection: spam.enabled,
            auto_actions: reports.auto_actions_enabled,
        };
        let policy = ReportPolicy {
            mute_threshold: reports.mute_threshold,
            kick_threshold: reports.kick_threshold,
            auto_mute: reports.auto_mute()?,
        };

        info!(
            owner_id = settings.bot.owner_id,
            spam_protection = defaults.spam_protection,
            auto_actions = defaults.auto_actions,
            "Moderation service initialized"
        );

        Ok(Self {
            store: Mutex::new(ModerationStore::new(settings.bot.owner_id, defaults)),
            notifier: NotificationService::new(gateway),
            clock,
            auth: AuthMiddleware::new(settings.bot.owner_id),
            rate_limit: RateLimitConfig::try_from(spam)?,
            keywords: KeywordFilter::new(&spam.forbidden_keywords)?,
            spam_mute: spam.mute_duration()?,
            policy,
        })
    }

    fn store(&self) -> MutexGuard<'_, ModerationStore> {
        self.store.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn gateway(&self) -> &dyn ChatGateway {
        self.notifier.gateway().as_ref()
    }

    pub fn role(&self, chat_id: i64, user_id: i64) -> Role {
        self.store().role(chat_id, user_id)
    }

    pub fn mute_expiry(&self, chat_id: i64, user_id: i64) -> Option<DateTime<Utc>> {
        self.store().mute_expiry(chat_id, user_id)
    }

    pub fn reports(&self, chat_id: i64, user_id: i64) -> Vec<Report> {
        self.store().reports(chat_id, user_id).to_vec()
    }

    pub fn reported_users(&self, chat_id: i64) -> Vec<ReportSummary> {
        self.store().reported_users(chat_id)
    }

    pub fn toggles(&self, chat_id: i64) -> ChatToggles {
        self.store().toggles(chat_id)
    }

    pub fn policy(&self) -> &ReportPolicy {
        &self.policy
    }

    /// Run a command, answering the caller when it is rejected
    pub async fn handle_command(&self, event: CommandEvent) -> Result<()> {
        let context = &event.context;
        let args = &event.args;

        debug!(
            chat_id = context.chat_id,
            user_id = context.sender.id,
            command = event.command.name(),
            "Handling command"
        );

        let result = match event.command {
            CommandKind::Start => self.start(context).await,
            CommandKind::Help => self.help(context).await,
            CommandKind::SetAdmin => self.set_role(context, args, Role::Admin, event.command).await,
            CommandKind::SetModerator => self.set_role(context, args, Role::Moderator, event.command).await,
            CommandKind::RemovePermission => self.set_role(context, args, Role::User, event.command).await,
            CommandKind::Mute => self.mute(context, args).await,
            CommandKind::Unmute => self.unmute(context, args).await,
            CommandKind::Kick => self.kick(context, args).await,
            CommandKind::ToggleSpam => self.toggle_spam(context).await,
            CommandKind::Report => self.report(context, args).await,
            CommandKind::ListReports => self.list_reports(context, args).await,
            CommandKind::ClearReports => self.clear_reports(context, args).await,
            CommandKind::ToggleAutoActions => self.toggle_auto_actions(context).await,
        };

        match result {
            Ok(()) => Ok(()),
            Err(e) => match e.user_message() {
                Some(text) => {
                    log_rejected_command(context.chat_id, context.sender.id, event.command.name(), &e);
                    self.notifier.send(context.chat_id, text).await;
                    Ok(())
                }
                None => Err(e),
            },
        }
    }

    /// Spam guard followed by the mute check
    pub async fn handle_text(&self, message: TextMessage) -> Result<()> {
        let context = &message.context;
        let chat_id = context.chat_id;
        let sender = &context.sender;
        let now = self.clock.now();

        let role = self.role(chat_id, sender.id);
        let toggles = self.toggles(chat_id);

        if toggles.spam_protection && !role.is_privileged() {
            let verdict = self.store().record_message(chat_id, sender.id, now, &self.rate_limit);
            if verdict.is_exceeded() {
                self.notifier.delete(chat_id, context.message_id).await;
                let until = later(now, self.spam_mute)?;
                self.store().mute(chat_id, sender.id, until);

                let minutes = whole_minutes(u64::try_from(self.spam_mute.num_seconds()).unwrap_or(0));
                log_auto_action(chat_id, sender.id, "spam_mute", Some("rate limit exceeded"));
                self.notifier
                    .send(
                        chat_id,
                        &format!(
                            "User @{} has been automatically muted for {} minutes due to spamming.",
                            sender.handle(),
                            minutes
                        ),
                    )
                    .await;
                return Ok(());
            }

            if let Some(keyword) = self.keywords.find_match(&message.text) {
                debug!(chat_id = chat_id, user_id = sender.id, keyword = keyword, "Forbidden keyword matched");
                self.notifier.delete(chat_id, context.message_id).await;
                self.notifier
                    .send(
                        chat_id,
                        &format!("@{}, your message was removed due to forbidden content.", sender.handle()),
                    )
                    .await;
                return Ok(());
            }
        }

        let status = self.store().check_mute(chat_id, sender.id, now);
        match status {
            MuteStatus::Muted { until } => {
                debug!(chat_id = chat_id, user_id = sender.id, until = %until, "Suppressing message from muted user");
                self.notifier.delete(chat_id, context.message_id).await;
            }
            MuteStatus::Expired { expired_at } => {
                info!(chat_id = chat_id, user_id = sender.id, expired_at = %expired_at, "Mute expired");
            }
            MuteStatus::NotMuted => {}
        }

        Ok(())
    }

    async fn start(&self, context: &MessageContext) -> Result<()> {
        let role = self.role(context.chat_id, context.sender.id);
        self.notifier
            .send(context.chat_id, &format!("Hello! Your role is: {}", role))
            .await;
        Ok(())
    }

    async fn help(&self, context: &MessageContext) -> Result<()> {
        let mut text = String::from("Available commands:\n");
        for kind in CommandKind::ALL {
            text.push_str(&format!("/{} - {}\n", kind.name(), kind.description()));
        }
        self.notifier.send(context.chat_id, text.trim_end()).await;
        Ok(())
    }

    async fn set_role(&self, context: &MessageContext, args: &[String], role: Role, command: CommandKind) -> Result<()> {
        let chat_id = context.chat_id;
        let caller = context.sender.id;
        let caller_role = self.role(chat_id, caller);

        self.auth.check_grant(caller, caller_role, role)?;

        let usage = format!("Usage: /{} <@username or user_id>", command.name());
        let target = resolve_target(self.gateway(), context, args.first().map(String::as_str), &usage).await?;
        self.auth.check_role_target(caller, target.user_id)?;

        if self.auth.is_owner(target.user_id) {
            self.notifier.send(chat_id, "The bot owner is always an ADMIN.").await;
            return Ok(());
        }

        self.store().set_role(chat_id, target.user_id, role);
        log_moderation_action(chat_id, caller, "set_role", Some(target.user_id), Some(role.as_str()));

        self.notifier
            .send(
                chat_id,
                &format!("User @{} (ID: {}) role set to {}.", target.label, target.user_id, role),
            )
            .await;
        Ok(())
    }

    async fn mute(&self, context: &MessageContext, args: &[String]) -> Result<()> {
        let chat_id = context.chat_id;
        let caller = context.sender.id;
        let caller_role = self.role(chat_id, caller);

        self.auth.check_moderator(caller_role, "You are not authorized to mute users.")?;

        // replying to a message leaves only the duration as an argument
        let (target_arg, duration_arg) = if context.reply_to.is_some() {
            (None, args.last())
        } else if args.len() >= 2 {
            (args.first(), args.get(1))
        } else {
            (None, None)
        };
        let duration_arg = duration_arg.ok_or_else(|| ModBuddyError::InvalidInput(MUTE_USAGE.to_string()))?;

        let target = resolve_target(self.gateway(), context, target_arg.map(String::as_str), MUTE_USAGE).await?;
        let target_role = self.role(chat_id, target.user_id);
        self.auth.check_mute_target(caller, caller_role, target_role)?;

        let duration: MuteDuration = duration_arg.parse()?;
        let until = later(self.clock.now(), duration.as_duration())?;

        self.store().mute(chat_id, target.user_id, until);
        log_moderation_action(chat_id, caller, "mute", Some(target.user_id), Some(duration_arg.as_str()));

        self.notifier
            .send(chat_id, &format!("User {} has been muted for {}.", tag(&target), duration_arg))
            .await;
        Ok(())
    }

    async fn unmute(&self, context: &MessageContext, args: &[String]) -> Result<()> {
        let chat_id = context.chat_id;
        let caller = context.sender.id;

        self.auth
            .check_moderator(self.role(chat_id, caller), "You are not authorized to unmute users.")?;

        let target = resolve_target(self.gateway(), context, args.first().map(String::as_str), UNMUTE_USAGE).await?;

        let removed = self.store().unmute(chat_id, target.user_id);
        if !removed {
            return Err(ModBuddyError::NotFound(format!("User {} is not currently muted.", tag(&target))));
        }

        log_moderation_action(chat_id, caller, "unmute", Some(target.user_id), None);
        self.notifier
            .send(chat_id, &format!("User {} has been unmuted.", tag(&target)))
            .await;
        Ok(())
    }

    async fn kick(&self, context: &MessageContext, args: &[String]) -> Result<()> {
        let chat_id = context.chat_id;
        let caller = context.sender.id;

        self.auth
            .check_admin(self.role(chat_id, caller), "You are not authorized to kick users.")?;

        let (target_arg, reason) = if context.reply_to.is_some() {
            (None, args.join(" "))
        } else {
            let target_arg = args.first().ok_or_else(|| ModBuddyError::InvalidInput(KICK_USAGE.to_string()))?;
            (Some(target_arg.as_str()), args[1..].join(" "))
        };

        let target = resolve_target(self.gateway(), context, target_arg, KICK_USAGE).await?;
        let target_role = self.role(chat_id, target.user_id);
        self.auth.check_kick_target(caller, target.user_id, target_role)?;

        match self.gateway().kick_member(chat_id, target.user_id).await {
            Ok(()) => {
                log_moderation_action(chat_id, caller, "kick", Some(target.user_id), Some(reason.as_str()));
                let mut text = format!("User {} has been kicked.", tag(&target));
                if !reason.is_empty() {
                    text.push_str(&format!(" Reason: {}", reason));
                }
                self.notifier.send(chat_id, &text).await;
            }
            Err(e) => {
                log_gateway_error("kick_member", chat_id, &e);
                self.notifier
                    .send(chat_id, &format!("Failed to kick user @{}. Error: {}", target.label, e))
                    .await;
            }
        }
        Ok(())
    }

    async fn toggle_spam(&self, context: &MessageContext) -> Result<()> {
        let chat_id = context.chat_id;
        self.auth.check_admin(
            self.role(chat_id, context.sender.id),
            "You are not authorized to change spam protection settings.",
        )?;

        let enabled = self.store().toggle_spam_protection(chat_id);
        log_moderation_action(chat_id, context.sender.id, "toggle_spam", None, Some(on_off(enabled)));
        self.notifier
            .send(chat_id, &format!("Spam protection is now {}.", on_off(enabled)))
            .await;
        Ok(())
    }

    async fn report(&self, context: &MessageContext, args: &[String]) -> Result<()> {
        let chat_id = context.chat_id;
        let reporter = &context.sender;

        let (target_arg, reason) = if context.reply_to.is_some() {
            (None, args.join(" "))
        } else {
            let target_arg = args.first().ok_or_else(|| ModBuddyError::InvalidInput(REPORT_USAGE.to_string()))?;
            (Some(target_arg.as_str()), args[1..].join(" "))
        };
        if reason.trim().is_empty() {
            return Err(ModBuddyError::InvalidInput("Please provide a reason for your report.".to_string()));
        }

        let target = resolve_target(self.gateway(), context, target_arg, REPORT_USAGE).await?;
        let target_role = self.role(chat_id, target.user_id);
        self.auth.check_report_target(reporter.id, target.user_id, target_role)?;

        let report = Report {
            reporter_id: reporter.id,
            reporter_name: reporter.display_name().to_string(),
            reason: reason.clone(),
            timestamp: self.clock.now(),
        };
        let (total, admins, toggles) = {
            let mut store = self.store();
            let total = store.add_report(chat_id, target.user_id, report);
            (total, store.admins(chat_id), store.toggles(chat_id))
        };
        log_moderation_action(chat_id, reporter.id, "report", Some(target.user_id), Some(reason.as_str()));

        self.notifier
            .send(
                chat_id,
                &format!("Your report against {} has been submitted. Thank you.", tag(&target)),
            )
            .await;

        let notice = format!(
            "📢 New Report in Chat ID {}!\nReported User: {}\nReported By: @{} (ID: {})\nReason: {}\nTotal reports against @{}: {}",
            chat_id,
            tag(&target),
            reporter.display_name(),
            reporter.id,
            reason,
            target.label,
            total
        );
        self.notifier.notify_users(&admins, &notice).await;

        if toggles.auto_actions && !target_role.is_privileged() {
            self.escalate(chat_id, &target, total).await?;
        }
        Ok(())
    }

    async fn escalate(&self, chat_id: i64, target: &ResolvedTarget, total: usize) -> Result<()> {
        match self.policy.escalation(total) {
            Escalation::None => {}
            Escalation::Kick => match self.gateway().kick_member(chat_id, target.user_id).await {
                Ok(()) => {
                    self.store().clear_reports(chat_id, target.user_id);
                    log_auto_action(chat_id, target.user_id, "auto_kick", Some("report threshold reached"));
                    self.notifier
                        .send(
                            chat_id,
                            &format!(
                                "User {} has been automatically kicked due to receiving {} reports.",
                                tag(target),
                                total
                            ),
                        )
                        .await;
                }
                Err(e) => {
                    log_gateway_error("kick_member", chat_id, &e);
                    self.notifier
                        .send(
                            chat_id,
                            &format!("Attempted to auto-kick @{} but failed. Admins notified.", target.label),
                        )
                        .await;
                }
            },
            Escalation::Mute => {
                let until = later(self.clock.now(), self.policy.auto_mute.as_duration())?;
                self.store().mute(chat_id, target.user_id, until);
                log_auto_action(chat_id, target.user_id, "auto_mute", Some("report threshold reached"));
                self.notifier
                    .send(
                        chat_id,
                        &format!(
                            "User {} has been automatically muted for {} due to receiving {} reports.",
                            tag(target),
                            self.policy.auto_mute,
                            total
                        ),
                    )
                    .await;
            }
        }
        Ok(())
    }

    async fn list_reports(&self, context: &MessageContext, args: &[String]) -> Result<()> {
        let chat_id = context.chat_id;
        self.auth.check_admin(
            self.role(chat_id, context.sender.id),
            "You are not authorized to list reports.",
        )?;

        if args.is_empty() && context.reply_to.is_none() {
            return self.list_reported_users(chat_id).await;
        }

        let target =
            resolve_target(self.gateway(), context, args.first().map(String::as_str), LIST_REPORTS_USAGE).await?;
        let reports = self.reports(chat_id, target.user_id);
        if reports.is_empty() {
            return Err(ModBuddyError::NotFound(format!("No reports found for {}.", tag(&target))));
        }

        let mut text = format!("Reports for {}:\n", tag(&target));
        for (i, report) in reports.iter().enumerate() {
            text.push_str(&format!(
                "{}. Reported by: @{} (ID: {}) at {}\n   Reason: {}\n",
                i + 1,
                report.reporter_name,
                report.reporter_id,
                format_timestamp(report.timestamp),
                report.reason
            ));
        }
        self.notifier.send_chunked(chat_id, &text).await;
        Ok(())
    }

    async fn list_reported_users(&self, chat_id: i64) -> Result<()> {
        let reported = self.reported_users(chat_id);
        if reported.is_empty() {
            self.notifier
                .send(chat_id, "There are no pending reports in this chat.")
                .await;
            return Ok(());
        }

        let mut lines = Vec::with_capacity(reported.len());
        for summary in reported {
            let label = match self.gateway().lookup_member(chat_id, summary.user_id).await {
                Ok(name) => name,
                Err(_) => fallback_user_label(summary.user_id),
            };
            lines.push(format!("@{} ({} report(s))", label, summary.count));
        }

        let text = format!("Users with pending reports:\n{}", lines.join("\n"));
        self.notifier.send_chunked(chat_id, &text).await;
        Ok(())
    }

    async fn clear_reports(&self, context: &MessageContext, args: &[String]) -> Result<()> {
        let chat_id = context.chat_id;
        self.auth.check_admin(
            self.role(chat_id, context.sender.id),
            "You are not authorized to clear reports.",
        )?;

        let target =
            resolve_target(self.gateway(), context, args.first().map(String::as_str), CLEAR_REPORTS_USAGE).await?;

        let cleared = self.store().clear_reports(chat_id, target.user_id);
        if cleared == 0 {
            return Err(ModBuddyError::NotFound(format!("No reports found for {} to clear.", tag(&target))));
        }

        log_moderation_action(
            chat_id,
            context.sender.id,
            "clear_reports",
            Some(target.user_id),
            Some(cleared.to_string().as_str()),
        );
        self.notifier
            .send(chat_id, &format!("All reports for {} have been cleared.", tag(&target)))
            .await;
        Ok(())
    }

    async fn toggle_auto_actions(&self, context: &MessageContext) -> Result<()> {
        let chat_id = context.chat_id;
        self.auth.check_admin(
            self.role(chat_id, context.sender.id),
            "You are not authorized to change auto-action settings.",
        )?;

        let enabled = self.store().toggle_auto_actions(chat_id);
        log_moderation_action(chat_id, context.sender.id, "toggle_auto_actions", None, Some(on_off(enabled)));
        self.notifier
            .send(
                chat_id,
                &format!("Automatic actions based on reports are now {}.", on_off(enabled)),
            )
            .await;
        Ok(())
    }
}

#[async_trait]
impl EventHandler for ModerationService {
    async fn handle_event(&self, event: InboundEvent) -> Result<()> {
        match event {
            InboundEvent::Command(command) => self.handle_command(command).await,
            InboundEvent::Text(message) => self.handle_text(message).await,
        }
    }
}
