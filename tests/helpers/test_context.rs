//! Test context: a moderation service wired to a recording gateway and a
//! manually advanced clock

use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};
use chrono::{DateTime, Duration, TimeZone, Utc};
use ModBuddy::config::Settings;
use ModBuddy::models::{CommandEvent, CommandKind, InboundEvent, Mention, MessageContext, Participant, TextMessage};
use ModBuddy::services::{EventHandler, ModerationService};
use ModBuddy::state::ManualClock;

use super::recording_gateway::RecordingGateway;
use super::test_data::{test_settings, CHAT_ID};

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

pub struct TestContext {
    pub service: ModerationService,
    pub gateway: Arc<RecordingGateway>,
    pub clock: ManualClock,
    pub chat_id: i64,
    next_message_id: AtomicI32,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_settings(test_settings())
    }

    pub fn with_settings(settings: Settings) -> Self {
        let gateway = Arc::new(RecordingGateway::new());
        let clock = ManualClock::new(start_time());
        let service = ModerationService::new(&settings, gateway.clone(), Arc::new(clock.clone()))
            .expect("test settings are valid");

        Self {
            service,
            gateway,
            clock,
            chat_id: CHAT_ID,
            next_message_id: AtomicI32::new(1),
        }
    }

    pub fn in_chat(mut self, chat_id: i64) -> Self {
        self.chat_id = chat_id;
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        use ModBuddy::state::Clock;
        self.clock.now()
    }

    pub fn advance(&self, by: Duration) {
        self.clock.advance(by);
    }

    pub fn context(&self, sender: &Participant) -> MessageContext {
        MessageContext {
            chat_id: self.chat_id,
            message_id: self.next_message_id.fetch_add(1, Ordering::SeqCst),
            sender: sender.clone(),
            reply_to: None,
            mentions: Vec::new(),
        }
    }

    /// Message id the next event will carry
    pub fn peek_message_id(&self) -> i32 {
        self.next_message_id.load(Ordering::SeqCst)
    }

    pub async fn dispatch(&self, event: InboundEvent) {
        self.service
            .handle_event(event)
            .await
            .expect("event handling never fails in tests");
    }

    pub async fn command(&self, sender: &Participant, kind: CommandKind, args: &str) {
        let event = CommandEvent::new(kind, args, self.context(sender));
        self.dispatch(InboundEvent::Command(event)).await;
    }

    pub async fn command_replying(&self, sender: &Participant, kind: CommandKind, args: &str, reply_to: &Participant) {
        let mut context = self.context(sender);
        context.reply_to = Some(reply_to.clone());
        let event = CommandEvent::new(kind, args, context);
        self.dispatch(InboundEvent::Command(event)).await;
    }

    pub async fn command_mentioning(&self, sender: &Participant, kind: CommandKind, args: &str, mention: Mention) {
        let mut context = self.context(sender);
        context.mentions.push(mention);
        let event = CommandEvent::new(kind, args, context);
        self.dispatch(InboundEvent::Command(event)).await;
    }

    pub async fn text(&self, sender: &Participant, text: &str) {
        let message = TextMessage {
            text: text.to_string(),
            context: self.context(sender),
        };
        self.dispatch(InboundEvent::Text(message)).await;
    }

    pub fn last_reply(&self) -> String {
        self.gateway.last_sent(self.chat_id).unwrap_or_default()
    }
}
