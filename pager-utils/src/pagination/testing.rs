//! Recording in-memory platform for session tests.

use std::sync::{
    Mutex,
    atomic::{AtomicU64, Ordering},
};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex as AsyncMutex, mpsc};
use twilight_model::{
    channel::message::embed::Embed,
    id::{
        Id,
        marker::{ChannelMarker, UserMarker},
    },
};

use super::platform::{
    MessageHandle, PaginationRequest, Platform, ReactionEvent, Reply, ReplyCheck,
};
use super::{Affordance, PlatformError};

pub const CHANNEL_ID: u64 = 1;
pub const REQUESTER_ID: u64 = 7;
pub const FIRST_MESSAGE_ID: u64 = 100;
pub const FIRST_REPLY_ID: u64 = 900;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    SendEmbed {
        message_id: u64,
        description: Option<String>,
        footer: Option<String>,
    },
    SendContent(String),
    Edit {
        message_id: u64,
        title: Option<String>,
        description: Option<String>,
        color: Option<u32>,
    },
    Delete(u64),
    AddReaction(Affordance),
    RemoveOwnReaction(Affordance),
    ClearReactions,
}

/// Error a mock call can be told to fail with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Failure {
    NotFound,
    Forbidden,
    Other,
}

impl Failure {
    fn error(self) -> PlatformError {
        match self {
            Self::NotFound => PlatformError::NotFound,
            Self::Forbidden => PlatformError::Forbidden,
            Self::Other => PlatformError::Other(anyhow::anyhow!("mock platform failure")),
        }
    }
}

fn outcome(failure: Option<Failure>) -> Result<(), PlatformError> {
    failure.map_or(Ok(()), |failure| Err(failure.error()))
}

struct QueuedReply {
    author_id: u64,
    message_id: u64,
    content: String,
}

struct QueuedReaction {
    message_id: u64,
    user_id: u64,
    glyph: String,
}

struct Queue<T> {
    tx: mpsc::UnboundedSender<T>,
    rx: AsyncMutex<mpsc::UnboundedReceiver<T>>,
}

impl<T> Queue<T> {
    fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx: AsyncMutex::new(rx),
        }
    }
}

pub struct MockPlatform {
    calls: Mutex<Vec<Call>>,
    next_message_id: AtomicU64,
    next_reply_id: AtomicU64,
    can_react: bool,
    clear_forbidden: bool,
    send_failure: Option<Failure>,
    edit_failure: Option<Failure>,
    delete_failure: Option<Failure>,
    reaction_delay: Duration,
    replies: Queue<QueuedReply>,
    added: Queue<QueuedReaction>,
    removed: Queue<QueuedReaction>,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            next_message_id: AtomicU64::new(FIRST_MESSAGE_ID),
            next_reply_id: AtomicU64::new(FIRST_REPLY_ID),
            can_react: true,
            clear_forbidden: false,
            send_failure: None,
            edit_failure: None,
            delete_failure: None,
            reaction_delay: Duration::ZERO,
            replies: Queue::new(),
            added: Queue::new(),
            removed: Queue::new(),
        }
    }

    pub fn without_reaction_permission(mut self) -> Self {
        self.can_react = false;
        self
    }

    pub fn with_forbidden_clear(mut self) -> Self {
        self.clear_forbidden = true;
        self
    }

    /// Make `send_embed` fail after recording the call.
    pub fn with_send_failure(mut self, failure: Failure) -> Self {
        self.send_failure = Some(failure);
        self
    }

    /// Make `edit_embed` fail after recording the call.
    pub fn with_edit_failure(mut self, failure: Failure) -> Self {
        self.edit_failure = Some(failure);
        self
    }

    /// Make `delete_message` fail after recording the call.
    pub fn with_delete_failure(mut self, failure: Failure) -> Self {
        self.delete_failure = Some(failure);
        self
    }

    /// Delay every reaction attachment, keeping attachment tasks pending.
    pub fn with_reaction_delay(mut self, delay: Duration) -> Self {
        self.reaction_delay = delay;
        self
    }

    pub fn request() -> PaginationRequest {
        PaginationRequest {
            channel_id: Id::new(CHANNEL_ID),
            requester_id: Id::new(REQUESTER_ID),
            requester_name: "alice".to_owned(),
            bot_avatar_url: None,
        }
    }

    /// Queue a reply from the requester.
    pub fn reply(&self, content: &str) {
        self.reply_as(REQUESTER_ID, content);
    }

    pub fn reply_as(&self, author_id: u64, content: &str) {
        let message_id = self.next_reply_id.fetch_add(1, Ordering::SeqCst);
        let _ = self.replies.tx.send(QueuedReply {
            author_id,
            message_id,
            content: content.to_owned(),
        });
    }

    /// Queue the requester adding `affordance` on the first sent message.
    pub fn react(&self, affordance: Affordance) {
        self.react_as(FIRST_MESSAGE_ID, REQUESTER_ID, affordance.glyph());
    }

    pub fn react_as(&self, message_id: u64, user_id: u64, glyph: &str) {
        let _ = self.added.tx.send(QueuedReaction {
            message_id,
            user_id,
            glyph: glyph.to_owned(),
        });
    }

    /// Queue the requester removing `affordance` from the first sent message.
    pub fn unreact(&self, affordance: Affordance) {
        let _ = self.removed.tx.send(QueuedReaction {
            message_id: FIRST_MESSAGE_ID,
            user_id: REQUESTER_ID,
            glyph: affordance.glyph().to_owned(),
        });
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn edits(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| matches!(call, Call::Edit { .. }))
            .collect()
    }

    pub fn edited_descriptions(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Edit { description, .. } => description,
                _ => None,
            })
            .collect()
    }

    pub fn deleted(&self) -> Vec<u64> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Delete(message_id) => Some(message_id),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|call| predicate(call)).count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn next_message(&self, channel_id: Id<ChannelMarker>) -> MessageHandle {
        let message_id = self.next_message_id.fetch_add(1, Ordering::SeqCst);
        MessageHandle::new(channel_id, Id::new(message_id))
    }

    async fn next_reaction(
        queue: &Queue<QueuedReaction>,
        message: MessageHandle,
        user_id: Id<UserMarker>,
    ) -> Result<Affordance, PlatformError> {
        let mut rx = queue.rx.lock().await;
        while let Some(reaction) = rx.recv().await {
            if reaction.message_id != message.message_id.get() || reaction.user_id != user_id.get()
            {
                continue;
            }
            if let Some(affordance) = Affordance::from_glyph(&reaction.glyph) {
                return Ok(affordance);
            }
        }

        Err(PlatformError::Closed)
    }
}

#[async_trait]
impl Platform for MockPlatform {
    async fn send_embed(
        &self,
        channel_id: Id<ChannelMarker>,
        embed: &Embed,
    ) -> Result<MessageHandle, PlatformError> {
        let message = self.next_message(channel_id);
        self.record(Call::SendEmbed {
            message_id: message.message_id.get(),
            description: embed.description.clone(),
            footer: embed.footer.as_ref().map(|footer| footer.text.clone()),
        });
        outcome(self.send_failure)?;
        Ok(message)
    }

    async fn send_content(
        &self,
        channel_id: Id<ChannelMarker>,
        content: &str,
    ) -> Result<MessageHandle, PlatformError> {
        let message = self.next_message(channel_id);
        self.record(Call::SendContent(content.to_owned()));
        Ok(message)
    }

    async fn edit_embed(
        &self,
        message: MessageHandle,
        embed: &Embed,
    ) -> Result<(), PlatformError> {
        self.record(Call::Edit {
            message_id: message.message_id.get(),
            title: embed.title.clone(),
            description: embed.description.clone(),
            color: embed.color,
        });
        outcome(self.edit_failure)
    }

    async fn delete_message(&self, message: MessageHandle) -> Result<(), PlatformError> {
        self.record(Call::Delete(message.message_id.get()));
        outcome(self.delete_failure)
    }

    async fn add_reaction(
        &self,
        _message: MessageHandle,
        affordance: Affordance,
    ) -> Result<(), PlatformError> {
        if !self.reaction_delay.is_zero() {
            tokio::time::sleep(self.reaction_delay).await;
        }
        self.record(Call::AddReaction(affordance));
        Ok(())
    }

    async fn remove_own_reaction(
        &self,
        _message: MessageHandle,
        affordance: Affordance,
    ) -> Result<(), PlatformError> {
        self.record(Call::RemoveOwnReaction(affordance));
        Ok(())
    }

    async fn clear_reactions(&self, _message: MessageHandle) -> Result<(), PlatformError> {
        self.record(Call::ClearReactions);
        if self.clear_forbidden {
            return Err(PlatformError::Forbidden);
        }
        Ok(())
    }

    async fn can_add_reactions(
        &self,
        _channel_id: Id<ChannelMarker>,
    ) -> Result<bool, PlatformError> {
        Ok(self.can_react)
    }

    async fn wait_for_reply(
        &self,
        channel_id: Id<ChannelMarker>,
        author_id: Id<UserMarker>,
        check: ReplyCheck,
    ) -> Result<Reply, PlatformError> {
        let mut rx = self.replies.rx.lock().await;
        while let Some(reply) = rx.recv().await {
            if reply.author_id == author_id.get() && check(&reply.content) {
                return Ok(Reply {
                    message: MessageHandle::new(channel_id, Id::new(reply.message_id)),
                    content: reply.content,
                });
            }
        }

        Err(PlatformError::Closed)
    }

    async fn wait_for_reaction(
        &self,
        message: MessageHandle,
        user_id: Id<UserMarker>,
        event: ReactionEvent,
    ) -> Result<Affordance, PlatformError> {
        let queue = match event {
            ReactionEvent::Added => &self.added,
            ReactionEvent::Removed => &self.removed,
        };

        Self::next_reaction(queue, message, user_id).await
    }
}
