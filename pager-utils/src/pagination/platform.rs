//! The chat-platform operations a pagination session depends on.

use std::sync::Arc;

use async_trait::async_trait;
use twilight_model::{
    channel::message::embed::Embed,
    id::{
        Id,
        marker::{ChannelMarker, MessageMarker, UserMarker},
    },
};

use super::{Affordance, PlatformError};

/// Shared handle to the platform, used by sessions and their background tasks.
pub type SharedPlatform = Arc<dyn Platform>;

/// Predicate applied to the content of candidate replies.
pub type ReplyCheck = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// Location of a message the session created or observed.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct MessageHandle {
    pub channel_id: Id<ChannelMarker>,
    pub message_id: Id<MessageMarker>,
}

impl MessageHandle {
    pub const fn new(channel_id: Id<ChannelMarker>, message_id: Id<MessageMarker>) -> Self {
        Self {
            channel_id,
            message_id,
        }
    }
}

/// A typed reply that satisfied a [`ReplyCheck`].
#[derive(Clone, Debug)]
pub struct Reply {
    pub message: MessageHandle,
    pub content: String,
}

/// Which reaction gateway event a wait listens for.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReactionEvent {
    Added,
    Removed,
}

/// Who asked for the session and where it runs.
#[derive(Clone, Debug)]
pub struct PaginationRequest {
    pub channel_id: Id<ChannelMarker>,
    pub requester_id: Id<UserMarker>,
    /// Display name stamped into page footers.
    pub requester_name: String,
    /// Bot avatar, used as the default selection thumbnail.
    pub bot_avatar_url: Option<String>,
}

/// Message, reaction, permission and event-wait primitives of the host platform.
///
/// Every call may fail with [`PlatformError::NotFound`] or
/// [`PlatformError::Forbidden`]; sessions treat both as non-fatal.
#[async_trait]
pub trait Platform: Send + Sync {
    async fn send_embed(
        &self,
        channel_id: Id<ChannelMarker>,
        embed: &Embed,
    ) -> Result<MessageHandle, PlatformError>;

    async fn send_content(
        &self,
        channel_id: Id<ChannelMarker>,
        content: &str,
    ) -> Result<MessageHandle, PlatformError>;

    async fn edit_embed(&self, message: MessageHandle, embed: &Embed)
    -> Result<(), PlatformError>;

    async fn delete_message(&self, message: MessageHandle) -> Result<(), PlatformError>;

    async fn add_reaction(
        &self,
        message: MessageHandle,
        affordance: Affordance,
    ) -> Result<(), PlatformError>;

    /// Remove the bot's own reaction for `affordance`.
    async fn remove_own_reaction(
        &self,
        message: MessageHandle,
        affordance: Affordance,
    ) -> Result<(), PlatformError>;

    async fn clear_reactions(&self, message: MessageHandle) -> Result<(), PlatformError>;

    /// Whether the bot may add reactions in `channel_id`.
    async fn can_add_reactions(&self, channel_id: Id<ChannelMarker>)
    -> Result<bool, PlatformError>;

    /// Wait for the next message by `author_id` in `channel_id` passing `check`.
    ///
    /// Non-matching messages are skipped. Dropping the future cancels the wait.
    async fn wait_for_reply(
        &self,
        channel_id: Id<ChannelMarker>,
        author_id: Id<UserMarker>,
        check: ReplyCheck,
    ) -> Result<Reply, PlatformError>;

    /// Wait for `user_id` to add or remove a recognised affordance on `message`.
    ///
    /// Reactions by others, on other messages, or with other emoji are skipped.
    /// Dropping the future cancels the wait.
    async fn wait_for_reaction(
        &self,
        message: MessageHandle,
        user_id: Id<UserMarker>,
        event: ReactionEvent,
    ) -> Result<Affordance, PlatformError>;
}
