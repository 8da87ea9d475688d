//! [`Platform`] backed by the Discord REST API and gateway event waits.

use std::sync::Arc;

use async_trait::async_trait;
use twilight_http::{Client, request::channel::reaction::RequestReactionType};
use twilight_model::{
    channel::message::{EmojiReactionType, embed::Embed},
    gateway::{
        GatewayReaction,
        event::Event,
        payload::incoming::MessageCreate,
    },
    guild::Permissions,
    id::{
        Id,
        marker::{ChannelMarker, MessageMarker, UserMarker},
    },
};
use twilight_standby::Standby;

use super::platform::{MessageHandle, Platform, ReactionEvent, Reply, ReplyCheck};
use super::{Affordance, PlatformError};
use crate::permissions::has_channel_permission;

/// Discord implementation of the pagination platform.
///
/// Event waits go through a shared [`Standby`]; the gateway loop must feed
/// every event into [`Standby::process`] for them to resolve.
#[derive(Clone)]
pub struct DiscordPlatform {
    http: Arc<Client>,
    standby: Arc<Standby>,
    bot_user_id: Id<UserMarker>,
}

impl DiscordPlatform {
    pub fn new(http: Arc<Client>, standby: Arc<Standby>, bot_user_id: Id<UserMarker>) -> Self {
        Self {
            http,
            standby,
            bot_user_id,
        }
    }
}

fn reaction_emoji(affordance: Affordance) -> RequestReactionType<'static> {
    RequestReactionType::Unicode {
        name: affordance.glyph(),
    }
}

/// Affordance for a gateway reaction on `message_id` by `user_id`, if any.
fn matching_affordance(
    reaction: &GatewayReaction,
    message_id: Id<MessageMarker>,
    user_id: Id<UserMarker>,
) -> Option<Affordance> {
    if reaction.message_id != message_id || reaction.user_id != user_id {
        return None;
    }

    emoji_affordance(&reaction.emoji)
}

fn emoji_affordance(emoji: &EmojiReactionType) -> Option<Affordance> {
    match emoji {
        EmojiReactionType::Unicode { name } => Affordance::from_glyph(name),
        EmojiReactionType::Custom { .. } => None,
    }
}

fn event_affordance(
    event: &Event,
    kind: ReactionEvent,
    message_id: Id<MessageMarker>,
    user_id: Id<UserMarker>,
) -> Option<Affordance> {
    match (kind, event) {
        (ReactionEvent::Added, Event::ReactionAdd(reaction)) => {
            matching_affordance(&reaction.0, message_id, user_id)
        }
        (ReactionEvent::Removed, Event::ReactionRemove(reaction)) => {
            matching_affordance(&reaction.0, message_id, user_id)
        }
        _ => None,
    }
}

#[async_trait]
impl Platform for DiscordPlatform {
    async fn send_embed(
        &self,
        channel_id: Id<ChannelMarker>,
        embed: &Embed,
    ) -> Result<MessageHandle, PlatformError> {
        let message = self
            .http
            .create_message(channel_id)
            .embeds(std::slice::from_ref(embed))
            .await?
            .model()
            .await
            .map_err(anyhow::Error::from)?;

        Ok(MessageHandle::new(message.channel_id, message.id))
    }

    async fn send_content(
        &self,
        channel_id: Id<ChannelMarker>,
        content: &str,
    ) -> Result<MessageHandle, PlatformError> {
        let message = self
            .http
            .create_message(channel_id)
            .content(content)
            .await?
            .model()
            .await
            .map_err(anyhow::Error::from)?;

        Ok(MessageHandle::new(message.channel_id, message.id))
    }

    async fn edit_embed(
        &self,
        message: MessageHandle,
        embed: &Embed,
    ) -> Result<(), PlatformError> {
        self.http
            .update_message(message.channel_id, message.message_id)
            .embeds(Some(std::slice::from_ref(embed)))
            .await?;

        Ok(())
    }

    async fn delete_message(&self, message: MessageHandle) -> Result<(), PlatformError> {
        self.http
            .delete_message(message.channel_id, message.message_id)
            .await?;

        Ok(())
    }

    async fn add_reaction(
        &self,
        message: MessageHandle,
        affordance: Affordance,
    ) -> Result<(), PlatformError> {
        self.http
            .create_reaction(
                message.channel_id,
                message.message_id,
                &reaction_emoji(affordance),
            )
            .await?;

        Ok(())
    }

    async fn remove_own_reaction(
        &self,
        message: MessageHandle,
        affordance: Affordance,
    ) -> Result<(), PlatformError> {
        self.http
            .delete_current_user_reaction(
                message.channel_id,
                message.message_id,
                &reaction_emoji(affordance),
            )
            .await?;

        Ok(())
    }

    async fn clear_reactions(&self, message: MessageHandle) -> Result<(), PlatformError> {
        self.http
            .delete_all_reactions(message.channel_id, message.message_id)
            .await?;

        Ok(())
    }

    async fn can_add_reactions(
        &self,
        channel_id: Id<ChannelMarker>,
    ) -> Result<bool, PlatformError> {
        Ok(has_channel_permission(
            &self.http,
            channel_id,
            self.bot_user_id,
            Permissions::ADD_REACTIONS,
        )
        .await?)
    }

    async fn wait_for_reply(
        &self,
        channel_id: Id<ChannelMarker>,
        author_id: Id<UserMarker>,
        check: ReplyCheck,
    ) -> Result<Reply, PlatformError> {
        let message = self
            .standby
            .wait_for_message(channel_id, move |event: &MessageCreate| {
                event.author.id == author_id && check(&event.content)
            })
            .await
            .map_err(|_| PlatformError::Closed)?;

        Ok(Reply {
            message: MessageHandle::new(message.channel_id, message.id),
            content: message.0.content,
        })
    }

    async fn wait_for_reaction(
        &self,
        message: MessageHandle,
        user_id: Id<UserMarker>,
        kind: ReactionEvent,
    ) -> Result<Affordance, PlatformError> {
        let message_id = message.message_id;
        let event = self
            .standby
            .wait_for_event(move |event: &Event| {
                event_affordance(event, kind, message_id, user_id).is_some()
            })
            .await
            .map_err(|_| PlatformError::Closed)?;

        event_affordance(&event, kind, message_id, user_id).ok_or(PlatformError::Closed)
    }
}
