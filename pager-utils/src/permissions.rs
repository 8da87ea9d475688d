use twilight_http::Client;
use twilight_model::{
    channel::ChannelType,
    guild::Permissions,
    id::{
        Id,
        marker::{ChannelMarker, RoleMarker, UserMarker},
    },
};
use twilight_util::permission_calculator::PermissionCalculator;

/// Resolve a user's effective permissions in a channel.
///
/// Returns `Ok(None)` for channels outside a guild, where guild permissions do
/// not apply.
pub async fn resolve_channel_permissions(
    http: &Client,
    channel_id: Id<ChannelMarker>,
    user_id: Id<UserMarker>,
) -> anyhow::Result<Option<Permissions>> {
    let channel = http.channel(channel_id).await?.model().await?;

    let Some(guild_id) = channel.guild_id else {
        return Ok(None);
    };

    let guild = http.guild(guild_id).await?.model().await?;
    let member = http.guild_member(guild_id, user_id).await?.model().await?;

    let everyone = guild
        .roles
        .iter()
        .find(|role| role.id == guild_id.cast())
        .map_or(Permissions::empty(), |role| role.permissions);

    let member_roles: Vec<(Id<RoleMarker>, Permissions)> = guild
        .roles
        .iter()
        .filter(|role| member.roles.contains(&role.id))
        .map(|role| (role.id, role.permissions))
        .collect();

    // Threads carry no overwrites of their own.
    let overwrite_source = overwrite_channel(channel.kind, channel.id, channel.parent_id);
    let overwrites = if overwrite_source == channel.id {
        channel.permission_overwrites.unwrap_or_default()
    } else {
        http.channel(overwrite_source)
            .await?
            .model()
            .await?
            .permission_overwrites
            .unwrap_or_default()
    };

    let resolved = PermissionCalculator::new(guild_id, user_id, everyone, &member_roles)
        .owner_id(guild.owner_id)
        .in_channel(channel.kind, &overwrites);

    Ok(Some(resolved))
}

/// Channel whose permission overwrites apply to `channel_id`.
fn overwrite_channel(
    kind: ChannelType,
    channel_id: Id<ChannelMarker>,
    parent_id: Option<Id<ChannelMarker>>,
) -> Id<ChannelMarker> {
    match parent_id {
        Some(parent_id) if kind.is_thread() => parent_id,
        _ => channel_id,
    }
}

/// Check whether a user holds `required` (or administrator) in a channel.
///
/// Channels outside a guild always allow the action.
pub async fn has_channel_permission(
    http: &Client,
    channel_id: Id<ChannelMarker>,
    user_id: Id<UserMarker>,
    required: Permissions,
) -> anyhow::Result<bool> {
    let Some(perms) = resolve_channel_permissions(http, channel_id, user_id).await? else {
        return Ok(true);
    };

    Ok(perms.contains(Permissions::ADMINISTRATOR) || perms.contains(required))
}
