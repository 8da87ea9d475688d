pub mod utility;

use twilight_model::gateway::payload::incoming::MessageCreate;

use pager_core::Context;
use pager_utils::pagination::PaginationRequest;

// Global command meta data
pub struct CommandMeta {
    pub name: &'static str,
    pub desc: &'static str,
    pub category: &'static str,
    pub usage: &'static str,
}

pub const COMMANDS: &[CommandMeta] = &[
    utility::ping::META,
    utility::help::META,
    utility::usage::META,
    utility::pages::META,
    utility::pick::META,
    utility::swatch::META,
    // Add new commands here
];

/// A prefixed command split into its name and arguments.
#[derive(Debug, PartialEq, Eq)]
struct Invocation<'a> {
    name: String,
    arg1: Option<&'a str>,
    /// Everything after the command name, trimmed.
    rest: Option<&'a str>,
}

fn parse_invocation<'a>(content: &'a str, prefix: &str) -> Option<Invocation<'a>> {
    let content = content.trim().strip_prefix(prefix)?.trim();

    let mut command_and_rest = content.splitn(2, char::is_whitespace);
    let name = command_and_rest.next().unwrap_or("").to_ascii_lowercase();
    if name.is_empty() {
        return None;
    }

    let rest = command_and_rest
        .next()
        .map(str::trim)
        .filter(|value| !value.is_empty());
    let arg1 = rest.and_then(|value| value.split_whitespace().next());

    Some(Invocation { name, arg1, rest })
}

/// Identify who a pagination session answers to.
pub(crate) fn pagination_request(ctx: &Context, msg: &MessageCreate) -> PaginationRequest {
    PaginationRequest {
        channel_id: msg.channel_id,
        requester_id: msg.author.id,
        requester_name: msg
            .author
            .global_name
            .clone()
            .unwrap_or_else(|| msg.author.name.clone()),
        bot_avatar_url: ctx.bot.avatar_url.clone(),
    }
}

pub async fn handle_message(ctx: Context, msg: Box<MessageCreate>) -> anyhow::Result<()> {
    if msg.author.bot {
        return Ok(());
    }

    let content = msg.content.clone();
    let Some(invocation) = parse_invocation(&content, &ctx.config.command_prefix) else {
        return Ok(());
    };

    let arg1 = invocation.arg1;
    let rest = invocation.rest;

    match invocation.name.as_str() {
        "ping" => utility::ping::run(ctx, msg).await?,
        "help" => utility::help::run(ctx, msg, arg1).await?,
        "usage" => utility::usage::run(ctx, msg, arg1).await?,
        "pages" => utility::pages::run(ctx, msg, arg1).await?,
        "pick" => utility::pick::run(ctx, msg, rest).await?,
        "swatch" => utility::swatch::run(ctx, msg, arg1).await?,
        // Add new commands here
        _ => {}
    }

    Ok(())
}
