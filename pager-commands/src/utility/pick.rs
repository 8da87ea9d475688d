use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::{CommandMeta, pagination_request};
use pager_core::Context;
use pager_utils::pagination::select_with_colour;
use pager_utils::parse::parse_item_list;

pub const META: CommandMeta = CommandMeta {
    name: "pick",
    desc: "Choose one option by typing its number.",
    category: "utility",
    usage: "!pick <a | b | c>",
};

/// Prompt the author to choose one of the `|`-separated options.
pub async fn run(ctx: Context, msg: Box<MessageCreate>, rest: Option<&str>) -> anyhow::Result<()> {
    let items = rest.map(parse_item_list).unwrap_or_default();
    if items.is_empty() {
        let usage = format!("Usage: `{}`", META.usage);
        ctx.http
            .create_message(msg.channel_id)
            .content(&usage)
            .await?;
        return Ok(());
    }

    let request = pagination_request(&ctx, &msg);
    let picked = select_with_colour(
        ctx.platform.clone(),
        ctx.colours.as_ref(),
        &request,
        &items,
        &ctx.paginate_options(),
    )
    .await?;

    if let Some(index) = picked {
        let out = format!("You picked **{}**.", items[index]);
        ctx.http
            .create_message(msg.channel_id)
            .content(&out)
            .await?;
    }

    Ok(())
}
