use twilight_model::{channel::message::embed::Embed, gateway::payload::incoming::MessageCreate};
use twilight_util::builder::embed::{EmbedBuilder, EmbedFooterBuilder};

use crate::{COMMANDS, CommandMeta, pagination_request};
use pager_core::Context;
use pager_utils::embed::{BLURPLE, rows_to_pages};
use pager_utils::pagination::{PaginationMode, paginate};

pub const META: CommandMeta = CommandMeta {
    name: "help",
    desc: "Lists out all available commands.",
    category: "utility",
    usage: "!help [category]",
};

const HELP_COMMANDS_PER_PAGE: usize = 5;

/// Render the command catalog, optionally filtered by category.
pub async fn run(ctx: Context, msg: Box<MessageCreate>, arg1: Option<&str>) -> anyhow::Result<()> {
    let category = arg1.map(str::to_ascii_lowercase);

    let mut categories: Vec<&str> = COMMANDS.iter().map(|c| c.category).collect();
    categories.sort_unstable();
    categories.dedup();

    if let Some(wanted) = category.as_deref()
        && !categories.contains(&wanted)
    {
        let out = format!(
            "Unknown category `{wanted}`. Available: {}",
            categories.join(", ")
        );
        ctx.http
            .create_message(msg.channel_id)
            .content(&out)
            .await?;
        return Ok(());
    }

    let rows = help_rows(category.as_deref());
    let pages = rows_to_pages(&help_template(), &rows, HELP_COMMANDS_PER_PAGE, false)?;
    let request = pagination_request(&ctx, &msg);

    paginate(
        ctx.platform.clone(),
        &request,
        pages,
        PaginationMode::Display,
        &ctx.paginate_options().with_preserved_footer(),
    )
    .await?;

    Ok(())
}

fn help_template() -> Embed {
    EmbedBuilder::new()
        .title("Available Commands")
        .color(BLURPLE)
        .footer(EmbedFooterBuilder::new("Use !usage <command> for syntax details."))
        .build()
}

fn help_rows(category: Option<&str>) -> Vec<String> {
    let mut filtered: Vec<&'static CommandMeta> = COMMANDS
        .iter()
        .filter(|cmd| category.is_none_or(|wanted| cmd.category == wanted))
        .collect();

    filtered.sort_unstable_by(|left, right| {
        left.category
            .cmp(right.category)
            .then_with(|| left.name.cmp(right.name))
    });

    filtered
        .into_iter()
        .map(|cmd| format!("**{}** ({}): {}", cmd.name, cmd.category, cmd.desc))
        .collect()
}
