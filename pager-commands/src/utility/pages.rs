use twilight_model::gateway::payload::incoming::MessageCreate;
use twilight_util::builder::embed::EmbedBuilder;

use crate::{CommandMeta, pagination_request};
use pager_core::Context;
use pager_utils::embed::{BLURPLE, rows_to_pages};
use pager_utils::pagination::{PaginationMode, paginate};
use pager_utils::parse::parse_positive_count;

pub const META: CommandMeta = CommandMeta {
    name: "pages",
    desc: "Browse a generated list with reaction pagination.",
    category: "utility",
    usage: "!pages [count]",
};

const DEFAULT_ITEM_COUNT: usize = 42;
const MAX_ITEM_COUNT: usize = 500;
const ITEMS_PER_PAGE: usize = 10;

/// Page through `count` generated rows.
///
/// Invalid or oversized counts answer with usage text instead of a session.
pub async fn run(ctx: Context, msg: Box<MessageCreate>, arg1: Option<&str>) -> anyhow::Result<()> {
    let Some(count) =
        parse_positive_count(arg1, DEFAULT_ITEM_COUNT).filter(|count| *count <= MAX_ITEM_COUNT)
    else {
        let usage = format!("Usage: `{}` (1-{MAX_ITEM_COUNT} items)", META.usage);
        ctx.http
            .create_message(msg.channel_id)
            .content(&usage)
            .await?;
        return Ok(());
    };

    let template = EmbedBuilder::new()
        .title("Pagination Test")
        .color(BLURPLE)
        .build();
    let pages = rows_to_pages(&template, &build_test_items(count), ITEMS_PER_PAGE, false)?;
    let request = pagination_request(&ctx, &msg);

    paginate(
        ctx.platform.clone(),
        &request,
        pages,
        PaginationMode::Display,
        &ctx.paginate_options(),
    )
    .await?;

    Ok(())
}

fn build_test_items(count: usize) -> Vec<String> {
    (1..=count).map(|n| format!("Item #{n}")).collect()
}
