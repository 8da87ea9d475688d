use twilight_model::gateway::payload::incoming::MessageCreate;
use twilight_util::builder::embed::EmbedBuilder;

use crate::CommandMeta;
use pager_core::Context;
use pager_utils::colour::swatch_png;
use pager_utils::embed::{default_attachment_filename, send_embed_with_image};

pub const META: CommandMeta = CommandMeta {
    name: "swatch",
    desc: "Show the dominant colour of an image.",
    category: "utility",
    usage: "!swatch [image url]",
};

const SWATCH_EDGE: u32 = 128;

/// Sample an image's dominant colour and post it as an attached swatch.
pub async fn run(ctx: Context, msg: Box<MessageCreate>, arg1: Option<&str>) -> anyhow::Result<()> {
    let Some(url) = arg1.or(ctx.bot.avatar_url.as_deref()) else {
        let usage = format!("Usage: `{}`", META.usage);
        ctx.http
            .create_message(msg.channel_id)
            .content(&usage)
            .await?;
        return Ok(());
    };

    let colour = match ctx.colours.sample(url).await {
        Ok(colour) => colour,
        Err(source) => {
            tracing::debug!(%source, url, "swatch sampling failed");
            ctx.http
                .create_message(msg.channel_id)
                .content("Couldn't read a colour from that image.")
                .await?;
            return Ok(());
        }
    };

    let embed = EmbedBuilder::new()
        .title(colour_hex(colour))
        .color(colour)
        .build();
    let image = swatch_png(colour, SWATCH_EDGE)?;

    send_embed_with_image(
        &ctx.http,
        msg.channel_id,
        embed,
        image,
        &default_attachment_filename("swatch"),
    )
    .await
}

fn colour_hex(colour: u32) -> String {
    format!("#{colour:06X}")
}
