use twilight_http::Client;
use twilight_model::{
    channel::message::embed::{Embed, EmbedFooter, EmbedImage},
    http::attachment::Attachment,
    id::{
        Id,
        marker::{ChannelMarker, UserMarker},
    },
    util::ImageHash,
};
use twilight_util::builder::embed::{EmbedBuilder, ImageSource};

use crate::pagination::PaginationError;
use crate::time::now_unix_secs;

/// Neutral brand colour used when no other colour is available.
pub const BLURPLE: u32 = 0x58_65_F2;
/// Accent colour for timed-out prompts.
pub const TIMED_OUT_COLOR: u32 = 0xED_42_45;
/// Icon shown next to the "Page X of N" footer.
pub const PAGINATION_FOOTER_ICON: &str = "http://pix.iemoji.com/twit33/0056.png";
/// Title of the default selection prompt.
pub const SELECTION_TITLE: &str = "Multiple results found.";
/// Line shown above enumerated selection rows.
pub const SELECTION_PROMPT: &str = "Please type matching ID#:";

/// Chunk `rows` into one embed per page, cloned from `template`.
///
/// Only the description differs between pages. With `enumerate`, every row is
/// prefixed with its 0-based position in `rows`, which stays stable across
/// page boundaries, and the page opens with the selection prompt.
pub fn rows_to_pages(
    template: &Embed,
    rows: &[String],
    per_page: usize,
    enumerate: bool,
) -> Result<Vec<Embed>, PaginationError> {
    if per_page == 0 {
        return Err(PaginationError::InvalidInput("rows per page must be positive"));
    }
    if rows.is_empty() {
        return Err(PaginationError::InvalidInput("no rows to paginate"));
    }

    let pages = rows
        .chunks(per_page)
        .enumerate()
        .map(|(chunk_index, chunk)| {
            let description = if enumerate {
                let first = chunk_index * per_page;
                let lines = chunk
                    .iter()
                    .enumerate()
                    .map(|(offset, row)| format!("`[{}]` {row}", first + offset))
                    .collect::<Vec<_>>()
                    .join("\n");
                format!("{SELECTION_PROMPT}\n\n{lines}")
            } else {
                chunk.join("\n")
            };

            let mut page = template.clone();
            page.description = Some(description);
            page
        })
        .collect();

    Ok(pages)
}

/// Template used by the selector when the caller supplies none.
pub fn default_selection_template(thumbnail_url: Option<&str>, color: u32) -> Embed {
    let builder = EmbedBuilder::new().title(SELECTION_TITLE).color(color);

    match thumbnail_url.and_then(|url| ImageSource::url(url).ok()) {
        Some(thumbnail) => builder.thumbnail(thumbnail).build(),
        None => builder.build(),
    }
}

/// Rewrite a displayed page into the "timed out" notice.
pub fn timed_out_embed(page: &Embed, waited_secs: u64) -> Embed {
    let mut notice = page.clone();
    notice.title = Some("Timed out.".to_owned());
    notice.color = Some(TIMED_OUT_COLOR);
    notice.footer = Some(EmbedFooter {
        icon_url: None,
        proxy_icon_url: None,
        text: format!("Stopped waiting for a response after {waited_secs} seconds."),
    });
    notice
}

/// CDN URL of a user's avatar, or of the matching default avatar.
pub fn avatar_url(user_id: Id<UserMarker>, avatar: Option<ImageHash>) -> String {
    match avatar {
        Some(avatar) => format!(
            "https://cdn.discordapp.com/avatars/{}/{avatar}.png?size=128",
            user_id.get()
        ),
        None => format!(
            "https://cdn.discordapp.com/embed/avatars/{}.png",
            (user_id.get() >> 22) % 6
        ),
    }
}

/// Strip characters Discord mangles in attachment names.
pub fn sanitize_attachment_filename(raw: &str) -> String {
    raw.chars()
        .filter(|ch| !matches!(ch, '_' | ' ' | ':'))
        .collect()
}

/// Derive an attachment name from the invoking message and the current time.
pub fn default_attachment_filename(invoking_content: &str) -> String {
    sanitize_attachment_filename(&format!("{invoking_content}{}.png", now_unix_secs()))
}

/// Point `embed`'s image at an attachment, returning the sanitised file name
/// the attachment must be uploaded under.
pub fn embed_with_attached_image(mut embed: Embed, filename: &str) -> (Embed, String) {
    let filename = sanitize_attachment_filename(filename);
    embed.image = Some(EmbedImage {
        height: None,
        proxy_url: None,
        url: format!("attachment://{filename}"),
        width: None,
    });

    (embed, filename)
}

/// Send `embed` with `image` attached and shown as the embed image.
pub async fn send_embed_with_image(
    http: &Client,
    channel_id: Id<ChannelMarker>,
    embed: Embed,
    image: Vec<u8>,
    filename: &str,
) -> anyhow::Result<()> {
    let (embed, filename) = embed_with_attached_image(embed, filename);
    let attachment = Attachment::from_bytes(filename, image, 1);

    http.create_message(channel_id)
        .embeds(&[embed])
        .attachments(&[attachment])
        .await?;

    Ok(())
}
