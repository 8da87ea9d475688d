//! "Choose by typing an index" prompts built on top of pagination sessions.

use twilight_model::channel::message::embed::Embed;

use super::platform::{PaginationRequest, SharedPlatform};
use super::session::{PaginateOptions, PaginationMode, paginate};
use super::PaginationError;
use crate::colour::ColourSampler;
use crate::embed::{BLURPLE, default_selection_template, rows_to_pages};

/// Items listed per selection page.
pub const SELECTION_PER_PAGE: usize = 10;

/// Ask the requester to pick one of `items` by typing its index.
///
/// A single item resolves to `0` without touching the platform. Otherwise the
/// items are listed with stable indices over pages built from `template`, or
/// from the default "Multiple results found." template when none is given.
pub async fn select(
    platform: SharedPlatform,
    request: &PaginationRequest,
    items: &[String],
    template: Option<Embed>,
    options: &PaginateOptions,
) -> Result<Option<usize>, PaginationError> {
    if let Some(shortcut) = shortcut(items)? {
        return Ok(Some(shortcut));
    }

    let template = template.unwrap_or_else(|| {
        default_selection_template(request.bot_avatar_url.as_deref(), BLURPLE)
    });

    run_selection(platform, request, items, &template, options).await
}

/// Like [`select`] with the default template, coloured after the bot avatar.
pub async fn select_with_colour(
    platform: SharedPlatform,
    sampler: &dyn ColourSampler,
    request: &PaginationRequest,
    items: &[String],
    options: &PaginateOptions,
) -> Result<Option<usize>, PaginationError> {
    if let Some(shortcut) = shortcut(items)? {
        return Ok(Some(shortcut));
    }

    let avatar_url = request.bot_avatar_url.as_deref();
    let color = sampler.dominant_colour(avatar_url).await;
    let template = default_selection_template(avatar_url, color);

    run_selection(platform, request, items, &template, options).await
}

/// Resolve selections that need no prompt.
fn shortcut(items: &[String]) -> Result<Option<usize>, PaginationError> {
    match items.len() {
        0 => Err(PaginationError::InvalidInput("no items to select from")),
        1 => Ok(Some(0)),
        _ => Ok(None),
    }
}

async fn run_selection(
    platform: SharedPlatform,
    request: &PaginationRequest,
    items: &[String],
    template: &Embed,
    options: &PaginateOptions,
) -> Result<Option<usize>, PaginationError> {
    let pages = rows_to_pages(template, items, SELECTION_PER_PAGE, true)?;
    let mode = PaginationMode::Select {
        item_count: items.len(),
    };

    paginate(platform, request, pages, mode, options).await
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::*;
    use crate::embed::SELECTION_PROMPT;
    use crate::pagination::testing::{Call, MockPlatform};
    use crate::pagination::{Affordance, SharedPlatform};

    struct FixedColour {
        seen: Mutex<Vec<Option<String>>>,
    }

    #[async_trait]
    impl ColourSampler for FixedColour {
        async fn dominant_colour(&self, url: Option<&str>) -> u32 {
            self.seen.lock().unwrap().push(url.map(str::to_owned));
            0x12_34_56
        }
    }

    fn items(count: usize) -> Vec<String> {
        (0..count).map(|n| format!("item {n}")).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn single_item_needs_no_prompt() {
        let mock = Arc::new(MockPlatform::new());
        let platform: SharedPlatform = mock.clone();

        let picked = select(
            platform,
            &MockPlatform::request(),
            &items(1),
            None,
            &PaginateOptions::default(),
        )
        .await
        .unwrap();

        assert_eq!(picked, Some(0));
        assert!(mock.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn no_items_is_invalid() {
        let mock = Arc::new(MockPlatform::new());
        let platform: SharedPlatform = mock.clone();

        let picked = select(
            platform,
            &MockPlatform::request(),
            &[],
            None,
            &PaginateOptions::default(),
        )
        .await;

        assert!(matches!(picked, Err(PaginationError::InvalidInput(_))));
        assert!(mock.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn indices_stay_global_across_pages() {
        let mock = Arc::new(MockPlatform::new());
        let platform: SharedPlatform = mock.clone();
        mock.react(Affordance::Next);

        let picked = select(
            platform,
            &MockPlatform::request(),
            &items(15),
            None,
            &PaginateOptions::default(),
        )
        .await
        .unwrap();

        assert_eq!(picked, None);

        let Some(Call::SendEmbed { description, .. }) = mock.calls().into_iter().next() else {
            panic!("first call should render the prompt");
        };
        let description = description.unwrap();
        assert!(description.starts_with(SELECTION_PROMPT));
        assert!(description.contains("`[0]` item 0"));
        assert!(description.contains("`[9]` item 9"));

        let second = &mock.edited_descriptions()[0];
        assert!(second.contains("`[10]` item 10"));
        assert!(second.contains("`[14]` item 14"));
    }

    #[tokio::test(start_paused = true)]
    async fn colour_is_sampled_from_the_bot_avatar() {
        let mock = Arc::new(MockPlatform::new());
        let platform: SharedPlatform = mock.clone();
        let sampler = FixedColour {
            seen: Mutex::new(Vec::new()),
        };
        let mut request = MockPlatform::request();
        request.bot_avatar_url = Some("https://cdn.example/avatar.png".to_owned());
        mock.reply("12");

        let picked = select_with_colour(
            platform,
            &sampler,
            &request,
            &items(15),
            &PaginateOptions::default(),
        )
        .await
        .unwrap();

        assert_eq!(picked, Some(12));
        assert_eq!(
            *sampler.seen.lock().unwrap(),
            vec![Some("https://cdn.example/avatar.png".to_owned())]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn single_item_skips_colour_sampling() {
        let mock = Arc::new(MockPlatform::new());
        let platform: SharedPlatform = mock.clone();
        let sampler = FixedColour {
            seen: Mutex::new(Vec::new()),
        };

        let picked = select_with_colour(
            platform,
            &sampler,
            &MockPlatform::request(),
            &items(1),
            &PaginateOptions::default(),
        )
        .await
        .unwrap();

        assert_eq!(picked, Some(0));
        assert!(sampler.seen.lock().unwrap().is_empty());
    }
}
