//! Interactive pagination sessions driven by reactions and typed replies.
//!
//! A session renders page 0, attaches navigation reactions in the background,
//! then repeatedly races every active input source against a per-iteration
//! timer. Exactly one outcome is taken per iteration; the losing waits are
//! dropped, which cancels them.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, warn};
use twilight_model::channel::message::embed::Embed;

use super::affordance::{Affordance, Navigation, affordances_for};
use super::page::PageSet;
use super::platform::{
    MessageHandle, PaginationRequest, ReactionEvent, Reply, ReplyCheck, SharedPlatform,
};
use super::{DEFAULT_TIMEOUT_SECS, PaginationError, PlatformError};
use crate::embed::timed_out_embed;
use crate::parse::parse_selection_index;
use crate::shutdown::Shutdown;

/// Notice sent once when navigation reactions cannot be attached.
pub const NO_REACTION_PERMISSION_MESSAGE: &str =
    "I don't have add_reaction permissions so I can only show you the first page of results.";

/// How long a timed-out selection prompt stays visible before deletion.
pub const TIMED_OUT_GRACE: Duration = Duration::from_secs(10);

/// What a session resolves to besides page changes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PaginationMode {
    /// Browse only; sessions always resolve to `None`.
    Display,
    /// Additionally accept a typed index in `[0, item_count)`.
    Select { item_count: usize },
}

/// Tunables for one session.
#[derive(Clone, Debug)]
pub struct PaginateOptions {
    /// Idle time allowed per iteration; every page change restarts it.
    pub timeout: Duration,
    /// Put the page line into an added field instead of the footer.
    pub preserve_footer: bool,
    pub shutdown: Shutdown,
}

impl Default for PaginateOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            preserve_footer: false,
            shutdown: Shutdown::never(),
        }
    }
}

impl PaginateOptions {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_preserved_footer(mut self) -> Self {
        self.preserve_footer = true;
        self
    }

    pub fn with_shutdown(mut self, shutdown: Shutdown) -> Self {
        self.shutdown = shutdown;
        self
    }
}

/// Run an interactive pagination session over `pages`.
///
/// Returns `Ok(Some(index))` only in [`PaginationMode::Select`] when the
/// requester types a valid index. Cancellation, timeout, shutdown, missing
/// permissions and platform failures all resolve to `Ok(None)`.
///
/// Fails with [`PaginationError::InvalidInput`] when `pages` is empty.
pub async fn paginate(
    platform: SharedPlatform,
    request: &PaginationRequest,
    pages: Vec<Embed>,
    mode: PaginationMode,
    options: &PaginateOptions,
) -> Result<Option<usize>, PaginationError> {
    let mut pages = PageSet::new(pages)?;
    pages.stamp_page_numbers(&request.requester_name, options.preserve_footer);

    let can_react = match platform.can_add_reactions(request.channel_id).await {
        Ok(allowed) => allowed,
        Err(source) => {
            warn!(
                ?source,
                channel_id = request.channel_id.get(),
                "permission lookup failed, continuing without reactions"
            );
            false
        }
    };

    if !can_react
        && let Err(source) = platform
            .send_content(request.channel_id, NO_REACTION_PERMISSION_MESSAGE)
            .await
    {
        warn!(?source, "failed to send missing-permission notice");
    }

    let message = match platform.send_embed(request.channel_id, pages.page(0)).await {
        Ok(message) => message,
        Err(source) => {
            warn!(
                ?source,
                channel_id = request.channel_id.get(),
                "failed to send paginated message"
            );
            return Ok(None);
        }
    };

    let item_count = match mode {
        PaginationMode::Display => None,
        PaginationMode::Select { item_count } => Some(item_count),
    };

    if !can_react && item_count.is_none() {
        return Ok(None);
    }

    let tasks = if can_react && pages.len() > 1 {
        AffordanceTasks::spawn(
            SharedPlatform::clone(&platform),
            message,
            affordances_for(pages.len()),
        )
    } else {
        AffordanceTasks::none()
    };

    let session = Session {
        platform,
        message,
        pages,
        page: 0,
        tasks,
        can_react,
        item_count,
    };

    Ok(session.run(request, options).await)
}

/// Background attachment of navigation reactions. Aborted on drop.
struct AffordanceTasks {
    handle: Option<JoinHandle<()>>,
}

impl AffordanceTasks {
    fn none() -> Self {
        Self { handle: None }
    }

    fn spawn(platform: SharedPlatform, message: MessageHandle, affordances: Vec<Affordance>) -> Self {
        let handle = tokio::spawn(async move {
            for affordance in affordances {
                match platform.add_reaction(message, affordance).await {
                    Ok(()) => {}
                    Err(PlatformError::NotFound) => break,
                    Err(source) => {
                        debug!(?source, glyph = affordance.glyph(), "failed to attach reaction");
                    }
                }
            }
        });

        Self {
            handle: Some(handle),
        }
    }

    /// Stop attaching reactions. A reaction already in flight may still land.
    fn abort(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for AffordanceTasks {
    fn drop(&mut self) {
        self.abort();
    }
}

enum Outcome {
    Reply(Result<Reply, PlatformError>),
    Reaction(Result<Affordance, PlatformError>),
    TimedOut,
    Shutdown,
}

struct Session {
    platform: SharedPlatform,
    message: MessageHandle,
    pages: PageSet,
    /// Invariant: `page < pages.len()`.
    page: usize,
    tasks: AffordanceTasks,
    can_react: bool,
    /// `Some` in selection mode.
    item_count: Option<usize>,
}

impl Session {
    async fn run(mut self, request: &PaginationRequest, options: &PaginateOptions) -> Option<usize> {
        loop {
            if options.shutdown.is_triggered() {
                debug!("shutdown requested, leaving pagination session");
                return None;
            }

            if self.item_count.is_none() && !self.can_react {
                return None;
            }

            match self.next_outcome(request, options).await {
                Outcome::Shutdown => {
                    debug!("shutdown requested, leaving pagination session");
                    return None;
                }
                Outcome::TimedOut => {
                    self.finish_timed_out(options.timeout).await;
                    return None;
                }
                Outcome::Reply(Ok(reply)) => return self.finish_selected(reply).await,
                Outcome::Reaction(Ok(affordance)) => {
                    match affordance.navigate(self.page, self.pages.len()) {
                        Navigation::Cancel => {
                            self.finish_cancelled().await;
                            return None;
                        }
                        Navigation::Goto(page) => {
                            if !self.show(page).await {
                                return None;
                            }
                        }
                    }
                }
                Outcome::Reply(Err(source)) | Outcome::Reaction(Err(source)) => {
                    debug!(?source, "event wait ended, closing pagination session");
                    return None;
                }
            }
        }
    }

    /// Race every active wait against the idle timer and shutdown.
    async fn next_outcome(&self, request: &PaginationRequest, options: &PaginateOptions) -> Outcome {
        let awaiting_reply = self.item_count.is_some();
        let item_count = self.item_count.unwrap_or(0);
        let check: ReplyCheck =
            Box::new(move |content| parse_selection_index(content, item_count).is_some());

        tokio::select! {
            reply = self.platform.wait_for_reply(
                request.channel_id,
                request.requester_id,
                check,
            ), if awaiting_reply => Outcome::Reply(reply),
            added = self.platform.wait_for_reaction(
                self.message,
                request.requester_id,
                ReactionEvent::Added,
            ), if self.can_react => Outcome::Reaction(added),
            removed = self.platform.wait_for_reaction(
                self.message,
                request.requester_id,
                ReactionEvent::Removed,
            ), if self.can_react => Outcome::Reaction(removed),
            () = tokio::time::sleep(options.timeout) => Outcome::TimedOut,
            () = options.shutdown.wait() => Outcome::Shutdown,
        }
    }

    /// Display `page`. Returns `false` once the message is gone.
    async fn show(&mut self, page: usize) -> bool {
        self.page = page.min(self.pages.last_index());

        match self
            .platform
            .edit_embed(self.message, self.pages.page(self.page))
            .await
        {
            Ok(()) => true,
            Err(PlatformError::NotFound) => {
                debug!("paginated message disappeared, ending session");
                false
            }
            Err(source) => {
                warn!(?source, page = self.page, "failed to switch page");
                true
            }
        }
    }

    async fn finish_selected(mut self, reply: Reply) -> Option<usize> {
        self.tasks.abort();

        let index = parse_selection_index(&reply.content, self.item_count.unwrap_or(0));
        report_cleanup(
            self.platform.delete_message(self.message).await,
            "paginated message",
        );
        report_cleanup(
            self.platform.delete_message(reply.message).await,
            "selection reply",
        );

        index
    }

    async fn finish_cancelled(mut self) {
        report_cleanup(
            self.platform.delete_message(self.message).await,
            "paginated message",
        );
        self.tasks.abort();
    }

    async fn finish_timed_out(mut self, timeout: Duration) {
        self.tasks.abort();

        if self.item_count.is_some() {
            let notice = timed_out_embed(self.pages.page(self.page), timeout.as_secs());
            match self.platform.edit_embed(self.message, &notice).await {
                Ok(()) => self.schedule_delete(TIMED_OUT_GRACE),
                Err(PlatformError::NotFound) => {}
                Err(source) => warn!(?source, "failed to mark selection prompt as timed out"),
            }
            return;
        }

        match self.platform.clear_reactions(self.message).await {
            Ok(()) | Err(PlatformError::NotFound) => {}
            Err(PlatformError::Forbidden) => {
                for affordance in affordances_for(self.pages.len()) {
                    report_cleanup(
                        self.platform
                            .remove_own_reaction(self.message, affordance)
                            .await,
                        "own reaction",
                    );
                }
            }
            Err(source) => warn!(?source, "failed to clear pagination reactions"),
        }
    }

    fn schedule_delete(&self, after: Duration) {
        let platform = SharedPlatform::clone(&self.platform);
        let message = self.message;

        tokio::spawn(async move {
            tokio::time::sleep(after).await;
            report_cleanup(platform.delete_message(message).await, "timed-out prompt");
        });
    }
}

/// Swallow cleanup failures that only mean the work is already done or not ours to do.
fn report_cleanup(result: Result<(), PlatformError>, what: &'static str) {
    match result {
        Ok(()) | Err(PlatformError::NotFound) => {}
        Err(PlatformError::Forbidden) => debug!(what, "missing permission for cleanup"),
        Err(source) => warn!(?source, what, "pagination cleanup failed"),
    }
}
