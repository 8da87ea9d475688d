//! Stable facade for reaction-driven pagination and selection.

/// Default idle timeout for pagination sessions.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

pub mod affordance;
pub mod discord;
mod error;
mod page;
pub mod platform;
mod selector;
mod session;
#[cfg(test)]
mod testing;

pub use affordance::{Affordance, Navigation, affordances_for};
pub use discord::DiscordPlatform;
pub use error::{PaginationError, PlatformError};
pub use page::PageSet;
pub use platform::{
    MessageHandle, PaginationRequest, Platform, ReactionEvent, Reply, ReplyCheck, SharedPlatform,
};
pub use selector::{SELECTION_PER_PAGE, select, select_with_colour};
pub use session::{
    NO_REACTION_PERMISSION_MESSAGE, PaginateOptions, PaginationMode, TIMED_OUT_GRACE, paginate,
};
