/// Dominant-colour sampling for embed styling.
pub mod colour;
/// Embed builders: page chunking, templates, and image attachments.
pub mod embed;
/// Reaction-driven pagination and selection sessions.
pub mod pagination;
/// Pure parser helpers.
pub mod parse;
/// Permission helper utilities.
pub mod permissions;
/// Cooperative shutdown signal shared by long-running sessions.
pub mod shutdown;
/// Shared time helpers.
pub mod time;
