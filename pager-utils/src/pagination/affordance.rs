//! Navigation reactions attached to a paginated message.

/// A reaction the requester can press to drive a session.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Affordance {
    First,
    Previous,
    Next,
    Last,
    Cancel,
}

/// Result of pressing an affordance on a given page.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Navigation {
    /// Show this 0-based page.
    Goto(usize),
    /// End the session without a result.
    Cancel,
}

impl Affordance {
    /// Every recognised affordance, in attachment order.
    pub const ALL: [Self; 5] = [
        Self::First,
        Self::Previous,
        Self::Next,
        Self::Last,
        Self::Cancel,
    ];

    /// Unicode glyph used as the reaction emoji.
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::First => "⏮",
            Self::Previous => "◀",
            Self::Next => "▶",
            Self::Last => "⏭",
            Self::Cancel => "🚫",
        }
    }

    /// Recognise a reaction emoji name.
    ///
    /// Prefix matching accepts the variation-selector forms clients send
    /// (e.g. `◀️`).
    pub fn from_glyph(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|affordance| name.starts_with(affordance.glyph()))
    }

    /// Apply this affordance to the current 0-based page.
    ///
    /// Moving past either end leaves the page unchanged.
    pub fn navigate(self, page: usize, total_pages: usize) -> Navigation {
        let last = total_pages.saturating_sub(1);
        match self {
            Self::First => Navigation::Goto(0),
            Self::Previous => Navigation::Goto(page.saturating_sub(1)),
            Self::Next => Navigation::Goto((page + 1).min(last)),
            Self::Last => Navigation::Goto(last),
            Self::Cancel => Navigation::Cancel,
        }
    }
}

/// Affordances to attach for a page set of the given size, in order.
///
/// Single pages get none; first/last are only worth it beyond two pages.
pub fn affordances_for(total_pages: usize) -> Vec<Affordance> {
    if total_pages <= 1 {
        return vec![];
    }

    Affordance::ALL
        .into_iter()
        .filter(|affordance| {
            total_pages > 2 || !matches!(affordance, Affordance::First | Affordance::Last)
        })
        .collect()
}
