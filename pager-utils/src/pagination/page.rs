//! Page sets and page-number stamping.

use twilight_model::channel::message::embed::{Embed, EmbedField, EmbedFooter};

use super::PaginationError;
use crate::embed::PAGINATION_FOOTER_ICON;

/// Ordered, non-empty sequence of pages shown by one session.
#[derive(Clone, Debug)]
pub struct PageSet {
    pages: Vec<Embed>,
}

#[allow(clippy::len_without_is_empty)]
impl PageSet {
    /// Wrap pages, rejecting an empty set.
    pub fn new(pages: Vec<Embed>) -> Result<Self, PaginationError> {
        if pages.is_empty() {
            return Err(PaginationError::InvalidInput("no pages to display"));
        }

        Ok(Self { pages })
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn last_index(&self) -> usize {
        self.pages.len() - 1
    }

    /// Page at a 0-based index, clamped to the last page.
    pub fn page(&self, index: usize) -> &Embed {
        &self.pages[index.min(self.last_index())]
    }

    /// Stamp `"{requester}: Page {n} of {total}"` onto every page.
    ///
    /// The line goes into the footer, or into an added `Page` field when
    /// `preserve_footer` keeps the caller's footer intact. Single pages are
    /// left untouched.
    pub fn stamp_page_numbers(&mut self, requester: &str, preserve_footer: bool) {
        let total = self.pages.len();
        if total <= 1 {
            return;
        }

        for (number, page) in (1..).zip(self.pages.iter_mut()) {
            let page_line = format!("{requester}: Page {number} of {total}");
            if preserve_footer {
                page.fields.push(EmbedField {
                    inline: true,
                    name: "Page".to_owned(),
                    value: page_line,
                });
            } else {
                page.footer = Some(EmbedFooter {
                    icon_url: Some(PAGINATION_FOOTER_ICON.to_owned()),
                    proxy_icon_url: None,
                    text: page_line,
                });
            }
        }
    }
}
