//! Navigation entries: tracks the active entry and turns activations into
//! `nav-request` notifications.

use shared::{domain::ViewId, error::PageError, protocol::PageEvent};
use tracing::{debug, warn};

use crate::document::Document;

pub struct NavigationController {
    active: Option<usize>,
}

impl NavigationController {
    pub fn new(document: &Document) -> Self {
        let active = document.active_nav_index();
        debug!(?active, entries = document.nav_items().len(), "navigation constructed");
        for err in Self::audit_targets(document) {
            warn!(%err, "navigation entry will be ignored when activated");
        }
        Self { active }
    }

    /// Every entry whose target is malformed or names no section.
    pub fn audit_targets(document: &Document) -> Vec<PageError> {
        document
            .nav_items()
            .iter()
            .filter(|item| {
                item.target()
                    .map_or(true, |view| !document.has_view(&view))
            })
            .map(|item| PageError::InvalidViewTarget {
                href: item.href.clone(),
            })
            .collect()
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Activates the entry at `index`. Returns the `nav-request` to broadcast,
    /// or `None` when the entry was already active.
    pub fn handle_item_activated(
        &mut self,
        document: &mut Document,
        index: usize,
    ) -> Result<Option<PageEvent>, PageError> {
        let Some(item) = document.nav_items().get(index) else {
            return Err(PageError::InvalidViewTarget {
                href: format!("<nav entry {index}>"),
            });
        };

        if self.active == Some(index) {
            return Ok(None);
        }

        let view = resolve_target(document, &item.href)?;

        if let Some(previous) = self.active {
            document.set_nav_active(previous, false);
        }
        document.set_nav_active(index, true);
        self.active = Some(index);

        debug!(index, %view, "navigation entry activated");
        Ok(Some(PageEvent::NavRequest(view)))
    }
}

fn resolve_target(document: &Document, href: &str) -> Result<ViewId, PageError> {
    ViewId::from_href(href)
        .filter(|view| document.has_view(view))
        .ok_or_else(|| PageError::InvalidViewTarget {
            href: href.to_string(),
        })
}

#[cfg(test)]
#[path = "tests/navigation_tests.rs"]
mod tests;
