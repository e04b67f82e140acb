//! Content outlet: keeps exactly one section active and owns heading focus.

use shared::{domain::ViewId, error::PageError, protocol::PageEvent};
use tracing::{debug, warn};

use crate::{bus::PageListener, document::Document};

pub struct ViewOutlet {
    active: Option<ViewId>,
}

impl ViewOutlet {
    pub fn new(document: &Document) -> Self {
        let active = document.active_view().cloned();
        debug!(?active, "view outlet constructed");
        Self { active }
    }

    pub fn active(&self) -> Option<&ViewId> {
        self.active.as_ref()
    }

    pub fn handle_navigation_request(
        &mut self,
        document: &mut Document,
        view: &ViewId,
    ) -> Result<Option<PageEvent>, PageError> {
        if self.active.as_ref() == Some(view) {
            return Ok(None);
        }

        if !document.has_view(view) {
            return Err(PageError::ViewNotFound {
                view_id: view.to_string(),
            });
        }

        if let Some(previous) = self.active.take() {
            document.set_section_active(&previous, false);
        }
        document.set_section_active(view, true);
        self.active = Some(view.clone());

        // Delivered by the bus after this handler returns.
        let changed = PageEvent::ViewChanged(view.clone());

        if !document.focus_heading(view) {
            warn!(%view, "section has no focusable heading; focus unchanged");
        }

        Ok(Some(changed))
    }
}

impl PageListener for ViewOutlet {
    fn on_event(
        &mut self,
        document: &mut Document,
        event: &PageEvent,
    ) -> Result<Option<PageEvent>, PageError> {
        match event {
            PageEvent::NavRequest(view) => self.handle_navigation_request(document, view),
            PageEvent::ViewChanged(_) => Ok(None),
        }
    }
}

#[cfg(test)]
#[path = "tests/outlet_tests.rs"]
mod tests;
