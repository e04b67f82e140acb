use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::ViewId;

/// Notifications exchanged on the page bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "kebab-case")]
pub enum PageEvent {
    NavRequest(ViewId),
    ViewChanged(ViewId),
}

impl PageEvent {
    pub fn name(&self) -> &'static str {
        match self {
            PageEvent::NavRequest(_) => "nav-request",
            PageEvent::ViewChanged(_) => "view-changed",
        }
    }

    pub fn view(&self) -> &ViewId {
        match self {
            PageEvent::NavRequest(view) | PageEvent::ViewChanged(view) => view,
        }
    }
}

impl fmt::Display for PageEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), self.view())
    }
}
