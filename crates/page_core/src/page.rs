//! Wires the navigation controller, view outlet and blog feed to one
//! document through the page bus.

use std::sync::Arc;

use shared::{domain::ViewId, error::PageError, protocol::PageEvent};
use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::{
    bus::{EventBus, PageListener},
    document::{Document, PageLayout},
    feed::{BlogFeed, FeedOutcome},
    navigation::NavigationController,
    outlet::ViewOutlet,
    posts::PostSource,
};

/// A running page. Must be driven from inside a tokio runtime because the
/// blog feed spawns its fetch.
pub struct Page {
    document: Document,
    navigation: NavigationController,
    outlet: ViewOutlet,
    feed: BlogFeed,
    bus: EventBus,
}

impl Page {
    pub fn new(layout: &PageLayout, source: Arc<dyn PostSource>) -> Result<Self, PageError> {
        let document = Document::from_layout(layout)?;
        match document.section(&layout.blog_view) {
            Some(section) if section.post_list.is_none() => {
                return Err(PageError::layout(format!(
                    "blog section '{}' has no post list",
                    layout.blog_view
                )));
            }
            Some(_) => {}
            None => warn!(view = %layout.blog_view, "layout has no blog section"),
        }

        let navigation = NavigationController::new(&document);
        let outlet = ViewOutlet::new(&document);
        let feed = BlogFeed::new(layout.blog_view.clone(), source);
        info!(
            sections = document.sections().len(),
            nav = document.nav_items().len(),
            "page ready"
        );

        Ok(Self {
            document,
            navigation,
            outlet,
            feed,
            bus: EventBus::new(),
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn feed(&self) -> &BlogFeed {
        &self.feed
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<PageEvent> {
        self.bus.subscribe()
    }

    /// Activates the navigation entry at `index`, as a click would.
    pub fn activate(&mut self, index: usize) -> Result<(), PageError> {
        let request = self
            .navigation
            .handle_item_activated(&mut self.document, index)?;
        if let Some(event) = request {
            self.bus.publish(event);
        }
        self.dispatch()
    }

    /// Activates the entry matching an href, view id or label.
    pub fn activate_target(&mut self, target: &str) -> Result<(), PageError> {
        let index = self
            .document
            .find_nav(target)
            .ok_or_else(|| PageError::InvalidViewTarget {
                href: target.to_string(),
            })?;
        self.activate(index)
    }

    /// Publishes a `nav-request` directly, bypassing the navigation entries.
    pub fn request_view(&mut self, view: ViewId) -> Result<(), PageError> {
        self.bus.publish(PageEvent::NavRequest(view));
        self.dispatch()
    }

    fn dispatch(&mut self) -> Result<(), PageError> {
        let mut listeners: [&mut dyn PageListener; 2] = [&mut self.outlet, &mut self.feed];
        self.bus.dispatch(&mut self.document, &mut listeners)
    }

    pub fn next_frame(&mut self) -> Vec<FeedOutcome> {
        self.feed.next_frame(&mut self.document)
    }

    /// Waits for the pending fetch, if any, then runs a frame.
    pub async fn settle(&mut self) -> Vec<FeedOutcome> {
        self.feed.wait_for_fetch().await;
        self.next_frame()
    }
}
