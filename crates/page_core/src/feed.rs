//! Blog feed: fetches the post list the first time the blog view is shown
//! and renders it on the following frame.

use std::sync::Arc;

use shared::{
    domain::{Post, ViewId},
    error::PageError,
    protocol::PageEvent,
};
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, info, warn};

use crate::{bus::PageListener, document::Document, posts::PostSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedState {
    Uninitialized,
    Initialized,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedOutcome {
    Rendered { count: usize },
    /// The blog view was left before the fetch completed.
    Discarded,
    Failed(PageError),
}

struct FetchCompletion {
    generation: u64,
    result: Result<Vec<Post>, PageError>,
}

struct PendingFetch {
    generation: u64,
    task: JoinHandle<()>,
}

pub struct BlogFeed {
    blog_view: ViewId,
    source: Arc<dyn PostSource>,
    state: FeedState,
    generation: u64,
    fetches_started: u64,
    pending: Option<PendingFetch>,
    completions_tx: mpsc::UnboundedSender<FetchCompletion>,
    completions_rx: mpsc::UnboundedReceiver<FetchCompletion>,
}

impl BlogFeed {
    pub fn new(blog_view: ViewId, source: Arc<dyn PostSource>) -> Self {
        debug!(%blog_view, endpoint = source.endpoint(), "blog feed constructed");
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            blog_view,
            source,
            state: FeedState::Uninitialized,
            generation: 0,
            fetches_started: 0,
            pending: None,
            completions_tx,
            completions_rx,
        }
    }

    pub fn blog_view(&self) -> &ViewId {
        &self.blog_view
    }

    pub fn state(&self) -> FeedState {
        self.state
    }

    pub fn fetches_started(&self) -> u64 {
        self.fetches_started
    }

    pub fn has_pending_fetch(&self) -> bool {
        self.pending.is_some()
    }

    pub fn handle_view_changed(&mut self, view: &ViewId) {
        if view == &self.blog_view {
            self.init();
        } else {
            self.leave();
        }
    }

    fn init(&mut self) {
        if self.state == FeedState::Initialized {
            return;
        }
        self.state = FeedState::Initialized;
        info!(view = %self.blog_view, "blog feed initializing");
        self.load_and_render();
    }

    /// Starts the post fetch. The result is rendered by a later `next_frame`.
    pub fn load_and_render(&mut self) {
        let generation = self.generation;
        let source = Arc::clone(&self.source);
        let tx = self.completions_tx.clone();
        let task = tokio::spawn(async move {
            let result = source.fetch_posts().await;
            let _ = tx.send(FetchCompletion { generation, result });
        });
        self.fetches_started += 1;
        self.pending = Some(PendingFetch { generation, task });
    }

    fn leave(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        pending.task.abort();
        self.generation += 1;
        self.state = FeedState::Uninitialized;
        warn!(
            generation = pending.generation,
            "left blog view before posts arrived; fetch abandoned"
        );
    }

    /// Waits until the pending fetch, if any, has finished.
    pub async fn wait_for_fetch(&mut self) {
        if let Some(pending) = self.pending.as_mut() {
            if !pending.task.is_finished() {
                let _ = (&mut pending.task).await;
            }
        }
    }

    /// Renders every completed fetch. Call once per frame.
    pub fn next_frame(&mut self, document: &mut Document) -> Vec<FeedOutcome> {
        let finished = self
            .pending
            .as_ref()
            .is_some_and(|pending| pending.task.is_finished());

        let mut outcomes = Vec::new();
        while let Ok(completion) = self.completions_rx.try_recv() {
            outcomes.push(self.apply(document, completion));
        }

        if finished && self.pending.is_some() {
            self.pending = None;
            self.state = FeedState::Uninitialized;
            outcomes.push(FeedOutcome::Failed(PageError::FetchFailed {
                url: self.source.endpoint().to_string(),
                reason: "fetch task ended without a result".into(),
            }));
        }
        outcomes
    }

    fn apply(&mut self, document: &mut Document, completion: FetchCompletion) -> FeedOutcome {
        let current = self
            .pending
            .as_ref()
            .is_some_and(|pending| pending.generation == completion.generation);
        if !current || completion.generation != self.generation {
            debug!(
                generation = completion.generation,
                current = self.generation,
                "discarding stale posts"
            );
            return FeedOutcome::Discarded;
        }
        self.pending = None;

        let rendered = completion.result.and_then(|posts| {
            let template = document.post_template();
            let entries = posts.iter().map(|post| template.instantiate(post)).collect();
            document.append_posts(&self.blog_view, entries)
        });

        match rendered {
            Ok(count) => {
                info!(count, "posts rendered");
                FeedOutcome::Rendered { count }
            }
            Err(err) => {
                warn!(%err, "blog feed load failed");
                self.state = FeedState::Uninitialized;
                FeedOutcome::Failed(err)
            }
        }
    }
}

impl PageListener for BlogFeed {
    fn on_event(
        &mut self,
        _document: &mut Document,
        event: &PageEvent,
    ) -> Result<Option<PageEvent>, PageError> {
        if let PageEvent::ViewChanged(view) = event {
            self.handle_view_changed(view);
        }
        Ok(None)
    }
}

impl Drop for BlogFeed {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.task.abort();
        }
    }
}

#[cfg(test)]
#[path = "tests/feed_tests.rs"]
mod tests;
