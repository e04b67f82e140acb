use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use shared::{domain::Post, error::PageError};
use tokio::sync::watch;

use crate::{
    document::{Document, PageLayout},
    posts::PostSource,
};

pub(crate) const LAYOUT: &str = r##"
blog_view = "blog"

[[nav]]
label = "Home"
href = "#home"
active = true

[[nav]]
label = "Blog"
href = "#blog"

[[nav]]
label = "About"
href = "#about"

[[section]]
id = "home"
active = true
heading = "Home"

[[section]]
id = "blog"
heading = "Blog"
post_list = true

[[section]]
id = "about"
heading = "About"

[post_template]
item_class = "post"
"##;

pub(crate) fn layout() -> PageLayout {
    PageLayout::from_toml_str(LAYOUT).expect("layout")
}

pub(crate) fn document() -> Document {
    Document::from_layout(&layout()).expect("document")
}

pub(crate) fn post(url: &str, title: &str) -> Post {
    Post {
        url: url.into(),
        title: title.into(),
    }
}

pub(crate) struct ScriptedPostSource {
    calls: AtomicUsize,
    response: Result<Vec<Post>, PageError>,
    gate: Option<watch::Receiver<bool>>,
}

impl ScriptedPostSource {
    pub(crate) fn ok(posts: Vec<Post>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            response: Ok(posts),
            gate: None,
        }
    }

    pub(crate) fn failing(err: PageError) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            response: Err(err),
            gate: None,
        }
    }

    /// Holds every fetch until the returned sender publishes `true`.
    pub(crate) fn gated(mut self) -> (Self, watch::Sender<bool>) {
        let (tx, rx) = watch::channel(false);
        self.gate = Some(rx);
        (self, tx)
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PostSource for ScriptedPostSource {
    fn endpoint(&self) -> &str {
        "test://posts"
    }

    async fn fetch_posts(&self) -> Result<Vec<Post>, PageError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            let mut gate = gate.clone();
            let _ = gate.wait_for(|open| *open).await;
        }
        self.response.clone()
    }
}
