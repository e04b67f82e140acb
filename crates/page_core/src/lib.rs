pub mod bus;
pub mod document;
pub mod feed;
pub mod navigation;
pub mod outlet;
pub mod page;
pub mod posts;

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;

pub use bus::{EventBus, PageListener};
pub use document::{Document, PageLayout, SectionLayout};
pub use feed::{BlogFeed, FeedOutcome, FeedState};
pub use navigation::NavigationController;
pub use outlet::ViewOutlet;
pub use page::Page;
pub use posts::{decode_posts, HttpPostSource, MissingPostSource, PostSource};
