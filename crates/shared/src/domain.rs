use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a content section, e.g. `home` or `blog`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewId(pub String);

impl ViewId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses an in-page link target (`#blog`) into the view it names.
    pub fn from_href(href: &str) -> Option<Self> {
        let id = href.trim().strip_prefix('#')?;
        if id.is_empty() || id.chars().any(char::is_whitespace) {
            return None;
        }
        Some(Self(id.to_string()))
    }

    pub fn to_href(&self) -> String {
        format!("#{}", self.0)
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ViewId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    pub label: String,
    pub href: String,
    #[serde(default)]
    pub active: bool,
}

impl NavItem {
    pub fn target(&self) -> Option<ViewId> {
        ViewId::from_href(&self.href)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub text: String,
    pub focusable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostEntry {
    pub class: String,
    pub href: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewSection {
    pub id: ViewId,
    #[serde(default)]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<Heading>,
    /// Present only on sections that host a post list container.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_list: Option<Vec<PostEntry>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostTemplate {
    pub item_class: String,
}

impl Default for PostTemplate {
    fn default() -> Self {
        Self {
            item_class: "post".into(),
        }
    }
}

impl PostTemplate {
    pub fn instantiate(&self, post: &Post) -> PostEntry {
        PostEntry {
            class: self.item_class.clone(),
            href: post.url.clone(),
            text: post.title.clone(),
        }
    }
}

/// A blog post record as served by the posts endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub url: String,
    pub title: String,
}
