//! In-memory page document: navigation entries, content sections and the
//! post template, built from a TOML page layout.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use shared::{
    domain::{Heading, NavItem, PostEntry, PostTemplate, ViewId, ViewSection},
    error::PageError,
};

fn default_blog_view() -> ViewId {
    ViewId::from("blog")
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageLayout {
    #[serde(default = "default_blog_view")]
    pub blog_view: ViewId,
    #[serde(default)]
    pub nav: Vec<NavItem>,
    #[serde(default, rename = "section")]
    pub sections: Vec<SectionLayout>,
    #[serde(default)]
    pub post_template: Option<PostTemplate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SectionLayout {
    pub id: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub heading: Option<String>,
    #[serde(default = "default_true")]
    pub heading_focusable: bool,
    #[serde(default)]
    pub post_list: bool,
}

impl PageLayout {
    pub fn from_toml_str(raw: &str) -> Result<Self, PageError> {
        toml::from_str(raw).map_err(|err| PageError::layout(err.to_string()))
    }
}

impl SectionLayout {
    fn to_section(&self) -> ViewSection {
        ViewSection {
            id: ViewId::new(self.id.trim()),
            active: self.active,
            heading: self.heading.as_ref().map(|text| Heading {
                text: text.clone(),
                focusable: self.heading_focusable,
            }),
            post_list: self.post_list.then(Vec::new),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Document {
    nav: Vec<NavItem>,
    sections: Vec<ViewSection>,
    post_template: PostTemplate,
    focused: Option<ViewId>,
}

impl Document {
    pub fn from_layout(layout: &PageLayout) -> Result<Self, PageError> {
        Self::new(
            layout.nav.clone(),
            layout.sections.iter().map(SectionLayout::to_section).collect(),
            layout.post_template.clone().unwrap_or_default(),
        )
    }

    pub fn new(
        nav: Vec<NavItem>,
        sections: Vec<ViewSection>,
        post_template: PostTemplate,
    ) -> Result<Self, PageError> {
        let mut seen = HashSet::new();
        for section in &sections {
            if section.id.as_str().is_empty() {
                return Err(PageError::layout("section with empty id"));
            }
            if !seen.insert(section.id.clone()) {
                return Err(PageError::layout(format!(
                    "duplicate section id '{}'",
                    section.id
                )));
            }
        }

        let active_nav = nav.iter().filter(|item| item.active).count();
        if active_nav > 1 {
            return Err(PageError::layout(format!(
                "{active_nav} navigation entries are marked active"
            )));
        }
        let active_sections = sections.iter().filter(|section| section.active).count();
        if active_sections > 1 {
            return Err(PageError::layout(format!(
                "{active_sections} sections are marked active"
            )));
        }

        Ok(Self {
            nav,
            sections,
            post_template,
            focused: None,
        })
    }

    pub fn nav_items(&self) -> &[NavItem] {
        &self.nav
    }

    pub fn sections(&self) -> &[ViewSection] {
        &self.sections
    }

    pub fn section(&self, id: &ViewId) -> Option<&ViewSection> {
        self.sections.iter().find(|section| &section.id == id)
    }

    pub fn has_view(&self, id: &ViewId) -> bool {
        self.section(id).is_some()
    }

    pub fn active_nav_index(&self) -> Option<usize> {
        self.nav.iter().position(|item| item.active)
    }

    pub fn active_view(&self) -> Option<&ViewId> {
        self.sections
            .iter()
            .find(|section| section.active)
            .map(|section| &section.id)
    }

    /// View whose heading currently holds input focus.
    pub fn focused(&self) -> Option<&ViewId> {
        self.focused.as_ref()
    }

    pub fn post_entries(&self, id: &ViewId) -> Option<&[PostEntry]> {
        self.section(id)?.post_list.as_deref()
    }

    /// True when exactly one nav entry and exactly one section are active
    /// and the entry targets that section.
    pub fn is_synchronized(&self) -> bool {
        let navs: Vec<_> = self.nav.iter().filter(|item| item.active).collect();
        let views: Vec<_> = self.sections.iter().filter(|s| s.active).collect();
        match (navs.as_slice(), views.as_slice()) {
            ([nav], [view]) => nav.target().as_ref() == Some(&view.id),
            _ => false,
        }
    }

    /// Finds the nav entry matching an href (`#blog`), a view id or a label.
    pub fn find_nav(&self, target: &str) -> Option<usize> {
        let target = target.trim();
        self.nav
            .iter()
            .position(|item| item.href == target)
            .or_else(|| {
                self.nav
                    .iter()
                    .position(|item| item.target().is_some_and(|view| view.as_str() == target))
            })
            .or_else(|| {
                self.nav
                    .iter()
                    .position(|item| item.label.eq_ignore_ascii_case(target))
            })
    }

    pub(crate) fn set_nav_active(&mut self, index: usize, active: bool) {
        if let Some(item) = self.nav.get_mut(index) {
            item.active = active;
        }
    }

    pub(crate) fn set_section_active(&mut self, id: &ViewId, active: bool) -> bool {
        match self.sections.iter_mut().find(|section| &section.id == id) {
            Some(section) => {
                section.active = active;
                true
            }
            None => false,
        }
    }

    /// Moves focus to the section's focusable heading. Returns false when the
    /// section has none, in which case focus stays where it was.
    pub(crate) fn focus_heading(&mut self, id: &ViewId) -> bool {
        let focusable = self
            .section(id)
            .and_then(|section| section.heading.as_ref())
            .is_some_and(|heading| heading.focusable);
        if focusable {
            self.focused = Some(id.clone());
        }
        focusable
    }

    pub(crate) fn post_template(&self) -> &PostTemplate {
        &self.post_template
    }

    pub(crate) fn append_posts(
        &mut self,
        id: &ViewId,
        entries: Vec<PostEntry>,
    ) -> Result<usize, PageError> {
        let list = self
            .sections
            .iter_mut()
            .find(|section| &section.id == id)
            .ok_or_else(|| PageError::ViewNotFound {
                view_id: id.to_string(),
            })?
            .post_list
            .as_mut()
            .ok_or_else(|| PageError::layout(format!("section '{id}' has no post list")))?;
        let count = entries.len();
        list.extend(entries);
        Ok(count)
    }
}

#[cfg(test)]
#[path = "tests/document_tests.rs"]
mod tests;
