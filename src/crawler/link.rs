//! Link record types produced by extraction

use std::fmt;
use std::hash::{Hash, Hasher};

/// The kind of element a link was found on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkCategory {
    /// `<a href>` page link
    Url,
    /// `<area href>` image-map link
    Area,
    /// `<img src>`
    Image,
    /// `<source src>`
    Media,
    /// `<script src>`
    Script,
    /// `<link href>`
    CssLink,
    /// `url(...)` inside an inline `style` attribute
    CssBackground,
}

impl LinkCategory {
    /// Returns the tag name used for this category in the sitemap document
    pub fn tag_name(&self) -> &'static str {
        match self {
            Self::Url => "URL",
            Self::Area => "AREA",
            Self::Image => "IMAGE",
            Self::Media => "MEDIA",
            Self::Script => "SCRIPT",
            Self::CssLink => "CSSLINK",
            Self::CssBackground => "CSSBACKGROUND",
        }
    }
}

impl fmt::Display for LinkCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag_name())
    }
}

/// A typed, resolved reference discovered on a page
///
/// Two links are equal when their targets are equal, whatever their
/// category or crawlability.
#[derive(Debug, Clone)]
pub struct PageLink {
    /// The resolved link address
    pub target: String,

    /// The element kind the link came from
    pub category: LinkCategory,

    /// Whether the crawler may follow this link
    pub crawlable: bool,
}

impl PageLink {
    pub fn new(target: impl Into<String>, category: LinkCategory, crawlable: bool) -> Self {
        Self {
            target: target.into(),
            category,
            crawlable,
        }
    }
}

impl PartialEq for PageLink {
    fn eq(&self, other: &Self) -> bool {
        self.target == other.target
    }
}

impl Eq for PageLink {}

impl Hash for PageLink {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.target.hash(state);
    }
}
