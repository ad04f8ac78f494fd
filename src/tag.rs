//! Defines the [`Tag`] type, which represents a [`crate::post::Post`] tag, and
//! the [`ActiveTag`] type, which is the tag filter selected by the page's
//! navigation fragment.

use gtmpl::Value;
use std::fmt;
use url::Url;

/// Represents a [`crate::post::Post`] tag. Tags are rendered as `tag-{name}`
/// markers inside each post element and linked from the index page as
/// `#{name}`, so following a tag link selects it as the [`ActiveTag`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag {
    /// The tag's name. This should be slugified so e.g., `macOS` and `MacOS`
    /// resolve to the same value, and also so the field can be dropped into a
    /// URL fragment and a class name.
    pub name: String,
}

impl Tag {
    /// Builds a [`Tag`] from a raw frontmatter label by slugifying it.
    pub fn new(label: &str) -> Tag {
        Tag {
            name: slug::slugify(label),
        }
    }

    /// The marker carried by posts with this tag.
    pub fn class(&self) -> String {
        format!("tag-{}", self.name)
    }

    /// The in-page link which selects this tag.
    pub fn href(&self) -> String {
        format!("#{}", self.name)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.name.fmt(f)
    }
}

impl From<&Tag> for Value {
    /// Converts [`Tag`]s into [`Value`]s for templating.
    fn from(t: &Tag) -> Value {
        use std::collections::HashMap;
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("tag".to_owned(), Value::String(t.name.clone()));
        m.insert("class".to_owned(), Value::String(t.class()));
        m.insert("href".to_owned(), Value::String(t.href()));
        Value::Object(m)
    }
}

/// The tag filter derived from the navigation fragment (the part of the URL
/// after `#`). An empty active tag means "no tag filter".
///
/// The fragment is taken verbatim: it is neither slugified nor unescaped, so
/// `#MacOS` does not select posts tagged `macos`.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ActiveTag(String);

impl ActiveTag {
    /// No tag filter.
    pub fn none() -> ActiveTag {
        ActiveTag::default()
    }

    /// Derives the active tag from a location hash such as `#rust`. Only the
    /// first `#` is removed; a hash without one is used as-is.
    pub fn from_hash(hash: &str) -> ActiveTag {
        ActiveTag(hash.replacen('#', "", 1))
    }

    /// Derives the active tag from the fragment of `url`. A URL without a
    /// fragment yields no tag filter.
    pub fn from_url(url: &Url) -> ActiveTag {
        ActiveTag(url.fragment().unwrap_or_default().to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ActiveTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_tag_is_slugified() {
        assert_eq!(Tag::new("macOS"), Tag::new("MacOS"));
        assert_eq!("rust-lang", Tag::new("Rust Lang").name);
        assert_eq!("tag-rust-lang", Tag::new("Rust Lang").class());
        assert_eq!("#rust-lang", Tag::new("Rust Lang").href());
    }

    #[test]
    fn test_active_tag_from_hash() {
        assert_eq!("rust", ActiveTag::from_hash("#rust").as_str());
        assert_eq!("rust#2", ActiveTag::from_hash("#rust#2").as_str());
        assert_eq!("rust", ActiveTag::from_hash("rust").as_str());
        assert!(ActiveTag::from_hash("#").is_empty());
        assert!(ActiveTag::from_hash("").is_empty());
    }

    #[test]
    fn test_active_tag_from_url() -> Result<(), url::ParseError> {
        let url = Url::parse("https://example.org/pages/index.html#rust")?;
        assert_eq!("rust", ActiveTag::from_url(&url).as_str());

        let url = Url::parse("https://example.org/pages/index.html")?;
        assert!(ActiveTag::from_url(&url).is_empty());

        let url = Url::parse("https://example.org/pages/index.html#")?;
        assert!(ActiveTag::from_url(&url).is_empty());
        Ok(())
    }

    #[test]
    fn test_active_tag_is_verbatim() {
        assert_eq!("MacOS", ActiveTag::from_hash("#MacOS").as_str());
        assert_ne!(Tag::new("macOS").name, ActiveTag::from_hash("#MacOS").as_str());
    }
}
