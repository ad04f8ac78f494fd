//! Defines the [`Post`] type, the post element of an index page, and the
//! [`Tagged`] trait through which the filter checks tag membership. See
//! [`Post::to_value`] for how posts are converted into template values.

use crate::element::Element;
use crate::tag::Tag;
use gtmpl::Value;
use std::collections::{HashMap, HashSet};

/// Anything that carries tag markers.
pub trait Tagged {
    /// Returns whether the element carries the marker for the tag named
    /// `name`. Names are compared exactly.
    fn has_tag(&self, name: &str) -> bool;
}

/// A blog post as it appears on an index page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Post {
    /// The path of the source file relative to the posts directory, less the
    /// extension (e.g., `2021/hello` for `{posts_directory}/2021/hello.md`).
    pub id: String,

    /// The title of the post.
    pub title: String,

    /// The date of the post, formatted `YYYY-MM-DD`.
    pub date: String,

    /// The HTML of the post body above the `<!-- more -->` fold.
    pub summary: String,

    /// Whether the body continues past the summary.
    pub summarized: bool,

    /// The tags associated with the post.
    pub tags: HashSet<Tag>,

    /// Whether the post element is currently displayed.
    pub visible: bool,
}

impl Post {
    /// Creates a hidden post with no body. Mostly useful when the index is
    /// assembled by hand rather than parsed.
    pub fn new<'a>(id: &str, tags: impl IntoIterator<Item = &'a str>) -> Post {
        Post {
            id: id.to_owned(),
            title: id.to_owned(),
            date: String::default(),
            summary: String::default(),
            summarized: false,
            tags: tags.into_iter().map(Tag::new).collect(),
            visible: false,
        }
    }

    /// Returns the post's tags sorted by name so output is stable.
    pub fn sorted_tags(&self) -> Vec<&Tag> {
        let mut tags: Vec<&Tag> = self.tags.iter().collect();
        tags.sort();
        tags
    }

    /// Converts a [`Post`] into a template-renderable [`Value`]. The result
    /// is a [`Value::Object`] with fields `id`, `title`, `date`, `summary`,
    /// `summarized`, `tags`, and `visible`.
    pub fn to_value(&self) -> Value {
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("id".to_owned(), Value::String(self.id.clone()));
        m.insert("title".to_owned(), Value::String(self.title.clone()));
        m.insert("date".to_owned(), Value::String(self.date.clone()));
        m.insert("summary".to_owned(), Value::String(self.summary.clone()));
        m.insert("summarized".to_owned(), Value::Bool(self.summarized));
        m.insert(
            "tags".to_owned(),
            Value::Array(self.sorted_tags().into_iter().map(Value::from).collect()),
        );
        m.insert("visible".to_owned(), Value::Bool(self.visible));
        Value::Object(m)
    }
}

impl Tagged for Post {
    fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.name == name)
    }
}

impl Element for Post {
    fn is_visible(&self) -> bool {
        self.visible
    }

    fn show(&mut self) {
        self.visible = true;
    }

    fn hide(&mut self) {
        self.visible = false;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_has_tag_uses_slugified_names() {
        let post = Post::new("hello", vec!["Rust Lang", "macOS"]);
        assert!(post.has_tag("rust-lang"));
        assert!(post.has_tag("macos"));
        assert!(!post.has_tag("macOS"));
        assert!(!post.has_tag(""));
    }

    #[test]
    fn test_to_value_sorts_tags() {
        let post = Post::new("hello", vec!["zeta", "alpha"]);
        match post.to_value() {
            Value::Object(m) => match &m["tags"] {
                Value::Array(tags) => {
                    let names: Vec<String> = tags
                        .iter()
                        .map(|t| match t {
                            Value::Object(t) => match &t["tag"] {
                                Value::String(s) => s.clone(),
                                _ => panic!("tag name isn't a string"),
                            },
                            _ => panic!("tag isn't an object"),
                        })
                        .collect();
                    assert_eq!(vec!["alpha", "zeta"], names);
                }
                _ => panic!("tags isn't an array"),
            },
            _ => panic!("post isn't an object"),
        }
    }
}
