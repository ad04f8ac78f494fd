//! Renders a [`Listing`] to HTML. The output carries the markers the page's
//! script relies on: a `blog-post` element per post, a `tag-{name}` marker
//! per tag, the `pager-nav` control, and the `no-blog-posts-message` element
//! inside its container. Hidden elements are rendered with
//! `style="display: none"`.
//!
//! The posts sit alone in a `blog-posts` container, so the last post is its
//! parent's last child; the script relies on that to hide the pager.

use crate::page::Listing;
use gtmpl::{Template, Value};
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

/// The template used when a project doesn't bring its own.
pub const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{{.title}}</title>
</head>
<body>
<h1>{{.title}}</h1>
<div class="blog-posts">
{{range .posts}}<article class="blog-post" id="{{.id}}"{{if not .visible}} style="display: none"{{end}}>
<h2>{{.title}}</h2>
<time>{{.date}}</time>
<ul class="tags">{{range .tags}}<li><a class="{{.class}}" href="{{.href}}">{{.tag}}</a></li>{{end}}</ul>
{{.summary}}</article>{{end}}</div>
<div class="no-blog-posts"{{if not .message_visible}} style="display: none"{{end}}><p id="no-blog-posts-message">{{.message}}</p></div>
<nav class="pager-nav"{{if not .pager_visible}} style="display: none"{{end}}><button type="button">Load more</button></nav>
</body>
</html>
"#;

/// Parses the template at `path`, or [`DEFAULT_TEMPLATE`] when there is none.
pub fn parse_template(path: Option<&Path>) -> Result<Template> {
    let mut contents = String::new();
    match path {
        Some(path) => {
            use std::io::Read;
            File::open(path)
                .map_err(|e| Error::OpenTemplateFile {
                    path: path.to_owned(),
                    err: e,
                })?
                .read_to_string(&mut contents)?;
        }
        None => contents.push_str(DEFAULT_TEMPLATE),
    }

    let mut template = Template::default();
    template.parse(&contents).map_err(Error::ParseTemplate)?;
    Ok(template)
}

/// Templates `listing` with `template` and returns the resulting HTML.
pub fn render(listing: &Listing, template: &Template) -> Result<String> {
    let context = gtmpl::Context::from(to_value(listing)).map_err(Error::Template)?;
    let mut out: Vec<u8> = Vec::new();
    template.execute(&mut out, &context)?;
    Ok(String::from_utf8(out)?)
}

/// Converts a [`Listing`] into a [`Value::Object`] with fields `title`,
/// `posts`, `pager_visible`, `message_visible`, and `message`.
fn to_value(listing: &Listing) -> Value {
    let mut m: HashMap<String, Value> = HashMap::new();
    m.insert("title".to_owned(), Value::String(listing.title.clone()));
    m.insert(
        "posts".to_owned(),
        Value::Array(listing.posts.iter().map(|p| p.to_value()).collect()),
    );
    m.insert("pager_visible".to_owned(), Value::Bool(listing.pager.visible));
    m.insert(
        "message_visible".to_owned(),
        Value::Bool(listing.message.is_visible()),
    );
    m.insert("message".to_owned(), Value::String(listing.message.html.clone()));
    Value::Object(m)
}

/// The result of a fallible rendering operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error in a rendering operation.
#[derive(Debug)]
pub enum Error {
    /// Returned for I/O problems while opening the template file.
    OpenTemplateFile { path: PathBuf, err: io::Error },

    /// Returned for errors parsing the template.
    ParseTemplate(String),

    /// An error during templating.
    Template(String),

    /// Returned when the template produces invalid UTF-8.
    Utf8(std::string::FromUtf8Error),

    /// Returned for other I/O errors.
    Io(io::Error),
}

impl From<io::Error> for Error {
    /// Converts an [`io::Error`] into an [`Error`]. This allows us to use the
    /// `?` operator for fallible I/O operations.
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<String> for Error {
    /// Converts a template error message ([`String`]) into an [`Error`]. This
    /// allows us to use the `?` operator for fallible template operations.
    fn from(err: String) -> Error {
        Error::Template(err)
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(err: std::string::FromUtf8Error) -> Error {
        Error::Utf8(err)
    }
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as presentable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::OpenTemplateFile { path, err } => {
                write!(f, "Opening template file '{}': {}", path.display(), err)
            }
            Error::ParseTemplate(err) => write!(f, "Parsing template: {}", err),
            Error::Template(err) => err.fmt(f),
            Error::Utf8(err) => err.fmt(f),
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::OpenTemplateFile { path: _, err } => Some(err),
            Error::ParseTemplate(_) => None,
            Error::Template(_) => None,
            Error::Utf8(err) => Some(err),
            Error::Io(err) => Some(err),
        }
    }
}
