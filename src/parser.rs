//! Parses [`Post`] objects from markdown source files on disk. Each file
//! carries YAML frontmatter followed by a markdown body; see
//! [`parse_posts`] for the expected layout.

use std::{
    collections::HashSet,
    fmt,
    fs::File,
    path::{Component, Path, PathBuf},
};

use chrono::NaiveDate;
use log::{debug, info};
use pulldown_cmark::{html, Options, Parser as MarkdownParser};
use serde::Deserialize;
use walkdir::WalkDir;

use crate::{post::Post, tag::Tag};

const MARKDOWN_EXTENSION: &str = "md";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Marks the end of a post's summary.
const FOLD_TAG: &str = "<!-- more -->";

/// Searches `source_directory` recursively for post files (extension = `.md`)
/// and returns the posts sorted by date (most recent first). Posts sharing a
/// date are ordered by id. Each post file must be structured as follows:
///
/// 1. Initial frontmatter fence (`---`)
/// 2. YAML frontmatter with fields `Title`, `Date`, and optionally `Tags`
/// 3. Terminal frontmatter fence (`---`)
/// 4. Post body
///
/// For example:
///
/// ```md
/// ---
/// Title: Hello, world!
/// Date: 2021-04-16
/// Tags: [greet]
/// ---
/// # Hello
///
/// World
/// ```
///
/// Every parsed post starts out hidden.
pub fn parse_posts(source_directory: &Path) -> Result<Vec<Post>> {
    let mut posts = Vec::new();
    for result in WalkDir::new(source_directory) {
        let entry = result?;
        if !entry.file_type().is_file()
            || entry.path().extension().map_or(true, |ext| ext != MARKDOWN_EXTENSION)
        {
            continue;
        }

        // strip_prefix() should never fail since `source_directory` is
        // always an ancestor of the entry
        let relative_path = entry
            .path()
            .strip_prefix(source_directory)
            .map_err(|_| InvalidFileNameError(entry.path().to_owned()))?;
        posts.push(parse_dated_post(source_directory, relative_path)?);
    }

    let posts = sort_by_date(posts);
    info!(
        "parsed {} posts from `{}`",
        posts.len(),
        source_directory.display()
    );
    Ok(posts)
}

/// Parses a single [`Post`] from the file at `relative_path` within
/// `posts_source_directory`. The post's id is `relative_path` less the
/// extension (e.g., the id for `{posts_source_directory}/foo/bar.md` is
/// `foo/bar`).
pub fn parse_post(posts_source_directory: &Path, relative_path: &Path) -> Result<Post> {
    parse_dated_post(posts_source_directory, relative_path).map(|(_, post)| post)
}

/// A post alongside its parsed date, which is what posts are ordered by.
type DatedPost = (NaiveDate, Post);

fn parse_dated_post(posts_source_directory: &Path, relative_path: &Path) -> Result<DatedPost> {
    match _parse_post(posts_source_directory, relative_path) {
        Ok(p) => Ok(p),
        Err(e) => Err(Error::Annotated(
            format!("parsing post `{}`", relative_path.display()),
            Box::new(e),
        )),
    }
}

fn _parse_post(posts_source_directory: &Path, relative_path: &Path) -> Result<DatedPost> {
    use std::io::Read;
    let mut contents = String::new();
    File::open(posts_source_directory.join(relative_path))?.read_to_string(&mut contents)?;
    let (date, post) = parse_dated_source(&post_id(relative_path)?, &contents)?;
    debug!("parsed post `{}` with {} tags", post.id, post.tags.len());
    Ok((date, post))
}

/// Orders posts most recent first, by parsed date rather than by the text of
/// the `Date` field. Posts sharing a date are ordered by id.
fn sort_by_date(mut posts: Vec<DatedPost>) -> Vec<Post> {
    posts.sort_by(|(a_date, a), (b_date, b)| b_date.cmp(a_date).then_with(|| a.id.cmp(&b.id)));
    posts.into_iter().map(|(_, post)| post).collect()
}

/// Parses a [`Post`] from the raw contents of a source file. The post's date
/// is normalized to `YYYY-MM-DD`, so e.g. `2021-4-6` becomes `2021-04-06`.
pub fn parse_source(id: &str, input: &str) -> Result<Post> {
    parse_dated_source(id, input).map(|(_, post)| post)
}

fn parse_dated_source(id: &str, input: &str) -> Result<DatedPost> {
    fn frontmatter_indices(input: &str) -> Result<(usize, usize, usize)> {
        const FENCE: &str = "---";
        if !input.starts_with(FENCE) {
            return Err(Error::FrontmatterMissingStartFence);
        }
        match input[FENCE.len()..].find(FENCE) {
            None => Err(Error::FrontmatterMissingEndFence),
            Some(offset) => Ok((
                FENCE.len(),                        // yaml_start
                FENCE.len() + offset,               // yaml_stop
                FENCE.len() + offset + FENCE.len(), // body_start
            )),
        }
    }

    let (yaml_start, yaml_stop, body_start) = frontmatter_indices(input)?;
    let frontmatter: Frontmatter = serde_yaml::from_str(&input[yaml_start..yaml_stop])?;

    let date = NaiveDate::parse_from_str(&frontmatter.date, DATE_FORMAT).map_err(|err| {
        Error::InvalidDate {
            date: frontmatter.date.clone(),
            err,
        }
    })?;

    let (summary, summarized) = summarize(&input[body_start..]);
    Ok((
        date,
        Post {
            id: id.to_owned(),
            title: frontmatter.title,
            date: date.format(DATE_FORMAT).to_string(),
            summary,
            summarized,
            tags: frontmatter.tags.iter().map(|t| Tag::new(t)).collect(),
            visible: false,
        },
    ))
}

/// Renders `markdown` to HTML and cuts it at the fold. Returns the summary
/// and whether anything was cut.
fn summarize(markdown: &str) -> (String, bool) {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_SMART_PUNCTUATION);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut body = String::new();
    html::push_html(&mut body, MarkdownParser::new_ext(markdown, options));
    match body.find(FOLD_TAG) {
        Some(i) => {
            body.truncate(i);
            (body, true)
        }
        None => (body, false),
    }
}

/// Joins the components of `relative_path`, less the extension, with `/`.
fn post_id(relative_path: &Path) -> Result<String> {
    let without_extension = relative_path.with_extension("");
    let mut parts = Vec::new();
    for component in without_extension.components() {
        match component {
            Component::Normal(part) => parts.push(
                part.to_str()
                    .ok_or_else(|| InvalidFileNameError(relative_path.to_owned()))?,
            ),
            Component::CurDir => {}
            _ => return Err(InvalidFileNameError(relative_path.to_owned()).into()),
        }
    }
    Ok(parts.join("/"))
}

#[derive(Deserialize, Clone)]
struct Frontmatter {
    /// The title of the post.
    #[serde(rename = "Title")]
    pub title: String,

    /// The date of the post.
    #[serde(rename = "Date")]
    pub date: String,

    /// The tags associated with the post.
    #[serde(default, rename = "Tags")]
    pub tags: HashSet<String>,
}

#[derive(Debug)]
pub struct InvalidFileNameError(PathBuf);

impl fmt::Display for InvalidFileNameError {
    /// Displays an [`InvalidFileNameError`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid file name: {:?}", &self.0)
    }
}

impl std::error::Error for InvalidFileNameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

/// Represents the result of a [`Post`]-parse operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error parsing a [`Post`] object.
#[derive(Debug)]
pub enum Error {
    /// Returned when a post source file is missing its starting frontmatter
    /// fence (`---`).
    FrontmatterMissingStartFence,

    /// Returned when a post source file is missing its terminal frontmatter
    /// fence (`---` i.e., the starting fence was found but the ending one was
    /// missing).
    FrontmatterMissingEndFence,

    /// Returned when there was an error parsing the frontmatter as YAML.
    DeserializeYaml(serde_yaml::Error),

    /// Returned when the `Date` field isn't formatted `YYYY-MM-DD`.
    InvalidDate {
        date: String,
        err: chrono::ParseError,
    },

    /// Returned for other I/O errors.
    Io(std::io::Error),

    /// Returned for WalkDir I/O errors.
    WalkDir(walkdir::Error),

    /// Returned when a source file name can't be turned into a post id.
    InvalidFileName(InvalidFileNameError),

    /// An error with an annotation.
    Annotated(String, Box<Error>),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::FrontmatterMissingStartFence => {
                write!(f, "Post must begin with `---`")
            }
            Error::FrontmatterMissingEndFence => {
                write!(f, "Missing closing `---`")
            }
            Error::DeserializeYaml(err) => err.fmt(f),
            Error::InvalidDate { date, err } => {
                write!(f, "invalid date `{}`: {}", date, err)
            }
            Error::Io(err) => err.fmt(f),
            Error::WalkDir(err) => err.fmt(f),
            Error::InvalidFileName(err) => err.fmt(f),
            Error::Annotated(annotation, err) => {
                write!(f, "{}: {}", &annotation, err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::FrontmatterMissingStartFence => None,
            Error::FrontmatterMissingEndFence => None,
            Error::DeserializeYaml(err) => Some(err),
            Error::InvalidDate { date: _, err } => Some(err),
            Error::Io(err) => Some(err),
            Error::WalkDir(err) => Some(err),
            Error::InvalidFileName(err) => Some(err),
            Error::Annotated(_, err) => Some(err),
        }
    }
}

impl From<InvalidFileNameError> for Error {
    fn from(err: InvalidFileNameError) -> Error {
        Error::InvalidFileName(err)
    }
}

impl From<serde_yaml::Error> for Error {
    /// Converts a [`serde_yaml::Error`] into an [`Error`]. It allows us to use
    /// the `?` operator for [`serde_yaml`] deserialization functions.
    fn from(err: serde_yaml::Error) -> Error {
        Error::DeserializeYaml(err)
    }
}

impl From<walkdir::Error> for Error {
    /// Converts a [`walkdir::Error`] into an [`Error`]. It allows us to use
    /// the `?` operator while walking the posts directory.
    fn from(err: walkdir::Error) -> Error {
        Error::WalkDir(err)
    }
}

impl From<std::io::Error> for Error {
    /// Converts a [`std::io::Error`] into an [`Error`]. It allows us to use
    /// the `?` operator for fallible I/O functions.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}
