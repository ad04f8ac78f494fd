//! Exports the [`preview`] function which stitches together the high-level
//! steps of previewing an index page: parsing the posts ([`crate::parser`]),
//! laying out the first page ([`crate::page::Listing`]), replaying the
//! reader's events through the filter ([`crate::filter`]), and rendering the
//! result ([`crate::write`]).

use crate::config::Config;
use crate::page::{Event, Listing};
use crate::parser::{self, Error as ParseError};
use crate::tag::ActiveTag;
use crate::write::{self, Error as WriteError};
use log::{debug, info};
use std::fmt;

/// Builds the index page described by `config`, applies `events` in order
/// with `active` as the tag filter, and returns the rendered HTML. With no
/// events, a single page-load event capped at the configured page size is
/// applied.
pub fn preview(config: &Config, active: &ActiveTag, events: &[Event]) -> Result<String> {
    let listing = replay(config, active, events)?;
    let template = write::parse_template(config.template.as_deref())?;
    Ok(write::render(&listing, &template)?)
}

/// Parses the posts and applies `events` to the resulting [`Listing`]. See
/// [`preview`].
pub fn replay(config: &Config, active: &ActiveTag, events: &[Event]) -> Result<Listing> {
    let posts = parser::parse_posts(&config.posts_source_directory)?;
    let mut listing = Listing::new(&config.title, posts, config.page_size);

    let page_load = [Event::Filter(config.page_size)];
    let events = if events.is_empty() { &page_load[..] } else { events };
    info!(
        "replaying {} events against `#{}` over {} posts",
        events.len(),
        active,
        listing.posts.len()
    );
    for event in events {
        let pass = listing.apply(active, event);
        debug!("`{}` pass: {:?}", event, pass);
    }
    Ok(listing)
}

type Result<T> = std::result::Result<T, Error>;

/// The error type for previewing a page. Errors can be during parsing or
/// rendering.
#[derive(Debug)]
pub enum Error {
    /// Returned for errors during parsing.
    Parse(ParseError),

    /// Returned for errors rendering the page.
    Write(WriteError),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Parse(err) => err.fmt(f),
            Error::Write(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Parse(err) => Some(err),
            Error::Write(err) => Some(err),
        }
    }
}

impl From<ParseError> for Error {
    /// Converts [`ParseError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: ParseError) -> Error {
        Error::Parse(err)
    }
}

impl From<WriteError> for Error {
    /// Converts [`WriteError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: WriteError) -> Error {
        Error::Write(err)
    }
}
