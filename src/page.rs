//! Defines [`Listing`], the in-memory model of a blog index page, and the
//! [`Event`]s that drive the filter against it.

use crate::element::{Message, MessageBox, Toggle};
use crate::filter::{self, Pass, NO_POSTS};
use crate::post::Post;
use crate::tag::ActiveTag;
use log::info;
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// An index page: the post elements in document order, the pager control,
/// and the no-posts message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Listing {
    /// The page title.
    pub title: String,

    /// The post elements, most recent first.
    pub posts: Vec<Post>,

    /// The control which loads more posts.
    pub pager: Toggle,

    /// The message explaining an empty result.
    pub message: MessageBox,
}

impl Listing {
    /// Builds the page as it is first served: the first `page_size` posts
    /// are shown and the rest hidden, and the pager is shown only if some
    /// posts are hidden. A page without any posts shows the no-posts message
    /// straight away.
    pub fn new(title: &str, mut posts: Vec<Post>, page_size: usize) -> Listing {
        for (i, post) in posts.iter_mut().enumerate() {
            post.visible = i < page_size;
        }

        let mut message = MessageBox::hidden();
        if posts.is_empty() {
            message.reveal(NO_POSTS);
        }

        Listing {
            title: title.to_owned(),
            pager: Toggle {
                visible: posts.len() > page_size,
            },
            posts,
            message,
        }
    }

    /// Runs [`filter::load_blog_posts`] over this page.
    pub fn load_blog_posts(
        &mut self,
        active: &ActiveTag,
        max_visible: usize,
        show_more: bool,
    ) -> Pass {
        filter::load_blog_posts(
            &mut self.posts,
            &mut self.pager,
            &mut self.message,
            active,
            max_visible,
            show_more,
        )
    }

    /// Runs [`filter::load_more`] over this page.
    pub fn load_more(&mut self, max_to_reveal: usize) -> Pass {
        filter::load_more(&mut self.posts, &mut self.pager, max_to_reveal)
    }

    /// Applies a single [`Event`] with `active` as the current tag filter.
    pub fn apply(&mut self, active: &ActiveTag, event: &Event) -> Pass {
        let pass = match *event {
            Event::Filter(n) => self.load_blog_posts(active, n, false),
            Event::FilterMore(n) => self.load_blog_posts(active, n, true),
            Event::More(n) => self.load_more(n),
        };
        info!(
            "applied `{}`: {} posts visible, pager {}",
            event,
            self.visible_posts().count(),
            if self.pager.visible { "shown" } else { "hidden" },
        );
        pass
    }

    /// The posts currently displayed, in document order.
    pub fn visible_posts(&self) -> impl Iterator<Item = &Post> {
        self.posts.iter().filter(|p| p.visible)
    }
}

/// Something the reader does on the page. Each event carries the cap passed
/// to the filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// The page loads or the location hash changes (`filter:N`).
    Filter(usize),

    /// The reader asks for more posts while a tag may be active
    /// (`filter-more:N`).
    FilterMore(usize),

    /// The reader asks for more posts regardless of tags (`more:N`).
    More(usize),
}

impl Event {
    /// Parses `kind[:count]`. `default_count` stands in for a missing count;
    /// without one, a missing count is an error.
    pub fn parse(s: &str, default_count: Option<usize>) -> Result<Event, EventError> {
        let (kind, count) = match s.find(':') {
            Some(i) => (&s[..i], Some(&s[i + 1..])),
            None => (s, None),
        };

        let count = match (count, default_count) {
            (Some(count), _) => count.parse().map_err(|err| EventError::InvalidCount {
                event: s.to_owned(),
                err,
            })?,
            (None, Some(default)) => default,
            (None, None) => return Err(EventError::MissingCount(s.to_owned())),
        };

        match kind {
            "filter" => Ok(Event::Filter(count)),
            "filter-more" => Ok(Event::FilterMore(count)),
            "more" => Ok(Event::More(count)),
            _ => Err(EventError::UnknownKind(kind.to_owned())),
        }
    }
}

impl FromStr for Event {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Event, EventError> {
        Event::parse(s, None)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Event::Filter(n) => write!(f, "filter:{}", n),
            Event::FilterMore(n) => write!(f, "filter-more:{}", n),
            Event::More(n) => write!(f, "more:{}", n),
        }
    }
}

/// Represents an error parsing an [`Event`].
#[derive(Debug, PartialEq, Eq)]
pub enum EventError {
    /// Returned when the event kind isn't `filter`, `filter-more`, or
    /// `more`.
    UnknownKind(String),

    /// Returned when the event has no count and no default applies.
    MissingCount(String),

    /// Returned when the count isn't a non-negative integer.
    InvalidCount { event: String, err: ParseIntError },
}

impl fmt::Display for EventError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EventError::UnknownKind(kind) => write!(
                f,
                "unknown event `{}` (expected `filter`, `filter-more`, or `more`)",
                kind
            ),
            EventError::MissingCount(event) => {
                write!(f, "event `{}` is missing a count", event)
            }
            EventError::InvalidCount { event, err } => {
                write!(f, "invalid count in event `{}`: {}", event, err)
            }
        }
    }
}

impl std::error::Error for EventError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EventError::InvalidCount { event: _, err } => Some(err),
            _ => None,
        }
    }
}
