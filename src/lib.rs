//! The library code for `postfilter`, which filters and paginates the posts on
//! a blog index page. The core is [`filter`], two passes over the post
//! elements:
//!
//! 1. [`filter::load_blog_posts`] shows the posts carrying the tag selected by
//!    the URL fragment, hides the rest, and explains an empty result.
//! 2. [`filter::load_more`] reveals the next hidden posts.
//!
//! Neither pass looks anything up by itself: the posts, the pager control,
//! and the no-posts message are handed in through the traits in [`element`]
//! and [`post`], so the same code drives an in-memory page or a real one.
//!
//! Around the filter sits a small previewer. It parses posts from markdown
//! files ([`parser`]), lays them out as an index page ([`page`]), replays the
//! reader's events against it, and renders the result to HTML ([`write`]).
//! [`build::preview`] ties those steps together.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod build;
pub mod config;
pub mod element;
pub mod filter;
pub mod page;
pub mod parser;
pub mod post;
pub mod tag;
pub mod write;
