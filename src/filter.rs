//! The post visibility filter. [`load_blog_posts`] shows the posts matching
//! the active tag, up to a cap, and reveals the no-posts message when nothing
//! matches. [`load_more`] reveals the next hidden posts without any tag
//! filtering.
//!
//! Both functions walk the posts once, in document order, and stop as soon as
//! the pass's counter reaches the cap. Reaching the last post hides the pager
//! control. Everything they touch is passed in by the caller.

use crate::element::{Element, Message};
use crate::post::Tagged;
use crate::tag::ActiveTag;
use log::debug;
use std::convert::TryFrom;

/// The message shown when no posts are displayed and no tag is active.
pub const NO_POSTS: &str = "There are currently no blog posts.";

/// What a single pass did. Callers are free to ignore it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Pass {
    /// Posts shown minus posts hidden during the pass. This can go negative
    /// when previously shown posts are hidden before any match is found.
    pub counter: isize,

    /// Whether the pass stopped on the cap before looking at every post.
    pub stopped_early: bool,

    /// Whether the pass reached the last post and hid the pager control.
    pub pager_hidden: bool,

    /// Whether the no-posts message was revealed.
    pub no_posts_shown: bool,

    /// The number of posts whose visibility changed.
    pub mutations: usize,
}

/// Returns the no-posts message for `active`. The tag is embedded in the HTML
/// verbatim.
pub fn no_posts_message(active: &ActiveTag) -> String {
    if active.is_empty() {
        NO_POSTS.to_owned()
    } else {
        format!(
            "There are currently no blog posts with tag <b>{}</b>.",
            active
        )
    }
}

/// Shows the posts that carry the `active` tag (every post when no tag is
/// active) and hides the ones that don't, stopping once `max_visible` more
/// posts are shown than hidden.
///
/// With no active tag and `show_more` unset this does nothing at all; that is
/// the plain page load, where the server-rendered first page stays as it is.
///
/// Posts are handled in order:
///
/// * a matching hidden post is shown and counted;
/// * a visible post that doesn't match is hidden and the count decremented;
/// * a matching visible post stays shown but is not counted;
/// * any other post is left alone.
///
/// The pager control is hidden when the pass reaches the last post. If no
/// matching post was seen, the message container is shown with
/// [`no_posts_message`]. Posts after an early stop keep whatever state an
/// earlier pass left them in.
pub fn load_blog_posts<P, G, M>(
    posts: &mut [P],
    pager: &mut G,
    message: &mut M,
    active: &ActiveTag,
    max_visible: usize,
    show_more: bool,
) -> Pass
where
    P: Element + Tagged,
    G: Element + ?Sized,
    M: Message + ?Sized,
{
    if active.is_empty() && !show_more {
        debug!("no active tag and no request for more posts; skipping pass");
        return Pass::default();
    }

    let cap = cap(max_visible);
    let last = posts.len().saturating_sub(1);
    let mut pass = Pass::default();
    let mut no_posts = true;

    for (i, post) in posts.iter_mut().enumerate() {
        let valid = active.is_empty() || post.has_tag(active.as_str());
        match (valid, post.is_visible()) {
            (true, false) => {
                post.show();
                pass.counter += 1;
                pass.mutations += 1;
                no_posts = false;
            }
            (false, true) => {
                post.hide();
                pass.counter -= 1;
                pass.mutations += 1;
            }
            (true, true) => no_posts = false,
            (false, false) => {}
        }

        if i == last {
            pager.hide();
            pass.pager_hidden = true;
        }

        if pass.counter >= cap {
            pass.stopped_early = i < last;
            break;
        }
    }

    if no_posts {
        message.reveal(&no_posts_message(active));
        pass.no_posts_shown = true;
    }

    debug!("filtered posts for tag `{}`: {:?}", active, pass);
    pass
}

/// Shows up to `max_to_reveal` hidden posts, in document order, regardless
/// of tags. Hides the pager control when the last post is reached.
pub fn load_more<P, G>(posts: &mut [P], pager: &mut G, max_to_reveal: usize) -> Pass
where
    P: Element,
    G: Element + ?Sized,
{
    let cap = cap(max_to_reveal);
    let last = posts.len().saturating_sub(1);
    let mut pass = Pass::default();

    for (i, post) in posts.iter_mut().enumerate() {
        if !post.is_visible() {
            post.show();
            pass.counter += 1;
            pass.mutations += 1;
        }

        if i == last {
            pager.hide();
            pass.pager_hidden = true;
        }

        if pass.counter >= cap {
            pass.stopped_early = i < last;
            break;
        }
    }

    debug!("revealed more posts: {:?}", pass);
    pass
}

fn cap(max: usize) -> isize {
    isize::try_from(max).unwrap_or(isize::MAX)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::element::{MessageBox, Toggle};
    use crate::post::Post;

    fn posts(specs: &[(&str, &str, bool)]) -> Vec<Post> {
        specs
            .iter()
            .map(|(id, tag, visible)| {
                let tags: Vec<&str> = if tag.is_empty() { vec![] } else { vec![*tag] };
                let mut post = Post::new(id, tags);
                post.visible = *visible;
                post
            })
            .collect()
    }

    fn visible_ids(posts: &[Post]) -> Vec<&str> {
        posts
            .iter()
            .filter(|p| p.visible)
            .map(|p| p.id.as_str())
            .collect()
    }

    #[test]
    fn test_guard_without_tag_or_show_more() {
        let mut posts = posts(&[("a", "x", false), ("b", "y", true)]);
        let before = posts.clone();
        let mut pager = Toggle::shown();
        let mut message = MessageBox::hidden();

        let pass = load_blog_posts(
            &mut posts,
            &mut pager,
            &mut message,
            &ActiveTag::none(),
            10,
            false,
        );

        assert_eq!(Pass::default(), pass);
        assert_eq!(before, posts);
        assert!(pager.visible);
        assert_eq!(MessageBox::hidden(), message);
    }

    #[test]
    fn test_tag_filtering() {
        let mut posts = posts(&[("a", "x", false), ("b", "y", false), ("c", "x", false)]);
        let mut pager = Toggle::shown();
        let mut message = MessageBox::hidden();

        let pass = load_blog_posts(
            &mut posts,
            &mut pager,
            &mut message,
            &ActiveTag::from_hash("#x"),
            10,
            true,
        );

        assert_eq!(vec!["a", "c"], visible_ids(&posts));
        assert!(!message.is_visible());
        assert!(!pass.no_posts_shown);
        assert_eq!(2, pass.counter);
    }

    #[test]
    fn test_tag_without_show_more_still_filters() {
        let mut posts = posts(&[("a", "x", true), ("b", "y", true), ("c", "x", false)]);
        let mut pager = Toggle::shown();
        let mut message = MessageBox::hidden();

        load_blog_posts(
            &mut posts,
            &mut pager,
            &mut message,
            &ActiveTag::from_hash("#x"),
            10,
            false,
        );

        assert_eq!(vec!["a", "c"], visible_ids(&posts));
    }

    #[test]
    fn test_cap_stops_before_last_post() {
        let mut posts = posts(&[
            ("a", "x", false),
            ("b", "x", false),
            ("c", "x", false),
            ("d", "x", false),
            ("e", "x", false),
        ]);
        let mut pager = Toggle::shown();
        let mut message = MessageBox::hidden();

        let pass = load_blog_posts(
            &mut posts,
            &mut pager,
            &mut message,
            &ActiveTag::none(),
            3,
            true,
        );

        assert_eq!(vec!["a", "b", "c"], visible_ids(&posts));
        assert!(pager.visible);
        assert!(pass.stopped_early);
        assert!(!pass.pager_hidden);
    }

    #[test]
    fn test_cap_reached_on_last_post_hides_pager() {
        let mut posts = posts(&[("a", "x", false), ("b", "x", false), ("c", "x", false)]);
        let mut pager = Toggle::shown();
        let mut message = MessageBox::hidden();

        let pass = load_blog_posts(
            &mut posts,
            &mut pager,
            &mut message,
            &ActiveTag::none(),
            3,
            true,
        );

        assert_eq!(vec!["a", "b", "c"], visible_ids(&posts));
        assert!(!pager.visible);
        assert!(!pass.stopped_early);
    }

    #[test]
    fn test_empty_result_reveals_message_with_tag() {
        let mut posts = posts(&[("a", "x", false)]);
        let mut pager = Toggle::shown();
        let mut message = MessageBox::hidden();

        let pass = load_blog_posts(
            &mut posts,
            &mut pager,
            &mut message,
            &ActiveTag::from_hash("#z"),
            10,
            true,
        );

        assert!(!posts[0].visible);
        assert!(message.is_visible());
        assert_eq!(
            "There are currently no blog posts with tag <b>z</b>.",
            message.html
        );
        assert!(pass.no_posts_shown);
        assert!(!pager.visible);
    }

    #[test]
    fn test_empty_collection_reveals_generic_message() {
        let mut posts: Vec<Post> = Vec::new();
        let mut pager = Toggle::shown();
        let mut message = MessageBox::hidden();

        let pass = load_blog_posts(
            &mut posts,
            &mut pager,
            &mut message,
            &ActiveTag::none(),
            10,
            true,
        );

        assert_eq!(NO_POSTS, message.html);
        assert!(message.is_visible());
        assert!(pager.visible);
        assert!(!pass.pager_hidden);
    }

    #[test]
    fn test_tag_is_not_escaped() {
        assert_eq!(
            "There are currently no blog posts with tag <b><i>x</i></b>.",
            no_posts_message(&ActiveTag::from_hash("#<i>x</i>"))
        );
    }

    #[test]
    fn test_counter_goes_negative() {
        let mut posts = posts(&[
            ("a", "y", true),
            ("b", "y", true),
            ("c", "x", false),
            ("d", "y", true),
        ]);
        let mut pager = Toggle::shown();
        let mut message = MessageBox::hidden();

        let pass = load_blog_posts(
            &mut posts,
            &mut pager,
            &mut message,
            &ActiveTag::from_hash("#x"),
            1,
            true,
        );

        // a, b hidden (-2), c shown (-1), d hidden (-2); never reaches the cap
        assert_eq!(-2, pass.counter);
        assert_eq!(vec!["c"], visible_ids(&posts));
        assert!(!pager.visible);
    }

    #[test]
    fn test_early_stop_leaves_trailing_posts_stale() {
        let mut posts = posts(&[("a", "x", false), ("b", "y", true)]);
        let mut pager = Toggle::shown();
        let mut message = MessageBox::hidden();

        let pass = load_blog_posts(
            &mut posts,
            &mut pager,
            &mut message,
            &ActiveTag::from_hash("#x"),
            1,
            true,
        );

        assert!(pass.stopped_early);
        assert_eq!(vec!["a", "b"], visible_ids(&posts));
        assert!(pager.visible);
    }

    #[test]
    fn test_already_visible_matches_are_not_counted() {
        let mut posts = posts(&[("a", "x", true), ("b", "x", true), ("c", "x", false)]);
        let mut pager = Toggle::shown();
        let mut message = MessageBox::hidden();

        let pass = load_blog_posts(
            &mut posts,
            &mut pager,
            &mut message,
            &ActiveTag::none(),
            1,
            true,
        );

        assert_eq!(1, pass.counter);
        assert_eq!(1, pass.mutations);
        assert!(!message.is_visible());
        assert!(!pager.visible);
    }

    #[test]
    fn test_load_more_reveals_next_hidden_posts() {
        let mut posts = posts(&[
            ("a", "x", true),
            ("b", "y", false),
            ("c", "x", false),
            ("d", "z", false),
        ]);
        let mut pager = Toggle::shown();

        let pass = load_more(&mut posts, &mut pager, 2);

        assert_eq!(vec!["a", "b", "c"], visible_ids(&posts));
        assert_eq!(2, pass.counter);
        assert!(pass.stopped_early);
        assert!(pager.visible);

        let pass = load_more(&mut posts, &mut pager, 2);
        assert_eq!(1, pass.counter);
        assert!(!pager.visible);
        assert!(pass.pager_hidden);
    }

    #[test]
    fn test_load_more_when_everything_is_visible() {
        let mut posts = posts(&[("a", "x", true), ("b", "y", true)]);
        let before = posts.clone();
        let mut pager = Toggle::shown();

        let pass = load_more(&mut posts, &mut pager, 5);

        assert_eq!(before, posts);
        assert_eq!(0, pass.counter);
        assert_eq!(0, pass.mutations);
        // the pass still walks to the last post
        assert!(!pager.visible);
    }

    #[test]
    fn test_zero_cap_stops_after_first_post() {
        let mut posts = posts(&[("a", "x", false), ("b", "x", false)]);
        let mut pager = Toggle::shown();

        let pass = load_more(&mut posts, &mut pager, 0);

        assert_eq!(vec!["a"], visible_ids(&posts));
        assert!(pass.stopped_early);
    }
}
