//! Defines the handles the filter mutates: the [`Element`] visibility trait,
//! the in-memory [`Toggle`] element, and the [`Message`] trait implemented by
//! [`MessageBox`].
//!
//! The filter never looks elements up by itself; callers hand it the post
//! collection, the pager control, and the message handle. Anything that can
//! report and flip its visibility can stand in for a page element, e.g., a
//! binding to a live DOM node.

/// Something on the page that can be shown or hidden.
pub trait Element {
    /// Returns whether the element is currently displayed.
    fn is_visible(&self) -> bool;

    /// Displays the element. Showing a visible element is a no-op.
    fn show(&mut self);

    /// Hides the element. Hiding a hidden element is a no-op.
    fn hide(&mut self);
}

/// The element that explains an empty result. Revealing it shows its parent
/// container and replaces its inner HTML.
pub trait Message {
    /// Shows the container and sets the inner HTML to `html`. The HTML is
    /// inserted as-is.
    fn reveal(&mut self, html: &str);
}

/// A plain in-memory [`Element`], used for the pager control and the message
/// container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Toggle {
    pub visible: bool,
}

impl Toggle {
    pub fn shown() -> Toggle {
        Toggle { visible: true }
    }

    pub fn hidden() -> Toggle {
        Toggle { visible: false }
    }
}

impl Element for Toggle {
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

/// The no-posts message: a container whose visibility is toggled and the
/// HTML it holds.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct MessageBox {
    /// The parent element that is shown when the message is revealed.
    pub container: Toggle,

    /// The inner HTML of the message element. Not escaped.
    pub html: String,
}

impl MessageBox {
    /// A hidden message box with no text.
    pub fn hidden() -> MessageBox {
        MessageBox::default()
    }

    /// Returns whether the message container is displayed.
    pub fn is_visible(&self) -> bool {
        self.container.is_visible()
    }
}

impl Message for MessageBox {
    fn reveal(&mut self, html: &str) {
        self.container.show();
        self.html = html.to_owned();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_toggle_show_hide() {
        let mut toggle = Toggle::hidden();
        toggle.show();
        toggle.show();
        assert!(toggle.is_visible());
        toggle.hide();
        assert!(!toggle.is_visible());
    }

    #[test]
    fn test_message_reveal_replaces_html() {
        let mut message = MessageBox::hidden();
        message.reveal("first");
        message.reveal("<b>second</b>");
        assert!(message.is_visible());
        assert_eq!("<b>second</b>", message.html);
    }
}
