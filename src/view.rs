use std::rc::Rc;

use futures::future::LocalBoxFuture;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

impl MessageKind {
    pub fn css_class(self) -> &'static str {
        match self {
            MessageKind::Success => "success",
            MessageKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub activity: String,
    pub email: String,
}

/// Called with `(activity, email)` when a delete control is clicked. The view
/// drives the returned future to completion.
pub type RemoveHandler = Rc<dyn Fn(String, String) -> LocalBoxFuture<'static, ()>>;

/// Everything the board does to the page.
pub trait View {
    /// Pending hide timer; dropping it cancels the timer.
    type Timer;

    fn render_list(&self, markup: &str);

    /// Replace every option after the placeholder.
    fn replace_options(&self, names: &[&str]);

    /// Attach `on_remove` to the delete controls currently in the list,
    /// dropping handlers bound by earlier renders.
    fn bind_remove_buttons(&self, on_remove: RemoveHandler);

    /// Detach every delete-button handler bound so far.
    fn unbind_remove_buttons(&self);

    fn form_values(&self) -> SignupForm;
    fn reset_form(&self);

    /// Set the message text (as text, not markup) and kind, and unhide it.
    fn show_message(&self, text: &str, kind: MessageKind);
    fn hide_message(&self);

    /// Blocking yes/no prompt.
    fn confirm(&self, prompt: &str) -> bool;

    fn start_timer(&self, delay_ms: u32, on_elapsed: Box<dyn FnOnce()>) -> Self::Timer;

    /// Release listeners held by the view.
    fn release(&self) {
        self.unbind_remove_buttons();
    }
}
