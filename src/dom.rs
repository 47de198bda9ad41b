use std::cell::RefCell;

use gloo::timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Document, Element, HtmlFormElement, HtmlInputElement, HtmlOptionElement, HtmlSelectElement,
    Window,
};

use crate::diagnostics;
use crate::error::BoardError;
use crate::view::{MessageKind, RemoveHandler, SignupForm, View};

pub const LIST_ID: &str = "activities-list";
pub const SELECT_ID: &str = "activity";
pub const FORM_ID: &str = "signup-form";
pub const EMAIL_ID: &str = "email";
pub const MESSAGE_ID: &str = "message";

const HIDDEN: &str = "hidden";
const DELETE_SELECTOR: &str = ".delete-participant";

fn element_by_id<T: JsCast>(doc: &Document, id: &'static str) -> Result<T, BoardError> {
    doc.get_element_by_id(id)
        .ok_or(BoardError::MissingElement(id))?
        .dyn_into::<T>()
        .map_err(|_| BoardError::WrongElement(id))
}

/// The static page, looked up once at startup.
pub struct DomView {
    window: Window,
    list: Element,
    select: HtmlSelectElement,
    form: HtmlFormElement,
    email: HtmlInputElement,
    message: Element,
    // Delete buttons of the current render and their click listeners.
    remove_listeners: RefCell<Vec<(Element, Closure<dyn FnMut()>)>>,
}

impl DomView {
    pub fn from_document(window: Window, doc: &Document) -> Result<Self, BoardError> {
        Ok(Self {
            window,
            list: element_by_id(doc, LIST_ID)?,
            select: element_by_id(doc, SELECT_ID)?,
            form: element_by_id(doc, FORM_ID)?,
            email: element_by_id(doc, EMAIL_ID)?,
            message: element_by_id(doc, MESSAGE_ID)?,
            remove_listeners: RefCell::new(Vec::new()),
        })
    }

    pub fn form(&self) -> &HtmlFormElement {
        &self.form
    }
}

impl View for DomView {
    type Timer = Timeout;

    fn render_list(&self, markup: &str) {
        self.list.set_inner_html(markup);
    }

    fn replace_options(&self, names: &[&str]) {
        // index 0 is the placeholder
        while self.select.length() > 1 {
            self.select.remove_with_index(1);
        }

        for name in names {
            let added = HtmlOptionElement::new_with_text_and_value(name, name)
                .and_then(|option| self.select.add_with_html_option_element(&option));
            if let Err(err) = added {
                diagnostics::error("Error adding activity option:", &BoardError::dom(err));
            }
        }
    }

    fn bind_remove_buttons(&self, on_remove: RemoveHandler) {
        self.unbind_remove_buttons();
        let mut listeners = self.remove_listeners.borrow_mut();

        let buttons = match self.list.query_selector_all(DELETE_SELECTOR) {
            Ok(buttons) => buttons,
            Err(err) => {
                diagnostics::error("Error finding delete buttons:", &BoardError::dom(err));
                return;
            }
        };

        for i in 0..buttons.length() {
            let Some(button) = buttons.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let activity = button.get_attribute("data-activity").unwrap_or_default();
            let email = button.get_attribute("data-email").unwrap_or_default();

            let on_remove = on_remove.clone();
            let listener = Closure::<dyn FnMut()>::new(move || {
                spawn_local(on_remove(activity.clone(), email.clone()));
            });
            if let Err(err) =
                button.add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())
            {
                diagnostics::error("Error binding delete button:", &BoardError::dom(err));
                continue;
            }
            listeners.push((button, listener));
        }
    }

    fn unbind_remove_buttons(&self) {
        // A button still in the page must not keep a listener whose closure
        // is about to be freed.
        for (button, listener) in self.remove_listeners.borrow_mut().drain(..) {
            if let Err(err) = button
                .remove_event_listener_with_callback("click", listener.as_ref().unchecked_ref())
            {
                diagnostics::error("Error unbinding delete button:", &BoardError::dom(err));
            }
        }
    }

    fn form_values(&self) -> SignupForm {
        SignupForm {
            activity: self.select.value(),
            email: self.email.value(),
        }
    }

    fn reset_form(&self) {
        self.form.reset();
    }

    fn show_message(&self, text: &str, kind: MessageKind) {
        self.message.set_text_content(Some(text));
        self.message.set_class_name(kind.css_class());
        if let Err(err) = self.message.class_list().remove_1(HIDDEN) {
            diagnostics::error("Error showing message:", &BoardError::dom(err));
        }
    }

    fn hide_message(&self) {
        if let Err(err) = self.message.class_list().add_1(HIDDEN) {
            diagnostics::error("Error hiding message:", &BoardError::dom(err));
        }
    }

    fn confirm(&self, prompt: &str) -> bool {
        self.window.confirm_with_message(prompt).unwrap_or(false)
    }

    fn start_timer(&self, delay_ms: u32, on_elapsed: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, on_elapsed)
    }
}
