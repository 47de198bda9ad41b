use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use futures::future::LocalBoxFuture;

use crate::api::{ApiRequest, Backend};
use crate::config::BoardConfig;
use crate::diagnostics;
use crate::error::BoardError;
use crate::markup;
use crate::model::{parse_activities, Activity, MutationOutcome};
use crate::view::{MessageKind, RemoveHandler, View};

pub const SIGNUP_FAILED: &str = "Failed to sign up. Please try again.";
pub const REMOVE_FAILED: &str = "Failed to remove participant. Please try again.";

struct MessageSlot<T> {
    token: u64,
    pending: Option<T>,
}

/// Page controller for the activity list and signup form.
///
/// Lifecycle: [`ActivityBoard::new`], attach the page listeners, call
/// [`ActivityBoard::fetch_activities`] once, and [`ActivityBoard::teardown`]
/// when the page goes away.
///
/// Two counters keep overlapping requests from stepping on each other:
/// `refresh_seq` makes only the newest list request render, and
/// `operation_seq` makes only the newest signup/removal write the message.
pub struct ActivityBoard<B: Backend, V: View> {
    backend: B,
    view: V,
    config: BoardConfig,
    refresh_seq: Cell<u64>,
    operation_seq: Cell<u64>,
    message: RefCell<MessageSlot<V::Timer>>,
    weak_self: Weak<Self>,
}

fn bump(counter: &Cell<u64>) -> u64 {
    let next = counter.get() + 1;
    counter.set(next);
    next
}

impl<B: Backend + 'static, V: View + 'static> ActivityBoard<B, V> {
    pub fn new(backend: B, view: V, config: BoardConfig) -> Rc<Self> {
        Rc::new_cyclic(|weak_self| Self {
            backend,
            view,
            config,
            refresh_seq: Cell::new(0),
            operation_seq: Cell::new(0),
            message: RefCell::new(MessageSlot { token: 0, pending: None }),
            weak_self: weak_self.clone(),
        })
    }

    /// Re-read the activity list and rebuild the cards and select options.
    /// Failures end up on the page and in the console, never with the caller.
    pub async fn fetch_activities(&self) {
        let ticket = bump(&self.refresh_seq);
        let result = self.load_activities().await;

        if ticket != self.refresh_seq.get() {
            diagnostics::debug(&format!("dropping stale activity list (refresh {ticket})"));
            return;
        }

        match result {
            Ok(activities) => self.render(&activities),
            Err(err) => {
                self.view.render_list(markup::LOAD_FAILED);
                self.view.unbind_remove_buttons();
                diagnostics::error("Error fetching activities:", &err);
            }
        }
    }

    async fn load_activities(&self) -> Result<Vec<Activity>, BoardError> {
        let response = self.backend.send(&ApiRequest::ListActivities).await?;
        if !(200..300).contains(&response.status) {
            return Err(BoardError::Status(response.status));
        }
        parse_activities(&response.body)
    }

    fn render(&self, activities: &[Activity]) {
        self.view.render_list(&markup::render_cards(activities));
        let names: Vec<&str> = activities.iter().map(|a| a.name.as_str()).collect();
        self.view.replace_options(&names);
        self.view.bind_remove_buttons(self.remove_handler());
    }

    fn remove_handler(&self) -> RemoveHandler {
        let board = self.weak_self.clone();
        Rc::new(move |activity: String, email: String| -> LocalBoxFuture<'static, ()> {
            let board = board.clone();
            Box::pin(async move {
                if let Some(board) = board.upgrade() {
                    board.remove_participant(&activity, &email).await;
                }
            })
        })
    }

    /// Submit handler: reads the form and signs up.
    pub async fn submit_signup(&self) {
        let form = self.view.form_values();
        self.signup(&form.activity, &form.email).await;
    }

    pub async fn signup(&self, activity: &str, email: &str) {
        let ticket = bump(&self.operation_seq);
        let request = ApiRequest::Signup {
            activity: activity.to_string(),
            email: email.to_string(),
        };

        match self.mutate(&request).await {
            Ok(MutationOutcome::Accepted { message }) => {
                // a newer submission may already be typed into the form
                if ticket == self.operation_seq.get() {
                    self.view.reset_form();
                }
                self.report(ticket, &message, MessageKind::Success);
                self.fetch_activities().await;
            }
            Ok(MutationOutcome::Rejected { detail }) => {
                let text = MutationOutcome::detail_or_fallback(&detail);
                self.report(ticket, text, MessageKind::Error);
            }
            Err(err) => {
                self.report(ticket, SIGNUP_FAILED, MessageKind::Error);
                diagnostics::error("Error signing up:", &err);
            }
        }
    }

    /// Asks first; a declined prompt sends nothing.
    pub async fn remove_participant(&self, activity: &str, email: &str) {
        if !self.view.confirm(&markup::remove_prompt(activity, email)) {
            return;
        }

        let ticket = bump(&self.operation_seq);
        let request = ApiRequest::Unregister {
            activity: activity.to_string(),
            email: email.to_string(),
        };

        match self.mutate(&request).await {
            Ok(MutationOutcome::Accepted { message }) => {
                self.report(ticket, &message, MessageKind::Success);
                self.fetch_activities().await;
            }
            Ok(MutationOutcome::Rejected { detail }) => {
                let text = MutationOutcome::detail_or_fallback(&detail);
                self.report(ticket, text, MessageKind::Error);
            }
            Err(err) => {
                self.report(ticket, REMOVE_FAILED, MessageKind::Error);
                diagnostics::error("Error removing participant:", &err);
            }
        }
    }

    async fn mutate(&self, request: &ApiRequest) -> Result<MutationOutcome, BoardError> {
        let response = self.backend.send(request).await?;
        MutationOutcome::from_response(response.status, &response.body)
    }

    fn report(&self, ticket: u64, text: &str, kind: MessageKind) {
        if ticket != self.operation_seq.get() {
            diagnostics::debug(&format!("superseded operation {ticket}, not showing: {text}"));
            return;
        }
        self.show_message(text, kind);
    }

    /// Show `text` and hide it again after the configured delay. A newer
    /// message cancels the older one's timer.
    pub fn show_message(&self, text: &str, kind: MessageKind) {
        let token = {
            let mut slot = self.message.borrow_mut();
            slot.token += 1;
            slot.pending = None;
            slot.token
        };

        self.view.show_message(text, kind);

        let board = self.weak_self.clone();
        let timer = self.view.start_timer(
            self.config.message_timeout_ms,
            Box::new(move || {
                if let Some(board) = board.upgrade() {
                    board.expire_message(token);
                }
            }),
        );
        self.message.borrow_mut().pending = Some(timer);
    }

    fn expire_message(&self, token: u64) {
        let mut slot = self.message.borrow_mut();
        if slot.token != token {
            return;
        }
        slot.pending = None;
        drop(slot);
        self.view.hide_message();
    }

    /// `pagehide` handler. A page going into the back/forward cache keeps
    /// its listeners and timer so it works again when restored.
    pub fn page_hidden(&self, persisted: bool) {
        if persisted {
            diagnostics::debug("page cached, keeping listeners");
            return;
        }
        self.teardown();
    }

    /// `pageshow` handler. A page restored from the back/forward cache may
    /// show a stale roster.
    pub async fn page_shown(&self, persisted: bool) {
        if persisted {
            self.fetch_activities().await;
        }
    }

    pub fn teardown(&self) {
        self.message.borrow_mut().pending = None;
        self.view.release();
    }
}
