mod api;
mod board;
mod config;
mod diagnostics;
mod dom;
mod error;
mod markup;
mod model;
mod view;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{window, Event, PageTransitionEvent};

use crate::api::HttpBackend;
use crate::board::ActivityBoard;
use crate::config::BoardConfig;
use crate::dom::DomView;
use crate::error::BoardError;

/* -----------------------------
   Entrypoints
----------------------------- */

#[wasm_bindgen(start)]
pub fn start() {
    let w = window().expect("no window");
    let doc = w.document().expect("no document");

    let config = BoardConfig::from_document(&doc).unwrap_or_else(|err| {
        diagnostics::error("Ignoring board config:", &err);
        BoardConfig::default()
    });

    let view = match DomView::from_document(w.clone(), &doc) {
        Ok(view) => view,
        Err(err) => {
            diagnostics::error("Activity board not started:", &err);
            return;
        }
    };
    let form = view.form().clone();
    let backend = HttpBackend::new(&config.api_base);
    let board = ActivityBoard::new(backend, view, config);

    // The page-level listeners own the board for the lifetime of the page.

    // Signup
    {
        let board = board.clone();
        let c = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            event.prevent_default();
            let board = board.clone();
            spawn_local(async move { board.submit_signup().await });
        });
        if let Err(err) = form.add_event_listener_with_callback("submit", c.as_ref().unchecked_ref()) {
            diagnostics::error("Error binding signup form:", &BoardError::dom(err));
        }
        c.forget();
    }

    // Teardown, unless the page is only going into the back/forward cache
    {
        let board = board.clone();
        let c = Closure::<dyn FnMut(PageTransitionEvent)>::new(move |event: PageTransitionEvent| {
            board.page_hidden(event.persisted());
        });
        if let Err(err) = w.add_event_listener_with_callback("pagehide", c.as_ref().unchecked_ref()) {
            diagnostics::error("Error binding pagehide:", &BoardError::dom(err));
        }
        c.forget();
    }

    // Restored from the back/forward cache
    {
        let board = board.clone();
        let c = Closure::<dyn FnMut(PageTransitionEvent)>::new(move |event: PageTransitionEvent| {
            let board = board.clone();
            let persisted = event.persisted();
            spawn_local(async move { board.page_shown(persisted).await });
        });
        if let Err(err) = w.add_event_listener_with_callback("pageshow", c.as_ref().unchecked_ref()) {
            diagnostics::error("Error binding pageshow:", &BoardError::dom(err));
        }
        c.forget();
    }

    spawn_local(async move { board.fetch_activities().await });
}

// Bin crates still want a Rust main. wasm-bindgen calls `start()` for the WASM init.
fn main() {}
