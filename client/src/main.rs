mod actions;
mod api;
mod app;
mod auth;
mod config;
mod loaders;
mod notify;
mod router;
mod session;

use leptos::mount::mount_to;
use std::any::Any;
use std::cell::RefCell;
use wasm_bindgen::JsCast;

thread_local! {
    static APP_MOUNT_HANDLE: RefCell<Option<Box<dyn Any>>> = RefCell::new(None);
}

fn main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(config::log_level()).is_err() {
        web_sys::console::warn_1(&"logger was already initialised".into());
    }

    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let mount_target = document
        .get_element_by_id("app")
        .and_then(|node| node.dyn_into::<web_sys::HtmlElement>().ok())
        .or_else(|| document.body());
    let Some(target) = mount_target else {
        log::error!("no mount target for the dashboard");
        return;
    };

    APP_MOUNT_HANDLE.with(move |slot| {
        // A re-entered main() must drop the previous mount so its effects stop.
        let _old = slot.borrow_mut().take();
        let handle = mount_to(target, app::App);
        *slot.borrow_mut() = Some(Box::new(handle));
    });
}
