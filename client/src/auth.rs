use std::cell::{Cell, RefCell};
use std::pin::pin;

use futures::channel::mpsc;
use futures::future::{self, AbortHandle, Abortable, Either};
use futures::{FutureExt, Stream, StreamExt};
use gloo_timers::future::IntervalStream;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::MessageEvent;

use fleetdash_shared::{AuthSuccess, parse_auth_message};

use crate::config::{LOGIN_POLL_INTERVAL_MS, LOGIN_POPUP_FEATURES, LOGIN_POPUP_NAME};
use crate::notify;
use crate::session::Session;

pub const LOGIN_FAILED_NOTICE: &str = "Login failed. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome {
    Success,
    Cancelled,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthPhase {
    #[default]
    Idle,
    AwaitingExternalLogin,
    Resolved(AuthOutcome),
}

#[derive(Clone, Copy)]
pub struct LoginPhase(pub RwSignal<AuthPhase>);

/// How a popup wait ended.
#[derive(Debug, Clone, PartialEq)]
enum PopupResult {
    Success(AuthSuccess),
    Closed,
}

/// The popup was seen closed. A success message that was already queued in
/// the same tick still wins.
fn settle_on_close(queued: Option<AuthSuccess>) -> PopupResult {
    queued.map_or(PopupResult::Closed, PopupResult::Success)
}

/// Only messages posted by our own popup may carry a token.
fn accept_message(from_popup: bool, data: &serde_json::Value) -> Option<AuthSuccess> {
    if !from_popup {
        return None;
    }
    parse_auth_message(data)
}

/// Resources held by one login attempt, released in a single step.
trait Release {
    fn release(self);
}

/// One in-flight popup login: the window `message` subscription and the
/// task that polls the popup. Dropping either half alone would leak the
/// other, so both are only released together.
struct LoginAttempt {
    window: web_sys::Window,
    handler: Closure<dyn Fn(MessageEvent)>,
    abort: AbortHandle,
}

impl Release for LoginAttempt {
    fn release(self) {
        self.window
            .remove_event_listener_with_callback("message", self.handler.as_ref().unchecked_ref())
            .ok();
        self.abort.abort();
    }
}

/// Holds at most one attempt, tagged with the generation that installed it.
struct AttemptSlot<A> {
    current: Option<(u64, A)>,
}

impl<A: Release> AttemptSlot<A> {
    const fn new() -> Self {
        Self { current: None }
    }

    /// Install `attempt`, releasing whichever attempt it replaces.
    fn install(&mut self, generation: u64, attempt: A) {
        self.cancel();
        self.current = Some((generation, attempt));
    }

    /// Release the attempt only if it is still the one from `generation`.
    fn finish(&mut self, generation: u64) {
        if self.current.as_ref().is_some_and(|(g, _)| *g == generation) {
            self.cancel();
        }
    }

    fn cancel(&mut self) {
        if let Some((_, attempt)) = self.current.take() {
            attempt.release();
        }
    }

    #[cfg(test)]
    fn generation(&self) -> Option<u64> {
        self.current.as_ref().map(|(g, _)| *g)
    }
}

thread_local! {
    static ACTIVE_LOGIN: RefCell<AttemptSlot<LoginAttempt>> = const { RefCell::new(AttemptSlot::new()) };
    static LOGIN_GENERATION: Cell<u64> = const { Cell::new(0) };
}

fn next_generation() -> u64 {
    LOGIN_GENERATION.with(|cell| {
        let next = cell.get().wrapping_add(1);
        cell.set(next);
        next
    })
}

fn is_current(generation: u64) -> bool {
    LOGIN_GENERATION.with(|cell| cell.get() == generation)
}

fn fail(phase: RwSignal<AuthPhase>, reason: &str) {
    log::error!("Login failed: {reason}");
    phase.set(AuthPhase::Resolved(AuthOutcome::Failed));
    notify::alert(LOGIN_FAILED_NOTICE);
}

/// Start a popup login. A login already awaiting the popup is cancelled and
/// replaced.
pub fn login(session: Session, phase: RwSignal<AuthPhase>) {
    ACTIVE_LOGIN.with(|slot| slot.borrow_mut().cancel());
    let generation = next_generation();

    spawn_local(async move {
        let url = match session.api().login_url().await {
            Ok(url) => url,
            Err(e) => {
                if is_current(generation) {
                    fail(phase, &e.to_string());
                }
                return;
            }
        };
        if !is_current(generation) {
            return;
        }

        let Some(window) = web_sys::window() else {
            fail(phase, "window is unavailable");
            return;
        };
        let popup = match window.open_with_url_and_target_and_features(
            &url,
            LOGIN_POPUP_NAME,
            LOGIN_POPUP_FEATURES,
        ) {
            Ok(Some(popup)) => popup,
            Ok(None) => {
                fail(phase, "popup was blocked");
                return;
            }
            Err(e) => {
                fail(phase, &format!("{e:?}"));
                return;
            }
        };

        let (tx, rx) = mpsc::unbounded::<AuthSuccess>();
        let popup_handle: JsValue = popup.clone().into();
        let handler = Closure::<dyn Fn(MessageEvent)>::new(move |e: MessageEvent| {
            let from_popup = e
                .source()
                .is_some_and(|source| js_sys::Object::is(&source, &popup_handle));
            let Ok(data) = serde_wasm_bindgen::from_value::<serde_json::Value>(e.data()) else {
                return;
            };
            match accept_message(from_popup, &data) {
                Some(success) => {
                    tx.unbounded_send(success).ok();
                }
                None if !from_popup => log::debug!("ignoring message from another window"),
                None => {}
            }
        });
        if window
            .add_event_listener_with_callback("message", handler.as_ref().unchecked_ref())
            .is_err()
        {
            fail(phase, "could not listen for the login callback");
            return;
        }

        let (abort, registration) = AbortHandle::new_pair();
        ACTIVE_LOGIN.with(|slot| {
            slot.borrow_mut().install(
                generation,
                LoginAttempt {
                    window: window.clone(),
                    handler,
                    abort,
                },
            );
        });
        phase.set(AuthPhase::AwaitingExternalLogin);

        let ticks = IntervalStream::new(LOGIN_POLL_INTERVAL_MS);
        let closed = move || popup.closed().unwrap_or(true);
        let Ok(result) = Abortable::new(await_popup(rx, ticks, closed), registration).await else {
            // Superseded by a newer login; its install already released this one.
            return;
        };
        ACTIVE_LOGIN.with(|slot| slot.borrow_mut().finish(generation));

        match result {
            PopupResult::Success(AuthSuccess { token, user }) => {
                session.establish(token, user);
                phase.set(AuthPhase::Resolved(AuthOutcome::Success));
            }
            PopupResult::Closed => {
                log::info!("Authentication cancelled");
                phase.set(AuthPhase::Resolved(AuthOutcome::Cancelled));
            }
        }
    });
}

/// Wait for a success message, checking `closed` after every tick.
async fn await_popup<M, T, C>(messages: M, ticks: T, closed: C) -> PopupResult
where
    M: Stream<Item = AuthSuccess>,
    T: Stream<Item = ()>,
    C: Fn() -> bool,
{
    let mut messages = pin!(messages);
    let mut ticks = pin!(ticks);
    loop {
        match future::select(messages.next(), ticks.next()).await {
            Either::Left((Some(success), _)) => return PopupResult::Success(success),
            // Sender dropped: the listener is gone.
            Either::Left((None, _)) => return PopupResult::Closed,
            Either::Right((Some(()), _)) => {}
            Either::Right((None, _)) => return PopupResult::Closed,
        }
        if closed() {
            return settle_on_close(messages.next().now_or_never().flatten());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use futures::executor::block_on;
    use futures::stream;
    use serde_json::json;

    use super::*;

    fn success() -> AuthSuccess {
        parse_auth_message(&json!({
            "type": "discord-auth-success",
            "token": "tok",
            "user": { "id": 5, "username": "nova" }
        }))
        .unwrap()
    }

    /// Counts how many times it was released.
    struct Tracked(Rc<Cell<u32>>);

    impl Release for Tracked {
        fn release(self) {
            self.0.set(self.0.get() + 1);
        }
    }

    fn tracked() -> (Tracked, Rc<Cell<u32>>) {
        let count = Rc::new(Cell::new(0));
        (Tracked(Rc::clone(&count)), count)
    }

    #[test]
    fn closed_popup_without_message_is_cancelled() {
        assert_eq!(settle_on_close(None), PopupResult::Closed);
    }

    #[test]
    fn queued_message_beats_close_in_same_tick() {
        assert_eq!(
            settle_on_close(Some(success())),
            PopupResult::Success(success())
        );
    }

    #[test]
    fn message_before_close_succeeds() {
        let result = block_on(await_popup(
            stream::iter([success()]).chain(stream::pending::<AuthSuccess>()),
            stream::repeat(()),
            || false,
        ));
        assert_eq!(result, PopupResult::Success(success()));
    }

    #[test]
    fn popup_closed_with_nothing_queued_is_cancelled() {
        let polls = Cell::new(0);
        let result = block_on(await_popup(
            stream::pending::<AuthSuccess>(),
            stream::repeat(()),
            || {
                polls.set(polls.get() + 1);
                polls.get() >= 3
            },
        ));
        assert_eq!(result, PopupResult::Closed);
        assert_eq!(polls.get(), 3);
    }

    #[test]
    fn message_arriving_on_closing_tick_still_succeeds() {
        let (tx, rx) = mpsc::unbounded::<AuthSuccess>();
        // The tick delivers the message after the listener was polled, so
        // only the post-close drain can see it.
        let ticks = stream::repeat_with(move || {
            tx.unbounded_send(success()).ok();
        });
        let result = block_on(await_popup(rx, ticks, || true));
        assert_eq!(result, PopupResult::Success(success()));
    }

    #[test]
    fn dropped_listener_resolves_as_closed() {
        let result = block_on(await_popup(stream::empty::<AuthSuccess>(), stream::pending::<()>(), || false));
        assert_eq!(result, PopupResult::Closed);
    }

    #[test]
    fn install_releases_previous_attempt_once() {
        let mut slot = AttemptSlot::new();
        let (first, first_releases) = tracked();
        let (second, second_releases) = tracked();

        slot.install(1, first);
        slot.install(2, second);

        assert_eq!(first_releases.get(), 1);
        assert_eq!(second_releases.get(), 0);
        assert_eq!(slot.generation(), Some(2));
    }

    #[test]
    fn finishing_stale_generation_keeps_newer_attempt() {
        let mut slot = AttemptSlot::new();
        let (first, _) = tracked();
        let (second, second_releases) = tracked();
        slot.install(1, first);
        slot.install(2, second);

        slot.finish(1);

        assert_eq!(second_releases.get(), 0);
        assert_eq!(slot.generation(), Some(2));
    }

    #[test]
    fn finish_releases_exactly_once() {
        let mut slot = AttemptSlot::new();
        let (attempt, releases) = tracked();
        slot.install(7, attempt);

        slot.finish(7);
        slot.finish(7);
        slot.cancel();

        assert_eq!(releases.get(), 1);
        assert_eq!(slot.generation(), None);
    }

    #[test]
    fn messages_from_other_windows_are_rejected() {
        let data = json!({
            "type": "discord-auth-success",
            "token": "tok",
            "user": { "id": 5, "username": "nova" }
        });
        assert_eq!(accept_message(false, &data), None);
        assert_eq!(accept_message(true, &data), Some(success()));
    }

    #[test]
    fn newer_login_supersedes_older_generation() {
        let first = next_generation();
        assert!(is_current(first));
        let second = next_generation();
        assert!(!is_current(first));
        assert!(is_current(second));
    }

    #[test]
    fn phase_starts_idle() {
        assert_eq!(AuthPhase::default(), AuthPhase::Idle);
    }
}
