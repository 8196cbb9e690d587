//! Panic containment for code the engine does not trust.
//!
//! Candidate handlers are ordinary Rust, so the failures worth catching are
//! not just `Err` returns: out-of-range indexing, unwraps, and explicit
//! panics all unwind. `contain` is the single chokepoint that turns an
//! unwind into data - the panic message plus a captured trace - so a bad
//! case (or a bad constructor) can never take the process down with it.

use std::any::Any;
use std::backtrace::Backtrace;
use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

/// What a contained panic left behind.
#[derive(Debug, Clone)]
pub struct PanicReport {
    /// The panic payload rendered as text, e.g.
    /// "index out of bounds: the len is 3 but the index is 7".
    pub message: String,
    /// Panic site plus a forced backtrace, captured by the hook. `None` only
    /// if the panic bypassed the hook entirely.
    pub traceback: Option<String>,
}

thread_local! {
    static CAPTURED: RefCell<Option<String>> = RefCell::new(None);
}

/// Run `f`, converting an unwind into a `PanicReport`.
///
/// The caller decides what a contained panic means for any state `f`
/// touched; the engine discards the in-flight result and keeps going, which
/// matches how the original harness treated a throwing test case.
pub fn contain<T>(f: impl FnOnce() -> T) -> Result<T, PanicReport> {
    install_capture_hook();
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Ok(value),
        Err(payload) => Err(PanicReport {
            message: payload_message(payload.as_ref()),
            traceback: CAPTURED.with(|slot| slot.borrow_mut().take()),
        }),
    }
}

/// Install the capturing hook once per process, chaining to the previous
/// hook so uncontained panics (including test failures) keep their normal
/// stderr reporting.
fn install_capture_hook() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let trace = format!("{info}\nstack backtrace:\n{}", Backtrace::force_capture());
            CAPTURED.with(|slot| *slot.borrow_mut() = Some(trace));
            previous(info);
        }));
    });
}

fn payload_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "panic with a non-string payload".to_string()
    }
}
