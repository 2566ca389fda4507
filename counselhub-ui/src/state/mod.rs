//! State Management
//!
//! Global application state and session persistence.

pub mod global;

pub use global::{provide_global_state, GlobalState, LocalStorageStore};

use leptos::on_cleanup;
use std::cell::Cell;
use std::rc::Rc;

/// Flag that turns false when the calling component unmounts. Async work
/// started by a view checks it before writing any state.
pub fn use_mounted() -> Rc<Cell<bool>> {
    let mounted = Rc::new(Cell::new(true));
    let flag = Rc::clone(&mounted);
    on_cleanup(move || flag.set(false));
    mounted
}
