use std::cell::RefCell;

use layout_core::{Dataset, LayoutConfig};

/// Runtime state for the browser bridge: the dataset handed over by the host
/// page and the active layout configuration.
#[derive(Clone, Debug, Default)]
pub struct State {
    pub dataset: Dataset,
    pub config: LayoutConfig,
}

thread_local! {
    pub static STATE: RefCell<State> = RefCell::new(State::default());
}

pub fn with_state<R>(f: impl FnOnce(&State) -> R) -> R {
    STATE.with(|s| f(&s.borrow()))
}

pub fn with_state_mut<R>(f: impl FnOnce(&mut State) -> R) -> R {
    STATE.with(|s| f(&mut s.borrow_mut()))
}
