//! Application Context
//!
//! Shared board controller and selection signal provided via Leptos Context API.

use leptos::prelude::*;
use std::sync::Arc;

use ringlist_core::{BoardController, ListId};

/// App-wide state provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    board: StoredValue<Arc<BoardController>>,
    /// Selected list - read
    pub selected: ReadSignal<Option<ListId>>,
    /// Selected list - write
    set_selected: WriteSignal<Option<ListId>>,
}

impl AppContext {
    pub fn new(
        board: Arc<BoardController>,
        selected: (ReadSignal<Option<ListId>>, WriteSignal<Option<ListId>>),
    ) -> Self {
        Self {
            board: StoredValue::new(board),
            selected: selected.0,
            set_selected: selected.1,
        }
    }

    pub fn board(&self) -> Arc<BoardController> {
        self.board.get_value()
    }

    /// Select a list (transient, not persisted)
    pub fn select(&self, id: ListId) {
        self.board.with_value(|board| board.select_list(id));
        self.set_selected.set(Some(id));
    }

    /// Mirror the controller's selection into the signal.
    /// No-op once the board has been unmounted.
    pub fn sync_selection(&self) {
        if let Some(selected) = self.board.try_with_value(|board| board.selected()) {
            let _ = self.set_selected.try_set(selected);
        }
    }
}

pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
