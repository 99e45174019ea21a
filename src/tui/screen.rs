//! # Screens
//!
//! A `Screen<I, A>` turns an input `I` and a selection callback for `A`
//! into a ready-to-show `ListController`. It is just a stored function, so
//! one screen value can be presented any number of times.
//!
//! ```text
//! async_table_screen(load, config)
//!     present(input, on_select)
//!         ├── oneshot::channel()
//!         ├── ListController::new(config, receiver, on_select)   "Loading..."
//!         └── load(input, Completion)  ──(later)──► complete(items)
//!                                                     └─► poll() fills the list once
//! ```
//!
//! `table_screen` is the synchronous case: its loader completes immediately
//! with the input itself, so the list is populated before `present` returns.

use std::rc::Rc;

use log::debug;
use tokio::sync::oneshot;

use crate::tui::cell::{ListConfig, standard_cell};
use crate::tui::components::ListController;

/// Single-use handle for delivering a screen's items.
///
/// `complete` consumes the handle, so items are delivered at most once.
/// Dropping it without completing leaves the list loading.
pub struct Completion<A> {
    sender: oneshot::Sender<Vec<A>>,
}

impl<A> Completion<A> {
    pub fn complete(self, items: Vec<A>) {
        if self.sender.send(items).is_err() {
            debug!("Screen dismissed before its items arrived");
        }
    }
}

type Build<I, A> = dyn Fn(I, Box<dyn Fn(A)>) -> ListController;

pub struct Screen<I, A> {
    build: Rc<Build<I, A>>,
}

impl<I, A> Clone for Screen<I, A> {
    fn clone(&self) -> Self {
        Self {
            build: Rc::clone(&self.build),
        }
    }
}

impl<I, A> Screen<I, A> {
    pub fn new(build: impl Fn(I, Box<dyn Fn(A)>) -> ListController + 'static) -> Self {
        Self {
            build: Rc::new(build),
        }
    }

    pub fn present(&self, input: I, on_select: impl Fn(A) + 'static) -> ListController {
        (self.build)(input, Box::new(on_select))
    }
}

/// A list whose items are produced by `load`, possibly long after the
/// screen is presented.
pub fn async_table_screen<I, A>(
    load: impl Fn(I, Completion<A>) + 'static,
    config: ListConfig<A>,
) -> Screen<I, A>
where
    I: 'static,
    A: Clone + 'static,
{
    Screen::new(move |input: I, on_select: Box<dyn Fn(A)>| {
        let (sender, receiver) = oneshot::channel();
        let mut list = ListController::new(String::new(), &config, receiver, on_select);
        load(input, Completion { sender });
        // Picks up loaders that complete synchronously.
        list.poll();
        list
    })
}

/// A list over an already available collection.
pub fn table_screen<A>(config: ListConfig<A>) -> Screen<Vec<A>, A>
where
    A: Clone + 'static,
{
    async_table_screen(|items: Vec<A>, done: Completion<A>| done.complete(items), config)
}

/// A one-line-per-item list over an already available collection.
pub fn simple_table_screen<A>(render: impl Fn(&A) -> String + 'static) -> Screen<Vec<A>, A>
where
    A: Clone + 'static,
{
    table_screen(standard_cell(render))
}
