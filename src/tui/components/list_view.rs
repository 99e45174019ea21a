//! # List View Component
//!
//! One list implementation for every item type.
//!
//! The item type is erased at construction: `BoundList<A>` owns the items
//! together with the render function and selection callback for that same
//! `A`, and is stored as a `Box<dyn ListSource>`. The controller only ever
//! asks for rows by index and forwards selections by index, so no downcast
//! exists anywhere and a type mismatch cannot be written.
//!
//! ```text
//! ListController
//! ├── source: Box<dyn ListSource> ── BoundList<A>
//! │                                  ├── items: Option<Vec<A>>   (None = loading)
//! │                                  ├── pending: oneshot::Receiver<Vec<A>>
//! │                                  ├── render: Fn(&mut Row, &A)
//! │                                  └── on_select: Fn(A)
//! ├── style: CellStyle
//! └── list_state: ListState
//! ```
//!
//! Follows the persistent state pattern of the other overlays: the
//! controller lives on the navigation stack and is rendered every frame.

use log::debug;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph};
use tokio::sync::oneshot::{self, error::TryRecvError};

use crate::tui::cell::{CellStyle, ListConfig, RenderFn, Row};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const PAGE_SIZE: usize = 10;

/// A list of some item type, seen only through row indices.
pub trait ListSource {
    /// Picks up loaded items if they have arrived. Returns true on arrival.
    fn poll(&mut self) -> bool;
    fn is_loading(&self) -> bool;
    fn len(&self) -> usize;
    /// Renders the item at `index` into a fresh row.
    fn row(&self, index: usize) -> Option<Row>;
    /// Hands the item at `index` to the selection callback.
    fn select(&self, index: usize) -> bool;
}

struct BoundList<A> {
    items: Option<Vec<A>>,
    pending: Option<oneshot::Receiver<Vec<A>>>,
    render: RenderFn<A>,
    on_select: Box<dyn Fn(A)>,
}

impl<A: Clone> ListSource for BoundList<A> {
    fn poll(&mut self) -> bool {
        let Some(receiver) = self.pending.as_mut() else {
            return false;
        };
        match receiver.try_recv() {
            Ok(items) => {
                debug!("List received {} items", items.len());
                self.items = Some(items);
                self.pending = None;
                true
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Closed) => {
                // Loader gave up without completing: stay in the loading state.
                debug!("List loader dropped its completion");
                self.pending = None;
                false
            }
        }
    }

    fn is_loading(&self) -> bool {
        self.items.is_none()
    }

    fn len(&self) -> usize {
        self.items.as_ref().map_or(0, Vec::len)
    }

    fn row(&self, index: usize) -> Option<Row> {
        let item = self.items.as_ref()?.get(index)?;
        let mut row = Row::default();
        (self.render)(&mut row, item);
        Some(row)
    }

    fn select(&self, index: usize) -> bool {
        match self.items.as_ref().and_then(|items| items.get(index)) {
            Some(item) => {
                (self.on_select)(item.clone());
                true
            }
            None => false,
        }
    }
}

/// Events emitted by a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListEvent {
    Selected(usize),
    Back,
}

pub struct ListController {
    title: String,
    style: CellStyle,
    source: Box<dyn ListSource>,
    selected: usize,
    list_state: ListState,
}

impl ListController {
    /// Binds a render configuration and a selection callback to the items
    /// that will arrive on `receiver`.
    pub fn new<A: Clone + 'static>(
        title: impl Into<String>,
        config: &ListConfig<A>,
        receiver: oneshot::Receiver<Vec<A>>,
        on_select: Box<dyn Fn(A)>,
    ) -> Self {
        let source = BoundList {
            items: None,
            pending: Some(receiver),
            render: config.render.clone(),
            on_select,
        };
        Self {
            title: title.into(),
            style: config.style,
            source: Box::new(source),
            selected: 0,
            list_state: ListState::default(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn style(&self) -> CellStyle {
        self.style
    }

    /// Checks for loaded items. Returns true if the list changed.
    pub fn poll(&mut self) -> bool {
        let arrived = self.source.poll();
        if arrived {
            self.selected = 0;
            self.list_state
                .select(if self.source.len() > 0 { Some(0) } else { None });
        }
        arrived
    }

    pub fn is_loading(&self) -> bool {
        self.source.is_loading()
    }

    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn row(&self, index: usize) -> Option<Row> {
        self.source.row(index)
    }

    pub fn selected(&self) -> Option<usize> {
        (!self.is_empty()).then_some(self.selected)
    }

    fn move_selection(&mut self, to: usize) {
        if self.is_empty() {
            return;
        }
        self.selected = to.min(self.len() - 1);
        self.list_state.select(Some(self.selected));
    }
}

impl EventHandler for ListController {
    type Event = ListEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<ListEvent> {
        match event {
            TuiEvent::Back => Some(ListEvent::Back),
            TuiEvent::CursorUp => {
                self.move_selection(self.selected.saturating_sub(1));
                None
            }
            TuiEvent::CursorDown => {
                self.move_selection(self.selected + 1);
                None
            }
            TuiEvent::PageUp => {
                self.move_selection(self.selected.saturating_sub(PAGE_SIZE));
                None
            }
            TuiEvent::PageDown => {
                self.move_selection(self.selected + PAGE_SIZE);
                None
            }
            TuiEvent::Home => {
                self.move_selection(0);
                None
            }
            TuiEvent::End => {
                self.move_selection(usize::MAX);
                None
            }
            TuiEvent::Submit => self
                .source
                .select(self.selected)
                .then_some(ListEvent::Selected(self.selected)),
            _ => None,
        }
    }
}

impl Component for ListController {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = if self.is_loading() {
            " Loading... ".to_string()
        } else {
            format!(" {} ", self.title)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(title)
            .title_alignment(Alignment::Left)
            .padding(Padding::horizontal(1));

        if self.is_loading() || self.is_empty() {
            let message = if self.is_loading() { "Loading..." } else { "Nothing here." };
            let placeholder = Paragraph::new(Line::from(message).centered())
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(placeholder, area);
            return;
        }

        // borders + padding
        let inner_width = area.width.saturating_sub(4);
        let items: Vec<ListItem> = (0..self.len())
            .filter_map(|i| self.row(i))
            .map(|row| row.to_list_item(self.style, inner_width))
            .collect();

        let list = List::new(items).block(block).highlight_style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        );

        frame.render_stateful_widget(list, area, &mut self.list_state);
    }
}
