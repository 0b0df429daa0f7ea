//! Lifecycle notifications fired by a worksheet.
//!
//! Listeners are called synchronously, in registration order, on the thread
//! that fired the event. The test collector records them so ordering
//! invariants (one start, one end per edit) can be checked.

use std::cell::RefCell;
use std::rc::Rc;

use crate::cell::CellValue;
use crate::cell_ref::CellRef;
use crate::history::EditRecord;

#[derive(Debug, Clone, PartialEq)]
pub enum GridEvent {
    /// An edit is about to open on a cell. Always precedes editor construction.
    EditionStart { x: usize, y: usize },

    /// The editing surface for a cell was built.
    CreateEditor { x: usize, y: usize },

    /// The edit session on a cell closed. `save` is false for a discard.
    EditionEnd { x: usize, y: usize, value: Option<CellValue>, save: bool },

    /// Values were written to the data matrix, as one user action.
    AfterChanges { records: Vec<EditRecord> },
}

impl GridEvent {
    /// Name used by listeners that key on strings.
    pub fn name(&self) -> &'static str {
        match self {
            GridEvent::EditionStart { .. } => "oneditionstart",
            GridEvent::CreateEditor { .. } => "oncreateeditor",
            GridEvent::EditionEnd { .. } => "oneditionend",
            GridEvent::AfterChanges { .. } => "onafterchanges",
        }
    }

    /// The cell the event is about, if it concerns a single cell.
    pub fn cell(&self) -> Option<CellRef> {
        match self {
            GridEvent::EditionStart { x, y }
            | GridEvent::CreateEditor { x, y }
            | GridEvent::EditionEnd { x, y, .. } => Some(CellRef::new(*x, *y)),
            GridEvent::AfterChanges { .. } => None,
        }
    }
}

/// Callback type for receiving grid events.
pub type EventCallback = Box<dyn FnMut(&GridEvent)>;

/// Registered-listener dispatch.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<EventCallback>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { listeners: Vec::new() }
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&GridEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Subscribe a shared collector; returns it for convenience.
    pub fn collect_into(&mut self, collector: Rc<RefCell<EventCollector>>) -> Rc<RefCell<EventCollector>> {
        let sink = Rc::clone(&collector);
        self.subscribe(move |event| sink.borrow_mut().push(event.clone()));
        collector
    }

    /// Fire-and-forget. Listeners cannot fail the caller.
    pub fn dispatch(&mut self, event: GridEvent) {
        log::trace!("dispatch {}", event.name());
        for listener in self.listeners.iter_mut() {
            listener(&event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

/// Simple event collector for testing.
#[derive(Default)]
pub struct EventCollector {
    events: Vec<GridEvent>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn push(&mut self, event: GridEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[GridEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.events.iter().map(GridEvent::name).collect()
    }

    /// Filter to only AfterChanges record batches.
    pub fn after_changes(&self) -> Vec<&[EditRecord]> {
        self.events
            .iter()
            .filter_map(|e| match e {
                GridEvent::AfterChanges { records } => Some(records.as_slice()),
                _ => None,
            })
            .collect()
    }

    /// Filter to only EditionEnd events, as `(cell, value, save)`.
    pub fn edition_ends(&self) -> Vec<(CellRef, Option<&CellValue>, bool)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                GridEvent::EditionEnd { x, y, value, save } => {
                    Some((CellRef::new(*x, *y), value.as_ref(), *save))
                }
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, name: &str) -> usize {
        self.events.iter().filter(|e| e.name() == name).count()
    }
}
