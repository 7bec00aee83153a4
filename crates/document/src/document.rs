//! Document model: one owned text buffer, a storage path, and a dirty flag.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use petal_buffer::TextBuffer;

/// A registered dirty-state listener. Receives the new dirty value.
type DirtyListener = Box<dyn FnMut(bool)>;

/// Dirty flag plus its listeners, shared between the Document and the
/// buffer-change observer registered at construction.
struct DirtyState {
    dirty: bool,
    listeners: Vec<DirtyListener>,
}

impl DirtyState {
    /// Sets the dirty value, firing listeners only on an actual transition.
    fn set(&mut self, value: bool) {
        if self.dirty == value {
            return;
        }
        self.dirty = value;
        for listener in &mut self.listeners {
            listener(value);
        }
    }
}

/// A document: exactly one text buffer, an optional storage path, and a
/// dirty flag.
///
/// The dirty flag flips to true on any buffer mutation (observed via the
/// buffer's change notification) and back to false on [`mark_saved`].
/// Dirty-state changes and buffer changes are two independent notification
/// channels: subscribe to the former for title-bar state, to the buffer's
/// [`on_change`](TextBuffer::on_change) for re-rendering.
///
/// [`mark_saved`]: Document::mark_saved
pub struct Document {
    path: Option<PathBuf>,
    buffer: TextBuffer,
    dirty: Rc<RefCell<DirtyState>>,
}

impl Document {
    /// Creates a document with an optional storage path and initial text.
    ///
    /// The dirty flag starts false; constructing the buffer from
    /// `initial_text` does not count as a mutation.
    pub fn new(path: Option<PathBuf>, initial_text: &str) -> Self {
        let mut buffer = TextBuffer::from_str(initial_text);

        let dirty = Rc::new(RefCell::new(DirtyState {
            dirty: false,
            listeners: Vec::new(),
        }));

        // Any buffer mutation marks the document dirty. The shared cell is
        // needed because the closure outlives this constructor's borrows.
        let observer = Rc::clone(&dirty);
        buffer.on_change(move || observer.borrow_mut().set(true));

        Self {
            path,
            buffer,
            dirty,
        }
    }

    /// Returns the storage path, if the document has one.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Returns the document's buffer for reading.
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// Returns the document's buffer for editing.
    ///
    /// The document does not intercept buffer calls; it only observes the
    /// change notification to maintain the dirty flag.
    pub fn buffer_mut(&mut self) -> &mut TextBuffer {
        &mut self.buffer
    }

    /// Returns true if the buffer has been mutated since the last
    /// [`mark_saved`](Document::mark_saved) call (or since creation).
    pub fn is_dirty(&self) -> bool {
        self.dirty.borrow().dirty
    }

    /// Records a successful save: optionally updates the storage path and
    /// clears the dirty flag.
    ///
    /// Called by the file service after a write completes.
    pub fn mark_saved(&mut self, new_path: Option<PathBuf>) {
        if let Some(path) = new_path {
            self.path = Some(path);
        }
        self.dirty.borrow_mut().set(false);
    }

    /// Registers a listener invoked whenever the dirty value actually
    /// changes, with the new value as payload.
    ///
    /// Edge-triggered in both directions: repeated edits while already
    /// dirty fire nothing, as does `mark_saved` on a clean document.
    pub fn on_dirty_changed<F>(&mut self, listener: F)
    where
        F: FnMut(bool) + 'static,
    {
        self.dirty.borrow_mut().listeners.push(Box::new(listener));
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("path", &self.path)
            .field("buffer", &self.buffer)
            .field("dirty", &self.is_dirty())
            .finish()
    }
}
