//! TextBuffer is the main public API for text editing operations.
//!
//! It wraps a piece table (the storage layer) and adds synchronous change
//! notification: every successful mutation fires the registered listeners
//! after the piece list is consistent and before the call returns.

use std::fmt;

use crate::error::BufferError;
use crate::piece_table::PieceTable;

/// A registered change listener. Carries no payload; consumers re-query the
/// buffer as needed.
type ChangeListener = Box<dyn FnMut()>;

/// A text buffer with offset-based editing and change notification.
///
/// All offsets are character indices into the current logical text,
/// 0-based. Insertion positions range over `[0, len]`; read and delete
/// ranges must satisfy `start + count <= len`. Out-of-range arguments fail
/// with [`BufferError`] before any mutation, so a failed call leaves the
/// buffer untouched and fires no notification.
///
/// The buffer is single-threaded by design: listeners are plain `FnMut`
/// closures invoked on the calling thread, in registration order.
pub struct TextBuffer {
    table: PieceTable,
    listeners: Vec<ChangeListener>,
}

impl TextBuffer {
    /// Creates a new empty text buffer.
    pub fn new() -> Self {
        Self {
            table: PieceTable::new(),
            listeners: Vec::new(),
        }
    }

    /// Creates a text buffer initialized with the given content.
    ///
    /// Note: We don't implement `FromStr` because it requires returning
    /// `Result`, but parsing a string into a TextBuffer cannot fail.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Self {
        Self {
            table: PieceTable::from_str(content),
            listeners: Vec::new(),
        }
    }

    // ==================== Accessors ====================

    /// Returns the total character count in the buffer.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns true if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of pieces in the underlying piece table.
    pub fn piece_count(&self) -> usize {
        self.table.pieces().len()
    }

    /// Returns the substring `[start, start+count)`.
    pub fn read(&self, start: usize, count: usize) -> Result<String, BufferError> {
        self.table.read(start, count)
    }

    /// Returns the entire buffer content as a String.
    pub fn content(&self) -> String {
        self.table.to_string()
    }

    // ==================== Mutations ====================

    /// Inserts `text` at the given character position.
    ///
    /// Inserting empty text is a no-op and fires no notification.
    pub fn insert(&mut self, position: usize, text: &str) -> Result<(), BufferError> {
        if text.is_empty() {
            return Ok(());
        }
        self.table.insert(position, text)?;
        self.notify_changed();
        Ok(())
    }

    /// Deletes the character range `[start, start+count)`.
    ///
    /// Deleting zero characters is a no-op and fires no notification.
    pub fn delete(&mut self, start: usize, count: usize) -> Result<(), BufferError> {
        if count == 0 {
            return Ok(());
        }
        self.table.delete(start, count)?;
        self.notify_changed();
        Ok(())
    }

    // ==================== Change Notification ====================

    /// Registers a listener invoked after every successful mutation.
    ///
    /// Listeners fire synchronously on the calling thread, in registration
    /// order, once per `insert`/`delete` call. Reads, no-ops, and failed
    /// calls do not fire.
    pub fn on_change<F>(&mut self, listener: F)
    where
        F: FnMut() + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    fn notify_changed(&mut self) {
        for listener in &mut self.listeners {
            listener();
        }
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextBuffer")
            .field("table", &self.table)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
