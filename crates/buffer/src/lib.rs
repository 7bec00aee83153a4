//! petal-buffer: A text buffer implementation for the petal editor.
//!
//! This crate provides a piece table-backed text buffer with offset-based
//! editing operations and synchronous change notification. It is designed as
//! the storage layer for an interactive editor: insertions and deletions near
//! the edit location stay cheap regardless of total document size.
//!
//! # Overview
//!
//! The main type is [`TextBuffer`], which provides:
//! - Range reads by character offset
//! - Insertion and deletion at arbitrary character offsets
//! - Fail-fast range validation (a failed call never mutates the buffer)
//! - Change listeners invoked synchronously after every successful mutation
//!
//! # Example
//!
//! ```
//! use petal_buffer::TextBuffer;
//!
//! let mut buffer = TextBuffer::from_str("hello world");
//!
//! // Replace the space with an underscore
//! buffer.delete(5, 1).unwrap();
//! buffer.insert(5, "_").unwrap();
//!
//! assert_eq!(buffer.len(), 11);
//! assert_eq!(buffer.read(0, 11).unwrap(), "hello_world");
//! ```
//!
//! # Change Notification
//!
//! Listeners registered with [`TextBuffer::on_change`] fire once per
//! successful `insert`/`delete`, after the piece list is consistent and
//! before the call returns. Reads, no-ops (empty insert, zero-length delete),
//! and failed calls never fire. Listeners carry no payload; consumers
//! re-query `len()`/`read()` as needed.

mod error;
mod piece_table;
mod text_buffer;

pub use error::BufferError;
pub use piece_table::{Piece, PieceSource, PieceTable};
pub use text_buffer::TextBuffer;
