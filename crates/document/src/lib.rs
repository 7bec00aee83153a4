//! petal-document: Document model for the petal editor.
//!
//! A [`Document`] wraps one [`TextBuffer`](petal_buffer::TextBuffer) and
//! tracks an optional storage path plus a dirty flag derived from the
//! buffer's change notifications. The [`file_service`] module is the I/O
//! collaborator: it loads a path into a fresh Document and persists a
//! Document's current text.
//!
//! # Example
//!
//! ```
//! use petal_document::Document;
//!
//! let mut doc = Document::new(None, "abc");
//! assert!(!doc.is_dirty());
//!
//! doc.buffer_mut().insert(3, "d").unwrap();
//! assert!(doc.is_dirty());
//!
//! doc.mark_saved(None);
//! assert!(!doc.is_dirty());
//! ```

mod document;
pub mod file_service;

pub use document::Document;
pub use file_service::FileServiceError;
