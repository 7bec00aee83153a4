//! Piece table storage for efficient text editing.
//!
//! A piece table keeps the text supplied at construction immutable and
//! appends every insertion to a separate add buffer. The current text is
//! described by an ordered list of pieces, each naming a contiguous slice of
//! one of the two backing buffers. Edits splice the piece list near the edit
//! location; the backing buffers are never rewritten, so the cost of an edit
//! is bounded by the piece count, not the document size.

use crate::error::BufferError;

/// Which backing buffer a piece's characters live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceSource {
    /// The immutable text supplied at construction.
    Original,
    /// The append-only buffer of inserted text.
    Added,
}

/// A contiguous slice of one backing buffer.
///
/// Concatenating every piece's slice, in list order, reconstructs the
/// buffer's current text exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    /// Which backing buffer `start` indexes into.
    pub source: PieceSource,
    /// Character offset into the backing buffer.
    pub start: usize,
    /// Number of characters. Always greater than zero; zero-length pieces
    /// are dropped rather than retained.
    pub len: usize,
}

/// A piece table for text storage and manipulation.
///
/// All offsets are character indices into the current logical text. The
/// backing buffers are stored as `Vec<char>` so offset arithmetic never has
/// to respect UTF-8 byte boundaries.
///
/// This is the storage layer only: it validates ranges and splices pieces,
/// but knows nothing about change notification (see
/// [`TextBuffer`](crate::TextBuffer)).
#[derive(Debug)]
pub struct PieceTable {
    /// Text supplied at construction. Never mutated.
    original: Vec<char>,
    /// Inserted text. Append-only: edits remove pieces, never characters.
    add: Vec<char>,
    /// Ordered piece list describing the current text.
    pieces: Vec<Piece>,
    /// Cached total length; always equals the sum of piece lengths.
    len: usize,
}

impl PieceTable {
    /// Creates a new empty piece table.
    pub fn new() -> Self {
        Self {
            original: Vec::new(),
            add: Vec::new(),
            pieces: Vec::new(),
            len: 0,
        }
    }

    /// Creates a piece table initialized with the given text.
    ///
    /// A non-empty initial text produces a single piece covering all of it;
    /// an empty initial text produces no pieces at all.
    ///
    /// Note: We don't implement `FromStr` because it requires returning
    /// `Result`, but parsing a string into a PieceTable cannot fail.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &str) -> Self {
        let original: Vec<char> = text.chars().collect();
        let len = original.len();

        let mut pieces = Vec::new();
        if len > 0 {
            pieces.push(Piece {
                source: PieceSource::Original,
                start: 0,
                len,
            });
        }

        Self {
            original,
            add: Vec::new(),
            pieces,
            len,
        }
    }

    /// Returns the logical length of the buffer in characters.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current piece list.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Returns an iterator over all characters in the buffer, in order.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.pieces
            .iter()
            .flat_map(move |piece| self.source_slice(piece).iter().copied())
    }

    /// Returns the substring `[start, start+count)` as a String.
    ///
    /// Pieces partially overlapping the range boundaries are sliced, not
    /// included whole.
    pub fn read(&self, start: usize, count: usize) -> Result<String, BufferError> {
        self.validate_range(start, count)?;

        let mut result = String::with_capacity(count);
        let mut remaining = count;
        let mut pos = 0;

        for piece in &self.pieces {
            if remaining == 0 {
                break;
            }
            if pos + piece.len <= start {
                pos += piece.len;
                continue;
            }

            let take_start = start.saturating_sub(pos);
            let take_len = (piece.len - take_start).min(remaining);
            result.extend(&self.source_slice(piece)[take_start..take_start + take_len]);

            remaining -= take_len;
            pos += piece.len;
        }

        Ok(result)
    }

    /// Inserts `text` at the given character position.
    ///
    /// The text is appended once to the add buffer and a new piece
    /// referencing that append is spliced into the piece list. A position
    /// exactly at a piece boundary inserts between the adjacent pieces
    /// without touching them; a position strictly inside a piece splits it
    /// into left and right remainders around the new piece.
    ///
    /// Inserting empty text is a no-op (the add buffer does not grow).
    pub fn insert(&mut self, position: usize, text: &str) -> Result<(), BufferError> {
        if text.is_empty() {
            return Ok(());
        }
        if position > self.len {
            return Err(BufferError::PositionOutOfBounds {
                position,
                len: self.len,
            });
        }

        let add_start = self.add.len();
        self.add.extend(text.chars());
        let new_piece = Piece {
            source: PieceSource::Added,
            start: add_start,
            len: self.add.len() - add_start,
        };

        match self.find_piece(position) {
            // Empty piece list: the new piece is the whole buffer
            None => self.pieces.push(new_piece),
            Some((index, offset)) => {
                let cur = self.pieces[index];
                if offset == 0 {
                    // At the leading boundary: insert before the piece
                    self.pieces.insert(index, new_piece);
                } else if offset == cur.len {
                    // At the trailing boundary: insert after the piece
                    self.pieces.insert(index + 1, new_piece);
                } else {
                    // Strictly inside: split into left + new + right
                    let left = Piece {
                        source: cur.source,
                        start: cur.start,
                        len: offset,
                    };
                    let right = Piece {
                        source: cur.source,
                        start: cur.start + offset,
                        len: cur.len - offset,
                    };
                    self.pieces[index] = left;
                    self.pieces.insert(index + 1, new_piece);
                    self.pieces.insert(index + 2, right);
                }
            }
        }

        self.len += new_piece.len;
        self.assert_pieces_consistent();
        Ok(())
    }

    /// Deletes the character range `[start, start+count)`.
    ///
    /// Every piece fully covered by the range is removed; pieces partially
    /// overlapping at either boundary are trimmed so only the overlapping
    /// fragment is discarded. A piece whose interior contains the whole
    /// range is split into the two surviving remainders.
    ///
    /// Deleting zero characters is a no-op.
    pub fn delete(&mut self, start: usize, count: usize) -> Result<(), BufferError> {
        if count == 0 {
            return Ok(());
        }
        self.validate_range(start, count)?;

        let end = start + count;
        let mut remaining = count;
        let mut pos = 0;
        let mut i = 0;

        while i < self.pieces.len() && remaining > 0 {
            let piece = self.pieces[i];
            let piece_start = pos;
            let piece_end = pos + piece.len;

            if piece_end <= start {
                // Entirely before the range
                pos = piece_end;
                i += 1;
                continue;
            }
            if piece_start >= end {
                break;
            }

            let cut_start = start.max(piece_start);
            let cut_end = end.min(piece_end);
            let cut_len = cut_end - cut_start;

            let left_len = cut_start - piece_start;
            let right_len = piece_end - cut_end;

            if left_len > 0 && right_len > 0 {
                // Range is interior to this piece: keep both remainders
                let left = Piece {
                    source: piece.source,
                    start: piece.start,
                    len: left_len,
                };
                let right = Piece {
                    source: piece.source,
                    start: piece.start + piece.len - right_len,
                    len: right_len,
                };
                self.pieces[i] = left;
                self.pieces.insert(i + 1, right);
                i += 1;
            } else if left_len > 0 {
                // Trailing fragment cut: keep the left remainder
                self.pieces[i] = Piece {
                    source: piece.source,
                    start: piece.start,
                    len: left_len,
                };
                i += 1;
            } else if right_len > 0 {
                // Leading fragment cut: keep the right remainder
                self.pieces[i] = Piece {
                    source: piece.source,
                    start: piece.start + piece.len - right_len,
                    len: right_len,
                };
                i += 1;
            } else {
                // Fully covered: drop the piece (no zero-length pieces)
                self.pieces.remove(i);
            }

            remaining -= cut_len;
            pos = cut_end;
        }

        self.len -= count;
        self.assert_pieces_consistent();
        Ok(())
    }

    /// Locates the piece containing the given logical position.
    ///
    /// Returns `(index, offset)` where `offset` is relative to the piece's
    /// start. A position exactly on a boundary lands at the end of the
    /// earlier piece (`offset == piece.len`), which `insert` treats the same
    /// as the start of the following piece. Returns None when the piece list
    /// is empty.
    fn find_piece(&self, position: usize) -> Option<(usize, usize)> {
        if self.pieces.is_empty() {
            return None;
        }

        let mut pos = 0;
        for (index, piece) in self.pieces.iter().enumerate() {
            if pos + piece.len >= position {
                return Some((index, position - pos));
            }
            pos += piece.len;
        }

        let last = self.pieces.len() - 1;
        Some((last, self.pieces[last].len))
    }

    /// Returns the backing-buffer slice a piece refers to.
    fn source_slice(&self, piece: &Piece) -> &[char] {
        let buffer = match piece.source {
            PieceSource::Original => &self.original,
            PieceSource::Added => &self.add,
        };
        &buffer[piece.start..piece.start + piece.len]
    }

    /// Validates that `[start, start+count)` lies within the buffer.
    fn validate_range(&self, start: usize, count: usize) -> Result<(), BufferError> {
        let in_bounds = start
            .checked_add(count)
            .is_some_and(|end| end <= self.len);
        if in_bounds {
            Ok(())
        } else {
            Err(BufferError::RangeOutOfBounds {
                start,
                count,
                len: self.len,
            })
        }
    }

    /// Debug assertion: verifies the cached length against the piece-sum
    /// ground truth and that no zero-length piece survived a splice.
    /// Compiled out in release builds.
    #[cfg(debug_assertions)]
    fn assert_pieces_consistent(&self) {
        let sum: usize = self.pieces.iter().map(|piece| piece.len).sum();
        assert_eq!(
            sum, self.len,
            "cached length drifted from piece sum!\n  pieces: {:?}",
            self.pieces,
        );
        assert!(
            self.pieces.iter().all(|piece| piece.len > 0),
            "zero-length piece retained!\n  pieces: {:?}",
            self.pieces,
        );
    }

    #[cfg(not(debug_assertions))]
    fn assert_pieces_consistent(&self) {}
}

impl Default for PieceTable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PieceTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for ch in self.chars() {
            write!(f, "{}", ch)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_empty() {
        let table = PieceTable::new();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert_eq!(table.pieces().len(), 0);
    }

    #[test]
    fn test_from_str() {
        let table = PieceTable::from_str("hello");
        assert_eq!(table.len(), 5);
        assert_eq!(table.pieces().len(), 1);
        assert_eq!(table.to_string(), "hello");
    }

    #[test]
    fn test_from_str_empty_produces_no_pieces() {
        let table = PieceTable::from_str("");
        assert!(table.is_empty());
        assert_eq!(table.pieces().len(), 0);
    }

    // ==================== Insert ====================

    #[test]
    fn test_insert_into_empty() {
        let mut table = PieceTable::new();
        table.insert(0, "abc").unwrap();
        assert_eq!(table.to_string(), "abc");
        assert_eq!(table.pieces().len(), 1);
    }

    #[test]
    fn test_insert_at_start() {
        let mut table = PieceTable::from_str("world");
        table.insert(0, "hello ").unwrap();
        assert_eq!(table.to_string(), "hello world");
        assert_eq!(table.pieces().len(), 2);
    }

    #[test]
    fn test_insert_at_end() {
        let mut table = PieceTable::from_str("hello");
        table.insert(5, " world").unwrap();
        assert_eq!(table.to_string(), "hello world");
        assert_eq!(table.pieces().len(), 2);
    }

    #[test]
    fn test_insert_in_middle_splits_piece() {
        let mut table = PieceTable::from_str("heworld");
        table.insert(2, "llo ").unwrap();
        assert_eq!(table.to_string(), "hello world");
        // left remainder + new piece + right remainder
        assert_eq!(table.pieces().len(), 3);
        assert_eq!(table.pieces()[0].source, PieceSource::Original);
        assert_eq!(table.pieces()[1].source, PieceSource::Added);
        assert_eq!(table.pieces()[2].source, PieceSource::Original);
    }

    #[test]
    fn test_insert_at_piece_boundary_does_not_split() {
        let mut table = PieceTable::from_str("ad");
        table.insert(1, "b").unwrap();
        assert_eq!(table.pieces().len(), 3);
        // Inserting at the b/c boundary must not split either neighbor
        table.insert(2, "c").unwrap();
        assert_eq!(table.to_string(), "abcd");
        assert_eq!(table.pieces().len(), 4);
    }

    #[test]
    fn test_insert_empty_is_noop() {
        let mut table = PieceTable::from_str("abc");
        table.insert(1, "").unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.pieces().len(), 1);
    }

    #[test]
    fn test_insert_past_end_fails() {
        let mut table = PieceTable::from_str("abc");
        let err = table.insert(4, "x").unwrap_err();
        assert_eq!(
            err,
            BufferError::PositionOutOfBounds {
                position: 4,
                len: 3
            }
        );
        assert_eq!(table.to_string(), "abc");
    }

    // ==================== Read ====================

    #[test]
    fn test_read_full() {
        let table = PieceTable::from_str("hello world");
        assert_eq!(table.read(0, 11).unwrap(), "hello world");
    }

    #[test]
    fn test_read_slices_partial_pieces() {
        let mut table = PieceTable::from_str("hello world");
        table.insert(5, ",").unwrap();
        // Range straddles the original/added/original piece boundaries
        assert_eq!(table.read(3, 6).unwrap(), "lo, wo");
    }

    #[test]
    fn test_read_empty_range() {
        let table = PieceTable::from_str("abc");
        assert_eq!(table.read(1, 0).unwrap(), "");
        assert_eq!(table.read(3, 0).unwrap(), "");
    }

    #[test]
    fn test_read_past_end_fails() {
        let table = PieceTable::from_str("abc");
        assert!(table.read(0, 4).is_err());
        assert!(table.read(3, 1).is_err());
        assert!(table.read(usize::MAX, 2).is_err());
    }

    // ==================== Delete ====================

    #[test]
    fn test_delete_within_single_piece() {
        let mut table = PieceTable::from_str("hello world");
        table.delete(5, 1).unwrap();
        assert_eq!(table.to_string(), "helloworld");
        assert_eq!(table.pieces().len(), 2);
    }

    #[test]
    fn test_delete_leading_fragment() {
        let mut table = PieceTable::from_str("hello");
        table.delete(0, 2).unwrap();
        assert_eq!(table.to_string(), "llo");
        assert_eq!(table.pieces().len(), 1);
    }

    #[test]
    fn test_delete_trailing_fragment() {
        let mut table = PieceTable::from_str("hello");
        table.delete(3, 2).unwrap();
        assert_eq!(table.to_string(), "hel");
        assert_eq!(table.pieces().len(), 1);
    }

    #[test]
    fn test_delete_whole_piece_drops_it() {
        let mut table = PieceTable::from_str("abc");
        table.delete(0, 3).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.pieces().len(), 0);
    }

    #[test]
    fn test_delete_spanning_multiple_pieces() {
        let mut table = PieceTable::from_str("abcdef");
        table.insert(3, "XYZ").unwrap();
        assert_eq!(table.to_string(), "abcXYZdef");
        // Spans the tail of the first piece, all of XYZ, the head of the last
        table.delete(2, 5).unwrap();
        assert_eq!(table.to_string(), "abef");
    }

    #[test]
    fn test_delete_zero_is_noop() {
        let mut table = PieceTable::from_str("abc");
        table.delete(1, 0).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.pieces().len(), 1);
    }

    #[test]
    fn test_delete_past_end_fails() {
        let mut table = PieceTable::from_str("abc");
        assert!(table.delete(0, 4).is_err());
        assert!(table.delete(2, 2).is_err());
        assert_eq!(table.to_string(), "abc");
    }

    // ==================== Backing buffers ====================

    #[test]
    fn test_delete_does_not_shrink_add_buffer() {
        // Edits remove pieces, never characters: re-inserting after a
        // delete keeps appending to the add buffer
        let mut table = PieceTable::from_str("ab");
        table.insert(1, "x").unwrap();
        table.delete(1, 1).unwrap();
        table.insert(1, "y").unwrap();
        assert_eq!(table.to_string(), "ayb");
    }

    #[test]
    fn test_unicode_offsets_are_char_indices() {
        let mut table = PieceTable::from_str("héllo");
        assert_eq!(table.len(), 5);
        table.insert(2, "ü").unwrap();
        assert_eq!(table.to_string(), "héüllo");
        table.delete(1, 2).unwrap();
        assert_eq!(table.to_string(), "hllo");
    }

    #[test]
    fn test_interleaved_edits_keep_length_consistent() {
        let mut table = PieceTable::from_str("0123456789");
        table.insert(5, "abc").unwrap();
        table.delete(2, 4).unwrap();
        table.insert(0, "zz").unwrap();
        table.delete(8, 3).unwrap();
        let text = table.to_string();
        assert_eq!(text.chars().count(), table.len());
        let sum: usize = table.pieces().iter().map(|p| p.len).sum();
        assert_eq!(sum, table.len());
    }
}
