// Bounded undo/redo over full-frame snapshots.
// Visual: Ctrl+Z walks back one finished stroke at a time; drawing after an undo
// throws the redo branch away for good.
use std::collections::VecDeque;

use tracing::debug;

use crate::error::Result;
use crate::types::PixelBuffer;

pub const DEFAULT_CAPACITY: usize = 20;

/// Linear history with a cursor. Entries are deep copies and never change once stored.
///
/// Invariants: `entries.len() <= capacity`; the cursor is `None` only while empty,
/// otherwise it indexes a stored entry.
#[derive(Debug)]
pub struct History {
    entries: VecDeque<PixelBuffer>,
    cursor: Option<usize>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl History {
    /// A capacity of 0 is bumped to 1 so the current state can always be held.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { entries: VecDeque::with_capacity(capacity), cursor: None, capacity }
    }

    /// Store a copy of `buffer` after the cursor.
    ///
    /// Anything past the cursor (the redo branch) is dropped first. When the
    /// stack then overflows, the oldest entry goes. Either way the cursor ends
    /// on the entry just saved.
    pub fn save(&mut self, buffer: &PixelBuffer) -> Result<()> {
        if let Some(first) = self.entries.front() {
            buffer.ensure_dimensions(first.width(), first.height())?;
        }

        let keep = self.cursor.map_or(0, |c| c + 1);
        let discarded = self.entries.len() - keep;
        self.entries.truncate(keep);
        self.entries.push_back(buffer.clone());

        let evicted = self.entries.len() > self.capacity;
        if evicted {
            self.entries.pop_front();
        }
        self.cursor = Some(self.entries.len() - 1);

        debug!(discarded, evicted, len = self.entries.len(), "history: snapshot saved");
        Ok(())
    }

    /// Step back one entry. `None` means there is nothing to undo.
    pub fn undo(&mut self) -> Option<&PixelBuffer> {
        if !self.can_undo() {
            return None;
        }
        let c = self.cursor? - 1;
        self.cursor = Some(c);
        self.entries.get(c)
    }

    /// Step forward one entry. `None` means there is nothing to redo.
    pub fn redo(&mut self) -> Option<&PixelBuffer> {
        if !self.can_redo() {
            return None;
        }
        let c = self.cursor? + 1;
        self.cursor = Some(c);
        self.entries.get(c)
    }

    pub fn can_undo(&self) -> bool {
        matches!(self.cursor, Some(c) if c > 0)
    }

    pub fn can_redo(&self) -> bool {
        matches!(self.cursor, Some(c) if c + 1 < self.entries.len())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }

    /// The entry under the cursor.
    pub fn current(&self) -> Option<&PixelBuffer> {
        self.entries.get(self.cursor?)
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Pixel bytes held across all snapshots.
    pub fn memory_size(&self) -> usize {
        self.entries.iter().map(PixelBuffer::byte_len).sum()
    }
}
