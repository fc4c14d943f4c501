use std::collections::VecDeque;

use crate::error::MemoryError;
use crate::game::{BoardState, Cell, GameOutcome, CELLS};

/// Columns in a raw record row: nine cells followed by the outcome label.
pub const RECORD_COLUMNS: usize = CELLS + 1;

/// A board state seen during a finished game, labeled with that game's outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryRecord {
    pub state: BoardState,
    pub outcome: GameOutcome,
}

impl MemoryRecord {
    pub fn new(state: BoardState, outcome: GameOutcome) -> Self {
        MemoryRecord { state, outcome }
    }

    /// Parse a raw row of nine cell encodings plus an outcome class index.
    pub fn from_row(row: &[i64]) -> Result<Self, MemoryError> {
        if row.len() != RECORD_COLUMNS {
            return Err(MemoryError::ShapeMismatch {
                expected: RECORD_COLUMNS,
                got: row.len(),
            });
        }

        let mut cells = [Cell::Empty; CELLS];
        for (column, (&value, cell)) in row[..CELLS].iter().zip(cells.iter_mut()).enumerate() {
            *cell = u8::try_from(value)
                .ok()
                .and_then(Cell::decode)
                .ok_or(MemoryError::InvalidCell { column, value })?;
        }

        let label = row[CELLS];
        let outcome = usize::try_from(label)
            .ok()
            .and_then(GameOutcome::from_class_index)
            .ok_or(MemoryError::InvalidOutcome { value: label })?;

        Ok(MemoryRecord::new(BoardState::from_cells(cells), outcome))
    }

    /// Inverse of [`MemoryRecord::from_row`].
    pub fn to_row(&self) -> Option<[i64; RECORD_COLUMNS]> {
        let label = self.outcome.class_index()?;
        let mut row = [0i64; RECORD_COLUMNS];
        for (dst, src) in row.iter_mut().zip(self.state.encode()) {
            *dst = i64::from(src);
        }
        row[CELLS] = label as i64;
        Some(row)
    }
}

/// Fixed-capacity FIFO store of game records.
///
/// Records arrive one whole game at a time. When a batch does not fit, the
/// oldest records are evicted to make room, so the store always holds the
/// `capacity` most recently added records.
pub struct Memory {
    records: VecDeque<MemoryRecord>,
    capacity: usize,
    update_after: usize,
    new_since_training: usize,
    total_added: usize,
}

impl Memory {
    pub fn new(capacity: usize, update_after: usize) -> Self {
        assert!(capacity > 0, "Memory capacity must be positive");
        Memory {
            records: VecDeque::with_capacity(capacity.min(1 << 16)),
            capacity,
            update_after,
            new_since_training: 0,
            total_added: 0,
        }
    }

    /// Append a batch of records, evicting the oldest ones on overflow.
    /// Returns the number of records evicted.
    pub fn memorize(&mut self, batch: &[MemoryRecord]) -> Result<usize, MemoryError> {
        if batch.iter().any(|r| !r.outcome.is_terminal()) {
            return Err(MemoryError::UnfinishedRecord);
        }

        // A batch larger than the whole store keeps only its newest records.
        let kept = &batch[batch.len().saturating_sub(self.capacity)..];
        let shortfall = kept.len().saturating_sub(self.free_capacity());
        for _ in 0..shortfall {
            self.records.pop_front();
        }
        self.records.extend(kept.iter().copied());

        self.total_added += batch.len();
        self.new_since_training += batch.len();
        Ok(shortfall + (batch.len() - kept.len()))
    }

    /// Parse and memorize raw 10-column rows.
    pub fn memorize_rows(&mut self, rows: &[Vec<i64>]) -> Result<usize, MemoryError> {
        let batch = rows
            .iter()
            .map(|row| MemoryRecord::from_row(row))
            .collect::<Result<Vec<_>, _>>()?;
        self.memorize(&batch)
    }

    /// True once more than `update_after` records arrived since the last pass.
    pub fn training_due(&self) -> bool {
        self.new_since_training > self.update_after
    }

    /// The records added since the last training pass, oldest first.
    /// Clamped to what is still held after eviction.
    pub fn recent(&self) -> impl Iterator<Item = &MemoryRecord> {
        let n = self.new_since_training.min(self.records.len());
        self.records.range(self.records.len() - n..)
    }

    pub fn mark_trained(&mut self) {
        self.new_since_training = 0;
    }

    pub fn iter(&self) -> impl Iterator<Item = &MemoryRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn free_capacity(&self) -> usize {
        self.capacity - self.records.len()
    }

    pub fn new_since_training(&self) -> usize {
        self.new_since_training
    }

    pub fn total_added(&self) -> usize {
        self.total_added
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Board, Side};

    /// Distinct records: the board holds one cross at `i % 9`, labeled by `i`.
    fn record(i: usize) -> MemoryRecord {
        let mut board = Board::new();
        board.play_move(i % 9, Side::Cross).unwrap();
        let outcome = GameOutcome::from_class_index(i % 3).unwrap();
        MemoryRecord::new(*board.state(), outcome)
    }

    fn records(range: std::ops::Range<usize>) -> Vec<MemoryRecord> {
        range.map(record).collect()
    }

    #[test]
    fn test_append_within_capacity() {
        let mut memory = Memory::new(10, 100);
        assert!(memory.is_empty());

        let evicted = memory.memorize(&records(0..4)).unwrap();
        assert_eq!(evicted, 0);
        assert_eq!(memory.len(), 4);
        assert_eq!(memory.free_capacity(), 6);
        assert_eq!(memory.new_since_training(), 4);
    }

    #[test]
    fn test_overflow_evicts_oldest() {
        let mut memory = Memory::new(5, 100);
        memory.memorize(&records(0..5)).unwrap();
        assert_eq!(memory.free_capacity(), 0);

        let evicted = memory.memorize(&records(5..8)).unwrap();
        assert_eq!(evicted, 3);
        assert_eq!(memory.len(), 5);
        assert_eq!(memory.free_capacity(), 0);

        let held: Vec<_> = memory.iter().copied().collect();
        assert_eq!(held, records(3..8));
    }

    #[test]
    fn test_partial_overflow() {
        let mut memory = Memory::new(5, 100);
        memory.memorize(&records(0..3)).unwrap();
        let evicted = memory.memorize(&records(3..7)).unwrap();
        assert_eq!(evicted, 2);

        let held: Vec<_> = memory.iter().copied().collect();
        assert_eq!(held, records(2..7));
    }

    #[test]
    fn test_batch_larger_than_capacity() {
        let mut memory = Memory::new(4, 100);
        memory.memorize(&records(0..2)).unwrap();
        memory.memorize(&records(2..12)).unwrap();

        let held: Vec<_> = memory.iter().copied().collect();
        assert_eq!(held, records(8..12));
        assert_eq!(memory.total_added(), 12);
    }

    #[test]
    fn test_len_is_min_of_capacity_and_total() {
        let mut memory = Memory::new(17, 1_000);
        let mut next = 0;
        for batch_len in [5, 9, 1, 7, 3, 9, 8, 2, 6] {
            memory.memorize(&records(next..next + batch_len)).unwrap();
            next += batch_len;

            assert!(memory.len() <= memory.capacity());
            assert_eq!(memory.len(), next.min(17));
            let held: Vec<_> = memory.iter().copied().collect();
            assert_eq!(held, records(next - memory.len()..next));
        }
    }

    #[test]
    fn test_training_due_after_threshold() {
        let mut memory = Memory::new(100, 10);
        memory.memorize(&records(0..6)).unwrap();
        assert!(!memory.training_due());
        memory.memorize(&records(6..10)).unwrap();
        assert!(!memory.training_due(), "exactly at threshold is not enough");
        memory.memorize(&records(10..13)).unwrap();
        assert!(memory.training_due());

        let recent: Vec<_> = memory.recent().copied().collect();
        assert_eq!(recent, records(0..13));

        memory.mark_trained();
        assert_eq!(memory.new_since_training(), 0);
        assert!(!memory.training_due());

        memory.memorize(&records(13..15)).unwrap();
        let recent: Vec<_> = memory.recent().copied().collect();
        assert_eq!(recent, records(13..15));
    }

    #[test]
    fn test_recent_is_clamped_to_held_records() {
        let mut memory = Memory::new(3, 1);
        memory.memorize(&records(0..5)).unwrap();
        assert_eq!(memory.recent().count(), 3);
    }

    #[test]
    fn test_unfinished_records_rejected() {
        let mut memory = Memory::new(10, 10);
        let bad = MemoryRecord::new(BoardState::empty(), GameOutcome::NotFinished);
        assert_eq!(
            memory.memorize(&[record(0), bad]),
            Err(MemoryError::UnfinishedRecord)
        );
        assert!(memory.is_empty());
    }

    #[test]
    fn test_from_row() {
        let row = [1, 0, 0, 0, 2, 0, 0, 0, 0, 2];
        let rec = MemoryRecord::from_row(&row).unwrap();
        assert_eq!(rec.state.get(0), Cell::Cross);
        assert_eq!(rec.state.get(4), Cell::Circle);
        assert_eq!(rec.outcome, GameOutcome::Draw);
        assert_eq!(rec.to_row(), Some(row));
    }

    #[test]
    fn test_malformed_rows_fail_fast() {
        let mut memory = Memory::new(10, 10);
        let rows = vec![vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 1], vec![0, 0, 0]];
        assert_eq!(
            memory.memorize_rows(&rows),
            Err(MemoryError::ShapeMismatch {
                expected: 10,
                got: 3
            })
        );
        assert!(memory.is_empty());

        assert_eq!(
            MemoryRecord::from_row(&[0, 0, 3, 0, 0, 0, 0, 0, 0, 1]),
            Err(MemoryError::InvalidCell {
                column: 2,
                value: 3
            })
        );
        assert_eq!(
            MemoryRecord::from_row(&[0, 0, 0, 0, 0, 0, 0, 0, 0, 9]),
            Err(MemoryError::InvalidOutcome { value: 9 })
        );
    }
}
