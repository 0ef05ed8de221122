use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::partition::PartitionCursor;

/// K-way merge across partition cursors, keyed by the record comparator.
///
/// `BinaryHeap` is a max heap, so cursors go in wrapped in `Reverse` and every pop
/// yields the cursor holding the smallest head.
#[derive(Debug)]
pub(crate) struct KWayMerge {
    heap: BinaryHeap<Reverse<PartitionCursor>>,
}

impl KWayMerge {
    pub(crate) fn new(cursors: Vec<PartitionCursor>) -> KWayMerge {
        let heap = cursors
            .into_iter()
            .filter(PartitionCursor::has_head)
            .map(Reverse)
            .collect();
        KWayMerge { heap }
    }

    /// Pull the next line in merged order, `None` once every cursor is exhausted.
    pub(crate) fn next_line(&mut self) -> Result<Option<String>, anyhow::Error> {
        let mut cursor = match self.heap.pop() {
            Some(Reverse(cursor)) => cursor,
            None => return Ok(None),
        };
        let line = cursor.advance()?;
        if cursor.has_head() {
            self.heap.push(Reverse(cursor));
        }
        Ok(line)
    }
}

/// The two drain sources: a resident buffer that never spilled, or the k-way merge
/// across spilled partitions.
#[derive(Debug)]
pub(crate) enum SortedOutput {
    Resident(std::vec::IntoIter<String>),
    Merged(KWayMerge),
}

impl SortedOutput {
    pub(crate) fn next_line(&mut self) -> Result<Option<String>, anyhow::Error> {
        match self {
            SortedOutput::Resident(lines) => Ok(lines.next()),
            SortedOutput::Merged(merge) => merge.next_line(),
        }
    }
}
