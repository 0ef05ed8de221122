use std::path::PathBuf;

use anyhow::anyhow;

use crate::mem_size::{memory_size, DEFAULT_MAX_MEMORY};
use crate::merge::{KWayMerge, SortedOutput};
use crate::partition::PartitionStore;
use crate::run_buffer::RunBuffer;

/// Bounded-memory sort for the data lines of one dump table.
///
/// Lines go in one at a time through [append](MergeSort::append) while the sort is
/// building. The first pull from [next_sorted](MergeSort::next_sorted) or
/// [drain](MergeSort::drain) switches the sort irreversibly to draining and yields
/// the lines in comparator order; appending afterwards is an error. Whenever the
/// buffered lines reach the configured memory ceiling they are sorted and spilled to
/// a self-deleting temporary file in the working directory, and the final order is
/// produced by merging all spilled partitions. Input that never reaches the ceiling
/// is sorted entirely in memory and no temporary file is created.
///
/// # Examples
/// ```
/// use pg_dump_sort::sort::MergeSort;
///
/// fn normalize(lines: Vec<String>) -> Result<Vec<String>, anyhow::Error> {
///     let mut merge_sort = MergeSort::new();
///     merge_sort.with_work_dir(std::env::temp_dir());
///     merge_sort.with_max_memory_size("64M")?;
///     for line in lines {
///         merge_sort.append(line)?;
///     }
///     merge_sort.drain().collect()
/// }
/// ```
pub struct MergeSort {
    max_memory: u64,
    buffer: RunBuffer,
    store: PartitionStore,
    output: Option<SortedOutput>,
}

impl MergeSort {
    /// Create a sort with the default configuration: partitions are spilled to the
    /// current directory once the buffered lines reach 100 MiB.
    pub fn new() -> MergeSort {
        MergeSort {
            max_memory: DEFAULT_MAX_MEMORY,
            buffer: RunBuffer::new(),
            store: PartitionStore::new(PathBuf::from(".")),
            output: None,
        }
    }

    /// Set the directory that receives spilled partitions. For large dumps pick a
    /// file system with enough free space, preferably a fast one.
    pub fn with_work_dir(&mut self, dir: impl Into<PathBuf>) {
        self.store.set_dir(dir.into());
    }

    /// Set the memory ceiling in bytes that triggers a spill.
    pub fn with_max_memory(&mut self, bytes: u64) {
        self.max_memory = bytes;
    }

    /// Set the memory ceiling from a human readable size such as `"100MB"` or
    /// `"1.5g"`. See [memory_size].
    pub fn with_max_memory_size(&mut self, size: &str) -> Result<(), anyhow::Error> {
        self.max_memory = memory_size(size)?;
        Ok(())
    }

    /// Append one line, spilling the buffer when the ceiling is reached. The line is
    /// kept verbatim, terminator included, and written back out unchanged.
    pub fn append(&mut self, line: impl Into<String>) -> Result<(), anyhow::Error> {
        if self.output.is_some() {
            return Err(anyhow!("can't append lines after starting to drain"));
        }
        self.buffer.push(line.into());
        if self.buffer.estimate() >= self.max_memory {
            self.flush()?;
        }
        Ok(())
    }

    /// Number of partitions spilled so far.
    pub fn partition_count(&self) -> usize {
        self.store.created()
    }

    /// Pull the next line in sorted order, `None` once the sort is exhausted. The
    /// first call ends the building phase.
    pub fn next_sorted(&mut self) -> Result<Option<String>, anyhow::Error> {
        if self.output.is_none() {
            self.output = Some(self.start_drain()?);
        }
        match self.output.as_mut() {
            Some(output) => output.next_line(),
            None => Ok(None),
        }
    }

    /// Iterate the sorted lines. Equivalent to pulling
    /// [next_sorted](MergeSort::next_sorted) until exhaustion.
    pub fn drain(&mut self) -> Drain<'_> {
        Drain { merge_sort: self }
    }

    fn flush(&mut self) -> Result<(), anyhow::Error> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let lines = self.buffer.drain_sorted();
        self.store.create(&lines)
    }

    fn start_drain(&mut self) -> Result<SortedOutput, anyhow::Error> {
        if self.store.is_empty() {
            // everything fit under the ceiling, skip the disk round trip
            log::debug!("Draining {} resident lines", self.buffer.len());
            Ok(SortedOutput::Resident(self.buffer.drain_sorted().into_iter()))
        } else {
            self.flush()?;
            let cursors = self.store.take_cursors()?;
            log::info!("Merging {} partitions", cursors.len());
            Ok(SortedOutput::Merged(KWayMerge::new(cursors)))
        }
    }
}

impl Default for MergeSort {
    fn default() -> Self {
        MergeSort::new()
    }
}

/// Iterator over the sorted lines of a [MergeSort], produced by
/// [drain](MergeSort::drain).
pub struct Drain<'a> {
    merge_sort: &'a mut MergeSort,
}

impl Iterator for Drain<'_> {
    type Item = Result<String, anyhow::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.merge_sort.next_sorted().transpose()
    }
}
