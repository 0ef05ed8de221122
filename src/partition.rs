use std::cmp::Ordering;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Seek, Write};
use std::mem;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::comparator::compare;

/// An immutable sorted run of lines spilled to an anonymous temporary file.
///
/// The backing file is unlinked as soon as it is created (delete-on-close where the
/// platform requires it), so the storage is released on every exit path, including a
/// sort that is abandoned halfway through.
#[derive(Debug)]
pub(crate) struct Partition {
    file: File,
}

impl Partition {
    /// Write `lines`, already in comparator order, as raw UTF-8 bytes.
    pub(crate) fn create(dir: &Path, lines: &[String]) -> Result<Partition, anyhow::Error> {
        let file = tempfile::tempfile_in(dir)
            .with_context(|| format!("create partition file in {}", dir.display()))?;
        let mut writer = BufWriter::new(file);
        for line in lines {
            writer.write_all(line.as_bytes())?;
        }
        let file = writer.into_inner().context("flush partition file")?;
        Ok(Partition { file })
    }

    /// Rewind to the start and wrap the partition into a forward-only merge cursor.
    pub(crate) fn into_cursor(mut self) -> Result<PartitionCursor, anyhow::Error> {
        self.file.rewind().context("rewind partition file")?;
        let mut reader = BufReader::new(self.file);
        let mut line = String::new();
        let bytes = reader.read_line(&mut line).context("read partition line")?;
        let head = if bytes > 0 { Some(line) } else { None };
        Ok(PartitionCursor { reader, head })
    }
}

/// The ordered set of partitions spilled during one sort job.
#[derive(Debug)]
pub(crate) struct PartitionStore {
    dir: PathBuf,
    partitions: Vec<Partition>,
    created: usize,
}

impl PartitionStore {
    pub(crate) fn new(dir: PathBuf) -> PartitionStore {
        PartitionStore {
            dir,
            partitions: Vec::new(),
            created: 0,
        }
    }

    pub(crate) fn set_dir(&mut self, dir: PathBuf) {
        self.dir = dir;
    }

    /// Spill one sorted run into a fresh partition.
    pub(crate) fn create(&mut self, lines: &[String]) -> Result<(), anyhow::Error> {
        let partition = Partition::create(&self.dir, lines)?;
        self.partitions.push(partition);
        self.created += 1;
        log::info!("Spilled partition {} with {} lines", self.created, lines.len());
        Ok(())
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }

    /// Number of partitions created over the lifetime of the sort.
    pub(crate) fn created(&self) -> usize {
        self.created
    }

    /// Rewind every partition and turn it into a merge cursor, in creation order.
    pub(crate) fn take_cursors(&mut self) -> Result<Vec<PartitionCursor>, anyhow::Error> {
        self.partitions.drain(..).map(Partition::into_cursor).collect()
    }
}

/// Read position within one partition plus the next line not yet handed to the merge.
#[derive(Debug)]
pub(crate) struct PartitionCursor {
    reader: BufReader<File>,
    head: Option<String>,
}

impl PartitionCursor {
    pub(crate) fn has_head(&self) -> bool {
        self.head.is_some()
    }

    /// Replace the head with the next line from the file and return the previous
    /// head. `None` means the partition was already exhausted.
    pub(crate) fn advance(&mut self) -> Result<Option<String>, anyhow::Error> {
        let mut line = String::new();
        let bytes = self.reader.read_line(&mut line).context("read partition line")?;
        let next = if bytes > 0 { Some(line) } else { None };
        Ok(mem::replace(&mut self.head, next))
    }
}

impl Eq for PartitionCursor {}

impl PartialEq<Self> for PartitionCursor {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl PartialOrd<Self> for PartitionCursor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PartitionCursor {
    fn cmp(&self, other: &Self) -> Ordering {
        match (&self.head, &other.head) {
            // exhausted cursors never enter the merge heap; these arms only keep
            // the ordering total
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(head1), Some(head2)) => compare(head1, head2),
        }
    }
}
