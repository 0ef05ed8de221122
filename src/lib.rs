//! This crate sorts the data lines of a PostgreSQL dump into a deterministic,
//! diff-friendly order while keeping peak memory usage under a configurable ceiling.
//!
//! [pg_dump](https://www.postgresql.org/docs/current/app-pgdump.html) writes table
//! rows in whatever order the server returns them, so two dumps of logically
//! identical databases rarely compare byte equal, and keeping dumps in version
//! control produces noisy diffs. The resource-bounded core of a dump normalizer
//! lives here: an external merge sort that accepts one `COPY` data line at a time,
//! spills sorted partitions to self-deleting temporary files when the memory ceiling
//! is reached, and yields the lines back in a total order defined by a field-aware
//! comparator - tab separated fields are compared as signed decimal numbers whenever
//! they look numeric, and as plain text otherwise.
//!
//! Recognizing `COPY` blocks in the dump, splitting it into per-table files and
//! committing the result is the caller's business; this crate only sees the record
//! lines of one bulk-data block at a time and hands them back sorted, terminators
//! included.
//!
//! # Examples
//! ```
//! use pg_dump_sort::sort::MergeSort;
//!
//! // sort the lines of one COPY block, spilling to /var/tmp past 256 MiB
//! fn sort_data_block(lines: Vec<String>) -> Result<Vec<String>, anyhow::Error> {
//!     let mut merge_sort = MergeSort::new();
//!     merge_sort.with_work_dir("/var/tmp");
//!     merge_sort.with_max_memory_size("256M")?;
//!     for line in lines {
//!         merge_sort.append(line)?;
//!     }
//!     merge_sort.drain().collect()
//! }
//! ```

pub(crate) mod merge;
pub(crate) mod partition;
pub(crate) mod run_buffer;

pub mod comparator;
pub mod mem_size;
pub mod sort;
