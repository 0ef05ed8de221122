use anyhow::{anyhow, Context};
use regex::Regex;

pub(crate) const KIBIBYTE: u64 = 1 << 10;
pub(crate) const MEBIBYTE: u64 = 1 << 20;
pub(crate) const GIBIBYTE: u64 = 1 << 30;

/// Memory ceiling used when none is configured: 100 MiB.
pub const DEFAULT_MAX_MEMORY: u64 = 100 * MEBIBYTE;

/// Parse a human readable memory size into bytes.
///
/// Accepts a decimal number with an optional `k`, `m` or `g` unit, optionally
/// followed by `b` or `ib`, all case insensitive: `50_000`, `100kb`, `1.5M`, `20GB`,
/// `2Gib`. Units are binary, so `1k` is 1024 bytes. Anything else, including a
/// recognizable size followed by garbage, is an error.
///
/// # Examples
/// ```
/// use pg_dump_sort::mem_size::memory_size;
///
/// assert_eq!(memory_size("1.5M").unwrap(), 1_572_864);
/// assert!(memory_size("1.5T").is_err());
/// ```
pub fn memory_size(size: &str) -> Result<u64, anyhow::Error> {
    let pattern = Regex::new(r"^([0-9._]+)\s*([kmg]?)(i?b)?$").unwrap();
    let normalized = size.trim().to_lowercase();
    let captures = pattern
        .captures(&normalized)
        .ok_or_else(|| anyhow!("invalid memory size: {}", size))?;
    let number: f64 = captures[1]
        .replace('_', "")
        .parse()
        .with_context(|| format!("invalid memory size: {}", size))?;
    let unit = match &captures[2] {
        "k" => KIBIBYTE,
        "m" => MEBIBYTE,
        "g" => GIBIBYTE,
        _ => 1,
    };
    Ok((number * unit as f64) as u64)
}
