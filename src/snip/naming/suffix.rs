use std::fs;
use std::path::Path;
use tracing::debug;

/// Splits `base-123` into (`base`, 123).
///
/// Returns `None` when the name has no dash-digits tail, or when the digits do
/// not fit a `u64` (such a tail is treated as part of the base name).
pub fn split_numeric_suffix(name: &str) -> Option<(&str, u64)> {
    let (base, digits) = name.rsplit_once('-')?;
    if base.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u64>().ok().map(|n| (base, n))
}

/// Computes the next free numeric suffix for `base_name` under `store_root`.
///
/// Looks at entries named `<leaf>-<digits>` in the directory `base_name` points
/// into and returns the highest suffix plus one, or 1 when there are none.
/// Gaps are never filled: `-1`, `-2`, `-5` gives 6. Non-numeric tails such as
/// `git-foo` are ignored, as are suffixes too large to count past.
pub fn next_suffix(store_root: &Path, base_name: &str) -> u64 {
    let (dir, leaf) = match base_name.rsplit_once('/') {
        Some((dir, leaf)) => (store_root.join(dir), leaf),
        None => (store_root.to_path_buf(), base_name),
    };

    let entries = match fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(_) => return 1,
    };

    let prefix = format!("{}-", leaf);
    let max = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter_map(|file_name| {
            let digits = file_name.strip_prefix(&prefix)?;
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            digits.parse::<u64>().ok()
        })
        .filter(|n| *n < u64::MAX)
        .max();

    let next = max.map_or(1, |n| n + 1);
    debug!(dir = %dir.display(), leaf, next, "computed next suffix");
    next
}

/// Derives the name for a copy of `existing_name`.
///
/// `docker-1` becomes `docker-<next>`, `node-shell` becomes `node-shell-<next>`
/// (so `node-shell-1` on first copy). Any directory prefix is kept.
pub fn duplicate_name(store_root: &Path, existing_name: &str) -> String {
    let (dir, leaf) = match existing_name.rsplit_once('/') {
        Some((dir, leaf)) => (Some(dir), leaf),
        None => (None, existing_name),
    };

    let base = split_numeric_suffix(leaf).map_or(leaf, |(base, _)| base);
    let base_name = match dir {
        Some(dir) => format!("{}/{}", dir, base),
        None => base.to_string(),
    };

    let suffix = next_suffix(store_root, &base_name);
    format!("{}-{}", base_name, suffix)
}
