use std::collections::HashSet;
use std::hash::Hash;

/// Format a byte count as kibibytes with one decimal, e.g. `80.0 KB`
pub fn fmt_bytes(bytes: u64) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}

/// Drop repeated items, keeping the first occurrence of each
pub fn dedup_preserving_order<T: Eq + Hash + Clone>(items: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// First `max_lines` lines of a block of text
pub fn head_lines(text: &str, max_lines: usize) -> String {
    text.lines().take(max_lines).collect::<Vec<_>>().join("\n")
}
