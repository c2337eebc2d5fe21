use std::cmp::Ordering;

/// Reads a sign-style comparison result. Only `-1`, `0`, and `1` are meaningful; everything else
/// is `None`, which [`OrderedTree::insert`][crate::OrderedTree::insert] rejects.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use ordered_tree::three_way;
///
/// assert_eq!(three_way(-1), Some(Ordering::Less));
/// assert_eq!(three_way(0), Some(Ordering::Equal));
/// assert_eq!(three_way(7), None);
/// ```
pub fn three_way(n: i64) -> Option<Ordering> {
    match n {
        -1 => Some(Ordering::Less),
        0 => Some(Ordering::Equal),
        1 => Some(Ordering::Greater),
        _ => None,
    }
}

/// Renders a record path the way errors report it, e.g. `r, l, m`.
pub(crate) fn format_path(path: &[&str]) -> String {
    path.join(", ")
}
