//! List trimming helpers used to align fetched pages with the window

/// Drop the last `n` items.
///
/// Returns the input untouched for `n == 0` and an empty list when `n` is at
/// least the length.
pub fn drop_last_n<T>(mut items: Vec<T>, n: usize) -> Vec<T> {
    if n == 0 {
        return items;
    }
    let keep = items.len().saturating_sub(n);
    items.truncate(keep);
    items
}

/// Drop the first `n` items, keeping the rest in order.
pub fn drop_first_n<T>(mut items: Vec<T>, n: usize) -> Vec<T> {
    if n == 0 {
        return items;
    }
    if n >= items.len() {
        items.clear();
        return items;
    }
    items.drain(..n);
    items
}
