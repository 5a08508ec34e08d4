//! Column projection: split one canonical list into contiguous side-by-side
//! runs, and map a (column, visual index) drop position back to a canonical
//! index.
//!
//! Column `j` covers canonical indices `[ceil(j*n/c), ceil((j+1)*n/c))`. For
//! two columns that puts `ceil(n/2)` elements on the left. Every skin and the
//! reorder controller go through these functions so the split point is
//! computed in exactly one place.

use std::ops::Range;

fn boundary(j: usize, n: usize, columns: usize) -> usize {
    (j * n).div_ceil(columns)
}

fn effective(columns: usize) -> usize {
    columns.max(1)
}

/// Canonical index range of every column, left to right.
pub fn column_bounds(n: usize, columns: usize) -> Vec<Range<usize>> {
    let columns = effective(columns);
    (0..columns)
        .map(|j| boundary(j, n, columns)..boundary(j + 1, n, columns))
        .collect()
}

/// Canonical range of a single column, `None` if the column does not exist.
pub fn column_range(column: usize, n: usize, columns: usize) -> Option<Range<usize>> {
    let columns = effective(columns);
    if column >= columns {
        return None;
    }
    Some(boundary(column, n, columns)..boundary(column + 1, n, columns))
}

/// Split `list` into `columns` contiguous slices.
pub fn project<T>(list: &[T], columns: usize) -> Vec<&[T]> {
    column_bounds(list.len(), columns)
        .into_iter()
        .map(|range| &list[range])
        .collect()
}

/// Where canonical index `k` shows up: `(column, visual index)`.
pub fn locate(k: usize, n: usize, columns: usize) -> Option<(usize, usize)> {
    if k >= n {
        return None;
    }
    column_bounds(n, columns)
        .into_iter()
        .enumerate()
        .find(|(_, range)| range.contains(&k))
        .map(|(column, range)| (column, k - range.start))
}

/// Inverse of [`locate`].
///
/// `visual` may equal the column's length: dropping at the end of a column
/// maps to the slot right after that column's last element, not to the end
/// of the whole list. Anything past that, or a column that doesn't exist,
/// is malformed and yields `None`.
pub fn to_canonical_index(column: usize, visual: usize, n: usize, columns: usize) -> Option<usize> {
    let range = column_range(column, n, columns)?;
    if visual > range.len() {
        return None;
    }
    Some(range.start + visual)
}

/// Turn an "insert before canonical `insert_before`" position into the
/// post-removal target index a move expects, given the element comes from
/// `from` in the same list.
pub fn insertion_to_move_target(from: usize, insert_before: usize) -> usize {
    if insert_before > from { insert_before - 1 } else { insert_before }
}
