use std::ops::Range;

/// Splits `height` rows into at most `workers` contiguous row ranges.
///
/// Every range gets `height / workers` rows and the last one absorbs the
/// remainder. With fewer rows than workers each row becomes its own range.
/// The ranges are disjoint, ordered and cover `0..height` exactly.
pub fn partition(height: usize, workers: usize) -> Vec<Range<usize>> {
    if height == 0 {
        return Vec::new();
    }
    let mut workers = workers.max(1);
    let mut rows_per_strip = height / workers;
    if rows_per_strip < 1 {
        rows_per_strip = 1;
        workers = height;
    }

    (0..workers)
        .map(|i| {
            let start = i * rows_per_strip;
            let end = if i == workers - 1 { height } else { start + rows_per_strip };
            start..end
        })
        .collect()
}

/// Cuts a row-major buffer into one mutable slice per row range.
pub fn split_rows_mut<'a, T>(mut data: &'a mut [T], row_len: usize, strips: &[Range<usize>]) -> Vec<&'a mut [T]> {
    let mut result = Vec::with_capacity(strips.len());
    for strip in strips {
        let (head, tail) = std::mem::take(&mut data).split_at_mut(strip.len() * row_len);
        result.push(head);
        data = tail;
    }
    result
}
