//! 1-indexed offset pagination.

/// Zero-based offset of the first item on `page`; `None` for page 0 or overflow.
pub fn page_offset(page: usize, page_size: usize) -> Option<usize> {
    page.checked_sub(1)?.checked_mul(page_size)
}

/// The slice `items[(page-1)*page_size .. page*page_size]`.
///
/// Page 0, a page size of 0, and pages past the end return an empty slice; a
/// stale page after the page size changed is an ordinary UI transition, not an
/// error.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page_size == 0 {
        return &[];
    }
    let Some(start) = page_offset(page, page_size) else {
        return &[];
    };
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Number of pages needed for `total` items; 0 when `page_size` is 0.
pub fn total_pages(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}
