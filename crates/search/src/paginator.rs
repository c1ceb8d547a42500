//! Result pagination
//!
//! Splits an ordered slice into fixed-size pages lazily; only the last page
//! may be shorter.

use sift_core::{Error, Result};
use std::iter::FusedIterator;
use std::slice::Chunks;

/// Lazy iterator over `page_size` pages of a slice
#[derive(Debug, Clone)]
pub struct Paginator<'a, T> {
    pages: Chunks<'a, T>,
}

impl<'a, T> Iterator for Paginator<'a, T> {
    type Item = &'a [T];

    fn next(&mut self) -> Option<Self::Item> {
        self.pages.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.pages.size_hint()
    }
}

impl<T> DoubleEndedIterator for Paginator<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.pages.next_back()
    }
}

impl<T> ExactSizeIterator for Paginator<'_, T> {}

impl<T> FusedIterator for Paginator<'_, T> {}

/// Split `items` into pages of `page_size`
///
/// # Errors
///
/// Returns `Error::InvalidArgument` if `page_size` is zero.
///
/// # Example
///
/// ```
/// use sift_search::paginate;
///
/// let pages: Vec<&[i32]> = paginate(&[1, 2, 3, 4, 5], 2).unwrap().collect();
/// assert_eq!(pages, vec![&[1, 2][..], &[3, 4][..], &[5][..]]);
/// ```
pub fn paginate<T>(items: &[T], page_size: usize) -> Result<Paginator<'_, T>> {
    if page_size == 0 {
        return Err(Error::invalid_argument("page size must be at least 1"));
    }
    Ok(Paginator {
        pages: items.chunks(page_size),
    })
}
