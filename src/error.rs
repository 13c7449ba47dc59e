use thiserror::Error;

/// Errors returned by the fallible operations of a [`List`](crate::List).
///
/// Every operation validates its preconditions before touching a link, so
/// a returned error means the list was left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ListError {
    /// The index is outside the bound accepted by the operation.
    ///
    /// Positional inserts accept `0..=len`, while accesses, replacements and
    /// removals accept `0..len`.
    #[error("index {index} out of range for list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// The head or tail was requested from an empty list.
    #[error("collection is empty")]
    EmptyCollection,

    /// A destination buffer is too short to hold every element.
    #[error("buffer of capacity {capacity} cannot hold {required} elements")]
    InsufficientCapacity { required: usize, capacity: usize },

    /// A cursor was moved before the front or past the end of the list.
    #[error("cursor cannot move across the boundary of the list")]
    CursorBoundary,
}

#[cfg(test)]
mod tests {
    use super::ListError;

    #[test]
    fn error_messages() {
        assert_eq!(
            ListError::IndexOutOfRange { index: 4, len: 3 }.to_string(),
            "index 4 out of range for list of length 3"
        );
        assert_eq!(ListError::EmptyCollection.to_string(), "collection is empty");
        assert_eq!(
            ListError::InsufficientCapacity {
                required: 3,
                capacity: 1
            }
            .to_string(),
            "buffer of capacity 1 cannot hold 3 elements"
        );
        assert_eq!(
            ListError::CursorBoundary.to_string(),
            "cursor cannot move across the boundary of the list"
        );
    }
}
