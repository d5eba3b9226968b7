use std::alloc::Layout;

use thiserror::Error;

/// Errors reported by the fallible (`try_*`) allocation methods.
///
/// The infallible methods do not return these. They panic on capacity overflow and
/// report allocator failure via [`std::alloc::handle_alloc_error()`], the same as the
/// standard library collections.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// The requested number of slots does not fit in the address space, either because
    /// the slot count itself overflowed or because the total size in bytes would exceed
    /// `isize::MAX`.
    #[error("capacity overflow: cannot allocate room for {requested} items")]
    CapacityOverflow {
        /// The number of slots that was requested.
        requested: usize,
    },

    /// The memory allocator returned an error when asked for memory.
    #[error("memory allocation of {} bytes (align {}) failed", .layout.size(), .layout.align())]
    AllocationFailed {
        /// The layout of the allocation that failed.
        layout: Layout,
    },
}

/// A specialized `Result` type for `placement_vec` operations, returning the crate's
/// [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;
