#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! A growable array that separates owning raw memory from owning the values placed in it.
//!
//! This crate provides [`PlacementVec<T>`], a contiguous dynamic array with amortized O(1)
//! append, random access and insertion/removal at arbitrary positions. It is built from two
//! cooperating layers:
//!
//! - [`RawMemory<T>`] owns an uninitialized heap buffer with room for a fixed number of values.
//!   It allocates and releases memory but never creates or drops a `T`.
//! - [`PlacementVec<T>`] owns one `RawMemory<T>` and a count of live values. It constructs
//!   values directly into the buffer, relocates them when the buffer grows and drops them
//!   when they are removed.
//!
//! # Key Features
//!
//! - **In-place construction**: [`emplace_back_with()`][PlacementVec::emplace_back_with] and
//!   [`emplace_with()`][PlacementVec::emplace_with] build the new value directly in its slot.
//! - **Panic safety**: if a constructor, `Default::default()` or `Clone::clone()` panics
//!   partway through an operation, every value already built by that operation is dropped and
//!   the container remains in its prior state. Nothing leaks and nothing is dropped twice.
//! - **Predictable growth**: appending to a full container doubles its capacity (starting
//!   from 1), while [`reserve()`][PlacementVec::reserve] grows to exactly the requested size.
//! - **Slice interoperability**: the container dereferences to `[T]`, so all slice methods
//!   and iterators are available.
//!
//! # Examples
//!
//! ```rust
//! use placement_vec::PlacementVec;
//!
//! let mut numbers = PlacementVec::new();
//!
//! numbers.push(10);
//! numbers.push(30);
//! numbers.insert(1, 20);
//!
//! assert_eq!(numbers, [10, 20, 30]);
//! assert_eq!(numbers.capacity(), 4);
//!
//! let next = numbers.erase(0);
//! assert_eq!(numbers[next], 20);
//! assert_eq!(numbers.len(), 2);
//! ```
//!
//! Values can be constructed in place, with the new value returned for immediate use:
//!
//! ```rust
//! use placement_vec::PlacementVec;
//!
//! let mut names = PlacementVec::<String>::with_capacity(2);
//!
//! let name = names.emplace_back_with(|| String::from("Ferris"));
//! name.push_str(" the crab");
//!
//! assert_eq!(names[0], "Ferris the crab");
//! ```
//!
//! # Observability
//!
//! Every buffer allocation and every relocation of values into a new buffer is recorded as
//! an [`nm`] event (`placement_vec_allocated_slots` and `placement_vec_relocated_elements`).
//! Collect them with `nm::Report::collect()`.

mod error;
mod into_iter;
mod metrics;
mod placement_vec;
mod raw_memory;

pub use error::Error;
pub(crate) use error::Result;
pub use into_iter::IntoIter;
pub use placement_vec::PlacementVec;
pub use raw_memory::RawMemory;
