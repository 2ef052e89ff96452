//! This module defines the trait [ByteSized],
//! which should be implemented by types that can
//! calculate their own size.

/// Objects that are able to calculate their current approximate size in bytes.
///
/// We use `u64` rather than `usize` here to avoid overflows in case of overestimations.
/// The reported size must account for the full backing storage, including
/// spare capacity, so that an external memory manager can budget against it.
pub trait ByteSized {
    /// Return the number of bytes this object consumes
    fn size_bytes(&self) -> u64;
}

/// Computes the memory required for the content of a backing buffer using only
/// the direct size of the elements, without taking into account any data they
/// might point to.
pub(crate) fn size_inner_buffer_flat<T>(buffer: &[T]) -> u64 {
    buffer.len() as u64 * size_of::<T>() as u64
}

/// Computes the memory held by an optional heap string.
pub(crate) fn size_inner_string_flat(string: &Option<String>) -> u64 {
    string.as_ref().map_or(0, |value| value.capacity() as u64)
}
