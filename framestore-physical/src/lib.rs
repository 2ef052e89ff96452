//! This crate defines the physical column-storage layer of framestore:
//! growable, fixed-primitive-type buffers that back individual columns of
//! a heterogeneous-schema frame, together with per-column metadata and a
//! tag-dispatched binary serialization format. Higher layers (the frame
//! object, schema inference, execution) build on top of these structures
//! and are not part of this crate.

#![deny(
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts
)]
#![warn(
    missing_docs,
    unused_import_braces,
    unused_qualifications,
    unused_extern_crates,
    variant_size_differences
)]

pub mod columnar;
pub mod datatypes;
pub mod error;
pub mod management;
