//! # Domain Models
//!
//! Pure data types describing the slicing toolchain configuration: where the
//! slicer and plater binaries live, which print server to talk to, and the named
//! profile sets handed to the slicer.
//! Keep it lean: no I/O, no validation, just data and read accessors.

pub mod config;
