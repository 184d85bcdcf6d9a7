//! Row structs for the draft tables.
//!
//! Each row maps 1:1 onto a table and converts into the domain type from
//! `seodraft_core`.

pub mod draft;
