//! End-to-end operations built from the fetch, extract, normalize and image stages.
//!
//! Every stage failure ends the operation; nothing is retried.

pub mod image;
pub mod url;
