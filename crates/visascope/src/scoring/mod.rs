//! Destination-specific scoring engines.
//!
//! Every function in this tree is pure and synchronous: profiles and draw
//! histories come in by reference, scores and recommendations come out by
//! value. Nothing here performs I/O or keeps state between calls, so the
//! engines are safe to invoke on every keystroke or concurrently across
//! requests.

pub mod australia;
pub mod canada;
pub mod draws;
pub mod language;
pub mod portugal;
