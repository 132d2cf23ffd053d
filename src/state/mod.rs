//! Client-side state modules.
//!
//! State is split by domain (`slideshow`, `conversation`) so each piece is a
//! plain data model, testable independently of the socket and the REPL.

pub mod conversation;
pub mod slideshow;
