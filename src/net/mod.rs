//! Wire protocol model and the long-lived assistant connection.

pub mod frame;
pub mod session;
