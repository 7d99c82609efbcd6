//! Small shared helpers.

pub mod timeout;
