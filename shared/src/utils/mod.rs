//! Utility functions

pub mod email;
