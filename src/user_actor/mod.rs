//! Account directory.

pub mod entity;
