//! Small shared rendering helpers.

pub mod pagination;
