//! HTTP route handlers

pub mod duplicates;
pub mod grading;
pub mod similarity;
