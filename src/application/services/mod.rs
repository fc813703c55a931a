//! Application services

pub mod convert;

pub use convert::{ConvertOptions, ConvertOutput, ConvertService};
