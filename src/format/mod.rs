//! File format parsers.

pub mod tiff;
