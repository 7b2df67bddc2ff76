//! Binary format parsers.

pub mod dwarf;
