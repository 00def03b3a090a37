//! Price table assembly and derived columns

pub mod indicators;
pub mod rolling;
pub mod table;

pub use table::{Column, PriceTable};
