pub mod editing;
pub mod idle;
pub mod seek;
pub mod sharing;
