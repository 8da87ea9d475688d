pub mod help;
pub mod pages;
pub mod pick;
pub mod ping;
pub mod swatch;
pub mod usage;
