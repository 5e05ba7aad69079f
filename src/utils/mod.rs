pub mod csv;
pub mod patch;
