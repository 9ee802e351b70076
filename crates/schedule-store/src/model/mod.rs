pub mod classroom;
pub mod entry;
