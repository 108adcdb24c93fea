pub mod document;
pub mod uploads;
