pub mod dashboard;
pub mod font;
