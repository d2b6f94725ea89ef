pub mod constants;
pub mod result;
