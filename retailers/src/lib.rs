pub mod errors;
mod retailers;
pub mod structures;
pub(crate) mod utils;

pub use retailers::html;
