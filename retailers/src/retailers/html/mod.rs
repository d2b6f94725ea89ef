pub mod macys;
