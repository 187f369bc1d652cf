pub mod action_reader;
pub mod cart_writer;
pub mod product_writer;
