#![warn(clippy::pedantic)]
pub mod element;
pub mod errors;
pub mod literal;
pub mod mutate;
pub mod nodes;
pub mod query;
pub mod sort;
pub mod tree;
