//! Test suite for the Arbor AST kernel.

#[cfg(test)]
mod ast;
