// veche-client/src/tests/mod.rs
pub mod support;
