//! Random relation generator for tests, benchmarks and the `generate` command.

pub mod generator;
