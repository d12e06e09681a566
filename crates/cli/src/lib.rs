// Bingo CLI library - exposes the run pipeline for integration tests

pub mod generate;
