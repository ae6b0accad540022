//! Grafter - compose grouped, directed graphs from an ordered list of operations.
//!
//! A pipeline folds a list of [`operations::Operation`] records over a pair of
//! graphs: the *base* graph (the universe most recently loaded by a source) and
//! the *result* graph (what is being built and narrowed). The crate provides
//! both a CLI application and a library for embedding the pipeline.

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod domain;
pub mod error;
pub mod graph;
pub mod operations;
pub mod persistence;
pub mod pipeline;
pub mod serialization;
pub mod sources;

// Public CLI module (needed by binary)
pub mod cli;

// Command implementations
pub mod commands;

// Application shell
pub mod app;
pub mod config;

// Output formatting for CLI commands
pub(crate) mod output;
