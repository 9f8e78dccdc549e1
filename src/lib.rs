#![deny(warnings)]

//! `mingit` is a minimal, single-user version-control engine.
//!
//! It keeps immutable snapshots of a flat working directory in a
//! content-addressed object store, tracks pending changes in a staging
//! area, and records history as a commit graph. Branches, checkout,
//! three-way merge, and push/fetch/pull between two stores on the same
//! filesystem are supported. Nothing here is concurrency-safe; one
//! process owns a repository at a time.
//!
//! Start with [`repo::Repository`], which ties the pieces together.

#[cfg(feature = "cli")]
pub mod cli;
mod graph;
mod merge;
pub mod object;
mod refs;
mod remote;
pub mod repo;
mod stage;
mod store;
mod worktree;
