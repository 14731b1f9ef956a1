//! This crate implements the core data model and state machine for a gitlet
//! repository: content-addressed blobs and commits, per-branch staging
//! areas, and three-way merging.
//!
//! Storage is abstracted behind the [`repo::Repo`] trait. A [`Repository`]
//! loads its state from a `Repo` once, runs commands against it, and saves
//! what changed.

pub mod branch;
pub mod graph;
pub mod merge;
pub mod object;
pub mod path;
pub mod repo;
pub mod repository;
pub mod staging;

pub use repository::Repository;
