//! This crate provides a gitlet store that keeps its content on the local
//! file system, in a `.gitlet` directory at the top of the working tree.

pub mod config;
pub use config::Config;

mod on_disk_repo;
pub use on_disk_repo::OnDiskRepo;

mod temp_repo;
pub use temp_repo::TempRepo;
