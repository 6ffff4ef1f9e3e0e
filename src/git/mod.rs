pub mod repo;

pub use repo::{DiffstatSource, GitRepo};
