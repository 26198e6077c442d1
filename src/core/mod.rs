//! Module graph assembly, dependency extraction and verification

pub mod bootstrap;
pub mod extractor;
pub mod modules;
pub mod parallel;
pub mod traversal;

pub use bootstrap::{BootstrapMode, BootstrapScope};
pub use modules::Modules;
