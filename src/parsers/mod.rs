//! Loading of the externally produced class model

pub mod class_model;

pub use class_model::ClassModelLoader;
