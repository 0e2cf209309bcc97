pub mod build;
pub mod interpolate;
pub(crate) mod tracker;
