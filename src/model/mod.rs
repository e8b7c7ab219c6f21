pub mod catalog;
pub mod config;
pub mod download;
pub mod drop_zone;
pub mod status;
pub mod submit;

#[cfg(test)]
pub(crate) mod fakes;
