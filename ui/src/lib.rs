#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod state;
pub mod widgets;

#[cfg(test)]
mod test_utils;

pub use app::RolodexApp;
