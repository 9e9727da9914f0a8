//! Infrastructure configuration modules.

pub mod cache;
pub mod feed;
pub mod logging;
pub mod settings;

pub use settings::Config;
