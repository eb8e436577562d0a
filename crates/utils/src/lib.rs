pub mod error;
#[cfg(feature = "full")]
pub mod settings;
