#[cfg(feature = "full")]
#[macro_use]
extern crate diesel;
#[cfg(feature = "full")]
#[macro_use]
extern crate diesel_derive_newtype;

pub mod newtypes;
#[cfg(feature = "full")]
pub mod schema;
#[cfg(feature = "full")]
pub mod schema_setup;
pub mod source;
#[cfg(feature = "full")]
pub mod impls;
#[cfg(feature = "full")]
pub mod traits;
#[cfg(feature = "full")]
pub mod utils;
