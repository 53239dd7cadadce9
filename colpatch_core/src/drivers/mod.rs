#[cfg(feature = "rusqlite")]
pub mod rusqlite;

#[cfg(feature = "config")]
mod config;
