pub mod data;
pub mod io;
pub mod printing;

pub use data::{Config, CredentialStorage};
pub use io::ConfigError;

#[cfg(test)]
mod tests;
