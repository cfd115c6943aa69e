pub mod app;
pub mod backend;
pub mod catalog;
pub mod completion;
pub mod config;
pub mod controller;
pub mod credentials;
pub mod keyring;
pub mod message;
pub mod notify;
pub mod preferences;
pub mod session;
pub mod session_store;
pub mod storage;
#[cfg(test)]
pub(crate) mod test_support;
