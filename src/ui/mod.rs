//! Line-oriented terminal surface on top of the conversation controller.

pub mod chat_loop;
pub mod transcript;
