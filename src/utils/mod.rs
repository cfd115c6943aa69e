pub mod ids;
pub mod input;
pub mod time;
pub mod url;
