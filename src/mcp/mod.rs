//! Model Context Protocol support

pub mod client;
