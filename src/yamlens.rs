//! Main module for yamlens library functionality

pub mod emit;
pub mod event;
pub mod format;
pub mod info;
pub mod node;
pub mod render;
pub mod resolve;
pub mod source;
pub mod stream;
pub mod token;
pub mod visit;
