//! Static build & network settings consumed by the external compiler tooling

pub mod settings;
