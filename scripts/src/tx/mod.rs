//! Network side of the scripts: the signing client and the contract bindings

pub mod abi;
pub mod client;
