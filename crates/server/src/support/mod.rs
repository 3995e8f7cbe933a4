#![forbid(unsafe_code)]

mod args;
mod envelope;
mod jsonrpc;

pub(crate) use args::*;
pub(crate) use envelope::*;
pub(crate) use jsonrpc::*;
