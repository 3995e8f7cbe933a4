#![forbid(unsafe_code)]

mod definitions;
mod dispatch;
mod graph;
mod links;
mod node_types;
mod nodes;

pub(crate) use definitions::handler_definitions;
pub(crate) use dispatch::dispatch_handler;
