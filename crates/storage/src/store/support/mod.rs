#![forbid(unsafe_code)]

mod json;
mod rows;
mod schema;
mod tags;
mod time;

pub(super) use json::*;
pub(super) use rows::*;
pub(super) use schema::install_schema;
pub(super) use tags::*;
pub(super) use time::now_ms;
