//! # diam-cli
//!
//! Terminal front end of the Diam wallet session.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

#[macro_use]
pub mod shell;

pub mod cmd;
pub mod handler;
pub mod opts;
pub mod utils;
