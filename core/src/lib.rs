//! # rdpctl core
//!
//! The command-dispatch engine: the [`dispatcher`] drives the [`gate`] and
//! the target resolver, and wraps every capability call in a capture scope
//! from [`redirect`] bound to the caller's [`session`].

pub mod call;
pub mod dispatcher;
pub mod gate;
pub mod redirect;
pub mod session;

#[cfg(test)]
mod testing;
