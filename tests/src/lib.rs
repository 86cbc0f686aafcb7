//! Operator scenarios exercised across the common and core crates.

#[cfg(test)]
mod support;

#[cfg(test)]
mod dispatch;
