//! Domain models for the admin panel.

pub mod operator;

pub use operator::Operator;
