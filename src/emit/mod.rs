//! Interface emission: documentation formatting, the interface body
//! assembly, and the templated registration-bindings file.

pub mod interface;
pub mod registrations;
pub mod summary;

pub use interface::{nested_class_name, InterfaceEmitter};
pub use registrations::create_register;
pub use summary::{format_summary, SummaryTarget};
