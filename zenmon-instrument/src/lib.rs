//! Zenmon virtual instrument core.
//!
//! Models a synthetic multi-channel measurement instrument with three
//! fixed channels (supply voltage, chip temperature, chip current),
//! each carrying a settable current reading plus fixed informational
//! bounds:
//!
//! - [`channel`] - The closed channel enumeration, labels and naming
//! - [`store`] - Per-instance value storage with atomic readings
//! - [`attribute`] - The textual attribute read/write contract and the
//!   registration table
//!
//! The crate is transport-agnostic; the bridge layer registers the
//! attribute bindings with Zenoh.

pub mod attribute;
pub mod channel;
pub mod store;

// Re-export commonly used types at the crate root
pub use attribute::{
    Attribute, AttributeBinding, WriteError, attr_name, bindings, parse_attr_name, read,
    write_input, write_input_bytes,
};
pub use channel::Channel;
pub use store::ChannelStore;
