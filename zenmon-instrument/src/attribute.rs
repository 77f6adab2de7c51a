//! The textual attribute read/write contract.
//!
//! Every attribute read renders as a decimal integer (or, for labels, a
//! plain string) followed by a single newline. Writes accept a base-10
//! unsigned integer with optional trailing whitespace. Both formats are
//! an external compatibility contract and are reproduced exactly.

use thiserror::Error;

use crate::channel::Channel;
use crate::store::ChannelStore;

/// Per-channel attribute kinds exposed to external consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// Current reading; the only writable attribute.
    Input,
    /// Fixed display name.
    Label,
    /// Lower informational bound.
    Min,
    /// Upper informational bound.
    Max,
}

impl Attribute {
    /// All attribute kinds, in registration order.
    pub const ALL: [Attribute; 4] = [
        Attribute::Input,
        Attribute::Label,
        Attribute::Min,
        Attribute::Max,
    ];

    /// Attribute name suffix ("input", "label", "min", "max").
    pub const fn suffix(self) -> &'static str {
        match self {
            Attribute::Input => "input",
            Attribute::Label => "label",
            Attribute::Min => "min",
            Attribute::Max => "max",
        }
    }

    /// Whether external writes to this attribute are accepted.
    pub const fn writable(self) -> bool {
        matches!(self, Attribute::Input)
    }
}

/// Externally visible name of a channel attribute, e.g. `in0_input`.
pub fn attr_name(channel: Channel, attribute: Attribute) -> String {
    format!("{}_{}", channel.attr_prefix(), attribute.suffix())
}

/// Inverse of [`attr_name`]. Returns `None` for names outside the
/// instrument's attribute set.
pub fn parse_attr_name(name: &str) -> Option<(Channel, Attribute)> {
    let (prefix, suffix) = name.split_once('_')?;
    let channel = Channel::ALL.into_iter().find(|c| c.attr_prefix() == prefix)?;
    let attribute = Attribute::ALL.into_iter().find(|a| a.suffix() == suffix)?;
    Some((channel, attribute))
}

/// Error rejecting an attribute write. The stored value is untouched.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The payload is not a base-10 unsigned integer.
    #[error("not a base-10 unsigned integer: {text:?}")]
    Parse { text: String },

    /// The payload is not valid UTF-8.
    #[error("write payload is not valid UTF-8")]
    Payload,
}

/// Render the textual reading of one attribute.
///
/// Never fails; every attribute of every channel has a value.
pub fn read(store: &ChannelStore, channel: Channel, attribute: Attribute) -> String {
    match attribute {
        Attribute::Input => format!("{}\n", store.current(channel)),
        Attribute::Label => format!("{}\n", channel.label()),
        Attribute::Min => format!("{}\n", store.min(channel)),
        Attribute::Max => format!("{}\n", store.max(channel)),
    }
}

/// Apply a textual write to a channel's current reading.
///
/// Parses `text` as a base-10 unsigned integer, tolerating trailing ASCII
/// whitespace (writers customarily send a trailing newline). On success
/// the parsed value is stored verbatim; the bounds are advisory and
/// never enforced. A rejected write leaves the stored value untouched.
pub fn write_input(store: &ChannelStore, channel: Channel, text: &str) -> Result<u64, WriteError> {
    let trimmed = text.trim_end_matches(|c: char| c.is_ascii_whitespace());
    let value: u64 = trimmed.parse().map_err(|_| WriteError::Parse {
        text: text.to_string(),
    })?;

    store.set_current(channel, value);
    Ok(value)
}

/// [`write_input`] over a raw wire payload.
pub fn write_input_bytes(
    store: &ChannelStore,
    channel: Channel,
    payload: &[u8],
) -> Result<u64, WriteError> {
    let text = std::str::from_utf8(payload).map_err(|_| WriteError::Payload)?;
    write_input(store, channel, text)
}

/// One registered attribute of the instrument: a fixed
/// (channel, attribute) pair with its external name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeBinding {
    pub channel: Channel,
    pub attribute: Attribute,
}

impl AttributeBinding {
    /// Externally visible attribute name, e.g. `temp1_min`.
    pub fn name(&self) -> String {
        attr_name(self.channel, self.attribute)
    }

    /// Whether external writes to this binding are accepted.
    pub const fn writable(&self) -> bool {
        self.attribute.writable()
    }
}

/// The full registration table: every (channel, attribute) pair exposed
/// by the instrument, in table order.
///
/// Built once and iterated by the host registration layer. Each
/// registered handle is pre-bound to its fixed pair, so no index is ever
/// taken from the wire.
pub fn bindings() -> Vec<AttributeBinding> {
    let mut table = Vec::with_capacity(Channel::COUNT * Attribute::ALL.len());
    for channel in Channel::ALL {
        for attribute in Attribute::ALL {
            table.push(AttributeBinding { channel, attribute });
        }
    }
    table
}
