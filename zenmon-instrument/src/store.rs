//! Channel value storage for one instrument instance.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::channel::Channel;

/// One channel's record: the settable reading plus fixed informational
/// bounds.
#[derive(Debug)]
struct ChannelRecord {
    current: AtomicU64,
    min: u64,
    max: u64,
    critical: u64,
}

impl ChannelRecord {
    const fn new(current: u64, min: u64, max: u64, critical: u64) -> Self {
        Self {
            current: AtomicU64::new(current),
            min,
            max,
            critical,
        }
    }
}

/// Value storage for one instrument instance.
///
/// Holds exactly one record per [`Channel`], pre-populated with fixed
/// defaults. Only `current` is ever mutated after construction; it is an
/// atomic so concurrent single-field reads and writes never observe a
/// torn value. There is no cross-field atomicity: a reader combining
/// `current` with `min` in one logical row may interleave with a
/// concurrent write, which is fine since the bounds are immutable.
///
/// One store exists per instrument instance. The host layer must revoke
/// every registered attribute handle before dropping the store.
#[derive(Debug)]
pub struct ChannelStore {
    records: [ChannelRecord; Channel::COUNT],
}

impl ChannelStore {
    /// Create a store populated with the instrument's fixed defaults.
    pub fn new() -> Self {
        Self {
            records: [
                // voltage (mV), temperature (m°C), current (mA)
                ChannelRecord::new(5000, 1200, 24000, 24000),
                ChannelRecord::new(2000, 900, 2500, 2400),
                ChannelRecord::new(500, 10, 5000, 6000),
            ],
        }
    }

    fn record(&self, channel: Channel) -> &ChannelRecord {
        &self.records[channel.index()]
    }

    /// Current reading of a channel.
    pub fn current(&self, channel: Channel) -> u64 {
        self.record(channel).current.load(Ordering::Relaxed)
    }

    /// Overwrite the current reading of a channel.
    ///
    /// The value is stored verbatim. The configured bounds are advisory
    /// telemetry, never enforced; a value beyond `max` is accepted.
    pub fn set_current(&self, channel: Channel, value: u64) {
        self.record(channel).current.store(value, Ordering::Relaxed);
    }

    /// Lower informational bound of a channel.
    pub fn min(&self, channel: Channel) -> u64 {
        self.record(channel).min
    }

    /// Upper informational bound of a channel.
    pub fn max(&self, channel: Channel) -> u64 {
        self.record(channel).max
    }

    /// Critical informational bound of a channel.
    ///
    /// Stored and initialized, but not registered as an external
    /// attribute.
    pub fn critical(&self, channel: Channel) -> u64 {
        self.record(channel).critical
    }
}

impl Default for ChannelStore {
    fn default() -> Self {
        Self::new()
    }
}
