//! Zenoh bridge exposing a virtual PMIC measurement instrument.
//!
//! The bridge attaches one synthetic three-channel instrument (supply
//! voltage, chip temperature, chip current) to a Zenoh session and
//! registers its attribute set:
//!
//! ```text
//! zenmon/vpmic/<instrument>/in0_input      (read/write, mV)
//! zenmon/vpmic/<instrument>/in0_label
//! zenmon/vpmic/<instrument>/in0_min
//! zenmon/vpmic/<instrument>/in0_max
//! zenmon/vpmic/<instrument>/temp1_*       (m°C)
//! zenmon/vpmic/<instrument>/curr1_*       (mA)
//! zenmon/vpmic/<instrument>/@/status
//! ```
//!
//! Reads are served by queryables replying the textual rendering
//! (decimal or label, newline-terminated); writes arrive as puts of a
//! decimal string on the `_input` keys.

pub mod config;
pub mod host;
pub mod status;
