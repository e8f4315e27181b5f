//! # rdsoda: RDS/RBDS semantic decoding
//!
//! This crate turns validated [Radio Data System](https://en.wikipedia.org/wiki/Radio_Data_System)
//! groups into structured broadcast metadata: Open Data Application
//! dispatch with [RadioText Plus](https://en.wikipedia.org/wiki/Radio_Data_System#RT+)
//! tag extraction and [Traffic Message Channel](https://en.wikipedia.org/wiki/Traffic_message_channel)
//! decoding, Program Identification call-sign recovery for US/RBDS
//! stations, clock-group local-time formatting, and the display-name
//! tables that go with them.
//!
//! It sits *above* the tuner: something else — a radio chip driver,
//! an SDR pipeline, or the bundled RDS Spy log reader — must
//! synchronize the bitstream into groups of four 16-bit blocks,
//! classify each block's error confidence, and maintain the
//! [`BroadcastMetadata`] record (PI code, RadioText, clock). This
//! crate never performs I/O on the receive path.
//!
//! ## Example
//!
//! ```
//! use rdsoda::{
//!     Block, Blocks, BroadcastMetadata, DisplayText, ErrorLevel, GroupType, GroupVersion,
//!     OdaState, AID_RT_PLUS,
//! };
//!
//! // state owned by the caller, one per tuning session
//! let mut oda = OdaState::new();
//!
//! // the group synchronizer maintains the metadata record...
//! let mut rds = BroadcastMetadata::default();
//! rds.radio_text.variant_a = DisplayText::from("Daydreaming - Radiohead");
//!
//! // ...and hands over each ODA-bearing group with its application id.
//! // This RT+ group tags "Daydreaming" as the title (content type 1).
//! let group = Blocks {
//!     a: Block::new(0xF202, ErrorLevel::None),
//!     b: Block::new(0x0000, ErrorLevel::None),
//!     c: Block::new(0x2014, ErrorLevel::None),
//!     d: Block::new(0x0000, ErrorLevel::None),
//! };
//! let group_type = GroupType::new(8, GroupVersion::A).unwrap();
//!
//! oda.decode_group(AID_RT_PLUS, &rds, &group, group_type);
//!
//! let title = oda.tags().get(1).unwrap();
//! assert_eq!("Daydreaming", title.text());
//! assert_eq!(1, oda.counters().rt_plus);
//!
//! // on retune, everything decoded from the old station is dropped
//! oda.clear();
//! ```
//!
//! ## Error handling
//!
//! Poor reception is routine, not exceptional. Each decoder gates
//! the blocks it reads against their error levels and silently
//! drops groups that are too damaged; decoders never leave partial
//! state behind. Lookups with no defined answer — a PI code outside
//! every known mapping, a PTY name for an unimplemented region —
//! return `None` rather than a fabricated value. Only the offline
//! [log reader](read_spy_log) can fail hard, and only on I/O errors
//! or a log with nothing in it.

mod block;
mod clocktime;
mod metadata;
mod names;
mod oda;
mod picode;
mod rtplus;
mod spylog;
mod tmc;

pub use block::{Block, Blocks, ErrorLevel, GroupType, GroupVersion};
pub use clocktime::format_local_time;
pub use metadata::{
    BroadcastMetadata, ClockTime, DisplayText, FieldPresence, RadioText, TextVariant,
};
pub use names::{manufacturer_name, pty_name, Device};
pub use oda::{
    application_name, Application, OdaCounters, OdaState, AID_ITUNES, AID_RT_PLUS, AID_TMC,
};
pub use picode::{decode_pi_code, Region};
pub use rtplus::{content_type_name, TagSlot, TagTable};
pub use spylog::{parse_group_line, read_spy_lines, read_spy_log, SpyLogError};
pub use tmc::{
    GeographicScope, TmcMessage, TmcState, TmcSystemMessage, TmcUserMessage,
};
