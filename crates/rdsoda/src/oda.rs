//! Open Data Application dispatch and per-session ODA state
//!
//! ODAs are sub-protocols carried inside designated RDS group types
//! and identified by a 16-bit Application ID announced in 3A groups.
//! This module routes each ODA-bearing group to the decoder for its
//! application and owns the state those decoders write.

use std::fmt;

use strum::EnumMessage;

#[cfg(not(test))]
use log::trace;

#[cfg(test)]
use std::println as trace;

use crate::block::{Blocks, GroupType};
use crate::metadata::BroadcastMetadata;
use crate::rtplus::{self, TagTable};
use crate::tmc::{self, TmcState};

/// RadioText Plus Application ID
pub const AID_RT_PLUS: u16 = 0x4BD7;

/// Traffic Message Channel (ALERT-C) Application ID
pub const AID_TMC: u16 = 0xCD46;

/// iTunes tagging Application ID
pub const AID_ITUNES: u16 = 0xC3B0;

/// An Open Data Application this crate knows about
///
/// Converts from the wire Application ID and renders a short display
/// name:
///
/// ```
/// use rdsoda::Application;
///
/// let app = Application::from_app_id(0x4BD7).unwrap();
/// assert_eq!(Application::RadioTextPlus, app);
/// assert_eq!("RT+", app.as_display_str());
/// assert_eq!(None, Application::from_app_id(0x0000));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum_macros::EnumMessage)]
pub enum Application {
    /// RadioText Plus (RT+) tagging
    #[strum(detailed_message = "RT+")]
    RadioTextPlus,

    /// Traffic Message Channel, ISO 14819-1
    #[strum(detailed_message = "RDS-TMC")]
    TrafficMessageChannel,

    /// iTunes tagging (payload format not decoded)
    #[strum(detailed_message = "iTunes")]
    ITunesTagging,
}

impl Application {
    /// Look up a wire Application ID
    pub fn from_app_id(app_id: u16) -> Option<Self> {
        match app_id {
            AID_RT_PLUS => Some(Self::RadioTextPlus),
            AID_TMC => Some(Self::TrafficMessageChannel),
            AID_ITUNES => Some(Self::ITunesTagging),
            _ => None,
        }
    }

    /// The wire Application ID
    pub fn app_id(&self) -> u16 {
        match self {
            Self::RadioTextPlus => AID_RT_PLUS,
            Self::TrafficMessageChannel => AID_TMC,
            Self::ITunesTagging => AID_ITUNES,
        }
    }

    /// Human-readable application name
    pub fn as_display_str(&self) -> &'static str {
        self.get_detailed_message().expect("missing definition")
    }
}

impl fmt::Display for Application {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_display_str().fmt(f)
    }
}

/// Display name for any Application ID
///
/// Known applications render their name; everything else renders as
/// hex.
///
/// ```
/// use rdsoda::application_name;
///
/// assert_eq!("RDS-TMC", application_name(0xCD46));
/// assert_eq!("0x6552", application_name(0x6552));
/// ```
pub fn application_name(app_id: u16) -> String {
    match Application::from_app_id(app_id) {
        Some(app) => app.as_display_str().to_owned(),
        None => format!("0x{:X}", app_id),
    }
}

/// How many groups of each application have been processed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OdaCounters {
    pub rt_plus: u32,
    pub tmc: u32,
    pub itunes: u32,
}

/// All decoder-owned ODA state for one tuning session
///
/// Holds the RT+ tag table, the TMC message state, and the per-
/// application counters. Plain data with no interior locking: a host
/// that decodes in one context and reads from another must guard
/// this struct itself (single writes here replace whole slots or
/// structs, so struct-level exclusion is sufficient).
///
/// [`clear()`](Self::clear) must be called whenever the tuner
/// changes station, or stale tags and traffic messages will survive
/// the retune.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OdaState {
    tags: TagTable,
    tmc: TmcState,
    counters: OdaCounters,
}

impl OdaState {
    /// Fresh state with no decoded applications
    pub fn new() -> Self {
        Self::default()
    }

    /// Route one ODA-bearing group to its application's decoder
    ///
    /// `app_id` is the Application ID the synchronizer registered
    /// for this group's type (or read from block D of a 3A group).
    /// Unregistered ids are ignored. Gating against block errors is
    /// each application decoder's own responsibility, so a rejected
    /// group still counts toward its application's total.
    pub fn decode_group(
        &mut self,
        app_id: u16,
        rds: &BroadcastMetadata,
        blocks: &Blocks,
        group_type: GroupType,
    ) {
        match Application::from_app_id(app_id) {
            Some(Application::RadioTextPlus) => {
                self.counters.rt_plus += 1;
                rtplus::decode(&mut self.tags, rds, blocks);
            }
            Some(Application::TrafficMessageChannel) => {
                self.counters.tmc += 1;
                if let Some(message) = tmc::decode(group_type, blocks) {
                    self.tmc.store(message);
                }
            }
            Some(Application::ITunesTagging) => {
                // occurrence count only; the payload format is not decoded
                self.counters.itunes += 1;
            }
            None => {
                trace!("ignoring group {} for unknown ODA 0x{:04X}", group_type, app_id);
            }
        }
    }

    /// The RT+ tag table
    pub fn tags(&self) -> &TagTable {
        &self.tags
    }

    /// The last-decoded TMC messages
    pub fn tmc(&self) -> &TmcState {
        &self.tmc
    }

    /// Per-application group counts
    pub fn counters(&self) -> &OdaCounters {
        &self.counters
    }

    /// Reset everything; call on retune or power-cycle
    pub fn clear(&mut self) {
        self.tags.clear();
        self.tmc.clear();
        self.counters = OdaCounters::default();
    }
}
