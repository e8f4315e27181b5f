//! Traffic Message Channel (RDS-TMC) decoding, per ISO 14819-1
//!
//! Only two group/version combinations carry TMC payloads: 3A holds
//! system messages (tuning and service parameters) and 8A holds user
//! messages (the actual traffic events). Every other group type is
//! silently ignored here.

use crate::block::{BlockGate, Blocks, ErrorLevel, GroupType, GroupVersion};

// Group 3A, block C.
const C_VARIANT: u16 = 0b1100000000000000;

// Variant 0 system message fields.
const C_V0_LTN: u16 = 0b0000111111000000;
const C_V0_AFI: u16 = 0b0000000000100000;
const C_V0_MGS_I: u16 = 0b0000000000001000;
const C_V0_MGS_N: u16 = 0b0000000000000100;
const C_V0_MGS_R: u16 = 0b0000000000000010;
const C_V0_MGS_U: u16 = 0b0000000000000001;

// Variant 1 system message fields.
const C_V1_GAP: u16 = 0b0011000000000000;
const C_V1_SID: u16 = 0b0000111111000000;
const C_V1_TA: u16 = 0b0000000000110000;
const C_V1_TW: u16 = 0b0000000000001100;
const C_V1_TD: u16 = 0b0000000000000011;

// Group 8A user message fields.
const B_TUNING: u16 = 0b0000000000010000;
const B_SINGLE_GROUP: u16 = 0b0000000000001000;
const B_DURATION: u16 = 0b0000000000000111;
const C_DIVERSION: u16 = 0b1000000000000000;
const C_DIRECTION: u16 = 0b0100000000000000;
const C_EXTENT: u16 = 0b0011100000000000;
const C_EVENT: u16 = 0b0000011111111111;

// The system message only consults block C; the user message reads
// all of B, C, and D.
const SYSTEM_GATE: BlockGate = BlockGate {
    b: None,
    c: Some(ErrorLevel::Medium),
    d: None,
};

const USER_GATE: BlockGate = BlockGate {
    b: Some(ErrorLevel::Medium),
    c: Some(ErrorLevel::Medium),
    d: Some(ErrorLevel::Medium),
};

/// Message Geographic Scope flags from a variant-0 system message
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct GeographicScope {
    pub international: bool,
    pub national: bool,
    pub regional: bool,
    pub urban: bool,
}

/// A TMC system message: tuning and service parameters
///
/// The two wire variants carry disjoint field sets, so they decode
/// to distinct enum variants rather than one sparsely-filled struct.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TmcSystemMessage {
    Variant0 {
        /// Location Table Number (ISO 14819-3)
        location_table: u8,

        /// Alternative Frequency Indicator
        alt_frequency: bool,

        scope: GeographicScope,
    },
    Variant1 {
        /// Gap parameter
        gap: u8,

        /// Service identifier
        service_id: u8,

        /// Activity time (mode 1 only)
        activity_time: u8,

        /// Window time (mode 1 only)
        window_time: u8,

        /// Delay time (mode 1 only)
        delay_time: u8,
    },
}

/// A single-group TMC user message: one traffic event
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TmcUserMessage {
    /// Tuning information follows (or reserved)
    pub tuning: bool,

    /// Single-group message; multi-group continuation otherwise
    pub single_group: bool,

    /// Duration and persistence code
    pub duration_persistence: u8,

    /// Drivers are advised to follow a diversion
    pub diversion: bool,

    /// Event applies in the positive direction of the road
    pub positive_direction: bool,

    /// How many location-table steps the event extends over
    pub extent: u8,

    /// Event code (ISO 14819-2 event list)
    pub event: u16,

    /// Location-table index; opaque without the location database
    pub location: u16,
}

/// A decoded TMC payload, system or user
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TmcMessage {
    System(TmcSystemMessage),
    User(TmcUserMessage),
}

/// The last fully-decoded system and user messages
///
/// Each half is replaced wholesale by a successful decode and is
/// never partially updated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TmcState {
    pub system: Option<TmcSystemMessage>,
    pub user: Option<TmcUserMessage>,
}

impl TmcState {
    /// Replace the matching half of the state
    pub(crate) fn store(&mut self, message: TmcMessage) {
        match message {
            TmcMessage::System(system) => self.system = Some(system),
            TmcMessage::User(user) => self.user = Some(user),
        }
    }

    /// Forget both messages; used on retune
    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Decode the TMC payload of one group, if it carries one
///
/// Returns `None` both for group types that never carry TMC data and
/// for groups rejected by the error gate; neither touches any state.
pub(crate) fn decode(group_type: GroupType, blocks: &Blocks) -> Option<TmcMessage> {
    match (group_type.code(), group_type.version()) {
        (3, GroupVersion::A) => decode_system(blocks).map(TmcMessage::System),
        (8, GroupVersion::A) => decode_user(blocks).map(TmcMessage::User),
        _ => None,
    }
}

fn decode_system(blocks: &Blocks) -> Option<TmcSystemMessage> {
    if !SYSTEM_GATE.admits(blocks) {
        return None;
    }

    let c = blocks.c.value;
    let message = if (c & C_VARIANT) >> 14 == 0 {
        TmcSystemMessage::Variant0 {
            location_table: ((c & C_V0_LTN) >> 6) as u8,
            alt_frequency: c & C_V0_AFI != 0,
            scope: GeographicScope {
                international: c & C_V0_MGS_I != 0,
                national: c & C_V0_MGS_N != 0,
                regional: c & C_V0_MGS_R != 0,
                urban: c & C_V0_MGS_U != 0,
            },
        }
    } else {
        TmcSystemMessage::Variant1 {
            gap: ((c & C_V1_GAP) >> 12) as u8,
            service_id: ((c & C_V1_SID) >> 6) as u8,
            activity_time: ((c & C_V1_TA) >> 4) as u8,
            window_time: ((c & C_V1_TW) >> 2) as u8,
            delay_time: (c & C_V1_TD) as u8,
        }
    };
    Some(message)
}

fn decode_user(blocks: &Blocks) -> Option<TmcUserMessage> {
    if !USER_GATE.admits(blocks) {
        return None;
    }

    let b = blocks.b.value;
    let c = blocks.c.value;
    Some(TmcUserMessage {
        tuning: b & B_TUNING != 0,
        single_group: b & B_SINGLE_GROUP != 0,
        duration_persistence: (b & B_DURATION) as u8,
        diversion: c & C_DIVERSION != 0,
        positive_direction: c & C_DIRECTION != 0,
        extent: ((c & C_EXTENT) >> 11) as u8,
        event: c & C_EVENT,
        location: blocks.d.value,
    })
}
