//! Replay of logged groups through the decoders
//!
//! A live tuner driver synchronizes the bitstream, learns which
//! group types carry which Open Data Application, and assembles
//! RadioText as segments arrive. Replaying a log needs the same
//! bookkeeping in miniature: this module derives group types from
//! block B, registers applications announced in 3A groups, fills
//! the RadioText buffers from 2A groups, and routes ODA-bearing
//! groups to the dispatcher.

use log::{debug, info};

use rdsoda::{
    application_name, content_type_name, decode_pi_code, format_local_time, pty_name, Blocks,
    BroadcastMetadata, ErrorLevel, FieldPresence, GroupType, GroupVersion, OdaState, Region,
    TextVariant, TmcSystemMessage, AID_TMC,
};

// Replay trusts blocks with up to medium (3-5 bit) correction, like
// the decoders themselves.
const MAX_ERRORS: ErrorLevel = ErrorLevel::Medium;

/// One tuning session reconstructed from a log
pub struct Replay {
    rds: BroadcastMetadata,
    oda: OdaState,

    // application id registered per group type (code and version)
    registrations: [Option<u16>; 32],

    // received group count per group type
    group_counts: [u32; 32],

    groups_in: u32,
}

impl Replay {
    pub fn new() -> Self {
        Self {
            rds: BroadcastMetadata::default(),
            oda: OdaState::new(),
            registrations: [None; 32],
            group_counts: [0; 32],
            groups_in: 0,
        }
    }

    /// Feed one logged group through the session
    pub fn process(&mut self, blocks: &Blocks) {
        self.groups_in += 1;

        // without block B there is no group type and nothing to route
        if blocks.b.errors > MAX_ERRORS {
            return;
        }
        let group_type = GroupType::from_block_b(blocks.b.value);
        self.group_counts[slot(group_type)] += 1;

        if blocks.a.errors == ErrorLevel::None {
            self.rds.pi_code = blocks.a.value;
            self.rds.presence.mark(FieldPresence::PI_CODE);
        }
        self.rds.pty = ((blocks.b.value & 0x03E0) >> 5) as u8;
        self.rds.presence.mark(FieldPresence::PTY);

        match (group_type.code(), group_type.version()) {
            (2, GroupVersion::A) => self.assemble_radio_text(blocks),
            (3, GroupVersion::A) => self.register_application(blocks),
            (4, GroupVersion::A) => self.update_clock(blocks),
            _ => {}
        }

        if let Some(app_id) = self.registrations[slot(group_type)] {
            self.oda.decode_group(app_id, &self.rds, blocks, group_type);
        }
    }

    /// Forget the session; a live driver does this on retune
    #[allow(dead_code)]
    pub fn clear(&mut self) {
        self.rds = BroadcastMetadata::default();
        self.oda.clear();
        self.registrations = [None; 32];
        self.group_counts = [0; 32];
        self.groups_in = 0;
    }

    // 2A: four RadioText characters per group, placed by segment
    // address, into the buffer selected by the text A/B flag.
    fn assemble_radio_text(&mut self, blocks: &Blocks) {
        if blocks.c.errors > MAX_ERRORS || blocks.d.errors > MAX_ERRORS {
            return;
        }

        let variant = if blocks.b.value & 0x0010 != 0 {
            TextVariant::B
        } else {
            TextVariant::A
        };
        let segment = usize::from(blocks.b.value & 0x000F);

        let text = self.rds.radio_text.text_mut(variant);
        let chars = [
            (blocks.c.value >> 8) as u8,
            (blocks.c.value & 0xFF) as u8,
            (blocks.d.value >> 8) as u8,
            (blocks.d.value & 0xFF) as u8,
        ];
        for (offset, &ch) in chars.iter().enumerate() {
            text.set_byte(segment * 4 + offset, ch);
        }
        self.rds.radio_text.active = variant;
        self.rds.presence.mark(FieldPresence::RADIO_TEXT);
    }

    // 3A: block B announces the group type an application will use,
    // block D carries its Application ID. TMC additionally sends its
    // system messages in the announcement groups themselves, so those
    // are routed to the dispatcher here.
    fn register_application(&mut self, blocks: &Blocks) {
        if blocks.d.errors > MAX_ERRORS {
            return;
        }

        let app_id = blocks.d.value;
        let carrier_code = ((blocks.b.value & 0x001E) >> 1) as u8;
        let carrier_version = if blocks.b.value & 0x0001 != 0 {
            GroupVersion::B
        } else {
            GroupVersion::A
        };
        if let Some(carrier) = GroupType::new(carrier_code, carrier_version) {
            let registered = &mut self.registrations[slot(carrier)];
            if registered.is_none() {
                info!("group {} carries {}", carrier, application_name(app_id));
            }
            *registered = Some(app_id);
        }

        if app_id == AID_TMC {
            let announcement = GroupType::new(3, GroupVersion::A).expect("static group type");
            self.oda.decode_group(app_id, &self.rds, blocks, announcement);
        }
    }

    // 4A: Modified Julian Day split across B and C, time in C and D.
    fn update_clock(&mut self, blocks: &Blocks) {
        if blocks.c.errors > MAX_ERRORS || blocks.d.errors > MAX_ERRORS {
            return;
        }

        let b = blocks.b.value;
        let c = blocks.c.value;
        let d = blocks.d.value;

        self.rds.clock.day_high = ((b & 0x0002) >> 1) as u8;
        self.rds.clock.day_low = ((b & 0x0001) << 15) | (c >> 1);
        self.rds.clock.hour = (((c & 0x0001) << 4) | (d >> 12)) as u8;
        self.rds.clock.minute = ((d >> 6) & 0x003F) as u8;

        let magnitude = (d & 0x001F) as i8;
        self.rds.clock.utc_offset = if d & 0x0020 != 0 {
            -magnitude
        } else {
            magnitude
        };
        self.rds.presence.mark(FieldPresence::CLOCK);
        debug!("clock: {}", format_local_time(&self.rds.clock));
    }

    /// Print everything the session learned
    pub fn print_report(&self, region: Region, quiet: bool) {
        println!("Groups read: {}", self.groups_in);

        println!("Group    Count  Application");
        println!("-----  -------  -----------");
        for code in 0u8..16 {
            for version in [GroupVersion::A, GroupVersion::B] {
                let group_type = GroupType::new(code, version).expect("static group type");
                let count = self.group_counts[slot(group_type)];
                let registration = self.registrations[slot(group_type)];
                if count == 0 && registration.is_none() {
                    continue;
                }
                let app = registration.map(application_name).unwrap_or_default();
                println!("{:>5}  {:>7}  {}", format!("{}", group_type), count, app);
            }
        }

        let counters = self.oda.counters();
        println!();
        println!("RT+:     {}", counters.rt_plus);
        println!("RDS-TMC: {}", counters.tmc);
        println!("iTunes:  {}", counters.itunes);

        if quiet {
            return;
        }
        println!();

        if self.rds.presence.contains(FieldPresence::PI_CODE) {
            let call = decode_pi_code(self.rds.pi_code, region);
            println!(
                "PI:    0x{:04X} ({})",
                self.rds.pi_code,
                call.as_deref().unwrap_or("unknown")
            );
        }
        if self.rds.presence.contains(FieldPresence::PTY) {
            println!(
                "PTY:   {} ({})",
                self.rds.pty,
                pty_name(self.rds.pty, region).unwrap_or("unknown")
            );
        }
        if self.rds.presence.contains(FieldPresence::CLOCK) {
            println!("Clock: {}", format_local_time(&self.rds.clock));
        }
        if self.rds.presence.contains(FieldPresence::RADIO_TEXT) {
            println!(
                "RT:    {:?}",
                self.rds.radio_text.active_text().to_display_string()
            );
        }

        let mut any_tags = false;
        for (content_type, tag) in self.oda.tags().iter_present() {
            if !any_tags {
                println!();
                println!("RadioText Plus tags:");
                any_tags = true;
            }
            println!("  {}: {:?}", content_type_name(content_type), tag.text());
        }

        let tmc = self.oda.tmc();
        if tmc.system.is_some() || tmc.user.is_some() {
            println!();
            println!("Traffic Message Channel:");
        }
        match tmc.system {
            Some(TmcSystemMessage::Variant0 {
                location_table,
                alt_frequency,
                scope,
            }) => {
                println!(
                    "  system: location table {}, AF {}, scope{}{}{}{}",
                    location_table,
                    if alt_frequency { "on" } else { "off" },
                    flag(scope.international, " international"),
                    flag(scope.national, " national"),
                    flag(scope.regional, " regional"),
                    flag(scope.urban, " urban"),
                );
            }
            Some(TmcSystemMessage::Variant1 {
                gap,
                service_id,
                activity_time,
                window_time,
                delay_time,
            }) => {
                println!(
                    "  system: service {}, gap {}, times {}/{}/{}",
                    service_id, gap, activity_time, window_time, delay_time
                );
            }
            None => {}
        }
        if let Some(user) = tmc.user {
            println!(
                "  event {} at location {}, extent {}, {} direction{}{}",
                user.event,
                user.location,
                user.extent,
                if user.positive_direction {
                    "positive"
                } else {
                    "negative"
                },
                flag(user.diversion, ", diversion advised"),
                flag(user.single_group, ", single group"),
            );
        }
    }
}

fn slot(group_type: GroupType) -> usize {
    usize::from(group_type.code()) * 2
        + match group_type.version() {
            GroupVersion::A => 0,
            GroupVersion::B => 1,
        }
}

fn flag(set: bool, text: &'static str) -> &'static str {
    if set {
        text
    } else {
        ""
    }
}
