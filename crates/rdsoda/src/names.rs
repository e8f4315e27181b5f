//! Display-name tables for PTY codes, tuner devices, and manufacturers

use crate::picode::Region;

/// Program Type display name
///
/// Returns the RBDS (US) program-format name for a PTY code. Code 0
/// means "no program type" and names the empty string; unassigned
/// codes name `"[Reserved]"`. Non-US PTY tables are not implemented,
/// so every code outside the US region is a decode miss.
pub fn pty_name(pty: u8, region: Region) -> Option<&'static str> {
    match region {
        Region::UnitedStates => Some(pty_name_us(pty)),
        Region::RestOfWorld => None,
    }
}

fn pty_name_us(pty: u8) -> &'static str {
    match pty {
        0 => "",
        1 => "News",
        2 => "Information",
        3 => "Sports",
        4 => "Talk",
        5 => "Rock",
        6 => "Classic Rock",
        7 => "Adult Hits",
        8 => "Soft Rock",
        9 => "Top 40",
        10 => "Country",
        11 => "Oldies",
        12 => "Soft",
        13 => "Nostalgia",
        14 => "Jazz",
        15 => "Classical",
        16 => "Rhythm and Blues",
        17 => "Soft Rhythm and Blues",
        18 => "Foreign Language",
        19 => "Religious Music",
        20 => "Religious Talk",
        21 => "Personality",
        22 => "Public",
        23 => "College",
        29 => "Weather",
        30 => "Emergency Test",
        31 => "Emergency",
        _ => "[Reserved]",
    }
}

/// Silicon Labs tuner parts this metadata may originate from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Device {
    Si4700,
    Si4701,
    Si4702,
    Si4703,
    #[default]
    Unknown,
}

impl Device {
    /// Marketing name of the part
    pub fn name(&self) -> &'static str {
        match self {
            Device::Si4700 => "Si4700",
            Device::Si4701 => "Si4701",
            Device::Si4702 => "Si4702",
            Device::Si4703 => "Si4703",
            Device::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.name().fmt(f)
    }
}

/// Display name for a tuner manufacturer id
pub fn manufacturer_name(id: u16) -> String {
    if id == 0x242 {
        "Silicon Labs".to_owned()
    } else {
        format!("Unknown: 0x{:x}", id)
    }
}
