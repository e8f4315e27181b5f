//! RadioText Plus (RT+) tag extraction
//!
//! RT+ is an Open Data Application that marks up substrings of the
//! station's RadioText with semantic roles: content type 1 is the
//! song title, 4 the artist, and so on. Each RT+ group carries two
//! tag descriptors, each a (content type, start, length) triple
//! pointing into the currently-displayed RadioText buffer.
//!
//! See EBU tech review 307 for the application definition.

use arrayvec::ArrayVec;

use crate::block::{BlockGate, Blocks, ErrorLevel};
use crate::metadata::{BroadcastMetadata, DisplayText};

// Tag descriptor 1: three content-type bits in B, the rest in C.
const B_CONTENT_TYPE_1: u16 = 0b0000000000000111;
const C_CONTENT_TYPE_1: u16 = 0b1110000000000000;
const C_START_1: u16 = 0b0001111110000000;
const C_LENGTH_1: u16 = 0b0000000001111110;

// Tag descriptor 2: one content-type bit in C, the rest in D.
const C_CONTENT_TYPE_2: u16 = 0b0000000000000001;
const D_CONTENT_TYPE_2: u16 = 0b1111100000000000;
const D_START_2: u16 = 0b0000011111100000;
const D_LENGTH_2: u16 = 0b0000000000011111;

pub(crate) const GATE: BlockGate = BlockGate {
    b: Some(ErrorLevel::Medium),
    c: Some(ErrorLevel::Medium),
    d: Some(ErrorLevel::Medium),
};

/// One slot of the RT+ tag table
///
/// Either cleared, or holding the last text the broadcaster tagged
/// with this slot's content type. Slot writes replace the whole slot;
/// readers never observe a partial update.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagSlot {
    text: ArrayVec<u8, TAG_CAPACITY>,
    present: bool,
}

const TAG_CAPACITY: usize = 63;
const TAG_SLOTS: usize = 65;

impl TagSlot {
    /// Maximum tag text length
    pub const CAPACITY: usize = TAG_CAPACITY;

    /// True if a tag has been applied and not since retracted
    pub fn is_present(&self) -> bool {
        self.present
    }

    /// Raw tag text bytes
    pub fn bytes(&self) -> &[u8] {
        &self.text
    }

    /// Tag text as a printable string
    pub fn text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.text)
    }

    /// Empty the slot; the broadcaster has retracted the tag
    fn clear(&mut self) {
        self.text.clear();
        self.present = false;
    }

    // Zero-fill-then-copy: replace the slot's contents with
    // `length + 1` characters of `text` starting at `start`. The copy
    // is bounded by the display buffer and by slot capacity, and ends
    // at the first NUL (unwritten display positions).
    fn replace_from(&mut self, text: &DisplayText, start: usize, length: usize) {
        self.text.clear();
        let bytes = text.bytes();
        let begin = start.min(bytes.len());
        let end = (start + length + 1).min(bytes.len());
        for &byte in &bytes[begin..end] {
            if byte == 0 || self.text.try_push(byte).is_err() {
                break;
            }
        }
        self.present = true;
    }
}

/// The RT+ tag table: one slot per content type, 0–64
///
/// Content type 0 ("Dummy") and types 64 and above never hold a tag;
/// their slots exist only so the table can be indexed directly by
/// content type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagTable {
    slots: [TagSlot; TAG_SLOTS],
}

impl TagTable {
    /// Number of content-type slots
    pub const SLOTS: usize = TAG_SLOTS;

    /// An empty tag table
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| TagSlot::default()),
        }
    }

    /// The slot for `content_type`, if it is in range
    pub fn get(&self, content_type: u16) -> Option<&TagSlot> {
        self.slots.get(usize::from(content_type))
    }

    /// Iterator over `(content_type, slot)` for every present tag
    pub fn iter_present(&self) -> impl Iterator<Item = (u16, &TagSlot)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_present())
            .map(|(content_type, slot)| (content_type as u16, slot))
    }

    /// Retract every tag
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            slot.clear();
        }
    }
}

impl Default for TagTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode one RT+ group into the tag table
///
/// Descriptor 1 is applied first, then descriptor 2. A descriptor
/// with `length == 0` whose start character is a space retracts the
/// tag; anything else replaces the slot with the referenced span of
/// the active RadioText. Descriptor 2 skips the retraction test when
/// both descriptors name the same content type, so it always copies
/// in that case — overwriting whatever descriptor 1 just wrote.
pub(crate) fn decode(table: &mut TagTable, rds: &BroadcastMetadata, blocks: &Blocks) {
    if !GATE.admits(blocks) {
        return;
    }

    let text = rds.radio_text.active_text();

    let content_type1 =
        ((blocks.b.value & B_CONTENT_TYPE_1) << 3) | ((blocks.c.value & C_CONTENT_TYPE_1) >> 13);
    let start = usize::from((blocks.c.value & C_START_1) >> 7);
    let length = usize::from((blocks.c.value & C_LENGTH_1) >> 1);

    if (1..64).contains(&content_type1) {
        let slot = &mut table.slots[usize::from(content_type1)];
        if length == 0 && text.byte_at(start) == b' ' {
            slot.clear();
        } else {
            slot.replace_from(text, start, length);
        }
    }

    let content_type2 =
        ((blocks.c.value & C_CONTENT_TYPE_2) << 5) | ((blocks.d.value & D_CONTENT_TYPE_2) >> 11);
    let start = usize::from((blocks.d.value & D_START_2) >> 5);
    let length = usize::from(blocks.d.value & D_LENGTH_2);

    if (1..64).contains(&content_type2) {
        let slot = &mut table.slots[usize::from(content_type2)];
        if content_type1 != content_type2 && length == 0 && text.byte_at(start) == b' ' {
            slot.clear();
        } else {
            slot.replace_from(text, start, length);
        }
    }
}

/// Display name for an RT+ content type
///
/// Returns `"Unknown"` for codes past the table.
pub fn content_type_name(content_type: u16) -> &'static str {
    CONTENT_TYPE_NAMES
        .get(usize::from(content_type))
        .copied()
        .unwrap_or("Unknown")
}

const CONTENT_TYPE_NAMES: [&str; TAG_SLOTS] = [
    "Dummy",
    "Title",
    "Album",
    "Track",
    "Artist",
    "Composition",
    "Movement",
    "Conductor",
    "Composer",
    "Band",
    "Comment",
    "Genre",
    "News",
    "Local News",
    "Stock Mkt",
    "Sports",
    "Lottery",
    "Horoscope",
    "Daily diversion",
    "Health",
    "Event",
    "Szene",
    "Cinema",
    "TV",
    "Date_Time",
    "Weather",
    "Traffic",
    "Alarm",
    "Advertisement",
    "URL",
    "Other",
    "Station.short",
    "Station.long",
    "Programme.now",
    "Programme.next",
    "Programme.part",
    "Programme.host",
    "Programme.editorial",
    "Programme.frequency",
    "Programme.homepage",
    "Programme.subchannel",
    "Phone.hotline",
    "Phone.studio",
    "Phone.other",
    "SMS.studio",
    "SMS.other",
    "Email.hotline",
    "Email.studio",
    "Email.other",
    "MMS.other",
    "Chat",
    "Chat.center",
    "Vote.question",
    "Vote.center",
    "rfu",
    "rfu",
    "Private classes",
    "Private classes",
    "Place",
    "Appointment",
    "Identifier",
    "Purchase",
    "Get.data",
    "rfu",
    "rfu",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Block;

    // Pack two tag descriptors into blocks B, C, D. Block B's upper
    // bits (group type, ODA bits) are irrelevant to the extractor.
    fn encode(ct1: u16, start1: u16, len1: u16, ct2: u16, start2: u16, len2: u16) -> Blocks {
        let b = ct1 >> 3;
        let c = ((ct1 & 0x7) << 13) | (start1 << 7) | (len1 << 1) | (ct2 >> 5);
        let d = ((ct2 & 0x1F) << 11) | (start2 << 5) | len2;
        Blocks {
            a: Block::default(),
            b: Block::new(b, ErrorLevel::None),
            c: Block::new(c, ErrorLevel::None),
            d: Block::new(d, ErrorLevel::None),
        }
    }

    fn metadata_with_text(text: &str) -> BroadcastMetadata {
        let mut rds = BroadcastMetadata::default();
        rds.radio_text.variant_a = DisplayText::from(text);
        rds
    }

    #[test]
    fn test_mask_roundtrip() {
        let blocks = encode(63, 63, 63, 63, 63, 31);
        assert_eq!(0x0007, blocks.b.value);
        assert_eq!(0xFFFF, blocks.c.value);
        assert_eq!(0xFFFF, blocks.d.value);
    }

    #[test]
    fn test_copies_both_descriptors() {
        let rds = metadata_with_text("Daydreaming - Radiohead");
        let mut table = TagTable::new();

        // title = "Daydreaming", artist = "Radiohead"
        decode(&mut table, &rds, &encode(1, 0, 10, 4, 14, 8));

        let title = table.get(1).unwrap();
        assert!(title.is_present());
        assert_eq!("Daydreaming", title.text());

        let artist = table.get(4).unwrap();
        assert_eq!("Radiohead", artist.text());

        let names: Vec<u16> = table.iter_present().map(|(ct, _)| ct).collect();
        assert_eq!(&[1, 4], names.as_slice());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let rds = metadata_with_text("  hello");
        let mut table = TagTable::new();

        decode(&mut table, &rds, &encode(2, 2, 4, 0, 0, 0));
        assert_eq!("hello", table.get(2).unwrap().text());

        // length 0 pointing at a space retracts the tag...
        decode(&mut table, &rds, &encode(2, 0, 0, 0, 0, 0));
        assert!(!table.get(2).unwrap().is_present());
        assert_eq!("", table.get(2).unwrap().text());

        // ...no matter how many times, or what was there before
        decode(&mut table, &rds, &encode(2, 0, 0, 0, 0, 0));
        assert!(!table.get(2).unwrap().is_present());
    }

    #[test]
    fn test_length_zero_without_space_copies() {
        let rds = metadata_with_text("X marks the spot");
        let mut table = TagTable::new();

        // length 0 but start character is not a space: one-char copy
        decode(&mut table, &rds, &encode(3, 0, 0, 0, 0, 0));
        assert_eq!("X", table.get(3).unwrap().text());
    }

    #[test]
    fn test_equal_content_types_always_overwrite() {
        let rds = metadata_with_text("  Genesis");
        let mut table = TagTable::new();

        // Descriptor 1 writes a real span. Descriptor 2 names the
        // same content type with length 0 at a space; its retraction
        // branch is suppressed, so it copies a single space instead.
        decode(&mut table, &rds, &encode(9, 2, 6, 9, 0, 0));

        let slot = table.get(9).unwrap();
        assert!(slot.is_present());
        assert_eq!(" ", slot.text());
    }

    #[test]
    fn test_distinct_content_types_may_clear() {
        let rds = metadata_with_text("  Genesis");
        let mut table = TagTable::new();

        decode(&mut table, &rds, &encode(9, 2, 6, 0, 0, 0));
        assert_eq!("Genesis", table.get(9).unwrap().text());

        // same payload for slot 9, but via descriptor 2 with a
        // different descriptor-1 content type: the clear applies
        decode(&mut table, &rds, &encode(8, 2, 6, 9, 0, 0));
        assert!(!table.get(9).unwrap().is_present());
    }

    #[test]
    fn test_content_type_range() {
        let rds = metadata_with_text("should never be copied");
        let mut table = TagTable::new();

        // type 0 is the dummy, type 63 is the last live slot; 64+
        // cannot be expressed by descriptor 2 (5+1 bits) but type 0
        // can, and descriptor 1's type 0 must also be ignored
        decode(&mut table, &rds, &encode(0, 0, 5, 0, 6, 5));
        assert_eq!(0, table.iter_present().count());

        decode(&mut table, &rds, &encode(63, 0, 5, 0, 0, 0));
        assert!(table.get(63).unwrap().is_present());
    }

    #[test]
    fn test_gate_rejects_whole_group() {
        let rds = metadata_with_text("good text");
        let mut table = TagTable::new();

        let mut blocks = encode(1, 0, 3, 4, 5, 3);
        blocks.c.errors = ErrorLevel::Unrecoverable;

        let before = table.clone();
        decode(&mut table, &rds, &blocks);
        assert_eq!(before, table);

        // Medium errors are still tolerated
        blocks.c.errors = ErrorLevel::Medium;
        decode(&mut table, &rds, &blocks);
        assert!(table.get(1).unwrap().is_present());
    }

    #[test]
    fn test_copy_bounds() {
        // descriptor spanning past the display buffer must stop at
        // the buffer end and at the slot capacity
        let text = "x".repeat(64);
        let rds = metadata_with_text(&text);
        let mut table = TagTable::new();

        decode(&mut table, &rds, &encode(5, 60, 63, 0, 0, 0));
        assert_eq!("xxxx", table.get(5).unwrap().text());

        // a full-width span is capped at 63 bytes of slot storage
        decode(&mut table, &rds, &encode(5, 0, 63, 0, 0, 0));
        assert_eq!(63, table.get(5).unwrap().bytes().len());
    }

    #[test]
    fn test_copy_stops_at_unwritten_text() {
        // only 5 characters assembled; the rest of the buffer is NUL
        let rds = metadata_with_text("Radio");
        let mut table = TagTable::new();

        decode(&mut table, &rds, &encode(4, 2, 20, 0, 0, 0));
        assert_eq!("dio", table.get(4).unwrap().text());

        // pointing entirely past the text yields a present-but-empty tag
        decode(&mut table, &rds, &encode(6, 20, 4, 0, 0, 0));
        assert!(table.get(6).unwrap().is_present());
        assert_eq!("", table.get(6).unwrap().text());
    }

    #[test]
    fn test_reads_active_variant() {
        let mut rds = metadata_with_text("text A here");
        rds.radio_text.variant_b = DisplayText::from("text B here");
        rds.radio_text.active = crate::metadata::TextVariant::B;

        let mut table = TagTable::new();
        decode(&mut table, &rds, &encode(1, 5, 5, 0, 0, 0));
        assert_eq!("B here", table.get(1).unwrap().text());
    }

    #[test]
    fn test_content_type_names() {
        assert_eq!("Dummy", content_type_name(0));
        assert_eq!("Title", content_type_name(1));
        assert_eq!("Artist", content_type_name(4));
        assert_eq!("Station.short", content_type_name(31));
        assert_eq!("Get.data", content_type_name(62));
        assert_eq!("rfu", content_type_name(64));
        assert_eq!("Unknown", content_type_name(65));
        assert_eq!("Unknown", content_type_name(2047));
    }
}
