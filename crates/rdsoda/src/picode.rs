//! Program Identification (PI) call-sign recovery
//!
//! US/RBDS stations derive their PI code arithmetically from their
//! call sign, so most codes decode right back to `K`/`W` plus three
//! base-26 letters. The rest — legacy three-letter stations, Canadian
//! and Mexican cross-border assignments, and a handful of oddities —
//! live in a fixed exception table.
//!
//! The arithmetic decode is ported from Doug Smith's writeup at
//! <http://www.w9wi.com/articles/rds.htm>.

use phf::phf_map;

/// Receiver region, which selects the PI interpretation
///
/// Only the US (RBDS) mapping is implemented; every other region
/// decodes to "unknown."
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Region {
    #[default]
    UnitedStates,
    RestOfWorld,
}

/// Decode a PI code into a displayable station call sign
///
/// Returns `None` when no mapping is known. That is routine — many
/// broadcasters transmit codes outside both the arithmetic range and
/// the exception table, and non-US decoding is unimplemented — so
/// callers should render "unknown" rather than treat it as an error.
///
/// ```
/// use rdsoda::{decode_pi_code, Region};
///
/// assert_eq!(
///     Some("KDKA".to_owned()),
///     decode_pi_code(6384, Region::UnitedStates)
/// );
/// assert_eq!(None, decode_pi_code(6384, Region::RestOfWorld));
/// ```
pub fn decode_pi_code(pi_code: u16, region: Region) -> Option<String> {
    match region {
        Region::UnitedStates => decode_pi_us(pi_code),
        Region::RestOfWorld => None,
    }
}

fn decode_pi_us(mut picode: u16) -> Option<String> {
    // Two legacy encodings are normalized first. These are separate
    // rewrites, not alternatives: a code rewritten by the first rule
    // can match and be rewritten by the second.
    if picode & 0xAF00 == 0xAF00 {
        picode = (picode & 0x00FF) << 8;
    }
    if picode & 0xA000 == 0xA000 {
        picode = ((picode & 0x0F00) << 4) | (picode & 0x00FF);
    }

    if picode > 4095 && picode < 39247 {
        let letter;
        if picode > 21671 {
            letter = 'W';
            picode -= 21672;
        } else {
            letter = 'K';
            picode -= 4096;
        }
        let call2 = picode / 676;
        picode -= 676 * call2;
        let call3 = picode / 26;
        let call4 = picode - 26 * call3;

        let mut call = String::with_capacity(4);
        call.push(letter);
        call.push(char::from(b'A' + call2 as u8));
        call.push(char::from(b'A' + call3 as u8));
        call.push(char::from(b'A' + call4 as u8));
        return Some(call);
    }

    CALLSIGN_EXCEPTIONS.get(&picode).map(|&call| call.to_owned())
}

/// Non-arithmetic PI assignments
///
/// Three-letter legacy stations, Canadian/Mexican/Caribbean stations
/// heard across the border, and simulcast pairs. Codes inside the
/// arithmetic range never reach this table; see the tests.
static CALLSIGN_EXCEPTIONS: phf::Map<u16, &'static str> = phf_map! {
    49829u16 => "CIMF",
    17185u16 => "CJPT",

    // three-letter call signs
    39248u16 => "KEX",
    39249u16 => "KFH",
    39253u16 => "KGU",
    39254u16 => "KGW",
    39255u16 => "KGY",
    39256u16 => "KID",
    39257u16 => "KIT",
    39258u16 => "KJR",
    39259u16 => "KLO",
    39260u16 => "KLZ",
    39261u16 => "KMA",
    39262u16 => "KMJ",
    39263u16 => "KNX",
    39264u16 => "KOA",
    39268u16 => "KQV",
    39269u16 => "KSL",
    39270u16 => "KUJ",
    39271u16 => "KVI",
    39272u16 => "KWG",
    39275u16 => "KYW",
    39277u16 => "WBZ",
    39278u16 => "WDZ",
    39279u16 => "WEW",
    39281u16 => "WGL",
    39282u16 => "WGN",
    39283u16 => "WGR",
    39285u16 => "WHA",
    39286u16 => "WHB",
    39287u16 => "WHK",
    39288u16 => "WHO",
    39290u16 => "WIP",
    39291u16 => "WJR",
    39292u16 => "WKY",
    39293u16 => "WLS",
    39294u16 => "WLW",
    39297u16 => "WOC",
    39299u16 => "WOL",
    39300u16 => "WOR",
    39304u16 => "WWJ",
    39305u16 => "WWL",
    39312u16 => "KDB",
    39313u16 => "KGB",
    39314u16 => "KOY",
    39315u16 => "KPQ",
    39316u16 => "KSD",
    39317u16 => "KUT",
    39318u16 => "KXL",
    39319u16 => "KXO",
    39321u16 => "WBT",
    39322u16 => "WGH",
    39323u16 => "WGY",
    39324u16 => "WHP",
    39325u16 => "WIL",
    39326u16 => "WMC",
    39327u16 => "WMT",
    39328u16 => "WOI",
    39329u16 => "WOW",
    39330u16 => "WRR",
    39331u16 => "WSB",
    39332u16 => "WSM",
    39333u16 => "KBW", // also XHSR?
    39334u16 => "KCY",
    39335u16 => "KDF",
    39338u16 => "KHQ",
    39339u16 => "KOB",
    39347u16 => "WIS",
    39348u16 => "WJW",
    39349u16 => "WJZ",
    39353u16 => "WRC",

    // cross-border and simulcast assignments
    26542u16 => "WHFI/CHFI",
    39250u16 => "KFI/CJBC",
    49160u16 => "CJBC-1",
    49158u16 => "CBCK",
    52010u16 => "CBLG",
    52007u16 => "CBLJ",
    52012u16 => "CBQT",
    52009u16 => "CBEB",
    28378u16 => "WJXY/CJXY",
    39251u16 => "KGA/CBCx",
    39252u16 => "KGO/CBCP",
    941u16 => "CKGE",
    16416u16 => "KSFW/CBLA",
    25414u16 => "WFNY/CFNY",
    27382u16 => "WILQ/CILQ",
    27424u16 => "WING/CING",
    26428u16 => "WHAY/CHAY",
    52033u16 => "CBA-FM",
    52034u16 => "CBCT",
    52045u16 => "CBHM",
    45084u16 => "CIQM",
    51806u16 => "CHNI, CJNI, or CKNI",
    12289u16 => "KLAS (Jamaica)",
    7877u16 => "CFPL",
    7760u16 => "ZFKY (Cayman Is.)",
    8151u16 => "ZFCC (Cayman Is.)",
    12656u16 => "WAVW",
    7908u16 => "KTCZ",
    42149u16 => "KSKZ or KWKR",
    45313u16 => "XHCTO",
    34784u16 => "XHTRR",
};
