//! The semantic grammar data: a 256-entry dictionary with feature
//! bitmasks and the ten case frames a haiku must unify with.
//!
//! The tables are wire data. Token bytes and feature assignments are part
//! of the proof-of-work predicate: a dictionary index appears verbatim in
//! the nonce, and the expanded token text is hashed.

/// Feature bits for the semantic grammar, adapted from systemic grammar
/// (Winograd, 1972).
pub const ING: u32 = 0x0000_0001;
pub const INF: u32 = 0x0000_0002;
pub const MOTION: u32 = 0x0000_0004;
pub const NS: u32 = 0x0000_0008;
pub const NPL: u32 = 0x0000_0010;
pub const MASS: u32 = 0x0000_0020;
pub const AMB: u32 = 0x0000_0040;
pub const TIMED: u32 = 0x0000_0080;
pub const TIMEY: u32 = 0x0000_0100;
pub const AT: u32 = 0x0000_0200;
pub const ON: u32 = 0x0000_0400;
pub const IN: u32 = 0x0000_0800;
pub const PREP: u32 = 0x0000_1000;
pub const ADJ: u32 = 0x0000_2000;
pub const OP: u32 = 0x0000_4000;
pub const DETS: u32 = 0x0000_8000;
pub const DETPL: u32 = 0x0001_0000;
/// Marks a frame slot as a literal: the low byte is a dictionary index
/// the nonce token must match exactly.
pub const XLIT: u32 = 0x0002_0000;

pub const TIME: u32 = TIMED | TIMEY;

/// Dictionary size. Indexing by any byte value is always in bounds.
pub const DICT_LEN: usize = 256;
/// Tokens per haiku.
pub const MAX_TOKENS: usize = 16;
/// Number of case frames.
pub const FRAME_COUNT: usize = 10;

/// One dictionary word: its printable token and its feature mask.
#[derive(Clone, Copy, Debug)]
pub struct Word {
    /// Token text. A leading 0x08 erases the previous output byte when
    /// expanded; a trailing newline suppresses the joining space.
    pub token: &'static str,
    pub features: u32,
}

const fn w(token: &'static str, features: u32) -> Word {
    Word { token, features }
}

// Literal-slot dictionary indices used by the frames.
const NL: u32 = XLIT | 1; // "\n"
const CO: u32 = XLIT | 2; // "\x08:"
const MD: u32 = XLIT | 3; // "\x08--"
const A: u32 = XLIT | 5; // "a"
const S: u32 = XLIT | 9; // "\x08s"

/// The word dictionary, indexed directly by nonce bytes. Index 0 is the
/// "NIL" sentinel that terminates a haiku.
pub const DICT: [Word; DICT_LEN] = [
    // Sentence operators and function words.
    w("NIL", 0),
    w("\n", OP),
    w("\x08:", OP),
    w("\x08--", OP),
    w("like", OP),
    w("a", OP),
    w("the", OP),
    w("of", OP),
    w("no", OP),
    w("\x08s", OP),
    w("after", OP),
    w("before", OP),

    // Prepositions.
    w("at", PREP),
    w("in", PREP),
    w("on", PREP),
    w("under", PREP),
    w("above", PREP),
    w("below", PREP),

    // Verbs, present participle, motion.
    w("arriving", ING | MOTION),
    w("departing", ING | MOTION),
    w("going", ING | MOTION),
    w("coming", ING | MOTION),
    w("creeping", ING | MOTION),
    w("dancing", ING | MOTION),
    w("riding", ING | MOTION),
    w("strutting", ING | MOTION),
    w("leaping", ING | MOTION),
    w("leaving", ING | MOTION),
    w("entering", ING | MOTION),
    w("drifting", ING | MOTION),
    w("returning", ING | MOTION),
    w("rising", ING | MOTION),
    w("falling", ING | MOTION),
    w("rushing", ING | MOTION),
    w("soaring", ING | MOTION),
    w("travelling", ING | MOTION),
    w("turning", ING | MOTION),
    w("singing", ING | MOTION),
    w("walking", ING | MOTION),

    // Verbs, present participle.
    w("crying", ING),
    w("weeping", ING),
    w("lingering", ING),
    w("pausing", ING),
    w("shining", ING),

    // Verbs, infinitive, motion.
    w("fall", INF | MOTION),
    w("flow", INF | MOTION),
    w("wander", INF | MOTION),
    w("disappear", INF | MOTION),

    // Verbs, infinitive.
    w("wait", INF),
    w("bloom", INF),
    w("doze", INF),
    w("dream", INF),
    w("laugh", INF),
    w("meditate", INF),
    w("listen", INF),
    w("sing", INF),
    w("decay", INF),
    w("cling", INF),
    w("grow", INF),
    w("forget", INF),
    w("remain", INF),

    // Adjectives.
    w("arid", ADJ),
    w("abandoned", ADJ),
    w("aged", ADJ),
    w("ancient", ADJ),
    w("full", ADJ),
    w("glorious", ADJ),
    w("good", ADJ),
    w("beautiful", ADJ),
    w("first", ADJ),
    w("last", ADJ),
    w("forsaken", ADJ),
    w("sad", ADJ),
    w("mandarin", ADJ),
    w("naked", ADJ),
    w("nameless", ADJ),
    w("old", ADJ),
    w("quiet", ADJ | AMB),
    w("peaceful", ADJ),
    w("still", ADJ),
    w("tranquil", ADJ),
    w("bare", ADJ),

    // Time-of-day and season words.
    w("evening", ADJ | TIMED),
    w("morning", ADJ | TIMED),
    w("afternoon", ADJ | TIMED),
    w("spring", ADJ | TIMEY),
    w("summer", ADJ | TIMEY),
    w("autumn", ADJ | TIMEY),
    w("winter", ADJ | TIMEY),

    // More adjectives, physical and ambient.
    w("broken", ADJ),
    w("thick", ADJ),
    w("thin", ADJ),
    w("little", ADJ),
    w("big", ADJ),
    w("parched", ADJ | AMB),
    w("withered", ADJ | AMB),
    w("worn", ADJ | AMB),
    w("soft", ADJ),
    w("bitter", ADJ),
    w("bright", ADJ),
    w("brilliant", ADJ),
    w("cold", ADJ),
    w("cool", ADJ),
    w("crimson", ADJ),
    w("dark", ADJ),
    w("frozen", ADJ),
    w("grey", ADJ),
    w("hard", ADJ),
    w("hot", ADJ),
    w("scarlet", ADJ),
    w("shallow", ADJ),
    w("sharp", ADJ),
    w("warm", ADJ),
    w("close", ADJ),
    w("calm", ADJ),
    w("cruel", ADJ),
    w("drowned", ADJ),
    w("dull", ADJ),
    w("dead", ADJ),
    w("sick", ADJ),
    w("deep", ADJ),
    w("fast", ADJ),
    w("fleeting", ADJ),
    w("fragrant", ADJ),
    w("fresh", ADJ),
    w("loud", ADJ),
    w("moonlit", ADJ | AMB),
    w("sacred", ADJ),
    w("slow", ADJ),

    // Nouns: people.
    w("traveller", NS),
    w("poet", NS),
    w("beggar", NS),
    w("monk", NS),
    w("warrior", NS),
    w("wife", NS),
    w("courtesan", NS),
    w("dancer", NS),
    w("daemon", NS),

    // Nouns: animals.
    w("frog", NS),
    w("hawks", NPL),
    w("larks", NPL),
    w("cranes", NPL),
    w("crows", NPL),
    w("ducks", NPL),
    w("birds", NPL),
    w("skylark", NS),
    w("sparrows", NPL),
    w("minnows", NPL),
    w("snakes", NPL),
    w("dog", NS),
    w("monkeys", NPL),
    w("cats", NPL),
    w("cuckoos", NPL),
    w("mice", NPL),
    w("dragonfly", NS),
    w("butterfly", NS),
    w("firefly", NS),
    w("grasshopper", NS),
    w("mosquitos", NPL),

    // Nouns: plants.
    w("trees", NPL | IN | AT),
    w("roses", NPL),
    w("cherries", NPL),
    w("flowers", NPL),
    w("lotuses", NPL),
    w("plums", NPL),
    w("poppies", NPL),
    w("violets", NPL),
    w("oaks", NPL | AT),
    w("pines", NPL | AT),
    w("chestnuts", NPL),
    w("clovers", NPL),
    w("leaves", NPL),
    w("petals", NPL),
    w("thorns", NPL),
    w("blossoms", NPL),
    w("vines", NPL),
    w("willows", NPL),

    // Nouns: places and things.
    w("mountain", NS | AT | ON),
    w("moor", NS | AT | ON | IN),
    w("sea", NS | AT | ON | IN),
    w("shadow", NS | IN),
    w("skies", NPL | IN),
    w("moon", NS),
    w("star", NS),
    w("stone", NS),
    w("cloud", NS),
    w("bridge", NS | ON | AT),
    w("gate", NS | AT),
    w("temple", NS | IN | AT),
    w("hovel", NS | IN | AT),
    w("forest", NS | IN | AT),
    w("grave", NS | IN | AT | ON),
    w("stream", NS | IN | AT | ON),
    w("pond", NS | IN | AT | ON),
    w("island", NS | ON | AT),
    w("bell", NS),
    w("boat", NS | IN | ON),
    w("sailboat", NS | IN | ON),
    w("bon fire", NS | AT),
    w("straw mat", NS | ON),
    w("cup", NS | IN),
    w("nest", NS | IN),
    w("sun", NS | IN),
    w("village", NS | IN),
    w("tomb", NS | IN | AT),
    w("raindrop", NS | IN),
    w("wave", NS | IN),
    w("wind", NS | IN),
    w("tide", NS | IN | AT),
    w("fan", NS),
    w("hat", NS),
    w("sandal", NS),
    w("shroud", NS),
    w("pole", NS),

    // Mass nouns and substances.
    w("water", ON | IN | MASS | AMB),
    w("air", ON | IN | MASS | AMB),
    w("mud", ON | IN | MASS | AMB),
    w("rain", IN | MASS | AMB),
    w("thunder", IN | MASS | AMB),
    w("ice", ON | IN | MASS | AMB),
    w("snow", ON | IN | MASS | AMB),
    w("salt", ON | IN | MASS),
    w("hail", IN | MASS | AMB),
    w("mist", IN | MASS | AMB),
    w("dew", IN | MASS | AMB),
    w("foam", IN | MASS | AMB),
    w("frost", IN | MASS | AMB),
    w("smoke", IN | MASS | AMB),
    w("twilight", IN | AT | MASS | AMB),
    w("earth", ON | IN | MASS),
    w("grass", ON | IN | MASS),
    w("bamboo", MASS),
    w("gold", MASS),
    w("grain", MASS),
    w("rice", MASS),
    w("tea", IN | MASS),
    w("light", IN | MASS | AMB),
    w("darkness", IN | MASS | AMB),
    w("firelight", IN | MASS | AMB),
    w("sunlight", IN | MASS | AMB),
    w("sunshine", IN | MASS | AMB),

    // Abstract nouns and times.
    w("journey", NS | ON),
    w("serenity", MASS),
    w("dusk", TIMED),
    w("glow", NS),
    w("scent", NS),
    w("sound", NS),
    w("silence", NS),
    w("voice", NS),
    w("day", NS | TIMED),
    w("night", NS | TIMED),
    w("sunrise", NS | TIMED),
    w("sunset", NS | TIMED),
    w("midnight", NS | TIMED),
    w("equinox", NS | TIMEY),
    w("noon", NS | TIMED),
];

/// The ten case frames. A slot is either 0 (end of haiku), an `XLIT`
/// literal, or a feature mask the token must intersect.
pub const FRAMES: [[u32; MAX_TOKENS]; FRAME_COUNT] = [
    // on a quiet moor / raindrops / fall
    [PREP, ADJ, MASS, NL, NPL, NL, INF | ING, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [PREP, MASS, NL, ADJ, NPL, NL, INF | ING, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [PREP, TIMED, NL, ADJ, NPL, NL, INF | ING, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [PREP, TIMED, NL, A, NS, NL, ING, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    // morning mist / on a worn field-- / red
    [TIME, AMB, NL, PREP, A, ADJ, NS, MD, NL, ADJ | ING, 0, 0, 0, 0, 0, 0],
    [TIME, AMB, NL, ADJ, MASS, NL, ING, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    // morning mist / remains: / smoke
    [TIME, MASS, NL, INF, S, CO, NL, AMB, 0, 0, 0, 0, 0, 0, 0, 0],
    // arriving at a parched gate / mist rises-- / a moonlit sandal
    [ING, PREP, A, ADJ, NS, NL, MASS, ING, MD, NL, A, ADJ, NS, 0, 0, 0],
    [ING, PREP, TIME, MASS, NL, MASS, ING, MD, NL, A, ADJ, NS, 0, 0, 0, 0],
    // a wife / in afternoon mist-- / sad
    [A, NS, NL, PREP, TIMED, MASS, MD, NL, ADJ, 0, 0, 0, 0, 0, 0, 0],
];
