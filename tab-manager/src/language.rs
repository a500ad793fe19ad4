//! Language Heuristic
//!
//! Cheap German / not-German guess for tab titles. Titles are short, so
//! instead of frequency models this looks for German function words,
//! umlauts and letter trigrams that are common in German vocabulary but
//! rare in English.

use regex::Regex;
use std::sync::LazyLock;

/// Prepositions, conjunctions, articles, pronouns and question words.
/// " an " and " was " are left out, they are English words too.
const FUNCTION_WORDS: &str = concat!(
    "beim*|am|vo[nr]s*|zu[mr]*|aufs*|bis|aus|ums*",
    "|im|ins|gegen|nach|hinter[nms]*|unter[nms]*",
    "|trotz|vorm*|durchs*|seit|seid|viel",
    "|und|oder|aber|denn|dass|weil|ob|als|ohne",
    "|solange|sowie|weder|noch|indem|bevor|falls|damit",
    "|ein|einen*|der|die|das|dem|den|jede[snm]|kein",
    "|ich|du|er|sie|es|wir|ihre*|mir|mich|sich|jemand",
    "|mein|dein|eurer*|euer|uns|unsere*r*",
    "|wohin|wozu|warum|weshalb|wann|woher|wie",
);

/// Trigrams far more frequent in German than in English words
const GERMAN_TRIGRAMS: &str = concat!(
    "ekt|jdn|zei|igk|gke|pfe|jdm|kom|mpf|fah|hlu|zun|hse|kte|gss|ukt|ehl|ufs|tzu|zah",
    "|urz|hnu|usg|ieh|ktr|zug|geg|pfl|gsp|gsa|zwe|zeu|eih|gsb|ktu|rku|gsg|kau|nku|sze",
    "|gsk|ohl|zus|sik|lbs|gsf|gsm|duk|tve|gsv|tzt|gte|olz|lze|hrs|tss|amt|klu|igt|hrt",
    "|aat|zte|nnt|nzu|dlu|gsr|wec|fiz|taa|rkr|usf|ikr|tsb|wah|hmu|ftr|gse|ufg|fst|bek",
    "|feh|hge|sga|gsc|elz|usw|abg|fsc|gsz|huh|hnl|zsc|bge|msc|gsw|woh|svo|ekr|gsl|lsp",
    "|tsg|euz|eku|fge|iku|nft|ufn|ufb|sfr|beu|kze|jds|tko|uhe|hls|mte|ufr|rpf|gek|llg",
    "|tsv|mml|tzl|szi|mge|rnd|chz|hrl|meh|rlu|zwi|usr|rzt|abw|tsf|hrz|abh|gsd|ftu|fna",
    "|ilz|auk|emd|llk|lre|fik|pfa|aht|itg|sdr|tzb|htb|ikt|sri|zif|mwe|gep|skl|pfs|rgs",
    "|stk|rzu|zge|zst|nzs|rzs|ckk|upf|tek|tzs|kko|weh|lfs|sgl|tsr|ufk|ufz|hek|soz|usd",
    "|tsl|bni|ldk|gez|hlt|uhr|umw|abt|gze|wun|tzm|szu|chv|zog|lra|ttb|hsp|npf|lkr|sss",
    "|ufw|umg|fga|hlb|ruh|ykl|zis|dkr|ltn|zyt|uzi|nsz|dte|mfa|orz|rza|tgl|tkr|tsz|zbe",
    "|hoh|fnu|apf|lku|tza|hve|abf|hrh|nsr|kge|mke|fze|itb|usz|ufh|mlu|tzw|mmt|tfr|rrs",
    "|rzw|bsa|hha|tbl|uhl|bfa|sbl|rtp|ufm|hze|okr|unz|ssk|zuf|nmu|ebn|eza|ugr|zeh|hfr",
    "|ewu|rnc|egt|zim|kts|tvo|uun|fbe|tuh|paz|fsp|hrb|ssg|hwu|zba|abk|ckz|stv|tzg|rzk",
    "|zwa|rkz|sza|hnh|rzb|spf|kuc|ufi|hko|hnt|hlk|lsb|esz|ugz|ukl|zve|hrf|bch|duz|lzu",
    "|fwe|gsu|kig|lnd|zyk|hrg|llz|umk|ftf|zuc|anr|lzi|zko|llv|otz|pft|htt|nzt|ckv|dsa",
    "|bha|kut|hkr|rnk|amk|bga|fkl|hss|usm|htk|tmu|msp|uhn|itk|mts|tzk|beb|mms|ndv|tsd",
    "|zul|nzw|nwu|dok|tkl|ltb|ttf|zau|bko|gfr|mde|hsi|mkr|wus|nzl|euf|lwi|fuh",
);

static SEPARATE_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("(?i)(?:^| )(?:{})(?: |$)", FUNCTION_WORDS)).expect("word pattern compiles")
});

static INSIDE_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)(?:[ÄäÖöÜüß]|{}|\d+\.\d+\.\d{{2,4}}|deutsch|german)",
        GERMAN_TRIGRAMS
    ))
    .expect("trigram pattern compiles")
});

/// Whether a title is probably German
pub fn is_german(title: &str) -> bool {
    // titles that are bare URLs match too many trigrams
    if title.starts_with("http://") || title.starts_with("https://") {
        return false;
    }
    SEPARATE_WORDS.is_match(title) || INSIDE_WORDS.is_match(title)
}
