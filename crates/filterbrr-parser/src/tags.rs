//! Tag dictionary.
//!
//! Static, per-category ordered tables of `pattern -> canonical tag`. Order is
//! precedence: more specific entries come first so that "DTS-HD.MA" is tried
//! before "DTS-HD" and "DTS", and "24BIT Lossless" before "24BIT".
//!
//! The dictionary is compiled once. Use [`TagDictionary::global`] for the
//! process-wide instance, or [`TagDictionary::new`] to build one explicitly
//! and pass it around.

use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::ops::Range;
use std::sync::OnceLock;

/// Dictionary category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagCategory {
    Audio,
    AudioBitrate,
    AudioFormat,
    AudioExtra,
    Bonus,
    Channels,
    Codecs,
    Container,
    Hdr,
    Other,
    Origin,
    Source,
    Resolution,
}

impl TagCategory {
    /// Every category, in a stable order.
    pub const ALL: [TagCategory; 13] = [
        TagCategory::Audio,
        TagCategory::AudioBitrate,
        TagCategory::AudioFormat,
        TagCategory::AudioExtra,
        TagCategory::Bonus,
        TagCategory::Channels,
        TagCategory::Codecs,
        TagCategory::Container,
        TagCategory::Hdr,
        TagCategory::Other,
        TagCategory::Origin,
        TagCategory::Source,
        TagCategory::Resolution,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Audio => "audio",
            Self::AudioBitrate => "audioBitrate",
            Self::AudioFormat => "audioFormat",
            Self::AudioExtra => "audioExtra",
            Self::Bonus => "bonus",
            Self::Channels => "channels",
            Self::Codecs => "codecs",
            Self::Container => "container",
            Self::Hdr => "hdr",
            Self::Other => "other",
            Self::Origin => "origin",
            Self::Source => "source",
            Self::Resolution => "resolution",
        }
    }

    /// Whether a release can carry several tags of this category.
    pub fn is_list(&self) -> bool {
        matches!(
            self,
            Self::Audio | Self::AudioExtra | Self::Bonus | Self::Codecs | Self::Hdr | Self::Other
        )
    }

    fn table(&self) -> &'static [(&'static str, &'static str, &'static str)] {
        match self {
            Self::Audio => AUDIO,
            Self::AudioBitrate => AUDIO_BITRATE,
            Self::AudioFormat => AUDIO_FORMAT,
            Self::AudioExtra => AUDIO_EXTRA,
            Self::Bonus => BONUS,
            Self::Channels => CHANNELS,
            Self::Codecs => CODECS,
            Self::Container => CONTAINER,
            Self::Hdr => HDR,
            Self::Other => OTHER,
            Self::Origin => ORIGIN,
            Self::Source => SOURCE,
            Self::Resolution => RESOLUTION,
        }
    }

    // Channel layouts sit directly after codec names ("DD5.1"), so they only
    // need a non-digit boundary.
    fn boundary_class(&self) -> &'static str {
        match self {
            Self::Channels => "[^0-9]",
            _ => "[^a-z]",
        }
    }
}

impl fmt::Display for TagCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// (tag, title, pattern). An empty pattern matches the escaped tag literally.
const AUDIO: &[(&str, &str, &str)] = &[
    ("24BIT Lossless", "", r"24BIT lossless"),
    ("24BIT", "", r"(?-i:24BIT)"),
    ("16BIT", "", r"(?-i:16BIT)"),
    ("320", "320 Kbps", r"320[\-._ kbps]?"),
    ("256", "256 Kbps", r"256[\-._ kbps]?"),
    ("192", "192 Kbps", r"192[\-._ kbps]?"),
    ("128", "128 Kbps", r"128[\-._ kbps]?"),
    ("AAC-LC", "Advanced Audio Coding (LC)", r"aac[\-._ ]?lc"),
    ("AAC", "Advanced Audio Coding (LC)", ""),
    ("AC3D", "", r"ac[\-._ ]?3d"),
    ("Atmos", "Dolby Atmos", ""),
    ("APS (VBR)", "APS Variable Bit Rate", ""),
    ("APX (VBR)", "APX Variable Bit Rate", ""),
    ("CBR", "Constant Bit Rate", ""),
    ("Cue", "Cue File", ""),
    ("DDPA", "Dolby Digital+ Atmos (E-AC-3+Atmos)", r"dd[p+]a"),
    ("DDP", "Dolby Digital+ (E-AC-3)", r"dd[p+]|e[\-._ ]?ac3"),
    ("DD", "Dolby Digital (AC-3)", r"dd|ac3|dolby[\-._ ]?digital"),
    ("DTS-HD.HRA", "DTS (HD HRA)", r"dts[\-._ ]?hd[\-._ ]?hra"),
    ("DTS-HD.HR", "DTS (HD HR)", r"dts[\-._ ]?hd[\-._ ]?hr"),
    ("DTS-HD.MA", "DTS (HD MA)", r"dts[\-._ ]?hd[\-._ ]?ma"),
    ("DTS-HD", "DTS (HD)", r"dts[\-._ ]?hd"),
    ("DTS-MA", "DTS (MA)", r"dts[\-._ ]?ma"),
    ("DTS-X", "DTS (X)", r"dts[\-._ ]?x"),
    ("DTS", "", ""),
    ("DUAL.AUDIO", "Dual Audio", r"dual(?:[\-._ ]?audio)?"),
    ("EAC3D", "", ""),
    ("ES", "Dolby Digital (ES)", r"(?-i:ES)"),
    ("EX", "Dolby Digital (EX)", r"(?-i:EX)"),
    ("FLAC", "Free Lossless Audio Codec", ""),
    ("LiNE", "Line", r"(?-i:L[iI]NE)"),
    ("Lossless", "", r"lossless"),
    ("LogScore", "LogScore", r"log\s?(?:\(|\s)(\d+)%\)?"),
    ("Log", "", r"log"),
    ("LPCM", "Linear Pulse-Code Modulation", ""),
    ("MP3", "", ""),
    ("OGG", "", ""),
    ("OPUS", "", ""),
    ("TrueHD", "Dolby TrueHD", r"(?:dolby[\-._ ]?)?true[\-._ ]?hd"),
    ("VBR", "Variable Bit Rate", ""),
    ("V0 (VBR)", "V0 Variable Bit Rate", r"v0(?: \(vbr\))?"),
    ("V1 (VBR)", "V1 Variable Bit Rate", r"v1(?: \(vbr\))?"),
    ("V2 (VBR)", "V2 Variable Bit Rate", r"v2(?: \(vbr\))?"),
];

const AUDIO_BITRATE: &[(&str, &str, &str)] = &[
    ("24BIT Lossless", "", r"24BIT lossless"),
    ("24BIT", "", r"(?-i:24BIT)"),
    ("16BIT", "", r"(?-i:16BIT)"),
    ("320", "320 Kbps", r"320[\-._ kbps]?"),
    ("256", "256 Kbps", r"256[\-._ kbps]?"),
    ("192", "192 Kbps", r"192[\-._ kbps]?"),
    ("128", "128 Kbps", r"128[\-._ kbps]?"),
    ("APS (VBR)", "APS Variable Bit Rate", ""),
    ("APX (VBR)", "APX Variable Bit Rate", ""),
    ("CBR", "Constant Bit Rate", ""),
    ("Lossless", "", r"lossless"),
    ("VBR", "Variable Bit Rate", ""),
    ("V0 (VBR)", "V0 Variable Bit Rate", r"v0(?: \(vbr\))?"),
    ("V1 (VBR)", "V1 Variable Bit Rate", r"v1(?: \(vbr\))?"),
    ("V2 (VBR)", "V2 Variable Bit Rate", r"v2(?: \(vbr\))?"),
];

const AUDIO_FORMAT: &[(&str, &str, &str)] = &[
    ("AAC-LC", "Advanced Audio Coding (LC)", r"aac[\-._ ]?lc"),
    ("AAC", "Advanced Audio Coding (LC)", ""),
    ("AC3D", "", r"ac[\-._ ]?3d"),
    ("Atmos", "Dolby Atmos", ""),
    ("DDPA", "Dolby Digital+ Atmos (E-AC-3+Atmos)", r"dd[p+]a"),
    ("DDP", "Dolby Digital+ (E-AC-3)", r"dd[p+]|e[\-._ ]?ac3"),
    ("DD", "Dolby Digital (AC-3)", r"dd|ac3|dolby[\-._ ]?digital"),
    ("DTS-HD.HRA", "DTS (HD HRA)", r"dts[\-._ ]?hd[\-._ ]?hra"),
    ("DTS-HD.HR", "DTS (HD HR)", r"dts[\-._ ]?hd[\-._ ]?hr"),
    ("DTS-HD.MA", "DTS (HD MA)", r"dts[\-._ ]?hd[\-._ ]?ma"),
    ("DTS-HD", "DTS (HD)", r"dts[\-._ ]?hd"),
    ("DTS-MA", "DTS (MA)", r"dts[\-._ ]?ma"),
    ("DTS-X", "DTS (X)", r"dts[\-._ ]?x"),
    ("DTS", "", ""),
    ("EAC3D", "", ""),
    ("ES", "Dolby Digital (ES)", r"(?-i:ES)"),
    ("EX", "Dolby Digital (EX)", r"(?-i:EX)"),
    ("FLAC", "Free Lossless Audio Codec", ""),
    ("LPCM", "Linear Pulse-Code Modulation", ""),
    ("MP3", "", ""),
    ("OGG", "", ""),
    ("OPUS", "", ""),
    ("TrueHD", "Dolby TrueHD", r"(?:dolby[\-._ ]?)?true[\-._ ]?hd"),
];

const AUDIO_EXTRA: &[(&str, &str, &str)] = &[
    ("Cue", "Cue File", ""),
    ("Log100", "", r"log 100%|log \(100%\)"),
    ("LogScore", "LogScore", r"log\s?(?:\(|\s)(\d+)%\)?"),
    ("Log", "", r"log"),
];

const BONUS: &[(&str, &str, &str)] = &[("Freeleech", "Freeleech", r"freeleech")];

const CHANNELS: &[(&str, &str, &str)] = &[
    ("7.1", "", r"7\.1(?:[\-._ ]?audios)?"),
    ("6.1", "", r"6\.1(?:[\-._ ]?audios)?"),
    ("6.0", "", r"6\.0(?:[\-._ ]?audios)?"),
    ("5.1", "", r"5\.1(?:[\-._ ]?audios)?"),
    ("5.0", "", r"5\.0(?:[\-._ ]?audios)?"),
    ("4.1", "", r"4\.1(?:[\-._ ]?audios)?"),
    ("4.0", "", r"4\.0(?:[\-._ ]?audios)?"),
    ("3.1", "", r"3\.1(?:[\-._ ]?audios)?"),
    ("3.0", "", r"3\.0(?:[\-._ ]?audios)?"),
    ("2.1", "", r"2\.1(?:[\-._ ]?audios)?"),
    ("2.0", "", r"2\.0(?:[\-._ ]?audios)?"),
    ("1.0", "", r"1\.0(?:[\-._ ]?audios)?"),
];

const CODECS: &[(&str, &str, &str)] = &[
    ("DiVX.SBC", "DivX SBC", r"(?:divx[\-._ ]?)?sbc"),
    ("x264.HQ", "x264 (HQ)", r"x[\-._ ]?264[\-._ ]?hq"),
    ("MPEG-2", "", r"mpe?g(?:[\-._ ]?2)?"),
    ("H.265", "", r"h[\-._ ]?265"),
    ("H.264", "", r"h[\-._ ]?264"),
    ("H.263", "", r"h[\-._ ]?263"),
    ("H.262", "", r"h[\-._ ]?2[26]2"),
    ("H.261", "", r"h[\-._ ]?261"),
    ("dxva", "Direct-X Video Acceleration", ""),
    ("HEVC", "High Efficiency Video Coding", ""),
    ("VC-1", "", r"vc[\-._ ]?1"),
    ("x265", "", r"x[\-._ ]?265"),
    ("x264", "", r"x[\-._ ]?264"),
    ("XViD", "Xvid", ""),
    ("AVC", "Advanced Video Coding", r"avc(?:[\-._ ]?1)?"),
    ("VP9", "", r"vp[\-._ ]?9"),
    ("VP8", "", r"vp[\-._ ]?8"),
    ("VP7", "", r"vp[\-._ ]?7"),
];

const CONTAINER: &[(&str, &str, &str)] = &[
    ("avi", "Audio Video Interleave (avi)", ""),
    ("img", "IMG", ""),
    ("iso", "ISO", r"\biso\b"),
    ("mkv", "Matroska (mkv)", ""),
    ("mov", "MOV", ""),
    ("mp4", "MP4", ""),
    ("mpg", "MPEG", r"mpe?g"),
    ("m2ts", "BluRay Disc (m2ts)", ""),
    ("vob", "VOB", ""),
];

const HDR: &[(&str, &str, &str)] = &[
    (
        "HDR10+",
        "High Dynamic Range (10-bit+)",
        r"hdr[\-.]?10\+|10\+[\-.]?bit|hdr10plus|hi10p",
    ),
    (
        "HDR10",
        "High Dynamic Range (10-bit)",
        r"hdr[\-.]?10|10[\-.]?bit|hi10",
    ),
    ("HDR+", "High Dynamic Range+", r"hdr\+"),
    ("HDR", "High Dynamic Range", ""),
    ("SDR", "Standard Dynamic Range", ""),
    ("DV", "Dolby Vision", r"dolby[\-._ ]vision|dovi|dv\b"),
];

const OTHER: &[(&str, &str, &str)] = &[
    ("HYBRID", "Hybrid", ""),
    ("REMUX", "Remux", ""),
    ("REREPACK", "Rerepack", r"rerepack(?:ed)?"),
    ("REPACK", "Repack", r"repack(?:ed)?"),
];

const ORIGIN: &[(&str, &str, &str)] = &[
    ("P2P", "P2P", ""),
    ("Scene", "Scene", ""),
    ("O-Scene", "O-Scene", ""),
    ("Internal", "Internal", ""),
    ("User", "User", ""),
];

const SOURCE: &[(&str, &str, &str)] = &[
    (
        "UHD.BDRiP",
        "Ultra High-Definition BluRay (rip)",
        r"uhd[\-._ ]?(?:bd)?rip",
    ),
    (
        "UHD.BluRay",
        "Ultra High-Definition BluRay",
        r"uhd[\-._ ]?(?:blu[\-._ ]?ray|bd)",
    ),
    ("Cassette", "Cassette", ""),
    ("CD", "Compact Disc", r"cd[\-._ ]?(?:album)?"),
    ("BDRiP", "BluRay (rip)", r"b[dr]?[\-._ ]?rip"),
    ("BDSCR", "BluRay (screener)", r"b[dr][\-._ ]?scr(?:eener)?"),
    ("BluRay3D", "", r"blu[\-._ ]?ray[\-._ ]?3d|bd3d"),
    ("BluRayRiP", "BluRay (rip)", ""),
    ("BluRay", "", r"blu[\-._ ]?ray|bd"),
    ("BRDRip", "BluRay Disc (rip)", ""),
    ("DAT", "Datacable", r"(?-i:DAT)"),
    ("DVBRiP", "Digital Video Broadcasting (rip)", r"dvb[\-._ ]?rip"),
    ("DVDA", "Audio DVD", ""),
    ("DVDRiP", "Digital Video Disc (rip)", r"dvd[\-._ ]?rip"),
    (
        "DVDSCRRiP",
        "Digital Video Disc (screener rip)",
        r"(?:dvd[\-._ ]?)?scr(?:eener)?[\-._ ]?rip",
    ),
    (
        "DVDSCR",
        "Digital Video Disc (screener)",
        r"(?:dvd[\-._ ]?)?scr(?:eener)?",
    ),
    ("DVDS", "Digital Video Disc (single)", r"dvds(?:ingle)?"),
    ("DVD", "Digital Video Disc", r"dvd"),
    ("SACD", "Super Audio Compact Disc", ""),
    ("RADIO", "Radio", r"(?-i:R[aA]D[iI][oO])"),
    ("SATRiP", "Satellite (rip)", r"sat[\-._ ]?rip"),
    ("SAT", "Satellite Radio", r"(?-i:SAT)"),
    ("SBD", "Soundboard", r"(?-i:SBD|DAB|Soundboard)"),
    ("UHDTV", "Ultra High-Definition TV", ""),
    ("UMDMOVIE", "Universal Media Disc Movie", ""),
    ("Vinyl", "Vinyl", r"vinyl|vl"),
    ("WEB-DL", "Web (DL)", r"web[\-._ ]?dl"),
    ("WEB-HD", "Web (HD)", r"web[\-._ ]?hd"),
    ("WEBFLAC", "Web (FLAC)", ""),
    ("WebHDRiP", "Web (HD rip)", ""),
    ("WEBRiP", "Web (rip)", r"web[\-._ ]?rip"),
    ("WEBSCR", "Web (screener)", r"web[\-._ ]?scr(?:eener)?"),
    ("WebUHD", "Web (UHD)", ""),
    ("WEB", "Web", ""),
];

const RESOLUTION: &[(&str, &str, &str)] = &[
    (
        "PN",
        "Selector",
        r"p(?:al)?[\-._ ]?n(?:tsc)?[\-._ ]selector",
    ),
    ("DCI4K", "DCI 4k", r"dci[\-._ ]?4k|4096x2160"),
    ("DCI2K", "DCI 2k", r"dci[\-._ ]?2k|2048x1080"),
    ("4320p", "UltraHD 8K (4320p)", r"4320p|7680x4320"),
    ("2880p", "5k (2880p)", r"2880p|5k|5120x2880"),
    ("2160p", "UltraHD 4K (2160p)", r"2160p|3840x2160|uhd|4k"),
    ("1800p", "QHD+ (1800p)", r"1800p|3200x1800"),
    ("1440p", "QHD (1440p)", r"1440p|2560x1440"),
    ("1080p", "FullHD (1080p)", r"1080[ip]|1920x1080"),
    ("900p", "900[ip]|1600x900", r"900[ip]|1600x900"),
    ("720p", "HD (720p)", r"720[ip]|1280x720"),
    ("576p", "PAL (576p)", r"576[ip]|720x576|pal"),
    ("540p", "qHD (540p)", r"540[ip]|960x540"),
    ("480p", "NTSC (480p)", r"480[ip]|720x480|848x480|854x480|ntsc"),
    ("360p", "nHD (360p)", r"360[ip]|640x360"),
    ("$1p", "Other ($1p)", r"([123]\d{3})p"),
];

/// How a matched entry turns into a canonical tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagKind {
    Plain,
    /// `$1` in the tag is replaced by the first capture group.
    Capture,
    /// Log score entry; produces `Log{score}` and never claims its span.
    LogScore,
}

/// One dictionary entry.
#[derive(Debug, Clone)]
pub struct TagInfo {
    tag: &'static str,
    title: &'static str,
    pattern: String,
    kind: TagKind,
    re: Regex,
    bounded: Regex,
}

impl TagInfo {
    fn compile(category: TagCategory, tag: &'static str, title: &'static str, raw: &str) -> Option<Self> {
        let pattern = if raw.is_empty() {
            regex::escape(tag)
        } else {
            raw.to_string()
        };
        let kind = if tag == "LogScore" {
            TagKind::LogScore
        } else if tag.contains("$1") {
            TagKind::Capture
        } else {
            TagKind::Plain
        };

        let boundary = category.boundary_class();
        let re = Regex::new(&format!("(?i)(?:{})", pattern));
        let bounded = Regex::new(&format!(
            "(?i)(?:^|{b})(?P<tag>{p})(?:$|{b})",
            b = boundary,
            p = pattern
        ));

        match (re, bounded) {
            (Ok(re), Ok(bounded)) => Some(Self {
                tag,
                title,
                pattern,
                kind,
                re,
                bounded,
            }),
            (Err(e), _) | (_, Err(e)) => {
                tracing::error!(category = %category, tag, error = %e, "invalid tag pattern");
                None
            }
        }
    }

    /// Canonical tag as declared (before capture expansion).
    pub fn tag(&self) -> &str {
        self.tag
    }

    /// Human readable title, empty when none is declared.
    pub fn title(&self) -> &str {
        self.title
    }

    /// Regex source used for this entry.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Case-insensitive containment match.
    pub fn is_match(&self, text: &str) -> bool {
        self.re.is_match(text)
    }

    /// Canonical tag for a match found in `text`, expanding captures.
    fn expand(&self, text: &str) -> Option<String> {
        match self.kind {
            TagKind::Plain => Some(self.tag.to_string()),
            TagKind::Capture => {
                let caps = self.re.captures(text)?;
                let first = caps.get(1)?.as_str();
                Some(self.tag.replace("$1", first))
            }
            TagKind::LogScore => log_score(&self.re, text).map(|score| format!("Log{}", score)),
        }
    }

    fn find(&self, text: &str, mode: ScanMode) -> Option<Range<usize>> {
        match mode {
            ScanMode::Contains => self.re.find(text).map(|m| m.range()),
            ScanMode::Bounded => self
                .bounded
                .captures(text)
                .and_then(|caps| caps.name("tag"))
                .map(|m| m.range()),
        }
    }
}

fn log_score(re: &Regex, text: &str) -> Option<u32> {
    re.captures(text)?.get(1)?.as_str().parse().ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanMode {
    /// Unanchored containment, used for pre-delimited tracker tag strings.
    Contains,
    /// Requires a boundary on both sides, used for free-text titles.
    Bounded,
}

/// A classified tag together with the span it matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagMatch {
    /// Canonical tag.
    pub tag: String,
    /// Byte span in the scanned text.
    pub span: Range<usize>,
}

/// Compiled tag tables for every [`TagCategory`].
#[derive(Debug, Clone)]
pub struct TagDictionary {
    tables: HashMap<TagCategory, Vec<TagInfo>>,
}

static GLOBAL: OnceLock<TagDictionary> = OnceLock::new();

impl TagDictionary {
    /// Compile every table.
    pub fn new() -> Self {
        let tables = TagCategory::ALL
            .iter()
            .map(|&category| {
                let infos = category
                    .table()
                    .iter()
                    .filter_map(|&(tag, title, raw)| TagInfo::compile(category, tag, title, raw))
                    .collect();
                (category, infos)
            })
            .collect();

        Self { tables }
    }

    /// Process-wide dictionary, compiled on first use.
    pub fn global() -> &'static TagDictionary {
        GLOBAL.get_or_init(TagDictionary::new)
    }

    /// Entries of a category in declaration order.
    pub fn infos(&self, category: TagCategory) -> &[TagInfo] {
        self.tables
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// First entry of `category` contained in `text`, as a canonical tag.
    pub fn classify(&self, category: TagCategory, text: &str) -> Option<String> {
        self.infos(category)
            .iter()
            .filter(|info| info.is_match(text))
            .find_map(|info| info.expand(text))
    }

    /// Classify discrete tokens; the first token that satisfies the category wins.
    pub fn classify_tokens<S: AsRef<str>>(&self, category: TagCategory, tokens: &[S]) -> Option<String> {
        tokens
            .iter()
            .find_map(|token| self.classify(category, token.as_ref()))
    }

    /// Every non-overlapping entry contained in `text`, in declaration order.
    pub fn classify_all(&self, category: TagCategory, text: &str) -> Vec<String> {
        self.collect(category, text, ScanMode::Contains)
            .into_iter()
            .map(|m| m.tag)
            .collect()
    }

    /// Scan a free-text title. Matches need a boundary on both sides and
    /// later entries never claim text already claimed by an earlier one.
    pub fn scan(&self, category: TagCategory, text: &str) -> Vec<TagMatch> {
        self.collect(category, text, ScanMode::Bounded)
    }

    /// First match of [`scan`](Self::scan).
    pub fn scan_first(&self, category: TagCategory, text: &str) -> Option<TagMatch> {
        self.infos(category).iter().find_map(|info| {
            let span = info.find(text, ScanMode::Bounded)?;
            let tag = info.expand(&text[span.clone()])?;
            Some(TagMatch { tag, span })
        })
    }

    fn collect(&self, category: TagCategory, text: &str, mode: ScanMode) -> Vec<TagMatch> {
        let mut claimed: Vec<Range<usize>> = Vec::new();
        let mut found: Vec<TagMatch> = Vec::new();

        for info in self.infos(category) {
            let Some(span) = info.find(text, mode) else {
                continue;
            };
            if info.kind != TagKind::LogScore
                && claimed
                    .iter()
                    .any(|c| c.start < span.end && span.start < c.end)
            {
                continue;
            }
            let Some(tag) = info.expand(&text[span.clone()]) else {
                continue;
            };
            if info.kind != TagKind::LogScore {
                claimed.push(span.clone());
            }
            if !found.iter().any(|m| m.tag == tag) {
                found.push(TagMatch { tag, span });
            }
        }

        found
    }

    /// Log score (`Log 100%`, `log (95%)`) contained in `text`.
    pub fn log_score(&self, text: &str) -> Option<u32> {
        self.infos(TagCategory::AudioExtra)
            .iter()
            .find(|info| info.kind == TagKind::LogScore)
            .and_then(|info| log_score(&info.re, text))
    }
}

impl Default for TagDictionary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict() -> &'static TagDictionary {
        TagDictionary::global()
    }

    #[test]
    fn test_all_patterns_compile() {
        for category in TagCategory::ALL {
            assert_eq!(
                dict().infos(category).len(),
                category.table().len(),
                "category {} lost entries",
                category
            );
        }
    }

    #[test]
    fn test_classify_prefers_specific_audio() {
        assert_eq!(
            dict().classify(TagCategory::AudioFormat, "DTS-HD.MA"),
            Some("DTS-HD.MA".to_string())
        );
        assert_eq!(
            dict().classify(TagCategory::AudioFormat, "DTS-HD"),
            Some("DTS-HD".to_string())
        );
        assert_eq!(
            dict().classify(TagCategory::AudioFormat, "DTS"),
            Some("DTS".to_string())
        );
    }

    #[test]
    fn test_classify_bitrate_order() {
        assert_eq!(
            dict().classify(TagCategory::AudioBitrate, "24bit Lossless"),
            Some("24BIT Lossless".to_string())
        );
        assert_eq!(
            dict().classify(TagCategory::AudioBitrate, "Lossless"),
            Some("Lossless".to_string())
        );
        assert_eq!(
            dict().classify(TagCategory::AudioBitrate, "320"),
            Some("320".to_string())
        );
    }

    #[test]
    fn test_classify_resolution_capture() {
        assert_eq!(
            dict().classify(TagCategory::Resolution, "1920x1080"),
            Some("1080p".to_string())
        );
        assert_eq!(
            dict().classify(TagCategory::Resolution, "1280p"),
            Some("1280p".to_string())
        );
    }

    #[test]
    fn test_classify_tokens_first_wins() {
        let tokens = ["MKV", "H.264", "WEB-DL", "1080p", "Internal"];
        assert_eq!(
            dict().classify_tokens(TagCategory::Source, &tokens),
            Some("WEB-DL".to_string())
        );
        assert_eq!(
            dict().classify_tokens(TagCategory::Codecs, &tokens),
            Some("H.264".to_string())
        );
        assert_eq!(
            dict().classify_tokens(TagCategory::Origin, &tokens),
            Some("Internal".to_string())
        );
    }

    #[test]
    fn test_classify_all_audio_with_log_score() {
        let audio = dict().classify_all(TagCategory::Audio, "FLAC Lossless Log 100% Cue CD");
        assert_eq!(audio, vec!["Cue", "FLAC", "Lossless", "Log100", "Log"]);
    }

    #[test]
    fn test_classify_all_does_not_split_longer_tags() {
        let audio = dict().classify_all(TagCategory::Audio, "DTS-HD MA 7.1");
        assert_eq!(audio, vec!["DTS-HD.MA"]);
    }

    #[test]
    fn test_scan_requires_boundaries() {
        assert!(dict().scan(TagCategory::Container, "That Movie 2020").is_empty());
        assert_eq!(
            dict()
                .scan_first(TagCategory::Container, "Show.S01E01.720p.mkv")
                .map(|m| m.tag),
            Some("mkv".to_string())
        );
    }

    #[test]
    fn test_scan_channels_after_codec() {
        let found = dict().scan_first(TagCategory::Channels, "Movie 2020 BluRay DD5.1 x264");
        assert_eq!(found.map(|m| m.tag), Some("5.1".to_string()));
    }

    #[test]
    fn test_scan_hdr_list() {
        let hdr: Vec<String> = dict()
            .scan(TagCategory::Hdr, "Movie.2160p.WEB-DL.DV.HDR10.H.265-GRP")
            .into_iter()
            .map(|m| m.tag)
            .collect();
        assert_eq!(hdr, vec!["HDR10", "DV"]);
    }

    #[test]
    fn test_log_score() {
        assert_eq!(dict().log_score("FLAC Log (95%) Cue"), Some(95));
        assert_eq!(dict().log_score("FLAC Log 100% Cue"), Some(100));
        assert_eq!(dict().log_score("FLAC Cue"), None);
    }
}
