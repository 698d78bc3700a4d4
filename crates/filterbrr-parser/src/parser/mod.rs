//! Release name parsing.
//!
//! The name is tokenized once with the Logos lexer. Season/episode markers,
//! dates and years are read from the token stream, quality tags from the tag
//! dictionary, and the title is whatever precedes the first of them.

pub(crate) mod episode;
pub(crate) mod metadata;
pub(crate) mod quality;
pub(crate) mod title;

use filterbrr_common::ReleaseType;

use crate::config::ParserConfig;
use crate::lexer::Lexer;
use crate::model::Release;
use crate::release_tags::{parse_release_tags, ReleaseTags};
use crate::tags::{TagCategory, TagDictionary};

/// Parse `name` (and `release.release_tags`) into `release`.
///
/// Title, season, episode, year and group that are already set (for example
/// from announce variables) are kept. Classification fields are replaced by
/// what the name yields, then tag-string values are applied on top: scalar
/// tag-string values win, lists are merged without duplicates. Running this
/// twice on the same release leaves it unchanged.
pub fn parse_into(release: &mut Release, name: &str, dict: &TagDictionary, config: &ParserConfig) {
    release.normalized = title::normalize(name);

    let lexer = Lexer::new(name);
    let (leading_group, title_start) = match metadata::leading_group(name) {
        Some((group, end)) => (Some(group), end),
        None => (None, 0),
    };

    let episode = episode::extract(&lexer);
    let date = metadata::extract_date(&lexer);
    let resolution_start = dict
        .scan(TagCategory::Resolution, name)
        .into_iter()
        .map(|m| m.span.start)
        .filter(|&start| start > title_start)
        .min();
    let year = match &date {
        Some(date) => Some((date.year, date.span.clone())),
        None => metadata::extract_year(&lexer, title_start, episode.start, resolution_start, config),
    };

    // A trailing file extension is not a title marker.
    let extension = metadata::extension_start(name).filter(|&pos| pos > title_start);
    let cutoff = [episode.start, year.as_ref().map(|(_, span)| span.start)]
        .into_iter()
        .flatten()
        .filter(|&pos| pos >= title_start)
        .min()
        .or_else(|| quality::first_marker(dict, &name[..extension.unwrap_or(name.len())], title_start));

    // Without any marker only dotted scene names can carry a trailing group,
    // so "Spider-Man" keeps its hyphen.
    let group_floor = cutoff.or_else(|| {
        (!name.contains(' ') && name[title_start..].contains(['.', '_'])).then_some(title_start)
    });
    let trailing_group = group_floor.and_then(|floor| metadata::extract_group(dict, name, floor));
    let quality_end = trailing_group
        .as_ref()
        .map_or(name.len(), |(_, span)| span.start);

    let quality_start = cutoff.or(extension);
    let quality = match quality_start {
        Some(c) => {
            let mut region = name[c..].to_string();
            if let Some((group, span)) = trailing_group.as_ref().filter(|(_, span)| span.start >= c) {
                let start = span.start - c;
                let end = start + 1 + group.len();
                region.replace_range(start..end, &" ".repeat(end - start));
            }
            quality::extract(dict, &region)
        }
        None => quality::Quality::default(),
    };
    let extras = metadata::extract_extras(&lexer, cutoff.unwrap_or(name.len())..quality_end);
    let tags = parse_release_tags(dict, &release.release_tags);

    let title_end = quality_start.map_or(quality_end, |c| c.min(quality_end));
    let raw_title = &name[title_start..title_end.max(title_start)];
    let mut parsed_title = title::clean(raw_title, name.contains(' '));

    let no_episode = episode.season == 0 && episode.episode == 0 && date.is_none();
    let tags_are_music = quality::is_music_format(&tags.audio_format)
        && tags.resolution.is_empty()
        && tags.codec.is_empty();
    let is_music = config.detect_music
        && no_episode
        && !quality.is_video()
        && (quality::is_music_format(&quality.audio_format)
            || tags_are_music
            || (parsed_title.contains(" - ") && year.is_some()));

    let mut artists = String::new();
    if is_music {
        if let Some((a, t)) = title::split_music(&parsed_title) {
            artists = a;
            parsed_title = t;
        }
    }

    let group = if is_music {
        None
    } else {
        trailing_group.map(|(g, _)| g).or(leading_group)
    };

    tracing::trace!(
        name,
        title = %parsed_title,
        season = episode.season,
        episode = episode.episode,
        music = is_music,
        "parsed release name"
    );

    // Identity fields are only filled when empty.
    if release.title.is_empty() {
        release.title = parsed_title;
    }
    if release.season == 0 {
        release.season = episode.season;
    }
    if release.episode == 0 {
        release.episode = episode.episode;
    }
    if release.year == 0 {
        if let Some((year, _)) = year {
            release.year = year;
        }
    }
    if let Some(date) = date {
        if release.month == 0 {
            release.month = date.month;
        }
        if release.day == 0 {
            release.day = date.day;
        }
    }
    if release.group.is_empty() {
        if let Some(group) = group {
            release.group = group;
        }
    }
    if !artists.is_empty() {
        release.artists = artists;
    }

    replace_if_set(&mut release.resolution, quality.resolution);
    replace_if_set(&mut release.source, quality.source);
    replace_if_set(&mut release.container, quality.container);
    replace_if_set(&mut release.audio_channels, quality.channels);
    replace_if_set(&mut release.region, extras.region);
    replace_if_set(&mut release.website, extras.website);
    if is_music {
        replace_if_set(&mut release.audio_format, quality.audio_format);
        replace_if_set(&mut release.bitrate, quality.bitrate);
    }
    replace_list_if_set(&mut release.codec, quality.codec);
    replace_list_if_set(&mut release.hdr, quality.hdr);
    replace_list_if_set(&mut release.audio, quality.audio);
    replace_list_if_set(&mut release.other, quality.other);
    replace_list_if_set(&mut release.language, extras.language);

    release.proper |= extras.proper;
    release.repack |= extras.repack;
    if let Some(score) = quality.log_score {
        release.has_log = true;
        release.log_score = score as i32;
    }

    merge_release_tags(release, tags);

    release.repack |= release
        .other
        .iter()
        .any(|o| o == "REPACK" || o == "REREPACK");
    release.has_log |= release.has_audio("Log");
    release.has_cue |= release.has_audio("Cue");
    release.release_type = release_type(release, is_music);
}

fn replace_if_set(field: &mut String, value: String) {
    if !value.is_empty() {
        *field = value;
    }
}

fn replace_list_if_set(field: &mut Vec<String>, values: Vec<String>) {
    if !values.is_empty() {
        *field = values;
    }
}

fn merge_unique(field: &mut Vec<String>, values: Vec<String>) {
    for value in values {
        if !field.contains(&value) {
            field.push(value);
        }
    }
}

/// Apply a classified tag string to a release.
pub fn merge_release_tags(release: &mut Release, tags: ReleaseTags) {
    replace_if_set(&mut release.resolution, tags.resolution);
    replace_if_set(&mut release.source, tags.source);
    replace_if_set(&mut release.container, tags.container);
    replace_if_set(&mut release.audio_channels, tags.channels);
    replace_if_set(&mut release.audio_format, tags.audio_format);
    replace_if_set(&mut release.bitrate, tags.audio_bitrate);
    if release.origin.is_empty() {
        release.origin = tags.origin;
    }
    if !tags.codec.is_empty() {
        merge_unique(&mut release.codec, vec![tags.codec]);
    }

    if tags.bonus.iter().any(|b| b == "Freeleech") {
        release.freeleech = true;
    }
    merge_unique(&mut release.audio, tags.audio);
    merge_unique(&mut release.bonus, tags.bonus);
    merge_unique(&mut release.hdr, tags.hdr);
    merge_unique(&mut release.other, tags.other);

    if tags.has_log {
        release.has_log = true;
        if tags.log_score > 0 {
            release.log_score = tags.log_score;
        }
    }
    release.has_cue |= tags.has_cue;
}

fn release_type(release: &Release, is_music: bool) -> ReleaseType {
    if release.episode > 0 || (release.month > 0 && release.day > 0) {
        ReleaseType::Episode
    } else if release.season > 0 {
        ReleaseType::Season
    } else if !release.has_video_markers()
        && (is_music
            || !release.artists.is_empty()
            || quality::is_music_format(&release.audio_format))
    {
        ReleaseType::Album
    } else if release.has_video_markers() || release.year > 0 || !release.source.is_empty() {
        ReleaseType::Movie
    } else {
        ReleaseType::Unknown
    }
}
