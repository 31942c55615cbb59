//! Caption extraction from watch pages and timed-text XML.

use crate::youtube::CaptionTrack;
use regex::Regex;
use std::sync::LazyLock;

static TEXT_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<text[^>]*>(.*?)</text>").expect("TEXT_SEGMENT regex should compile")
});

const CAPTION_TRACKS_KEY: &str = "\"captionTracks\":";

/// Finds the caption tracks embedded in a watch page.
pub fn caption_tracks(html: &str) -> Result<Vec<CaptionTrack>, String> {
    let start = html
        .find(CAPTION_TRACKS_KEY)
        .ok_or_else(|| "no captions on watch page".to_string())?;
    let rest = &html[start + CAPTION_TRACKS_KEY.len()..];

    let mut stream = serde_json::Deserializer::from_str(rest).into_iter::<Vec<CaptionTrack>>();
    match stream.next() {
        Some(Ok(tracks)) if !tracks.is_empty() => Ok(tracks),
        Some(Ok(_)) => Err("caption track list is empty".to_string()),
        Some(Err(e)) => Err(format!("malformed caption track list: {}", e)),
        None => Err("caption track list is missing".to_string()),
    }
}

/// Picks the English track, falling back to the first one.
pub fn preferred_track<'a>(tracks: &'a [CaptionTrack], language: &str) -> Option<&'a CaptionTrack> {
    tracks
        .iter()
        .find(|track| track.language_code == language)
        .or_else(|| tracks.first())
}

/// Joins the text segments of a timed-text document into plain text.
///
/// Segments are separated by spaces, entities decoded and newlines removed.
pub fn transcript_text(xml: &str) -> String {
    let segments: Vec<String> = TEXT_SEGMENT
        .captures_iter(xml)
        .filter_map(|caps| caps.get(1))
        .map(|m| decode_entities(m.as_str()))
        .collect();
    segments.join(" ").replace('\n', "")
}

fn decode_entities(text: &str) -> String {
    // Captions are double-encoded, so `&amp;` goes first.
    text.replace("&amp;", "&")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
}
