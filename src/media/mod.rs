//! Background music links.
//!
//! A configured YouTube playlist or video link is turned into the matching
//! embed URL. Anything else is passed through untouched.

/// Marker preceding a playlist id.
pub const PLAYLIST_MARKER: &str = "playlist?list=";

/// Marker preceding a video id.
pub const VIDEO_MARKER: &str = "watch?v=";

const EMBED_BASE: &str = "https://www.youtube.com/embed/";

/// The kind of link a media URL was recognized as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaEmbed {
    /// A playlist, carrying its id
    Playlist(String),
    /// A single video, carrying its id
    Video(String),
    /// An unrecognized link, kept verbatim
    Passthrough(String),
}

impl MediaEmbed {
    /// Classifies `url`. The playlist marker wins when both are present.
    pub fn classify(url: &str) -> Self {
        if let Some(id) = id_after(url, PLAYLIST_MARKER) {
            Self::Playlist(id.to_string())
        } else if let Some(id) = id_after(url, VIDEO_MARKER) {
            Self::Video(id.to_string())
        } else {
            Self::Passthrough(url.to_string())
        }
    }

    /// Returns the URL to embed.
    pub fn embed_url(&self) -> String {
        match self {
            Self::Playlist(id) => format!("{}videoseries?list={}", EMBED_BASE, id),
            Self::Video(id) => format!("{}{}", EMBED_BASE, id),
            Self::Passthrough(url) => url.clone(),
        }
    }
}

/// Converts a media link to its embed URL.
///
/// Never fails; a link with a marker but no id yields an empty id.
pub fn to_embed_url(url: &str) -> String {
    MediaEmbed::classify(url).embed_url()
}

/// Returns the text between `marker` and the next `&`.
fn id_after<'a>(url: &'a str, marker: &str) -> Option<&'a str> {
    let (_, rest) = url.split_once(marker)?;
    Some(rest.split('&').next().unwrap_or_default())
}
