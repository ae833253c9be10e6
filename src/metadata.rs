//! Metadata tag builder
//!
//! Collects text and picture frames for the ID3v2.3 header written at the
//! start of the stream, applies the cover and album fallbacks, and renders
//! the optional 128-byte ID3v1.1 trailer.
//!
//! Keys resolve to frame identifiers through a fixed table. Keys without an
//! entry (track total, disc total, comment) are accepted and ignored.

use std::collections::HashMap;
use std::path::Path;

use id3::frame::{Content, Picture};
use id3::{Frame, Tag, Version};
use lazy_static::lazy_static;

pub use id3::frame::PictureType;

/// File looked up in the session directory when no picture was set
pub const COVER_FILE_NAME: &str = "cover.jpg";

/// Length of the ID3v1 trailer
pub const LEGACY_TAG_LEN: usize = 128;

/// Standardized metadata keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataKey {
    Title,
    Artist,
    Album,
    Genre,
    Date,
    Composer,
    Performer,
    Copyright,
    EncodedBy,
    Organization,
    Conductor,
    AlbumArtist,
    Encoder,
    TrackLength,
    TrackNumber,
    TrackTotal,
    DiscNumber,
    DiscTotal,
    Comment,
}

lazy_static! {
    static ref FRAME_IDS: HashMap<MetadataKey, &'static str> = {
        use MetadataKey::*;
        [
            (Title, "TIT2"),
            (Artist, "TPE1"),
            (Album, "TALB"),
            (Genre, "TCON"),
            (Date, "TYER"),
            (Composer, "TCOM"),
            (Performer, "TOPE"),
            (Copyright, "TCOP"),
            (EncodedBy, "TENC"),
            (Organization, "TPUB"),
            (Conductor, "TPE3"),
            (AlbumArtist, "TPE2"),
            (Encoder, "TSSE"),
            (TrackLength, "TLEN"),
            (TrackNumber, "TRCK"),
            (DiscNumber, "TPOS"),
        ]
        .into_iter()
        .collect()
    };
}

impl MetadataKey {
    /// ID3v2.3 frame identifier, `None` for reserved keys
    pub fn frame_id(self) -> Option<&'static str> {
        FRAME_IDS.get(&self).copied()
    }
}

/// Text frame with its values in insertion order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFrame {
    pub id: &'static str,
    pub values: Vec<String>,
}

/// Attached picture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PictureFrame {
    pub mime_type: String,
    pub picture_type: PictureType,
    pub description: String,
    pub data: Vec<u8>,
}

/// Frame collection for one stream
#[derive(Debug, Clone, Default)]
pub struct TagBuilder {
    text: Vec<TextFrame>,
    pictures: Vec<PictureFrame>,
}

impl TagBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value` to the frame `key` maps to
    ///
    /// Empty values and keys without a frame identifier are ignored.
    pub fn set_text(&mut self, key: MetadataKey, value: &str) {
        if value.is_empty() {
            return;
        }
        let Some(id) = key.frame_id() else {
            log::debug!("ignoring {:?}: no frame for this key", key);
            return;
        };

        match self.text.iter_mut().find(|frame| frame.id == id) {
            Some(frame) => frame.values.push(value.to_string()),
            None => self.text.push(TextFrame {
                id,
                values: vec![value.to_string()],
            }),
        }
    }

    /// Add a picture frame; existing pictures are kept
    pub fn set_picture(
        &mut self,
        mime_type: &str,
        picture_type: PictureType,
        description: &str,
        data: Vec<u8>,
    ) {
        self.pictures.push(PictureFrame {
            mime_type: mime_type.to_string(),
            picture_type,
            description: description.to_string(),
            data,
        });
    }

    /// Values recorded for `key`, empty if none
    pub fn text_values(&self, key: MetadataKey) -> &[String] {
        key.frame_id()
            .and_then(|id| self.text.iter().find(|frame| frame.id == id))
            .map_or(&[][..], |frame| frame.values.as_slice())
    }

    pub fn text_frames(&self) -> &[TextFrame] {
        &self.text
    }

    pub fn pictures(&self) -> &[PictureFrame] {
        &self.pictures
    }

    pub fn has_picture(&self) -> bool {
        !self.pictures.is_empty()
    }

    /// Fill in cover art from `dir` and the album from the title
    pub fn apply_fallbacks(&mut self, dir: &Path) {
        if !self.has_picture() {
            if let Some(data) = read_cover(dir) {
                log::debug!("using {} from {}", COVER_FILE_NAME, dir.display());
                self.set_picture("image/jpeg", PictureType::CoverFront, "", data);
            }
        }

        if self.text_values(MetadataKey::Album).is_empty() {
            if let Some(title) = self.text_values(MetadataKey::Title).first().cloned() {
                self.set_text(MetadataKey::Album, &title);
            }
        }
    }

    /// Serialize as an ID3v2.3 tag
    ///
    /// Every stored frame is written, including several pictures of the
    /// same type; `TagLike::add_frame` would keep only the last of those.
    pub fn render(&self) -> Result<Vec<u8>, id3::Error> {
        let text = self.text.iter().map(|frame| {
            Frame::with_content(frame.id, Content::Text(frame.values.join("\0")))
        });
        let pictures = self.pictures.iter().map(|picture| {
            Frame::with_content(
                "APIC",
                Content::Picture(Picture {
                    mime_type: picture.mime_type.clone(),
                    picture_type: picture.picture_type,
                    description: picture.description.clone(),
                    data: picture.data.clone(),
                }),
            )
        });

        let mut tag = Tag::with_version(Version::Id3v23);
        tag.extend(text.chain(pictures));

        let mut bytes = Vec::new();
        tag.write_to(&mut bytes, Version::Id3v23)?;
        Ok(bytes)
    }

    /// Serialize the ID3v1.1 trailer from the first value of each field
    pub fn render_legacy(&self) -> [u8; LEGACY_TAG_LEN] {
        let mut tag = [0u8; LEGACY_TAG_LEN];
        tag[..3].copy_from_slice(b"TAG");

        let first = |key: MetadataKey| self.text_values(key).first().map_or("", String::as_str);
        write_latin1(&mut tag[3..33], first(MetadataKey::Title));
        write_latin1(&mut tag[33..63], first(MetadataKey::Artist));
        write_latin1(&mut tag[63..93], first(MetadataKey::Album));
        write_latin1(&mut tag[93..97], first(MetadataKey::Date));
        // 97..125 comment, 125 zero marks v1.1
        tag[126] = first(MetadataKey::TrackNumber)
            .split('/')
            .next()
            .and_then(|n| n.trim().parse::<u8>().ok())
            .unwrap_or(0);
        tag[127] = 0xff;
        tag
    }
}

/// Contents of the cover file in `dir`, if readable
pub fn read_cover(dir: &Path) -> Option<Vec<u8>> {
    std::fs::read(dir.join(COVER_FILE_NAME)).ok()
}

/// Copy `text` as Latin-1 into `field`, truncating and zero-padding
fn write_latin1(field: &mut [u8], text: &str) {
    for (slot, c) in field.iter_mut().zip(text.chars()) {
        *slot = u8::try_from(u32::from(c)).unwrap_or(b'?');
    }
}
