//! Entry metadata as exchanged with the store.
//!
//! The client never interprets metadata; it moves it verbatim between the
//! caller and the store. The JSON shape follows the proto3 JSON mapping the
//! store speaks: camelCase keys, base64 bytes, enum values by name, and
//! unset optional fields omitted.

use crate::name::{format_name, EntryKind, NameError};
use crate::Result;
use serde::{Deserialize, Serialize};

/// Encoding of an entry's picture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ImageFormat {
    Jpg,
    Png,
    Gif,
    Svg,
}

impl ImageFormat {
    pub const ALL: [ImageFormat; 4] = [Self::Jpg, Self::Png, Self::Gif, Self::Svg];

    /// File extension used when the store keeps the image on disk.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Jpg => "jpg",
            Self::Png => "png",
            Self::Gif => "gif",
            Self::Svg => "svg",
        }
    }

    /// Looks up a format by extension, ignoring ASCII case. `jpeg` is
    /// accepted as an alias of `jpg`.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        if ext.eq_ignore_ascii_case("jpeg") {
            return Some(Self::Jpg);
        }
        Self::ALL
            .into_iter()
            .find(|format| format.extension().eq_ignore_ascii_case(ext))
    }
}

/// Attributes of a single entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryMetadata {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "base64_bytes"
    )]
    pub image: Option<Vec<u8>>,
    #[serde(default, alias = "image_format", skip_serializing_if = "Option::is_none")]
    pub image_format: Option<ImageFormat>,
}

impl EntryMetadata {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_image(mut self, image: Vec<u8>, format: ImageFormat) -> Self {
        self.image = Some(image);
        self.image_format = Some(format);
        self
    }

    /// The segment name an entry with this metadata is stored under. Fails
    /// when the id or a tag cannot be encoded.
    pub fn segment_name(&self, kind: EntryKind) -> std::result::Result<String, NameError> {
        format_name(&self.id, &self.tags, kind)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match bytes {
            Some(bytes) => serializer.serialize_str(&STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded: Option<String> = Option::deserialize(deserializer)?;
        encoded
            .map(|e| STANDARD.decode(e).map_err(serde::de::Error::custom))
            .transpose()
    }
}
