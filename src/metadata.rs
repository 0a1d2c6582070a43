//! Metadata preservation flags for download requests.

use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

use serde::Serialize;

use crate::constants::JPEG_MIME_TYPE;
use crate::error::{Result, TinyPngError};

/// Selection of metadata fields the service should keep in the output.
///
/// Compression normally strips EXIF/XMP data; these flags ask the service
/// to retain specific fields. Flags combine with `|`:
///
/// ```
/// use tinypng_client::PreserveMetadata;
///
/// let selection = PreserveMetadata::COPYRIGHT | PreserveMetadata::CREATION;
/// assert!(selection.contains(PreserveMetadata::COPYRIGHT));
/// ```
///
/// `CREATION` and `LOCATION` are only honored for JPEG output; requesting
/// them against any other type is rejected before a request is sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreserveMetadata {
    copyright: bool,
    creation: bool,
    location: bool,
}

impl PreserveMetadata {
    /// Preserve nothing (the default).
    pub const NONE: Self = Self {
        copyright: false,
        creation: false,
        location: false,
    };

    /// Keep copyright information. Valid for any output type.
    pub const COPYRIGHT: Self = Self {
        copyright: true,
        creation: false,
        location: false,
    };

    /// Keep the creation date. JPEG output only.
    pub const CREATION: Self = Self {
        copyright: false,
        creation: true,
        location: false,
    };

    /// Keep the GPS location. JPEG output only.
    pub const LOCATION: Self = Self {
        copyright: false,
        creation: false,
        location: true,
    };

    /// True when no flag is selected.
    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }

    /// True when every flag selected in `other` is also selected here.
    pub fn contains(&self, other: Self) -> bool {
        (self.copyright || !other.copyright)
            && (self.creation || !other.creation)
            && (self.location || !other.location)
    }

    /// Builds the preservation list, validating each flag against the
    /// output type. The list order is fixed: copyright, creation, location.
    pub fn preserve_list(&self, output_type: &str) -> Result<Vec<&'static str>> {
        let mut preserve = Vec::new();

        if self.copyright {
            preserve.push("copyright");
        }
        if self.creation {
            if output_type != JPEG_MIME_TYPE {
                return Err(TinyPngError::MetadataNotSupported {
                    flag: "creation",
                    required: JPEG_MIME_TYPE,
                    actual: output_type.to_string(),
                });
            }
            preserve.push("creation");
        }
        if self.location {
            if output_type != JPEG_MIME_TYPE {
                return Err(TinyPngError::MetadataNotSupported {
                    flag: "location",
                    required: JPEG_MIME_TYPE,
                    actual: output_type.to_string(),
                });
            }
            preserve.push("location");
        }

        Ok(preserve)
    }

    /// Serializes the optional request body: `None` when nothing is
    /// selected, otherwise `{"preserve":[...]}`.
    pub fn preserve_body(&self, output_type: &str) -> Result<Option<String>> {
        if self.is_none() {
            return Ok(None);
        }
        let body = PreserveBody {
            preserve: self.preserve_list(output_type)?,
        };
        Ok(Some(serde_json::to_string(&body)?))
    }
}

#[derive(Serialize)]
struct PreserveBody {
    preserve: Vec<&'static str>,
}

impl BitOr for PreserveMetadata {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self {
            copyright: self.copyright || rhs.copyright,
            creation: self.creation || rhs.creation,
            location: self.location || rhs.location,
        }
    }
}

impl BitOrAssign for PreserveMetadata {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

impl FromStr for PreserveMetadata {
    type Err = TinyPngError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::NONE),
            "copyright" => Ok(Self::COPYRIGHT),
            "creation" => Ok(Self::CREATION),
            "location" => Ok(Self::LOCATION),
            other => Err(TinyPngError::UnknownMetadataFlag(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_none() {
        assert!(PreserveMetadata::default().is_none());
        assert!(PreserveMetadata::NONE.is_none());
        assert!(!PreserveMetadata::COPYRIGHT.is_none());
    }

    #[test]
    fn union_combines_flags() {
        let selection = PreserveMetadata::COPYRIGHT | PreserveMetadata::LOCATION;
        assert!(selection.contains(PreserveMetadata::COPYRIGHT));
        assert!(selection.contains(PreserveMetadata::LOCATION));
        assert!(!selection.contains(PreserveMetadata::CREATION));
    }

    #[test]
    fn union_assign() {
        let mut selection = PreserveMetadata::NONE;
        selection |= PreserveMetadata::CREATION;
        assert!(selection.contains(PreserveMetadata::CREATION));
    }

    #[test]
    fn preserve_list_fixed_order() {
        let selection = PreserveMetadata::LOCATION | PreserveMetadata::COPYRIGHT | PreserveMetadata::CREATION;
        let list = selection.preserve_list(JPEG_MIME_TYPE).unwrap();
        assert_eq!(list, vec!["copyright", "creation", "location"]);
    }

    #[test]
    fn copyright_valid_for_any_type() {
        let list = PreserveMetadata::COPYRIGHT.preserve_list("image/png").unwrap();
        assert_eq!(list, vec!["copyright"]);
    }

    #[test]
    fn creation_rejected_for_png() {
        let selection = PreserveMetadata::COPYRIGHT | PreserveMetadata::CREATION;
        let err = selection.preserve_list("image/png").unwrap_err();
        match err {
            TinyPngError::MetadataNotSupported { flag, required, actual } => {
                assert_eq!(flag, "creation");
                assert_eq!(required, JPEG_MIME_TYPE);
                assert_eq!(actual, "image/png");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn location_rejected_for_webp() {
        let err = PreserveMetadata::LOCATION.preserve_list("image/webp").unwrap_err();
        assert!(matches!(
            err,
            TinyPngError::MetadataNotSupported { flag: "location", .. }
        ));
    }

    #[test]
    fn body_none_when_nothing_selected() {
        let body = PreserveMetadata::NONE.preserve_body("image/png").unwrap();
        assert!(body.is_none());
    }

    #[test]
    fn body_exact_json() {
        let selection = PreserveMetadata::COPYRIGHT | PreserveMetadata::CREATION;
        let body = selection.preserve_body(JPEG_MIME_TYPE).unwrap().unwrap();
        assert_eq!(body, r#"{"preserve":["copyright","creation"]}"#);
    }

    #[test]
    fn from_str_parses_flag_names() {
        assert_eq!("copyright".parse::<PreserveMetadata>().unwrap(), PreserveMetadata::COPYRIGHT);
        assert_eq!("Creation".parse::<PreserveMetadata>().unwrap(), PreserveMetadata::CREATION);
        assert_eq!("none".parse::<PreserveMetadata>().unwrap(), PreserveMetadata::NONE);
        assert!(matches!(
            "exif".parse::<PreserveMetadata>(),
            Err(TinyPngError::UnknownMetadataFlag(_))
        ));
    }
}
