//! Multipart field names for product ingestion.
//!
//! Scalar product fields are plain names (`name`, `rate`, ...). Each platform
//! listing is flattened into bracket-qualified names, `platforms[<i>][name]`,
//! `platforms[<i>][link]` and `platforms[<i>][price]`, and its optional image
//! travels as a sibling file part `platform_image_<i>`. The index `<i>` is the
//! only link between a listing's scalar fields and its image.

use core::fmt;
use std::collections::BTreeMap;

use super::{ImageUpload, PlatformDraft, ProductDraft, ValidationError};

/// One of the three scalar fields of a platform listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformField {
    Name,
    Link,
    Price,
}

impl PlatformField {
    /// Spelling inside the second bracket pair.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Link => "link",
            Self::Price => "price",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "name" => Some(Self::Name),
            "link" => Some(Self::Link),
            "price" => Some(Self::Price),
            _ => None,
        }
    }
}

/// A recognised multipart field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldName {
    Name,
    Description,
    Rate,
    CategoryId,
    /// The product's own image (file part).
    Image,
    /// `platforms[<index>][<field>]`
    Platform { index: usize, field: PlatformField },
    /// `platform_image_<index>` (file part).
    PlatformImage(usize),
}

const PLATFORMS_PREFIX: &str = "platforms[";
const PLATFORM_IMAGE_PREFIX: &str = "platform_image_";

impl FieldName {
    /// Parse a multipart part name. Unknown names yield `None`.
    ///
    /// ```
    /// use teefinder_core::submission::{FieldName, PlatformField};
    ///
    /// assert_eq!(
    ///     FieldName::parse("platforms[2][price]"),
    ///     Some(FieldName::Platform { index: 2, field: PlatformField::Price })
    /// );
    /// assert_eq!(FieldName::parse("platform_image_0"), Some(FieldName::PlatformImage(0)));
    /// assert_eq!(FieldName::parse("platforms[x][name]"), None);
    /// ```
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "name" => return Some(Self::Name),
            "description" => return Some(Self::Description),
            "rate" => return Some(Self::Rate),
            "category_id" => return Some(Self::CategoryId),
            "image" => return Some(Self::Image),
            _ => {}
        }

        if let Some(rest) = name.strip_prefix(PLATFORMS_PREFIX) {
            let (index, rest) = rest.split_once("][")?;
            let field = rest.strip_suffix(']')?;
            return Some(Self::Platform {
                index: parse_index(index)?,
                field: PlatformField::parse(field)?,
            });
        }

        name.strip_prefix(PLATFORM_IMAGE_PREFIX)
            .and_then(parse_index)
            .map(Self::PlatformImage)
    }

    /// Whether a name claims to be listing data (`platforms[...` or
    /// `platform_image_...`), whether or not it parses.
    #[must_use]
    pub fn has_listing_prefix(name: &str) -> bool {
        name.starts_with(PLATFORMS_PREFIX) || name.starts_with(PLATFORM_IMAGE_PREFIX)
    }

    /// Whether this part carries file content rather than text.
    #[must_use]
    pub const fn is_file(&self) -> bool {
        matches!(self, Self::Image | Self::PlatformImage(_))
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => f.write_str("name"),
            Self::Description => f.write_str("description"),
            Self::Rate => f.write_str("rate"),
            Self::CategoryId => f.write_str("category_id"),
            Self::Image => f.write_str("image"),
            Self::Platform { index, field } => {
                write!(f, "{PLATFORMS_PREFIX}{index}][{}]", field.as_str())
            }
            Self::PlatformImage(index) => write!(f, "{PLATFORM_IMAGE_PREFIX}{index}"),
        }
    }
}

/// Decimal digits only, no sign, no leading zeros (so `01` cannot alias `1`).
fn parse_index(s: &str) -> Option<usize> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) || (s.len() > 1 && s.starts_with('0'))
    {
        return None;
    }
    s.parse().ok()
}

/// Fields gathered for one listing index.
#[derive(Debug, Default)]
struct PlatformParts {
    name: Option<String>,
    link: Option<String>,
    price: Option<String>,
    image: Option<ImageUpload>,
}

impl PlatformParts {
    const fn has_scalar_fields(&self) -> bool {
        self.name.is_some() || self.link.is_some() || self.price.is_some()
    }
}

/// Accumulates multipart parts, in any order, into a [`ProductDraft`].
///
/// Later duplicates of a field replace earlier ones. Unknown field names are
/// ignored, except listing-prefixed names that fail to parse: those reject
/// the whole form.
#[derive(Debug, Default)]
pub struct ProductForm {
    /// First listing-prefixed name that did not parse.
    malformed: Option<String>,
    name: Option<String>,
    description: Option<String>,
    rate: Option<String>,
    category_id: Option<String>,
    image: Option<ImageUpload>,
    platforms: BTreeMap<usize, PlatformParts>,
}

impl ProductForm {
    /// Create an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a text part. Returns `false` if the field is unknown or is a
    /// file field.
    pub fn push_text(&mut self, field: FieldName, value: String) -> bool {
        match field {
            FieldName::Name => self.name = Some(value),
            FieldName::Description => self.description = Some(value),
            FieldName::Rate => self.rate = Some(value),
            FieldName::CategoryId => self.category_id = Some(value),
            FieldName::Platform { index, field } => {
                let parts = self.platforms.entry(index).or_default();
                let slot = match field {
                    PlatformField::Name => &mut parts.name,
                    PlatformField::Link => &mut parts.link,
                    PlatformField::Price => &mut parts.price,
                };
                *slot = Some(value);
            }
            FieldName::Image | FieldName::PlatformImage(_) => return false,
        }
        true
    }

    /// Record a file part. Empty uploads are treated as absent. Returns
    /// `false` if the field is not a file field.
    pub fn push_file(&mut self, field: FieldName, upload: ImageUpload) -> bool {
        let upload = (!upload.bytes.is_empty()).then_some(upload);
        match field {
            FieldName::Image => self.image = upload,
            FieldName::PlatformImage(index) => match upload {
                Some(upload) => self.platforms.entry(index).or_default().image = Some(upload),
                None => {
                    if let Some(parts) = self.platforms.get_mut(&index) {
                        parts.image = None;
                    }
                }
            },
            _ => return false,
        }
        true
    }

    /// Record a part whose name [`FieldName::parse`] rejected. Returns `true`
    /// if the name is malformed listing data, which fails
    /// [`into_draft`](Self::into_draft); other names are plain unknowns.
    pub fn push_unrecognised(&mut self, name: &str) -> bool {
        if !FieldName::has_listing_prefix(name) {
            return false;
        }
        self.malformed.get_or_insert_with(|| name.to_owned());
        true
    }

    /// Highest listing index seen so far.
    #[must_use]
    pub fn highest_platform_index(&self) -> Option<usize> {
        self.platforms.keys().next_back().copied()
    }

    /// Assemble listings in ascending index order.
    ///
    /// Gaps in the index sequence are skipped. An index with scalar fields
    /// but no image part gets no image; an image part whose index has no
    /// scalar fields is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MalformedField`] if a listing-prefixed part
    /// name did not parse, and [`ValidationError::OrphanPlatformImage`] for an
    /// image without matching listing fields.
    pub fn into_draft(self) -> Result<ProductDraft, ValidationError> {
        if let Some(name) = self.malformed {
            return Err(ValidationError::MalformedField(name));
        }

        let mut platforms = Vec::with_capacity(self.platforms.len());
        for (index, parts) in self.platforms {
            if !parts.has_scalar_fields() {
                return Err(ValidationError::OrphanPlatformImage(index));
            }
            platforms.push(PlatformDraft {
                name: parts.name.unwrap_or_default(),
                link: parts.link.unwrap_or_default(),
                price: parts.price.unwrap_or_default(),
                image: parts.image,
            });
        }

        Ok(ProductDraft {
            name: self.name.unwrap_or_default(),
            description: self.description,
            rate: self.rate.unwrap_or_default(),
            category_id: self.category_id.unwrap_or_default(),
            image: self.image,
            platforms,
        })
    }
}
