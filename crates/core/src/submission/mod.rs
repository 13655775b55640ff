//! Product ingestion payloads and their validation rules.
//!
//! A [`ProductDraft`] holds exactly what an admin typed or what arrived on
//! the wire, as raw strings. [`ProductDraft::validate`] turns it into a
//! [`ProductSubmission`] or reports the first rule it breaks. The same rules
//! run in the client before anything is sent and in the server before
//! anything is stored.

mod fields;

pub use fields::{FieldName, PlatformField, ProductForm};

use rust_decimal::Decimal;

use crate::types::{CategoryId, CategoryTypeError, Price, PriceError, parse_amount};

/// Largest accepted image upload (5 MiB).
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// A rule violated by a request, reported to the caller verbatim.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required product or query field is missing or blank.
    #[error("Please fill all the fields: {0} is required.")]
    MissingField(&'static str),

    /// The base rate is not a positive decimal.
    #[error("Invalid rate: {0}")]
    InvalidRate(PriceError),

    /// `category_id` is not a positive integer.
    #[error("Invalid category_id: {0:?}")]
    InvalidCategoryId(String),

    /// The gender filter is not `mens` or `womens`.
    #[error(transparent)]
    InvalidCategoryType(#[from] CategoryTypeError),

    /// No platform listings were submitted.
    #[error("Please add at least one platform.")]
    NoPlatforms,

    /// A required listing field is missing or blank.
    #[error("Please fill all the fields: platform {position} is missing its {field}.")]
    MissingPlatformField {
        /// Zero-based position of the listing.
        position: usize,
        field: &'static str,
    },

    /// A listing price is neither a positive decimal nor the sentinel.
    #[error("Invalid price for platform {position}: {source}")]
    InvalidPrice {
        position: usize,
        source: PriceError,
    },

    /// A part name uses a listing prefix but does not parse, e.g.
    /// `platforms[01][name]` or an index too large to represent.
    #[error("Malformed field name: {0:?}")]
    MalformedField(String),

    /// A `platform_image_<i>` part has no `platforms[<i>][...]` fields.
    #[error("platform_image_{0} has no matching platform fields.")]
    OrphanPlatformImage(usize),

    /// An upload is not an image.
    #[error("{field} must be an image (got {content_type}).")]
    UnsupportedImage {
        field: String,
        content_type: String,
    },

    /// An upload exceeds [`MAX_IMAGE_BYTES`].
    #[error("{field} is too large (maximum {max} bytes).")]
    ImageTooLarge { field: String, max: usize },

    /// Admin login submitted without both credentials.
    #[error("Username and password are required.")]
    MissingCredentials,
}

/// An uploaded file as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    /// Declared content type of the part, if any.
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Build an upload with an explicit content type.
    #[must_use]
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: Some(file_name.into()),
            content_type: Some(content_type.into()),
            bytes,
        }
    }
}

/// A validated image ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub content_type: String,
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

/// Raw product form: every scalar as typed, images as received.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub description: Option<String>,
    pub rate: String,
    pub category_id: String,
    pub image: Option<ImageUpload>,
    pub platforms: Vec<PlatformDraft>,
}

/// Raw listing form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformDraft {
    pub name: String,
    pub link: String,
    pub price: String,
    pub image: Option<ImageUpload>,
}

/// A product that passed every ingestion rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSubmission {
    pub name: String,
    pub description: String,
    pub rate: Decimal,
    pub category_id: CategoryId,
    pub image: ImageData,
    /// Listings in display order.
    pub platforms: Vec<PlatformSubmission>,
}

/// A listing that passed every ingestion rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformSubmission {
    pub name: String,
    pub link: String,
    pub price: Price,
    pub image: Option<ImageData>,
}

impl ProductDraft {
    /// Start a draft for a category.
    #[must_use]
    pub fn new(category_id: CategoryId, name: impl Into<String>, rate: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rate: rate.into(),
            category_id: category_id.to_string(),
            ..Self::default()
        }
    }

    /// Attach the product image.
    #[must_use]
    pub fn with_image(mut self, image: ImageUpload) -> Self {
        self.image = Some(image);
        self
    }

    /// Append a listing.
    #[must_use]
    pub fn with_platform(mut self, platform: PlatformDraft) -> Self {
        self.platforms.push(platform);
        self
    }

    /// Check every rule, in form order, and return the first violation.
    ///
    /// Text fields are trimmed. A missing description becomes empty.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered. Listings are checked
    /// in position order, so a bad listing never lets a later one through.
    pub fn validate(self) -> Result<ProductSubmission, ValidationError> {
        let name = required(&self.name, "name")?;

        let rate = required(&self.rate, "rate")?;
        let rate = parse_amount(&rate).map_err(ValidationError::InvalidRate)?;

        let category_id = required(&self.category_id, "category_id")?;
        let category_id = category_id
            .parse::<CategoryId>()
            .map_err(|_| ValidationError::InvalidCategoryId(category_id))?;

        let image = self
            .image
            .map(|upload| validate_image(upload, "image"))
            .transpose()?
            .ok_or(ValidationError::MissingField("image"))?;

        if self.platforms.is_empty() {
            return Err(ValidationError::NoPlatforms);
        }

        let platforms = self
            .platforms
            .into_iter()
            .enumerate()
            .map(|(position, platform)| platform.validate(position))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ProductSubmission {
            name,
            description: self
                .description
                .map(|d| d.trim().to_owned())
                .unwrap_or_default(),
            rate,
            category_id,
            image,
            platforms,
        })
    }
}

impl PlatformDraft {
    /// Create a listing without an image.
    #[must_use]
    pub fn new(name: impl Into<String>, link: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            link: link.into(),
            price: price.into(),
            image: None,
        }
    }

    /// Attach the listing's own image.
    #[must_use]
    pub fn with_image(mut self, image: ImageUpload) -> Self {
        self.image = Some(image);
        self
    }

    fn validate(self, position: usize) -> Result<PlatformSubmission, ValidationError> {
        let missing = |field| ValidationError::MissingPlatformField { position, field };

        let name = self.name.trim();
        if name.is_empty() {
            return Err(missing("name"));
        }
        let link = self.link.trim();
        if link.is_empty() {
            return Err(missing("link"));
        }
        if self.price.trim().is_empty() {
            return Err(missing("price"));
        }
        let price = Price::parse(&self.price)
            .map_err(|source| ValidationError::InvalidPrice { position, source })?;

        let image = self
            .image
            .map(|upload| validate_image(upload, &format!("platform_image_{position}")))
            .transpose()?;

        Ok(PlatformSubmission {
            name: name.to_owned(),
            link: link.to_owned(),
            price,
            image,
        })
    }
}

impl ProductSubmission {
    /// Text parts in wire order: product scalars, then each listing's
    /// `platforms[<i>][...]` fields by position.
    #[must_use]
    pub fn text_fields(&self) -> Vec<(FieldName, String)> {
        let mut fields = vec![
            (FieldName::Name, self.name.clone()),
            (FieldName::Description, self.description.clone()),
            (FieldName::Rate, self.rate.to_string()),
            (FieldName::CategoryId, self.category_id.to_string()),
        ];
        for (index, platform) in self.platforms.iter().enumerate() {
            let field = |field| FieldName::Platform { index, field };
            fields.push((field(PlatformField::Name), platform.name.clone()));
            fields.push((field(PlatformField::Link), platform.link.clone()));
            fields.push((field(PlatformField::Price), platform.price.to_string()));
        }
        fields
    }

    /// File parts: `image`, then `platform_image_<i>` for listings that have one.
    #[must_use]
    pub fn file_fields(&self) -> Vec<(FieldName, &ImageData)> {
        let mut files = vec![(FieldName::Image, &self.image)];
        files.extend(
            self.platforms
                .iter()
                .enumerate()
                .filter_map(|(index, p)| p.image.as_ref().map(|img| (FieldName::PlatformImage(index), img))),
        );
        files
    }
}

fn required(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(trimmed.to_owned())
}

/// Resolve the content type (declared, else guessed from the file name) and
/// enforce the image-only and size rules.
fn validate_image(upload: ImageUpload, field: &str) -> Result<ImageData, ValidationError> {
    let content_type = upload
        .content_type
        .filter(|ct| !ct.trim().is_empty())
        .or_else(|| {
            upload
                .file_name
                .as_deref()
                .and_then(|name| mime_guess::from_path(name).first())
                .map(|mime| mime.essence_str().to_owned())
        })
        .unwrap_or_else(|| "application/octet-stream".to_owned());

    if !content_type.starts_with("image/") {
        return Err(ValidationError::UnsupportedImage {
            field: field.to_owned(),
            content_type,
        });
    }
    if upload.bytes.len() > MAX_IMAGE_BYTES {
        return Err(ValidationError::ImageTooLarge {
            field: field.to_owned(),
            max: MAX_IMAGE_BYTES,
        });
    }

    Ok(ImageData {
        content_type,
        file_name: upload.file_name,
        bytes: upload.bytes,
    })
}
