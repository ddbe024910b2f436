use image::ImageFormat;
use thiserror::Error;

pub const DEFAULT_MAX_IMAGE_BYTES: usize = 2 * 1024 * 1024;
pub const DEFAULT_MIN_WORDS: usize = 5;
pub const DEFAULT_MAX_TEXT_BYTES: usize = 16 * 1024;

#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Please upload the photo of your skin.")]
    MissingImage,

    #[error("You can only upload JPG/PNG file!")]
    UnsupportedImage,

    #[error("Image must be smaller than {limit}!")]
    ImageTooLarge { limit: String },

    #[error("Please describe your skin disease symptoms.")]
    MissingDescription,

    #[error("Please describe your symptoms in at least {min_words} words.")]
    DescriptionTooShort { min_words: usize },

    #[error("Symptom description must be smaller than {limit}.")]
    DescriptionTooLong { limit: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
}

impl ImageKind {
    /// Sniffs the magic bytes; only JPEG and PNG are accepted.
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        match image::guess_format(bytes).ok()? {
            ImageFormat::Jpeg => Some(Self::Jpeg),
            ImageFormat::Png => Some(Self::Png),
            _ => None,
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
        }
    }
}

/// A checked image + description pair, ready to forward for inference.
#[derive(Debug, Clone)]
pub struct Submission {
    pub image: Vec<u8>,
    pub kind: ImageKind,
    pub text: String,
}

#[derive(Debug, Clone, Copy)]
pub struct Limits {
    pub max_image_bytes: usize,
    pub max_text_bytes: usize,
    pub min_words: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
            max_text_bytes: DEFAULT_MAX_TEXT_BYTES,
            min_words: DEFAULT_MIN_WORDS,
        }
    }
}

impl Limits {
    pub fn check_image_size(&self, len: usize) -> Result<(), ValidationError> {
        if len >= self.max_image_bytes {
            return Err(ValidationError::ImageTooLarge {
                limit: format_size(self.max_image_bytes),
            });
        }
        Ok(())
    }

    pub fn check_text_size(&self, len: usize) -> Result<(), ValidationError> {
        if len >= self.max_text_bytes {
            return Err(ValidationError::DescriptionTooLong {
                limit: format_size(self.max_text_bytes),
            });
        }
        Ok(())
    }

    pub fn validate(
        &self,
        image: Option<Vec<u8>>,
        text: Option<String>,
    ) -> Result<Submission, ValidationError> {
        let image = image
            .filter(|bytes| !bytes.is_empty())
            .ok_or(ValidationError::MissingImage)?;
        self.check_image_size(image.len())?;
        let kind = ImageKind::detect(&image).ok_or(ValidationError::UnsupportedImage)?;

        if let Some(text) = &text {
            self.check_text_size(text.len())?;
        }
        let text = text
            .filter(|t| !t.trim().is_empty())
            .ok_or(ValidationError::MissingDescription)?;
        if word_count(&text) < self.min_words {
            return Err(ValidationError::DescriptionTooShort {
                min_words: self.min_words,
            });
        }

        Ok(Submission { image, kind, text })
    }
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Largest unit that states the limit exactly: `2MB`, `512KB` or `500000 bytes`.
pub fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * 1024;
    if bytes >= MB && bytes % MB == 0 {
        format!("{}MB", bytes / MB)
    } else if bytes >= KB && bytes % KB == 0 {
        format!("{}KB", bytes / KB)
    } else {
        format!("{bytes} bytes")
    }
}
