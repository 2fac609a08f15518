use std::fmt;
use std::str::FromStr;

use super::errors::DomainError;

/// Owner family of a stored image; also the directory it lives under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageKind {
    Users,
    Categories,
    Products,
}

impl ImageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ImageKind::Users => "users",
            ImageKind::Categories => "categories",
            ImageKind::Products => "products",
        }
    }
}

impl fmt::Display for ImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "users" => Ok(ImageKind::Users),
            "categories" => Ok(ImageKind::Categories),
            "products" => Ok(ImageKind::Products),
            _ => Err(DomainError::NotFound("media")),
        }
    }
}

/// An uploaded image held in memory until it is written to storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: Option<&str>, bytes: Vec<u8>) -> Result<Self, DomainError> {
        let file_name = sanitize_file_name(file_name.unwrap_or_default())?;
        Ok(Self { file_name, bytes })
    }
}

/// Reduce a client supplied name to a single safe path component.
pub fn sanitize_file_name(raw: &str) -> Result<String, DomainError> {
    let name = raw.rsplit(['/', '\\']).next().unwrap_or_default().trim();
    if name.is_empty() || name == "." || name == ".." || name.contains("..") {
        return Err(DomainError::bad_request(format!("invalid file name '{raw}'")));
    }
    Ok(name.to_string())
}
