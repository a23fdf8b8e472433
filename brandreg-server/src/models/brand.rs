//! Brand registration payloads
//!
//! Request bodies are validated into these types before any store access.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Registration status of a brand
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrandStatus {
    Active,
    #[default]
    Pending,
    Inactive,
}

impl BrandStatus {
    pub const ALL: [BrandStatus; 3] = [Self::Active, Self::Pending, Self::Inactive];

    /// Wire and storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Pending => "pending",
            Self::Inactive => "inactive",
        }
    }
}

impl fmt::Display for BrandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BrandStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidVariant {
                field: "status",
                value: s.to_owned(),
            })
    }
}

/// Non-empty text field (brand name, holder)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequiredText(String);

impl RequiredText {
    /// Validate that `value` is non-empty. `field` names the offending
    /// field in the error.
    ///
    /// ```
    /// use brandreg_server::models::RequiredText;
    ///
    /// assert!(RequiredText::new("brand", "Signa").is_ok());
    /// assert!(RequiredText::new("brand", "").is_err());
    /// ```
    pub fn new(field: &'static str, value: &str) -> Result<Self, ValidationError> {
        if value.is_empty() {
            return Err(ValidationError::Empty { field });
        }
        Ok(Self(value.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// The mutable fields of a record, as written to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandFields {
    pub brand: String,
    pub holder: String,
    pub status: BrandStatus,
}

/// Validated create payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBrand {
    pub brand: RequiredText,
    pub holder: RequiredText,
    pub status: BrandStatus,
}

impl NewBrand {
    /// Validate a create request. A missing status means `pending`.
    pub fn new(brand: &str, holder: &str, status: Option<&str>) -> Result<Self, ValidationError> {
        Ok(Self {
            brand: RequiredText::new("brand", brand)?,
            holder: RequiredText::new("holder", holder)?,
            status: status.map(str::parse::<BrandStatus>).transpose()?.unwrap_or_default(),
        })
    }

    pub fn into_fields(self) -> BrandFields {
        BrandFields {
            brand: self.brand.into_string(),
            holder: self.holder.into_string(),
            status: self.status,
        }
    }
}

/// Validated update payload. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrandChanges {
    pub brand: Option<RequiredText>,
    pub holder: Option<RequiredText>,
    pub status: Option<BrandStatus>,
}

impl BrandChanges {
    pub fn new(
        brand: Option<&str>,
        holder: Option<&str>,
        status: Option<&str>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            brand: brand.map(|b| RequiredText::new("brand", b)).transpose()?,
            holder: holder.map(|h| RequiredText::new("holder", h)).transpose()?,
            status: status.map(str::parse::<BrandStatus>).transpose()?,
        })
    }

    /// Overlay the supplied fields on the stored ones.
    ///
    /// All three fields are returned, so the store rewrites unchanged
    /// values too.
    pub fn merge(self, current: BrandFields) -> BrandFields {
        BrandFields {
            brand: self.brand.map_or(current.brand, RequiredText::into_string),
            holder: self.holder.map_or(current.holder, RequiredText::into_string),
            status: self.status.unwrap_or(current.status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> BrandFields {
        BrandFields {
            brand: "Signa".into(),
            holder: "Daniel Estrada".into(),
            status: BrandStatus::Inactive,
        }
    }

    #[test]
    fn status_parses_known_values() {
        assert_eq!("active".parse::<BrandStatus>().unwrap(), BrandStatus::Active);
        assert_eq!("pending".parse::<BrandStatus>().unwrap(), BrandStatus::Pending);
        assert_eq!("inactive".parse::<BrandStatus>().unwrap(), BrandStatus::Inactive);
    }

    #[test]
    fn status_rejects_unknown_values() {
        let err = "Active".parse::<BrandStatus>().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidVariant { field: "status", .. }));
        assert!("archived".parse::<BrandStatus>().is_err());
        assert!("".parse::<BrandStatus>().is_err());
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&BrandStatus::Inactive).unwrap(), "\"inactive\"");
        let parsed: BrandStatus = serde_json::from_str("\"active\"").unwrap();
        assert_eq!(parsed, BrandStatus::Active);
    }

    #[test]
    fn new_brand_defaults_to_pending() {
        let new = NewBrand::new("Signa", "Daniel Estrada", None).unwrap();
        assert_eq!(new.status, BrandStatus::Pending);
    }

    #[test]
    fn new_brand_rejects_empty_fields() {
        let err = NewBrand::new("", "holder", None).unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "brand" });

        let err = NewBrand::new("brand", "", None).unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "holder" });
    }

    #[test]
    fn new_brand_rejects_unknown_status() {
        let err = NewBrand::new("brand", "holder", Some("revoked")).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidVariant { .. }));
    }

    #[test]
    fn merge_status_only_keeps_text_fields() {
        let changes = BrandChanges::new(None, None, Some("active")).unwrap();
        let merged = changes.merge(stored());
        assert_eq!(merged.brand, "Signa");
        assert_eq!(merged.holder, "Daniel Estrada");
        assert_eq!(merged.status, BrandStatus::Active);
    }

    #[test]
    fn merge_nothing_rewrites_identical_values() {
        let changes = BrandChanges::new(None, None, None).unwrap();
        assert_eq!(changes.merge(stored()), stored());
    }

    #[test]
    fn merge_each_field_independently() {
        let changes = BrandChanges::new(Some("Signa Labs"), Some("Ana Ruiz"), None).unwrap();
        let merged = changes.merge(stored());
        assert_eq!(merged.brand, "Signa Labs");
        assert_eq!(merged.holder, "Ana Ruiz");
        assert_eq!(merged.status, BrandStatus::Inactive);
    }

    #[test]
    fn changes_reject_empty_text() {
        let err = BrandChanges::new(None, Some(""), None).unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "holder" });
    }
}
