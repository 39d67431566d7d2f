//! Product categories.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// The catalog sections a product can belong to.
///
/// The slug is what appears in URLs (`/productos/trabajo`) and listing
/// query strings (`?category=campo`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Calzados,
    Trabajo,
    Campo,
    Seguridad,
}

impl ProductCategory {
    /// Every category, in menu order.
    pub const ALL: [Self; 4] = [Self::Calzados, Self::Trabajo, Self::Campo, Self::Seguridad];

    /// URL slug for the category.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Calzados => "calzados",
            Self::Trabajo => "trabajo",
            Self::Campo => "campo",
            Self::Seguridad => "seguridad",
        }
    }

    /// Heading shown in menus and filter panels.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Calzados => "CALZADOS",
            Self::Trabajo => "TRABAJO",
            Self::Campo => "CAMPO",
            Self::Seguridad => "SEGURIDAD",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Returned when a string is not a known category slug.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown product category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for ProductCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let slug = s.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.slug().eq_ignore_ascii_case(slug))
            .ok_or_else(|| UnknownCategory(slug.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_accepts_slugs() {
        assert_eq!(
            "trabajo".parse::<ProductCategory>().unwrap(),
            ProductCategory::Trabajo
        );
        assert_eq!(
            " Campo ".parse::<ProductCategory>().unwrap(),
            ProductCategory::Campo
        );
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        let err = "accesorios".parse::<ProductCategory>().unwrap_err();
        assert_eq!(err, UnknownCategory("accesorios".to_string()));
    }

    #[test]
    fn test_slug_roundtrips_for_every_category() {
        for category in ProductCategory::ALL {
            assert_eq!(category.slug().parse::<ProductCategory>().unwrap(), category);
            assert_eq!(category.to_string(), category.slug());
        }
    }

    #[test]
    fn test_serde_uses_slug() {
        let json = serde_json::to_string(&ProductCategory::Seguridad).unwrap();
        assert_eq!(json, "\"seguridad\"");
    }
}
