//! Status enums shared with the admin backend.

use serde::{Deserialize, Serialize};

/// Product availability as reported by the admin backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    #[default]
    InStock,
    OutOfStock,
    Preorder,
    ComingSoon,
}

impl Availability {
    /// All availability states, in display order.
    pub const ALL: [Self; 4] = [
        Self::InStock,
        Self::OutOfStock,
        Self::Preorder,
        Self::ComingSoon,
    ];

    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::InStock => "In stock",
            Self::OutOfStock => "Out of stock",
            Self::Preorder => "Preorder",
            Self::ComingSoon => "Coming soon",
        }
    }
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InStock => write!(f, "in_stock"),
            Self::OutOfStock => write!(f, "out_of_stock"),
            Self::Preorder => write!(f, "preorder"),
            Self::ComingSoon => write!(f, "coming_soon"),
        }
    }
}

impl std::str::FromStr for Availability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_stock" => Ok(Self::InStock),
            "out_of_stock" => Ok(Self::OutOfStock),
            "preorder" => Ok(Self::Preorder),
            "coming_soon" => Ok(Self::ComingSoon),
            _ => Err(format!("invalid availability: {s}")),
        }
    }
}

/// Status applied by the bulk status-update endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkStatus {
    Activate,
    Deactivate,
}

impl std::fmt::Display for BulkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Activate => write!(f, "activate"),
            Self::Deactivate => write!(f, "deactivate"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_availability_wire_format() {
        let json = serde_json::to_string(&Availability::ComingSoon).unwrap();
        assert_eq!(json, "\"coming_soon\"");
        let parsed: Availability = serde_json::from_str("\"out_of_stock\"").unwrap();
        assert_eq!(parsed, Availability::OutOfStock);
    }

    #[test]
    fn test_availability_parse() {
        let a: Availability = "preorder".parse().unwrap();
        assert_eq!(a, Availability::Preorder);
        assert!("sold_out".parse::<Availability>().is_err());
    }

    #[test]
    fn test_bulk_status_wire_format() {
        let json = serde_json::to_string(&BulkStatus::Deactivate).unwrap();
        assert_eq!(json, "\"deactivate\"");
        assert_eq!(BulkStatus::Activate.to_string(), "activate");
    }
}
