use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// UK tax jurisdiction for property transactions. Northern Ireland shares
/// the English SDLT regime, so it maps onto `England` rather than getting
/// a variant of its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    England,
    Scotland,
    Wales,
}

impl Region {
    pub const ALL: [Region; 3] = [Region::England, Region::Scotland, Region::Wales];

    pub fn key(&self) -> &'static str {
        match self {
            Region::England => "england",
            Region::Scotland => "scotland",
            Region::Wales => "wales",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Region::England => "England & Northern Ireland",
            Region::Scotland => "Scotland",
            Region::Wales => "Wales",
        }
    }

    pub fn tax_name(&self) -> &'static str {
        match self {
            Region::England => "Stamp Duty Land Tax (SDLT)",
            Region::Scotland => "Land and Buildings Transaction Tax (LBTT)",
            Region::Wales => "Land Transaction Tax (LTT)",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.key())
    }
}

impl FromStr for Region {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "england" | "english" | "northern ireland" | "northern-ireland" | "ni" => {
                Ok(Region::England)
            }
            "scotland" | "scottish" => Ok(Region::Scotland),
            "wales" | "welsh" => Ok(Region::Wales),
            _ => Err(DomainError::UnknownRegion { input: value.trim().to_owned() }),
        }
    }
}

/// Buyer category. Determines which rate table applies and whether the
/// additional-property surcharge is stacked on every band.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuyerType {
    Standard,
    FirstTime,
    Additional,
}

impl BuyerType {
    pub const ALL: [BuyerType; 3] =
        [BuyerType::Standard, BuyerType::FirstTime, BuyerType::Additional];

    pub fn key(&self) -> &'static str {
        match self {
            BuyerType::Standard => "standard",
            BuyerType::FirstTime => "first-time",
            BuyerType::Additional => "additional",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BuyerType::Standard => "standard buyer",
            BuyerType::FirstTime => "first-time buyer",
            BuyerType::Additional => "additional property buyer",
        }
    }

    /// Lenient mapping from free wording to a category. Anything that does
    /// not read as first-time or additional falls back to `Standard`, so a
    /// typo never blocks a calculation.
    pub fn from_input(value: &str) -> BuyerType {
        let normalized = value.trim().to_ascii_lowercase();
        if normalized.contains("first") {
            BuyerType::FirstTime
        } else if normalized.contains("additional") || normalized.contains("second") {
            BuyerType::Additional
        } else {
            BuyerType::Standard
        }
    }
}

impl fmt::Display for BuyerType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{BuyerType, Region};

    #[test]
    fn region_parsing_accepts_common_spellings() {
        assert_eq!(Region::from_str("England").unwrap(), Region::England);
        assert_eq!(Region::from_str("  scotland  ").unwrap(), Region::Scotland);
        assert_eq!(Region::from_str("Welsh").unwrap(), Region::Wales);
        assert_eq!(Region::from_str("northern ireland").unwrap(), Region::England);
    }

    #[test]
    fn region_parsing_rejects_unknown_input() {
        assert!(Region::from_str("narnia").is_err());
        assert!(Region::from_str("").is_err());
    }

    #[test]
    fn buyer_type_mapping_is_lenient() {
        assert_eq!(BuyerType::from_input("first-time buyer"), BuyerType::FirstTime);
        assert_eq!(BuyerType::from_input("First Time"), BuyerType::FirstTime);
        assert_eq!(BuyerType::from_input("additional"), BuyerType::Additional);
        assert_eq!(BuyerType::from_input("second home"), BuyerType::Additional);
        assert_eq!(BuyerType::from_input("standard"), BuyerType::Standard);
        assert_eq!(BuyerType::from_input("no idea"), BuyerType::Standard);
    }

    #[test]
    fn serde_tokens_match_the_wire_vocabulary() {
        assert_eq!(serde_json::to_string(&Region::England).unwrap(), "\"england\"");
        assert_eq!(serde_json::to_string(&BuyerType::FirstTime).unwrap(), "\"first-time\"");
        assert_eq!(
            serde_json::from_str::<BuyerType>("\"additional\"").unwrap(),
            BuyerType::Additional
        );
    }
}
