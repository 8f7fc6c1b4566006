//! Request area classification
//!
//! Decides which channel an order came through from the runtime area that
//! handled the request and, for REST calls, the referer path.

use std::fmt;
use std::str::FromStr;

use serde_repr::{Deserialize_repr, Serialize_repr};
use strum::{AsRefStr, EnumIter};
use tracing::trace;
use url::Url;

use crate::errors::{CaptureError, Result};

/// Runtime area reported by the hosting application
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExecutionArea {
    Storefront,
    Admin,
    Rest,
    Soap,
    /// Cron, GraphQL, CLI and whatever else the host may report
    Other(String),
}

impl ExecutionArea {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Storefront => "frontend",
            Self::Admin => "adminhtml",
            Self::Rest => "webapi_rest",
            Self::Soap => "webapi_soap",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for ExecutionArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Never fails: unrecognised names become `Other`
impl FromStr for ExecutionArea {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "frontend" | "storefront" => Self::Storefront,
            "adminhtml" | "admin" => Self::Admin,
            "webapi_rest" | "rest" => Self::Rest,
            "webapi_soap" | "soap" => Self::Soap,
            _ => Self::Other(s.trim().to_string()),
        })
    }
}

/// Stored channel classification
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize_repr,
    Deserialize_repr,
    EnumIter,
    AsRefStr,
)]
#[repr(u8)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AreaCode {
    Unknown = 0,
    Front = 1,
    Admin = 2,
    Rest = 3,
    Soap = 4,
}

impl AreaCode {
    pub fn as_i16(self) -> i16 {
        self as i16
    }
}

impl TryFrom<i16> for AreaCode {
    type Error = CaptureError;

    fn try_from(value: i16) -> Result<Self> {
        match value {
            0 => Ok(Self::Unknown),
            1 => Ok(Self::Front),
            2 => Ok(Self::Admin),
            3 => Ok(Self::Rest),
            4 => Ok(Self::Soap),
            other => Err(CaptureError::serialization(format!(
                "Invalid area code: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for AreaCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Pure decision over the execution area and the referer
#[derive(Debug, Clone)]
pub struct AreaClassifier {
    /// Checkout base path without surrounding slashes; `None` when unset
    checkout_marker: Option<String>,
}

impl AreaClassifier {
    pub fn new(checkout_base_path: &str) -> Self {
        let trimmed = checkout_base_path.trim().trim_matches('/');
        let checkout_marker = (!trimmed.is_empty()).then(|| trimmed.to_string());
        Self { checkout_marker }
    }

    pub fn classify(&self, area: &ExecutionArea, referer: Option<&str>) -> AreaCode {
        let code = match area {
            ExecutionArea::Storefront => AreaCode::Front,
            ExecutionArea::Admin => AreaCode::Admin,
            ExecutionArea::Rest if self.is_checkout_referer(referer) => AreaCode::Front,
            ExecutionArea::Rest => AreaCode::Rest,
            ExecutionArea::Soap => AreaCode::Soap,
            ExecutionArea::Other(_) => AreaCode::Unknown,
        };

        trace!("Area {} with referer {:?} classified as {}", area, referer, code);
        code
    }

    /// Literal substring match of the checkout base path against the referer path
    ///
    /// An unset base path never matches, so REST traffic stays REST.
    fn is_checkout_referer(&self, referer: Option<&str>) -> bool {
        let (Some(marker), Some(path)) = (&self.checkout_marker, referer.and_then(referer_path))
        else {
            return false;
        };
        path.contains(marker.as_str())
    }
}

/// Path component of a referer; path-only referers are accepted as-is
fn referer_path(referer: &str) -> Option<String> {
    let referer = referer.trim();
    if referer.is_empty() {
        return None;
    }

    match Url::parse(referer) {
        Ok(url) => Some(url.path().to_string()),
        Err(url::ParseError::RelativeUrlWithoutBase) if referer.starts_with('/') => {
            let base = Url::parse("http://localhost/").ok()?;
            base.join(referer).ok().map(|url| url.path().to_string())
        }
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> AreaClassifier {
        AreaClassifier::new("checkout")
    }

    #[test]
    fn test_storefront_and_admin() {
        assert_eq!(classifier().classify(&ExecutionArea::Storefront, None), AreaCode::Front);
        assert_eq!(classifier().classify(&ExecutionArea::Admin, None), AreaCode::Admin);
    }

    #[test]
    fn test_rest_from_checkout_is_front() {
        let c = classifier();
        assert_eq!(
            c.classify(&ExecutionArea::Rest, Some("https://shop.example.com/checkout/cart")),
            AreaCode::Front
        );
        assert_eq!(c.classify(&ExecutionArea::Rest, Some("/checkout/cart")), AreaCode::Front);
        assert_eq!(
            c.classify(&ExecutionArea::Rest, Some("https://shop.example.com/checkout")),
            AreaCode::Front
        );
    }

    #[test]
    fn test_rest_elsewhere_is_rest() {
        let c = classifier();
        assert_eq!(
            c.classify(&ExecutionArea::Rest, Some("/catalog/product/5")),
            AreaCode::Rest
        );
        assert_eq!(c.classify(&ExecutionArea::Rest, None), AreaCode::Rest);
        assert_eq!(c.classify(&ExecutionArea::Rest, Some("")), AreaCode::Rest);
        assert_eq!(c.classify(&ExecutionArea::Rest, Some("not a url")), AreaCode::Rest);
        // query strings are not part of the path
        assert_eq!(
            c.classify(&ExecutionArea::Rest, Some("https://x.test/cart?next=/checkout/")),
            AreaCode::Rest
        );
        assert_eq!(
            c.classify(&ExecutionArea::Rest, Some("https://x.test/chekout/cart")),
            AreaCode::Rest
        );
    }

    #[test]
    fn test_base_path_matches_anywhere_in_path() {
        let c = classifier();
        assert_eq!(
            c.classify(&ExecutionArea::Rest, Some("https://x.test/checkouts/cart")),
            AreaCode::Front
        );
        assert_eq!(
            c.classify(&ExecutionArea::Rest, Some("https://x.test/onepage-checkout/success")),
            AreaCode::Front
        );
        assert_eq!(
            c.classify(&ExecutionArea::Rest, Some("/en/checkout")),
            AreaCode::Front
        );
    }

    #[test]
    fn test_soap_and_unknown() {
        let c = classifier();
        assert_eq!(c.classify(&ExecutionArea::Soap, None), AreaCode::Soap);
        assert_eq!(
            c.classify(&ExecutionArea::Other("crontab".to_string()), Some("/checkout/")),
            AreaCode::Unknown
        );
    }

    #[test]
    fn test_base_path_with_pattern_characters_is_literal() {
        let c = AreaClassifier::new("check.out(+)");
        assert_eq!(
            c.classify(&ExecutionArea::Rest, Some("/check.out(+)/cart")),
            AreaCode::Front
        );
        assert_eq!(
            c.classify(&ExecutionArea::Rest, Some("/checkXout/cart")),
            AreaCode::Rest
        );
    }

    #[test]
    fn test_base_path_slashes_are_normalised() {
        let c = AreaClassifier::new("/onestep/checkout/");
        assert_eq!(
            c.classify(&ExecutionArea::Rest, Some("/onestep/checkout/index")),
            AreaCode::Front
        );
    }

    #[test]
    fn test_empty_base_path_never_matches() {
        let c = AreaClassifier::new("");
        assert_eq!(c.classify(&ExecutionArea::Rest, Some("/checkout/cart")), AreaCode::Rest);
    }

    #[test]
    fn test_execution_area_parsing() {
        assert_eq!("frontend".parse::<ExecutionArea>().unwrap(), ExecutionArea::Storefront);
        assert_eq!("adminhtml".parse::<ExecutionArea>().unwrap(), ExecutionArea::Admin);
        assert_eq!("webapi_rest".parse::<ExecutionArea>().unwrap(), ExecutionArea::Rest);
        assert_eq!("SOAP".parse::<ExecutionArea>().unwrap(), ExecutionArea::Soap);
        assert_eq!(
            "graphql".parse::<ExecutionArea>().unwrap(),
            ExecutionArea::Other("graphql".to_string())
        );
    }

    #[test]
    fn test_area_code_conversions() {
        assert_eq!(AreaCode::try_from(3).unwrap(), AreaCode::Rest);
        assert!(AreaCode::try_from(9).is_err());
        assert_eq!(AreaCode::Soap.as_i16(), 4);
        assert_eq!(AreaCode::Front.to_string(), "FRONT");
        assert_eq!(serde_json::to_string(&AreaCode::Admin).unwrap(), "2");
    }
}
