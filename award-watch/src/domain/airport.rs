//! Airport code types.

use std::fmt;

/// Error returned when parsing an invalid IATA airport code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid airport code {code:?}: {reason}")]
pub struct InvalidAirportCode {
    code: String,
    reason: &'static str,
}

/// A valid 3-letter IATA airport code.
///
/// Codes are always 3 uppercase ASCII letters. Any `AirportCode` value is
/// valid by construction.
///
/// # Examples
///
/// ```
/// use award_watch::domain::AirportCode;
///
/// let ord = AirportCode::parse("ORD").unwrap();
/// assert_eq!(ord.as_str(), "ORD");
///
/// // Lowercase is rejected
/// assert!(AirportCode::parse("ord").is_err());
///
/// // Wrong length is rejected
/// assert!(AirportCode::parse("OR").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AirportCode([u8; 3]);

impl AirportCode {
    /// Parse an airport code from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidAirportCode> {
        match validate(s.as_bytes()) {
            Ok(bytes) => Ok(AirportCode(bytes)),
            Err(reason) => Err(InvalidAirportCode {
                code: s.to_string(),
                reason,
            }),
        }
    }

    /// Build a code from a literal in a `const` item.
    ///
    /// Evaluated at compile time when used in a `const`, so a malformed
    /// literal fails the build rather than a run.
    pub const fn from_static(s: &'static str) -> Self {
        match validate(s.as_bytes()) {
            Ok(bytes) => AirportCode(bytes),
            Err(_) => panic!("invalid airport code literal"),
        }
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII uppercase letters are ever stored.
        std::str::from_utf8(&self.0).unwrap_or("???")
    }
}

const fn validate(bytes: &[u8]) -> Result<[u8; 3], &'static str> {
    if bytes.len() != 3 {
        return Err("must be exactly 3 characters");
    }

    let mut i = 0;
    while i < 3 {
        if !bytes[i].is_ascii_uppercase() {
            return Err("must be uppercase ASCII letters A-Z");
        }
        i += 1;
    }

    Ok([bytes[0], bytes[1], bytes[2]])
}

impl fmt::Debug for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AirportCode({})", self.as_str())
    }
}

impl fmt::Display for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Join codes with commas, the list format the search API expects.
pub fn join_codes(codes: &[AirportCode]) -> String {
    codes
        .iter()
        .map(AirportCode::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_codes() {
        assert!(AirportCode::parse("ORD").is_ok());
        assert!(AirportCode::parse("HND").is_ok());
        assert!(AirportCode::parse("TPE").is_ok());
    }

    #[test]
    fn reject_lowercase() {
        assert!(AirportCode::parse("ord").is_err());
        assert!(AirportCode::parse("Ord").is_err());
    }

    #[test]
    fn reject_wrong_length() {
        assert!(AirportCode::parse("").is_err());
        assert!(AirportCode::parse("OR").is_err());
        assert!(AirportCode::parse("ORDX").is_err());
    }

    #[test]
    fn reject_non_letters() {
        assert!(AirportCode::parse("O1D").is_err());
        assert!(AirportCode::parse("O D").is_err());
    }

    #[test]
    fn error_mentions_input() {
        let err = AirportCode::parse("xx").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid airport code \"xx\": must be exactly 3 characters"
        );
    }

    #[test]
    fn const_construction_matches_parse() {
        const LAX: AirportCode = AirportCode::from_static("LAX");
        assert_eq!(LAX, AirportCode::parse("LAX").unwrap());
        assert_eq!(format!("{LAX:?}"), "AirportCode(LAX)");
    }

    #[test]
    fn join_codes_uses_commas() {
        let codes = [
            AirportCode::parse("ORD").unwrap(),
            AirportCode::parse("DFW").unwrap(),
        ];
        assert_eq!(join_codes(&codes), "ORD,DFW");
        assert_eq!(join_codes(&[]), "");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any three uppercase letters parse and display back unchanged
        #[test]
        fn valid_codes_roundtrip(s in "[A-Z]{3}") {
            let code = AirportCode::parse(&s).unwrap();
            prop_assert_eq!(code.to_string(), s);
        }

        /// Anything containing a lowercase letter is rejected
        #[test]
        fn lowercase_rejected(s in "[a-z][A-Z]{2}") {
            prop_assert!(AirportCode::parse(&s).is_err());
        }
    }
}
