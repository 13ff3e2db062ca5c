//! Macro for implementing Display and FromStr for option enums
//!
//! Configuration values such as [`crate::DestroyPolicy`] arrive as strings
//! from environment variables and config files. This macro provides both
//! directions with case-insensitive parsing.
//!
//! # Example
//!
//! ```rust
//! use captain_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Encoding {
//!     Query,
//!     Json,
//! }
//!
//! impl_domain_status_conversions!(Encoding {
//!     Query => "query",
//!     Json => "json",
//! });
//!
//! assert_eq!("JSON".parse::<Encoding>().unwrap(), Encoding::Json);
//! ```

/// Implements Display and FromStr traits for simple enums
///
/// This macro generates:
/// - Display trait: converts enum variants to lowercase strings
/// - FromStr trait: parses case-insensitive strings to enum variants
///
/// The string for each variant must be written in lowercase.
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
