//! Typed DeepSource records.
//!
//! These are immutable values built fresh per request by the mappers in
//! [`crate::mapping`]. Enum fields carry a fixed set of upstream wire values;
//! anything outside that set is replaced by a per-field default during
//! mapping, never stored as-is.

/// Wire values accepted for an upstream enum.
pub trait KnownValues {
    const VALUES: &'static [&'static str];
}

/// Declares an upstream enum with its wire names.
///
/// Generates serde renames, `Display`, `FromStr` and [`KnownValues`].
macro_rules! graphql_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $wire)] $variant, )+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $wire, )+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $wire => Ok($name::$variant), )+
                    _ => Err(format!("Invalid {}: {}", stringify!($name), s)),
                }
            }
        }

        impl $crate::models::KnownValues for $name {
            const VALUES: &'static [&'static str] = &[$($wire),+];
        }
    };
}

mod issue;
mod metric;
mod project;
mod report;
mod run;
mod vulnerability;


pub use issue::*;
pub use metric::*;
pub use project::*;
pub use report::*;
pub use run::*;
pub use vulnerability::*;
