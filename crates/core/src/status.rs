//! Lifecycle and classification enums mapping to SMALLINT lookup tables.
//!
//! Each variant's discriminant matches the seed data in the corresponding
//! lookup table (`record_statuses`, `city_types`). The values are 0-based
//! and are also the wire representation.

/// Status ID type matching SMALLINT in the database.
pub type StatusId = i16;

/// City type ID, stored in the same SMALLINT shape as statuses.
pub type CityTypeId = StatusId;

/// Lowercase an identifier and drop `_`, `-` and spaces so that
/// `"InActive"`, `"in_active"` and `"inactive"` compare equal.
pub(crate) fn normalize_ident(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:expr ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $val ),+
        }

        impl $name {
            /// Every variant, in discriminant order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Return the database ID.
            pub fn id(self) -> StatusId {
                self as StatusId
            }

            /// Look up a variant by its database ID.
            pub fn from_id(id: StatusId) -> Option<Self> {
                Self::ALL.iter().copied().find(|v| v.id() == id)
            }

            /// Canonical variant name.
            pub fn name(self) -> &'static str {
                match self {
                    $( $name::$variant => stringify!($variant) ),+
                }
            }

            /// Parse either the integer form (`"1"`) or the variant name,
            /// case-insensitively.
            pub fn parse(raw: &str) -> Option<Self> {
                let raw = raw.trim();
                if let Ok(id) = raw.parse::<StatusId>() {
                    return Self::from_id(id);
                }
                let wanted = normalize_ident(raw);
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| normalize_ident(v.name()) == wanted)
            }
        }

        impl From<$name> for StatusId {
            fn from(value: $name) -> Self {
                value as StatusId
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_i16(self.id())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                #[derive(::serde::Deserialize)]
                #[serde(untagged)]
                enum Raw {
                    Id(i64),
                    Name(String),
                }

                let parsed = match Raw::deserialize(deserializer)? {
                    Raw::Id(id) => StatusId::try_from(id).ok().and_then(Self::from_id),
                    Raw::Name(name) => Self::parse(&name),
                };
                parsed.ok_or_else(|| {
                    <D::Error as ::serde::de::Error>::custom(concat!(
                        "unknown ",
                        stringify!($name),
                        " value"
                    ))
                })
            }
        }
    };
}

define_status_enum! {
    /// Visibility status shared by countries and cities.
    RecordStatus {
        Active = 0,
        Inactive = 1,
    }
}

define_status_enum! {
    /// Settlement classification of a city.
    CityType {
        Urban = 0,
        Rural = 1,
        SmallCity = 2,
    }
}

impl Default for RecordStatus {
    fn default() -> Self {
        Self::Active
    }
}
