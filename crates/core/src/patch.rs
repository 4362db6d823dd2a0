//! Partial-update engine: resolve a loosely typed `{field: value}` map into
//! typed column assignments.
//!
//! Each entity publishes a compile-time table of [`FieldSpec`]s. A patch key
//! is matched against the table case-insensitively (underscores ignored, so
//! `localizedName` and `localized_name` are the same key); keys that match
//! nothing are skipped. Matched values are coerced with the per-kind rules in
//! [`coerce`], and the result is a list of [`ResolvedField`]s the repository
//! turns into a single `UPDATE ... SET` naming only those columns.
//!
//! This module has **zero database dependencies**.

use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::status::{normalize_ident, CityType, RecordStatus, StatusId};
use crate::types::DbId;

/// How an incoming value is coerced for a given column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Required text; null and blank strings are rejected.
    Text,
    /// Optional text; null clears the column.
    NullableText,
    /// [`RecordStatus`] stored as its SMALLINT id.
    Status,
    /// [`CityType`] stored as its SMALLINT id.
    CityType,
    /// Reference to another row by id.
    ForeignKey,
}

impl FieldKind {
    pub fn is_nullable(self) -> bool {
        matches!(self, Self::NullableText)
    }
}

/// One patchable field of an entity.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// External (JSON) field name.
    pub name: &'static str,
    /// Alternative key names accepted for the same field.
    pub aliases: &'static [&'static str],
    /// Database column the value is written to.
    pub column: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    fn matches(&self, normalized_key: &str) -> bool {
        normalize_ident(self.name) == normalized_key
            || self
                .aliases
                .iter()
                .any(|alias| normalize_ident(alias) == normalized_key)
    }
}

/// Patchable fields of a country. `id` and `is_deleted` are not listed:
/// the id comes from the path and the deletion flag only changes through
/// delete and restore.
pub const COUNTRY_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "name",
        aliases: &[],
        column: "name",
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: "localized_name",
        aliases: &["persian_name"],
        column: "localized_name",
        kind: FieldKind::NullableText,
    },
    FieldSpec {
        name: "code",
        aliases: &["country_code"],
        column: "code",
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: "status",
        aliases: &[],
        column: "status",
        kind: FieldKind::Status,
    },
];

/// Patchable fields of a city.
pub const CITY_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "name",
        aliases: &[],
        column: "name",
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: "localized_name",
        aliases: &["persian_name"],
        column: "localized_name",
        kind: FieldKind::NullableText,
    },
    FieldSpec {
        name: "code",
        aliases: &["city_code"],
        column: "code",
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: "status",
        aliases: &[],
        column: "status",
        kind: FieldKind::Status,
    },
    FieldSpec {
        name: "type",
        aliases: &["city_type"],
        column: "city_type",
        kind: FieldKind::CityType,
    },
    FieldSpec {
        name: "country_id",
        aliases: &[],
        column: "country_id",
        kind: FieldKind::ForeignKey,
    },
];

/// A coerced value ready to be bound to a statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Null,
    Text(String),
    SmallInt(StatusId),
    BigInt(DbId),
}

/// A column assignment produced by [`resolve_patch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedField {
    pub column: &'static str,
    pub value: FieldValue,
}

/// Find the spec a patch key refers to, if any.
pub fn find_field<'a>(specs: &'a [FieldSpec], key: &str) -> Option<&'a FieldSpec> {
    let normalized = normalize_ident(key);
    specs.iter().find(|spec| spec.matches(&normalized))
}

/// Resolve a patch map against an entity's field table.
///
/// - An empty map is rejected with [`CoreError::InvalidInput`].
/// - Unknown keys are skipped.
/// - A coercion failure aborts the whole patch with
///   [`CoreError::InvalidFieldValue`] naming the key as sent.
/// - If two keys resolve to the same column, the later one wins.
///
/// The returned list may be empty when every key was unknown.
pub fn resolve_patch(
    specs: &[FieldSpec],
    patch: &Map<String, Value>,
) -> Result<Vec<ResolvedField>, CoreError> {
    if patch.is_empty() {
        return Err(CoreError::InvalidInput(
            "No field(s) selected to update".to_string(),
        ));
    }

    let mut resolved: Vec<ResolvedField> = Vec::with_capacity(patch.len());

    for (key, raw) in patch {
        let Some(spec) = find_field(specs, key) else {
            continue;
        };

        let value = coerce(spec.kind, raw).map_err(|message| CoreError::InvalidFieldValue {
            field: key.clone(),
            message,
        })?;

        match resolved.iter_mut().find(|f| f.column == spec.column) {
            Some(existing) => existing.value = value,
            None => resolved.push(ResolvedField {
                column: spec.column,
                value,
            }),
        }
    }

    Ok(resolved)
}

/// Coerce a JSON value into the column representation for `kind`.
///
/// Returns a human-readable message on failure; the caller attaches the
/// field name.
pub fn coerce(kind: FieldKind, raw: &Value) -> Result<FieldValue, String> {
    if raw.is_null() {
        return if kind.is_nullable() {
            Ok(FieldValue::Null)
        } else {
            Err("value must not be null".to_string())
        };
    }

    match kind {
        FieldKind::Text | FieldKind::NullableText => {
            let text = scalar_to_string(raw)?;
            if kind == FieldKind::Text && text.trim().is_empty() {
                return Err("value must not be blank".to_string());
            }
            Ok(FieldValue::Text(text))
        }
        FieldKind::Status => {
            let text = scalar_to_string(raw)?;
            RecordStatus::parse(&text)
                .map(|s| FieldValue::SmallInt(s.id()))
                .ok_or_else(|| format!("'{text}' is not a valid status"))
        }
        FieldKind::CityType => {
            let text = scalar_to_string(raw)?;
            CityType::parse(&text)
                .map(|t| FieldValue::SmallInt(t.id()))
                .ok_or_else(|| format!("'{text}' is not a valid city type"))
        }
        FieldKind::ForeignKey => {
            let id = match raw {
                Value::Number(n) => n.as_i64(),
                Value::String(s) => s.trim().parse::<DbId>().ok(),
                _ => None,
            };
            match id {
                Some(id) if id > 0 => Ok(FieldValue::BigInt(id)),
                _ => Err(format!("'{raw}' is not a valid id")),
            }
        }
    }
}

/// String form of a scalar JSON value. Arrays and objects are rejected.
fn scalar_to_string(raw: &Value) -> Result<String, String> {
    match raw {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err("expected a string, number or boolean".to_string()),
    }
}
