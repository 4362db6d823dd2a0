//! SQL construction for targeted partial updates.

use atlas_core::patch::{FieldValue, ResolvedField};
use atlas_core::types::DbId;
use sqlx::{Postgres, QueryBuilder};

/// Build `UPDATE {table} SET col = $n, ... WHERE id = $m RETURNING {columns}`
/// naming only the resolved columns.
///
/// Column names come from the static field tables in `atlas_core::patch`,
/// never from request input. `fields` must not be empty.
pub(crate) fn build_update<'args>(
    table: &str,
    columns: &str,
    id: DbId,
    fields: &[ResolvedField],
) -> QueryBuilder<'args, Postgres> {
    debug_assert!(!fields.is_empty(), "partial update with no columns");

    let mut builder = QueryBuilder::new(format!("UPDATE {table} SET "));
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            builder.push(", ");
        }
        builder.push(field.column).push(" = ");
        match &field.value {
            FieldValue::Null => builder.push_bind(Option::<String>::None),
            FieldValue::Text(text) => builder.push_bind(text.clone()),
            FieldValue::SmallInt(value) => builder.push_bind(*value),
            FieldValue::BigInt(value) => builder.push_bind(*value),
        };
    }
    builder.push(" WHERE id = ").push_bind(id);
    builder.push(format!(" RETURNING {columns}"));
    builder
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_only_resolved_columns() {
        let fields = vec![
            ResolvedField {
                column: "name",
                value: FieldValue::Text("Oz".into()),
            },
            ResolvedField {
                column: "status",
                value: FieldValue::SmallInt(1),
            },
        ];
        let builder = build_update("countries", "id, name", 7, &fields);
        assert_eq!(
            builder.sql(),
            "UPDATE countries SET name = $1, status = $2 WHERE id = $3 RETURNING id, name"
        );
    }

    #[test]
    fn null_binds_as_parameter() {
        let fields = vec![ResolvedField {
            column: "localized_name",
            value: FieldValue::Null,
        }];
        let builder = build_update("cities", "id", 1, &fields);
        assert_eq!(
            builder.sql(),
            "UPDATE cities SET localized_name = $1 WHERE id = $2 RETURNING id"
        );
    }
}
