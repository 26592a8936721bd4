//! Structural checks over the migrated schema.

use quill_core::post::VALID_STATUSES;
use quill_core::repost::{STATUS_APPROVED, STATUS_DENIED, STATUS_REQUESTED};
use quill_core::roles::VALID_ROLES;
use sqlx::PgPool;

/// Append-only tables carry `created_at` but never `updated_at`.
const APPEND_ONLY_TABLES: &[&str] = &["post_categories", "post_views"];

/// Ids are `BIGSERIAL`, matching `DbId = i64`.
#[sqlx::test(migrations = "../../db/migrations")]
async fn all_pks_are_bigint(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, data_type
         FROM information_schema.columns
         WHERE column_name = 'id'
           AND table_schema = 'public'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!rows.is_empty());
    for (table, data_type) in &rows {
        assert_eq!(data_type, "bigint", "Table {table}.id should be bigint");
    }
}

/// Every table has `created_at`; mutable tables also have `updated_at`.
#[sqlx::test(migrations = "../../db/migrations")]
async fn all_tables_have_timestamps(pool: PgPool) {
    let tables: Vec<(String,)> = sqlx::query_as(
        "SELECT table_name
         FROM information_schema.tables
         WHERE table_schema = 'public'
           AND table_type = 'BASE TABLE'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    for (table,) in &tables {
        let columns: &[&str] = if APPEND_ONLY_TABLES.contains(&table.as_str()) {
            &["created_at"]
        } else {
            &["created_at", "updated_at"]
        };

        for col in columns {
            let result: Option<(String,)> = sqlx::query_as(
                "SELECT data_type
                 FROM information_schema.columns
                 WHERE table_schema = 'public'
                   AND table_name = $1
                   AND column_name = $2",
            )
            .bind(table)
            .bind(col)
            .fetch_optional(&pool)
            .await
            .unwrap();

            let (data_type,) =
                result.unwrap_or_else(|| panic!("Table {table} is missing column {col}"));
            assert_eq!(
                data_type, "timestamp with time zone",
                "Table {table}.{col} should be timestamptz, got {data_type}"
            );
        }
    }
}

/// Strings are TEXT; length limits live in CHECK constraints and in `quill_core`.
#[sqlx::test(migrations = "../../db/migrations")]
async fn no_varchar_columns(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, column_name
         FROM information_schema.columns
         WHERE table_schema = 'public'
           AND data_type = 'character varying'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name, column_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(
        rows.is_empty(),
        "Found VARCHAR columns (should use TEXT): {:?}",
        rows
    );
}

/// Every foreign key column leads at least one index.
#[sqlx::test(migrations = "../../db/migrations")]
async fn all_fks_have_indexes(pool: PgPool) {
    let fk_columns: Vec<(String, String)> = sqlx::query_as(
        "SELECT DISTINCT
             tc.table_name,
             kcu.column_name
         FROM information_schema.table_constraints tc
         JOIN information_schema.key_column_usage kcu
             ON tc.constraint_name = kcu.constraint_name
             AND tc.table_schema = kcu.table_schema
         WHERE tc.constraint_type = 'FOREIGN KEY'
           AND tc.table_schema = 'public'
         ORDER BY tc.table_name, kcu.column_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!fk_columns.is_empty());
    for (table, column) in &fk_columns {
        let has_index: bool = sqlx::query_scalar(
            "SELECT EXISTS (
                SELECT 1
                FROM pg_indexes
                WHERE schemaname = 'public'
                  AND tablename = $1
                  AND indexdef LIKE '%(' || $2 || '%'
            )",
        )
        .bind(table)
        .bind(column)
        .fetch_one(&pool)
        .await
        .unwrap();

        assert!(has_index, "FK column {table}.{column} has no leading index");
    }
}

/// Unique constraints follow the `uq_` prefix so the API can map violations to 409.
#[sqlx::test(migrations = "../../db/migrations")]
async fn unique_constraints_are_prefixed(pool: PgPool) {
    let names: Vec<(String,)> = sqlx::query_as(
        "SELECT constraint_name
         FROM information_schema.table_constraints
         WHERE constraint_schema = 'public'
           AND constraint_type = 'UNIQUE'
         ORDER BY constraint_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!names.is_empty());
    for (name,) in &names {
        assert!(name.starts_with("uq_"), "Unique constraint {name} lacks uq_ prefix");
    }
}

async fn check_definition(pool: &PgPool, name: &str) -> String {
    sqlx::query_scalar(
        "SELECT pg_get_constraintdef(oid) FROM pg_constraint WHERE conname = $1",
    )
    .bind(name)
    .fetch_optional(pool)
    .await
    .unwrap()
    .unwrap_or_else(|| panic!("Constraint {name} is missing"))
}

/// Enumerated text columns accept exactly the values the domain layer knows.
#[sqlx::test(migrations = "../../db/migrations")]
async fn status_checks_match_domain_values(pool: PgPool) {
    let cases: [(&str, Vec<&str>); 3] = [
        ("ck_posts_status", VALID_STATUSES.to_vec()),
        ("ck_user_roles_role", VALID_ROLES.to_vec()),
        (
            "ck_repost_requests_status",
            vec![STATUS_REQUESTED, STATUS_APPROVED, STATUS_DENIED],
        ),
    ];

    for (constraint, values) in cases {
        let definition = check_definition(&pool, constraint).await;
        for value in values {
            assert!(
                definition.contains(&format!("'{value}'")),
                "{constraint} does not allow '{value}': {definition}"
            );
        }
    }
}
