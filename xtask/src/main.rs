// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # xtask
//!
//! Developer automation for the tender market workspace.
//!
//! - `cargo xtask ci` runs lint, dependency checks, build, tests and schema
//!   verification
//! - `cargo xtask verify-schema` applies the embedded migrations to an
//!   in-memory `SQLite` database and checks the resulting schema against the
//!   tables the persistence layer expects, then reverts every migration and
//!   checks that nothing is left behind

#![deny(
    clippy::pedantic,
    //clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::{fmt::Debug, io, process::Output, vec};

use cargo_metadata::MetadataCommand;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{Result, eyre::Context, eyre::eyre};
use diesel::sql_types::{Integer, Text};
use diesel::{QueryableByName, RunQueryDsl, SqliteConnection};
use duct::cmd;
use std::collections::{BTreeMap, BTreeSet};
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    match args.run() {
        Ok(()) => (),
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(bin_name = "cargo xtask", styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn run(self) -> Result<()> {
        self.command.run()
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Run CI checks (lint, build, test, schema)
    CI,

    /// Build the project
    #[command(visible_alias = "b")]
    Build,

    /// Run cargo check
    #[command(visible_alias = "c")]
    Check,

    /// Generate code coverage report
    #[command(visible_alias = "cov")]
    Coverage,

    /// Check dependencies
    #[command(visible_alias = "cd")]
    Deny,

    /// Check unused dependencies
    #[command(visible_alias = "m")]
    Machete,

    /// Lint formatting, typos, clippy, and docs
    #[command(visible_alias = "l")]
    Lint,

    /// Run clippy on the project
    #[command(visible_alias = "cl")]
    LintClippy,

    /// Check documentation for errors and warnings
    #[command(visible_alias = "d")]
    LintDocs,

    /// Check for formatting issues in the project
    #[command(visible_alias = "lf")]
    LintFormatting,

    /// Check for typos in the project
    #[command(visible_alias = "lt")]
    LintTypos,

    /// Fix clippy warnings in the project
    #[command(visible_alias = "fc")]
    FixClippy,

    /// Fix formatting issues in the project
    #[command(visible_alias = "fmt")]
    FixFormatting,

    /// Run tests
    #[command(visible_alias = "t")]
    Test,

    /// Run doc tests
    #[command(visible_alias = "td")]
    TestDocs,

    /// Run lib tests
    #[command(visible_alias = "tl")]
    TestLibs,

    /// Verify the migrated `SQLite` schema and its down migrations
    #[command(visible_alias = "vs")]
    VerifySchema,
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::CI => ci(),
            Self::Build => build(),
            Self::Check => check(),
            Self::Deny => deny(),
            Self::Machete => machete(),
            Self::Coverage => coverage(),
            Self::Lint => lint(),
            Self::LintClippy => lint_clippy(),
            Self::LintDocs => lint_docs(),
            Self::LintFormatting => lint_format(),
            Self::LintTypos => lint_typos(),
            Self::FixClippy => fix_clippy(),
            Self::FixFormatting => fix_format(),
            Self::Test => test(),
            Self::TestDocs => test_docs(),
            Self::TestLibs => test_libs(),
            Self::VerifySchema => verify_schema(),
        }
    }
}

/// Run CI checks (lint, build, test, schema)
fn ci() -> Result<()> {
    lint()?;
    deny()?;
    machete()?;
    build()?;
    test()?;
    verify_schema()?;
    Ok(())
}

fn deny() -> Result<()> {
    run_cargo(vec!["deny", "check"])
}

fn machete() -> Result<()> {
    cmd!("cargo-machete").run_with_trace()?;
    Ok(())
}

/// Build the project
fn build() -> Result<()> {
    run_cargo(vec!["build", "--all-targets", "--all-features"])
}

/// Run cargo check
fn check() -> Result<()> {
    run_cargo(vec!["check", "--all-targets", "--all-features"])
}

/// Generate code coverage report
fn coverage() -> Result<()> {
    run_cargo(vec![
        "llvm-cov",
        "--lcov",
        "--output-path",
        "target/lcov.info",
        "--all-features",
    ])
}

/// Lint formatting, typos, clippy, and docs
fn lint() -> Result<()> {
    lint_clippy()?;
    lint_docs()?;
    lint_format()?;
    lint_typos()?;
    Ok(())
}

/// Run clippy on the project
fn lint_clippy() -> Result<()> {
    run_cargo(vec![
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ])
}

/// Fix clippy warnings in the project
fn fix_clippy() -> Result<()> {
    run_cargo(vec![
        "clippy",
        "--all-targets",
        "--all-features",
        "--fix",
        "--allow-dirty",
        "--allow-staged",
        "--",
        "-D",
        "warnings",
    ])
}

/// Check that docs build without errors using docs.rs-equivalent flags
fn lint_docs() -> Result<()> {
    let meta = MetadataCommand::new()
        .exec()
        .wrap_err("failed to get cargo metadata")?;

    for package in meta.workspace_default_packages() {
        cmd(
            "cargo",
            [
                "doc",
                "--no-deps",
                "--all-features",
                "--package",
                &package.name,
            ],
        )
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .env("RUSTDOCFLAGS", "--cfg docsrs -D warnings")
        .run_with_trace()?;
    }

    Ok(())
}

/// Lint formatting issues in the project
fn lint_format() -> Result<()> {
    run_cargo_nightly(vec!["fmt", "--all", "--check"])
}

/// Fix formatting issues in the project
fn fix_format() -> Result<()> {
    run_cargo_nightly(vec!["fmt", "--all"])
}

/// Check for typos in the project using [typos-cli](https://github.com/crate-ci/typos/)
fn lint_typos() -> Result<()> {
    cmd!("typos").run_with_trace()?;
    Ok(())
}

/// Run lib and doc tests
fn test() -> Result<()> {
    test_libs()?;
    test_docs()?; // slow, run last
    Ok(())
}

/// Run doc tests for the workspace's default packages
fn test_docs() -> Result<()> {
    run_cargo(vec!["test", "--doc", "--all-features"])
}

/// Run lib tests for the workspace's default packages
fn test_libs() -> Result<()> {
    run_cargo(vec!["test", "--all-targets", "--all-features"])
}

/// Run a cargo subcommand with the default toolchain
fn run_cargo(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args).run_with_trace()?;
    Ok(())
}

/// Run a cargo subcommand with the nightly toolchain
fn run_cargo_nightly(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args)
        // CARGO is set because we're running in a cargo subcommand
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .run_with_trace()?;
    Ok(())
}

/// Tables the persistence layer reads and writes, with the foreign keys each
/// one must carry as `(column, referenced table)`.
const EXPECTED_TABLES: &[(&str, &[(&str, &str)])] = &[
    ("employee", &[]),
    ("organization", &[]),
    (
        "organization_responsible",
        &[("organization_id", "organization"), ("user_id", "employee")],
    ),
    ("tender", &[("organization_id", "organization")]),
    ("tender_history", &[("tender_id", "tender")]),
    ("bid", &[("tender_id", "tender")]),
    ("bid_history", &[("bid_id", "bid")]),
    (
        "decision",
        &[
            ("voter_id", "employee"),
            ("organization_id", "organization"),
            ("tender_id", "tender"),
            ("bid_id", "bid"),
        ],
    ),
    ("review", &[]),
];

/// Unique constraints the business rules depend on.
const EXPECTED_UNIQUE: &[(&str, &[&str])] = &[
    ("employee", &["username"]),
    ("organization_responsible", &["user_id"]),
    ("decision", &["voter_id", "bid_id"]),
];

/// Verify the migrated `SQLite` schema
///
/// ## What This Command Does
///
/// 1. Opens an in-memory `SQLite` database with foreign keys enabled
/// 2. Applies every embedded migration
/// 3. Introspects the resulting tables, foreign keys and unique constraints
/// 4. Checks them against the tables the persistence layer expects
/// 5. Reverts every migration and checks that no tables remain
///
/// ## Usage
///
/// ```bash
/// cargo xtask verify-schema
/// ```
fn verify_schema() -> Result<()> {
    use diesel::Connection;
    use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

    const MIGRATIONS: EmbeddedMigrations = embed_migrations!("../crates/persistence/migrations");

    tracing::info!("Starting schema verification");

    let mut conn = SqliteConnection::establish(":memory:")
        .wrap_err("Failed to create SQLite in-memory database")?;

    diesel::sql_query("PRAGMA foreign_keys = ON")
        .execute(&mut conn)
        .wrap_err("Failed to enable foreign keys on SQLite")?;

    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| eyre!("Failed to apply SQLite migrations: {e}"))?;
    tracing::info!("Migrations applied");

    let schema = introspect_sqlite_schema(&mut conn)?;
    check_schema(&schema)?;
    tracing::info!("Schema matches expected tables");

    conn.revert_all_migrations(MIGRATIONS)
        .map_err(|e| eyre!("Failed to revert SQLite migrations: {e}"))?;

    let leftover = introspect_sqlite_schema(&mut conn)?;
    if !leftover.tables.is_empty() {
        let names: Vec<&String> = leftover.tables.keys().collect();
        return Err(eyre!(
            "❌ Schema verification FAILED: tables left after reverting migrations: {names:?}"
        ));
    }

    tracing::info!("✓ Schema verification passed");
    Ok(())
}

/// Normalized schema representation
#[derive(Debug, Clone, PartialEq, Eq)]
struct Schema {
    tables: BTreeMap<String, Table>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Table {
    columns: BTreeSet<String>,
    primary_keys: BTreeSet<String>,
    foreign_keys: BTreeSet<ForeignKey>,
    unique_constraints: BTreeSet<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct ForeignKey {
    from_column: String,
    to_table: String,
    to_column: String,
}

/// Introspect `SQLite` schema
fn introspect_sqlite_schema(conn: &mut SqliteConnection) -> Result<Schema> {
    #[derive(QueryableByName)]
    struct TableName {
        #[diesel(sql_type = Text)]
        name: String,
    }

    #[derive(QueryableByName)]
    struct ColumnInfo {
        #[diesel(sql_type = Text)]
        name: String,
        #[diesel(sql_type = Integer)]
        pk: i32,
    }

    #[derive(QueryableByName)]
    struct ForeignKeyInfo {
        #[diesel(sql_type = Text)]
        table: String,
        #[diesel(sql_type = Text)]
        from: String,
        #[diesel(sql_type = Text)]
        to: String,
    }

    #[derive(QueryableByName)]
    struct IndexInfo {
        #[diesel(sql_type = Text)]
        name: String,
        #[diesel(sql_type = Integer)]
        unique: i32,
    }

    #[derive(QueryableByName)]
    struct IndexColumnInfo {
        #[diesel(sql_type = Text)]
        name: String,
    }

    let mut schema = Schema {
        tables: BTreeMap::new(),
    };

    let tables: Vec<TableName> = diesel::sql_query(
        "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' AND name != '__diesel_schema_migrations' ORDER BY name"
    )
    .load(conn)
    .wrap_err("Failed to query SQLite tables")?;

    for table in tables {
        let mut table_info = Table {
            columns: BTreeSet::new(),
            primary_keys: BTreeSet::new(),
            foreign_keys: BTreeSet::new(),
            unique_constraints: BTreeSet::new(),
        };

        let columns: Vec<ColumnInfo> =
            diesel::sql_query(format!("PRAGMA table_info({})", table.name))
                .load(conn)
                .wrap_err(format!("Failed to get columns for table {}", table.name))?;

        for col in columns {
            if col.pk > 0 {
                table_info.primary_keys.insert(col.name.clone());
            }
            table_info.columns.insert(col.name);
        }

        let fks: Vec<ForeignKeyInfo> =
            diesel::sql_query(format!("PRAGMA foreign_key_list({})", table.name))
                .load(conn)
                .wrap_err(format!(
                    "Failed to get foreign keys for table {}",
                    table.name
                ))?;

        for fk in fks {
            table_info.foreign_keys.insert(ForeignKey {
                from_column: fk.from,
                to_table: fk.table,
                to_column: fk.to,
            });
        }

        let indexes: Vec<IndexInfo> =
            diesel::sql_query(format!("PRAGMA index_list({})", table.name))
                .load(conn)
                .wrap_err(format!("Failed to get indexes for table {}", table.name))?;

        for idx in indexes.into_iter().filter(|idx| idx.unique != 0) {
            let index_columns: Vec<IndexColumnInfo> =
                diesel::sql_query(format!("PRAGMA index_info({})", idx.name))
                    .load(conn)
                    .wrap_err(format!("Failed to get index columns for {}", idx.name))?;

            table_info
                .unique_constraints
                .insert(index_columns.into_iter().map(|c| c.name).collect());
        }

        schema.tables.insert(table.name, table_info);
    }

    Ok(schema)
}

/// Compare an introspected schema with `EXPECTED_TABLES` and `EXPECTED_UNIQUE`
fn check_schema(schema: &Schema) -> Result<()> {
    let expected: BTreeSet<&str> = EXPECTED_TABLES.iter().map(|(name, _)| *name).collect();
    let actual: BTreeSet<&str> = schema.tables.keys().map(String::as_str).collect();

    if expected != actual {
        let mut errors = Vec::new();
        for table in expected.difference(&actual) {
            errors.push(format!("  - Table '{table}' is missing"));
        }
        for table in actual.difference(&expected) {
            errors.push(format!("  - Table '{table}' is unexpected"));
        }
        return Err(eyre!(
            "❌ Schema verification FAILED: Table mismatch\n{}",
            errors.join("\n")
        ));
    }

    for (table_name, foreign_keys) in EXPECTED_TABLES {
        let table = &schema.tables[*table_name];

        if table.primary_keys.is_empty() {
            return Err(eyre!(
                "❌ Schema verification FAILED: table '{table_name}' has no primary key"
            ));
        }

        for (column, target) in *foreign_keys {
            let found = table
                .foreign_keys
                .iter()
                .any(|fk| fk.from_column == *column && fk.to_table == *target);
            if !found {
                return Err(eyre!(
                    "❌ Schema verification FAILED: '{table_name}.{column}' does not reference '{target}'\n  Found: {:?}",
                    table.foreign_keys
                ));
            }
        }

        for fk in &table.foreign_keys {
            let Some(target) = schema.tables.get(&fk.to_table) else {
                return Err(eyre!(
                    "❌ Schema verification FAILED: '{table_name}.{}' references missing table '{}'",
                    fk.from_column,
                    fk.to_table
                ));
            };
            if !target.columns.contains(&fk.to_column) {
                return Err(eyre!(
                    "❌ Schema verification FAILED: '{table_name}.{}' references missing column '{}.{}'",
                    fk.from_column,
                    fk.to_table,
                    fk.to_column
                ));
            }
        }
    }

    for (table_name, columns) in EXPECTED_UNIQUE {
        let table = &schema.tables[*table_name];
        let wanted: Vec<String> = columns.iter().map(ToString::to_string).collect();
        if !table.unique_constraints.contains(&wanted) {
            return Err(eyre!(
                "❌ Schema verification FAILED: table '{table_name}' lacks UNIQUE {wanted:?}\n  Found: {:?}",
                table.unique_constraints
            ));
        }
    }

    Ok(())
}

/// An extension trait for `duct::Expression` that logs the command being run
/// before running it.
trait ExpressionExt {
    /// Run the command and log the command being run
    fn run_with_trace(&self) -> io::Result<Output>;
}

impl ExpressionExt for duct::Expression {
    fn run_with_trace(&self) -> io::Result<Output> {
        tracing::info!("running command: {:?}", self);
        self.run().inspect_err(|_| {
            // The command may have scrolled off the screen, so repeat it here
            tracing::error!("failed to run command: {:?}", self);
        })
    }
}
