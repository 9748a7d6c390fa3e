//! Dialect registry for `DbDesk`
//!
//! Static metadata about the database dialects the wizard offers: the
//! identifiers shown in the dialect choice list and the default TCP port the
//! probe layer targets for each of them.

/// Dialect preselected in a fresh wizard form
pub const DEFAULT_DIALECT: &str = "mysql";

/// Port preselected in a fresh wizard form
pub const DEFAULT_PORT: &str = "3306";

/// Dialect identifiers offered by the profile wizard
const KNOWN_DIALECTS: &[&str] = &[
    "firebird",
    "mssql",
    "mysql",
    "oracle",
    "postgresql",
    "sqlite",
    "sybase",
];

/// Returns the dialect identifiers offered by the profile wizard
#[must_use]
pub fn known_dialects() -> &'static [&'static str] {
    KNOWN_DIALECTS
}

/// Returns true if the identifier names a known dialect
#[must_use]
pub fn is_known(dialect: &str) -> bool {
    KNOWN_DIALECTS.contains(&dialect)
}

/// Returns the default TCP port for a dialect's server
///
/// `None` for dialects without a network endpoint (sqlite) and for unknown
/// identifiers.
#[must_use]
pub fn probe_port(dialect: &str) -> Option<u16> {
    match dialect {
        "mysql" => Some(3306),
        "postgresql" => Some(5432),
        "mssql" => Some(1433),
        "oracle" => Some(1521),
        "firebird" => Some(3050),
        "sybase" => Some(5000),
        _ => None,
    }
}
