//! Well-known default ports. A target only shows its port when it differs
//! from the default for the protocol or database system.

/// Default port for an HTTP scheme.
pub(crate) fn for_http_scheme(scheme: Option<&str>) -> Option<i64> {
    match scheme {
        Some("http") => Some(80),
        Some("https") => Some(443),
        _ => None,
    }
}

/// Default port for the scheme of an absolute URL.
pub(crate) fn for_http_url(url: Option<&str>) -> Option<i64> {
    let url = url?;
    if url.starts_with("https://") {
        Some(443)
    } else if url.starts_with("http://") {
        Some(80)
    } else {
        None
    }
}

/// Default port for a `db.system` value.
pub(crate) fn for_db_system(system: &str) -> Option<i64> {
    match system {
        "mongodb" => Some(27017),
        "cassandra" => Some(9042),
        "redis" => Some(6379),
        "mariadb" | "mysql" => Some(3306),
        "mssql" => Some(1433),
        "db2" => Some(50000),
        "oracle" => Some(1521),
        "h2" => Some(8082),
        "derby" => Some(1527),
        "postgresql" => Some(5432),
        _ => None,
    }
}
