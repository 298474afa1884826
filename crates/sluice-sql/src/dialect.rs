use sluice_core::{Error, Result};

use std::{fmt, str::FromStr};

/// The SQL backends queries can be compiled for.
///
/// The set is closed: every dialect difference is an exhaustive `match` on
/// this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// The file-embedded engine
    Sqlite,

    /// The client/server engine
    SqlServer,

    /// The network-protocol engine
    PostgreSql,
}

impl Dialect {
    /// Quotes an identifier. SQLite and SQL Server use brackets, PostgreSQL
    /// uses double quotes. A closing delimiter inside the name is doubled.
    pub fn escape_identifier(self, name: &str) -> String {
        match self {
            Dialect::Sqlite | Dialect::SqlServer => format!("[{}]", name.replace(']', "]]")),
            Dialect::PostgreSql => format!("\"{}\"", name.replace('"', "\"\"")),
        }
    }

    /// Formats the marker for the parameter named `base_name`, e.g. `p1`.
    pub fn format_parameter_name(self, base_name: &str) -> String {
        match self {
            Dialect::Sqlite => format!("${base_name}"),
            Dialect::SqlServer | Dialect::PostgreSql => format!("@{base_name}"),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Dialect::Sqlite => "sqlite",
            Dialect::SqlServer => "sqlserver",
            Dialect::PostgreSql => "postgresql",
        }
    }

    pub fn is_sqlite(self) -> bool {
        matches!(self, Dialect::Sqlite)
    }

    pub fn is_sql_server(self) -> bool {
        matches!(self, Dialect::SqlServer)
    }

    pub fn is_postgresql(self) -> bool {
        matches!(self, Dialect::PostgreSql)
    }

    /// Picks the dialect from the concrete type name of a connection, e.g.
    /// `rusqlite::Connection` or `tiberius::Client<...>`.
    pub fn from_connection_type_name(type_name: &str) -> Option<Dialect> {
        let name = type_name.to_ascii_lowercase();

        if name.contains("sqlite") {
            Some(Dialect::Sqlite)
        } else if ["tiberius", "mssql", "sqlserver", "sqlconnection"]
            .iter()
            .any(|needle| name.contains(needle))
        {
            Some(Dialect::SqlServer)
        } else if ["postgres", "npgsql"]
            .iter()
            .any(|needle| name.contains(needle))
        {
            Some(Dialect::PostgreSql)
        } else {
            None
        }
    }

    /// The dialect of connection type `C`.
    pub fn of<C: ?Sized>() -> Option<Dialect> {
        Dialect::from_connection_type_name(std::any::type_name::<C>())
    }

    /// Picks the dialect from a connection URL's scheme.
    pub fn from_url(url: &str) -> Result<Dialect> {
        let url = url::Url::parse(url).map_err(|err| {
            Error::invalid_argument(format!("invalid connection url `{url}`: {err}"))
        })?;

        match url.scheme() {
            "sqlite" | "file" => Ok(Dialect::Sqlite),
            "mssql" | "sqlserver" => Ok(Dialect::SqlServer),
            "postgres" | "postgresql" => Ok(Dialect::PostgreSql),
            scheme => Err(Error::invalid_argument(format!(
                "connection url scheme `{scheme}` does not name a supported dialect"
            ))),
        }
    }
}

impl FromStr for Dialect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Dialect> {
        match s.to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Dialect::Sqlite),
            "sqlserver" | "mssql" => Ok(Dialect::SqlServer),
            "postgresql" | "postgres" => Ok(Dialect::PostgreSql),
            _ => Err(Error::invalid_argument(format!("unknown dialect `{s}`"))),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape() {
        assert_eq!(Dialect::Sqlite.escape_identifier("Users"), "[Users]");
        assert_eq!(Dialect::SqlServer.escape_identifier("a]b"), "[a]]b]");
        assert_eq!(Dialect::PostgreSql.escape_identifier("Users"), "\"Users\"");
        assert_eq!(Dialect::PostgreSql.escape_identifier("a\"b"), "\"a\"\"b\"");
    }

    #[test]
    fn parameter_names() {
        assert_eq!(Dialect::Sqlite.format_parameter_name("p1"), "$p1");
        assert_eq!(Dialect::SqlServer.format_parameter_name("p1"), "@p1");
        assert_eq!(Dialect::PostgreSql.format_parameter_name("p1"), "@p1");
    }

    #[test]
    fn connection_type_names() {
        assert_eq!(
            Dialect::from_connection_type_name("rusqlite::Connection"),
            Some(Dialect::Sqlite)
        );
        assert_eq!(
            Dialect::from_connection_type_name("Microsoft.Data.SqlClient.SqlConnection"),
            Some(Dialect::SqlServer)
        );
        assert_eq!(
            Dialect::from_connection_type_name("tokio_postgres::Client"),
            Some(Dialect::PostgreSql)
        );
        assert_eq!(Dialect::from_connection_type_name("mysql::Conn"), None);
    }

    #[test]
    fn of_type() {
        struct SqliteConnection;
        assert_eq!(Dialect::of::<SqliteConnection>(), Some(Dialect::Sqlite));
        assert_eq!(Dialect::of::<String>(), None);
    }

    #[test]
    fn urls() {
        assert_eq!(
            Dialect::from_url("sqlite::memory:").unwrap(),
            Dialect::Sqlite
        );
        assert_eq!(
            Dialect::from_url("postgresql://localhost/app").unwrap(),
            Dialect::PostgreSql
        );
        assert_eq!(
            Dialect::from_url("mssql://localhost:1433").unwrap(),
            Dialect::SqlServer
        );
        assert!(Dialect::from_url("mysql://localhost")
            .unwrap_err()
            .is_invalid_argument());
        assert!(Dialect::from_url("not a url").unwrap_err().is_invalid_argument());
    }

    #[test]
    fn parse() {
        assert_eq!("SqlServer".parse::<Dialect>().unwrap(), Dialect::SqlServer);
        assert_eq!("postgres".parse::<Dialect>().unwrap(), Dialect::PostgreSql);
        assert!("oracle".parse::<Dialect>().unwrap_err().is_invalid_argument());
    }
}
