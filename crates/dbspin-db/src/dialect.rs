//! Fixed SQL statement text, per engine dialect.
//!
//! The demonstration table is `tdemo`: an auto-incrementing integer primary
//! key `demo_k` and a short text column `f_name`. Table creation is
//! `IF NOT EXISTS` so a reused container passes setup idempotently.

/// The two fixed demonstration names, in insertion order.
pub const DEMO_NAMES: [&str; 2] = ["john_doe", "jane_smith"];

/// Single-statement insert for both rows; works in both dialects.
pub const INSERT_ROWS: &str = "INSERT INTO tdemo (f_name) VALUES ('john_doe'), ('jane_smith')";

/// Select-all in insertion order; the key column is monotonically assigned.
pub const SELECT_ALL: &str = "SELECT demo_k, f_name FROM tdemo ORDER BY demo_k";

pub mod mariadb {
    pub fn create_database(name: &str) -> String {
        format!("CREATE DATABASE IF NOT EXISTS {name}")
    }

    pub const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS tdemo (\
         demo_k INT AUTO_INCREMENT PRIMARY KEY, \
         f_name VARCHAR(50) NOT NULL)";
}

pub mod postgres {
    /// Postgres has no `CREATE DATABASE IF NOT EXISTS`; existence is
    /// checked against the catalogue first.
    pub fn database_exists(name: &str) -> String {
        format!("SELECT 1 FROM pg_database WHERE datname = '{name}'")
    }

    pub fn create_database(name: &str) -> String {
        format!("CREATE DATABASE {name}")
    }

    pub const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS tdemo (\
         demo_k SERIAL PRIMARY KEY, \
         f_name VARCHAR(50) NOT NULL)";
}
