//! Configuration for Callboard
//!
//! CLI arguments and environment variable handling using clap.

use clap::Parser;
use std::net::SocketAddr;

/// Callboard - studio management dashboard backend
#[derive(Parser, Debug, Clone)]
#[command(name = "callboard")]
#[command(about = "Studio management dashboard backend")]
pub struct Args {
    /// Address to listen on
    #[arg(long, env = "LISTEN", default_value = "0.0.0.0:8080")]
    pub listen: SocketAddr,

    /// Run against the production database. Disables the in-memory
    /// degraded mode: reads fail soft, writes fail loud.
    #[arg(long, env = "PRODUCTION", default_value = "false")]
    pub production: bool,

    /// Production MongoDB connection URI
    #[arg(long, env = "MONGODB_URI", default_value = "mongodb://localhost:27017")]
    pub mongodb_uri: String,

    /// Production MongoDB database name
    #[arg(long, env = "MONGODB_DB", default_value = "callboard")]
    pub mongodb_db: String,

    /// Development MongoDB connection URI
    #[arg(long, env = "MONGODB_DEV_URI", default_value = "mongodb://localhost:27017")]
    pub mongodb_dev_uri: String,

    /// Development MongoDB database name
    #[arg(long, env = "MONGODB_DEV_DB", default_value = "callboard_dev")]
    pub mongodb_dev_db: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Effective (URI, database name) pair for the current mode
    pub fn database(&self) -> (&str, &str) {
        if self.production {
            (&self.mongodb_uri, &self.mongodb_db)
        } else {
            (&self.mongodb_dev_uri, &self.mongodb_dev_db)
        }
    }

    /// Validate configuration
    ///
    /// Production and development must never resolve to the same physical
    /// database; a shared target would let development traffic corrupt
    /// production data the first time the fallback path is exercised.
    pub fn validate(&self) -> Result<(), String> {
        if self.mongodb_uri == self.mongodb_dev_uri && self.mongodb_db == self.mongodb_dev_db {
            return Err(
                "production and development must not point at the same database \
                 (check MONGODB_URI/MONGODB_DB vs MONGODB_DEV_URI/MONGODB_DEV_DB)"
                    .to_string(),
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> Args {
        Args::parse_from(["callboard"])
    }

    #[test]
    fn test_defaults_are_valid() {
        // Same URI but distinct database names is a valid split
        assert!(args().validate().is_ok());
    }

    #[test]
    fn test_same_database_rejected() {
        let mut a = args();
        a.mongodb_dev_db = a.mongodb_db.clone();
        assert!(a.validate().is_err());
    }

    #[test]
    fn test_mode_selects_database() {
        let mut a = args();
        a.production = false;
        assert_eq!(a.database().1, "callboard_dev");
        a.production = true;
        assert_eq!(a.database().1, "callboard");
    }
}
