//! Balance table loader.
//!
//! Balance values ship as TOML so tuning doesn't require a rebuild. Every
//! field is optional; omitted values keep the shipped defaults.

use std::path::Path;

use anyhow::{Context, bail};
use ashfall_core::env::BalanceTable;

use crate::loaders::{LoadResult, read_file};

pub struct BalanceLoader;

impl BalanceLoader {
    /// Loads and validates a balance table from a TOML file.
    pub fn load(path: &Path) -> LoadResult<BalanceTable> {
        let text = read_file(path)?;
        Self::parse(&text).with_context(|| format!("invalid balance table {}", path.display()))
    }

    pub fn parse(text: &str) -> LoadResult<BalanceTable> {
        let table: BalanceTable = toml::from_str(text).context("malformed TOML")?;
        if table.armor_divisor == 0 {
            bail!("armor_divisor must be at least 1");
        }
        if table.reactive_depth_limit == 0 {
            bail!("reactive_depth_limit must be at least 1");
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let table = BalanceLoader::parse("min_chip_damage = 2\n").unwrap();
        assert_eq!(table.min_chip_damage, 2);
        let defaults = BalanceTable::default();
        assert_eq!(table.armor_divisor, defaults.armor_divisor);
        assert_eq!(table.reactive_depth_limit, defaults.reactive_depth_limit);
    }

    #[test]
    fn zero_armor_divisor_is_rejected() {
        assert!(BalanceLoader::parse("armor_divisor = 0\n").is_err());
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "reactive_depth_limit = 6").unwrap();
        writeln!(file, "surge_kill_refund = false").unwrap();
        writeln!(file, "stomp_stun = 2000").unwrap();
        let table = BalanceLoader::load(file.path()).unwrap();
        assert_eq!(table.reactive_depth_limit, 6);
        assert!(!table.surge_kill_refund);
        assert_eq!(table.stomp_stun, ashfall_core::clock::Millis(2000));
    }

    #[test]
    fn missing_file_reports_the_path() {
        let err = BalanceLoader::load(Path::new("/nonexistent/balance.toml")).unwrap_err();
        assert!(err.to_string().contains("balance.toml"));
    }
}
