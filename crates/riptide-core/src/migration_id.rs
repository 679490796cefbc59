//! Strongly-typed migration id wrapper.

use crate::newtype_string::define_newtype_string;

define_newtype_string! {
    /// Stable identity of a migration record.
    ///
    /// Defaults to the artifact filename when no explicit `id` is declared in
    /// the metadata block, so dependency declarations may reference either.
    /// Prevents accidental mixing of migration ids with filenames, table
    /// names, or other string types.
    pub struct MigrationId;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migration_id_creation() {
        let id = MigrationId::new("V1__init.sql");
        assert_eq!(id.as_str(), "V1__init.sql");
        assert_eq!(format!("{}", id), "V1__init.sql");
    }

    #[test]
    fn test_migration_id_rejects_empty() {
        assert!(MigrationId::try_new("").is_none());
    }

    #[test]
    fn test_migration_id_equality() {
        let id = MigrationId::new("base_tables");
        assert_eq!(id, "base_tables");
        assert_eq!(id, "base_tables".to_string());
    }

    #[test]
    fn test_migration_id_borrow_lookup() {
        use std::collections::HashMap;
        let mut map: HashMap<MigrationId, i32> = HashMap::new();
        map.insert(MigrationId::new("a"), 1);
        // Look up by &str via Borrow<str>
        assert_eq!(map.get("a"), Some(&1));
    }

    #[test]
    fn test_migration_id_serde() {
        let id = MigrationId::new("views");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""views""#);
        let back: MigrationId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);

        let empty: Result<MigrationId, _> = serde_json::from_str(r#""""#);
        assert!(empty.is_err());
    }
}
