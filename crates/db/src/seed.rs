use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::{DbError, DbResult};

/// Read a JSON array of documents from `path`.
pub fn load_seed<D: DeserializeOwned>(path: &Path) -> DbResult<Vec<D>> {
    let raw = std::fs::read_to_string(path).map_err(|source| DbError::SeedIo {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| DbError::SeedParse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        title: String,
    }

    #[test]
    fn missing_file_reports_path() {
        let path = Path::new("/nonexistent/lendr/seed.json");
        let err = load_seed::<Row>(path).unwrap_err();
        assert!(matches!(err, DbError::SeedIo { .. }));
        assert!(err.to_string().contains("/nonexistent/lendr/seed.json"));
    }

    #[test]
    fn parses_json_array() {
        let path = std::env::temp_dir().join(format!("lendr-seed-{}.json", std::process::id()));
        std::fs::write(&path, r#"[{"title": "Dune"}, {"title": "Emma"}]"#).unwrap();

        let rows: Vec<Row> = load_seed(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].title, "Emma");

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn rejects_malformed_json() {
        let path =
            std::env::temp_dir().join(format!("lendr-seed-bad-{}.json", std::process::id()));
        std::fs::write(&path, "{not json").unwrap();

        let err = load_seed::<Row>(&path).unwrap_err();
        assert!(matches!(err, DbError::SeedParse { .. }));

        std::fs::remove_file(path).ok();
    }
}
