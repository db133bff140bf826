use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Pretty-prints an object as JSON. Only fails for types that can't be represented, like maps
/// with non-string keys, so this is only appropriate for types known to be well-behaved.
pub fn to_json<T: Serialize>(obj: &T) -> Result<String> {
    serde_json::to_string_pretty(obj).context("serializing to JSON")
}

pub fn write_json<T: Serialize>(path: &str, obj: &T) -> Result<()> {
    if let Some(parent) = std::path::Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs_err::create_dir_all(parent)?;
        }
    }
    fs_err::write(path, to_json(obj)?)?;
    info!("Wrote {}", path);
    Ok(())
}

pub fn read_json<T: DeserializeOwned>(path: &str) -> Result<T> {
    let contents = fs_err::read_to_string(path)?;
    let obj: T = serde_json::from_str(&contents).with_context(|| format!("parsing {}", path))?;
    Ok(obj)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn json_file_survives_a_write() {
        let dir = std::env::temp_dir().join(format!("abstutil_io_{}", std::process::id()));
        let path = dir.join("nested").join("obj.json").display().to_string();

        let mut obj = BTreeMap::new();
        obj.insert("energy_saving".to_string(), true);
        write_json(&path, &obj).unwrap();
        let back: BTreeMap<String, bool> = read_json(&path).unwrap();
        assert_eq!(obj, back);

        fs_err::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_file_mentions_path() {
        let err = read_json::<BTreeMap<String, bool>>("/definitely/not/here.json").unwrap_err();
        assert!(format!("{:#}", err).contains("/definitely/not/here.json"));
    }
}
