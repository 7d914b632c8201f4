use anyhow::Context;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Mapping email → libellé de créneau, tel que servi par la recherche.
pub type LabelMapping = BTreeMap<String, String>;

pub trait MappingStore {
    /// Charge le mapping depuis un support.
    fn load(&self) -> anyhow::Result<LabelMapping>;
    /// Sauvegarde de manière atomique.
    fn save(&self, mapping: &LabelMapping) -> anyhow::Result<()>;
}

pub struct JsonMappingStore {
    path: PathBuf,
}

impl JsonMappingStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Libellé d'un email, s'il a été placé.
    pub fn lookup(&self, email: &str) -> anyhow::Result<Option<String>> {
        let mut mapping = self.load()?;
        Ok(mapping.remove(email.trim()))
    }
}

impl MappingStore for JsonMappingStore {
    fn load(&self) -> anyhow::Result<LabelMapping> {
        let data =
            fs::read(&self.path).with_context(|| format!("reading {}", self.path.display()))?;
        let mapping: LabelMapping = serde_json::from_slice(&data)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(mapping)
    }

    fn save(&self, mapping: &LabelMapping) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(mapping)?;
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).with_context(|| "atomic rename")?;
        Ok(())
    }
}
