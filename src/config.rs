use crate::encoding::SlotCode;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

pub const DEFAULT_CAPACITY: usize = 3;

/// Table canonique : lundi..vendredi, 2:00 / 2:40 / 3:20 (le jeudi n'en a que deux).
const CANONICAL_CODES: [u32; 14] = [
    220, 224, 232, // lun
    320, 324, 332, // mar
    420, 424, 432, // mer
    520, 524, // jeu
    620, 624, 632, // ven
];

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

/// Un créneau configuré.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSpec {
    pub code: SlotCode,
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

/// Description d'une session : créneaux (dans l'ordre canonique), mois et lieu affichés.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotTable {
    #[serde(default)]
    pub month: Option<u8>,
    #[serde(default)]
    pub location: Option<String>,
    pub slots: Vec<SlotSpec>,
}

impl Default for SlotTable {
    fn default() -> Self {
        Self {
            month: Some(5),
            location: Some("APM 7218".to_string()),
            slots: CANONICAL_CODES
                .iter()
                .map(|raw| SlotSpec {
                    code: SlotCode::from_raw(*raw).expect("canonical codes carry a day"),
                    capacity: DEFAULT_CAPACITY,
                })
                .collect(),
        }
    }
}

impl SlotTable {
    pub fn validate(&self) -> Result<()> {
        if self.slots.is_empty() {
            bail!("slot table must contain at least one slot");
        }
        if let Some(m) = self.month {
            if !(1..=12).contains(&m) {
                bail!("month must be within 1..=12, got {m}");
            }
        }
        let mut seen = HashSet::new();
        for spec in &self.slots {
            SlotCode::from_raw(spec.code.raw())
                .with_context(|| format!("invalid slot code {}", spec.code))?;
            if spec.capacity == 0 {
                bail!("slot {} must have a capacity > 0", spec.code);
            }
            if !seen.insert(spec.code) {
                bail!("slot {} is declared twice", spec.code);
            }
        }
        Ok(())
    }

    pub fn label(&self, code: SlotCode) -> String {
        code.label(self.month)
    }

    pub fn codes(&self) -> impl Iterator<Item = SlotCode> + '_ {
        self.slots.iter().map(|s| s.code)
    }
}

pub fn load_slot_table<P: AsRef<Path>>(path: P) -> Result<SlotTable> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading slot table {}", path.display()))?;
    let table: SlotTable = serde_json::from_slice(&data)
        .with_context(|| format!("parsing slot table {}", path.display()))?;
    table.validate()?;
    Ok(table)
}
