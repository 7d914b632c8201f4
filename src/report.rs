use crate::allocator::Allocation;
use crate::config::SlotTable;
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Libellé des personnes sans créneau.
pub const UNASSIGNED_LABEL: &str = "NONE";

/// Rendu final d'une passe : deux listings lisibles et le mapping email → libellé.
///
/// Construit en lecture seule à partir de l'état de l'arène.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub by_slot: Vec<String>,
    pub by_occupancy: Vec<String>,
    pub mapping: BTreeMap<String, String>,
    pub unassigned: Vec<String>,
}

impl Report {
    pub fn build(alloc: &Allocation, table: &SlotTable) -> Self {
        Self {
            by_slot: by_slot_lines(alloc, table),
            by_occupancy: by_occupancy_lines(alloc, table),
            mapping: label_mapping(alloc, table),
            unassigned: alloc.unassigned().map(|p| p.email.clone()).collect(),
        }
    }

    /// Texte destiné au flux de diagnostic (stderr).
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("By Slot\n");
        for line in &self.by_slot {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str("\nBy Occupancy\n");
        for line in &self.by_occupancy {
            out.push_str(line);
            out.push('\n');
        }
        if !self.unassigned.is_empty() {
            let _ = writeln!(out, "\nUnassigned ({})", self.unassigned.len());
            for email in &self.unassigned {
                let _ = writeln!(out, "  {email}");
            }
        }
        out
    }
}

/// Personnes triées par créneau (ordre d'entrée conservé), sans créneau en dernier.
pub fn by_slot_lines(alloc: &Allocation, table: &SlotTable) -> Vec<String> {
    let mut people: Vec<_> = alloc.people().iter().collect();
    people.sort_by_key(|p| (p.assigned.is_none(), p.assigned));

    people
        .into_iter()
        .map(|p| {
            let label = p
                .assigned
                .map(|code| table.label(code))
                .unwrap_or_else(|| UNASSIGNED_LABEL.to_string());
            match table.location.as_deref() {
                Some(loc) => format!("{label} -- {loc} -- {}", p.email),
                None => format!("{label} -- {}", p.email),
            }
        })
        .collect()
}

/// Créneaux dans l'ordre canonique, avec remplissage.
pub fn by_occupancy_lines(alloc: &Allocation, table: &SlotTable) -> Vec<String> {
    alloc
        .slots()
        .iter()
        .map(|slot| {
            let mut line = format!(
                "{} -- {}/{}",
                table.label(slot.code),
                slot.len(),
                slot.capacity
            );
            if let Some(day) = slot.code.weekday() {
                let _ = write!(line, " [{day}]");
            }
            line
        })
        .collect()
}

/// Mapping persistant ; les personnes non placées en sont absentes.
pub fn label_mapping(alloc: &Allocation, table: &SlotTable) -> BTreeMap<String, String> {
    alloc
        .people()
        .iter()
        .filter_map(|p| p.assigned.map(|code| (p.email.clone(), table.label(code))))
        .collect()
}
