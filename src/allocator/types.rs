use crate::encoding::SlotCode;
use crate::model::PersonIdx;
use thiserror::Error;

/// Changement de siège, dans l'ordre où il a eu lieu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementEvent {
    /// Inséré en tête d'un créneau qui avait de la place.
    Seated { person: PersonIdx, slot: SlotCode },
    /// A pris le siège de `evicted`, déjà replacé ailleurs.
    Displaced {
        person: PersonIdx,
        slot: SlotCode,
        evicted: PersonIdx,
    },
    /// Tous les choix tentés, personne non placée.
    Exhausted { person: PersonIdx },
}

/// Bilan d'une passe complète.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub people: usize,
    pub assigned: usize,
    pub unassigned: usize,
    pub displacements: usize,
    /// Nombre total de choix consommés.
    pub pops: usize,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantError {
    #[error("slot {slot} holds {len} people but its capacity is {capacity}")]
    CapacityExceeded {
        slot: SlotCode,
        len: usize,
        capacity: usize,
    },
    #[error("{email} sits in slot {slot} but is recorded in {recorded:?}")]
    SeatMismatch {
        email: String,
        slot: SlotCode,
        recorded: Option<SlotCode>,
    },
    #[error("{email} occupies {seats} seats")]
    SeatedTwice { email: String, seats: usize },
    #[error("{email} is assigned to {slot} but has no seat there")]
    Orphan { email: String, slot: SlotCode },
    #[error("{email} is assigned to {slot}, which they never asked for")]
    NotRequested { email: String, slot: SlotCode },
}

#[derive(Error, Debug)]
pub enum AllocError {
    #[error("duplicate email: {0}")]
    DuplicateEmail(String),
    #[error("{email} asks for slot {code}, which is not in the slot table")]
    UnknownSlot { email: String, code: SlotCode },
    #[error("internal consistency fault: {0}")]
    Invariant(#[from] InvariantError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
