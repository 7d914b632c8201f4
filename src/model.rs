use crate::encoding::SlotCode;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Poignée stable vers une personne de l'arène (position dans l'ordre d'entrée).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PersonIdx(pub usize);

/// Demande brute : un email et ses choix classés, le meilleur en premier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub email: String,
    pub choices: Vec<SlotCode>,
}

impl Request {
    pub fn new<E: Into<String>>(email: E, choices: Vec<SlotCode>) -> Self {
        Self {
            email: email.into(),
            choices,
        }
    }
}

/// Personne à placer.
#[derive(Debug, Clone)]
pub struct Person {
    pub email: String,
    /// Choix restants, consommés par l'avant ; jamais réalimentés.
    pub preferences: VecDeque<SlotCode>,
    /// Classement d'origine, intact.
    pub choices: Vec<SlotCode>,
    pub assigned: Option<SlotCode>,
}

impl Person {
    pub fn from_request(req: Request) -> Self {
        Self {
            email: req.email,
            preferences: req.choices.iter().copied().collect(),
            choices: req.choices,
            assigned: None,
        }
    }

    pub fn is_assigned(&self) -> bool {
        self.assigned.is_some()
    }

    /// Tous les choix ont été tentés.
    pub fn is_exhausted(&self) -> bool {
        self.preferences.is_empty()
    }
}

/// Créneau à capacité fixe.
#[derive(Debug, Clone)]
pub struct Slot {
    pub code: SlotCode,
    pub capacity: usize,
    /// Ordre = historique d'insertion (en tête) et de remplacement (sur place).
    pub occupants: Vec<PersonIdx>,
}

impl Slot {
    pub fn new(code: SlotCode, capacity: usize) -> Self {
        Self {
            code,
            capacity,
            occupants: Vec::with_capacity(capacity),
        }
    }

    pub fn has_room(&self) -> bool {
        self.occupants.len() < self.capacity
    }

    pub fn len(&self) -> usize {
        self.occupants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occupants.is_empty()
    }
}
