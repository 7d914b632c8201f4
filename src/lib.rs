#![forbid(unsafe_code)]
//! Slotmatch — répartition de personnes sur des créneaux à capacité limitée.
//!
//! - Classements lus depuis du texte libre (un créneau = `jour)` ... `H:M`).
//! - Une passe unique, déterministe, par délogement récursif.
//! - Rapports texte et mapping email → créneau persisté en JSON.

pub mod allocator;
pub mod config;
pub mod contacts;
pub mod encoding;
pub mod io;
pub mod model;
pub mod parser;
pub mod report;
pub mod storage;

pub use allocator::{allocate, AllocError, Allocation, InvariantError, PlacementEvent, RunSummary};
pub use config::{load_slot_table, SlotSpec, SlotTable};
pub use encoding::{EncodingError, SlotCode};
pub use model::{Person, PersonIdx, Request, Slot};
pub use parser::{parse_all, parse_preferences, ParseError};
pub use report::Report;
pub use storage::{JsonMappingStore, LabelMapping, MappingStore};
