mod check;
mod placement;
mod types;

pub use types::{AllocError, InvariantError, PlacementEvent, RunSummary};

use crate::config::SlotTable;
use crate::encoding::SlotCode;
use crate::model::{Person, PersonIdx, Request, Slot};
use std::collections::{HashMap, HashSet};

/// Arène personnes/créneaux d'une passe d'affectation.
///
/// Les personnes gardent l'ordre d'entrée, qui sert de priorité ; les créneaux
/// gardent l'ordre canonique de la table.
#[derive(Debug)]
pub struct Allocation {
    people: Vec<Person>,
    slots: Vec<Slot>,
    index: HashMap<SlotCode, usize>,
    in_flight: Vec<bool>,
    events: Vec<PlacementEvent>,
    pops: usize,
    displacements: usize,
}

impl Allocation {
    /// Construit l'arène ; refuse emails en double et choix hors table.
    pub fn new(table: &SlotTable, requests: Vec<Request>) -> Result<Self, AllocError> {
        table.validate()?;

        let slots: Vec<Slot> = table
            .slots
            .iter()
            .map(|spec| Slot::new(spec.code, spec.capacity))
            .collect();
        let index = slots
            .iter()
            .enumerate()
            .map(|(i, s)| (s.code, i))
            .collect::<HashMap<_, _>>();

        let mut emails = HashSet::new();
        for req in &requests {
            if !emails.insert(req.email.as_str()) {
                return Err(AllocError::DuplicateEmail(req.email.clone()));
            }
            if let Some(code) = req.choices.iter().find(|c| !index.contains_key(*c)) {
                return Err(AllocError::UnknownSlot {
                    email: req.email.clone(),
                    code: *code,
                });
            }
        }

        let people: Vec<Person> = requests.into_iter().map(Person::from_request).collect();
        Ok(Self {
            in_flight: vec![false; people.len()],
            people,
            slots,
            index,
            events: Vec::new(),
            pops: 0,
            displacements: 0,
        })
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn person(&self, who: PersonIdx) -> &Person {
        &self.people[who.0]
    }

    pub fn find_person(&self, email: &str) -> Option<&Person> {
        self.people.iter().find(|p| p.email == email)
    }

    /// Créneaux dans l'ordre canonique.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot(&self, code: SlotCode) -> Option<&Slot> {
        self.index.get(&code).map(|&i| &self.slots[i])
    }

    pub fn events(&self) -> &[PlacementEvent] {
        &self.events
    }

    /// Tente de placer une personne pas encore assise.
    ///
    /// Renvoie `true` si elle a (déjà) un siège. Un échec n'est pas une erreur :
    /// la personne reste simplement sans créneau.
    pub fn try_place(&mut self, who: PersonIdx) -> bool {
        if self.people[who.0].is_assigned() {
            return true;
        }
        let placed = placement::try_place(self, who);
        if !placed {
            self.record(PlacementEvent::Exhausted { person: who });
        }
        placed
    }

    /// Place tout le monde dans l'ordre d'entrée puis vérifie la cohérence.
    pub fn run(&mut self) -> Result<RunSummary, AllocError> {
        for i in 0..self.people.len() {
            self.try_place(PersonIdx(i));
        }
        self.check_invariants()?;

        let summary = self.summary();
        #[cfg(feature = "logging")]
        tracing::info!(
            people = summary.people,
            assigned = summary.assigned,
            unassigned = summary.unassigned,
            displacements = summary.displacements,
            pops = summary.pops,
            "allocation finished"
        );
        Ok(summary)
    }

    pub fn summary(&self) -> RunSummary {
        let assigned = self.people.iter().filter(|p| p.is_assigned()).count();
        RunSummary {
            people: self.people.len(),
            assigned,
            unassigned: self.people.len() - assigned,
            displacements: self.displacements,
            pops: self.pops,
        }
    }

    pub fn unassigned(&self) -> impl Iterator<Item = &Person> + '_ {
        self.people.iter().filter(|p| !p.is_assigned())
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        check::check_invariants(self)
    }

    fn record(&mut self, event: PlacementEvent) {
        #[cfg(feature = "logging")]
        match event {
            PlacementEvent::Seated { person, slot } => {
                tracing::debug!(email = %self.people[person.0].email, %slot, "seated");
            }
            PlacementEvent::Displaced {
                person,
                slot,
                evicted,
            } => {
                tracing::debug!(
                    email = %self.people[person.0].email,
                    evicted = %self.people[evicted.0].email,
                    %slot,
                    "displaced"
                );
            }
            PlacementEvent::Exhausted { person } => {
                tracing::debug!(email = %self.people[person.0].email, "no slot left");
            }
        }
        self.events.push(event);
    }
}

/// Construit l'arène et lance la passe unique.
pub fn allocate(table: &SlotTable, requests: Vec<Request>) -> Result<Allocation, AllocError> {
    let mut alloc = Allocation::new(table, requests)?;
    alloc.run()?;
    Ok(alloc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SlotSpec;

    fn code(raw: u32) -> SlotCode {
        SlotCode::from_raw(raw).unwrap()
    }

    fn table(slots: &[(u32, usize)]) -> SlotTable {
        SlotTable {
            month: None,
            location: None,
            slots: slots
                .iter()
                .map(|(c, cap)| SlotSpec {
                    code: code(*c),
                    capacity: *cap,
                })
                .collect(),
        }
    }

    fn req(email: &str, choices: &[u32]) -> Request {
        Request::new(email, choices.iter().map(|c| code(*c)).collect())
    }

    #[test]
    fn new_occupants_go_to_the_front() {
        let mut alloc = Allocation::new(
            &table(&[(220, 3)]),
            vec![req("a", &[220]), req("b", &[220]), req("c", &[220])],
        )
        .unwrap();
        alloc.run().unwrap();
        let order: Vec<usize> = alloc.slots()[0].occupants.iter().map(|p| p.0).collect();
        assert_eq!(order, vec![2, 1, 0]);
    }

    #[test]
    fn displacement_scans_front_to_back() {
        // b est en tête : c'est lui qu'on essaie de déloger en premier.
        let mut alloc = Allocation::new(
            &table(&[(220, 2), (320, 1), (420, 1)]),
            vec![
                req("a", &[220, 420]),
                req("b", &[220, 320]),
                req("c", &[220]),
            ],
        )
        .unwrap();
        let summary = alloc.run().unwrap();
        assert_eq!(summary.unassigned, 0);
        assert_eq!(alloc.find_person("b").unwrap().assigned, Some(code(320)));
        assert_eq!(alloc.find_person("a").unwrap().assigned, Some(code(220)));
        assert_eq!(alloc.find_person("c").unwrap().assigned, Some(code(220)));
        let order: Vec<usize> = alloc.slots()[0].occupants.iter().map(|p| p.0).collect();
        assert_eq!(order, vec![2, 0]);
    }

    #[test]
    fn in_flight_occupant_is_not_displaced_again() {
        // p déloge q ; q tente 320 et déloge r, qui veut revenir sur 220
        // où q est encore assis. q, en cours de placement, n'est pas
        // proposé : r reste sur 320 et q descend sur 420.
        let mut alloc = Allocation::new(
            &table(&[(220, 1), (320, 1), (420, 1)]),
            vec![
                req("q", &[220, 320, 420]),
                req("r", &[320, 220]),
                req("p", &[220]),
            ],
        )
        .unwrap();
        alloc.run().unwrap();
        alloc.check_invariants().unwrap();
        assert_eq!(alloc.find_person("p").unwrap().assigned, Some(code(220)));
        assert_eq!(alloc.find_person("q").unwrap().assigned, Some(code(420)));
        assert_eq!(alloc.find_person("r").unwrap().assigned, Some(code(320)));
        assert_eq!(alloc.summary().displacements, 1);
    }

    #[test]
    fn rejects_unknown_slot_and_duplicate_email() {
        let err = Allocation::new(&table(&[(220, 3)]), vec![req("a", &[220, 224])]).unwrap_err();
        assert!(matches!(err, AllocError::UnknownSlot { code: c, .. } if c == code(224)));

        let err = Allocation::new(&table(&[(220, 3)]), vec![req("a", &[220]), req("a", &[])])
            .unwrap_err();
        assert!(matches!(err, AllocError::DuplicateEmail(e) if e == "a"));
    }

    #[test]
    fn try_place_on_seated_person_is_a_no_op() {
        let mut alloc = Allocation::new(&table(&[(220, 1), (320, 1)]), vec![req("a", &[220, 320])])
            .unwrap();
        assert!(alloc.try_place(PersonIdx(0)));
        assert!(alloc.try_place(PersonIdx(0)));
        assert_eq!(alloc.person(PersonIdx(0)).preferences.len(), 1);
        assert_eq!(alloc.events().len(), 1);
    }
}
