use super::{Allocation, PlacementEvent};
use crate::model::PersonIdx;

/// Place `who` sur son meilleur choix restant, quitte à déloger un occupant.
///
/// Si `who` est déjà assis, l'appelant remplace son ancien siège en cas de succès.
/// Une personne dont l'appel est encore actif n'est jamais proposée au délogement.
pub(super) fn try_place(alloc: &mut Allocation, who: PersonIdx) -> bool {
    alloc.in_flight[who.0] = true;
    let placed = place_from_queue(alloc, who);
    alloc.in_flight[who.0] = false;
    placed
}

fn place_from_queue(alloc: &mut Allocation, who: PersonIdx) -> bool {
    while let Some(code) = alloc.people[who.0].preferences.pop_front() {
        alloc.pops += 1;
        // codes vérifiés à la construction
        let Some(&s) = alloc.index.get(&code) else {
            continue;
        };

        if alloc.slots[s].has_room() {
            alloc.slots[s].occupants.insert(0, who);
            alloc.people[who.0].assigned = Some(code);
            alloc.record(PlacementEvent::Seated {
                person: who,
                slot: code,
            });
            return true;
        }

        // Un créneau plein le reste : les sièges ne bougent plus, seul l'occupant change.
        let mut seat = 0;
        while seat < alloc.slots[s].occupants.len() {
            let occupant = alloc.slots[s].occupants[seat];
            if !alloc.in_flight[occupant.0] && try_place(alloc, occupant) {
                alloc.slots[s].occupants[seat] = who;
                alloc.people[who.0].assigned = Some(code);
                alloc.displacements += 1;
                alloc.record(PlacementEvent::Displaced {
                    person: who,
                    slot: code,
                    evicted: occupant,
                });
                return true;
            }
            seat += 1;
        }
    }
    false
}
