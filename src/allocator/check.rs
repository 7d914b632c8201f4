use super::{Allocation, InvariantError};
use crate::model::PersonIdx;

pub(super) fn check_invariants(alloc: &Allocation) -> Result<(), InvariantError> {
    let mut seats = vec![0usize; alloc.people.len()];

    for slot in &alloc.slots {
        if slot.len() > slot.capacity {
            return Err(InvariantError::CapacityExceeded {
                slot: slot.code,
                len: slot.len(),
                capacity: slot.capacity,
            });
        }
        for PersonIdx(i) in slot.occupants.iter().copied() {
            let person = &alloc.people[i];
            if person.assigned != Some(slot.code) {
                return Err(InvariantError::SeatMismatch {
                    email: person.email.clone(),
                    slot: slot.code,
                    recorded: person.assigned,
                });
            }
            seats[i] += 1;
        }
    }

    for (person, count) in alloc.people.iter().zip(seats) {
        if count > 1 {
            return Err(InvariantError::SeatedTwice {
                email: person.email.clone(),
                seats: count,
            });
        }
        if let Some(slot) = person.assigned {
            if count == 0 {
                return Err(InvariantError::Orphan {
                    email: person.email.clone(),
                    slot,
                });
            }
            if !person.choices.contains(&slot) {
                return Err(InvariantError::NotRequested {
                    email: person.email.clone(),
                    slot,
                });
            }
        }
    }

    Ok(())
}
