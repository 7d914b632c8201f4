use crate::report::UNASSIGNED_LABEL;
use crate::storage::LabelMapping;
use anyhow::bail;
use std::collections::HashMap;
use std::fmt::Write as _;

/// Coordonnées d'une personne inscrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub email: String,
    pub first: String,
    pub last: String,
}

/// Contact accompagné de son créneau (ou `NONE`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub contact: Contact,
    pub label: String,
}

pub fn zip_contacts(
    emails: &[String],
    first: &[String],
    last: &[String],
) -> anyhow::Result<Vec<Contact>> {
    if emails.len() != first.len() || emails.len() != last.len() {
        bail!(
            "contact lists differ in length: {} emails, {} first names, {} last names",
            emails.len(),
            first.len(),
            last.len()
        );
    }
    Ok(emails
        .iter()
        .zip(first)
        .zip(last)
        .map(|((email, first), last)| Contact {
            email: email.trim().to_string(),
            first: first.trim().to_string(),
            last: last.trim().to_string(),
        })
        .collect())
}

/// Un email n'apparaît qu'une fois : position de la première occurrence,
/// noms de la dernière.
pub fn dedup(contacts: Vec<Contact>) -> Vec<Contact> {
    let mut pos: HashMap<String, usize> = HashMap::new();
    let mut out: Vec<Contact> = Vec::new();
    for c in contacts {
        match pos.get(&c.email) {
            Some(&i) => out[i] = c,
            None => {
                pos.insert(c.email.clone(), out.len());
                out.push(c);
            }
        }
    }
    out
}

pub fn attach_labels(contacts: Vec<Contact>, mapping: &LabelMapping) -> Vec<RosterEntry> {
    contacts
        .into_iter()
        .map(|contact| {
            let label = mapping
                .get(&contact.email)
                .cloned()
                .unwrap_or_else(|| UNASSIGNED_LABEL.to_string());
            RosterEntry { contact, label }
        })
        .collect()
}

/// Groupé par créneau, puis prénom, nom.
pub fn by_scheduled_time(entries: &[RosterEntry]) -> String {
    let mut sorted: Vec<&RosterEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| {
        (&a.label, &a.contact.first, &a.contact.last).cmp(&(
            &b.label,
            &b.contact.first,
            &b.contact.last,
        ))
    });

    let mut out = String::from("By Scheduled Time\n");
    let mut current: Option<&str> = None;
    for e in sorted {
        if current != Some(e.label.as_str()) {
            current = Some(e.label.as_str());
            let _ = writeln!(out, "\n{}", e.label);
        }
        let c = &e.contact;
        let _ = writeln!(out, "  {} {} -- {}", c.first, c.last, c.email);
    }
    out
}

/// Trié par nom puis prénom.
pub fn by_name(entries: &[RosterEntry]) -> String {
    let mut sorted: Vec<&RosterEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| {
        (&a.contact.last, &a.contact.first).cmp(&(&b.contact.last, &b.contact.first))
    });

    let mut out = String::from("By Last Name, First Name\n");
    for e in sorted {
        let c = &e.contact;
        let _ = writeln!(out, "  {} -- {}, {} -- {}", e.label, c.last, c.first, c.email);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(email: &str, first: &str, last: &str) -> Contact {
        Contact {
            email: email.into(),
            first: first.into(),
            last: last.into(),
        }
    }

    #[test]
    fn dedup_keeps_first_position_and_last_names() {
        let out = dedup(vec![
            contact("a@x", "Ann", "Old"),
            contact("b@x", "Bob", "Ray"),
            contact("a@x", "Ann", "New"),
        ]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0], contact("a@x", "Ann", "New"));
        assert_eq!(out[1].email, "b@x");
    }

    #[test]
    fn listings() {
        let mut mapping = LabelMapping::new();
        mapping.insert("a@x".into(), "(5/3) @ 2:00".into());
        mapping.insert("b@x".into(), "(5/2) @ 2:00".into());
        let entries = attach_labels(
            vec![
                contact("a@x", "Ann", "Zed"),
                contact("b@x", "Bob", "Young"),
                contact("c@x", "Cy", "Abel"),
            ],
            &mapping,
        );

        insta::assert_snapshot!(by_scheduled_time(&entries), @r"
        By Scheduled Time

        (5/2) @ 2:00
          Bob Young -- b@x

        (5/3) @ 2:00
          Ann Zed -- a@x

        NONE
          Cy Abel -- c@x
        ");
        insta::assert_snapshot!(by_name(&entries), @r"
        By Last Name, First Name
          NONE -- Abel, Cy -- c@x
          (5/2) @ 2:00 -- Young, Bob -- b@x
          (5/3) @ 2:00 -- Zed, Ann -- a@x
        ");
    }

    #[test]
    fn mismatched_lists_are_rejected() {
        assert!(zip_contacts(&["a".into()], &[], &["z".into()]).is_err());
    }
}
