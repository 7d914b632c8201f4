use crate::encoding::{EncodingError, SlotCode};
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Chiffre du jour suivi de `)`, puis au moins un caractère, puis `H:M`
/// (seul le premier chiffre des minutes compte).
const SLOT_PATTERN: &str = r"([0-9])\).+?([0-9]):([0-9])";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("choice #{rank} is not a slot description: {token:?}")]
    Malformed { rank: usize, token: String },
    #[error("choice #{rank} ({token:?}) is not a valid slot: {source}")]
    Encoding {
        rank: usize,
        token: String,
        #[source]
        source: EncodingError,
    },
    #[error("slot {code} is listed twice (choices #{first} and #{again})")]
    Duplicate {
        code: SlotCode,
        first: usize,
        again: usize,
    },
    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<ParseError>,
    },
}

fn slot_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(SLOT_PATTERN).expect("slot pattern is valid"))
}

/// Transforme une ligne de classement en codes de créneaux, dans l'ordre.
///
/// Une ligne vide donne une liste vide. Un seul choix illisible fait échouer
/// toute la ligne, pour que les rangs restent cohérents.
pub fn parse_preferences(line: &str) -> Result<Vec<SlotCode>, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Vec::new());
    }

    let mut out: Vec<SlotCode> = Vec::new();
    for (idx, token) in line.split(',').enumerate() {
        let rank = idx + 1;
        let code = parse_choice(token.trim(), rank)?;
        if let Some(first) = out.iter().position(|c| *c == code) {
            return Err(ParseError::Duplicate {
                code,
                first: first + 1,
                again: rank,
            });
        }
        out.push(code);
    }
    Ok(out)
}

fn parse_choice(token: &str, rank: usize) -> Result<SlotCode, ParseError> {
    let malformed = || ParseError::Malformed {
        rank,
        token: token.to_string(),
    };
    let caps = slot_regex().captures(token).ok_or_else(malformed)?;
    let digit = |i: usize| -> Result<u8, ParseError> {
        caps.get(i)
            .and_then(|m| m.as_str().parse::<u8>().ok())
            .ok_or_else(malformed)
    };
    let (day, hour, tens) = (digit(1)?, digit(2)?, digit(3)?);
    SlotCode::encode(u32::from(day), hour, tens).map_err(|source| ParseError::Encoding {
        rank,
        token: token.to_string(),
        source,
    })
}

/// Analyse plusieurs lignes ; l'erreur porte le numéro de ligne (1-based).
pub fn parse_all<'a, I>(lines: I) -> Result<Vec<Vec<SlotCode>>, ParseError>
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .enumerate()
        .map(|(idx, line)| {
            parse_preferences(line).map_err(|e| ParseError::Line {
                line: idx + 1,
                source: Box::new(e),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(raw: &[u32]) -> Vec<SlotCode> {
        raw.iter().map(|c| SlotCode::from_raw(*c).unwrap()).collect()
    }

    #[test]
    fn parses_ranked_form_answers() {
        let line = "Monday (5/2) 2:00 PM, Tuesday (5/3) 2:40 PM, Wednesday (5/4) 3:20 PM";
        assert_eq!(parse_preferences(line).unwrap(), codes(&[220, 324, 432]));
    }

    #[test]
    fn blank_line_is_an_empty_ranking() {
        assert_eq!(parse_preferences("   ").unwrap(), Vec::new());
    }

    #[test]
    fn one_bad_choice_fails_the_line() {
        let err = parse_preferences("(5/2) 2:00, whenever").unwrap_err();
        assert_eq!(
            err,
            ParseError::Malformed {
                rank: 2,
                token: "whenever".into()
            }
        );
        assert!(matches!(
            parse_preferences("(5/2) 2:00,,(5/3) 2:00"),
            Err(ParseError::Malformed { rank: 2, .. })
        ));
    }

    #[test]
    fn day_zero_is_rejected() {
        assert!(matches!(
            parse_preferences("(5/0) 2:00"),
            Err(ParseError::Encoding {
                source: EncodingError::ZeroDay,
                ..
            })
        ));
    }

    #[test]
    fn duplicate_choice_is_rejected() {
        let err = parse_preferences("(5/2) 2:00, (5/3) 2:00, Mon (5/2) 2:05").unwrap_err();
        assert!(matches!(err, ParseError::Duplicate { first: 1, again: 3, .. }));
    }

    #[test]
    fn parse_all_reports_line_number() {
        let err = parse_all(["(5/2) 2:00", "", "nope"]).unwrap_err();
        match err {
            ParseError::Line { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected {other:?}"),
        }
    }
}
