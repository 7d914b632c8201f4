use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Code numérique d'un créneau : `jour*100 + heure*10 + dizaines de minutes`.
///
/// L'encodage ne représente que des multiples de dix minutes et une heure
/// sur un seul chiffre : c'est une contrainte du domaine, pas un bug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotCode(u32);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("day code must be at least 1")]
    ZeroDay,
    #[error("hour must be a single digit, got {0}")]
    HourOutOfRange(u8),
    #[error("minute tens must be a single digit, got {0}")]
    MinuteTensOutOfRange(u8),
    #[error("slot code {0} has no day component")]
    NoDay(u32),
}

impl SlotCode {
    /// Compose un code à partir de ses trois composantes.
    pub fn encode(day: u32, hour: u8, minute_tens: u8) -> Result<Self, EncodingError> {
        if day == 0 {
            return Err(EncodingError::ZeroDay);
        }
        if hour > 9 {
            return Err(EncodingError::HourOutOfRange(hour));
        }
        if minute_tens > 9 {
            return Err(EncodingError::MinuteTensOutOfRange(minute_tens));
        }
        Ok(Self(day * 100 + u32::from(hour) * 10 + u32::from(minute_tens)))
    }

    /// Accepte un code brut (fichier de config, JSON) s'il porte un jour.
    pub fn from_raw(raw: u32) -> Result<Self, EncodingError> {
        if raw < 100 {
            return Err(EncodingError::NoDay(raw));
        }
        Ok(Self(raw))
    }

    pub fn raw(self) -> u32 {
        self.0
    }

    /// `(jour, heure, dizaines de minutes)`
    pub fn decode(self) -> (u32, u8, u8) {
        let day = self.0 / 100;
        let hour = ((self.0 % 100) / 10) as u8;
        let minute_tens = (self.0 % 10) as u8;
        (day, hour, minute_tens)
    }

    pub fn day(self) -> u32 {
        self.decode().0
    }

    /// Jours 1..=7 lus comme dimanche..samedi.
    pub fn weekday(self) -> Option<Weekday> {
        match self.day() {
            1 => Some(Weekday::Sun),
            2 => Some(Weekday::Mon),
            3 => Some(Weekday::Tue),
            4 => Some(Weekday::Wed),
            5 => Some(Weekday::Thu),
            6 => Some(Weekday::Fri),
            7 => Some(Weekday::Sat),
            _ => None,
        }
    }

    /// Libellé d'affichage, ex. `(2) @ 2:00` ou `(5/2) @ 2:00` avec un mois.
    pub fn label(self, month: Option<u8>) -> String {
        let (day, hour, minute_tens) = self.decode();
        let mut buf = itoa::Buffer::new();
        let mut out = String::with_capacity(16);
        out.push('(');
        if let Some(m) = month {
            out.push_str(buf.format(m));
            out.push('/');
        }
        out.push_str(buf.format(day));
        out.push_str(") @ ");
        out.push_str(buf.format(hour));
        out.push(':');
        out.push_str(buf.format(minute_tens));
        out.push('0');
        out
    }
}

impl fmt::Display for SlotCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
