use crate::model::Request;
use crate::parser::parse_preferences;
use anyhow::{bail, Context};
use csv::ReaderBuilder;
use std::fs;
use std::path::Path;

/// Lit un fichier ligne à ligne (lignes rognées, dernière ligne vide ignorée).
pub fn read_lines<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<String>> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(split_lines(&raw))
}

fn split_lines(raw: &str) -> Vec<String> {
    let mut lines: Vec<String> = raw.split('\n').map(|s| s.trim().to_string()).collect();
    if lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}

/// Assemble deux fichiers parallèles : un email par ligne, un classement par ligne.
pub fn import_requests<P: AsRef<Path>, Q: AsRef<Path>>(
    emails_path: P,
    prefs_path: Q,
) -> anyhow::Result<Vec<Request>> {
    let emails = read_lines(emails_path)?;
    let prefs = read_lines(prefs_path)?;
    zip_requests(&emails, &prefs)
}

pub fn zip_requests(emails: &[String], prefs: &[String]) -> anyhow::Result<Vec<Request>> {
    if emails.len() != prefs.len() {
        bail!(
            "{} emails but {} preference lines; the files must match line by line",
            emails.len(),
            prefs.len()
        );
    }
    emails
        .iter()
        .zip(prefs)
        .enumerate()
        .map(|(idx, (email, line))| to_request(idx + 1, email, line))
        .collect()
}

fn to_request(line_no: usize, email: &str, prefs: &str) -> anyhow::Result<Request> {
    let email = email.trim();
    if email.is_empty() {
        bail!("line {line_no}: empty email");
    }
    let choices = parse_preferences(prefs)
        .with_context(|| format!("line {line_no}: preferences of {email}"))?;
    Ok(Request::new(email, choices))
}

/// Import CSV : header `email,preferences` (classement entre guillemets).
pub fn import_requests_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Request>> {
    let path = path.as_ref();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let mut out = Vec::new();
    for (idx, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let email = rec.get(0).context("missing email")?;
        let prefs = rec.get(1).unwrap_or("");
        // +2 : header puis numérotation à partir de 1
        out.push(to_request(idx + 2, email, prefs)?);
    }
    Ok(out)
}
