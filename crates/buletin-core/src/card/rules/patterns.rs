//! Regex patterns and label markers for Romanian identity cards.
//!
//! The card follows a fixed trilingual template (Romanian/French/English
//! labels), so every pattern is anchored on a label token. Only the labels
//! are case-insensitive; value character classes keep their case.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// CNP: label token, optional colons, exactly 13 digits.
    pub static ref CNP_PATTERN: Regex =
        Regex::new(r"(?i:\bCNP)\s*:*\s*(\d{13})").unwrap();

    /// Surname: label line followed by an uppercase-only line.
    pub static ref LAST_NAME_PATTERN: Regex =
        Regex::new(r"(?i:Nume/Nom/Last name)\s*\n([A-Z]+)").unwrap();

    /// Given name: label line followed by a line of uppercase letters and
    /// hyphens.
    pub static ref FIRST_NAME_PATTERN: Regex =
        Regex::new(r"(?i:Prenume/Prenom/First name)\s*\n([A-Z\-]+)").unwrap();

    /// Address: label line, then letters, digits, spaces, parentheses and
    /// punctuation, possibly spanning several lines.
    pub static ref ADDRESS_PATTERN: Regex =
        Regex::new(r"(?i:Domiciliu/Adresse/Address)\s*\n([A-Za-z\s().,0-9]+)").unwrap();

    /// ID series and document number: `SERIA XX NR 123456`.
    pub static ref ID_SERIES_PATTERN: Regex =
        Regex::new(r"(?i:SERIA)\s+([A-Z]{2})\s+(?i:NR)\s+(\d+)").unwrap();

    /// Loose `DD.MM.YY` run used for the issue date. Deliberately
    /// unanchored: no label, no word boundaries, so the first date-shaped
    /// substring anywhere in the text wins, including inside a longer
    /// `DD.MM.YYYY`. Known precision tradeoff.
    pub static ref ISSUE_DATE_PATTERN: Regex =
        Regex::new(r"(\d{2}\.\d{2}\.\d{2})").unwrap();
}

// Marker strings bounding the free-text span fields. Matching is
// case-sensitive, exactly as printed on the card template.
pub const NATIONALITY_START: &str = "Nationality";
pub const SEX_MARKER: &str = "Sex/Sexe/Sex";
pub const CITIZENSHIP_MARKER: &str = "Cetatenie";
pub const BIRTHPLACE_MARKER: &str = "Loc nastere/Lieu de naissance/Place of birth";
pub const ADDRESS_MARKER: &str = "Domiciliu/Adresse/Address";
pub const VALIDITY_MARKER: &str = "Validity";
pub const DOCUMENT_TYPE_MARKER: &str = "IDROU";
