//! Re-derive a column's field and data type from its observed values.
//!
//! The backend runs the same analysis when it first caches a workbook; having
//! it locally lets the CLI compare what a sheet declares against what its
//! data actually looks like. A type wins when at least 60% of the non-blank
//! values read as that type, long text needs only 40%, and a column with no
//! usable values at all falls back to a guess from its header name.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use escale_model::{CellValue, DataType, FieldType};

use crate::rules::NUMERIC_LITERAL;

/// Date shapes the profiler recognizes in string cells. Distinct from the
/// entry-side shapes: dotted dates occur in legacy sheets and are counted
/// here even though the entry form never produces them.
static PROFILE_DATE_SHAPES: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        Regex::new(r"^\d{2}/\d{2}/\d{4}$").expect("invalid slash date regex"),
        Regex::new(r"^\d{4}-\d{2}-\d{2}").expect("invalid iso date regex"),
        Regex::new(r"^\d{2}-\d{2}-\d{4}$").expect("invalid dash date regex"),
        Regex::new(r"^\d{2}\.\d{2}\.\d{4}$").expect("invalid dotted date regex"),
    ]
});

/// Values understood as a yes/no answer, both languages, long and short.
const YES_NO_VALUES: &[&str] = &["oui", "non", "yes", "no", "o", "n"];

/// Headers that are exactly a row-numbering column.
const NUMBERING_HEADERS: &[&str] = &["n°", "n", "#", "no", "num", "numero", "numéro"];

/// Header fragments that mark a date column.
const DATE_NAME_KEYWORDS: &[&str] = &[
    "date",
    "arrivée",
    "arrivee",
    "arriv",
    "debut",
    "début",
    "fin",
    "accostage",
    "appareillage",
    "nor",
    "quai libre",
    "pose passerelle",
    "ordre",
    "connection",
    "déconnection",
    "deconnection",
    "draft",
    "notice",
];

/// Header fragments that mark a numeric column: weights, rates, durations,
/// prices, lab measurements.
const NUMBER_NAME_KEYWORDS: &[&str] = &[
    "tonnage",
    "tonne",
    "poids",
    "masse",
    "nombre",
    "nbr",
    "nb",
    "%",
    "h2o",
    "h2so4",
    "p2o5",
    "k2o",
    "fob",
    "fret",
    "cfr",
    "pu",
    "p.u",
    "cours",
    "valeur",
    "montant",
    "prix",
    "tarif",
    "total",
    "loa",
    "jour",
    "jr",
    "cadence",
    "performance",
    "taux",
    "attente",
    "séjour",
    "sejour",
    "durée",
    "duree",
    "surestaries",
    "surrestaries",
    "temps",
    "humidité",
    "humidite",
    "humidit",
    "quantité",
    "quantite",
    "qte",
    "volume",
    "surface",
    "acconnage",
    "assurance",
    "fwd",
    "aft",
    "trim",
    "fresh water",
    "fw",
    "mouvements",
    "mvt",
    "concentration",
    "concent",
];

/// Header fragments that mark free-form narrative columns.
const LONG_TEXT_NAME_KEYWORDS: &[&str] = &[
    "remarques",
    "remarque",
    "commentaire",
    "commentaires",
    "comment",
    "description",
    "desc",
    "evenements",
    "événements",
    "evenement",
    "observation",
    "observations",
    "observ",
    "cause",
    "conflit",
    "etat",
    "état",
];

/// Header fragments naming proper-noun columns: these hold names, never bare
/// numbers. Used when the column's values turned out to be plain text.
const VALUE_TEXT_ONLY_KEYWORDS: &[&str] = &[
    "navire",
    "navires",
    "ship",
    "vessel",
    "client",
    "customer",
    "fournisseur",
    "supplier",
    "vendeur",
    "origine",
    "origin",
    "provenance",
    "destination",
    "dest",
    "region",
    "région",
    "port",
    "quai",
    "terminal",
    "agent",
    "agents",
    "transitaire",
    "armateur",
    "surveillant",
    "surveill",
    "qualité",
    "qualite",
    "quality",
    "type",
    "catégorie",
    "categorie",
    "incoterm",
    "incoterme",
    "facturation",
    "famille",
];

/// Proper-noun header fragments for the no-data fallback. Slightly different
/// coverage than [`VALUE_TEXT_ONLY_KEYWORDS`]: reference-number columns
/// appear here, generic location words do not.
const NAME_TEXT_ONLY_KEYWORDS: &[&str] = &[
    "navire",
    "navires",
    "ship",
    "vessel",
    "client",
    "customer",
    "fournisseur",
    "supplier",
    "vendeur",
    "origine",
    "origin",
    "provenance",
    "destination",
    "dest",
    "region",
    "région",
    "port de chargement",
    "agent",
    "agents",
    "transitaire",
    "armateur",
    "surveillant",
    "surveill",
    "qualité",
    "qualite",
    "quality",
    "type",
    "catégorie",
    "categorie",
    "cat",
    "incoterm",
    "incoterme",
    "facturation",
    "famille",
    "dum",
    "ei",
    "cde",
    "n° ei",
    "n° cde",
];

/// The profiler's verdict for one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnProfile {
    pub field_type: FieldType,
    pub data_type: DataType,
}

impl ColumnProfile {
    fn new(field_type: FieldType, data_type: DataType) -> Self {
        Self {
            field_type,
            data_type,
        }
    }
}

/// Analyze a column's values, falling back to its header name when no value
/// carries information.
pub fn profile_column(values: &[CellValue], column_name: &str) -> ColumnProfile {
    let observed: Vec<&CellValue> = values
        .iter()
        .filter(|value| match value {
            CellValue::Missing => false,
            CellValue::Text(text) => !text.trim().is_empty(),
            _ => true,
        })
        .collect();
    if observed.is_empty() {
        return guess_from_name(column_name);
    }

    let mut dates = 0usize;
    let mut numbers = 0usize;
    let mut yes_no = 0usize;
    let mut long_text = 0usize;
    for value in &observed {
        match value {
            CellValue::Number(_) => numbers += 1,
            CellValue::Bool(_) => yes_no += 1,
            CellValue::Text(text) => {
                let text = text.trim();
                if YES_NO_VALUES.contains(&text.to_lowercase().as_str()) {
                    yes_no += 1;
                } else if PROFILE_DATE_SHAPES.iter().any(|shape| shape.is_match(text)) {
                    dates += 1;
                } else if NUMERIC_LITERAL.is_match(&text.replace(' ', "")) {
                    numbers += 1;
                } else if text.chars().count() > 100 {
                    long_text += 1;
                }
            }
            CellValue::Missing => {}
        }
    }

    let total = observed.len() as f64;
    if dates as f64 / total >= 0.6 {
        return ColumnProfile::new(FieldType::DatetimeLocal, DataType::Date);
    }
    if numbers as f64 / total >= 0.6 {
        return ColumnProfile::new(FieldType::Number, DataType::Number);
    }
    if yes_no as f64 / total >= 0.6 {
        return ColumnProfile::new(FieldType::SelectYesno, DataType::Boolean);
    }
    if long_text as f64 / total >= 0.4 {
        return ColumnProfile::new(FieldType::Textarea, DataType::Text);
    }

    let name = column_name.to_lowercase();
    if VALUE_TEXT_ONLY_KEYWORDS.iter().any(|kw| name.contains(kw)) {
        return ColumnProfile::new(FieldType::Text, DataType::TextOnly);
    }
    ColumnProfile::new(FieldType::Text, DataType::Any)
}

/// Guess a column's types from its header name alone.
pub fn guess_from_name(column_name: &str) -> ColumnProfile {
    let name = column_name.trim().to_lowercase();
    if NUMBERING_HEADERS.contains(&name.as_str()) {
        return ColumnProfile::new(FieldType::Number, DataType::Number);
    }
    if DATE_NAME_KEYWORDS.iter().any(|kw| name.contains(kw)) {
        return ColumnProfile::new(FieldType::DatetimeLocal, DataType::Date);
    }
    if NUMBER_NAME_KEYWORDS.iter().any(|kw| name.contains(kw)) {
        return ColumnProfile::new(FieldType::Number, DataType::Number);
    }
    if LONG_TEXT_NAME_KEYWORDS.iter().any(|kw| name.contains(kw)) {
        return ColumnProfile::new(FieldType::Textarea, DataType::Text);
    }
    if name.contains("oui/non") || name.contains("oui non") {
        return ColumnProfile::new(FieldType::SelectYesno, DataType::Boolean);
    }
    if NAME_TEXT_ONLY_KEYWORDS.iter().any(|kw| name.contains(kw)) {
        return ColumnProfile::new(FieldType::Text, DataType::TextOnly);
    }
    ColumnProfile::new(FieldType::Text, DataType::Any)
}
