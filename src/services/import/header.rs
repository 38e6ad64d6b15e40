//! Helpers for the spreadsheet hand-off: header-row detection inside a raw
//! cell matrix, Brazilian decimal parsing, and project-name suggestion from
//! a file name. Reading the spreadsheet file itself is the loader's job.

use regex::Regex;
use std::sync::LazyLock;

/// Column-header prefixes that identify a budget header row.
const HEADER_KEYS: &[&str] = &["item", "desc", "unid", "quant", "valor", "preco", "preç"];

/// How many leading rows to probe for the header.
const HEADER_SCAN_ROWS: usize = 15;

/// Trailing terms after which a file name stops describing the project.
const NAME_CUT_TERMS: &[&str] = &[
    "PLANILHA ORÇAMENTÁRIA",
    "PLANILHA ORCAMENTARIA",
    "ORÇAMENTO",
    "ORCAMENTO",
    "PROPOSTA",
    "REVISÃO",
    "REVISAO",
    "VERSÃO",
    "VERSAO",
    "REV",
];

static RE_NON_NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9,.\-]").expect("Invalid regex"));

/// Locate the header row in the first rows of a cell matrix: the first row
/// where more than two cells start with a known header key.
pub fn detect_header_row(rows: &[Vec<String>]) -> Option<usize> {
    for (idx, row) in rows.iter().take(HEADER_SCAN_ROWS).enumerate() {
        let matches = row
            .iter()
            .filter(|cell| {
                let cell = cell.trim().to_lowercase();
                HEADER_KEYS.iter().any(|key| cell.starts_with(key))
            })
            .count();
        if matches > 2 {
            return Some(idx);
        }
    }
    None
}

/// Parse a numeric cell that may use Brazilian formatting.
///
/// "1.234,56" → 1234.56, "1234.56" → 1234.56, "R$ 25,00" → 25.0.
/// Unparseable input yields `None`.
pub fn parse_decimal(value: &str) -> Option<f64> {
    let cleaned = RE_NON_NUMERIC.replace_all(value, "");
    if cleaned.is_empty() {
        return None;
    }
    let normalized = if cleaned.contains(',') && cleaned.contains('.') {
        // Dots are thousands separators, the comma is the decimal mark.
        cleaned.replace('.', "").replace(',', ".")
    } else {
        cleaned.replace(',', ".")
    };
    normalized.parse::<f64>().ok()
}

/// Suggest a project name from an uploaded file name: drop the extension and
/// cut everything from the first budget/proposal/revision term onward.
pub fn suggest_project_name(file_name: &str) -> String {
    let stem = match file_name.rsplit_once('.') {
        Some((stem, ext)) if !ext.contains(['/', '\\']) => stem,
        _ => file_name,
    };
    let mut name = stem.trim().to_string();

    let upper = name.to_uppercase();
    for term in NAME_CUT_TERMS {
        if let Some(pos) = upper.find(term) {
            // Uppercasing preserves byte offsets for the alphabets seen in
            // file names; skip the cut if it ever lands mid-character.
            if name.is_char_boundary(pos) {
                name.truncate(pos);
                break;
            }
        }
    }

    name.trim_matches([' ', '-', '_']).to_string()
}
