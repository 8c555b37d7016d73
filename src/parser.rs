use csv::{ReaderBuilder, StringRecord};
use std::collections::HashSet;
use std::path::Path;

use crate::error::Result;
use crate::schedule::Score;

/// Header cells that mark the first record as a header row.
const NAME_HEADERS: [&str; 3] = ["name", "player", "participant"];

/// Collects trimmed, non-empty names, keeping the first of any exact duplicate.
pub fn clean_names<'a, I>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for value in raw {
        let name = value.trim();
        if name.is_empty() {
            continue;
        }
        if !seen.insert(name.to_string()) {
            tracing::warn!(name, "duplicate participant ignored");
            continue;
        }
        names.push(name.to_string());
    }
    names
}

fn name_column(record: &StringRecord) -> Option<usize> {
    record
        .iter()
        .position(|cell| NAME_HEADERS.contains(&cell.trim().to_lowercase().as_str()))
}

/// Loads a roster from a plain list (one name per line) or a CSV file.
///
/// If the first row has a `name`/`player`/`participant` cell, that column is
/// read and the row skipped; otherwise names come from the first column.
/// Lines starting with `#` are ignored.
pub fn load_roster<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .from_path(path)?;

    let records: Vec<StringRecord> = reader.records().collect::<std::result::Result<_, _>>()?;
    let (column, skip) = match records.first().and_then(name_column) {
        Some(col) => (col, 1),
        None => (0, 0),
    };

    let names = clean_names(records.iter().skip(skip).map(|r| r.get(column).unwrap_or("")));
    tracing::debug!(count = names.len(), "roster loaded");
    Ok(names)
}

/// Parses a comma-separated list of names, e.g. from a command-line flag.
pub fn parse_player_list(value: &str) -> Vec<String> {
    clean_names(value.split(','))
}

/// Parses a score like `6-4`, `6:4` or `6,4`. Only plain digits are accepted.
pub fn parse_score(value: &str) -> Option<Score> {
    let (left, right) = value.trim().split_once(['-', ':', ','])?;
    let parse = |s: &str| {
        let s = s.trim();
        if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        s.parse::<u32>().ok()
    };
    Some(Score(parse(left)?, parse(right)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn plain_list_with_blanks_comments_and_duplicates() {
        let file = write_temp("Ana\n\n# guests\nBeto\n  Carla  \nAna\n");
        let names = load_roster(file.path()).unwrap();
        assert_eq!(names, vec!["Ana", "Beto", "Carla"]);
    }

    #[test]
    fn csv_with_name_header_uses_that_column() {
        let file = write_temp("id,Name,level\n1,Ana,3\n2,Beto,2\n3,\"Carla, Jr\",4\n");
        let names = load_roster(file.path()).unwrap();
        assert_eq!(names, vec!["Ana", "Beto", "Carla, Jr"]);
    }

    #[test]
    fn csv_without_header_reads_first_column() {
        let file = write_temp("Ana,A\nBeto,B\n");
        assert_eq!(load_roster(file.path()).unwrap(), vec!["Ana", "Beto"]);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_roster("/definitely/not/here.csv").is_err());
    }

    #[test]
    fn player_list_splits_on_commas() {
        assert_eq!(parse_player_list(" Ana, Beto,,Carla ,Beto"), vec!["Ana", "Beto", "Carla"]);
    }

    #[test]
    fn scores_parse_with_common_separators() {
        assert_eq!(parse_score("6-4"), Some(Score(6, 4)));
        assert_eq!(parse_score(" 7:5 "), Some(Score(7, 5)));
        assert_eq!(parse_score("3,6"), Some(Score(3, 6)));
        assert_eq!(parse_score("6"), None);
        assert_eq!(parse_score("-1-4"), None);
        assert_eq!(parse_score("six-four"), None);
        assert_eq!(parse_score("6 - "), None);
    }
}
