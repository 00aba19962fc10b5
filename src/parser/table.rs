//! Result table scraping from `make certify-all` output.

use crate::error::ErrorContext;
use crate::schema::{ResultKey, Scores};
use crate::{Error, Result};

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Lines that are table chrome rather than data rows.
fn banner() -> &'static Regex {
    static BANNER: OnceLock<Regex> = OnceLock::new();
    BANNER.get_or_init(|| {
        Regex::new(r"(?i)^(\s|starting|workload|-|mark)").expect("banner pattern is valid")
    })
}

/// Scores of every known row in the captured output.
///
/// Rows with labels outside the workload catalog are ignored. A known label
/// followed by fewer than three numbers is malformed output.
pub fn parse_results_table(output: &str) -> Result<BTreeMap<ResultKey, Scores>> {
    let mut rows = BTreeMap::new();

    for (index, line) in output.lines().enumerate() {
        if line.is_empty() || banner().is_match(line) {
            continue;
        }
        let mut tokens = line.split_whitespace();
        let Some(key) = tokens.next().and_then(ResultKey::from_label) else {
            continue;
        };

        let scores = parse_scores(key, tokens).with_line(index + 1)?;
        rows.insert(key, scores);
    }

    Ok(rows)
}

fn parse_scores<'a>(key: ResultKey, mut tokens: impl Iterator<Item = &'a str>) -> Result<Scores> {
    let mut next = |column: &str| -> Result<f64> {
        let token = tokens
            .next()
            .ok_or_else(|| Error::parse(format!("result row {key} has no {column} column")))?;
        token
            .parse::<f64>()
            .map_err(|_| Error::parse(format!("result row {key} has malformed {column} '{token}'")))
    };

    Ok(Scores {
        multi_core: next("MultiCore")?,
        single_core: next("SingleCore")?,
        scaling: next("Scaling")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::fixtures::CERTIFY_OUTPUT;
    use crate::schema::Workload;

    #[test]
    fn test_parses_all_ten_rows() {
        let rows = parse_results_table(CERTIFY_OUTPUT).unwrap();
        assert_eq!(rows.len(), 10);
        for key in ResultKey::all() {
            assert!(rows.contains_key(&key), "missing {key}");
        }
        assert_eq!(
            rows[&ResultKey::Workload(Workload::Core)],
            Scores {
                multi_core: 1.1,
                single_core: 2.2,
                scaling: 3.3
            }
        );
        assert_eq!(rows[&ResultKey::Aggregate].multi_core, 4512.34);
    }

    #[test]
    fn test_banner_lines_are_case_insensitive() {
        let output = "MARK core 1 2 3\nmarker-row 1 2\n-- core 1 2 3\n   core 1 2 3\nSTARTING core\n";
        assert!(parse_results_table(output).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_labels_ignored() {
        let output = "Total run time 12.5s\ncore 1.1 2.2 3.3\nextra-workload 1 2 3\n";
        let rows = parse_results_table(output).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_short_row_is_fatal() {
        let output = "core 1.1 2.2 3.3\nsha-test 1.0 2.0\n";
        match parse_results_table(output).unwrap_err() {
            Error::Parse { line, message } => {
                assert_eq!(line, Some(2));
                assert!(message.contains("sha-test"));
                assert!(message.contains("Scaling"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_numeric_score_is_fatal() {
        let err = parse_results_table("core n/a 2.2 3.3\n").unwrap_err();
        assert!(err.to_string().contains("MultiCore"));
    }
}
