//! Review ledger loading.
//!
//! A review file is either a JSON array of review objects or JSON lines (one
//! object per line, blank lines ignored). Several files are merged in the
//! order given, followed by stdin when requested.

use crate::cli::InputArgs;
use crate::error::{CliError, Result};
use concord_domain::{Review, ReviewLedger, ReviewSource};
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use tracing::debug;

/// Parse the contents of one review file.
pub fn parse_reviews(contents: &str) -> Result<Vec<Review>> {
    let trimmed = contents.trim_start();
    if trimmed.starts_with('[') {
        return Ok(serde_json::from_str(trimmed)?);
    }

    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(number, line)| {
            serde_json::from_str(line)
                .map_err(|e| CliError::InvalidInput(format!("line {}: {}", number + 1, e)))
        })
        .collect()
}

/// Read and parse one review file.
pub fn read_reviews(path: &Path) -> Result<Vec<Review>> {
    let contents = fs::read_to_string(path)?;
    let reviews = parse_reviews(&contents).map_err(|e| match e {
        CliError::InvalidInput(msg) => {
            CliError::InvalidInput(format!("{}: {}", path.display(), msg))
        }
        other => other,
    })?;
    debug!(path = %path.display(), reviews = reviews.len(), "Read review file");
    Ok(reviews)
}

/// Build one ledger from every source named on the command line.
pub fn load_ledger(args: &InputArgs) -> Result<ReviewLedger> {
    if args.reviews.is_empty() && !args.stdin {
        return Err(CliError::InvalidInput(
            "Must specify at least one --reviews file or --stdin".to_string(),
        ));
    }

    let mut sources = args
        .reviews
        .iter()
        .map(|path| read_reviews(path))
        .collect::<Result<Vec<_>>>()?;

    if args.stdin {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        sources.push(parse_reviews(&buffer)?);
    }

    Ok(ReviewLedger::from_sources(
        sources.iter().map(|s| s as &dyn ReviewSource),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_parse_json_array() {
        let reviews = parse_reviews(
            r#"[
                {"item_id": "X1", "reviewer_id": "alice", "label": "PASS"},
                {"item_id": "X1", "reviewer_id": "bob", "label": "FIX"}
            ]"#,
        )
        .unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[1], Review::new("X1", "bob", "FIX"));
    }

    #[test]
    fn test_parse_json_lines() {
        let contents = "{\"item_id\":\"X1\",\"reviewer_id\":\"a\",\"label\":\"PASS\"}\n\n\
                        {\"item_id\":\"X2\",\"reviewer_id\":\"a\",\"label\":\"REJECT\"}\n";
        let reviews = parse_reviews(contents).unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[1].item_id, "X2");
    }

    #[test]
    fn test_bad_line_is_reported() {
        let contents = "{\"item_id\":\"X1\",\"reviewer_id\":\"a\",\"label\":\"PASS\"}\nnot json\n";
        match parse_reviews(contents) {
            Err(CliError::InvalidInput(msg)) => assert!(msg.starts_with("line 2")),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_contents() {
        assert!(parse_reviews("").unwrap().is_empty());
        assert!(parse_reviews("[]").unwrap().is_empty());
    }

    #[test]
    fn test_files_merge_in_order() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("first.json");
        let second = dir.path().join("second.jsonl");
        fs::write(
            &first,
            r#"[{"item_id": "X1", "reviewer_id": "alice", "label": "PASS"}]"#,
        )
        .unwrap();
        fs::write(
            &second,
            "{\"item_id\":\"X2\",\"reviewer_id\":\"triage\",\"label\":\"FIX\"}\n",
        )
        .unwrap();

        let args = InputArgs {
            reviews: vec![first, second],
            stdin: false,
        };
        let ledger = load_ledger(&args).unwrap();
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.reviews()[0].reviewer_id, "alice");
        assert_eq!(ledger.reviews()[1].reviewer_id, "triage");
    }

    #[test]
    fn test_no_input_is_rejected() {
        let args = InputArgs {
            reviews: Vec::new(),
            stdin: false,
        };
        assert!(matches!(load_ledger(&args), Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let args = InputArgs {
            reviews: vec![PathBuf::from("/nonexistent/reviews.json")],
            stdin: false,
        };
        assert!(matches!(load_ledger(&args), Err(CliError::Io(_))));
    }
}
