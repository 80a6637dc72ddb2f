//! Answers file reader.

use super::form::FormError;
use std::path::Path;

/// Read answers from a file, one answer per line.
///
/// Trailing blank lines are ignored; any other blank line is kept as an
/// empty answer so submission validation can point at the question it
/// belongs to.
pub fn read_answers_file(path: &Path) -> Result<Vec<String>, FormError> {
    let content = std::fs::read_to_string(path).map_err(|source| FormError::AnswersFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_answers(&content))
}

fn parse_answers(content: &str) -> Vec<String> {
    let mut answers: Vec<String> = content
        .lines()
        .map(|line| line.trim().to_string())
        .collect();
    while answers.last().is_some_and(|a| a.is_empty()) {
        answers.pop();
    }
    answers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_answers() {
        assert_eq!(
            parse_answers("Bread\r\n\nNeighbours\n\n\n"),
            vec!["Bread", "", "Neighbours"]
        );
        assert!(parse_answers("").is_empty());
    }

    #[test]
    fn test_read_answers_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("answers.txt");
        std::fs::write(&path, "Coffee\nCommuters\n").unwrap();
        assert_eq!(read_answers_file(&path).unwrap(), vec!["Coffee", "Commuters"]);
    }

    #[test]
    fn test_missing_file() {
        let err = read_answers_file(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, FormError::AnswersFile { .. }));
    }
}
