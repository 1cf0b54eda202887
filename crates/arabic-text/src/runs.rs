//! Script-run segmentation

/// Check if a character is an Arabic-script character
///
/// Uses the main Arabic Unicode block only. Presentation forms and
/// supplement blocks are intentionally not included; anything outside
/// U+0600..=U+06FF is classified as non-Arabic.
pub fn is_arabic_char(c: char) -> bool {
    // Arabic Unicode range: U+0600 to U+06FF
    ('\u{0600}'..='\u{06FF}').contains(&c)
}

/// A maximal contiguous substring sharing one script classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRun {
    /// The run's text, in original order
    pub text: String,
    /// Whether every character in the run is Arabic-script
    pub is_arabic: bool,
}

/// Split input into maximal runs of a single script classification
///
/// Runs are produced in input order. Concatenating the runs in that order
/// reconstructs the input exactly; no emitted run is empty.
///
/// # Example
/// ```
/// use arabic_text::split_runs;
///
/// let runs = split_runs("abc");
/// assert_eq!(runs.len(), 1);
/// assert!(!runs[0].is_arabic);
/// ```
pub fn split_runs(input: &str) -> Vec<ScriptRun> {
    let mut runs = Vec::new();
    let mut current = String::new();
    let mut current_arabic = false;

    for c in input.chars() {
        let arabic = is_arabic_char(c);

        if current.is_empty() || arabic == current_arabic {
            current.push(c);
        } else {
            runs.push(ScriptRun {
                text: std::mem::take(&mut current),
                is_arabic: current_arabic,
            });
            current.push(c);
        }
        current_arabic = arabic;
    }

    if !current.is_empty() {
        runs.push(ScriptRun {
            text: current,
            is_arabic: current_arabic,
        });
    }

    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_is_arabic_char() {
        assert!(is_arabic_char('ا'));
        assert!(is_arabic_char('ي'));
        assert!(is_arabic_char('\u{0600}'));
        assert!(is_arabic_char('\u{06FF}'));
        assert!(is_arabic_char('٥')); // Arabic-Indic digit five
        assert!(!is_arabic_char('A'));
        assert!(!is_arabic_char('1'));
        assert!(!is_arabic_char('\u{05FF}'));
        assert!(!is_arabic_char('\u{0700}'));
        // Presentation forms are outside the classified block
        assert!(!is_arabic_char('\u{FE8D}'));
    }

    #[test]
    fn test_split_empty() {
        assert_eq!(split_runs(""), vec![]);
    }

    #[test]
    fn test_split_single_latin_run() {
        let runs = split_runs("hello world");
        assert_eq!(
            runs,
            vec![ScriptRun {
                text: "hello world".to_string(),
                is_arabic: false,
            }]
        );
    }

    #[test]
    fn test_split_single_arabic_run() {
        let runs = split_runs("مرحبا");
        assert_eq!(
            runs,
            vec![ScriptRun {
                text: "مرحبا".to_string(),
                is_arabic: true,
            }]
        );
    }

    #[test]
    fn test_split_run_boundaries() {
        let runs = split_runs("abcدفنxyz");
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0].text, "abc");
        assert_eq!(runs[1].text, "دفن");
        assert_eq!(runs[2].text, "xyz");
        assert_eq!(
            runs.iter().map(|r| r.is_arabic).collect::<Vec<_>>(),
            vec![false, true, false]
        );
    }

    #[test]
    fn test_split_preserves_length() {
        let input = "صفحة 1 of 3 — النهاية";
        let runs = split_runs(input);
        let total: usize = runs.iter().map(|r| r.text.chars().count()).sum();
        assert_eq!(total, input.chars().count());
    }

    #[test]
    fn test_split_reconstructs_input() {
        let input = "A ب C د E";
        let joined: String = split_runs(input).into_iter().map(|r| r.text).collect();
        assert_eq!(joined, input);
    }

    #[test]
    fn test_split_no_empty_runs() {
        for input in ["", "a", "ا", "aا", "اa", "aاaاa"] {
            for run in split_runs(input) {
                assert!(!run.text.is_empty());
            }
        }
    }
}
