//! Bidirectional recombination for left-to-right drawing primitives

use crate::runs::split_runs;
use crate::shaping::reshape_run;

/// Prepare mixed Arabic/non-Arabic text for a strictly LTR drawing primitive
///
/// The input is treated as one right-to-left paragraph. Each Arabic run is
/// reshaped into presentation forms and reversed at the character level
/// (the drawing primitive lays characters out left to right, so an RTL
/// script must be pre-reversed to display correctly). Non-Arabic runs pass
/// through unchanged. Finally the order of the runs themselves is reversed,
/// so embedded Latin words or digits keep their correct position relative
/// to the surrounding Arabic text.
///
/// This is a simplified two-class run-splitter, not a UAX#9 implementation.
/// It never fails for any Unicode input.
///
/// # Example
/// ```
/// use arabic_text::reshape_bidirectional;
///
/// assert_eq!(reshape_bidirectional(""), "");
/// assert_eq!(reshape_bidirectional("plain ascii"), "plain ascii");
/// ```
pub fn reshape_bidirectional(input: &str) -> String {
    let mut pieces: Vec<String> = split_runs(input)
        .into_iter()
        .map(|run| {
            if run.is_arabic {
                reshape_run(&run.text).chars().rev().collect()
            } else {
                run.text
            }
        })
        .collect();

    pieces.reverse();
    pieces.concat()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_input() {
        assert_eq!(reshape_bidirectional(""), "");
    }

    #[test]
    fn test_non_arabic_unchanged() {
        // Single non-Arabic run: run-order reversal is a no-op
        assert_eq!(reshape_bidirectional("Invoice #42"), "Invoice #42");
        assert_eq!(reshape_bidirectional("été"), "été");
    }

    #[test]
    fn test_pure_arabic_single_run() {
        // One Arabic run: output equals the reshaped run reversed
        let reshaped: String = crate::reshape_run("دفن").chars().rev().collect();
        assert_eq!(reshape_bidirectional("دفن"), reshaped);
    }

    #[test]
    fn test_pure_arabic_character_reversal() {
        // dal feh noon reshapes to FEA9 FED3 FEE6, then reverses
        assert_eq!(reshape_bidirectional("دفن"), "\u{FEE6}\u{FED3}\u{FEA9}");
    }

    #[test]
    fn test_mixed_runs_reverse_order() {
        // Latin prefix ends up at the right edge of the mirrored line
        let out = reshape_bidirectional("abcدفنxyz");
        assert_eq!(out, format!("xyz{}abc", "\u{FEE6}\u{FED3}\u{FEA9}"));
    }

    #[test]
    fn test_joining_broken_at_run_boundary() {
        // A Latin character between two beh letters keeps both isolated;
        // reshaping must not see across the boundary
        let out = reshape_bidirectional("بXب");
        assert_eq!(out, "\u{FE8F}X\u{FE8F}");
    }

    #[test]
    fn test_length_preserved_without_ligatures() {
        let input = "abc محمد 123";
        assert_eq!(
            reshape_bidirectional(input).chars().count(),
            input.chars().count()
        );
    }
}
