//! Contextual reshaping to Arabic Presentation Forms-B
//!
//! Maps each letter of the main Arabic block to its isolated, initial,
//! medial, or final presentation form (U+FE70..=U+FEFF) depending on its
//! neighbors within the run. Reshaping is purely local to one run: a run
//! boundary always breaks contextual joining.

/// Presentation forms of one Arabic letter
struct Forms {
    isolated: char,
    final_form: char,
    initial: char,
    medial: char,
    /// Whether this letter connects to the letter that follows it
    joins_next: bool,
}

/// Look up the presentation forms of a letter
///
/// Right-joining letters (alef, dal, thal, reh, zain, waw, alef maqsura,
/// teh marbuta and the hamza-carrier alef variants) only distinguish
/// isolated and final forms. Letters without an entry here are emitted
/// verbatim and break joining.
fn letter_forms(c: char) -> Option<Forms> {
    // (isolated, final, initial, medial, joins following letter)
    let t = match c {
        // Hamza: joins in neither direction
        '\u{0621}' => ('\u{FE80}', '\u{FE80}', '\u{FE80}', '\u{FE80}', false),
        // Alef with madda / hamza variants, plain alef
        '\u{0622}' => ('\u{FE81}', '\u{FE82}', '\u{FE81}', '\u{FE82}', false),
        '\u{0623}' => ('\u{FE83}', '\u{FE84}', '\u{FE83}', '\u{FE84}', false),
        '\u{0624}' => ('\u{FE85}', '\u{FE86}', '\u{FE85}', '\u{FE86}', false),
        '\u{0625}' => ('\u{FE87}', '\u{FE88}', '\u{FE87}', '\u{FE88}', false),
        '\u{0626}' => ('\u{FE89}', '\u{FE8A}', '\u{FE8B}', '\u{FE8C}', true),
        '\u{0627}' => ('\u{FE8D}', '\u{FE8E}', '\u{FE8D}', '\u{FE8E}', false),
        '\u{0628}' => ('\u{FE8F}', '\u{FE90}', '\u{FE91}', '\u{FE92}', true),
        '\u{0629}' => ('\u{FE93}', '\u{FE94}', '\u{FE93}', '\u{FE94}', false),
        '\u{062A}' => ('\u{FE95}', '\u{FE96}', '\u{FE97}', '\u{FE98}', true),
        '\u{062B}' => ('\u{FE99}', '\u{FE9A}', '\u{FE9B}', '\u{FE9C}', true),
        '\u{062C}' => ('\u{FE9D}', '\u{FE9E}', '\u{FE9F}', '\u{FEA0}', true),
        '\u{062D}' => ('\u{FEA1}', '\u{FEA2}', '\u{FEA3}', '\u{FEA4}', true),
        '\u{062E}' => ('\u{FEA5}', '\u{FEA6}', '\u{FEA7}', '\u{FEA8}', true),
        '\u{062F}' => ('\u{FEA9}', '\u{FEAA}', '\u{FEA9}', '\u{FEAA}', false),
        '\u{0630}' => ('\u{FEAB}', '\u{FEAC}', '\u{FEAB}', '\u{FEAC}', false),
        '\u{0631}' => ('\u{FEAD}', '\u{FEAE}', '\u{FEAD}', '\u{FEAE}', false),
        '\u{0632}' => ('\u{FEAF}', '\u{FEB0}', '\u{FEAF}', '\u{FEB0}', false),
        '\u{0633}' => ('\u{FEB1}', '\u{FEB2}', '\u{FEB3}', '\u{FEB4}', true),
        '\u{0634}' => ('\u{FEB5}', '\u{FEB6}', '\u{FEB7}', '\u{FEB8}', true),
        '\u{0635}' => ('\u{FEB9}', '\u{FEBA}', '\u{FEBB}', '\u{FEBC}', true),
        '\u{0636}' => ('\u{FEBD}', '\u{FEBE}', '\u{FEBF}', '\u{FEC0}', true),
        '\u{0637}' => ('\u{FEC1}', '\u{FEC2}', '\u{FEC3}', '\u{FEC4}', true),
        '\u{0638}' => ('\u{FEC5}', '\u{FEC6}', '\u{FEC7}', '\u{FEC8}', true),
        '\u{0639}' => ('\u{FEC9}', '\u{FECA}', '\u{FECB}', '\u{FECC}', true),
        '\u{063A}' => ('\u{FECD}', '\u{FECE}', '\u{FECF}', '\u{FED0}', true),
        '\u{0641}' => ('\u{FED1}', '\u{FED2}', '\u{FED3}', '\u{FED4}', true),
        '\u{0642}' => ('\u{FED5}', '\u{FED6}', '\u{FED7}', '\u{FED8}', true),
        '\u{0643}' => ('\u{FED9}', '\u{FEDA}', '\u{FEDB}', '\u{FEDC}', true),
        '\u{0644}' => ('\u{FEDD}', '\u{FEDE}', '\u{FEDF}', '\u{FEE0}', true),
        '\u{0645}' => ('\u{FEE1}', '\u{FEE2}', '\u{FEE3}', '\u{FEE4}', true),
        '\u{0646}' => ('\u{FEE5}', '\u{FEE6}', '\u{FEE7}', '\u{FEE8}', true),
        '\u{0647}' => ('\u{FEE9}', '\u{FEEA}', '\u{FEEB}', '\u{FEEC}', true),
        '\u{0648}' => ('\u{FEED}', '\u{FEEE}', '\u{FEED}', '\u{FEEE}', false),
        '\u{0649}' => ('\u{FEEF}', '\u{FEF0}', '\u{FEEF}', '\u{FEF0}', false),
        '\u{064A}' => ('\u{FEF1}', '\u{FEF2}', '\u{FEF3}', '\u{FEF4}', true),
        _ => return None,
    };

    Some(Forms {
        isolated: t.0,
        final_form: t.1,
        initial: t.2,
        medial: t.3,
        joins_next: t.4,
    })
}

/// Lam-alef ligature forms for a given alef variant
fn lam_alef_forms(alef: char) -> Option<(char, char)> {
    // (isolated, final)
    match alef {
        '\u{0622}' => Some(('\u{FEF5}', '\u{FEF6}')),
        '\u{0623}' => Some(('\u{FEF7}', '\u{FEF8}')),
        '\u{0625}' => Some(('\u{FEF9}', '\u{FEFA}')),
        '\u{0627}' => Some(('\u{FEFB}', '\u{FEFC}')),
        _ => None,
    }
}

/// Check if a character is a tashkeel (vowel/diacritic) mark
///
/// Tashkeel are transparent for joining: the letters around them connect
/// as if the mark were not there, and the mark itself is emitted in place.
fn is_tashkeel(c: char) -> bool {
    matches!(c, '\u{064B}'..='\u{065F}' | '\u{0670}')
}

/// Whether a letter accepts a connection from the preceding letter
fn accepts_prev_join(c: char) -> bool {
    letter_forms(c).is_some_and(|f| f.final_form != f.isolated)
}

const LAM: char = '\u{0644}';

/// Reshape one Arabic run into presentation forms
///
/// Joining context never crosses the run boundary: the first letter can
/// only take isolated or initial form, the last only isolated or final.
/// Characters with no presentation-form mapping pass through verbatim.
pub fn reshape_run(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut prev_joins = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if is_tashkeel(c) {
            out.push(c);
            i += 1;
            continue;
        }

        let forms = match letter_forms(c) {
            Some(f) => f,
            None => {
                out.push(c);
                prev_joins = false;
                i += 1;
                continue;
            }
        };

        // Lam followed directly by an alef variant collapses to a ligature
        if c == LAM && i + 1 < chars.len() {
            if let Some((isolated, final_form)) = lam_alef_forms(chars[i + 1]) {
                out.push(if prev_joins { final_form } else { isolated });
                prev_joins = false;
                i += 2;
                continue;
            }
        }

        // Connection to the next letter requires this letter to join
        // forward and the next non-tashkeel letter to accept the join
        let next = chars[i + 1..].iter().find(|&&n| !is_tashkeel(n));
        let joins_forward = forms.joins_next && next.copied().is_some_and(accepts_prev_join);

        out.push(match (prev_joins, joins_forward) {
            (false, false) => forms.isolated,
            (false, true) => forms.initial,
            (true, false) => forms.final_form,
            (true, true) => forms.medial,
        });

        prev_joins = forms.joins_next;
        i += 1;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_reshape_empty() {
        assert_eq!(reshape_run(""), "");
    }

    #[test]
    fn test_isolated_single_letter() {
        // Lone beh takes its isolated form
        assert_eq!(reshape_run("ب"), "\u{FE8F}");
        // Lone alef
        assert_eq!(reshape_run("ا"), "\u{FE8D}");
    }

    #[test]
    fn test_right_joining_breaks_forward() {
        // dal feh noon: dal never joins forward, so feh starts a new
        // joining group as initial and noon closes it as final
        assert_eq!(reshape_run("دفن"), "\u{FEA9}\u{FED3}\u{FEE6}");
    }

    #[test]
    fn test_all_four_forms() {
        // meem heh meem dal: initial, medial, medial-group end, final
        assert_eq!(reshape_run("محمد"), "\u{FEE3}\u{FEA4}\u{FEE4}\u{FEAA}");
    }

    #[test]
    fn test_two_letter_join() {
        // beh noon: initial + final
        assert_eq!(reshape_run("بن"), "\u{FE91}\u{FEE6}");
    }

    #[test]
    fn test_hamza_never_joins() {
        // beh hamza dal: hamza blocks joining on both sides
        assert_eq!(reshape_run("بءد"), "\u{FE8F}\u{FE80}\u{FEA9}");
    }

    #[test]
    fn test_lam_alef_isolated() {
        assert_eq!(reshape_run("لا"), "\u{FEFB}");
    }

    #[test]
    fn test_lam_alef_final() {
        // seen lam alef meem: seen joins into the ligature, ligature
        // breaks the connection to meem
        assert_eq!(reshape_run("سلام"), "\u{FEB3}\u{FEFC}\u{FEE1}");
    }

    #[test]
    fn test_lam_alef_hamza_variants() {
        assert_eq!(reshape_run("لآ"), "\u{FEF5}");
        assert_eq!(reshape_run("لأ"), "\u{FEF7}");
        assert_eq!(reshape_run("لإ"), "\u{FEF9}");
    }

    #[test]
    fn test_tashkeel_transparent() {
        // beh + fatha + noon: the fatha stays in place and does not
        // break the beh-noon connection
        assert_eq!(reshape_run("بَن"), "\u{FE91}\u{064E}\u{FEE6}");
    }

    #[test]
    fn test_unmapped_passthrough() {
        // Arabic-Indic digits have no presentation forms and break joining
        assert_eq!(reshape_run("ب٥ن"), "\u{FE8F}٥\u{FEE5}");
    }

    #[test]
    fn test_teh_marbuta_final() {
        // sad feh heh-marbuta... feh joins into teh marbuta's final form
        assert_eq!(reshape_run("صفة"), "\u{FEBB}\u{FED4}\u{FE94}");
    }
}
