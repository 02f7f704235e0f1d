/// Display and matching forms of a source subject name.
///
/// `label` is the slugged form used inside derived evaluation ids and
/// as the persisted `subject` field; `pretty` keeps the accents and is
/// used for storage folder names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectLabel {
    pub label: String,
    pub pretty: String,
}

const FALLBACK_LABEL: &str = "cours";
const FALLBACK_PRETTY: &str = "Cours";

pub fn subject_label(source: Option<&str>) -> SubjectLabel {
    let source = source.map(str::trim).unwrap_or("");
    if source.is_empty() {
        return SubjectLabel {
            label: FALLBACK_LABEL.to_string(),
            pretty: FALLBACK_PRETTY.to_string(),
        };
    }

    let label = slug::slugify(source);
    let label = if label.is_empty() {
        FALLBACK_LABEL.to_string()
    } else {
        label
    };

    SubjectLabel {
        label,
        pretty: title_case(source),
    }
}

/// Lowercases the name and uppercases each word's first letter,
/// keeping accents: "MATHÉMATIQUES" -> "Mathématiques".
fn title_case(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut at_word_start = true;
    for c in source.chars() {
        if c.is_whitespace() || c == '-' || c == '\'' {
            out.push(c);
            at_word_start = true;
            continue;
        }
        if at_word_start {
            out.extend(c.to_uppercase());
            at_word_start = false;
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_fold_diacritics() {
        let s = subject_label(Some("MATHÉMATIQUES"));
        assert_eq!(s.label, "mathematiques");
        assert_eq!(s.pretty, "Mathématiques");
    }

    #[test]
    fn compound_names_keep_separators_in_pretty() {
        let s = subject_label(Some("PHYSIQUE-CHIMIE"));
        assert_eq!(s.label, "physique-chimie");
        assert_eq!(s.pretty, "Physique-Chimie");
    }

    #[test]
    fn missing_subject_falls_back() {
        assert_eq!(subject_label(None).label, "cours");
        assert_eq!(subject_label(Some("  ")).pretty, "Cours");
    }
}
