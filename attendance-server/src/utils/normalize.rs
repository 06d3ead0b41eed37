//! 姓名规范化 — 模糊匹配用
//!
//! Search and reconciliation compare names after normalization; the
//! stored `display_name` is never touched. The normalized form is also
//! persisted in `member.name_norm` so substring search can run in SQL.

use unicode_normalization::UnicodeNormalization;

/// Canonicalize a free-text name for matching: trim, collapse internal
/// whitespace runs to a single space, lowercase, then NFD-decompose and
/// drop combining marks ("Adá" → "ada").
///
/// Idempotent: `normalize_name(normalize_name(x)) == normalize_name(x)`.
pub fn normalize_name(name: &str) -> String {
    let collapsed = name.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

fn is_combining_mark(c: char) -> bool {
    // U+0300..U+036F covers the combining diacritical marks block
    ('\u{0300}'..='\u{036F}').contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_and_collapses_whitespace() {
        assert_eq!(normalize_name("  Ada   Lovelace "), "ada lovelace");
        assert_eq!(normalize_name("Ada\t\nLovelace"), "ada lovelace");
    }

    #[test]
    fn test_lowercases() {
        assert_eq!(normalize_name("ADA LOVELACE"), "ada lovelace");
    }

    #[test]
    fn test_strips_diacritics() {
        assert_eq!(normalize_name("Adá"), "ada");
        assert_eq!(normalize_name("Éléonore Niño"), "eleonore nino");
    }

    #[test]
    fn test_idempotent() {
        for name in ["  Ada   Lovelace ", "Éléonore Niño", "ADÁ", ""] {
            let once = normalize_name(name);
            assert_eq!(normalize_name(&once), once);
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize_name("   "), "");
    }
}
