//! Keyword matching for static suggestion lists.
//!
//! An option is kept when the keyword is a case-insensitive substring of its label or
//! value, or when it matches the pinyin initials of a Chinese label (`"bj"` finds `北京`).
//! The output keeps input order.

use pinyin::ToPinyin;

use crate::suggest_option::SuggestOption;

pub fn match_options(options: &[SuggestOption], keyword: &str) -> Vec<SuggestOption> {
    if keyword.is_empty() {
        return options.to_vec();
    }
    let keyword = keyword.to_lowercase();
    options.iter().filter(|option| option_matches(option, &keyword)).cloned().collect()
}

/// `keyword` must already be lowercase.
fn option_matches(option: &SuggestOption, keyword: &str) -> bool {
    option.label.to_lowercase().contains(keyword)
        || option.value.to_lowercase().contains(keyword)
        || matches_initials(&option.label, keyword)
}

/// Initials of `label`: the first pinyin letter of every Chinese character, other letters
/// and digits lowercased as-is, everything else skipped.
/// `None` when no character of the label has pinyin data.
pub fn phonetic_initials(label: &str) -> Option<String> {
    let mut initials = String::with_capacity(label.len());
    let mut any_phonetic = false;
    for c in label.chars() {
        match c.to_pinyin() {
            Some(pinyin) => {
                any_phonetic = true;
                initials.push_str(pinyin.first_letter());
            }
            None if c.is_alphanumeric() => initials.extend(c.to_lowercase()),
            None => {}
        }
    }
    any_phonetic.then_some(initials)
}

fn matches_initials(label: &str, keyword: &str) -> bool {
    match phonetic_initials(label) {
        Some(initials) => initials.contains(keyword),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn cities() -> Vec<SuggestOption> {
        vec![SuggestOption::new("北京", "BJ"), SuggestOption::new("上海", "SH")]
    }

    #[test]
    fn pinyin_initials_find_chinese_label() {
        assert_eq!(match_options(&cities(), "bj"), vec![SuggestOption::new("北京", "BJ")]);
        assert_eq!(match_options(&cities(), "BJ"), vec![SuggestOption::new("北京", "BJ")]);
    }

    #[test]
    fn substring_on_label_and_value() {
        let options = vec![
            SuggestOption::new("Active", "ACT"),
            SuggestOption::new("Closed", "CLS"),
            SuggestOption::new("Inactive", "INA"),
        ];
        let labels = |kw| match_options(&options, kw).into_iter().map(|o| o.label).collect::<Vec<_>>();
        assert_eq!(labels("act"), vec!["Active", "Inactive"]);
        assert_eq!(labels("cls"), vec!["Closed"]);
        assert!(labels("zzz").is_empty());
    }

    #[test]
    fn mixed_labels_keep_latin_letters() {
        assert_eq!(phonetic_initials("A区仓库").as_deref(), Some("aqck"));
        assert_eq!(phonetic_initials("Warehouse A"), None);
        let options = vec![SuggestOption::new("A区仓库", "WH-A")];
        assert_eq!(match_options(&options, "aq").len(), 1);
    }

    #[test]
    fn characters_without_pinyin_never_panic() {
        let options = vec![SuggestOption::new("🙂東京★", "tokyo"), SuggestOption::new("", "")];
        assert!(match_options(&options, "xyz").is_empty());
        assert_eq!(match_options(&options, "tok").len(), 1);
    }

    proptest! {
        #[test]
        fn empty_keyword_is_identity(entries in prop::collection::vec(("\\PC{0,6}", "\\PC{0,6}"), 0..10)) {
            let options: Vec<_> = entries.into_iter().map(|(l, v)| SuggestOption::new(l, v)).collect();
            prop_assert_eq!(match_options(&options, ""), options);
        }

        #[test]
        fn result_is_ordered_subsequence(
            entries in prop::collection::vec(("[a-z上海北京]{0,5}", "[A-Z]{0,3}"), 0..10),
            keyword in "[a-z]{0,2}",
        ) {
            let options: Vec<_> = entries.into_iter().map(|(l, v)| SuggestOption::new(l, v)).collect();
            let matched = match_options(&options, &keyword);
            let mut rest = options.iter();
            for m in &matched {
                prop_assert!(rest.any(|o| o == m));
            }
        }
    }
}
