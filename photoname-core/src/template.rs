use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Template used when the caller leaves the template blank.
pub const DEFAULT_TEMPLATE: &str = "V-{group}_{label}_{seq:003}";

static PADDED_SEQ: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{seq:(\d+)\}").expect("padded sequence pattern is valid"));

/// Return `template`, or [`DEFAULT_TEMPLATE`] if it is blank.
pub fn resolve_template(template: &str) -> &str {
    if template.trim().is_empty() {
        DEFAULT_TEMPLATE
    } else {
        template
    }
}

/// Expand a naming template into a literal file name.
///
/// Placeholders are replaced in a fixed order: `{group}`, then `{label}`
/// (verbatim, unescaped), then the sequence number. A `{seq:N}` placeholder
/// zero-pads to width `N`; only when none is present is a bare `{seq}`
/// replaced. `extension` is appended unless the result already ends with it.
pub fn expand(template: &str, group: u32, label: &str, seq: usize, extension: &str) -> String {
    let mut result = template
        .replace("{group}", &group.to_string())
        .replace("{label}", label);

    if PADDED_SEQ.is_match(&result) {
        result = PADDED_SEQ
            .replace_all(&result, |caps: &Captures| {
                caps[1].parse::<usize>().map_or_else(
                    |_| caps[0].to_string(),
                    |width| format!("{seq:0width$}"),
                )
            })
            .into_owned();
    } else {
        result = result.replace("{seq}", &seq.to_string());
    }

    if !result.ends_with(extension) {
        result.push_str(extension);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_template() {
        assert_eq!(
            expand(DEFAULT_TEMPLATE, 1, "general", 1, ".jpg"),
            "V-1_general_001.jpg"
        );
        assert_eq!(
            expand(DEFAULT_TEMPLATE, 1, "detail", 2, ".jpg"),
            "V-1_detail_002.jpg"
        );
    }

    #[test]
    fn test_bare_seq() {
        assert_eq!(expand("IMG_{seq}", 3, "x", 42, ".png"), "IMG_42.png");
    }

    #[test]
    fn test_padded_seq_wins_over_bare_seq() {
        // Once a padded placeholder exists the bare one is left alone.
        assert_eq!(
            expand("{seq:2}-{seq}", 1, "x", 7, ".jpg"),
            "07-{seq}.jpg"
        );
    }

    #[test]
    fn test_every_padded_seq_uses_its_own_width() {
        assert_eq!(expand("{seq:2}_{seq:4}", 1, "x", 5, ""), "05_0005");
    }

    #[test]
    fn test_seq_wider_than_padding() {
        assert_eq!(expand("{seq:2}", 1, "x", 1234, ".jpg"), "1234.jpg");
    }

    #[test]
    fn test_extension_not_duplicated() {
        assert_eq!(expand("cover.jpg", 1, "x", 1, ".jpg"), "cover.jpg");
        assert_eq!(expand("cover", 1, "x", 1, ""), "cover");
    }

    #[test]
    fn test_label_inserted_verbatim() {
        assert_eq!(expand("{label}", 1, "a:b", 1, ".jpg"), "a:b.jpg");
        assert_eq!(expand("{label}-{label}", 1, "外観", 1, ".jpg"), "外観-外観.jpg");
    }

    #[test]
    fn test_unknown_placeholders_are_kept() {
        assert_eq!(expand("{date}_{seq}", 1, "x", 1, ".jpg"), "{date}_1.jpg");
    }

    #[test]
    fn test_resolve_template() {
        assert_eq!(resolve_template(""), DEFAULT_TEMPLATE);
        assert_eq!(resolve_template("   "), DEFAULT_TEMPLATE);
        assert_eq!(resolve_template("{seq}"), "{seq}");
    }

    proptest! {
        #[test]
        fn prop_padded_seq_has_exact_width(width in 1usize..=6, raw in 0usize..1_000_000) {
            let seq = raw % 10usize.pow(u32::try_from(width).unwrap());
            let template = format!("{{seq:{width}}}");
            let out = expand(&template, 1, "x", seq, "");
            prop_assert_eq!(out.len(), width);
            prop_assert!(out.chars().all(|c| c.is_ascii_digit()));
            prop_assert_eq!(out.parse::<usize>().unwrap(), seq);
        }

        #[test]
        fn prop_expand_is_deterministic(
            group in 1u32..1000,
            label in "[a-zA-Z0-9_]{0,12}",
            seq in 1usize..10_000,
            ext in prop::sample::select(vec!["", ".jpg", ".png", ".heic"]),
        ) {
            let first = expand(DEFAULT_TEMPLATE, group, &label, seq, ext);
            let second = expand(DEFAULT_TEMPLATE, group, &label, seq, ext);
            prop_assert_eq!(&first, &second);
            prop_assert!(first.ends_with(ext));
        }
    }
}
