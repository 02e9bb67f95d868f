use regex::{Captures, Regex};
use std::sync::LazyLock;

static IMAGE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[[^\]]*\]\([^)]*\)").unwrap());

static LINK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\([^)]*\)").unwrap());

/// Strip markdown that reads badly in a plain-text tooltip.
///
/// Images become `[image]`; links keep their text as `[text]`. A link with
/// empty text is left untouched.
pub fn sanitize_markdown(markdown: &str) -> String {
    let without_images = IMAGE_REGEX.replace_all(markdown, "[image]");
    LINK_REGEX
        .replace_all(&without_images, |caps: &Captures| {
            let text = &caps[1];
            if text.is_empty() {
                caps[0].to_string()
            } else {
                format!("[{}]", text)
            }
        })
        .into_owned()
}
