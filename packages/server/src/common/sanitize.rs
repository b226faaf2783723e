use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TAG_RE: Regex = Regex::new(r"(?s)<[^>]*>").expect("valid tag regex");
    static ref INLINE_WS_RE: Regex = Regex::new(r"[ \t]+").expect("valid whitespace regex");
    static ref ANY_WS_RE: Regex = Regex::new(r"\s+").expect("valid whitespace regex");
}

/// Clean a single-line text field: strip tags and control characters,
/// collapse whitespace, trim.
pub fn clean_text(input: &str) -> String {
    let stripped = TAG_RE.replace_all(input, "");
    let visible: String = stripped.chars().filter(|c| !c.is_control() || *c == ' ').collect();
    ANY_WS_RE.replace_all(&visible, " ").trim().to_string()
}

/// Clean a multi-line field. Newlines survive, everything else as `clean_text`.
pub fn clean_textarea(input: &str) -> String {
    let stripped = TAG_RE.replace_all(input, "");
    let visible: String = stripped
        .replace("\r\n", "\n")
        .chars()
        .filter(|c| *c == '\n' || !c.is_control())
        .collect();
    let lines: Vec<String> = visible
        .split('\n')
        .map(|line| INLINE_WS_RE.replace_all(line, " ").trim().to_string())
        .collect();
    lines.join("\n").trim().to_string()
}

pub fn clean_email(input: &str) -> String {
    clean_text(input).to_lowercase()
}

pub fn clean_url(input: &str) -> String {
    clean_text(input).replace(' ', "%20")
}

/// Request bodies clean their own text fields before validation runs.
pub trait Sanitize {
    fn sanitize(&mut self) {}
}

/// Apply `f` and drop the value if nothing is left.
pub fn clean_opt(value: &mut Option<String>, f: fn(&str) -> String) {
    *value = value.take().map(|v| f(&v)).filter(|v| !v.is_empty());
}

/// Apply `f` for a partial update. A blank result stays `Some("")`,
/// which the update query stores as NULL.
pub fn clean_patch(value: &mut Option<String>, f: fn(&str) -> String) {
    if let Some(v) = value.as_mut() {
        *v = f(v);
    }
}

/// Apply `f` in place to a required field.
pub fn clean_req(value: &mut String, f: fn(&str) -> String) {
    *value = f(value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_keeps_blank_as_a_clear_marker() {
        let mut blank = Some("  <i></i> ".to_string());
        clean_patch(&mut blank, clean_text);
        assert_eq!(blank.as_deref(), Some(""));

        let mut absent = None;
        clean_patch(&mut absent, clean_text);
        assert_eq!(absent, None);
    }

    #[test]
    fn strips_tags_and_control_chars() {
        assert_eq!(clean_text("  <b>Acme</b>\u{0007} Corp\t\n"), "Acme Corp");
        assert_eq!(clean_text("<script>alert(1)</script>Site"), "alert(1)Site");
    }

    #[test]
    fn textarea_keeps_line_breaks() {
        assert_eq!(
            clean_textarea("first   line\r\n<i>second</i>\tline\n"),
            "first line\nsecond line"
        );
    }

    #[test]
    fn optional_fields_collapse_to_none() {
        let mut blank = Some("  <br/> ".to_string());
        clean_opt(&mut blank, clean_text);
        assert_eq!(blank, None);

        let mut email = Some(" Ana@Example.COM ".to_string());
        clean_opt(&mut email, clean_email);
        assert_eq!(email.as_deref(), Some("ana@example.com"));
    }
}
