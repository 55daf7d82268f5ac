//! `{name}` placeholder substitution.

/// Replace `{name}` placeholders with the matching parameter.
///
/// `{{` and `}}` produce literal braces. Returns `None` if a placeholder
/// has no parameter or a brace is unbalanced.
pub(crate) fn format_named(template: &str, params: &[(&str, String)]) -> Option<String> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '{' => {
                let mut name = String::new();
                loop {
                    match chars.next()? {
                        '}' => break,
                        ch => name.push(ch),
                    }
                }
                let name = name.trim();
                let (_, value) = params.iter().find(|(key, _)| *key == name)?;
                out.push_str(value);
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '}' => return None,
            ch => out.push(ch),
        }
    }

    Some(out)
}
