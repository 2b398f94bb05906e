//! Attribute parsing for the HTML → plain text scanner

/// Parse the attribute part of a tag (`href="x" class=y disabled`).
///
/// Names are lowercased; valueless attributes get an empty value. Quotes may
/// be single or double; an unterminated quote runs to the end of the input.
pub fn parse_attributes(attrs: &str) -> Vec<(String, String)> {
    let chars: Vec<char> = attrs.chars().collect();
    let mut out = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        while i < chars.len() && (chars[i].is_whitespace() || chars[i] == '/') {
            i += 1;
        }
        let name_start = i;
        while i < chars.len() && !chars[i].is_whitespace() && !matches!(chars[i], '=' | '>' | '/')
        {
            i += 1;
        }
        if name_start == i {
            i += 1;
            continue;
        }
        let name: String = chars[name_start..i].iter().collect::<String>().to_ascii_lowercase();

        while i < chars.len() && chars[i].is_whitespace() {
            i += 1;
        }
        let mut value = String::new();
        if i < chars.len() && chars[i] == '=' {
            i += 1;
            while i < chars.len() && chars[i].is_whitespace() {
                i += 1;
            }
            if i < chars.len() && (chars[i] == '"' || chars[i] == '\'') {
                let quote = chars[i];
                i += 1;
                while i < chars.len() && chars[i] != quote {
                    value.push(chars[i]);
                    i += 1;
                }
                i += 1;
            } else {
                while i < chars.len() && !chars[i].is_whitespace() && chars[i] != '>' {
                    value.push(chars[i]);
                    i += 1;
                }
            }
        }
        out.push((name, value));
    }

    out
}

/// Value of one attribute, if present.
pub fn attribute(attrs: &str, name: &str) -> Option<String> {
    parse_attributes(attrs)
        .into_iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value)
}
