/// Text after `#` is a comment.
pub fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

pub fn is_separator_line(line: &str) -> bool {
    let t = line.trim();
    !t.is_empty() && t.chars().all(|c| c == '=')
}

/// Split `int32[4]` into `("int32", "[4]")`.
pub fn split_array_suffix(token: &str) -> (&str, &str) {
    match token.find('[') {
        Some(pos) => (&token[..pos], &token[pos..]),
        None => (token, ""),
    }
}

pub fn split_qual(name: &str) -> Vec<&str> {
    name.split('/')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Path tokens with any `[i]` index suffixes removed: `a.b[2].c` → `a, b, c`.
///
/// The empty path has no tokens. Empty segments (`a..b`, `[0]`) are kept as
/// empty tokens, which match no field.
pub fn path_tokens(path: &str) -> impl Iterator<Item = &str> {
    (!path.is_empty())
        .then(|| path.split('.'))
        .into_iter()
        .flatten()
        .map(|part| split_array_suffix(part.trim()).0)
}
