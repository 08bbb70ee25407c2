//! Short-name derivation for prefab paths

/// Last path segment of `path`, with `extension` removed if present.
///
/// Both `/` and `\` count as separators so paths captured on either
/// platform give the same name.
pub fn short_name(path: &str, extension: &str) -> String {
    let last = path.rsplit(&['/', '\\'][..]).next().unwrap_or(path);

    if extension.is_empty() {
        return last.to_string();
    }

    match last.len().checked_sub(extension.len()) {
        Some(cut) if last.is_char_boundary(cut) && last[cut..].eq_ignore_ascii_case(extension) => {
            last[..cut].to_string()
        }
        _ => last.to_string(),
    }
}
