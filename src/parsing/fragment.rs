use regex::Regex;

/// Finds the object literal of the recipe titled `title` inside a
/// multi-recipe payload.
///
/// The title is matched as the exact JSON-encoded string, so punctuation,
/// emoji and regex metacharacters are taken literally. The returned slice
/// runs from the recipe's opening brace through its closing brace.
///
/// Returns `None` when no recipe carries the title or when several do, so
/// one recipe's group order can never be read from another's text.
pub fn locate_recipe_fragment<'a>(title: &str, full_json: &'a str) -> Option<&'a str> {
    let literal = serde_json::to_string(title).ok()?;
    let re = Regex::new(&format!(r#""title"\s*:\s*{}"#, regex::escape(&literal))).ok()?;

    let mut matches = re.find_iter(full_json);
    let key_at = matches.next()?.start();
    if matches.next().is_some() {
        return None;
    }

    let start = enclosing_object_start(full_json, key_at)?;
    let end = object_end(full_json, start)?;
    Some(&full_json[start..end])
}

/// Offset of the `{` that opens the innermost object still open at `at`.
///
/// `None` if `at` falls inside a string literal or outside any object.
fn enclosing_object_start(text: &str, at: usize) -> Option<usize> {
    let mut open = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text[..at].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => open.push(offset),
            '}' => {
                open.pop()?;
            }
            _ => {}
        }
    }

    if in_string {
        return None;
    }
    open.last().copied()
}

/// Byte offset just past the brace closing the object that opens at `start`.
fn object_end(text: &str, start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text[start..].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(start + offset + 1);
                }
            }
            _ => {}
        }
    }

    None
}
