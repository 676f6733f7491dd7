//! Payload validation.

use crate::types::TodoDto;

/// Returns `false` only when the title is exactly one space.
///
/// Empty titles and titles made of several spaces are accepted.
pub fn validate_todo(todo: &TodoDto) -> bool {
    is_valid_title(&todo.title)
}

pub fn is_valid_title(title: &str) -> bool {
    title != " "
}
