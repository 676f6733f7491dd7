//! Todo identifiers.
//!
//! Identifiers are MongoDB ObjectIds rendered as 24 hex characters. Path
//! segments are trimmed before parsing, so `" 65a1...4b "` is accepted.

use bson::oid::ObjectId;

use crate::error::InvalidTodoId;

/// Parse a client-supplied identifier into an `ObjectId`.
pub fn parse_todo_id(raw: &str) -> Result<ObjectId, InvalidTodoId> {
    ObjectId::parse_str(raw.trim()).map_err(|_| InvalidTodoId(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_generated_ids() {
        let id = ObjectId::new();
        assert_eq!(parse_todo_id(&id.to_hex()).unwrap(), id);
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let id = ObjectId::new();
        let padded = format!("  {}\t", id.to_hex());
        assert_eq!(parse_todo_id(&padded).unwrap(), id);
    }

    #[test]
    fn accepts_uppercase_hex() {
        let id = ObjectId::new();
        assert_eq!(parse_todo_id(&id.to_hex().to_uppercase()).unwrap(), id);
    }

    #[test]
    fn rejects_malformed_ids() {
        for raw in [
            "",
            " ",
            "bad-id",
            "65a1b2c3d4e5f60718293a4",
            "65a1b2c3d4e5f60718293a4b0",
            "zza1b2c3d4e5f60718293a4b",
            "00000000-0000-0000-0000-000000000000",
        ] {
            let err = parse_todo_id(raw).unwrap_err();
            assert_eq!(err.0, raw);
        }
    }
}
