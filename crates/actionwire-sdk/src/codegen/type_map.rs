//! Rust → TypeScript scalar type mapping.
//!
//! A fixed table of scalar equivalences. Names absent from the table pass through
//! unchanged; they are assumed to name a struct declared in the same schema.

/// Scalar Rust type names and their TypeScript equivalents.
const SCALARS: &[(&str, &str)] = &[
    ("String", "string"),
    ("str", "string"),
    ("char", "string"),
    ("i8", "number"),
    ("i16", "number"),
    ("i32", "number"),
    ("i64", "number"),
    ("i128", "number"),
    ("isize", "number"),
    ("u8", "number"),
    ("u16", "number"),
    ("u32", "number"),
    ("u64", "number"),
    ("u128", "number"),
    ("usize", "number"),
    ("f32", "number"),
    ("f64", "number"),
    ("bool", "boolean"),
    ("Error", "Error"),
];

/// Map a Rust type name to its TypeScript spelling.
pub fn map_type(name: &str) -> &str {
    SCALARS
        .iter()
        .find(|(rust, _)| *rust == name)
        .map(|(_, ts)| *ts)
        .unwrap_or(name)
}

/// Whether `name` is one of the mapped scalars.
pub fn is_scalar(name: &str) -> bool {
    SCALARS.iter().any(|(rust, _)| *rust == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_and_float_types_map_to_number() {
        for name in ["i32", "i64", "u8", "usize", "f32", "f64"] {
            assert_eq!(map_type(name), "number", "{name}");
        }
    }

    #[test]
    fn test_text_bool_and_error() {
        assert_eq!(map_type("String"), "string");
        assert_eq!(map_type("char"), "string");
        assert_eq!(map_type("bool"), "boolean");
        assert_eq!(map_type("Error"), "Error");
    }

    #[test]
    fn test_unknown_names_pass_through() {
        assert_eq!(map_type("GetUserRequest"), "GetUserRequest");
        assert!(!is_scalar("GetUserRequest"));
        assert!(is_scalar("u64"));
    }
}
