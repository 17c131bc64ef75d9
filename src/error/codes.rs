/// Error code registry for bucketry
///
/// Error codes are organized by category:
/// - 1000-1999: Grouping errors
/// - 2000-2999: Grouping spec (configuration) errors
pub struct ErrorCode;

impl ErrorCode {
    // Grouping errors (1000-1999)
    pub const ARRAY_EXPECTED: u16 = 1001;
    pub const TYPE_MISMATCH: u16 = 1002;
    pub const KEY_NOT_STRING: u16 = 1003;

    // Grouping spec errors (2000-2999)
    pub const SPEC_EMPTY_SOURCE: u16 = 2001;
    pub const SPEC_EMPTY_SEPARATOR: u16 = 2002;
    pub const SPEC_AMBIGUOUS_SOURCE: u16 = 2003;
}

/// Get a human-readable description for an error code
pub fn describe_error_code(code: u16) -> &'static str {
    match code {
        ErrorCode::ARRAY_EXPECTED => "Grouping input is not an array",
        ErrorCode::TYPE_MISMATCH => "Entry does not carry a label map",
        ErrorCode::KEY_NOT_STRING => "Grouping key resolved to a non-string value",
        ErrorCode::SPEC_EMPTY_SOURCE => "Grouping spec names an empty path or label",
        ErrorCode::SPEC_EMPTY_SEPARATOR => "Grouping spec uses an empty separator",
        ErrorCode::SPEC_AMBIGUOUS_SOURCE => "Grouping spec must name exactly one key source",
        _ => "Unknown error",
    }
}
