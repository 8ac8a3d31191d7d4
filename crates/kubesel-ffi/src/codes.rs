//! Integer status codes returned across the host boundary.

/// The label set satisfies the selector.
pub const MATCH: i32 = 0;

/// The label set does not satisfy the selector.
pub const NO_MATCH: i32 = 1;

/// `match_label`: the selector text has a syntax or validation error.
pub const SELECTOR_ERROR: i32 = -1;

/// `match_label`: the label set is not a flat JSON object of strings.
pub const LABELS_DECODE_ERROR: i32 = -2;

/// `match_label_selector`: the selector document could not be decoded.
pub const DOCUMENT_DECODE_ERROR: i32 = -2;

/// `match_label_selector`: the label set could not be decoded.
pub const DOCUMENT_LABELS_DECODE_ERROR: i32 = -3;

/// `match_label_selector`: the document decoded but is not a valid selector.
pub const CONVERSION_ERROR: i32 = -4;

/// Maps a match outcome to [`MATCH`] or [`NO_MATCH`].
pub fn from_match(matched: bool) -> i32 {
    if matched {
        MATCH
    } else {
        NO_MATCH
    }
}
