//! C ABI entry points.
//!
//! Every argument is a borrowed, NUL-terminated UTF-8 string. A null pointer
//! or invalid UTF-8 is reported with the code of the argument it belongs to.

use std::ffi::{c_char, c_int, CStr};

use crate::boundary::{self, decode_document, evaluate_document, evaluate_text};
use crate::error::{DocumentError, TextError};

/// Borrows a C string as `&str`, or `None` when null or not UTF-8.
///
/// # Safety
///
/// `ptr` must be null or point to a NUL-terminated string that stays valid
/// for `'a`.
unsafe fn borrow_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok()
}

/// Evaluates selector text against a JSON label set.
///
/// Returns `0` on match, `1` on no match, `-1` for an invalid selector and
/// `-2` for an invalid label set.
///
/// # Safety
///
/// Both pointers must be null or point to NUL-terminated strings that stay
/// valid for the duration of the call.
#[no_mangle]
pub unsafe extern "C" fn match_label(selector: *const c_char, labels: *const c_char) -> c_int {
    let result = match (borrow_str(selector), borrow_str(labels)) {
        (None, _) => Err(TextError::SelectorText),
        (Some(selector), None) => kubesel::parse(selector)
            .map_err(TextError::Selector)
            .and(Err(TextError::LabelsText)),
        (Some(selector), Some(labels)) => evaluate_text(selector, labels),
    };
    boundary::status(result, "match_label")
}

/// Evaluates a JSON selector document against a JSON label set.
///
/// Returns `0` on match, `1` on no match, `-2` for an invalid document, `-3`
/// for an invalid label set and `-4` when the document is not a valid
/// selector.
///
/// # Safety
///
/// Both pointers must be null or point to NUL-terminated strings that stay
/// valid for the duration of the call.
#[no_mangle]
pub unsafe extern "C" fn match_label_selector(
    document: *const c_char,
    labels: *const c_char,
) -> c_int {
    let result = match (borrow_str(document), borrow_str(labels)) {
        (None, _) => Err(DocumentError::DocumentText),
        (Some(document), None) => decode_document(document)
            .map_err(DocumentError::Document)
            .and_then(|doc| {
                doc.into_label_selector()
                    .to_selector()
                    .map_err(DocumentError::Conversion)
            })
            .and(Err(DocumentError::LabelsText)),
        (Some(document), Some(labels)) => evaluate_document(document, labels),
    };
    boundary::status(result, "match_label_selector")
}
