//! Path Addressing
//!
//! Documents live at `collection/.../id`: the final segment is the document
//! id, everything before it names the collection. A collection path is used
//! whole as the table locator (it is always bound through `type::table`, so
//! separator characters in it are never parsed by the engine).

use crate::db::error::DataError;

/// Split a document path into (collection, id)
pub(crate) fn split_document_path(path: &str) -> Result<(String, String), DataError> {
    match path.rsplit_once('/') {
        Some((collection, id))
            if !id.is_empty() && !collection.is_empty() && has_no_empty_segments(collection) =>
        {
            Ok((collection.to_string(), id.to_string()))
        }
        _ => Err(DataError::invalid_path(path)),
    }
}

/// Validate a collection path and return the table locator
pub(crate) fn collection_table(path: &str) -> Result<String, DataError> {
    if path.is_empty() || !has_no_empty_segments(path) {
        return Err(DataError::invalid_path(path));
    }
    Ok(path.to_string())
}

fn has_no_empty_segments(path: &str) -> bool {
    path.split('/').all(|segment| !segment.is_empty())
}
