crate::reexport!(column);
crate::reexport!(table);
crate::reexport!(database);
crate::reexport!(schema);
crate::reexport!(provider);
crate::reexport!(cache);

/// Case-insensitive comparison used for every metadata name lookup.
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}
