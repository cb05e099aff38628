//! Context-aware completion.
//!
//! Modules:
//! - `clause`     : Backward keyword scan naming the clause at the cursor.
//! - `tables`     : FROM / JOIN / statement-target table references.
//! - `context`    : Cursor context (word, dotted prefixes, clause, tables).
//! - `alias`      : Short, collision-free table aliases.
//! - `suggestion` : Candidate list for a context and a schema.
//! - `completer`  : Metadata fetch, ranking and usage tracking around the above.
crate::reexport!(clause);
crate::reexport!(tables);
crate::reexport!(context);
crate::reexport!(alias);
crate::reexport!(suggestion);
crate::reexport!(suggestion_tests, test);
crate::reexport!(completer);
