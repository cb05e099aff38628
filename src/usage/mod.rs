crate::reexport!(clock);
crate::reexport!(data);
crate::reexport!(edit);
crate::reexport!(pending);
crate::reexport!(store);
crate::reexport!(tracker);
