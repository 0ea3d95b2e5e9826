// Content editing: the in-memory résumé record and the field editors over it.
// Nothing in here performs I/O except the seed loader.

pub mod entries;
pub mod handlers;
pub mod module;
pub mod sections;
pub mod seed;
pub mod store;
pub mod validation;
