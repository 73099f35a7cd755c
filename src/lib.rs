//! Embedded boolean search for in-memory records.
//!
//! This crate parses the kind of query a search box produces and runs it
//! against collections you already hold in memory, without an index. The
//! syntax is plain text: `smith AND transfer NOT wire`, quoted phrases
//! (`"wire transfer"`), implicit AND between words, `-` as NOT, `*`/`?`
//! wildcards and `~fuzzy~` in-order lookup inside single terms. Parsing is
//! lenient and never fails: half-typed input degrades to the nearest
//! sensible query, and a blank query matches everything.
//!
//! Everything is a pure function of its inputs. There is no I/O and no
//! shared state, and a parsed tree is immutable, so queries can be built
//! and run from any number of threads without synchronization.
//!
//! ```
//! use trovilo::Query;
//! use serde_json::json;
//!
//! let records = vec![
//!     json!({
//!         "name": "Wire transfer",
//!         "key": "txn-0042",
//!         "summary": "Transfer flagged by J. Smith",
//!         "type": "transaction",
//!     }),
//!     json!({
//!         "name": "Internal transfer",
//!         "key": "txn-0051",
//!         "summary": "Transfer reviewed by A. Smith",
//!         "type": "transaction",
//!     }),
//! ];
//!
//! let query = Query::parse("smith AND transfer NOT wire");
//! let matching = query.matching_records(&records);
//! assert_eq!(matching.len(), 1);
//! assert_eq!(matching[0]["key"], "txn-0051");
//! ```
//!
//! Matched text can be decorated afterwards: [`Query::highlight_terms`]
//! lists what the query mentions and [`highlight_ranges`] locates those
//! terms in any display string.
//!
//! ```
//! use trovilo::{highlight_ranges, Query};
//!
//! let query = Query::parse("smith transfer");
//! let ranges = highlight_ranges("Transfer to Smith", &query.highlight_terms());
//! assert_eq!(ranges, vec![0..8, 12..17]);
//! ```

pub(crate) use log::trace;

mod query;
mod record;

pub use {query::*, record::*};
