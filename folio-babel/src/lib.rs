//! Codecs between external text formats and the folio rich-text tree
//!
//!     The editor works on a canonical tree of documents, blocks, inlines and text leaves (see
//!     ./tree). This crate converts that tree to and from HTML fragments and plain text, and reads
//!     and writes the tree itself as JSON for tooling.
//!
//!     This is a pure lib, that is, it powers folio-cli but is shell agnostic: no code here should
//!     print, read env vars or touch the filesystem. Logging goes through the `log` facade and the
//!     binary decides where it ends up.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── formats
//!     │   ├── html
//!     │   │   ├── tables.rs       # Element, block, inline and mark lookup tables
//!     │   │   ├── parser.rs       # HTML → tree
//!     │   │   ├── serializer.rs   # tree → HTML
//!     │   │   └── mod.rs
//!     │   ├── text                # Blank-line paragraph splitting
//!     │   └── json                # Wire shape of the tree
//!     ├── lib.rs
//!     └── tree                    # Canonical tree
//!
//! Testing
//!     tests
//!     ├── fixtures
//!     └── <format>
//!         └── <testname>.rs
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.
//!
//! Lossiness
//!
//!     HTML import keeps structure, attributes and one level of marks. HTML export keeps structure
//!     and attributes but writes no marks, so HTML → tree → HTML is only faithful for markup
//!     without formatting tags and without element types that several tags share. Plain text
//!     keeps nothing but paragraph text.
//!
//!     Every conversion is a pure function of its input and the lookup tables, so calls can run
//!     on any number of threads without coordination.

pub mod error;
pub mod format;
pub mod formats;
pub mod registry;
pub mod tree;

pub use error::FormatError;
pub use format::Format;
pub use formats::html::{ElementTable, HtmlTables, TableOverrides};
pub use registry::FormatRegistry;
pub use tree::{Block, Data, Document, Inline, Node, Text, Value};
