//! Content registries for folio.
//!
//! This crate turns content directories into queryable trees:
//! - [`discover_files`] selects the files of a collection
//! - [`Hierarchy`] groups a file with its same-named directory, and [`build`]
//!   turns the groups into a [`ContentTree`](folio_document::ContentTree)
//! - [`Registry`] answers lookups, filters, navigation and aggregate queries
//! - [`Catalog`] holds one registry per configured collection
//!
//! # Example
//!
//! ```no_run
//! use folio_config::Config;
//! use folio_index::{Catalog, Criteria};
//!
//! let config = Config::load(".".as_ref()).unwrap();
//! let catalog = Catalog::from_config(&config).unwrap();
//! let blog = catalog.registry("blog").unwrap();
//!
//! for post in blog.filter(&Criteria::new().tag("rust").paginate(10, 1)) {
//!     println!("{} {}", post.date_string(), post.title());
//! }
//! ```

#![warn(missing_docs)]

mod aggregate;
mod catalog;
mod criteria;
mod discovery;
mod error;
mod hierarchy;
mod registry;

pub use aggregate::{Month, collect_authors, collect_months, collect_tags};
pub use catalog::Catalog;
pub use criteria::Criteria;
pub use discovery::{DiscoveredFile, discover_files};
pub use error::IndexError;
pub use hierarchy::{Group, Hierarchy, build};
pub use registry::Registry;
