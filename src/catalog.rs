//! Track catalog: normalized artist/album/track records and ordered queries.
//!
//! The sequencing core treats the catalog as an external, queryable store. The
//! in-memory implementation here is enough for a host application; a database
//! backed one only has to implement [`Catalog`].

mod model;
mod scan;
mod store;

pub use model::*;
pub use scan::scan;
pub use store::{Catalog, MemoryCatalog};

#[cfg(test)]
mod tests;
