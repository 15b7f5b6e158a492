// ResourceArc wrapper for parsed tables
//
// A parsed table is handed to the BEAM as an opaque resource. The table is
// immutable after parsing, so readers on any scheduler share it without a
// lock.

use crate::table::Table;
use rustler::{Resource, ResourceArc};

pub struct TableResource {
    pub table: Table,
}

impl TableResource {
    pub fn new(table: Table) -> Self {
        TableResource { table }
    }
}

#[rustler::resource_impl]
impl Resource for TableResource {}

/// Type alias for the ResourceArc
pub type TableRef = ResourceArc<TableResource>;
