//! School profile as returned by the schools endpoint.

use serde::{Deserialize, Serialize};

use crate::audit::Part1Data;
use crate::count::Count;
use crate::types::EntityId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolProfile {
    pub id: EntityId,
    pub name: String,
    #[serde(default, alias = "studentCount")]
    pub number_of_students: Option<u64>,
}

impl SchoolProfile {
    /// Step 1 pre-filled from the school's own record. Audit-specific
    /// fields stay empty.
    pub fn prefill_part1(&self) -> Part1Data {
        Part1Data {
            school_name: self.name.clone(),
            number_of_students: self
                .number_of_students
                .map_or_else(|| Count::new(""), Count::from_number),
            ..Part1Data::default()
        }
    }
}
