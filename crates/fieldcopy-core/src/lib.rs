//! Fieldcopy Core - Field-by-name value copying between records and mappings
//!
//! This crate copies values between structured records and string-keyed
//! mappings, in single and list form. Which source slot feeds which target slot
//! is decided by a three-tier name resolution, and every value is coerced into
//! the declared type of the slot that receives it.
//!
//! # Main Components
//!
//! - **Catalogs**: the [`Record`] trait, the [`record!`] macro and [`SlotMap`]
//! - **Name Resolution**: explicit mappings, tie-breakers and identical names
//! - **Coercion**: scalar conversion into a destination slot's type
//! - **Witnesses**: destination lists that know how to build their elements
//! - **Copy Executors**: the eight record/mapping copy operations
//! - **Storage Adapters**: the domain record to storage row convention
//!
//! # Example
//!
//! ```
//! use fieldcopy_core::{copy_record_to_record_default, Result};
//!
//! fieldcopy_core::record! {
//!     #[derive(Debug, Default)]
//!     pub struct Form {
//!         name: String,
//!         age: String,
//!     }
//! }
//!
//! fieldcopy_core::record! {
//!     #[derive(Debug, Default)]
//!     pub struct Person {
//!         name: String,
//!         age: i32,
//!     }
//! }
//!
//! fn example() -> Result<()> {
//!     let form = Form { name: "A".into(), age: "30".into() };
//!     let mut person = Person::default();
//!     copy_record_to_record_default(&form, &mut person)?;
//!     assert_eq!(person.age, 30);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod catalog;
pub mod coerce;
pub mod copy;
pub mod error;
pub mod resolve;
pub mod storage;
pub mod types;
pub mod witness;

#[cfg(test)]
mod proptest_strategies;

// Re-export main types for convenience
pub use error::{AccessError, Error, Result};
pub use types::{FieldType, Value, ValueKind};

pub use catalog::{Access, Catalog, FieldDescriptor, Record, Schema, SlotMap, SlotValue};

pub use coerce::{coerce, conversion, Conversion};

pub use resolve::{
    resolve, Binding, CopyOptions, CopyOptionsBuilder, NameTable, NamingRules, TieBreaker, Tier,
};

pub use witness::{MapList, RecordList, Witness};

pub use copy::{
    // Record sources
    copy_record_list_to_map_list, copy_record_list_to_map_list_default,
    copy_record_list_to_record_list, copy_record_list_to_record_list_default, copy_record_to_map,
    copy_record_to_map_default, copy_record_to_record, copy_record_to_record_default,

    // Mapping sources
    copy_map_list_to_map_list, copy_map_list_to_map_list_default, copy_map_list_to_record_list,
    copy_map_list_to_record_list_default, copy_map_to_map, copy_map_to_map_default,
    copy_map_to_record, copy_map_to_record_default,

    // Outcome
    CopyReport, SkippedSlot, SlotEntry,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
