pub mod entry;
pub mod layout;
pub mod types;

pub use entry::StorageEntry;
pub use layout::{StorageLayout, TypeMap};
pub use types::{BytesType, DynamicArrayType, Encoding, InplaceType, MappingType, StorageType};
