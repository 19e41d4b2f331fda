mod column;
mod constraint;
mod data;
mod enumeration;
mod foreign_key;
mod semantic_type;
mod table;

pub use column::*;
pub use constraint::*;
pub use data::*;
pub use enumeration::*;
pub use foreign_key::*;
pub use semantic_type::*;
pub use table::*;
