//! Company note domain module.

mod model;
mod store;

pub use model::CompanyNote;
pub use store::NoteStore;
