pub mod store;

pub use store::{AnnotatedDeal, SalesDataStore};
