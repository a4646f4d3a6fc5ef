//! Storage Adapters

mod output_store;

pub use output_store::FileOutputStorage;
