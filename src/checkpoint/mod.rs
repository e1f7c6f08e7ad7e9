mod store;

pub use store::{FileWeightStore, MemoryWeightStore, NullWeightStore, WeightMap, WeightStore};

#[cfg(test)]
pub(crate) use store::FailingWeightStore;
