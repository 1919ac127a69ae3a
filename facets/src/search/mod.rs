mod filter;

pub use filter::{and, FilterSet, KeyedFilter, RangeBound, SearchFilter};
