pub mod types;

pub use types::{
    Aggregation, AggregationItem, AggregationLabel, AggregationRequest, AggregationResponse,
    AggregationResponseValue, RangeAggregationRequest, RangeAggregationRequestValue,
    TermAggregationRequest, ATTRIBUTE_AGGREGATION, PRICE_RANGE_AGGREGATION, RANGE_AGGREGATION,
};
