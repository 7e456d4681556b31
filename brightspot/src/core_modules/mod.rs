pub mod intensity;
pub mod polygon;
pub mod ranker;
pub mod region_extractor;
pub mod subject;
