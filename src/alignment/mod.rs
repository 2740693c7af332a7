pub mod estimate;
pub mod normalize;
pub mod report;
pub mod segmentation;
