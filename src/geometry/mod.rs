mod resolver;

pub use resolver::{CropPlan, OutputMode, PastePlan, resolve};
