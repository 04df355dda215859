mod grouper;

pub use grouper::group_animations;
