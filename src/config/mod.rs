mod load;
mod types;

pub use load::load_or_init;
pub use types::DespriteConfig;
