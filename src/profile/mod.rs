mod load;
mod model;

pub use load::load_profile;
pub use model::{ProfileData, RepoRecord};
