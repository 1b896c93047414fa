pub mod user;
pub mod contribution;
pub mod language;
pub mod settings;

pub use user::*;
pub use contribution::*;
pub use language::*;
pub use settings::*;
