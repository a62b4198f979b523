pub mod actions;
pub mod env;
pub mod print;
pub mod system;

pub mod prelude {
    pub use crate::env::EnvSource;
    pub use crate::system;
    pub use crate::system::PathExt;
    pub use crate::{errorln, hintln, infoln, verboseln};
    pub use error_stack::{report, Result, ResultExt};
}
