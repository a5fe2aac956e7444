pub mod capital_one;
pub mod traits;

pub mod prelude {
    pub use super::capital_one::prelude::*;
    pub use super::traits::Parser;
}
