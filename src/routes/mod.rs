mod comments;
mod health_check;

pub use comments::*;
pub use health_check::*;
