// Domain-layer modules and shared errors/models
pub mod lookup {
    pub use crate::lookup::*;
}

pub mod models {
    pub use crate::models::*;
}

pub mod credentials {
    pub use crate::credentials::*;
}

pub mod errors {
    pub use crate::errors::*;
}
