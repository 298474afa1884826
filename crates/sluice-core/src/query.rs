mod builder;
pub use builder::{build, SUPPORTED_OPERATIONS};

mod model;
pub use model::{OrderBy, QueryModel};

mod operation;
pub use operation::Operation;

mod terminal;
pub use terminal::TerminalKind;
