pub mod node;
pub mod request;

pub use node::{escape_term, unescape_term, Node};
pub use request::RequestTree;
