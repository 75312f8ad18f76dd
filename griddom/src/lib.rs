pub mod element;
pub mod event;
pub mod markup;
pub mod selector;
pub mod types;

pub use element::{find_all, find_element, find_element_mut, find_first, path_to, Content, Element};
pub use event::{DomEvent, EventRouter, Handler, PendingDispatch};
pub use markup::{escape_attr, escape_text, parse_fragment, MarkupError};
pub use selector::{Selector, SelectorError};
pub use types::*;
