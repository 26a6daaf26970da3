//! Client-side half of the relay: sends user input to the chat endpoint and
//! falls back to canned replies when the endpoint cannot answer.

pub mod dispatcher;
pub mod session;
pub mod view;

pub use dispatcher::{DispatchError, Dispatcher, Outcome, ReplySource};
pub use session::Session;
pub use view::ChatView;
