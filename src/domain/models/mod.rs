mod completion;
mod conversation;
mod example_prompt;
mod response;

pub use completion::*;
pub use conversation::*;
pub use example_prompt::*;
pub use response::*;
