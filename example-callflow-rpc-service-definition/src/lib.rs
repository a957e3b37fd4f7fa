mod chat;
mod codec;
mod echo;
mod repeat;
mod sum;

pub use chat::Chat;
pub use echo::Echo;
pub use repeat::{Repeat, RepeatRequest};
pub use sum::Sum;
