// Interface adapters: remote wire protocol, TCP listener, headless input and presentation.

pub mod input;
pub mod net;
pub mod presenter;
pub mod protocol;
