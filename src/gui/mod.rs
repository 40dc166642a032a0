mod app;
mod message;
mod screens;
mod widgets;

pub use app::{InsightApp, run};
pub use message::Message;
