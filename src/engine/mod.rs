mod interface;
mod stub;
mod taiga;

pub use interface::{Engine, EngineHandle, Event, Request};
pub use stub::StubEngine;
pub use taiga::TaigaEngine;
