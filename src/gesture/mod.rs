pub mod command;
pub mod diagnostic;
pub mod event;
pub mod machine;
pub mod model;

pub use command::PresentationCommand;
pub use diagnostic::GestureDiagnostic;
pub use event::{GestureEvent, GestureEventKind};
pub use machine::GestureStateMachine;
pub use model::{GestureConfig, GesturePhase, GestureSession};
