//! Interactive editing: modes, pen strokes and the state machine tying
//! pointer input to the scene.

pub mod actions;
pub mod interaction;
pub mod mode;
pub mod pen;
pub mod stroke;

pub use actions::EditorAction;
pub use interaction::Editor;
pub use mode::{EditMode, PenTool};
pub use pen::{PenColor, PenStyle, PenThickness};
pub use stroke::StrokeBuilder;
