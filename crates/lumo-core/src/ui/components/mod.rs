pub mod button;
pub mod text;

pub use button::Button;
pub use text::{TextLine, TextSize};
