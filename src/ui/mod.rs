pub mod clip_list;
pub mod layout;
pub mod status;
pub mod text;
pub mod theme;
pub mod title;

pub use clip_list::{ClipListRenderContext, render_clip_list};
pub use layout::create_main_layout;
pub use status::{StatusBarContext, render_status_bar};
pub use theme::{Theme, ThemeError};
pub use title::render_title_bar;
