mod composer;
mod field_item;
mod logger;
mod media_buttons;

pub use composer::Composer;
pub use field_item::FieldItem;
pub use logger::Logger;
pub use media_buttons::MediaButtons;
