mod winit;

pub(crate) use self::winit::{track_cursor, translate_device_event, translate_window_event};
