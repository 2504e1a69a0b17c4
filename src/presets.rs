//! Named output sizes offered by the size picker.

use crate::foundation::core::Canvas;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct DevicePreset {
    pub label: &'static str,
    /// Stable command-line identifier.
    pub slug: &'static str,
    pub width: u32,
    pub height: u32,
}

impl DevicePreset {
    const fn new(label: &'static str, slug: &'static str, width: u32, height: u32) -> Self {
        Self {
            label,
            slug,
            width,
            height,
        }
    }

    pub fn canvas(self) -> Canvas {
        Canvas::new(self.width, self.height)
    }
}

pub const PRESETS: [DevicePreset; 6] = [
    DevicePreset::new("iPhone 15 Pro", "iphone-15-pro", 1290, 2796),
    DevicePreset::new("iPhone 14/13", "iphone-14", 1170, 2532),
    DevicePreset::new("iPad Pro 12.9\"", "ipad-pro-12-9", 2048, 2732),
    DevicePreset::new("Mac 5K", "mac-5k", 5120, 2880),
    DevicePreset::new("4K UHD", "4k", 3840, 2160),
    DevicePreset::new("8K UHD", "8k", 7680, 4320),
];

/// Look up a preset by slug or label, ignoring ASCII case.
pub fn find_preset(name: &str) -> Option<DevicePreset> {
    let name = name.trim();
    PRESETS
        .iter()
        .copied()
        .find(|p| p.slug.eq_ignore_ascii_case(name) || p.label.eq_ignore_ascii_case(name))
}
