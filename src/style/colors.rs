//! Material-Design-style palette, restricted to the shades the style
//! rules in `engine.rs` actually reference.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color {
        r: r as f64 / 255.0,
        g: g as f64 / 255.0,
        b: b as f64 / 255.0,
    }
}

pub const RED_50: Color = rgb(0xff, 0xeb, 0xee);
pub const RED_200: Color = rgb(0xef, 0x9a, 0x9a);
pub const RED_400: Color = rgb(0xef, 0x53, 0x50);

pub const ORANGE_50: Color = rgb(0xff, 0xf3, 0xe0);
pub const ORANGE_100: Color = rgb(0xff, 0xe0, 0xb2);
pub const ORANGE_300: Color = rgb(0xff, 0xb7, 0x4d);
pub const ORANGE_700: Color = rgb(0xf5, 0x7c, 0x00);
pub const ORANGE_900: Color = rgb(0xe6, 0x51, 0x00);

pub const AMBER_100: Color = rgb(0xff, 0xec, 0xb3);

pub const CYAN_50: Color = rgb(0xe0, 0xf7, 0xfa);
pub const CYAN_400: Color = rgb(0x26, 0xc6, 0xda);

pub const TEAL_300: Color = rgb(0x4d, 0xb6, 0xac);
pub const TEAL_500: Color = rgb(0x00, 0x96, 0x88);

pub const GREEN_500: Color = rgb(0x4c, 0xaf, 0x50);
pub const GREEN_700: Color = rgb(0x38, 0x8e, 0x3c);

pub const LIGHT_GREEN_50: Color = rgb(0xf1, 0xf8, 0xe9);
pub const LIGHT_GREEN_100: Color = rgb(0xdc, 0xed, 0xc8);
pub const LIGHT_GREEN_200: Color = rgb(0xc5, 0xe1, 0xa5);
pub const LIGHT_GREEN_300: Color = rgb(0xae, 0xd5, 0x81);
pub const LIGHT_GREEN_400: Color = rgb(0x9c, 0xcc, 0x65);
pub const LIGHT_GREEN_500: Color = rgb(0x8b, 0xc3, 0x4a);
pub const LIGHT_GREEN_800: Color = rgb(0x55, 0x8b, 0x2f);

pub const LIME_100: Color = rgb(0xf0, 0xf4, 0xc3);
pub const LIME_300: Color = rgb(0xdc, 0xe7, 0x75);
pub const LIME_500: Color = rgb(0xcd, 0xdc, 0x39);
pub const LIME_700: Color = rgb(0xaf, 0xb4, 0x2b);

pub const LIGHT_BLUE_100: Color = rgb(0xb3, 0xe5, 0xfc);

pub const BLUE_100: Color = rgb(0xbb, 0xde, 0xfb);
pub const BLUE_600: Color = rgb(0x19, 0x76, 0xd2);
pub const BLUE_800: Color = rgb(0x15, 0x65, 0xc0);
pub const BLUE_900: Color = rgb(0x0d, 0x47, 0xa1);

pub const INDIGO_50: Color = rgb(0xe8, 0xea, 0xf6);
pub const INDIGO_100: Color = rgb(0xc5, 0xca, 0xe9);

pub const DEEP_PURPLE_400: Color = rgb(0x7e, 0x57, 0xc2);

pub const BLUE_GRAY_50: Color = rgb(0xec, 0xef, 0xf1);
pub const BLUE_GRAY_200: Color = rgb(0xb0, 0xbe, 0xc5);
pub const BLUE_GRAY_300: Color = rgb(0x90, 0xa4, 0xae);
pub const BLUE_GRAY_400: Color = rgb(0x78, 0x90, 0x9c);
pub const BLUE_GRAY_900: Color = rgb(0x26, 0x32, 0x38);

pub const BROWN_50: Color = rgb(0xef, 0xeb, 0xe9);
pub const BROWN_100: Color = rgb(0xd7, 0xcc, 0xc8);
pub const BROWN_400: Color = rgb(0x8d, 0x6e, 0x63);
pub const BROWN_600: Color = rgb(0x6d, 0x4c, 0x41);
pub const BROWN_800: Color = rgb(0x4e, 0x34, 0x2e);
pub const BROWN_900: Color = rgb(0x3e, 0x27, 0x23);

pub const GRAY_50: Color = rgb(0xfa, 0xfa, 0xfa);
pub const GRAY_200: Color = rgb(0xee, 0xee, 0xee);
pub const GRAY_300: Color = rgb(0xe0, 0xe0, 0xe0);
pub const GRAY_400: Color = rgb(0xbd, 0xbd, 0xbd);
pub const GRAY_500: Color = rgb(0x9e, 0x9e, 0x9e);
pub const GRAY_600: Color = rgb(0x75, 0x75, 0x75);
