//! 16x16 monochrome menu icons, one `u16` per row, MSB is the left pixel.

pub const ICON_SIZE: u32 = 16;

#[derive(Debug, PartialEq, Eq)]
pub struct Icon {
    pub rows: [u16; 16],
}

impl Icon {
    /// True if the pixel at column `x`, row `y` is set.
    pub fn is_set(&self, x: u32, y: u32) -> bool {
        if x >= ICON_SIZE || y >= ICON_SIZE {
            return false;
        }
        self.rows[y as usize] & (0x8000 >> x) != 0
    }
}

// Main menu

pub const SUBGHZ: Icon = Icon {
    rows: [
        0b0000000000000000,
        0b0100000000000010,
        0b1001000000001001,
        0b1010010000100101,
        0b1010100110010101,
        0b1010100110010101,
        0b1010010000100101,
        0b1001000110001001,
        0b0100000110000010,
        0b0000000110000000,
        0b0000000110000000,
        0b0000000110000000,
        0b0000000110000000,
        0b0000001111000000,
        0b0000011111100000,
        0b0000000000000000,
    ],
};

pub const NRF24: Icon = Icon {
    rows: [
        0b0000000000000000,
        0b0000011111100000,
        0b0001100000011000,
        0b0110000000000110,
        0b1000011111100001,
        0b0001100000011000,
        0b0010000000000100,
        0b0000011111100000,
        0b0000100000010000,
        0b0000000000000000,
        0b0000000110000000,
        0b0000001111000000,
        0b0000001111000000,
        0b0000000110000000,
        0b0000000000000000,
        0b0000000000000000,
    ],
};

pub const TOOLS: Icon = Icon {
    rows: [
        0b0000000000111000,
        0b0000000001110000,
        0b0000000011100010,
        0b0000000011100110,
        0b0000000011111110,
        0b0000000111111100,
        0b0000001111111000,
        0b0000011111000000,
        0b0000111110000000,
        0b0001111100000000,
        0b0011111000000000,
        0b0111110000000000,
        0b1111100000000000,
        0b1111000000000000,
        0b0110000000000000,
        0b0000000000000000,
    ],
};

pub const STORAGE: Icon = Icon {
    rows: [
        0b0000111111111000,
        0b0001101010101100,
        0b0011101010101100,
        0b0111101010101100,
        0b0111111111111100,
        0b0111111111111100,
        0b0111111111111100,
        0b0111000000011100,
        0b0111011111011100,
        0b0111000000011100,
        0b0111011111011100,
        0b0111000000011100,
        0b0111111111111100,
        0b0111111111111100,
        0b0011111111111000,
        0b0000000000000000,
    ],
};

pub const SETTINGS: Icon = Icon {
    rows: [
        0b0000000110000000,
        0b0000000110000000,
        0b0011001111001100,
        0b0011111111111100,
        0b0001111111111000,
        0b0001110000111000,
        0b0011100000011100,
        0b1111100000011111,
        0b1111100000011111,
        0b0011100000011100,
        0b0001110000111000,
        0b0001111111111000,
        0b0011111111111100,
        0b0011001111001100,
        0b0000000110000000,
        0b0000000110000000,
    ],
};

pub const ABOUT: Icon = Icon {
    rows: [
        0b0000011111100000,
        0b0001100000011000,
        0b0010000110000100,
        0b0100000110000010,
        0b0100000000000010,
        0b1000001110000001,
        0b1000000110000001,
        0b1000000110000001,
        0b1000000110000001,
        0b1000000110000001,
        0b0100000110000010,
        0b0100001111000010,
        0b0010000000000100,
        0b0001100000011000,
        0b0000011111100000,
        0b0000000000000000,
    ],
};

// Submenu

pub const REPLAY: Icon = Icon {
    rows: [
        0b0000000000000000,
        0b0000011111000000,
        0b0001100000110000,
        0b0010000000001000,
        0b0100000000000100,
        0b0100000000000100,
        0b1000000000000010,
        0b1000000000000010,
        0b1000000000011111,
        0b1000000000001110,
        0b0100000000000100,
        0b0100000000000000,
        0b0010000000000000,
        0b0001100000110000,
        0b0000011111000000,
        0b0000000000000000,
    ],
};

pub const JAMMER: Icon = Icon {
    rows: [
        0b0000000001111000,
        0b0000000011110000,
        0b0000000111100000,
        0b0000001111000000,
        0b0000011110000000,
        0b0000111111111000,
        0b0001111111110000,
        0b0000000111100000,
        0b0000001111000000,
        0b0000011110000000,
        0b0000111100000000,
        0b0000111000000000,
        0b0001110000000000,
        0b0001100000000000,
        0b0011000000000000,
        0b0010000000000000,
    ],
};

pub const SAVE: Icon = Icon {
    rows: [
        0b1111111111111000,
        0b1001000000101100,
        0b1001000000100110,
        0b1001000000100011,
        0b1001111111100001,
        0b1000000000000001,
        0b1000000000000001,
        0b1011111111111101,
        0b1010000000000101,
        0b1010000000000101,
        0b1010000000000101,
        0b1010000000000101,
        0b1010000000000101,
        0b1010000000000101,
        0b1111111111111111,
        0b0000000000000000,
    ],
};

pub const SPECTRUM: Icon = Icon {
    rows: [
        0b0000000000000000,
        0b0000000000011000,
        0b0000000000011000,
        0b0000011000011000,
        0b0000011000011000,
        0b0000011000011000,
        0b0000011000011000,
        0b0110011000011000,
        0b0110011001111000,
        0b0110011001111000,
        0b0110011001111110,
        0b0110011001111110,
        0b0110011001111110,
        0b0110011001111110,
        0b1111111111111111,
        0b0000000000000000,
    ],
};

pub const TOUCH: Icon = Icon {
    rows: [
        0b0000000100000000,
        0b0000000100000000,
        0b0000011111000000,
        0b0000100100100000,
        0b0001000100010000,
        0b0010000000001000,
        0b0010000000001000,
        0b1111100111111110,
        0b0010000000001000,
        0b0010000000001000,
        0b0001000100010000,
        0b0000100100100000,
        0b0000011111000000,
        0b0000000100000000,
        0b0000000100000000,
        0b0000000000000000,
    ],
};

pub const BATTERY: Icon = Icon {
    rows: [
        0b0000000000000000,
        0b0000000000000000,
        0b0000000000000000,
        0b0000000000000000,
        0b1111111111111000,
        0b1000000000001000,
        0b1011111111101110,
        0b1011111111101010,
        0b1011111111101010,
        0b1011111111101110,
        0b1000000000001000,
        0b1111111111111000,
        0b0000000000000000,
        0b0000000000000000,
        0b0000000000000000,
        0b0000000000000000,
    ],
};

pub const PROFILES: Icon = Icon {
    rows: [
        0b0000000000000000,
        0b1110111111111111,
        0b1110111111111111,
        0b0000000000000000,
        0b0000000000000000,
        0b1110111111111111,
        0b1110111111111111,
        0b0000000000000000,
        0b0000000000000000,
        0b1110111111111111,
        0b1110111111111111,
        0b0000000000000000,
        0b0000000000000000,
        0b1110111111111111,
        0b1110111111111111,
        0b0000000000000000,
    ],
};

pub const TIMER: Icon = Icon {
    rows: [
        0b0000011111100000,
        0b0001100000011000,
        0b0010000100000100,
        0b0100000100000010,
        0b0100000100000010,
        0b1000000100000001,
        0b1000000100000001,
        0b1000000111110001,
        0b1000000000000001,
        0b1000000000000001,
        0b0100000000000010,
        0b0100000000000010,
        0b0010000000000100,
        0b0001100000011000,
        0b0000011111100000,
        0b0000000000000000,
    ],
};

pub const BRIGHTNESS: Icon = Icon {
    rows: [
        0b0000000100000000,
        0b0100000100000100,
        0b0010000000001000,
        0b0001001110010000,
        0b0000110001100000,
        0b0000100000100000,
        0b0001000000010000,
        0b1101000000010110,
        0b0001000000010000,
        0b0000100000100000,
        0b0000110001100000,
        0b0001001110010000,
        0b0010000000001000,
        0b0100000100000100,
        0b0000000100000000,
        0b0000000000000000,
    ],
};

pub const BACK: Icon = Icon {
    rows: [
        0b0000000000000000,
        0b0000000000000000,
        0b0000001000000000,
        0b0000011000000000,
        0b0000111000000000,
        0b0001111111111110,
        0b0011111111111110,
        0b0111111111111110,
        0b0011111111111110,
        0b0001111111111110,
        0b0000111000000000,
        0b0000011000000000,
        0b0000001000000000,
        0b0000000000000000,
        0b0000000000000000,
        0b0000000000000000,
    ],
};
