//! Catalogues statiques : polices SAUCE et types de fichiers.

use serde::Serialize;

/// Font entry, keyed by its exact SAUCE name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FontDescriptor {
    pub name: &'static str,
    /// Cell size `WxH` in pixels.
    pub font_size: &'static str,
    pub resolution: &'static str,
    pub aspect_ratio: &'static str,
    pub pixel_aspect_ratio: &'static str,
    pub vertical_stretch: &'static str,
    pub description: &'static str,
}

/// File type entry, keyed by `(data_type, file_type)`.
///
/// A tinfo slot named `"0"` carries no meaning for that type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileTypeDescriptor {
    pub data_type: u8,
    pub file_type: u8,
    pub name: &'static str,
    pub description: &'static str,
    pub tinfo: [&'static str; 4],
    pub flags: &'static str,
    pub tinfo_s: &'static str,
}

/// Placeholder name for unused tinfo slots.
pub const UNUSED_SLOT: &str = "0";

/// Fonts named by the SAUCE standard.
pub const FONT_CATALOG: [FontDescriptor; 23] = [
    FontDescriptor {
        name: "IBM VGA",
        font_size: "9x16",
        resolution: "720x400",
        aspect_ratio: "4:3",
        pixel_aspect_ratio: "20:27 (1:1.35)",
        vertical_stretch: "35%",
        description: "Standard hardware font on VGA cards for 80x25 text mode (code page 437)",
    },
    FontDescriptor {
        name: "IBM VGA (8px)",
        font_size: "8x16",
        resolution: "640x400",
        aspect_ratio: "4:3",
        pixel_aspect_ratio: "6:5 (1:1.2)",
        vertical_stretch: "20%",
        description: "Modified stats when using an 8 pixel wide version of 'IBM VGA' or code page variant.",
    },
    FontDescriptor {
        name: "IBM VGA50",
        font_size: "9x8",
        resolution: "720x400",
        aspect_ratio: "4:3",
        pixel_aspect_ratio: "20:27 (1:1.35)",
        vertical_stretch: "35%",
        description: "Standard hardware font on VGA cards for condensed 80x50 text mode (code page 437)",
    },
    FontDescriptor {
        name: "IBM VGA50 (8px)",
        font_size: "8x8",
        resolution: "640x400",
        aspect_ratio: "4:3",
        pixel_aspect_ratio: "5:6 (1:1.2)",
        vertical_stretch: "20%",
        description: "Modified stats when using an 8 pixel wide version of 'IBM VGA50' or code page variant.",
    },
    FontDescriptor {
        name: "IBM VGA25G",
        font_size: "8x19",
        resolution: "640x480",
        aspect_ratio: "4:3",
        pixel_aspect_ratio: "1:1",
        vertical_stretch: "0%",
        description: "Custom font for emulating 80x25 in VGA graphics mode 12 (640x480 16 color) (code page 437).",
    },
    FontDescriptor {
        name: "IBM EGA",
        font_size: "8x14",
        resolution: "640x350",
        aspect_ratio: "4:3",
        pixel_aspect_ratio: "35:48 (1:1.3714)",
        vertical_stretch: "37.14%",
        description: "Standard hardware font on EGA cards for 80x25 text mode (code page 437)",
    },
    FontDescriptor {
        name: "IBM EGA43",
        font_size: "8x8",
        resolution: "640x350",
        aspect_ratio: "4:3",
        pixel_aspect_ratio: "35:48 (1:1.3714)",
        vertical_stretch: "37.14%",
        description: "Standard hardware font on EGA cards for condensed 80x43 text mode (code page 437)",
    },
    FontDescriptor {
        name: "IBM VGA ###",
        font_size: "9x16",
        resolution: "720x400",
        aspect_ratio: "4:3",
        pixel_aspect_ratio: "20:27 (1:1.35)",
        vertical_stretch: "35%",
        description: "Software installed code page font for VGA 80x25 text mode",
    },
    FontDescriptor {
        name: "IBM VGA50 ###",
        font_size: "9x8",
        resolution: "720x400",
        aspect_ratio: "4:3",
        pixel_aspect_ratio: "20:27 (1:1.35)",
        vertical_stretch: "35%",
        description: "Software installed code page font for VGA condensed 80x50 text mode",
    },
    FontDescriptor {
        name: "IBM VGA25G ###",
        font_size: "8x19",
        resolution: "640x480",
        aspect_ratio: "4:3",
        pixel_aspect_ratio: "1:1",
        vertical_stretch: "0%",
        description: "Custom font for emulating 80x25 in VGA graphics mode 12 (640x480 16 color).",
    },
    FontDescriptor {
        name: "IBM EGA ###",
        font_size: "8x14",
        resolution: "640x350",
        aspect_ratio: "4:3",
        pixel_aspect_ratio: "35:48 (1:1.3714)",
        vertical_stretch: "37.14%",
        description: "Software installed code page font for EGA 80x25 text mode",
    },
    FontDescriptor {
        name: "IBM EGA43 ###",
        font_size: "8x8",
        resolution: "640x350",
        aspect_ratio: "4:3",
        pixel_aspect_ratio: "35:48 (1:1.3714)",
        vertical_stretch: "37.14%",
        description: "Software installed code page font for EGA condensed 80x43 text mode",
    },
    FontDescriptor {
        name: "Amiga Topaz 1",
        font_size: "8x8",
        resolution: "640x200",
        aspect_ratio: "4:3",
        pixel_aspect_ratio: "5:12 (1:2.4)",
        vertical_stretch: "140%",
        description: "Original Amiga Topaz Kickstart 1.x font. (A500, A1000, A2000)",
    },
    FontDescriptor {
        name: "Amiga Topaz 1+",
        font_size: "8x8",
        resolution: "640x200",
        aspect_ratio: "4:3",
        pixel_aspect_ratio: "5:12 (1:2.4)",
        vertical_stretch: "140%",
        description: "Modified Amiga Topaz Kickstart 1.x font. (A500, A1000, A2000)",
    },
    FontDescriptor {
        name: "Amiga Topaz 2",
        font_size: "8x8",
        resolution: "640x200",
        aspect_ratio: "4:3",
        pixel_aspect_ratio: "5:12 (1:2.4)",
        vertical_stretch: "140%",
        description: "Original Amiga Topaz Kickstart 2.x font (A600, A1200, A4000)",
    },
    FontDescriptor {
        name: "Amiga Topaz 2+",
        font_size: "8x8",
        resolution: "640x200",
        aspect_ratio: "4:3",
        pixel_aspect_ratio: "5:12 (1:2.4)",
        vertical_stretch: "140%",
        description: "Modified Amiga Topaz Kickstart 2.x font (A600, A1200, A4000)",
    },
    FontDescriptor {
        name: "Amiga P0T-NOoDLE",
        font_size: "8x8",
        resolution: "640x200",
        aspect_ratio: "4:3",
        pixel_aspect_ratio: "5:12 (1:2.4)",
        vertical_stretch: "140%",
        description: "Original P0T-NOoDLE font.",
    },
    FontDescriptor {
        name: "Amiga MicroKnight",
        font_size: "8x8",
        resolution: "640x200",
        aspect_ratio: "4:3",
        pixel_aspect_ratio: "5:12 (1:2.4)",
        vertical_stretch: "140%",
        description: "Original MicroKnight font.",
    },
    FontDescriptor {
        name: "Amiga MicroKnight+",
        font_size: "8x8",
        resolution: "640x200",
        aspect_ratio: "4:3",
        pixel_aspect_ratio: "5:12 (1:2.4)",
        vertical_stretch: "140%",
        description: "Modified MicroKnight font.",
    },
    FontDescriptor {
        name: "Amiga mOsOul",
        font_size: "8x8",
        resolution: "640x200",
        aspect_ratio: "4:3",
        pixel_aspect_ratio: "5:12 (1:2.4)",
        vertical_stretch: "140%",
        description: "Original mOsOul font.",
    },
    FontDescriptor {
        name: "C64 PETSCII unshifted",
        font_size: "8x8",
        resolution: "320x200",
        aspect_ratio: "4:3",
        pixel_aspect_ratio: "5:6 (1:1.2)",
        vertical_stretch: "20%",
        description: "Original Commodore PETSCII font (PET, VIC-20, C64, CBM-II, Plus/4, C16, C116 and C128) in the unshifted mode. Unshifted mode (graphics) only has uppercase letters and additional graphic characters. This is the normal boot font.",
    },
    FontDescriptor {
        name: "C64 PETSCII shifted",
        font_size: "8x8",
        resolution: "320x200",
        aspect_ratio: "4:3",
        pixel_aspect_ratio: "5:6 (1:1.2)",
        vertical_stretch: "20%",
        description: "Original PETSCII font in shifted mode. Shifted mode (text) has both uppercase and lowercase letters. This mode is actuated by pressing Shift+Commodore key.",
    },
    FontDescriptor {
        name: "Atari ATASCII",
        font_size: "8x8",
        resolution: "320x192",
        aspect_ratio: "4:3",
        pixel_aspect_ratio: "4:5 (1:1.25)",
        vertical_stretch: "25%",
        description: "Original ATASCII font (Atari 400, 800, XL, XE)",
    },
];

/// Character (data type 1) and XBin (data type 6) file types.
pub const FILE_TYPE_CATALOG: [FileTypeDescriptor; 10] = [
    FileTypeDescriptor {
        data_type: 1,
        file_type: 0,
        name: "ASCII",
        description: "Plain ASCII text file with no formatting codes or color codes.",
        tinfo: ["Character width", "Number of lines", "0", "0"],
        flags: "ANSiFlags",
        tinfo_s: "FontName",
    },
    FileTypeDescriptor {
        data_type: 1,
        file_type: 1,
        name: "ANSi",
        description: "A file with ANSi coloring codes and cursor positioning.",
        tinfo: ["Character width", "Number of lines", "0", "0"],
        flags: "ANSiFlags",
        tinfo_s: "FontName",
    },
    FileTypeDescriptor {
        data_type: 1,
        file_type: 2,
        name: "ANSiMation",
        description: "Like an ANSi file, but it relies on a fixed screen size.",
        tinfo: ["Character width", "Character screen height [5]", "0", "0"],
        flags: "ANSiFlags",
        tinfo_s: "FontName",
    },
    FileTypeDescriptor {
        data_type: 1,
        file_type: 3,
        name: "RIP script",
        description: "Remote Imaging Protocol graphics.",
        tinfo: ["Pixel width (640)", "Pixel height (350)", "Number of colors (16)", "0"],
        flags: "0",
        tinfo_s: "0",
    },
    FileTypeDescriptor {
        data_type: 1,
        file_type: 4,
        name: "PCBoard",
        description: "A file with PCBoard color codes and macros, and ANSi codes.",
        tinfo: ["Character width", "Number of lines", "0", "0"],
        flags: "0",
        tinfo_s: "0",
    },
    FileTypeDescriptor {
        data_type: 1,
        file_type: 5,
        name: "Avatar",
        description: "A file with Avatar color codes, and ANSi codes.",
        tinfo: ["Character width", "Number of lines", "0", "0"],
        flags: "0",
        tinfo_s: "0",
    },
    FileTypeDescriptor {
        data_type: 1,
        file_type: 6,
        name: "HTML",
        description: "HyperText Markup Language",
        tinfo: ["0", "0", "0", "0"],
        flags: "0",
        tinfo_s: "0",
    },
    FileTypeDescriptor {
        data_type: 1,
        file_type: 7,
        name: "Source",
        description: "Source code for some programming language. The file extension should determine the programming language.",
        tinfo: ["0", "0", "0", "0"],
        flags: "0",
        tinfo_s: "0",
    },
    FileTypeDescriptor {
        data_type: 1,
        file_type: 8,
        name: "TundraDraw",
        description: "A TundraDraw file. Like ANSI, but with a custom palette.",
        tinfo: ["Character width", "Number of lines", "0", "0"],
        flags: "0",
        tinfo_s: "0",
    },
    FileTypeDescriptor {
        data_type: 6,
        file_type: 0,
        name: "-",
        description: "eXtended Bin",
        tinfo: ["Character width", "Number of lines", "0", "0"],
        flags: "0",
        tinfo_s: "0",
    },
];

/// Exact, case-sensitive font lookup.
///
/// # Example
/// ```
/// use aa_sauce::catalog::font;
/// assert_eq!(font("Amiga Topaz 2").map(|f| f.font_size), Some("8x8"));
/// assert!(font("amiga topaz 2").is_none());
/// ```
#[must_use]
pub fn font(name: &str) -> Option<&'static FontDescriptor> {
    FONT_CATALOG.iter().find(|f| f.name == name)
}

/// Look up a file type by its two type bytes.
#[must_use]
pub fn file_type(data_type: u8, file_type: u8) -> Option<&'static FileTypeDescriptor> {
    FILE_TYPE_CATALOG
        .iter()
        .find(|t| t.data_type == data_type && t.file_type == file_type)
}
