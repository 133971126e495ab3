//! Bundled thumb icons.

use std::sync::OnceLock;

use crate::IconError;

const ARROW_SVG: &[u8] = include_bytes!("../assets/arrow.svg");
const CHECK_SVG: &[u8] = include_bytes!("../assets/check.svg");

/// Glyph shown inside the thumb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThumbIcon {
    /// Shown while the slide has not crossed the threshold.
    #[default]
    Arrow,
    /// Shown once the slide is past the threshold.
    Check,
}

/// Parsed icon metadata.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconData {
    /// Asset file name.
    pub name: &'static str,
    /// Intrinsic width in svg user units.
    pub width: f32,
    /// Intrinsic height in svg user units.
    pub height: f32,
}

impl ThumbIcon {
    /// Asset file name.
    pub fn asset_name(self) -> &'static str {
        match self {
            ThumbIcon::Arrow => "arrow.svg",
            ThumbIcon::Check => "check.svg",
        }
    }

    /// Raw SVG bytes for the host renderer.
    pub fn svg_data(self) -> &'static [u8] {
        match self {
            ThumbIcon::Arrow => ARROW_SVG,
            ThumbIcon::Check => CHECK_SVG,
        }
    }

    /// Parses the asset once and returns its metadata.
    pub fn load(self) -> Result<IconData, IconError> {
        static ARROW: OnceLock<Result<IconData, IconError>> = OnceLock::new();
        static CHECK: OnceLock<Result<IconData, IconError>> = OnceLock::new();
        let cell = match self {
            ThumbIcon::Arrow => &ARROW,
            ThumbIcon::Check => &CHECK,
        };
        cell.get_or_init(|| self.parse()).clone()
    }

    fn parse(self) -> Result<IconData, IconError> {
        let tree = usvg::Tree::from_data(self.svg_data(), &usvg::Options::default()).map_err(
            |err| IconError::Parse {
                name: self.asset_name(),
                message: err.to_string(),
            },
        )?;
        let size = tree.size();
        Ok(IconData {
            name: self.asset_name(),
            width: size.width(),
            height: size.height(),
        })
    }
}
