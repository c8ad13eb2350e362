//! Colors for game elements (0xRRGGBB)

pub const BACKGROUND: u32 = 0x050505;
pub const BACKDROP_TOP: u32 = 0x030712;
pub const BACKDROP_BOTTOM: u32 = 0x0c0e19;
/// Backdrop is slightly see-through so the starfield shows
pub const BACKDROP_ALPHA: f32 = 0.85;
pub const STAR: u32 = 0xffffff;
pub const HUD_TEXT: u32 = 0xffffff;

pub const PLAYER: u32 = 0x00fff0;
pub const PLAYER_GLOW: u32 = 0x00ffe0;
pub const HAZARD: u32 = 0xff4a4a;
pub const HAZARD_GLOW: u32 = 0xff2222;
pub const BONUS: u32 = 0x66ff99;
pub const BONUS_GLOW: u32 = 0x33ff88;

/// CSS `rgba()` string for canvas styles
pub fn css(rgb: u32, alpha: f32) -> String {
    let r = (rgb >> 16) & 0xff;
    let g = (rgb >> 8) & 0xff;
    let b = rgb & 0xff;
    format!("rgba({},{},{},{})", r, g, b, alpha.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css() {
        assert_eq!(css(HAZARD, 1.0), "rgba(255,74,74,1)");
        assert_eq!(css(0x000000, 1.5), "rgba(0,0,0,1)");
        assert_eq!(css(BONUS, 0.25), "rgba(102,255,153,0.25)");
    }
}
