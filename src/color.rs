//! HSL colors and shade-set generation.
//!
//! Every round starts from one random main color; the six candidate shades keep
//! its hue and saturation and differ only in lightness.

use core::fmt;
use core::str::FromStr;

use rand::Rng;

/// Saturation shared by every generated color (percent).
pub const SATURATION: u8 = 70;
/// Lightness of the main color before shading (percent).
pub const MAIN_LIGHTNESS: u8 = 50;
/// Lightness steps making up a shade set (percent).
pub const LIGHTNESS_LEVELS: [u8; SHADE_COUNT] = [30, 40, 50, 60, 70, 80];
/// Number of shades offered each round.
pub const SHADE_COUNT: usize = 6;

/// A CSS `hsl()` color with integer components.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HslColor {
    pub hue: u16,        // degrees, 0..360
    pub saturation: u8,  // percent
    pub lightness: u8,   // percent
}

impl HslColor {
    pub fn new(hue: u16, saturation: u8, lightness: u8) -> Self {
        Self { hue, saturation, lightness }
    }

    /// Same hue and saturation, different lightness.
    pub fn with_lightness(self, lightness: u8) -> Self {
        Self { lightness, ..self }
    }
}

impl fmt::Display for HslColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({}, {}%, {}%)", self.hue, self.saturation, self.lightness)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorParseError {
    #[error("empty color string")]
    Empty,
    #[error("not an hsl() color: {0:?}")]
    NotHsl(String),
    #[error("expected 3 hsl components, found {0}")]
    ComponentCount(usize),
    #[error("invalid hsl component {0:?}")]
    InvalidComponent(String),
    #[error("hsl component out of range: {0}")]
    OutOfRange(u32),
}

/// Parse `hsl(h, s%, l%)`. Percent signs are optional; whitespace is ignored.
impl FromStr for HslColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use ColorParseError::*;

        let s = s.trim();
        if s.is_empty() {
            return Err(Empty);
        }
        let args = s
            .strip_prefix("hsl(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| NotHsl(s.to_string()))?;

        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(ComponentCount(parts.len()));
        }
        let component = |raw: &str| -> Result<u32, ColorParseError> {
            raw.trim_end_matches('%')
                .trim()
                .parse::<u32>()
                .map_err(|_| InvalidComponent(raw.to_string()))
        };
        let hue = component(parts[0])?;
        let saturation = component(parts[1])?;
        let lightness = component(parts[2])?;

        if hue >= 360 {
            return Err(OutOfRange(hue));
        }
        for pct in [saturation, lightness] {
            if pct > 100 {
                return Err(OutOfRange(pct));
            }
        }
        // Range checks above make the narrowing lossless.
        Ok(HslColor::new(hue as u16, saturation as u8, lightness as u8))
    }
}

/// Random hue at the fixed saturation and mid lightness.
pub fn generate_main_color<R: Rng + ?Sized>(rng: &mut R) -> HslColor {
    HslColor::new(rng.gen_range(0..360), SATURATION, MAIN_LIGHTNESS)
}

/// The six lightness variants of `base`, in uniformly random order.
pub fn generate_shades<R: Rng + ?Sized>(base: HslColor, rng: &mut R) -> [HslColor; SHADE_COUNT] {
    let mut shades = LIGHTNESS_LEVELS.map(|l| base.with_lightness(l));
    shuffle(&mut shades, rng);
    shades
}

/// Fisher-Yates: walk down from the last index, swapping with any index <= i.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Uniformly pick the round's target from the shade set.
pub fn pick_target<R: Rng + ?Sized>(shades: &[HslColor; SHADE_COUNT], rng: &mut R) -> HslColor {
    shades[rng.gen_range(0..SHADE_COUNT)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashMap;

    #[test]
    fn main_color_uses_fixed_saturation_and_lightness() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..500 {
            let c = generate_main_color(&mut rng);
            assert!(c.hue < 360);
            assert_eq!(c.saturation, 70);
            assert_eq!(c.lightness, 50);
        }
    }

    #[test]
    fn shades_cover_every_lightness_once() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..200 {
            let base = generate_main_color(&mut rng);
            let shades = generate_shades(base, &mut rng);
            let mut ls: Vec<u8> = shades.iter().map(|s| s.lightness).collect();
            ls.sort_unstable();
            assert_eq!(ls, LIGHTNESS_LEVELS.to_vec());
            assert!(shades.iter().all(|s| s.hue == base.hue && s.saturation == base.saturation));
        }
    }

    #[test]
    fn shades_keep_hue_of_parsed_base() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let base: HslColor = "hsl(211, 70%, 50%)".parse().unwrap();
        let shades = generate_shades(base, &mut rng);
        assert!(shades.iter().all(|s| s.to_string().starts_with("hsl(211, 70%, ")));
    }

    #[test]
    fn shuffle_reaches_all_orderings_evenly() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut counts: HashMap<[u8; 6], u32> = HashMap::new();
        let draws = 72_000;
        for _ in 0..draws {
            let mut items = [0u8, 1, 2, 3, 4, 5];
            shuffle(&mut items, &mut rng);
            *counts.entry(items).or_default() += 1;
        }
        assert_eq!(counts.len(), 720);
        // Expected 100 per ordering; these bounds sit beyond six standard deviations.
        for (order, n) in &counts {
            assert!((40..=170).contains(n), "ordering {:?} drawn {} times", order, n);
        }
    }

    #[test]
    fn target_is_member_of_its_shade_set() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        for _ in 0..500 {
            let shades = generate_shades(generate_main_color(&mut rng), &mut rng);
            let target = pick_target(&shades, &mut rng);
            assert!(shades.contains(&target));
        }
    }

    #[test]
    fn target_position_is_uniform() {
        let mut rng = ChaCha8Rng::seed_from_u64(314);
        let base = HslColor::new(120, SATURATION, MAIN_LIGHTNESS);
        let shades = generate_shades(base, &mut rng);
        let mut counts = [0u32; SHADE_COUNT];
        for _ in 0..60_000 {
            let target = pick_target(&shades, &mut rng);
            let pos = shades.iter().position(|s| *s == target).unwrap();
            counts[pos] += 1;
        }
        // 10_000 expected per slot, standard deviation ~91
        for (pos, n) in counts.iter().enumerate() {
            assert!((9_400..=10_600).contains(n), "slot {} picked {} times", pos, n);
        }
    }

    #[test]
    fn hue_is_uniform_over_the_wheel() {
        let mut rng = ChaCha8Rng::seed_from_u64(2718);
        let mut counts = [0u32; 360];
        for _ in 0..360_000 {
            counts[usize::from(generate_main_color(&mut rng).hue)] += 1;
        }
        // 1_000 expected per degree, standard deviation ~32
        for (hue, n) in counts.iter().enumerate() {
            assert!((800..=1_200).contains(n), "hue {} drawn {} times", hue, n);
        }
    }

    #[test]
    fn same_seed_same_round() {
        let round = |seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let shades = generate_shades(generate_main_color(&mut rng), &mut rng);
            (shades, pick_target(&shades, &mut rng))
        };
        assert_eq!(round(5), round(5));
    }

    #[test]
    fn display_matches_css() {
        assert_eq!(HslColor::new(0, 70, 30).to_string(), "hsl(0, 70%, 30%)");
    }

    #[test]
    fn parse_accepts_css_and_rejects_garbage() {
        assert_eq!("hsl(359,70%,80%)".parse::<HslColor>(), Ok(HslColor::new(359, 70, 80)));
        assert_eq!(" hsl(12, 70, 40) ".parse::<HslColor>(), Ok(HslColor::new(12, 70, 40)));
        assert_eq!("".parse::<HslColor>(), Err(ColorParseError::Empty));
        assert!(matches!("rgb(1,2,3)".parse::<HslColor>(), Err(ColorParseError::NotHsl(_))));
        assert_eq!("hsl(1, 2)".parse::<HslColor>(), Err(ColorParseError::ComponentCount(2)));
        assert!(matches!(
            "hsl(a, 70%, 50%)".parse::<HslColor>(),
            Err(ColorParseError::InvalidComponent(_))
        ));
        assert_eq!("hsl(360, 70%, 50%)".parse::<HslColor>(), Err(ColorParseError::OutOfRange(360)));
        assert_eq!("hsl(10, 170%, 50%)".parse::<HslColor>(), Err(ColorParseError::OutOfRange(170)));
    }
}
