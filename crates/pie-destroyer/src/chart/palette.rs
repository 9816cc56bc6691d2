use super::domain::ColorScheme;
use rand::Rng;

const DEFAULT: [&str; 10] = [
    "#0088FE", "#00C49F", "#FFBB28", "#FF8042", "#8884D8", "#82CA9D", "#FFC658", "#FF6B6B",
    "#4ECDC4", "#45B7D1",
];
const COLORBLIND: [&str; 10] = [
    "#004488", "#DDAA33", "#BB5566", "#000000", "#999933", "#882255", "#44AA99", "#117733",
    "#332288", "#AA4499",
];
const COLORSAFE: [&str; 10] = [
    "#0173B2", "#DE8F05", "#029E73", "#CC78BC", "#CA9161", "#949494", "#ECE133", "#56B4E9",
    "#F0E442", "#D55E00",
];
const UGLY: [&str; 10] = [
    "#8B4513", "#FF1493", "#7FFF00", "#FF4500", "#9400D3", "#FFD700", "#FF69B4", "#00CED1",
    "#DC143C", "#ADFF2F",
];
const NEON: [&str; 10] = [
    "#FF00FF", "#00FFFF", "#FFFF00", "#FF0000", "#00FF00", "#0000FF", "#FF00AA", "#AAFF00",
    "#00AAFF", "#FF6600",
];

/// Resolves `count` fill colors for `scheme`.
///
/// Named palettes that run out continue with the default palette, not with themselves.
/// `random` draws fresh colors on every call.
pub fn colors_for<R: Rng>(scheme: ColorScheme, count: usize, rng: &mut R) -> Vec<String> {
    let mut colors: Vec<String> = match scheme {
        ColorScheme::Random => (0..count)
            .map(|_| format!("#{:06x}", rng.random_range(0..16_777_215u32)))
            .collect(),
        ColorScheme::Similar => (0..count)
            .map(|index| format!("hsl(200, 70%, {}%)", 50 + index))
            .collect(),
        named => named_palette(named).iter().map(|c| c.to_string()).collect(),
    };

    while colors.len() < count {
        colors.extend(DEFAULT.iter().map(|c| c.to_string()));
    }
    colors.truncate(count);
    colors
}

fn named_palette(scheme: ColorScheme) -> &'static [&'static str] {
    match scheme {
        ColorScheme::Colorblind => &COLORBLIND,
        ColorScheme::Colorsafe => &COLORSAFE,
        ColorScheme::Ugly => &UGLY,
        ColorScheme::Neon => &NEON,
        ColorScheme::Default | ColorScheme::Random | ColorScheme::Similar => &DEFAULT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn exhausted_palettes_continue_with_default_colors() {
        let mut rng = StdRng::seed_from_u64(7);
        let colors = colors_for(ColorScheme::Neon, 12, &mut rng);

        assert_eq!(colors.len(), 12);
        assert_eq!(colors[9], "#FF6600");
        assert_eq!(colors[10], "#0088FE");
        assert_eq!(colors[11], "#00C49F");
    }

    #[test]
    fn short_requests_truncate() {
        let mut rng = StdRng::seed_from_u64(7);
        let colors = colors_for(ColorScheme::Colorsafe, 3, &mut rng);
        assert_eq!(colors, vec!["#0173B2", "#DE8F05", "#029E73"]);
    }

    #[test]
    fn default_palette_tiles_past_twenty() {
        let mut rng = StdRng::seed_from_u64(7);
        let colors = colors_for(ColorScheme::Default, 25, &mut rng);
        assert_eq!(colors.len(), 25);
        assert_eq!(colors[20], colors[0]);
    }

    #[test]
    fn similar_scheme_steps_lightness() {
        let mut rng = StdRng::seed_from_u64(7);
        let colors = colors_for(ColorScheme::Similar, 3, &mut rng);
        assert_eq!(
            colors,
            vec!["hsl(200, 70%, 50%)", "hsl(200, 70%, 51%)", "hsl(200, 70%, 52%)"]
        );
    }

    #[test]
    fn random_scheme_yields_hex_colors() {
        let mut rng = StdRng::seed_from_u64(7);
        let colors = colors_for(ColorScheme::Random, 15, &mut rng);
        assert_eq!(colors.len(), 15);
        assert!(colors.iter().all(|color| {
            color.len() == 7
                && color.starts_with('#')
                && color[1..].chars().all(|c| c.is_ascii_hexdigit())
        }));
    }
}
