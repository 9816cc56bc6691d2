mod svg;

pub use svg::{render_svg, CANVAS_WIDTH, CHART_HEIGHT};

use super::data::sample_data;
use super::domain::{BackgroundPattern, LabelMode, OptionSet};
use super::palette::colors_for;
use rand::Rng;
use serde::Serialize;

pub const OUTER_RADIUS: f64 = 110.0;
pub const DONUT_INNER_RADIUS: f64 = 40.0;
pub const EXPLODED_PADDING_ANGLE: f64 = 8.0;

const RANDOM_SIZES_TINY_AND_LARGE: &[u8] = &[4, 6, 8, 10, 14, 18, 22, 24];
const RANDOM_SIZES_TINY: &[u8] = &[4, 5, 6, 7, 8, 9, 10];
const RANDOM_SIZES_LARGE: &[u8] = &[14, 16, 18, 20, 22, 24];
const RANDOM_SIZES_MEDIUM: &[u8] = &[8, 10, 12, 14, 16, 18];

/// Everything a pie renderer needs: labelled values plus per-slice visual attributes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub slices: Vec<SliceSpec>,
    pub start_angle: f64,
    pub end_angle: f64,
    pub outer_radius: f64,
    pub inner_radius: f64,
    pub padding_angle: f64,
    pub labels: LabelStyle,
    pub show_legend: bool,
    pub perspective: bool,
    pub drop_shadow: bool,
    pub background: BackgroundPattern,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliceSpec {
    pub name: &'static str,
    pub value: f64,
    pub fill: String,
    pub stroke: &'static str,
    pub stroke_width: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LabelStyle {
    Hidden,
    Uniform { font_size: u8 },
    Varied { sizes: Vec<u8> },
}

impl LabelStyle {
    fn for_options(options: &OptionSet) -> Self {
        if options.label_mode() == LabelMode::Hidden {
            return Self::Hidden;
        }

        let (tiny, large) = (options.tiny_labels, options.large_font);
        if options.random_label_sizes {
            let sizes = match (tiny, large) {
                (true, true) => RANDOM_SIZES_TINY_AND_LARGE,
                (true, false) => RANDOM_SIZES_TINY,
                (false, true) => RANDOM_SIZES_LARGE,
                (false, false) => RANDOM_SIZES_MEDIUM,
            };
            return Self::Varied {
                sizes: sizes.to_vec(),
            };
        }

        // tiny and large cancel out to the midpoint
        let font_size = match (tiny, large) {
            (true, false) => 8,
            (false, true) => 16,
            _ => 12,
        };
        Self::Uniform { font_size }
    }

    /// Font size of the label at `index`, or `None` when labels are hidden.
    pub fn font_size(&self, index: usize) -> Option<u8> {
        match self {
            Self::Hidden => None,
            Self::Uniform { font_size } => Some(*font_size),
            Self::Varied { sizes } => sizes.get(index % sizes.len().max(1)).copied(),
        }
    }
}

impl ChartSpec {
    pub fn build<R: Rng>(options: &OptionSet, rng: &mut R) -> Self {
        let data = sample_data(options.slices, rng);
        let colors = colors_for(options.colors, data.len(), rng);

        let (stroke, stroke_width) = if options.outline {
            ("#000", 6)
        } else if options.shadow {
            ("#000", 3)
        } else {
            ("#fff", 1)
        };

        let slices = data
            .into_iter()
            .zip(colors)
            .map(|(point, fill)| SliceSpec {
                name: point.name,
                value: point.value,
                fill,
                stroke,
                stroke_width,
            })
            .collect();

        let rotation = f64::from(options.rotation);
        let labels = LabelStyle::for_options(options);

        Self {
            slices,
            start_angle: 90.0 - rotation,
            end_angle: 450.0 - rotation,
            outer_radius: OUTER_RADIUS,
            inner_radius: if options.donut {
                DONUT_INNER_RADIUS
            } else {
                0.0
            },
            padding_angle: if options.explode {
                EXPLODED_PADDING_ANGLE
            } else {
                0.0
            },
            show_legend: labels != LabelStyle::Hidden,
            labels,
            perspective: options.three_d,
            drop_shadow: options.shadow,
            background: options.background,
            description: options
                .text_description
                .then(|| describe(options.slices)),
        }
    }
}

pub fn describe(slices: u32) -> String {
    format!(
        "This chart shows the market share distribution across {slices} companies. \
         The data represents each company's percentage of total market value."
    )
}
