pub mod attestation;
pub mod changes;
mod data;
pub mod domain;
pub mod evaluation;
pub mod export;
mod palette;
pub mod query;
pub mod render;
mod routes;
mod session;

pub use attestation::generate_code;
pub use changes::{OptionChange, OptionChangeError};
pub use data::{sample_data, DataPoint};
pub use domain::{BackgroundPattern, ColorScheme, LabelMode, OptionSet, SLICE_CHOICES};
pub use evaluation::{
    chargeable_count, BudgetCategory, BudgetError, DerivedReport, EvaluationConfig,
    EvaluationEngine, GoodPractice, ViolationKind,
};
pub use palette::colors_for;
pub use render::{ChartSpec, LabelStyle, SliceSpec};
pub use routes::{chart_router, ChangeRequest, ChartReportView};
pub use session::ChartSession;
