use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid color for theme.{field}: {value:?} (expected #RRGGBB or #RGB)")]
    InvalidColor { field: &'static str, value: String },

    #[error("delay_ms {0} exceeds the maximum of {max} ms", max = crate::config::MAX_DELAY_MS)]
    DelayTooLong(u64),

    #[error("plan_label must not be empty")]
    EmptyPlanLabel,
}
