use thiserror::Error;

/// Application-level error carried up to `main` and mapped to an exit code.
///
/// Exit codes:
/// - `2`: input problems (missing files, bad CSV, missing columns)
/// - `3`: data preconditions (empty cohorts, duplicate players)
/// - `4`: rendering/output failures
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Errors raised by the chart-data pipeline itself.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    /// A dataset is missing columns a pipeline needs.
    #[error("{dataset} dataset is missing required column(s): {}", .missing.join(", "))]
    Schema {
        dataset: String,
        missing: Vec<String>,
    },

    /// A cell could not be parsed into its column type.
    #[error("{dataset} line {line}, column `{column}`: {message}")]
    Parse {
        dataset: String,
        line: usize,
        column: String,
        message: String,
    },

    #[error("player `{0}` appears more than once in the player dataset")]
    DuplicatePlayer(String),

    /// `league` and `league_id` disagree on a stat row.
    #[error("line {line}: league `{league}` does not match league_id {league_id}")]
    LeagueMismatch {
        line: usize,
        league: String,
        league_id: i64,
    },

    /// Averaging over a rookie year with no surviving players.
    #[error("rookie year {rookie_year} has no active players; cannot average")]
    DegenerateCohort { rookie_year: u32 },

    /// The renderer failed on every permitted attempt.
    #[error("render failed after {attempts} attempt(s): {message}")]
    Render { attempts: u32, message: String },
}

impl From<ChartError> for AppError {
    fn from(err: ChartError) -> Self {
        let exit_code = match &err {
            ChartError::Schema { .. } | ChartError::Parse { .. } | ChartError::LeagueMismatch { .. } => 2,
            ChartError::DuplicatePlayer(_) | ChartError::DegenerateCohort { .. } => 3,
            ChartError::Render { .. } => 4,
        };
        AppError::new(exit_code, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_lists_missing_columns() {
        let err = ChartError::Schema {
            dataset: "stats".to_string(),
            missing: vec!["minutes".to_string(), "league".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "stats dataset is missing required column(s): minutes, league"
        );
    }

    #[test]
    fn chart_errors_map_to_exit_codes() {
        let schema: AppError = ChartError::Schema {
            dataset: "players".to_string(),
            missing: vec!["player_name".to_string()],
        }
        .into();
        assert_eq!(schema.exit_code(), 2);

        let degenerate: AppError = ChartError::DegenerateCohort { rookie_year: 3 }.into();
        assert_eq!(degenerate.exit_code(), 3);

        let render: AppError = ChartError::Render {
            attempts: 2,
            message: "boom".to_string(),
        }
        .into();
        assert_eq!(render.exit_code(), 4);
    }
}
